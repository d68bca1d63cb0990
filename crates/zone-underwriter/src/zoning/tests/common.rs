use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::repository::RepositoryError;
use crate::zoning::{
    suburb_key, zoning_router, ClassificationRecord, Demographics, InfrastructureAnalysis,
    MarketCycle, MarketCyclePhase, MarketMetrics, MlConfidence, MlMetrics, RiskAssessment,
    SuburbSignals, SupplyDemand, ZoningRepository, ZoningService,
};

pub(super) fn ml_metrics(
    phase: MarketCyclePhase,
    ratio: f64,
    risks: [f64; 4],
    improvements: &[(&str, f64)],
) -> MlMetrics {
    MlMetrics {
        market_cycle: MarketCycle { phase },
        supply_demand: SupplyDemand { ratio },
        risk_assessment: RiskAssessment {
            market_risk: risks[0],
            development_risk: risks[1],
            environmental_risk: risks[2],
            regulatory_risk: risks[3],
        },
        infrastructure_analysis: InfrastructureAnalysis {
            planned_improvements: improvements
                .iter()
                .map(|(name, score)| (name.to_string(), *score))
                .collect::<BTreeMap<_, _>>(),
        },
        ml_confidence: MlConfidence {
            data_quality: 90.0,
            prediction_accuracy: 85.0,
            model_reliability: 80.0,
        },
    }
}

/// Scores roughly 0.81: green now and at every horizon.
pub(super) fn harbourside_signals() -> SuburbSignals {
    SuburbSignals {
        suburb: "Double Bay".to_string(),
        market: MarketMetrics {
            median_price: 4_200_000.0,
            price_growth: 8.0,
            rental_yield: 2.6,
            days_on_market: 20.0,
            clearance_rate: 80.0,
        },
        demographics: Demographics {
            population: 4_500,
            median_age: 44.0,
            employment_rate: 96.0,
        },
        ml: ml_metrics(
            MarketCyclePhase::Growth,
            1.6,
            [20.0, 30.0, 10.0, 20.0],
            &[("metro station", 80.0), ("school upgrade", 70.0)],
        ),
    }
}

/// Scores roughly 0.57.
pub(super) fn inner_west_signals() -> SuburbSignals {
    SuburbSignals {
        suburb: "Marrickville".to_string(),
        market: MarketMetrics {
            median_price: 1_800_000.0,
            price_growth: 5.0,
            rental_yield: 3.4,
            days_on_market: 45.0,
            clearance_rate: 65.0,
        },
        demographics: Demographics {
            population: 26_000,
            median_age: 35.0,
            employment_rate: 94.0,
        },
        ml: ml_metrics(
            MarketCyclePhase::Peak,
            1.0,
            [40.0, 40.0, 30.0, 30.0],
            &[("light rail", 50.0)],
        ),
    }
}

/// Scores roughly 0.19.
pub(super) fn fringe_signals() -> SuburbSignals {
    SuburbSignals {
        suburb: "Outer Fringe".to_string(),
        market: MarketMetrics {
            median_price: 650_000.0,
            price_growth: -2.0,
            rental_yield: 4.8,
            days_on_market: 120.0,
            clearance_rate: 30.0,
        },
        demographics: Demographics {
            population: 9_000,
            median_age: 39.0,
            employment_rate: 88.0,
        },
        ml: ml_metrics(
            MarketCyclePhase::Decline,
            0.4,
            [70.0, 60.0, 50.0, 70.0],
            &[],
        ),
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryZoningRepository {
    signals: Arc<Mutex<BTreeMap<String, SuburbSignals>>>,
    history: Arc<Mutex<HashMap<String, Vec<ClassificationRecord>>>>,
}

impl ZoningRepository for MemoryZoningRepository {
    fn upsert_signals(&self, signals: SuburbSignals) -> Result<(), RepositoryError> {
        let mut guard = self.signals.lock().expect("signals mutex poisoned");
        guard.insert(suburb_key(&signals.suburb), signals);
        Ok(())
    }

    fn signals(&self, suburb: &str) -> Result<Option<SuburbSignals>, RepositoryError> {
        let guard = self.signals.lock().expect("signals mutex poisoned");
        Ok(guard.get(&suburb_key(suburb)).cloned())
    }

    fn suburbs(&self) -> Result<Vec<String>, RepositoryError> {
        let guard = self.signals.lock().expect("signals mutex poisoned");
        Ok(guard.values().map(|signals| signals.suburb.clone()).collect())
    }

    fn record_classification(&self, record: ClassificationRecord) -> Result<(), RepositoryError> {
        let mut guard = self.history.lock().expect("history mutex poisoned");
        guard
            .entry(suburb_key(&record.classification.suburb))
            .or_default()
            .push(record);
        Ok(())
    }

    fn latest_classifications(&self) -> Result<Vec<ClassificationRecord>, RepositoryError> {
        let guard = self.history.lock().expect("history mutex poisoned");
        Ok(guard
            .values()
            .filter_map(|records| records.last().cloned())
            .collect())
    }

    fn history(&self, suburb: &str) -> Result<Vec<ClassificationRecord>, RepositoryError> {
        let guard = self.history.lock().expect("history mutex poisoned");
        Ok(guard.get(&suburb_key(suburb)).cloned().unwrap_or_default())
    }
}

pub(super) struct UnavailableZoningRepository;

impl ZoningRepository for UnavailableZoningRepository {
    fn upsert_signals(&self, _signals: SuburbSignals) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("signal store offline".to_string()))
    }

    fn signals(&self, _suburb: &str) -> Result<Option<SuburbSignals>, RepositoryError> {
        Err(RepositoryError::Unavailable("signal store offline".to_string()))
    }

    fn suburbs(&self) -> Result<Vec<String>, RepositoryError> {
        Err(RepositoryError::Unavailable("signal store offline".to_string()))
    }

    fn record_classification(&self, _record: ClassificationRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("signal store offline".to_string()))
    }

    fn latest_classifications(&self) -> Result<Vec<ClassificationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("signal store offline".to_string()))
    }

    fn history(&self, _suburb: &str) -> Result<Vec<ClassificationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("signal store offline".to_string()))
    }
}

pub(super) fn seeded_service() -> (ZoningService<MemoryZoningRepository>, MemoryZoningRepository) {
    let repository = MemoryZoningRepository::default();
    let service = ZoningService::new(Arc::new(repository.clone()));
    service
        .ingest_batch(vec![
            harbourside_signals(),
            inner_west_signals(),
            fringe_signals(),
        ])
        .expect("seed signals");
    (service, repository)
}

pub(super) fn seeded_router() -> axum::Router {
    let (service, _) = seeded_service();
    zoning_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
