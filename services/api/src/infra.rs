use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use zone_underwriter::repository::RepositoryError;
use zone_underwriter::underwriting::{DecisionId, DecisionRecord, DecisionRepository};
use zone_underwriter::zoning::{
    suburb_key, ClassificationRecord, Demographics, InfrastructureAnalysis, MarketCycle,
    MarketCyclePhase, MarketMetrics, MlConfidence, MlMetrics, RiskAssessment, SuburbSignals,
    SupplyDemand, ZoningRepository,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryZoningRepository {
    signals: Arc<Mutex<BTreeMap<String, SuburbSignals>>>,
    history: Arc<Mutex<HashMap<String, Vec<ClassificationRecord>>>>,
}

impl ZoningRepository for InMemoryZoningRepository {
    fn upsert_signals(&self, signals: SuburbSignals) -> Result<(), RepositoryError> {
        let mut guard = self.signals.lock().expect("signal mutex poisoned");
        guard.insert(suburb_key(&signals.suburb), signals);
        Ok(())
    }

    fn signals(&self, suburb: &str) -> Result<Option<SuburbSignals>, RepositoryError> {
        let guard = self.signals.lock().expect("signal mutex poisoned");
        Ok(guard.get(&suburb_key(suburb)).cloned())
    }

    fn suburbs(&self) -> Result<Vec<String>, RepositoryError> {
        let guard = self.signals.lock().expect("signal mutex poisoned");
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

/// Decisions kept in arrival order; `recent` walks it backwards.
#[derive(Default, Clone)]
pub(crate) struct InMemoryDecisionRepository {
    records: Arc<Mutex<Vec<DecisionRecord>>>,
}

impl DecisionRepository for InMemoryDecisionRepository {
    fn insert(&self, record: DecisionRecord) -> Result<DecisionRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard
            .iter()
            .any(|stored| stored.decision_id == record.decision_id)
        {
            return Err(RepositoryError::Conflict);
        }
        guard.push(record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &DecisionId) -> Result<Option<DecisionRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.iter().find(|record| &record.decision_id == id).cloned())
    }

    fn recent(&self, limit: usize) -> Result<Vec<DecisionRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.iter().rev().take(limit).cloned().collect())
    }
}

struct SampleSuburb {
    name: &'static str,
    median_price: f64,
    price_growth: f64,
    days_on_market: f64,
    clearance_rate: f64,
    employment_rate: f64,
    phase: MarketCyclePhase,
    supply_demand: f64,
    risks: [f64; 4],
    projects: &'static [(&'static str, f64)],
}

const SAMPLE_SUBURBS: &[SampleSuburb] = &[
    SampleSuburb {
        name: "Double Bay",
        median_price: 4_200_000.0,
        price_growth: 8.2,
        days_on_market: 24.0,
        clearance_rate: 78.0,
        employment_rate: 96.5,
        phase: MarketCyclePhase::Growth,
        supply_demand: 1.5,
        risks: [20.0, 25.0, 15.0, 20.0],
        projects: &[("Edgecliff interchange upgrade", 75.0), ("Harbour foreshore works", 70.0)],
    },
    SampleSuburb {
        name: "Manly",
        median_price: 2_850_000.0,
        price_growth: 7.8,
        days_on_market: 28.0,
        clearance_rate: 76.0,
        employment_rate: 95.8,
        phase: MarketCyclePhase::Growth,
        supply_demand: 1.4,
        risks: [22.0, 28.0, 30.0, 20.0],
        projects: &[("Northern Beaches link", 80.0)],
    },
    SampleSuburb {
        name: "Marrickville",
        median_price: 1_750_000.0,
        price_growth: 5.1,
        days_on_market: 41.0,
        clearance_rate: 66.0,
        employment_rate: 94.2,
        phase: MarketCyclePhase::Peak,
        supply_demand: 1.0,
        risks: [38.0, 42.0, 30.0, 32.0],
        projects: &[("Metro Southwest conversion", 55.0)],
    },
    SampleSuburb {
        name: "Blacktown",
        median_price: 980_000.0,
        price_growth: 1.5,
        days_on_market: 75.0,
        clearance_rate: 48.0,
        employment_rate: 91.0,
        phase: MarketCyclePhase::Decline,
        supply_demand: 0.7,
        risks: [60.0, 65.0, 45.0, 55.0],
        projects: &[],
    },
];

/// Signals used to seed the in-memory store for local runs and the demo.
pub(crate) fn sample_suburb_signals() -> Vec<SuburbSignals> {
    SAMPLE_SUBURBS
        .iter()
        .map(|sample| SuburbSignals {
            suburb: sample.name.to_string(),
            market: MarketMetrics {
                median_price: sample.median_price,
                price_growth: sample.price_growth,
                rental_yield: 3.0,
                days_on_market: sample.days_on_market,
                clearance_rate: sample.clearance_rate,
            },
            demographics: Demographics {
                population: 20_000,
                median_age: 38.0,
                employment_rate: sample.employment_rate,
            },
            ml: MlMetrics {
                market_cycle: MarketCycle {
                    phase: sample.phase,
                },
                supply_demand: SupplyDemand {
                    ratio: sample.supply_demand,
                },
                risk_assessment: RiskAssessment {
                    market_risk: sample.risks[0],
                    development_risk: sample.risks[1],
                    environmental_risk: sample.risks[2],
                    regulatory_risk: sample.risks[3],
                },
                infrastructure_analysis: InfrastructureAnalysis {
                    planned_improvements: sample
                        .projects
                        .iter()
                        .map(|(name, score)| (name.to_string(), *score))
                        .collect(),
                },
                ml_confidence: MlConfidence {
                    data_quality: 88.0,
                    prediction_accuracy: 84.0,
                    model_reliability: 86.0,
                },
            },
        })
        .collect()
}
