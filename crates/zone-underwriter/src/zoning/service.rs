use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use super::classifier::{determine_zone, zone_score};
use super::classify_signals;
use super::domain::{SuburbSignals, Zone};
use super::factors::calculate_factors;
use super::repository::{ClassificationRecord, ZoningRepository};
use super::views::{MarketAnalysisView, ZoneDistributionView, ZoneMetricsView, ZoneShareEntry};
use crate::repository::RepositoryError;

/// Service pairing the stateless classifier with signal storage and history.
pub struct ZoningService<R> {
    repository: Arc<R>,
}

impl<R> ZoningService<R>
where
    R: ZoningRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Store (or replace) the signals for one suburb.
    pub fn ingest(&self, signals: SuburbSignals) -> Result<(), ZoningServiceError> {
        validate_signals(&signals)?;
        debug!(suburb = %signals.suburb, "suburb signals updated");
        self.repository.upsert_signals(signals)?;
        Ok(())
    }

    /// Validates every record before storing any of them.
    pub fn ingest_batch(&self, batch: Vec<SuburbSignals>) -> Result<usize, ZoningServiceError> {
        for signals in &batch {
            validate_signals(signals)?;
        }
        let count = batch.len();
        for signals in batch {
            self.repository.upsert_signals(signals)?;
        }
        info!(count, "suburb signal batch ingested");
        Ok(count)
    }

    pub fn classify(&self, suburb: &str) -> Result<ClassificationRecord, ZoningServiceError> {
        let signals = self.stored_signals(suburb)?;
        self.classify_and_record(&signals)
    }

    /// Resolves every suburb before recording any history.
    pub fn classify_batch(
        &self,
        suburbs: &[String],
    ) -> Result<Vec<ClassificationRecord>, ZoningServiceError> {
        let batch = suburbs
            .iter()
            .map(|suburb| self.stored_signals(suburb))
            .collect::<Result<Vec<_>, _>>()?;

        batch
            .iter()
            .map(|signals| self.classify_and_record(signals))
            .collect()
    }

    /// Reclassify every known suburb. Callers own the schedule.
    pub fn refresh_all(&self) -> Result<Vec<ClassificationRecord>, ZoningServiceError> {
        let suburbs = self.repository.suburbs()?;
        let records = self.classify_batch(&suburbs)?;
        info!(suburbs = records.len(), "zone classifications refreshed");
        Ok(records)
    }

    pub fn history(&self, suburb: &str) -> Result<Vec<ClassificationRecord>, ZoningServiceError> {
        Ok(self.repository.history(suburb)?)
    }

    pub fn market_analysis(&self, suburb: &str) -> Result<MarketAnalysisView, ZoningServiceError> {
        let signals = self.stored_signals(suburb)?;
        let factors = calculate_factors(&signals.market, &signals.demographics, &signals.ml);

        Ok(MarketAnalysisView {
            suburb: signals.suburb.clone(),
            score: zone_score(&factors),
            zone: determine_zone(&factors),
            factors,
            signals,
        })
    }

    pub fn zone_metrics(&self, zone: Zone) -> Result<ZoneMetricsView, ZoningServiceError> {
        let members: Vec<ClassificationRecord> = self
            .repository
            .latest_classifications()?
            .into_iter()
            .filter(|record| record.classification.zone == zone)
            .collect();

        let count = members.len();
        let (confidence_total, score_total) = members.iter().fold((0.0, 0.0), |acc, record| {
            (acc.0 + record.classification.confidence, acc.1 + record.score)
        });
        let average = |total: f64| if count == 0 { 0.0 } else { total / count as f64 };

        let mut suburbs: Vec<String> = members
            .into_iter()
            .map(|record| record.classification.suburb)
            .collect();
        suburbs.sort();

        Ok(ZoneMetricsView {
            zone,
            zone_label: zone.label(),
            suburb_count: count,
            average_confidence: average(confidence_total),
            average_score: average(score_total),
            suburbs,
        })
    }

    pub fn distribution(&self) -> Result<ZoneDistributionView, ZoningServiceError> {
        let latest = self.repository.latest_classifications()?;
        let total = latest.len();

        let zones = Zone::ordered()
            .into_iter()
            .map(|zone| {
                let suburbs = latest
                    .iter()
                    .filter(|record| record.classification.zone == zone)
                    .count();
                let share_pct = if total == 0 {
                    0.0
                } else {
                    suburbs as f64 / total as f64 * 100.0
                };
                ZoneShareEntry {
                    zone,
                    zone_label: zone.label(),
                    suburbs,
                    share_pct,
                }
            })
            .collect();

        Ok(ZoneDistributionView {
            generated_at: Utc::now(),
            classified_suburbs: total,
            zones,
        })
    }

    fn stored_signals(&self, suburb: &str) -> Result<SuburbSignals, ZoningServiceError> {
        self.repository
            .signals(suburb)?
            .ok_or_else(|| ZoningServiceError::UnknownSuburb(suburb.trim().to_string()))
    }

    fn classify_and_record(
        &self,
        signals: &SuburbSignals,
    ) -> Result<ClassificationRecord, ZoningServiceError> {
        let classification = classify_signals(signals);
        let score = zone_score(&classification.factors);
        let record = ClassificationRecord {
            classification,
            score,
            classified_at: Utc::now(),
        };
        self.repository.record_classification(record.clone())?;
        Ok(record)
    }
}

fn validate_signals(signals: &SuburbSignals) -> Result<(), ZoningServiceError> {
    if signals.suburb.trim().is_empty() {
        return Err(ZoningServiceError::InvalidSignals(
            "suburb name is required".to_string(),
        ));
    }

    let market = &signals.market;
    if !market.price_growth.is_finite() {
        return Err(ZoningServiceError::InvalidSignals(
            "price_growth must be a finite number".to_string(),
        ));
    }

    let non_negative = [
        ("median_price", market.median_price),
        ("rental_yield", market.rental_yield),
        ("days_on_market", market.days_on_market),
        ("median_age", signals.demographics.median_age),
        ("supply_demand_ratio", signals.ml.supply_demand.ratio),
    ];
    if let Some((field, _)) = non_negative
        .iter()
        .find(|(_, value)| !value.is_finite() || *value < 0.0)
    {
        return Err(ZoningServiceError::InvalidSignals(format!(
            "{field} must be a finite, non-negative number"
        )));
    }

    let risk = &signals.ml.risk_assessment;
    let confidence = &signals.ml.ml_confidence;
    let percentages = [
        ("clearance_rate", market.clearance_rate),
        ("employment_rate", signals.demographics.employment_rate),
        ("market_risk", risk.market_risk),
        ("development_risk", risk.development_risk),
        ("environmental_risk", risk.environmental_risk),
        ("regulatory_risk", risk.regulatory_risk),
        ("data_quality", confidence.data_quality),
        ("prediction_accuracy", confidence.prediction_accuracy),
        ("model_reliability", confidence.model_reliability),
    ];
    if let Some((field, _)) = percentages.iter().find(|(_, value)| !is_percentage(*value)) {
        return Err(ZoningServiceError::InvalidSignals(format!(
            "{field} must be between 0 and 100"
        )));
    }

    if let Some((project, _)) = signals
        .ml
        .infrastructure_analysis
        .planned_improvements
        .iter()
        .find(|(_, score)| !is_percentage(**score))
    {
        return Err(ZoningServiceError::InvalidSignals(format!(
            "planned improvement '{project}' must score between 0 and 100"
        )));
    }

    Ok(())
}

fn is_percentage(value: f64) -> bool {
    (0.0..=100.0).contains(&value)
}

/// Error raised by the zoning service.
#[derive(Debug, thiserror::Error)]
pub enum ZoningServiceError {
    #[error("no signals recorded for suburb '{0}'")]
    UnknownSuburb(String),
    #[error("invalid suburb signals: {0}")]
    InvalidSignals(String),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
