//! Traffic-light classification of suburbs from market, demographic and model signals.
//!
//! The scoring functions are pure; [`ZoningService`] adds signal storage, history and the
//! explicit refresh trigger used by the HTTP layer.

pub mod classifier;
pub mod domain;
pub mod factors;
pub mod horizon;
pub mod repository;
pub mod router;
pub mod service;
pub mod views;

#[cfg(test)]
mod tests;

pub use classifier::{calculate_confidence, determine_zone, zone_for_score, zone_score};
pub use domain::{
    Demographics, InfrastructureAnalysis, MarketCycle, MarketCyclePhase, MarketMetrics,
    MlConfidence, MlMetrics, RiskAssessment, SuburbSignals, SupplyDemand, Zone,
    ZoneClassification, ZoneFactors, ZonePrediction, ZonePredictions,
};
pub use factors::calculate_factors;
pub use horizon::{adjust_factors, cycle_adjustment, project_predictions, TimeHorizon};
pub use repository::{suburb_key, ClassificationRecord, ZoningRepository};
pub use router::zoning_router;
pub use service::{ZoningService, ZoningServiceError};
pub use views::{MarketAnalysisView, ZoneDistributionView, ZoneMetricsView, ZoneShareEntry};

use tracing::debug;

/// Classify one suburb. Pure and deterministic for identical inputs.
pub fn classify_zone(
    suburb: &str,
    market: &MarketMetrics,
    demographics: &Demographics,
    ml: &MlMetrics,
) -> ZoneClassification {
    let factors = calculate_factors(market, demographics, ml);
    let zone = determine_zone(&factors);
    let confidence = calculate_confidence(&ml.ml_confidence);
    let predictions = project_predictions(&factors, ml, confidence);

    debug!(
        suburb,
        zone = zone.label(),
        score = zone_score(&factors),
        confidence,
        "suburb classified"
    );

    ZoneClassification {
        suburb: suburb.to_string(),
        zone,
        confidence,
        factors,
        predictions,
    }
}

pub fn classify_signals(signals: &SuburbSignals) -> ZoneClassification {
    classify_zone(
        &signals.suburb,
        &signals.market,
        &signals.demographics,
        &signals.ml,
    )
}
