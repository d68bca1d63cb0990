use serde::{Deserialize, Serialize};

use super::classifier::determine_zone;
use super::domain::{MarketCyclePhase, MlMetrics, ZoneFactors, ZonePrediction, ZonePredictions};

/// Uplift applied to the infrastructure score per planned project.
const INFRASTRUCTURE_UPLIFT_PER_PROJECT: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeHorizon {
    Short,
    Medium,
    Long,
}

impl TimeHorizon {
    pub const fn ordered() -> [TimeHorizon; 3] {
        [TimeHorizon::Short, TimeHorizon::Medium, TimeHorizon::Long]
    }

    /// Fraction of the base confidence retained at this horizon.
    pub const fn confidence_decay(self) -> f64 {
        match self {
            TimeHorizon::Short => 0.9,
            TimeHorizon::Medium => 0.8,
            TimeHorizon::Long => 0.7,
        }
    }
}

pub fn cycle_adjustment(phase: MarketCyclePhase, horizon: TimeHorizon) -> f64 {
    match (phase, horizon) {
        (MarketCyclePhase::Bottom, TimeHorizon::Short) => 1.2,
        (MarketCyclePhase::Bottom, TimeHorizon::Medium) => 1.3,
        (MarketCyclePhase::Bottom, TimeHorizon::Long) => 1.4,
        (MarketCyclePhase::Growth, TimeHorizon::Short) => 1.1,
        (MarketCyclePhase::Growth, TimeHorizon::Medium) => 1.0,
        (MarketCyclePhase::Growth, TimeHorizon::Long) => 0.9,
        (MarketCyclePhase::Peak, TimeHorizon::Short) => 0.9,
        (MarketCyclePhase::Peak, TimeHorizon::Medium) => 0.8,
        (MarketCyclePhase::Peak, TimeHorizon::Long) => 0.7,
        (MarketCyclePhase::Decline, TimeHorizon::Short) => 0.8,
        (MarketCyclePhase::Decline, TimeHorizon::Medium) => 0.9,
        (MarketCyclePhase::Decline, TimeHorizon::Long) => 1.0,
    }
}

/// Re-weight factors for a future horizon.
///
/// Safety moves opposite to growth (`2 - adj`). Results are not clamped, so
/// strong bottom-of-cycle suburbs can exceed 1.0.
pub fn adjust_factors(factors: &ZoneFactors, ml: &MlMetrics, horizon: TimeHorizon) -> ZoneFactors {
    let adjustment = cycle_adjustment(ml.market_cycle.phase, horizon);
    let projects = ml.infrastructure_analysis.project_count() as f64;

    ZoneFactors {
        market_strength: factors.market_strength * adjustment,
        growth_potential: factors.growth_potential * adjustment,
        risk_level: factors.risk_level * (2.0 - adjustment),
        infrastructure_score: factors.infrastructure_score
            * (1.0 + projects * INFRASTRUCTURE_UPLIFT_PER_PROJECT),
    }
}

pub fn predict(
    factors: &ZoneFactors,
    ml: &MlMetrics,
    horizon: TimeHorizon,
    base_confidence: f64,
) -> ZonePrediction {
    let adjusted = adjust_factors(factors, ml, horizon);
    ZonePrediction {
        zone: determine_zone(&adjusted),
        confidence: base_confidence * horizon.confidence_decay(),
    }
}

pub fn project_predictions(
    factors: &ZoneFactors,
    ml: &MlMetrics,
    base_confidence: f64,
) -> ZonePredictions {
    ZonePredictions {
        short_term: predict(factors, ml, TimeHorizon::Short, base_confidence),
        medium_term: predict(factors, ml, TimeHorizon::Medium, base_confidence),
        long_term: predict(factors, ml, TimeHorizon::Long, base_confidence),
    }
}
