use super::domain::{MlConfidence, Zone, ZoneFactors};

const GREEN_THRESHOLD: f64 = 0.7;
const AMBER_THRESHOLD: f64 = 0.4;

/// Weighted composite of the four factors.
pub fn zone_score(factors: &ZoneFactors) -> f64 {
    0.3 * factors.market_strength
        + 0.3 * factors.growth_potential
        + 0.2 * factors.risk_level
        + 0.2 * factors.infrastructure_score
}

pub fn determine_zone(factors: &ZoneFactors) -> Zone {
    zone_for_score(zone_score(factors))
}

pub fn zone_for_score(score: f64) -> Zone {
    if score >= GREEN_THRESHOLD {
        Zone::Green
    } else if score >= AMBER_THRESHOLD {
        Zone::Amber
    } else {
        Zone::Red
    }
}

/// Confidence on a 0-100 scale from the model's self-reported quality metrics.
pub fn calculate_confidence(confidence: &MlConfidence) -> f64 {
    let weighted = 0.3 * (confidence.data_quality / 100.0)
        + 0.3 * (confidence.prediction_accuracy / 100.0)
        + 0.4 * (confidence.model_reliability / 100.0);
    weighted * 100.0
}
