use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Traffic-light investment zone for a suburb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Zone {
    #[serde(alias = "Green")]
    Green,
    #[serde(alias = "Amber", alias = "orange", alias = "Orange")]
    Amber,
    #[serde(alias = "Red")]
    Red,
}

impl Zone {
    pub const fn label(self) -> &'static str {
        match self {
            Zone::Green => "green",
            Zone::Amber => "amber",
            Zone::Red => "red",
        }
    }

    pub const fn ordered() -> [Zone; 3] {
        [Zone::Green, Zone::Amber, Zone::Red]
    }

    /// Accepts the canonical labels plus the legacy `orange` spelling.
    pub fn parse(raw: &str) -> Option<Zone> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "green" => Some(Zone::Green),
            "amber" | "orange" => Some(Zone::Amber),
            "red" => Some(Zone::Red),
            _ => None,
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Zone::Green => "Green",
            Zone::Amber => "Amber",
            Zone::Red => "Red",
        };
        f.pad(label)
    }
}

/// Normalized market snapshot for a suburb.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketMetrics {
    pub median_price: f64,
    /// Annual price growth in percent.
    pub price_growth: f64,
    pub rental_yield: f64,
    pub days_on_market: f64,
    /// Auction clearance rate in percent.
    pub clearance_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Demographics {
    pub population: u64,
    pub median_age: f64,
    /// Employment rate in percent.
    pub employment_rate: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketCyclePhase {
    Growth,
    Peak,
    Decline,
    Bottom,
}

impl MarketCyclePhase {
    pub const fn label(self) -> &'static str {
        match self {
            MarketCyclePhase::Growth => "growth",
            MarketCyclePhase::Peak => "peak",
            MarketCyclePhase::Decline => "decline",
            MarketCyclePhase::Bottom => "bottom",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketCycle {
    pub phase: MarketCyclePhase,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SupplyDemand {
    pub ratio: f64,
}

/// Model-assessed risks on a 0-100 scale, higher is riskier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub market_risk: f64,
    pub development_risk: f64,
    pub environmental_risk: f64,
    pub regulatory_risk: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InfrastructureAnalysis {
    /// Project name mapped to a 0-100 impact score.
    #[serde(default)]
    pub planned_improvements: BTreeMap<String, f64>,
}

impl InfrastructureAnalysis {
    /// Mean planned improvement score scaled to [0, 1]; zero when nothing is planned.
    pub fn average_improvement(&self) -> f64 {
        if self.planned_improvements.is_empty() {
            return 0.0;
        }
        let total: f64 = self.planned_improvements.values().sum();
        total / self.planned_improvements.len() as f64 / 100.0
    }

    pub fn project_count(&self) -> usize {
        self.planned_improvements.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MlConfidence {
    pub data_quality: f64,
    pub prediction_accuracy: f64,
    pub model_reliability: f64,
}

/// Model-derived signals feeding the classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MlMetrics {
    pub market_cycle: MarketCycle,
    pub supply_demand: SupplyDemand,
    pub risk_assessment: RiskAssessment,
    #[serde(default)]
    pub infrastructure_analysis: InfrastructureAnalysis,
    pub ml_confidence: MlConfidence,
}

/// Intermediate scores, each nominally within [0, 1] before horizon adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoneFactors {
    pub market_strength: f64,
    pub growth_potential: f64,
    /// Safety score; higher means less risk.
    pub risk_level: f64,
    pub infrastructure_score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZonePrediction {
    pub zone: Zone,
    pub confidence: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZonePredictions {
    pub short_term: ZonePrediction,
    pub medium_term: ZonePrediction,
    pub long_term: ZonePrediction,
}

/// Result of classifying one suburb.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneClassification {
    pub suburb: String,
    pub zone: Zone,
    pub confidence: f64,
    pub factors: ZoneFactors,
    pub predictions: ZonePredictions,
}

/// Complete input bundle for one suburb, as stored by collaborators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuburbSignals {
    pub suburb: String,
    pub market: MarketMetrics,
    pub demographics: Demographics,
    pub ml: MlMetrics,
}
