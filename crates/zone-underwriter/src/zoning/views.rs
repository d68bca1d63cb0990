use chrono::{DateTime, Utc};
use serde::Serialize;

use super::domain::{SuburbSignals, Zone, ZoneFactors};

#[derive(Debug, Clone, Serialize)]
pub struct MarketAnalysisView {
    pub suburb: String,
    pub signals: SuburbSignals,
    pub factors: ZoneFactors,
    pub score: f64,
    pub zone: Zone,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneMetricsView {
    pub zone: Zone,
    pub zone_label: &'static str,
    pub suburb_count: usize,
    pub average_confidence: f64,
    pub average_score: f64,
    pub suburbs: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneShareEntry {
    pub zone: Zone,
    pub zone_label: &'static str,
    pub suburbs: usize,
    pub share_pct: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ZoneDistributionView {
    pub generated_at: DateTime<Utc>,
    pub classified_suburbs: usize,
    pub zones: Vec<ZoneShareEntry>,
}
