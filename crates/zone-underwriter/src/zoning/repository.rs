use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{SuburbSignals, ZoneClassification};
use crate::repository::RepositoryError;

/// A classification as it was produced at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationRecord {
    pub classification: ZoneClassification,
    pub score: f64,
    pub classified_at: DateTime<Utc>,
}

/// Normalized lookup key so `Double Bay` and ` double bay ` address the same suburb.
pub fn suburb_key(suburb: &str) -> String {
    suburb.trim().to_ascii_lowercase()
}

/// Storage for suburb signals and the classification history derived from them.
///
/// Implementations must treat suburb names case-insensitively (see [`suburb_key`]).
pub trait ZoningRepository: Send + Sync {
    fn upsert_signals(&self, signals: SuburbSignals) -> Result<(), RepositoryError>;
    fn signals(&self, suburb: &str) -> Result<Option<SuburbSignals>, RepositoryError>;
    fn suburbs(&self) -> Result<Vec<String>, RepositoryError>;
    fn record_classification(&self, record: ClassificationRecord) -> Result<(), RepositoryError>;
    /// Most recent classification per suburb.
    fn latest_classifications(&self) -> Result<Vec<ClassificationRecord>, RepositoryError>;
    /// All classifications for a suburb, oldest first.
    fn history(&self, suburb: &str) -> Result<Vec<ClassificationRecord>, RepositoryError>;
}
