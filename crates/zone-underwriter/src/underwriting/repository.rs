use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::decision::LoanDecision;
use super::domain::LoanApplication;
use super::parameters::FundParameters;
use crate::repository::RepositoryError;
use crate::zoning::Zone;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DecisionId(pub String);

impl std::fmt::Display for DecisionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Stored decision together with the inputs and parameter snapshot that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionRecord {
    pub decision_id: DecisionId,
    pub application: LoanApplication,
    pub parameters: FundParameters,
    pub decision: LoanDecision,
    pub decided_at: DateTime<Utc>,
}

impl DecisionRecord {
    pub fn summary_view(&self) -> DecisionSummaryView {
        DecisionSummaryView {
            decision_id: self.decision_id.clone(),
            property_address: self.application.property_address.clone(),
            approved: self.decision.approved,
            traffic_light: self.decision.traffic_light,
            explanation: self.decision.explanation.clone(),
            decided_at: self.decided_at,
        }
    }
}

/// Storage abstraction for underwriting decisions.
pub trait DecisionRepository: Send + Sync {
    fn insert(&self, record: DecisionRecord) -> Result<DecisionRecord, RepositoryError>;
    fn fetch(&self, id: &DecisionId) -> Result<Option<DecisionRecord>, RepositoryError>;
    /// Newest first, by arrival.
    fn recent(&self, limit: usize) -> Result<Vec<DecisionRecord>, RepositoryError>;
}

/// Condensed decision for listings.
#[derive(Debug, Clone, Serialize)]
pub struct DecisionSummaryView {
    pub decision_id: DecisionId,
    pub property_address: String,
    pub approved: bool,
    pub traffic_light: Zone,
    pub explanation: String,
    pub decided_at: DateTime<Utc>,
}
