use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use super::domain::{ApplicationInputError, LoanApplication};
use super::engine::UnderwritingEngine;
use super::parameters::{FundParameterStore, FundParameters, ParameterError};
use super::repository::{DecisionId, DecisionRecord, DecisionRepository};
use crate::repository::RepositoryError;

/// Service composing the engine, the shared parameter store and decision storage.
pub struct UnderwritingService<R> {
    repository: Arc<R>,
    parameters: Arc<FundParameterStore>,
    engine: UnderwritingEngine,
}

static DECISION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_decision_id() -> DecisionId {
    let id = DECISION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    DecisionId(format!("dec-{id:06}"))
}

impl<R> UnderwritingService<R>
where
    R: DecisionRepository + 'static,
{
    pub fn new(repository: Arc<R>, parameters: Arc<FundParameterStore>) -> Self {
        Self::with_engine(repository, parameters, UnderwritingEngine::default())
    }

    pub fn with_engine(
        repository: Arc<R>,
        parameters: Arc<FundParameterStore>,
        engine: UnderwritingEngine,
    ) -> Self {
        Self {
            repository,
            parameters,
            engine,
        }
    }

    /// Analyze an application against the current parameters and persist the decision.
    pub fn submit(
        &self,
        application: LoanApplication,
    ) -> Result<DecisionRecord, UnderwritingServiceError> {
        let parameters = self.parameters.snapshot();
        let decision = self.engine.analyze(&application, &parameters)?;

        let record = DecisionRecord {
            decision_id: next_decision_id(),
            application,
            parameters,
            decision,
            decided_at: Utc::now(),
        };

        let stored = self.repository.insert(record)?;
        info!(
            decision_id = %stored.decision_id,
            approved = stored.decision.approved,
            "underwriting decision recorded"
        );
        Ok(stored)
    }

    pub fn get(
        &self,
        decision_id: &DecisionId,
    ) -> Result<DecisionRecord, UnderwritingServiceError> {
        let record = self
            .repository
            .fetch(decision_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    pub fn recent(&self, limit: usize) -> Result<Vec<DecisionRecord>, UnderwritingServiceError> {
        Ok(self.repository.recent(limit)?)
    }

    pub fn parameters(&self) -> FundParameters {
        self.parameters.snapshot()
    }

    /// Replace the fund parameters. Decisions already in flight keep their snapshot.
    pub fn update_parameters(
        &self,
        parameters: FundParameters,
    ) -> Result<FundParameters, UnderwritingServiceError> {
        self.parameters.replace(parameters)?;
        let current = self.parameters.snapshot();
        info!(
            max_ltv = current.max_ltv,
            target_irr = current.target_irr,
            "fund parameters updated"
        );
        Ok(current)
    }
}

/// Error raised by the underwriting service.
#[derive(Debug, thiserror::Error)]
pub enum UnderwritingServiceError {
    #[error(transparent)]
    Input(#[from] ApplicationInputError),
    #[error(transparent)]
    Parameters(#[from] ParameterError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
