use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::repository::RepositoryError;
use crate::underwriting::{
    underwriting_router, DecisionId, DecisionRecord, DecisionRepository, FundParameterStore,
    FundParameters, LoanApplication, UnderwritingService,
};

pub(super) fn double_bay() -> LoanApplication {
    LoanApplication {
        property_address: "28 William Street, Double Bay".to_string(),
        current_value: 4_200_000.0,
        mortgage_balance: 850_000.0,
        loan_amount: 600_000.0,
        loan_term: 10,
        forecasted_growth: 8.2,
    }
}

pub(super) fn manly() -> LoanApplication {
    LoanApplication {
        property_address: "15 Bower Street, Manly".to_string(),
        current_value: 2_850_000.0,
        mortgage_balance: 1_200_000.0,
        loan_amount: 450_000.0,
        loan_term: 7,
        forecasted_growth: 7.8,
    }
}

pub(super) fn kirribilli() -> LoanApplication {
    LoanApplication {
        property_address: "42 Upper Pitt Street, Kirribilli".to_string(),
        current_value: 1_950_000.0,
        mortgage_balance: 750_000.0,
        loan_amount: 350_000.0,
        loan_term: 5,
        forecasted_growth: 6.8,
    }
}

/// Unlisted suburb, so it resolves to the red zone.
pub(super) fn blacktown() -> LoanApplication {
    LoanApplication {
        property_address: "7 Main Street, Blacktown".to_string(),
        current_value: 1_500_000.0,
        mortgage_balance: 400_000.0,
        loan_amount: 300_000.0,
        loan_term: 6,
        forecasted_growth: 7.0,
    }
}

pub(super) fn parameters() -> FundParameters {
    FundParameters::default()
}

#[derive(Default, Clone)]
pub(super) struct MemoryDecisionRepository {
    records: Arc<Mutex<Vec<DecisionRecord>>>,
}

impl DecisionRepository for MemoryDecisionRepository {
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

pub(super) struct ConflictRepository;

impl DecisionRepository for ConflictRepository {
    fn insert(&self, _record: DecisionRecord) -> Result<DecisionRecord, RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn fetch(&self, _id: &DecisionId) -> Result<Option<DecisionRecord>, RepositoryError> {
        Ok(None)
    }

    fn recent(&self, _limit: usize) -> Result<Vec<DecisionRecord>, RepositoryError> {
        Ok(Vec::new())
    }
}

pub(super) struct UnavailableRepository;

impl DecisionRepository for UnavailableRepository {
    fn insert(&self, _record: DecisionRecord) -> Result<DecisionRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("decision store offline".to_string()))
    }

    fn fetch(&self, _id: &DecisionId) -> Result<Option<DecisionRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("decision store offline".to_string()))
    }

    fn recent(&self, _limit: usize) -> Result<Vec<DecisionRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("decision store offline".to_string()))
    }
}

pub(super) fn build_service() -> (
    UnderwritingService<MemoryDecisionRepository>,
    MemoryDecisionRepository,
    Arc<FundParameterStore>,
) {
    let repository = MemoryDecisionRepository::default();
    let store = Arc::new(FundParameterStore::new(parameters()));
    let service = UnderwritingService::new(Arc::new(repository.clone()), store.clone());
    (service, repository, store)
}

pub(super) fn router_with_service(
    service: UnderwritingService<MemoryDecisionRepository>,
) -> axum::Router {
    underwriting_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
