//! Loan underwriting against fund guardrails.
//!
//! [`UnderwritingEngine`] is synchronous and stateless: it validates the application,
//! walks the guardrails in a fixed order, projects returns and assembles a
//! [`LoanDecision`]. [`UnderwritingService`] adds the shared parameter store and
//! decision storage.

pub mod decision;
pub mod domain;
pub mod engine;
pub mod gate;
pub mod lookup;
pub mod parameters;
pub mod policy;
pub mod projection;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use decision::LoanDecision;
pub use domain::{ApplicationInputError, LoanApplication, RiskLevel, MAX_LOAN_TERM_YEARS};
pub use engine::{analyze_loan_application, UnderwritingEngine};
pub use gate::{evaluate_guardrails, GateClearance, GateRejection};
pub use lookup::{
    extract_suburb, ListedSuburbLookup, SuburbLocation, SuburbZoneLists, SuburbZoneLookup,
};
pub use parameters::{FundParameterStore, FundParameters, ParameterError, ZoneAllocation};
pub use policy::{format_currency, RejectionReason};
pub use projection::{
    optimal_exit, project_returns, write_breakdown_csv, OptimalExit, ProjectedReturns,
    YearlyProjection,
};
pub use repository::{DecisionId, DecisionRecord, DecisionRepository, DecisionSummaryView};
pub use router::underwriting_router;
pub use service::{UnderwritingService, UnderwritingServiceError};
