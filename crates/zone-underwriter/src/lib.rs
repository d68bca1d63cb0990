pub mod config;
pub mod error;
pub mod repository;
pub mod telemetry;
pub mod underwriting;
pub mod zoning;

pub use underwriting::{analyze_loan_application, FundParameters, LoanApplication, LoanDecision};
pub use zoning::{classify_zone, ZoneClassification};
