use serde::{Deserialize, Serialize};

use super::domain::{LoanApplication, RiskLevel};
use super::gate::{GateClearance, GateRejection};
use super::parameters::FundParameters;
use super::policy::{approval_summary, RejectionReason};
use super::projection::ProjectedReturns;
use crate::zoning::Zone;

/// Underwriting outcome for one application. Declines are data, not errors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanDecision {
    pub approved: bool,
    pub loan_amount: f64,
    pub interest_rate: f64,
    pub ltv: f64,
    pub combined_ltv: f64,
    pub risk_level: RiskLevel,
    pub explanation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejection: Option<RejectionReason>,
    pub traffic_light: Zone,
    pub suburb: String,
    pub returns: ProjectedReturns,
}

impl LoanDecision {
    pub fn rejected(
        application: &LoanApplication,
        parameters: &FundParameters,
        rejection: GateRejection,
    ) -> Self {
        Self {
            approved: false,
            loan_amount: application.loan_amount,
            interest_rate: parameters.interest_rate,
            ltv: rejection.ltv,
            combined_ltv: rejection.combined_ltv,
            risk_level: rejection.risk_level,
            explanation: rejection.reason.summary(),
            rejection: Some(rejection.reason),
            traffic_light: rejection.traffic_light,
            suburb: rejection.suburb,
            returns: ProjectedReturns::empty(),
        }
    }

    /// Cleared every guardrail but the return target; the projection is kept.
    pub fn below_target(
        application: &LoanApplication,
        parameters: &FundParameters,
        clearance: GateClearance,
        returns: ProjectedReturns,
        reason: RejectionReason,
    ) -> Self {
        Self {
            approved: false,
            explanation: reason.summary(),
            rejection: Some(reason),
            ..Self::cleared(application, parameters, clearance, returns)
        }
    }

    pub fn approved(
        application: &LoanApplication,
        parameters: &FundParameters,
        clearance: GateClearance,
        returns: ProjectedReturns,
    ) -> Self {
        Self::cleared(application, parameters, clearance, returns)
    }

    fn cleared(
        application: &LoanApplication,
        parameters: &FundParameters,
        clearance: GateClearance,
        returns: ProjectedReturns,
    ) -> Self {
        Self {
            approved: true,
            loan_amount: application.loan_amount,
            interest_rate: parameters.interest_rate,
            ltv: clearance.ltv,
            combined_ltv: clearance.combined_ltv,
            risk_level: clearance.risk_level,
            explanation: approval_summary(clearance.ltv, clearance.combined_ltv),
            rejection: None,
            traffic_light: clearance.traffic_light,
            suburb: clearance.suburb,
            returns,
        }
    }
}
