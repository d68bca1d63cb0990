use tracing::{debug, info};

use super::decision::LoanDecision;
use super::domain::{ApplicationInputError, LoanApplication};
use super::gate::evaluate_guardrails;
use super::lookup::{ListedSuburbLookup, SuburbZoneLookup};
use super::parameters::FundParameters;
use super::policy::target_return_shortfall;
use super::projection::project_returns;

/// Stateless evaluator applying a fund parameter snapshot to an application.
pub struct UnderwritingEngine {
    lookup: Box<dyn SuburbZoneLookup>,
}

impl UnderwritingEngine {
    pub fn new(lookup: Box<dyn SuburbZoneLookup>) -> Self {
        Self { lookup }
    }

    pub fn analyze(
        &self,
        application: &LoanApplication,
        parameters: &FundParameters,
    ) -> Result<LoanDecision, ApplicationInputError> {
        application.validate()?;

        let clearance = match evaluate_guardrails(application, parameters, self.lookup.as_ref()) {
            Ok(clearance) => clearance,
            Err(rejection) => {
                info!(
                    address = %application.property_address,
                    reason = %rejection.reason.summary(),
                    "loan application declined by guardrail"
                );
                return Ok(LoanDecision::rejected(application, parameters, rejection));
            }
        };

        let returns = project_returns(application, parameters.interest_rate);
        debug!(
            irr = returns.irr,
            total_return = returns.total_return,
            years = returns.yearly_breakdown.len(),
            "projected loan returns"
        );

        if let Some(reason) = target_return_shortfall(&returns, parameters) {
            info!(
                address = %application.property_address,
                irr = returns.irr,
                target_irr = parameters.target_irr,
                "loan application below target return"
            );
            return Ok(LoanDecision::below_target(
                application,
                parameters,
                clearance,
                returns,
                reason,
            ));
        }

        info!(
            address = %application.property_address,
            ltv = clearance.ltv,
            zone = clearance.traffic_light.label(),
            "loan application approved"
        );
        Ok(LoanDecision::approved(
            application,
            parameters,
            clearance,
            returns,
        ))
    }
}

impl Default for UnderwritingEngine {
    fn default() -> Self {
        Self::new(Box::new(ListedSuburbLookup::default()))
    }
}

/// Analyze one application against a parameter snapshot using the curated suburb lists.
pub fn analyze_loan_application(
    application: &LoanApplication,
    parameters: &FundParameters,
) -> Result<LoanDecision, ApplicationInputError> {
    UnderwritingEngine::default().analyze(application, parameters)
}
