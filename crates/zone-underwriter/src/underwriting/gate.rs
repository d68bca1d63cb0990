use tracing::debug;

use super::domain::{LoanApplication, RiskLevel};
use super::lookup::SuburbZoneLookup;
use super::parameters::FundParameters;
use super::policy::RejectionReason;
use crate::zoning::Zone;

/// Application declined by a guardrail, with the figures known at that point.
#[derive(Debug, Clone, PartialEq)]
pub struct GateRejection {
    pub reason: RejectionReason,
    pub ltv: f64,
    pub combined_ltv: f64,
    pub risk_level: RiskLevel,
    pub traffic_light: Zone,
    pub suburb: String,
}

impl GateRejection {
    /// Rejections raised before the address is resolved report a red zone and no suburb.
    fn unlocated(reason: RejectionReason, ltv: f64, combined_ltv: f64) -> Self {
        Self {
            reason,
            ltv,
            combined_ltv,
            risk_level: RiskLevel::High,
            traffic_light: Zone::Red,
            suburb: String::new(),
        }
    }
}

/// Application that passed every guardrail short of the return target.
#[derive(Debug, Clone, PartialEq)]
pub struct GateClearance {
    pub ltv: f64,
    pub combined_ltv: f64,
    pub risk_level: RiskLevel,
    pub traffic_light: Zone,
    pub suburb: String,
}

/// Apply the fund guardrails in order; the first failure wins.
pub fn evaluate_guardrails(
    application: &LoanApplication,
    parameters: &FundParameters,
    lookup: &dyn SuburbZoneLookup,
) -> Result<GateClearance, GateRejection> {
    if application.current_value < parameters.min_property_value {
        return Err(GateRejection::unlocated(
            RejectionReason::BelowMinValue {
                property_value: application.current_value,
                min_property_value: parameters.min_property_value,
            },
            0.0,
            0.0,
        ));
    }

    if application.current_value > parameters.max_property_value {
        return Err(GateRejection::unlocated(
            RejectionReason::AboveMaxValue {
                property_value: application.current_value,
                max_property_value: parameters.max_property_value,
            },
            0.0,
            0.0,
        ));
    }

    if application.loan_amount > parameters.max_loan_size {
        return Err(GateRejection::unlocated(
            RejectionReason::LoanTooLarge {
                loan_amount: application.loan_amount,
                max_loan_size: parameters.max_loan_size,
            },
            0.0,
            0.0,
        ));
    }

    let ltv = application.ltv();
    let combined_ltv = application.combined_ltv();

    if ltv > parameters.max_ltv {
        return Err(GateRejection::unlocated(
            RejectionReason::LtvExceeded {
                ltv,
                max_ltv: parameters.max_ltv,
            },
            ltv,
            combined_ltv,
        ));
    }

    if combined_ltv > parameters.max_combined_ltv {
        return Err(GateRejection::unlocated(
            RejectionReason::CombinedLtvExceeded {
                combined_ltv,
                max_combined_ltv: parameters.max_combined_ltv,
            },
            ltv,
            combined_ltv,
        ));
    }

    let location = lookup.locate(&application.property_address);
    let risk_level = RiskLevel::from_ltv(ltv, parameters.max_ltv);
    debug!(
        suburb = %location.suburb,
        zone = location.zone.label(),
        risk = risk_level.label(),
        "resolved property location"
    );

    if parameters.zone_allocation.for_zone(location.zone) <= 0.0 {
        return Err(GateRejection {
            reason: RejectionReason::ZoneAllocationZero {
                zone: location.zone,
            },
            ltv,
            combined_ltv,
            risk_level,
            traffic_light: location.zone,
            suburb: location.suburb,
        });
    }

    Ok(GateClearance {
        ltv,
        combined_ltv,
        risk_level,
        traffic_light: location.zone,
        suburb: location.suburb,
    })
}
