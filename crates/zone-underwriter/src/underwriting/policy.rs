use serde::{Deserialize, Serialize};

use super::parameters::FundParameters;
use super::projection::ProjectedReturns;
use crate::zoning::Zone;

/// Guardrail that declined an application, with the figures that tripped it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum RejectionReason {
    BelowMinValue {
        property_value: f64,
        min_property_value: f64,
    },
    AboveMaxValue {
        property_value: f64,
        max_property_value: f64,
    },
    LoanTooLarge {
        loan_amount: f64,
        max_loan_size: f64,
    },
    #[serde(rename = "LTVExceeded")]
    LtvExceeded { ltv: f64, max_ltv: f64 },
    #[serde(rename = "CombinedLTVExceeded")]
    CombinedLtvExceeded {
        combined_ltv: f64,
        max_combined_ltv: f64,
    },
    ZoneAllocationZero { zone: Zone },
    #[serde(rename = "IRRBelowTarget")]
    IrrBelowTarget { irr: f64, target_irr: f64 },
}

impl RejectionReason {
    pub fn summary(&self) -> String {
        match self {
            RejectionReason::BelowMinValue {
                property_value,
                min_property_value,
            } => format!(
                "Property value of {} is below the minimum threshold of {}.",
                format_currency(*property_value),
                format_currency(*min_property_value)
            ),
            RejectionReason::AboveMaxValue {
                property_value,
                max_property_value,
            } => format!(
                "Property value of {} exceeds the maximum threshold of {}.",
                format_currency(*property_value),
                format_currency(*max_property_value)
            ),
            RejectionReason::LoanTooLarge {
                loan_amount,
                max_loan_size,
            } => format!(
                "Requested loan amount of {} exceeds the maximum loan size of {}.",
                format_currency(*loan_amount),
                format_currency(*max_loan_size)
            ),
            RejectionReason::LtvExceeded { ltv, max_ltv } => format!(
                "LTV ratio of {:.1}% exceeds maximum threshold of {}%.",
                ltv,
                format_threshold(*max_ltv)
            ),
            RejectionReason::CombinedLtvExceeded {
                combined_ltv,
                max_combined_ltv,
            } => format!(
                "Combined LTV ratio of {:.1}% exceeds maximum threshold of {}%.",
                combined_ltv,
                format_threshold(*max_combined_ltv)
            ),
            RejectionReason::ZoneAllocationZero { zone } => format!(
                "This property is in a {zone} zone which currently has 0% allocation in fund parameters."
            ),
            RejectionReason::IrrBelowTarget { irr, target_irr } => format!(
                "Projected IRR of {:.1}% does not meet target IRR of {}%.",
                irr,
                format_threshold(*target_irr)
            ),
        }
    }

    /// Whether the rejection still carries a computed return projection.
    pub fn carries_projection(&self) -> bool {
        matches!(self, RejectionReason::IrrBelowTarget { .. })
    }
}

pub(crate) fn approval_summary(ltv: f64, combined_ltv: f64) -> String {
    format!(
        "Analysis complete. LTV ratio of {:.1}% and combined LTV of {:.1}% are within acceptable ranges.",
        ltv, combined_ltv
    )
}

/// Final gate: the projected annualized return must reach the fund target.
pub(crate) fn target_return_shortfall(
    returns: &ProjectedReturns,
    parameters: &FundParameters,
) -> Option<RejectionReason> {
    if returns.irr < parameters.target_irr {
        Some(RejectionReason::IrrBelowTarget {
            irr: returns.irr,
            target_irr: parameters.target_irr,
        })
    } else {
        None
    }
}

/// `$1,250,000` style rendering; cents are kept only when present.
pub fn format_currency(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let cents_total = (amount.abs() * 100.0).round() as u64;
    let whole = cents_total / 100;
    let cents = cents_total % 100;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    if cents == 0 {
        format!("{sign}${grouped}")
    } else {
        format!("{sign}${grouped}.{cents:02}")
    }
}

/// Thresholds print as configured: `75`, not `75.0`.
fn format_threshold(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}
