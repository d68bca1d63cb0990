use serde::{Deserialize, Serialize};

/// Longest term accepted for projection, in years.
pub const MAX_LOAN_TERM_YEARS: u32 = 30;

/// Loan request for a single property, as submitted by a borrower.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanApplication {
    /// Free-form address; the suburb is expected between the first and second commas.
    pub property_address: String,
    pub current_value: f64,
    pub mortgage_balance: f64,
    pub loan_amount: f64,
    /// Whole years.
    pub loan_term: u32,
    /// Annual growth forecast in percent.
    pub forecasted_growth: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub const fn label(self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }

    /// Qualitative risk from headroom under the LTV cap.
    pub fn from_ltv(ltv: f64, max_ltv: f64) -> Self {
        if ltv <= max_ltv - 10.0 {
            RiskLevel::Low
        } else if ltv <= max_ltv - 5.0 {
            RiskLevel::Medium
        } else {
            RiskLevel::High
        }
    }
}

/// Validation errors raised before any guardrail is evaluated.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApplicationInputError {
    #[error("current property value must be greater than zero (found {0})")]
    NonPositivePropertyValue(f64),
    #[error("loan amount must be greater than zero (found {0})")]
    NonPositiveLoanAmount(f64),
    #[error("mortgage balance cannot be negative (found {0})")]
    NegativeMortgageBalance(f64),
    #[error("loan term must be at least one year")]
    ZeroLoanTerm,
    #[error("loan term of {0} years exceeds the {max} year limit", max = MAX_LOAN_TERM_YEARS)]
    LoanTermTooLong(u32),
    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },
}

impl LoanApplication {
    pub fn validate(&self) -> Result<(), ApplicationInputError> {
        let numeric = [
            ("current_value", self.current_value),
            ("mortgage_balance", self.mortgage_balance),
            ("loan_amount", self.loan_amount),
            ("forecasted_growth", self.forecasted_growth),
        ];
        if let Some((field, _)) = numeric.iter().find(|(_, value)| !value.is_finite()) {
            return Err(ApplicationInputError::NonFinite { field });
        }

        if self.current_value <= 0.0 {
            return Err(ApplicationInputError::NonPositivePropertyValue(
                self.current_value,
            ));
        }
        if self.loan_amount <= 0.0 {
            return Err(ApplicationInputError::NonPositiveLoanAmount(self.loan_amount));
        }
        if self.mortgage_balance < 0.0 {
            return Err(ApplicationInputError::NegativeMortgageBalance(
                self.mortgage_balance,
            ));
        }
        if self.loan_term == 0 {
            return Err(ApplicationInputError::ZeroLoanTerm);
        }
        if self.loan_term > MAX_LOAN_TERM_YEARS {
            return Err(ApplicationInputError::LoanTermTooLong(self.loan_term));
        }

        Ok(())
    }

    /// New loan as a percentage of the property value.
    pub fn ltv(&self) -> f64 {
        self.loan_amount / self.current_value * 100.0
    }

    /// Existing mortgage plus new loan as a percentage of the property value.
    pub fn combined_ltv(&self) -> f64 {
        (self.mortgage_balance + self.loan_amount) / self.current_value * 100.0
    }
}
