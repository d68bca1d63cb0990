use std::sync::{PoisonError, RwLock};

use serde::{Deserialize, Serialize};

use crate::zoning::Zone;

/// Percentage of fund capital allotted to each zone.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoneAllocation {
    pub green: f64,
    #[serde(alias = "orange")]
    pub amber: f64,
    pub red: f64,
}

impl ZoneAllocation {
    pub fn for_zone(&self, zone: Zone) -> f64 {
        match zone {
            Zone::Green => self.green,
            Zone::Amber => self.amber,
            Zone::Red => self.red,
        }
    }
}

impl Default for ZoneAllocation {
    fn default() -> Self {
        Self {
            green: 90.0,
            amber: 10.0,
            red: 0.0,
        }
    }
}

/// Guardrails governing loan approval. Percent-valued fields use 0-100 units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FundParameters {
    pub interest_rate: f64,
    pub max_loan_size: f64,
    pub max_ltv: f64,
    pub max_combined_ltv: f64,
    pub target_irr: f64,
    pub min_property_value: f64,
    pub max_property_value: f64,
    pub max_suburb_exposure: f64,
    pub weekly_approval_target: u32,
    pub remaining_allocation: f64,
    pub zone_allocation: ZoneAllocation,
}

impl Default for FundParameters {
    fn default() -> Self {
        Self {
            interest_rate: 5.0,
            max_loan_size: 1_000_000.0,
            max_ltv: 75.0,
            max_combined_ltv: 85.0,
            target_irr: 10.0,
            min_property_value: 1_000_000.0,
            max_property_value: 5_000_000.0,
            max_suburb_exposure: 25.0,
            weekly_approval_target: 3,
            remaining_allocation: 10_000_000.0,
            zone_allocation: ZoneAllocation::default(),
        }
    }
}

impl FundParameters {
    pub fn validate(&self) -> Result<(), ParameterError> {
        let fields = [
            ("interest_rate", self.interest_rate),
            ("max_loan_size", self.max_loan_size),
            ("max_ltv", self.max_ltv),
            ("max_combined_ltv", self.max_combined_ltv),
            ("target_irr", self.target_irr),
            ("min_property_value", self.min_property_value),
            ("max_property_value", self.max_property_value),
            ("max_suburb_exposure", self.max_suburb_exposure),
            ("remaining_allocation", self.remaining_allocation),
            ("zone_allocation.green", self.zone_allocation.green),
            ("zone_allocation.amber", self.zone_allocation.amber),
            ("zone_allocation.red", self.zone_allocation.red),
        ];

        for (field, value) in fields {
            if !value.is_finite() {
                return Err(ParameterError::NonFinite { field });
            }
            if value < 0.0 {
                return Err(ParameterError::Negative { field, value });
            }
        }

        if self.min_property_value > self.max_property_value {
            return Err(ParameterError::InvertedPropertyBounds {
                min: self.min_property_value,
                max: self.max_property_value,
            });
        }

        Ok(())
    }
}

/// Validation errors for fund parameter updates.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParameterError {
    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },
    #[error("{field} cannot be negative (found {value})")]
    Negative { field: &'static str, value: f64 },
    #[error("min_property_value {min} exceeds max_property_value {max}")]
    InvertedPropertyBounds { min: f64, max: f64 },
}

/// Shared, externally mutable parameters. Evaluations read a [`snapshot`](Self::snapshot)
/// once and never observe later updates mid-computation.
#[derive(Debug, Default)]
pub struct FundParameterStore {
    current: RwLock<FundParameters>,
}

impl FundParameterStore {
    pub fn new(parameters: FundParameters) -> Self {
        Self {
            current: RwLock::new(parameters),
        }
    }

    pub fn snapshot(&self) -> FundParameters {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn replace(&self, parameters: FundParameters) -> Result<(), ParameterError> {
        parameters.validate()?;
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *guard = parameters;
        Ok(())
    }
}
