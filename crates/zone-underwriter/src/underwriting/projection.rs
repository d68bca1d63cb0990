use std::io::Write;

use serde::{Deserialize, Serialize};

use super::domain::LoanApplication;

/// Position of the loan at the end of one year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearlyProjection {
    /// 1-based.
    pub year: u32,
    pub property_value: f64,
    pub accrued_interest: f64,
    pub appreciation_share: f64,
    pub total_return: f64,
    /// Simple annualized return in percent, not a solved internal rate of return.
    pub irr: f64,
}

/// Exit year with the best annualized return.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptimalExit {
    pub year: u32,
    pub total_return: f64,
    /// Cumulative return on the loan principal, in percent.
    pub roi: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectedReturns {
    pub yearly_breakdown: Vec<YearlyProjection>,
    pub total_interest: f64,
    pub total_appreciation_share: f64,
    pub total_return: f64,
    pub irr: f64,
    pub optimal_exit: Option<OptimalExit>,
}

impl ProjectedReturns {
    pub fn empty() -> Self {
        Self {
            yearly_breakdown: Vec::new(),
            total_interest: 0.0,
            total_appreciation_share: 0.0,
            total_return: 0.0,
            irr: 0.0,
            optimal_exit: None,
        }
    }
}

/// Project returns year by year over the loan term.
///
/// Interest compounds on the original principal (no amortization) and the fund
/// shares in appreciation pro rata to its initial LTV. Totals are the final
/// year's position, not a sum across years.
pub fn project_returns(application: &LoanApplication, interest_rate: f64) -> ProjectedReturns {
    let yearly_breakdown: Vec<YearlyProjection> = (1..=application.loan_term)
        .map(|year| project_year(application, interest_rate, year))
        .collect();

    let Some(last) = yearly_breakdown.last().copied() else {
        return ProjectedReturns::empty();
    };

    let total_interest = last.accrued_interest;
    let total_appreciation_share = last.appreciation_share;
    let total_return = total_interest + total_appreciation_share;
    let irr = total_return / application.loan_amount * 100.0 / f64::from(application.loan_term);
    let optimal_exit = optimal_exit(&yearly_breakdown, application.loan_amount);

    ProjectedReturns {
        yearly_breakdown,
        total_interest,
        total_appreciation_share,
        total_return,
        irr,
        optimal_exit,
    }
}

fn project_year(application: &LoanApplication, interest_rate: f64, year: u32) -> YearlyProjection {
    let periods = i32::try_from(year).unwrap_or(i32::MAX);
    let property_value =
        application.current_value * (1.0 + application.forecasted_growth / 100.0).powi(periods);
    let property_growth = property_value - application.current_value;

    let accrued_interest =
        application.loan_amount * ((1.0 + interest_rate / 100.0).powi(periods) - 1.0);
    let appreciation_share =
        property_growth * (application.loan_amount / application.current_value);

    let total_return = accrued_interest + appreciation_share;
    let irr = (total_return / application.loan_amount) * 100.0 / f64::from(year);

    YearlyProjection {
        year,
        property_value,
        accrued_interest,
        appreciation_share,
        total_return,
        irr,
    }
}

/// Earliest year achieving the highest annualized return.
pub fn optimal_exit(breakdown: &[YearlyProjection], loan_amount: f64) -> Option<OptimalExit> {
    let best = breakdown.iter().fold(None::<&YearlyProjection>, |best, row| match best {
        Some(current) if row.irr <= current.irr => Some(current),
        _ => Some(row),
    })?;

    Some(OptimalExit {
        year: best.year,
        total_return: best.total_return,
        roi: best.total_return / loan_amount * 100.0,
    })
}

/// Write the breakdown as CSV with a header row.
pub fn write_breakdown_csv<W: Write>(
    writer: W,
    breakdown: &[YearlyProjection],
) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in breakdown {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}
