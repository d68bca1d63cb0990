use super::common::*;
use approx::assert_relative_eq;

use crate::underwriting::{
    optimal_exit, project_returns, write_breakdown_csv, ProjectedReturns, YearlyProjection,
};

fn row(year: u32, irr: f64) -> YearlyProjection {
    YearlyProjection {
        year,
        property_value: 0.0,
        accrued_interest: 0.0,
        appreciation_share: 0.0,
        total_return: irr * 1_000.0,
        irr,
    }
}

#[test]
fn breakdown_covers_each_year_of_the_term() {
    for application in [double_bay(), manly(), kirribilli()] {
        let returns = project_returns(&application, 5.0);
        let years: Vec<u32> = returns
            .yearly_breakdown
            .iter()
            .map(|row| row.year)
            .collect();
        let expected: Vec<u32> = (1..=application.loan_term).collect();
        assert_eq!(years, expected);
    }
}

#[test]
fn double_bay_projection_matches_compound_formulas() {
    let returns = project_returns(&double_bay(), 5.0);

    assert_relative_eq!(returns.total_interest, 377_336.776, epsilon = 1e-2);
    assert_relative_eq!(returns.total_appreciation_share, 719_543.945, epsilon = 1e-2);
    assert_relative_eq!(returns.total_return, 1_096_880.721, epsilon = 1e-2);
    assert_relative_eq!(returns.irr, 18.281_345, epsilon = 1e-5);

    let first = returns.yearly_breakdown[0];
    assert_relative_eq!(first.property_value, 4_544_400.0, epsilon = 1e-6);
    assert_relative_eq!(first.accrued_interest, 30_000.0, epsilon = 1e-6);
}

#[test]
fn totals_are_the_final_year_position() {
    let returns = project_returns(&manly(), 5.0);
    let last = returns
        .yearly_breakdown
        .last()
        .copied()
        .expect("seven years projected");

    assert_relative_eq!(returns.total_interest, last.accrued_interest);
    assert_relative_eq!(returns.total_appreciation_share, last.appreciation_share);
    assert_relative_eq!(returns.total_return, last.total_return);
    assert_relative_eq!(returns.irr, last.irr, epsilon = 1e-12);
}

#[test]
fn flat_market_earns_interest_only() {
    let mut application = double_bay();
    application.forecasted_growth = 0.0;
    let returns = project_returns(&application, 5.0);

    assert_relative_eq!(returns.total_appreciation_share, 0.0);
    assert_relative_eq!(returns.irr, 6.288_946, epsilon = 1e-5);
}

#[test]
fn optimal_exit_prefers_earliest_best_year() {
    let breakdown = [row(1, 5.0), row(2, 8.0), row(3, 8.0), row(4, 7.0)];
    let exit = optimal_exit(&breakdown, 1_000.0).expect("non-empty breakdown");

    assert_eq!(exit.year, 2);
    assert_relative_eq!(exit.total_return, 8_000.0);
    assert_relative_eq!(exit.roi, 800.0);
    assert!(optimal_exit(&[], 1_000.0).is_none());
}

#[test]
fn growing_markets_exit_at_term_end() {
    let returns = project_returns(&kirribilli(), 5.0);
    let exit = returns.optimal_exit.expect("exit computed");
    assert_eq!(exit.year, 5);
    assert_relative_eq!(
        exit.roi,
        returns.total_return / 350_000.0 * 100.0,
        epsilon = 1e-9
    );
}

#[test]
fn empty_projection_is_all_zero() {
    let empty = ProjectedReturns::empty();
    assert!(empty.yearly_breakdown.is_empty());
    assert_eq!(empty.total_return, 0.0);
    assert!(empty.optimal_exit.is_none());
}

#[test]
fn breakdown_exports_as_csv_with_header() {
    let returns = project_returns(&kirribilli(), 5.0);
    let mut buffer = Vec::new();
    write_breakdown_csv(&mut buffer, &returns.yearly_breakdown).expect("csv written");

    let text = String::from_utf8(buffer).expect("utf8 csv");
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines[0],
        "year,property_value,accrued_interest,appreciation_share,total_return,irr"
    );
    assert_eq!(lines.len(), 6);
    assert!(lines[5].starts_with("5,"));
}
