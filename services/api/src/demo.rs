use crate::infra::{sample_suburb_signals, InMemoryZoningRepository};
use clap::{Args, ValueEnum};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use zone_underwriter::config::FundConfig;
use zone_underwriter::error::AppError;
use zone_underwriter::underwriting::{
    format_currency, write_breakdown_csv, FundParameters, LoanApplication, LoanDecision,
    UnderwritingEngine,
};
use zone_underwriter::zoning::{classify_signals, SuburbSignals, ZoneClassification, ZoningService};

/// Borrower scenarios used in stakeholder walkthroughs.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ScenarioPreset {
    DoubleBay,
    Manly,
    Kirribilli,
}

impl ScenarioPreset {
    pub(crate) const ALL: [ScenarioPreset; 3] = [
        ScenarioPreset::DoubleBay,
        ScenarioPreset::Manly,
        ScenarioPreset::Kirribilli,
    ];

    pub(crate) fn application(self) -> LoanApplication {
        let (address, value, mortgage, loan, term, growth) = match self {
            ScenarioPreset::DoubleBay => (
                "28 William Street, Double Bay",
                4_200_000.0,
                850_000.0,
                600_000.0,
                10,
                8.2,
            ),
            ScenarioPreset::Manly => (
                "15 Bower Street, Manly",
                2_850_000.0,
                1_200_000.0,
                450_000.0,
                7,
                7.8,
            ),
            ScenarioPreset::Kirribilli => (
                "42 Upper Pitt Street, Kirribilli",
                1_950_000.0,
                750_000.0,
                350_000.0,
                5,
                6.8,
            ),
        };

        LoanApplication {
            property_address: address.to_string(),
            current_value: value,
            mortgage_balance: mortgage,
            loan_amount: loan,
            loan_term: term,
            forecasted_growth: growth,
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct ClassifyArgs {
    /// JSON file holding one suburb signal record or an array of them
    #[arg(long)]
    pub(crate) signals: PathBuf,
}

#[derive(Args, Debug, Default)]
pub(crate) struct UnderwriteArgs {
    /// Preset borrower scenario (defaults to double-bay when no application file is given)
    #[arg(long, value_enum, conflicts_with = "application")]
    pub(crate) scenario: Option<ScenarioPreset>,
    /// JSON file holding a loan application
    #[arg(long)]
    pub(crate) application: Option<PathBuf>,
    /// JSON file overriding the fund parameters
    #[arg(long)]
    pub(crate) parameters: Option<PathBuf>,
    /// Write the yearly return breakdown to this CSV file
    #[arg(long)]
    pub(crate) breakdown_csv: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// JSON file overriding the fund parameters
    #[arg(long)]
    pub(crate) parameters: Option<PathBuf>,
    /// Skip the suburb classification portion of the demo
    #[arg(long)]
    pub(crate) skip_classification: bool,
}

pub(crate) fn run_classify(args: ClassifyArgs) -> Result<(), AppError> {
    let raw = fs::read_to_string(&args.signals)?;
    let batch = parse_signal_batch(&raw)?;

    for signals in &batch {
        render_classification(&classify_signals(signals));
    }
    Ok(())
}

pub(crate) fn run_underwrite(args: UnderwriteArgs) -> Result<(), AppError> {
    let UnderwriteArgs {
        scenario,
        application,
        parameters,
        breakdown_csv,
    } = args;

    let parameters = load_parameters(parameters)?;
    let application = match application {
        Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
        None => scenario.unwrap_or(ScenarioPreset::DoubleBay).application(),
    };

    let decision = UnderwritingEngine::default().analyze(&application, &parameters)?;
    render_decision(&application, &decision);

    if let Some(path) = breakdown_csv {
        export_breakdown(&path, &decision)?;
        println!("Yearly breakdown written to {}", path.display());
    }
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let parameters = load_parameters(args.parameters)?;
    let engine = UnderwritingEngine::default();

    println!("Zone underwriting demo");
    println!(
        "Fund guardrails: max LTV {}%, max combined LTV {}%, target IRR {}%",
        parameters.max_ltv, parameters.max_combined_ltv, parameters.target_irr
    );

    for preset in ScenarioPreset::ALL {
        let application = preset.application();
        let decision = engine.analyze(&application, &parameters)?;
        println!();
        render_decision(&application, &decision);
    }

    if !args.skip_classification {
        let service = ZoningService::new(Arc::new(InMemoryZoningRepository::default()));
        service.ingest_batch(sample_suburb_signals())?;
        println!("\nSuburb classifications");
        for record in service.refresh_all()? {
            render_classification(&record.classification);
        }

        let distribution = service.distribution()?;
        for entry in distribution.zones {
            println!(
                "  {:<6} {:>2} suburb(s) {:>5.1}%",
                entry.zone, entry.suburbs, entry.share_pct
            );
        }
    }

    Ok(())
}

fn load_parameters(path: Option<PathBuf>) -> Result<FundParameters, AppError> {
    let config = FundConfig {
        parameters_path: path,
    };
    Ok(config.load_parameters()?)
}

fn parse_signal_batch(raw: &str) -> Result<Vec<SuburbSignals>, AppError> {
    let value: serde_json::Value = serde_json::from_str(raw)?;
    let batch = if value.is_array() {
        serde_json::from_value(value)?
    } else {
        vec![serde_json::from_value(value)?]
    };
    Ok(batch)
}

fn export_breakdown(path: &Path, decision: &LoanDecision) -> Result<(), AppError> {
    let file = File::create(path)?;
    write_breakdown_csv(file, &decision.returns.yearly_breakdown)?;
    Ok(())
}

fn render_decision(application: &LoanApplication, decision: &LoanDecision) {
    let verdict = if decision.approved {
        "APPROVED"
    } else {
        "DECLINED"
    };
    println!("{} [{}]", application.property_address, verdict);
    println!(
        "  Loan {} over {} years at {}%",
        format_currency(decision.loan_amount),
        application.loan_term,
        decision.interest_rate
    );
    println!(
        "  LTV {:.2}% | Combined LTV {:.2}% | Risk {} | Zone {}",
        decision.ltv,
        decision.combined_ltv,
        decision.risk_level.label(),
        decision.traffic_light
    );
    println!("  {}", decision.explanation);

    let returns = &decision.returns;
    if returns.yearly_breakdown.is_empty() {
        return;
    }
    println!(
        "  Total return {} (interest {}, appreciation share {}) | IRR {:.2}%",
        format_currency(returns.total_return),
        format_currency(returns.total_interest),
        format_currency(returns.total_appreciation_share),
        returns.irr
    );
    if let Some(exit) = returns.optimal_exit {
        println!(
            "  Optimal exit: year {} returning {} ({:.1}% ROI)",
            exit.year,
            format_currency(exit.total_return),
            exit.roi
        );
    }
}

fn render_classification(classification: &ZoneClassification) {
    let predictions = &classification.predictions;
    println!(
        "  {:<14} {:<6} confidence {:>5.1}% | short {} / medium {} / long {}",
        classification.suburb,
        classification.zone,
        classification.confidence,
        predictions.short_term.zone,
        predictions.medium_term.zone,
        predictions.long_term.zone
    );
}
