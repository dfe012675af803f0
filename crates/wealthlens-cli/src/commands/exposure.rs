//! Exposure command implementation.
//!
//! Loads a holdings file, runs the analyzer and prints every exposure view.

use std::fmt::Display;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, ValueEnum};
use colored::Colorize;
use serde::Serialize;
use tabled::Tabled;

use wealthlens_core::types::NormalizedHolding;
use wealthlens_exposure::insights::{derive_insights, enrich_insights, EnhancedStabilityInsight};
use wealthlens_exposure::types::{DimensionalExposure, PercentageBase};
use wealthlens_exposure::{ExposureAnalyzer, ExposureReport, FactsheetBundle};

use crate::cli::OutputFormat;
use crate::commands::{load_config, load_json, validate_percent};
use crate::output::{
    format_amount, format_percent, print_header, print_info, print_json, print_output,
    print_warning, KeyValue,
};

/// Arguments for the exposure command.
#[derive(Args, Debug)]
pub struct ExposureArgs {
    /// Holdings file (JSON array of holdings)
    pub holdings: PathBuf,

    /// Factsheet bundle (JSON): composition, geography, sector and market-cap maps
    #[arg(long)]
    pub factsheets: Option<PathBuf>,

    /// Exposure config (TOML)
    #[arg(long, env = "WEALTHLENS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Concentration threshold in percent (overrides the config file)
    #[arg(short, long)]
    pub threshold: Option<f64>,

    /// Denominator for sector, market-cap and geography percentages
    #[arg(long, value_enum)]
    pub base: Option<BaseArg>,

    /// Show the per-fund look-through table
    #[arg(long)]
    pub funds: bool,

    /// Derive and rank stability insights
    #[arg(long)]
    pub insights: bool,
}

/// Percentage base options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BaseArg {
    /// Sum of the dimension's rows
    Dimension,
    /// Portfolio allocation total
    Portfolio,
}

impl From<BaseArg> for PercentageBase {
    fn from(arg: BaseArg) -> Self {
        match arg {
            BaseArg::Dimension => Self::DimensionTotal,
            BaseArg::Portfolio => Self::PortfolioValue,
        }
    }
}

#[derive(Serialize)]
struct ExposureOutput<'a> {
    report: &'a ExposureReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    insights: Option<&'a [EnhancedStabilityInsight]>,
}

#[derive(Debug, Serialize, Tabled)]
struct CombinedRow {
    #[tabled(rename = "Asset Type")]
    asset_type: String,
    #[tabled(rename = "Direct")]
    direct: String,
    #[tabled(rename = "Via Funds")]
    via_mf: String,
    #[tabled(rename = "Combined")]
    combined: String,
    #[tabled(rename = "% of Portfolio")]
    percentage: String,
}

#[derive(Debug, Serialize, Tabled)]
struct FundRow {
    #[tabled(rename = "Fund")]
    name: String,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Equity")]
    equity: String,
    #[tabled(rename = "Debt")]
    debt: String,
    #[tabled(rename = "Other")]
    other: String,
    #[tabled(rename = "Source")]
    source: String,
}

#[derive(Debug, Serialize, Tabled)]
struct DimensionRow {
    #[tabled(rename = "")]
    label: String,
    #[tabled(rename = "Direct")]
    direct: String,
    #[tabled(rename = "Via Funds")]
    via_mf: String,
    #[tabled(rename = "Total")]
    total: String,
    #[tabled(rename = "%")]
    percentage: String,
    #[tabled(rename = "Note")]
    note: String,
}

impl DimensionRow {
    fn new<K: Display>(row: &DimensionalExposure<K>, note: impl Into<String>) -> Self {
        Self {
            label: row.dimension.to_string(),
            direct: format_amount(row.direct_equity),
            via_mf: format_amount(row.via_mf),
            total: format_amount(row.total),
            percentage: format_percent(row.percentage),
            note: note.into(),
        }
    }
}

#[derive(Debug, Serialize, Tabled)]
struct InsightRow {
    #[tabled(rename = "Impact")]
    impact: u8,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Insight")]
    text: String,
}

/// Execute the exposure command.
pub fn execute(args: ExposureArgs, format: OutputFormat) -> Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(threshold) = args.threshold {
        config = config.with_concentration_threshold(validate_percent(threshold, "--threshold")?);
    }
    if let Some(base) = args.base {
        config = config.with_percentage_base(base.into());
    }

    let holdings: Vec<NormalizedHolding> = load_json(&args.holdings)?;
    let factsheets: FactsheetBundle = match &args.factsheets {
        Some(path) => load_json(path)?,
        None => FactsheetBundle::new(),
    };
    tracing::info!(
        holdings = holdings.len(),
        factsheet_funds = factsheets.composition.len(),
        "running exposure analysis"
    );

    let report = ExposureAnalyzer::new(config.clone()).analyze(&holdings, &factsheets)?;
    let insights = args
        .insights
        .then(|| enrich_insights(&derive_insights(&report, &config)));

    match format {
        OutputFormat::Json => print_json(&ExposureOutput {
            report: &report,
            insights: insights.as_deref(),
        }),
        OutputFormat::Table => {
            print_report(&report, args.funds, config.concentration_threshold)?;
            if let Some(insights) = &insights {
                print_insights(insights)?;
            }
            Ok(())
        }
    }
}

fn print_report(report: &ExposureReport, show_funds: bool, threshold: f64) -> Result<()> {
    let format = OutputFormat::Table;
    let totals = &report.totals;

    print_header("Portfolio Totals");
    print_output(
        &[
            KeyValue::from_amount("Gross Assets", totals.gross_assets),
            KeyValue::from_amount("Liabilities", totals.liabilities),
            KeyValue::from_amount("Net Worth", totals.net_worth),
            KeyValue::from_amount("Allocation Total", totals.allocation_total),
            KeyValue::from_amount("Insurance (excluded)", totals.excluded_insurance),
        ],
        format,
    )?;

    print_header("Combined Exposure");
    let combined: Vec<CombinedRow> = report
        .combined
        .iter()
        .map(|row| CombinedRow {
            asset_type: row.asset_type.to_string(),
            direct: format_amount(row.direct_holdings),
            via_mf: format_amount(row.exposure_via_mf),
            combined: format_amount(row.combined_view),
            percentage: format_percent(row.percentage_of_portfolio),
        })
        .collect();
    print_output(&combined, format)?;

    if show_funds {
        print_header("Fund Look-Through");
        let funds: Vec<FundRow> = report
            .fund_exposure
            .per_fund
            .iter()
            .map(|fund| FundRow {
                name: fund.name.clone(),
                value: format_amount(fund.current_value),
                equity: format_amount(fund.breakdown.equity),
                debt: format_amount(fund.breakdown.debt),
                other: format_amount(fund.breakdown.other),
                source: fund.source.to_string(),
            })
            .collect();
        print_output(&funds, format)?;
    }

    print_header("Sector Exposure");
    let sectors: Vec<DimensionRow> = report
        .sector
        .iter()
        .map(|row| {
            let flagged = report
                .sector_concentration
                .iter()
                .any(|f| f.dimension == row.dimension);
            let note = if flagged {
                format!("above {threshold:.0}%").red().to_string()
            } else {
                String::new()
            };
            DimensionRow::new(row, note)
        })
        .collect();
    print_output(&sectors, format)?;

    print_header("Market-Cap Exposure");
    if !report.market_cap.data_available {
        print_info("No market-cap data; showing recommended ranges only.");
    }
    let bands: Vec<DimensionRow> = report
        .market_cap
        .rows
        .iter()
        .map(|row| {
            let note = row.recommended_range.map_or_else(String::new, |range| {
                format!("{:.0}-{:.0}%", range.min_pct, range.max_pct)
            });
            DimensionRow::new(&row.exposure, note)
        })
        .collect();
    print_output(&bands, format)?;

    print_header("Geography");
    let regions: Vec<DimensionRow> = report
        .geography
        .exposures
        .iter()
        .map(|row| DimensionRow::new(row, ""))
        .collect();
    print_output(&regions, format)?;
    print_info(&format!("Fund geography source: {}", report.geography.source));
    for source in &report.geography.international_sources {
        let basis = source
            .confidence
            .map_or_else(|| "factsheet".to_string(), |c| format!("{c} confidence, by name"));
        println!(
            "  {} {} ({basis})",
            source.name,
            format_amount(source.international_value)
        );
    }

    let stats = &report.stats;
    if stats.heuristic_fund_splits > 0 {
        print_warning(&format!(
            "{} of {} funds use estimated equity/debt splits",
            stats.heuristic_fund_splits, stats.total_funds
        ));
    }
    if stats.unknown_product_types > 0 {
        print_warning(&format!(
            "{} holdings had an unrecognized product type and were treated as equity",
            stats.unknown_product_types
        ));
    }
    Ok(())
}

fn print_insights(insights: &[EnhancedStabilityInsight]) -> Result<()> {
    print_header("Insights");
    let rows: Vec<InsightRow> = insights
        .iter()
        .map(|insight| InsightRow {
            impact: insight.impact,
            category: insight.category.to_string(),
            text: insight.text.clone(),
        })
        .collect();
    print_output(&rows, OutputFormat::Table)?;
    for insight in insights {
        println!("{} {}", insight.category.to_string().bold(), insight.explanation.dimmed());
    }
    Ok(())
}
