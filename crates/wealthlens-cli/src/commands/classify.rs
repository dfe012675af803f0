//! Classify command implementation.
//!
//! Resolves a product label to its four-field classification.

use anyhow::Result;
use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use tabled::Tabled;

use wealthlens_core::classifier::{classify_detailed, classify_product, ClassificationOutcome};
use wealthlens_core::types::{ClassificationHints, ProductType, UlipNpsAllocation};

use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::output::{print_header, print_json, print_output, KeyValue};

/// Arguments for the classify command.
#[derive(Args, Debug)]
pub struct ClassifyArgs {
    /// Product label, e.g. "Mutual Fund", "PPF", "NPS Tier 1"
    #[arg(required_unless_present = "all")]
    pub product_type: Option<String>,

    /// List the classification of every known product type
    #[arg(long, conflicts_with = "product_type")]
    pub all: bool,

    /// Fund invests mainly in equity
    #[arg(long)]
    pub equity_fund: bool,

    /// Fund invests mainly in debt
    #[arg(long)]
    pub debt_fund: bool,

    /// Hybrid / balanced fund
    #[arg(long)]
    pub hybrid_fund: bool,

    /// Fund or ETF tracks gold
    #[arg(long)]
    pub gold: bool,

    /// Fund invests in real estate
    #[arg(long)]
    pub real_estate: bool,

    /// ULIP/NPS split as EQUITY,DEBT,CASH percentages, e.g. 50,40,10
    #[arg(long, value_delimiter = ',', num_args = 3)]
    pub allocation: Option<Vec<Decimal>>,
}

/// One row of the product table.
#[derive(Debug, Serialize, Tabled)]
struct ProductRow {
    #[tabled(rename = "Product")]
    product: String,
    #[tabled(rename = "Asset Class")]
    asset_class: String,
    #[tabled(rename = "Bucket")]
    bucket: String,
    #[tabled(rename = "Risk")]
    risk: String,
    #[tabled(rename = "Valuation")]
    valuation: String,
}

impl ProductRow {
    fn new(product: &ProductType, outcome: &ClassificationOutcome) -> Self {
        let c = &outcome.classification;
        Self {
            product: product.name().to_string(),
            asset_class: c.asset_class.to_string(),
            bucket: c.top_level_bucket.to_string(),
            risk: c.risk_behavior.to_string(),
            valuation: c.valuation_method.to_string(),
        }
    }
}

/// Execute the classify command.
pub fn execute(args: ClassifyArgs, format: OutputFormat) -> Result<()> {
    let hints = build_hints(&args)?;

    if args.all {
        let rows: Vec<ProductRow> = ProductType::all()
            .iter()
            .map(|product| ProductRow::new(product, &classify_product(product, hints.as_ref())))
            .collect();
        if format == OutputFormat::Table {
            print_header("Product Taxonomy");
        }
        return print_output(&rows, format);
    }

    let label = args
        .product_type
        .as_deref()
        .ok_or_else(|| CliError::InvalidArgument("missing product type".to_string()))?;
    let outcome = classify_detailed(label, hints.as_ref());

    match format {
        OutputFormat::Table => {
            let c = &outcome.classification;
            let rows = vec![
                KeyValue::new("Product", ProductType::parse(label).name()),
                KeyValue::new("Asset Class", c.asset_class.name()),
                KeyValue::new("Top-Level Bucket", c.top_level_bucket.name()),
                KeyValue::new("Risk Behavior", c.risk_behavior.name()),
                KeyValue::new("Valuation Method", c.valuation_method.name()),
                KeyValue::new(
                    "Fallback",
                    outcome.fallback.map_or("None", |f| f.name()),
                ),
            ];
            print_header("Classification");
            print_output(&rows, format)
        }
        OutputFormat::Json => print_json(&outcome),
    }
}

fn build_hints(args: &ClassifyArgs) -> Result<Option<ClassificationHints>> {
    let mut hints = ClassificationHints {
        is_equity_mf: args.equity_fund,
        is_debt_mf: args.debt_fund,
        is_hybrid_mf: args.hybrid_fund,
        is_gold_etf: args.gold,
        is_real_estate: args.real_estate,
        ..ClassificationHints::default()
    };

    if let Some(split) = &args.allocation {
        let [equity, debt, cash] = split.as_slice() else {
            return Err(CliError::InvalidArgument(
                "--allocation takes exactly three values".to_string(),
            )
            .into());
        };
        let allocation = UlipNpsAllocation::new(*equity, *debt, *cash)
            .map_err(|e| CliError::InvalidArgument(e.to_string()))?;
        hints = hints.with_allocation(allocation);
    }

    if hints == ClassificationHints::default() {
        Ok(None)
    } else {
        Ok(Some(hints))
    }
}
