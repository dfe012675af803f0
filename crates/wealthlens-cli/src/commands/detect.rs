//! Detect command implementation.
//!
//! Runs the fund-name detector used when no geography factsheet is available.

use anyhow::Result;
use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use tabled::Tabled;

use wealthlens_exposure::bucketing::{detect_international_exposure, DetectionConfidence};

use crate::cli::OutputFormat;
use crate::commands::load_config;
use crate::output::{print_header, print_output};

/// Arguments for the detect command.
#[derive(Args, Debug)]
pub struct DetectArgs {
    /// Fund names to check
    #[arg(required = true)]
    pub names: Vec<String>,

    /// Exposure config (TOML) supplying the medium-confidence share
    #[arg(long, env = "WEALTHLENS_CONFIG")]
    pub config: Option<std::path::PathBuf>,
}

#[derive(Debug, Serialize, Tabled)]
struct DetectionRow {
    #[tabled(rename = "Fund")]
    name: String,
    #[tabled(rename = "Confidence")]
    confidence: DetectionConfidence,
    #[tabled(rename = "Matched")]
    #[tabled(display_with = "display_pattern")]
    matched_pattern: Option<String>,
    #[tabled(rename = "International %")]
    international_pct: Decimal,
}

fn display_pattern(pattern: &Option<String>) -> String {
    pattern.clone().unwrap_or_else(|| "-".to_string())
}

/// Execute the detect command.
pub fn execute(args: DetectArgs, format: OutputFormat) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    config.validate()?;
    let medium = config.medium_confidence_international;

    let rows: Vec<DetectionRow> = args
        .names
        .into_iter()
        .map(|name| {
            let detection = detect_international_exposure(&name);
            DetectionRow {
                international_pct: (detection.international_share(medium)
                    * Decimal::ONE_HUNDRED)
                    .normalize(),
                confidence: detection.confidence,
                matched_pattern: detection.matched_pattern,
                name,
            }
        })
        .collect();

    if format == OutputFormat::Table {
        print_header("International Exposure Detection");
    }
    print_output(&rows, format)
}
