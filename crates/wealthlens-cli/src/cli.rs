//! CLI argument definitions.

use clap::{Parser, Subcommand, ValueEnum};

use crate::commands::{ClassifyArgs, ConfigArgs, DetectArgs, ExposureArgs};

/// WealthLens - look-through exposure analytics for retail portfolios
#[derive(Parser)]
#[command(name = "wealthlens")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Classify a product label (or list every known product type)
    Classify(ClassifyArgs),

    /// Analyze a holdings file: look-through, sector, market-cap, geography
    Exposure(ExposureArgs),

    /// Detect international exposure from fund names
    Detect(DetectArgs),

    /// Print the effective exposure configuration as TOML
    Config(ConfigArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
}
