//! WealthLens CLI - look-through exposure for a holdings file.
//!
//! # Usage
//!
//! ```bash
//! # Classify a product label
//! wealthlens classify "Sovereign Gold Bond"
//!
//! # Full exposure report
//! wealthlens exposure holdings.json --factsheets factsheets.json --insights
//!
//! # Check fund names for foreign exposure
//! wealthlens detect "Motilal Oswal Nasdaq 100 FOF" "HDFC Flexi Cap Fund"
//!
//! # Print the effective configuration as TOML
//! wealthlens config --config wealthlens.toml
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod error;
mod output;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so JSON on stdout stays parseable
    let filter = if cli.verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("wealthlens=debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("wealthlens=info"))
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let format = cli.format;

    match cli.command {
        Commands::Classify(args) => commands::classify::execute(args, format)?,
        Commands::Exposure(args) => commands::exposure::execute(args, format)?,
        Commands::Detect(args) => commands::detect::execute(args, format)?,
        Commands::Config(args) => commands::config::execute(args, format)?,
    }

    Ok(())
}
