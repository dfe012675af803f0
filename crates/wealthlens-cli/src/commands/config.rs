//! Config command implementation.
//!
//! Prints the effective exposure configuration, which doubles as a template
//! for a `--config` file.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::cli::OutputFormat;
use crate::commands::load_config;
use crate::output::print_json;

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Exposure config (TOML) to load and validate; defaults are shown without it
    #[arg(long, env = "WEALTHLENS_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Execute the config command.
pub fn execute(args: ConfigArgs, format: OutputFormat) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    config.validate()?;

    match format {
        OutputFormat::Table => print!("{}", toml::to_string_pretty(&config)?),
        OutputFormat::Json => print_json(&config)?,
    }
    Ok(())
}
