//! Command-line parsing for the regression lab.
//!
//! Parsing and dispatch are kept apart from the statistics code; handlers live
//! in `crate::app`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::ai::provider::{ModelId, Provider};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "reglab",
    version,
    about = "Interactive linear regression lab on Galton's parent/child height data"
)]
pub struct Cli {
    /// JSON file holding the persisted AI settings.
    #[arg(long, global = true, env = "REGLAB_SETTINGS", value_name = "PATH")]
    pub settings: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Launch the interactive terminal lab (default).
    Tui(TuiArgs),
    /// Fit the least-squares line and print the report.
    Fit(ReportArgs),
    /// Evaluate a hand-picked line and print the report.
    Eval(EvalArgs),
    /// Ask a remote model to analyse a line.
    Analyze(AnalyzeArgs),
    /// Manage the persisted AI settings.
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Debug, Args, Clone)]
pub struct TuiArgs {
    /// Starting slope (defaults to 0.5).
    #[arg(long, allow_negative_numbers = true)]
    pub slope: Option<f64>,

    /// Starting intercept (defaults to 30).
    #[arg(long, allow_negative_numbers = true)]
    pub intercept: Option<f64>,
}

/// Output options shared by `fit` and `eval`.
#[derive(Debug, Args, Clone)]
pub struct ReportArgs {
    /// Disable the terminal plot.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 72)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,

    /// Export per-point residuals to CSV.
    #[arg(long, value_name = "CSV")]
    pub export: Option<PathBuf>,

    /// Print parameters and metrics as JSON instead of the text report.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args, Clone)]
pub struct EvalArgs {
    #[arg(long, allow_negative_numbers = true)]
    pub slope: f64,

    #[arg(long, allow_negative_numbers = true)]
    pub intercept: f64,

    #[command(flatten)]
    pub report: ReportArgs,
}

#[derive(Debug, Args, Clone)]
pub struct AnalyzeArgs {
    /// Slope of the line to analyse (defaults to 0.5).
    #[arg(long, allow_negative_numbers = true, conflicts_with = "auto_fit")]
    pub slope: Option<f64>,

    /// Intercept of the line to analyse (defaults to 30).
    #[arg(long, allow_negative_numbers = true, conflicts_with = "auto_fit")]
    pub intercept: Option<f64>,

    /// Analyse the least-squares line.
    #[arg(long)]
    pub auto_fit: bool,

    /// Override the persisted provider.
    #[arg(long, value_enum)]
    pub provider: Option<Provider>,

    /// Override the persisted model.
    #[arg(long, value_enum)]
    pub model: Option<ModelId>,

    /// Override the persisted API key.
    #[arg(long, env = "REGLAB_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Validate and persist provider, model and API key.
    Set(ConfigSetArgs),
    /// Show the persisted settings with the key masked.
    Show,
    /// Remove all persisted settings.
    Clear,
}

#[derive(Debug, Args, Clone)]
pub struct ConfigSetArgs {
    #[arg(long, value_enum)]
    pub provider: Provider,

    /// Defaults to the provider's first model.
    #[arg(long, value_enum)]
    pub model: Option<ModelId>,

    #[arg(long)]
    pub api_key: String,
}
