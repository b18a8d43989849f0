use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "vulnpulse", version, about = "Vulnerability remediation metrics reporter")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch weekly metrics and write the aggregated report
    Report(ReportArgs),
    /// Validate a configuration file
    Validate(ValidateArgs),
}

#[derive(Args, Clone)]
pub struct ReportArgs {
    /// IQ server base URL
    #[arg(short = 'u', long, default_value = "http://localhost:8070")]
    pub server: String,

    /// Credentials as user:password
    #[arg(short, long, default_value = "admin:admin123")]
    pub auth: String,

    /// Number of fully-completed weeks to report on
    #[arg(short, long, default_value_t = 6)]
    pub scope: usize,

    /// Comma-separated application names, ids or public ids to include
    #[arg(short = 'i', long)]
    pub app: Option<String>,

    /// Comma-separated organization names or ids to include
    #[arg(short = 'o', long)]
    pub org: Option<String>,

    /// Output file path
    #[arg(long, default_value = "successmetrics.json")]
    pub out: PathBuf,

    /// Human-readable JSON output
    #[arg(short, long)]
    pub pretty: bool,

    /// YAML configuration file (scope, cost constants)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

#[derive(Args, Clone)]
pub struct ValidateArgs {
    /// Config file to validate
    pub config: PathBuf,
}
