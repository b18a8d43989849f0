use clap::Parser;
use tracing_subscriber::EnvFilter;

use vulnpulse::cli;
use vulnpulse::config;
use vulnpulse::errors::VulnpulseError;

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();

    // Initialize logging
    let log_level = match (cli.quiet, cli.verbose) {
        (true, _) => "warn",
        (false, 0) => "info",
        (false, 1) => "debug",
        _ => "trace",
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(!cli.no_color)
        .init();

    let result = match cli.command {
        cli::Commands::Report(args) => cli::report::handle_report(args).await,
        cli::Commands::Validate(args) => handle_validate(args).await,
    };

    match result {
        Ok(()) => {}
        Err(e) => {
            eprintln!("Error: {}", e);
            let exit_code = match &e {
                VulnpulseError::Config(_) | VulnpulseError::Yaml(_) => 2,
                VulnpulseError::Network(_) => 3,
                VulnpulseError::Authentication(_) => 4,
                VulnpulseError::EmptyReport => 5,
                _ => 1,
            };
            std::process::exit(exit_code);
        }
    }
}

async fn handle_validate(args: cli::commands::ValidateArgs) -> Result<(), VulnpulseError> {
    let _config = config::parse_config(&args.config).await?;
    println!("Configuration is valid: {}", args.config.display());
    Ok(())
}
