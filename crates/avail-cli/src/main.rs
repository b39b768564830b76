use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use avail_cli::commands::{coverage, report};
use avail_cli::{Cli, Commands, Config};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    match &cli.command {
        Some(Commands::Report {
            input,
            from,
            to,
            maintenance,
            business_hours,
            threshold,
            json,
        }) => {
            let config =
                Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
            tracing::debug!(?config, "loaded configuration");

            let threshold = threshold.unwrap_or(config.threshold);
            report::run(
                input,
                *from,
                *to,
                maintenance.as_deref(),
                business_hours.as_deref(),
                threshold,
                *json,
            )?;
        }
        Some(Commands::Coverage { input, from, to }) => {
            let mut stdout = std::io::stdout();
            coverage::run(&mut stdout, input, *from, *to)?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
