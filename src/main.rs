//! medbot CLI entry point.

use anyhow::Result;
use clap::Parser;
use medbot::cli::{commands, init_tracing, Cli, Commands};
use medbot::config::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Secrets may live in a local .env file
    dotenvy::dotenv().ok();

    init_tracing(cli.verbose);

    let settings = match &cli.config {
        Some(path) => Settings::load_from(Some(&Settings::expand_path(path)))?,
        None => Settings::load()?,
    };

    match &cli.command {
        Commands::Serve { host, port } => {
            commands::run_serve(host.clone(), *port, settings).await?;
        }

        Commands::Check => {
            commands::run_check(&settings).await?;
        }

        Commands::Config { action } => {
            commands::run_config(action, &settings)?;
        }
    }

    Ok(())
}
