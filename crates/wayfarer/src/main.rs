//! Wayfarer CLI binary.
//!
//! This binary provides command-line access to Wayfarer:
//! - Serve the HTTP API
//! - Generate a single itinerary
//! - Answer a single destination question

use clap::Parser;
use wayfarer::observability::{ObservabilityConfig, init_observability};
use wayfarer_server::WayfarerConfig;

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, Commands, run_plan, run_serve, run_suggest};

    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    init_observability(ObservabilityConfig::new("wayfarer").with_json_logs(cli.json_logs))?;

    let config = WayfarerConfig::load(cli.config.as_deref(), cli.environment)?;

    // Execute the requested command
    match cli.command {
        Commands::Serve { host, port } => {
            run_serve(config, host, port).await?;
        }

        Commands::Plan {
            destination,
            days,
            interests,
            start_date,
        } => {
            run_plan(config, destination, days, interests, start_date).await?;
        }

        Commands::Suggest { destination, query } => {
            run_suggest(config, destination, query).await?;
        }
    }

    Ok(())
}
