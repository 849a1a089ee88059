//! CLI command definitions.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use wayfarer_server::Environment;

/// Wayfarer - LLM-backed travel itineraries and destination answers
#[derive(Parser, Debug)]
#[command(name = "wayfarer")]
#[command(about = "LLM-backed travel itineraries and destination answers", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Deployment mode (production, development, test)
    #[arg(long = "env", global = true)]
    pub environment: Option<Environment>,

    /// Configuration file layered over the defaults
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP API
    Serve {
        /// Bind address, overriding the configuration
        #[arg(long)]
        host: Option<String>,

        /// Bind port, overriding the configuration
        #[arg(long)]
        port: Option<u16>,
    },

    /// Generate one itinerary and print it as JSON
    Plan {
        /// Destination city and country
        destination: String,

        /// Trip length in days
        #[arg(long)]
        days: u32,

        /// Interests to plan around
        #[arg(long, default_value = "")]
        interests: String,

        /// First day of the trip (YYYY-MM-DD)
        #[arg(long)]
        start_date: Option<NaiveDate>,
    },

    /// Answer one question about a destination and print it as JSON
    Suggest {
        /// Destination city and country
        destination: String,

        /// Question to answer
        query: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_plan_with_global_flags() {
        let cli = Cli::try_parse_from([
            "wayfarer",
            "plan",
            "Tokyo, Japan",
            "--days",
            "3",
            "--start-date",
            "2025-04-01",
            "--env",
            "test",
            "--json-logs",
        ])
        .unwrap();

        assert!(cli.json_logs);
        assert_eq!(cli.environment, Some(Environment::Test));
        match cli.command {
            Commands::Plan {
                destination,
                days,
                interests,
                start_date,
            } => {
                assert_eq!(destination, "Tokyo, Japan");
                assert_eq!(days, 3);
                assert!(interests.is_empty());
                assert_eq!(start_date, NaiveDate::from_ymd_opt(2025, 4, 1));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_serve_overrides() {
        let cli = Cli::try_parse_from(["wayfarer", "serve", "--port", "9000"]).unwrap();
        match cli.command {
            Commands::Serve { host, port } => {
                assert_eq!(host, None);
                assert_eq!(port, Some(9000));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_environment() {
        assert!(Cli::try_parse_from(["wayfarer", "--env", "staging", "serve"]).is_err());
    }
}
