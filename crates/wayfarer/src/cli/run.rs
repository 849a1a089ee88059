//! Command handlers.

use chrono::NaiveDate;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use wayfarer_core::{TravelPlanRequest, TravelSuggestionRequest};
use wayfarer_server::{ApiState, InMemoryPlanRepository, WayfarerConfig, build_planner, serve};

/// Cancel `shutdown` on Ctrl-C.
fn cancel_on_ctrl_c(shutdown: CancellationToken) {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Shutdown requested"),
            Err(e) => warn!(error = %e, "Could not listen for Ctrl-C; shutting down"),
        }
        shutdown.cancel();
    });
}

/// Run the HTTP API until Ctrl-C.
pub async fn run_serve(
    config: WayfarerConfig,
    host: Option<String>,
    port: Option<u16>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut server = config.server().clone();
    if let Some(host) = host {
        server = server.with_host(host);
    }
    if let Some(port) = port {
        server = server.with_port(port);
    }
    let config = config.with_server(server);

    let shutdown = CancellationToken::new();
    cancel_on_ctrl_c(shutdown.clone());

    let planner = build_planner(&config, shutdown.clone())?;
    let state = ApiState::new(planner, Arc::new(InMemoryPlanRepository::new()));
    serve(&config, state, shutdown).await?;
    Ok(())
}

/// Generate one itinerary and print it.
pub async fn run_plan(
    config: WayfarerConfig,
    destination: String,
    days: u32,
    interests: String,
    start_date: Option<NaiveDate>,
) -> Result<(), Box<dyn std::error::Error>> {
    let request = TravelPlanRequest::new(destination, days, interests, start_date)?;

    let shutdown = CancellationToken::new();
    cancel_on_ctrl_c(shutdown.clone());

    let planner = build_planner(&config, shutdown)?;
    let itinerary = planner.plan(&request).await;
    println!("{}", serde_json::to_string_pretty(&itinerary)?);
    Ok(())
}

/// Answer one destination question and print it.
pub async fn run_suggest(
    config: WayfarerConfig,
    destination: String,
    query: String,
) -> Result<(), Box<dyn std::error::Error>> {
    let request = TravelSuggestionRequest::new(destination, query)?;

    let shutdown = CancellationToken::new();
    cancel_on_ctrl_c(shutdown.clone());

    let planner = build_planner(&config, shutdown)?;
    let suggestion = planner.suggest(&request).await;
    println!("{}", serde_json::to_string_pretty(&suggestion)?);
    Ok(())
}
