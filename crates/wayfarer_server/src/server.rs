//! HTTP server lifecycle.

use crate::api::{ApiState, create_router};
use crate::config::WayfarerConfig;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument};
use wayfarer_error::HttpError;

/// Serve the API until `shutdown` fires.
///
/// In-flight requests finish before this returns.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails.
#[instrument(skip_all, fields(address = %config.server().bind_address()))]
pub async fn serve(
    config: &WayfarerConfig,
    state: ApiState,
    shutdown: CancellationToken,
) -> Result<(), HttpError> {
    let address = config.server().bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|e| HttpError::new(format!("Failed to bind {}: {}", address, e)))?;
    info!(environment = %config.environment(), "Travel Planner API listening");

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .map_err(|e| HttpError::new(format!("Server error: {}", e)))?;

    info!("Travel Planner API stopped");
    Ok(())
}
