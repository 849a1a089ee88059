//! Planning service and HTTP API for Wayfarer.
//!
//! This crate wires the completion clients, the cache store and the
//! orchestration graph into a [`TravelPlanner`], and exposes it over HTTP.
//!
//! The backing planner is chosen once at startup from [`WayfarerConfig`]:
//!
//! | environment   | planner                                         |
//! |---------------|-------------------------------------------------|
//! | `production`  | [`PlanningService`] over the xAI client         |
//! | `test`        | [`PlanningService`] over the mock client        |
//! | `development` | [`MockPlanner`]                                 |
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use tokio_util::sync::CancellationToken;
//! use wayfarer_server::{ApiState, InMemoryPlanRepository, WayfarerConfig, build_planner, serve};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = WayfarerConfig::load(None, None)?;
//!     let shutdown = CancellationToken::new();
//!     let planner = build_planner(&config, shutdown.clone())?;
//!     let state = ApiState::new(planner, Arc::new(InMemoryPlanRepository::new()));
//!     serve(&config, state, shutdown).await?;
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod api;
mod config;
mod repository;
mod server;
mod service;

pub use api::{ApiError, ApiState, create_router};
pub use config::{CacheSettings, Environment, ServerSettings, WayfarerConfig};
pub use repository::InMemoryPlanRepository;
pub use server::serve;
pub use service::{MockPlanner, PlanningService, TravelPlanner, build_planner};
