//! Wayfarer - LLM-backed travel planning
//!
//! Wayfarer turns a destination, a trip length and a set of interests into a
//! day-by-day itinerary, and answers free-form questions about a destination.
//! Generation runs through a validating retry graph that always produces a
//! result: when the model keeps misbehaving, a deterministic fallback is
//! returned instead of an error.
//!
//! # Crates
//!
//! - `wayfarer_core` - requests, itineraries, suggestions, stored plans
//! - `wayfarer_server` - configuration, planning service, HTTP API
//! - `wayfarer_error` - error types shared across the workspace
//!
//! # Cargo Features
//!
//! - `observability` - export tracing spans through OpenTelemetry (stdout)

#![warn(missing_docs)]

pub mod observability;

pub use wayfarer_core::*;
pub use wayfarer_error::*;
pub use wayfarer_server::*;
