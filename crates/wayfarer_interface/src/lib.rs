//! Trait definitions for the Wayfarer travel planning service.
//!
//! This crate provides the seams between the planning workflow and its
//! backends: completion providers, cache stores and plan repositories.

mod traits;

pub use traits::{CacheStore, CompletionClient, PlanRepository};
