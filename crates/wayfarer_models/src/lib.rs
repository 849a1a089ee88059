//! Completion provider integrations for Wayfarer.
//!
//! This crate provides implementations of the
//! [`CompletionClient`](wayfarer_interface::CompletionClient) trait:
//!
//! - [`XaiClient`]: xAI's OpenAI-compatible chat completions endpoint
//! - [`MockCompletionClient`]: deterministic canned completions for tests and
//!   offline runs
//!
//! Both clients pass their text through [`shape_output`], so the orchestration
//! graph sees identical output handling whichever backend is configured.

#![warn(missing_docs)]

mod extraction;
pub mod fixtures;
mod mock;
mod xai;

pub use extraction::{extract_json, shape_output};
pub use mock::MockCompletionClient;
pub use xai::{LlmConfig, LlmConfigBuilder, XAI_BASE_URL, XAI_DEFAULT_MODEL, XaiClient};
