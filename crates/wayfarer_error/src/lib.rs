//! Error types for the Wayfarer service.
//!
//! This crate provides the foundation error types used throughout the Wayfarer workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All constructors use `#[track_caller]` for automatic location capture
//!
//! Only [`ValidationError`] with an input kind ever reaches an HTTP caller. Completion,
//! cache and workflow errors are absorbed by the orchestration graph and the planning
//! service, which degrade to retries, cache misses or a fallback result.
//!
//! # Examples
//!
//! ```
//! use wayfarer_error::{CompletionError, CompletionErrorKind, RetryableError, WayfarerResult};
//!
//! fn call_model() -> WayfarerResult<String> {
//!     Err(CompletionError::new(CompletionErrorKind::Timeout))?
//! }
//!
//! let err = CompletionError::new(CompletionErrorKind::Timeout);
//! assert!(err.is_retryable());
//! assert!(call_model().is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod cache;
mod completion;
mod config;
mod error;
mod http;
mod json;
mod repository;
mod validation;
mod workflow;

pub use cache::{CacheError, CacheErrorKind};
pub use completion::{CompletionError, CompletionErrorKind, RetryableError};
pub use config::ConfigError;
pub use error::{WayfarerError, WayfarerErrorKind, WayfarerResult};
pub use http::HttpError;
pub use json::JsonError;
pub use repository::{RepositoryError, RepositoryErrorKind};
pub use validation::{ValidationError, ValidationErrorKind};
pub use workflow::{WorkflowError, WorkflowErrorKind};
