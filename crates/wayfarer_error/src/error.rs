//! Top-level error wrapper types.

use crate::{
    CacheError, CompletionError, ConfigError, HttpError, JsonError, RepositoryError,
    ValidationError, WorkflowError,
};

/// Every error condition in the workspace.
///
/// # Examples
///
/// ```
/// use wayfarer_error::{WayfarerError, ConfigError};
///
/// let err: WayfarerError = ConfigError::new("missing api key").into();
/// assert!(format!("{}", err).contains("Configuration Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum WayfarerErrorKind {
    /// Completion client error
    #[from(CompletionError)]
    Completion(CompletionError),
    /// Input or schema validation error
    #[from(ValidationError)]
    Validation(ValidationError),
    /// Cache store error
    #[from(CacheError)]
    Cache(CacheError),
    /// Orchestration graph error
    #[from(WorkflowError)]
    Workflow(WorkflowError),
    /// Plan repository error
    #[from(RepositoryError)]
    Repository(RepositoryError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// HTTP server error
    #[from(HttpError)]
    Http(HttpError),
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
}

/// Wayfarer error with kind discrimination.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Wayfarer Error: {}", _0)]
pub struct WayfarerError(Box<WayfarerErrorKind>);

impl WayfarerError {
    /// Create a new error from a kind.
    pub fn new(kind: WayfarerErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &WayfarerErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to WayfarerErrorKind
impl<T> From<T> for WayfarerError
where
    T: Into<WayfarerErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Wayfarer operations.
pub type WayfarerResult<T> = std::result::Result<T, WayfarerError>;
