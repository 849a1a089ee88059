//! Completion client errors and retry classification.

use std::time::Duration;

/// Failure conditions reported by a completion client.
///
/// Every backend normalizes its transport and parsing failures into one of
/// these kinds so the orchestration graph can branch on them uniformly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum CompletionErrorKind {
    /// The completion service did not answer in time
    #[display("Completion request timed out")]
    Timeout,
    /// The completion service throttled the request
    #[display("Completion service rate limited the request")]
    RateLimited {
        /// Server-suggested wait before the next attempt
        retry_after: Option<Duration>,
    },
    /// 5xx response or connection-level failure
    #[display("Upstream failure (status {:?}): {}", status, message)]
    Upstream {
        /// HTTP status, absent for connection failures
        status: Option<u16>,
        /// Error message
        message: String,
    },
    /// A response arrived but could not be parsed into the expected shape
    #[display("Malformed completion output: {}", _0)]
    MalformedOutput(String),
    /// Non-retryable client error such as a bad credential
    #[display("Completion request rejected with HTTP {}: {}", status, message)]
    Rejected {
        /// HTTP status code
        status: u16,
        /// Error message
        message: String,
    },
}

impl CompletionErrorKind {
    /// Classify an HTTP status returned by the completion service.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            408 | 504 => Self::Timeout,
            429 => Self::RateLimited { retry_after: None },
            500..=599 => Self::Upstream {
                status: Some(status),
                message,
            },
            _ => Self::Rejected { status, message },
        }
    }

    /// Whether this failure is a transport-level failure that warrants a retry.
    ///
    /// Malformed output is also retried by the graph, but under its own
    /// bounded budget, so it is reported separately by [`Self::is_malformed`].
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Timeout | Self::RateLimited { .. } | Self::Upstream { .. }
        )
    }

    /// Whether the response was received but unusable.
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedOutput(_))
    }

    /// Server-provided retry hint, if any.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::RateLimited { retry_after } => *retry_after,
            _ => None,
        }
    }
}

/// Completion error with source location tracking.
///
/// # Examples
///
/// ```
/// use wayfarer_error::{CompletionError, CompletionErrorKind};
///
/// let err = CompletionError::new(CompletionErrorKind::from_status(503, "overloaded"));
/// assert!(format!("{}", err).contains("Upstream failure"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Completion Error: {} at line {} in {}", kind, line, file)]
pub struct CompletionError {
    /// The kind of error that occurred
    pub kind: CompletionErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl CompletionError {
    /// Create a new CompletionError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: CompletionErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Shorthand for a malformed-output error.
    #[track_caller]
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::new(CompletionErrorKind::MalformedOutput(reason.into()))
    }
}

/// Trait for errors that support retry logic.
///
/// # Examples
///
/// ```
/// use wayfarer_error::{CompletionError, CompletionErrorKind, RetryableError};
///
/// let err = CompletionError::new(CompletionErrorKind::RateLimited { retry_after: None });
/// assert!(err.is_retryable());
///
/// let err = CompletionError::new(CompletionErrorKind::from_status(401, "bad key"));
/// assert!(!err.is_retryable());
/// ```
pub trait RetryableError {
    /// Returns true if this error should trigger a retry.
    ///
    /// Transient errors like 503, 429 or timeouts return true. Permanent
    /// errors like 401 return false.
    fn is_retryable(&self) -> bool;

    /// Minimum wait the error itself asks for before the next attempt.
    fn retry_hint(&self) -> Option<Duration> {
        None
    }
}

impl RetryableError for CompletionError {
    fn is_retryable(&self) -> bool {
        self.kind.is_recoverable() || self.kind.is_malformed()
    }

    fn retry_hint(&self) -> Option<Duration> {
        self.kind.retry_after()
    }
}
