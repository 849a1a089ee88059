//! Cache store error types.

/// Kinds of cache failures.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum CacheErrorKind {
    /// Cache backend could not be reached
    #[display("Cache unavailable: {}", _0)]
    Unavailable(String),
    /// Cached value could not be encoded or decoded
    #[display("Cache serialization failed: {}", _0)]
    Serialization(String),
}

/// Cache error with location tracking.
///
/// Never propagated to callers; the planning service logs it and treats the
/// operation as a miss or a no-op.
///
/// # Examples
///
/// ```
/// use wayfarer_error::{CacheError, CacheErrorKind};
///
/// let err = CacheError::new(CacheErrorKind::Unavailable("connection refused".to_string()));
/// assert!(format!("{}", err).contains("unavailable"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Cache Error: {} at line {} in {}", kind, line, file)]
pub struct CacheError {
    /// The kind of error that occurred
    pub kind: CacheErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl CacheError {
    /// Create a new cache error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: CacheErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
