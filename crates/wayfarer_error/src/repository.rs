//! Plan repository errors.

/// Kinds of repository failures.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum RepositoryErrorKind {
    /// No plan stored under the identifier
    #[display("Travel plan not found: {}", _0)]
    NotFound(String),
    /// The requested day does not exist in the stored plan
    #[display("Day {} is outside the plan's {} day(s)", day, duration)]
    DayOutOfRange {
        /// Requested day
        day: u32,
        /// Plan length
        duration: u32,
    },
    /// Storage backend failure
    #[display("Repository unavailable: {}", _0)]
    Unavailable(String),
}

/// Repository error with location tracking.
///
/// # Examples
///
/// ```
/// use wayfarer_error::{RepositoryError, RepositoryErrorKind};
///
/// let err = RepositoryError::new(RepositoryErrorKind::NotFound("abc".to_string()));
/// assert!(format!("{}", err).contains("abc"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Repository Error: {} at line {} in {}", kind, line, file)]
pub struct RepositoryError {
    /// The kind of error that occurred
    pub kind: RepositoryErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl RepositoryError {
    /// Create a new repository error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: RepositoryErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
