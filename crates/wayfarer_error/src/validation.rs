//! Validation errors for requests and generated content.

/// Specific validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ValidationErrorKind {
    /// Generated content does not satisfy the expected schema
    #[display("Schema violation at '{}': {}", field, reason)]
    SchemaViolation {
        /// First offending field, as a path such as `days[2].activities`
        field: String,
        /// What is wrong with it
        reason: String,
    },
    /// Caller input rejected before generation
    #[display("Invalid input '{}': {}", field, reason)]
    InvalidInput {
        /// Offending request field
        field: String,
        /// What is wrong with it
        reason: String,
    },
}

/// Validation error with location tracking.
///
/// # Examples
///
/// ```
/// use wayfarer_error::ValidationError;
///
/// let err = ValidationError::schema("days", "expected 3 days, got 2");
/// assert_eq!(err.field(), "days");
/// assert!(err.is_schema_violation());
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Validation Error: {} at line {} in {}", kind, line, file)]
pub struct ValidationError {
    /// The kind of error that occurred
    pub kind: ValidationErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ValidationError {
    /// Create a new validation error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ValidationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Schema violation on generated content.
    #[track_caller]
    pub fn schema(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(ValidationErrorKind::SchemaViolation {
            field: field.into(),
            reason: reason.into(),
        })
    }

    /// Rejected caller input.
    #[track_caller]
    pub fn input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(ValidationErrorKind::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        })
    }

    /// The offending field.
    pub fn field(&self) -> &str {
        match &self.kind {
            ValidationErrorKind::SchemaViolation { field, .. }
            | ValidationErrorKind::InvalidInput { field, .. } => field,
        }
    }

    /// The reason the field was rejected.
    pub fn reason(&self) -> &str {
        match &self.kind {
            ValidationErrorKind::SchemaViolation { reason, .. }
            | ValidationErrorKind::InvalidInput { reason, .. } => reason,
        }
    }

    /// Whether this error concerns generated content rather than caller input.
    pub fn is_schema_violation(&self) -> bool {
        matches!(self.kind, ValidationErrorKind::SchemaViolation { .. })
    }
}
