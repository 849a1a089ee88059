//! Orchestration graph errors.

/// Conditions that end a workflow run without a terminal result.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum WorkflowErrorKind {
    /// The run was cancelled by its caller
    #[display("Workflow cancelled after {} attempt(s)", _0)]
    Cancelled(u32),
    /// Attempt budget spent; drives the transition to fallback and is never returned to callers
    #[display("Retries exhausted after {} attempt(s): {}", attempts, last_error)]
    ExhaustedRetries {
        /// Completion calls made
        attempts: u32,
        /// Last failure observed
        last_error: String,
    },
}

/// Workflow error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Workflow Error: {} at line {} in {}", kind, line, file)]
pub struct WorkflowError {
    /// The kind of error that occurred
    pub kind: WorkflowErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl WorkflowError {
    /// Create a new workflow error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: WorkflowErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Whether the run stopped because it was cancelled.
    pub fn is_cancelled(&self) -> bool {
        matches!(self.kind, WorkflowErrorKind::Cancelled(_))
    }
}
