//! The generation state machine.
//!
//! A run moves through explicit [`Step`]s:
//!
//! ```text
//! Start -> Generate -> Validate -> Success
//!             |           |
//!             v           v
//!           Retry <-------+
//!             |
//!             +-> Generate (budget left, after backoff)
//!             +-> Fallback (budget spent)
//! Generate -> Fallback (permanent completion failure)
//! ```
//!
//! Every transition is recorded in a [`WorkflowTrace`]. A run always ends in
//! `Success` or `Fallback` unless it is cancelled.

use crate::policy::RetryPolicy;
use crate::task::GenerationTask;
use derive_getters::Getters;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument, warn};
use wayfarer_core::CompletionOutput;
use wayfarer_error::{
    CompletionError, RetryableError, ValidationError, WorkflowError, WorkflowErrorKind,
};
use wayfarer_interface::CompletionClient;

/// Step names, as recorded in traces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, derive_more::Display)]
pub enum StepKind {
    /// Run created
    Start,
    /// Completion call
    Generate,
    /// Output validation
    Validate,
    /// Failure handling and backoff
    Retry,
    /// Terminal: validated result
    Success,
    /// Terminal: deterministic degraded result
    Fallback,
}

/// Why an attempt failed.
#[derive(Debug, Clone, derive_more::Display)]
pub enum Failure {
    /// The completion call itself failed
    #[display("{}", _0.kind)]
    Completion(CompletionError),
    /// The completion arrived but did not pass validation
    #[display("{}: {}", _0.field(), _0.reason())]
    Schema(ValidationError),
}

impl Failure {
    /// Whether this failure draws on the malformed-output budget.
    pub fn is_malformed(&self) -> bool {
        match self {
            Self::Completion(error) => error.kind.is_malformed(),
            Self::Schema(_) => true,
        }
    }

    /// Minimum wait requested by the failure itself.
    pub fn retry_hint(&self) -> Option<Duration> {
        match self {
            Self::Completion(error) => error.retry_hint(),
            Self::Schema(_) => None,
        }
    }
}

/// A state of the generation machine.
#[derive(Debug, Clone)]
pub enum Step<T> {
    /// Run created, nothing attempted yet
    Start,
    /// Ready to call the completion client
    Generate,
    /// Completion received, awaiting validation
    Validate(CompletionOutput),
    /// An attempt failed
    Retry(Failure),
    /// Validated result
    Success(T),
    /// Generation abandoned for the given reason
    Fallback(String),
}

impl<T> Step<T> {
    /// Name of this step.
    pub fn kind(&self) -> StepKind {
        match self {
            Self::Start => StepKind::Start,
            Self::Generate => StepKind::Generate,
            Self::Validate(_) => StepKind::Validate,
            Self::Retry(_) => StepKind::Retry,
            Self::Success(_) => StepKind::Success,
            Self::Fallback(_) => StepKind::Fallback,
        }
    }

    /// Whether the run ends here.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Success(_) | Self::Fallback(_))
    }

    fn reason(&self) -> Option<String> {
        match self {
            Self::Retry(failure) => Some(failure.to_string()),
            Self::Fallback(reason) => Some(reason.clone()),
            _ => None,
        }
    }
}

/// One recorded state change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters)]
pub struct Transition {
    /// State left
    from: StepKind,
    /// State entered
    to: StepKind,
    /// Completion calls made when the transition happened
    attempt: u32,
    /// Failure or fallback reason, when there is one
    reason: Option<String>,
}

/// Ordered record of every transition in a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WorkflowTrace {
    transitions: Vec<Transition>,
}

impl WorkflowTrace {
    /// All transitions, in order.
    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    /// Number of transitions into `kind`.
    pub fn entered(&self, kind: StepKind) -> usize {
        self.transitions.iter().filter(|t| t.to == kind).count()
    }

    /// Number of retry transitions.
    pub fn retries(&self) -> usize {
        self.entered(StepKind::Retry)
    }

    fn record(&mut self, from: StepKind, to: StepKind, attempt: u32, reason: Option<String>) {
        debug!(%from, %to, attempt, reason = reason.as_deref().unwrap_or(""), "Workflow transition");
        self.transitions.push(Transition {
            from,
            to,
            attempt,
            reason,
        });
    }
}

/// Mutable state of one run.
///
/// Owned by a single [`Workflow::run`] call and dropped when it returns.
#[derive(Debug, Clone, Getters)]
pub struct WorkflowState<T> {
    /// Completion calls made
    attempts: u32,
    /// Malformed or schema-violating outputs seen
    malformed_attempts: u32,
    /// Most recent failure
    last_error: Option<String>,
    /// Most recent raw completion text
    last_raw: Option<String>,
    /// Steering text for the next prompt
    feedback: Option<String>,
    /// Validated result, once reached
    result: Option<T>,
}

impl<T> Default for WorkflowState<T> {
    fn default() -> Self {
        Self {
            attempts: 0,
            malformed_attempts: 0,
            last_error: None,
            last_raw: None,
            feedback: None,
            result: None,
        }
    }
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, derive_more::Display)]
pub enum Terminal {
    /// A completion passed validation
    Success,
    /// The task's fallback was returned
    Fallback,
}

/// Result of a run plus how it was reached.
#[derive(Debug, Clone, Getters)]
pub struct WorkflowOutcome<T> {
    /// The result; always passes validation
    value: T,
    /// Terminal state reached
    terminal: Terminal,
    /// Completion calls made
    attempts: u32,
    /// Every transition taken
    trace: WorkflowTrace,
}

impl<T> WorkflowOutcome<T> {
    /// Whether the value is the task's fallback.
    pub fn is_fallback(&self) -> bool {
        self.terminal == Terminal::Fallback
    }

    /// Take the value.
    pub fn into_value(self) -> T {
        self.value
    }
}

/// Runs generation tasks against a completion client.
#[derive(Clone)]
pub struct Workflow {
    client: Arc<dyn CompletionClient>,
    policy: RetryPolicy,
}

impl std::fmt::Debug for Workflow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Workflow")
            .field("provider", &self.client.provider_name())
            .field("model", &self.client.model_name())
            .field("policy", &self.policy)
            .finish()
    }
}

impl Workflow {
    /// Create a workflow.
    pub fn new(client: Arc<dyn CompletionClient>, policy: RetryPolicy) -> Self {
        Self { client, policy }
    }

    /// Retry policy in force.
    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Run `task` to a terminal state.
    ///
    /// Makes at most `max_attempts` completion calls. Generation failures never
    /// surface as errors: they end in the task's fallback.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowErrorKind::Cancelled`] when `cancel` fires while a
    /// completion call or backoff is pending.
    #[instrument(skip_all, fields(task = task.name(), provider = self.client.provider_name()))]
    pub async fn run<T: GenerationTask>(
        &self,
        task: &T,
        cancel: &CancellationToken,
    ) -> Result<WorkflowOutcome<T::Output>, WorkflowError> {
        let mut state = WorkflowState::default();
        let mut trace = WorkflowTrace::default();
        let mut step: Step<T::Output> = Step::Start;

        loop {
            match step {
                Step::Success(value) => {
                    debug!(attempts = state.attempts, "Workflow succeeded");
                    state.result = Some(value.clone());
                    return Ok(WorkflowOutcome {
                        value,
                        terminal: Terminal::Success,
                        attempts: state.attempts,
                        trace,
                    });
                }
                Step::Fallback(reason) => {
                    warn!(attempts = state.attempts, reason = %reason, "Workflow fell back");
                    return Ok(WorkflowOutcome {
                        value: task.fallback(),
                        terminal: Terminal::Fallback,
                        attempts: state.attempts,
                        trace,
                    });
                }
                current => {
                    let from = current.kind();
                    let next = self.advance(task, &mut state, current, cancel).await?;
                    trace.record(from, next.kind(), state.attempts, next.reason());
                    step = next;
                }
            }
        }
    }

    /// Apply one transition from `step`.
    ///
    /// Terminal steps are returned unchanged.
    pub async fn advance<T: GenerationTask>(
        &self,
        task: &T,
        state: &mut WorkflowState<T::Output>,
        step: Step<T::Output>,
        cancel: &CancellationToken,
    ) -> Result<Step<T::Output>, WorkflowError> {
        match step {
            Step::Start => {
                state.attempts += 1;
                Ok(Step::Generate)
            }
            Step::Generate => {
                let request = task.completion_request(state.feedback.as_deref());
                let result = tokio::select! {
                    biased;
                    _ = cancel.cancelled() => {
                        return Err(WorkflowError::new(WorkflowErrorKind::Cancelled(state.attempts)));
                    }
                    result = self.client.complete(&request) => result,
                };
                match result {
                    Ok(output) => {
                        state.last_raw = Some(output.raw().clone());
                        Ok(Step::Validate(output))
                    }
                    Err(error) if error.is_retryable() => Ok(Step::Retry(Failure::Completion(error))),
                    Err(error) => {
                        let reason = error.kind.to_string();
                        state.last_error = Some(reason.clone());
                        Ok(Step::Fallback(format!("permanent completion failure: {}", reason)))
                    }
                }
            }
            Step::Validate(output) => match task.validate(&output) {
                Ok(value) => Ok(Step::Success(value)),
                Err(error) => Ok(Step::Retry(Failure::Schema(error))),
            },
            Step::Retry(failure) => {
                let reason = failure.to_string();
                state.last_error = Some(reason.clone());
                if failure.is_malformed() {
                    state.malformed_attempts += 1;
                }

                if state.attempts >= *self.policy.max_attempts() {
                    let exhausted = WorkflowError::new(WorkflowErrorKind::ExhaustedRetries {
                        attempts: state.attempts,
                        last_error: reason,
                    });
                    return Ok(Step::Fallback(exhausted.kind.to_string()));
                }
                if state.malformed_attempts >= *self.policy.max_malformed_attempts() {
                    return Ok(Step::Fallback(format!(
                        "{} malformed output(s), last: {}",
                        state.malformed_attempts, reason
                    )));
                }

                let delay = self.policy.backoff(state.attempts, failure.retry_hint());
                debug!(delay_ms = delay.as_millis() as u64, attempt = state.attempts, "Backing off");
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => {
                        return Err(WorkflowError::new(WorkflowErrorKind::Cancelled(state.attempts)));
                    }
                    _ = tokio::time::sleep(delay) => {}
                }

                if failure.is_malformed() {
                    state.feedback = Some(reason);
                }
                state.attempts += 1;
                Ok(Step::Generate)
            }
            terminal @ (Step::Success(_) | Step::Fallback(_)) => Ok(terminal),
        }
    }
}
