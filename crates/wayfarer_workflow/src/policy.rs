//! Attempt budgets and backoff.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Retry budget and backoff schedule for one workflow run.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use wayfarer_workflow::RetryPolicy;
///
/// let policy = RetryPolicy::default().with_jitter(false);
/// assert_eq!(policy.backoff(1, None), Duration::from_millis(500));
/// assert_eq!(policy.backoff(2, None), Duration::from_millis(1000));
/// assert_eq!(policy.backoff(10, None), Duration::from_millis(8000));
/// ```
#[derive(
    Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, derive_setters::Setters, derive_builder::Builder,
)]
#[setters(prefix = "with_")]
#[builder(default)]
pub struct RetryPolicy {
    /// Maximum completion calls per run
    #[serde(default = "default_max_attempts")]
    max_attempts: u32,

    /// Malformed or schema-violating outputs tolerated before falling back
    #[serde(default = "default_max_malformed_attempts")]
    max_malformed_attempts: u32,

    /// Delay before the first retry (milliseconds)
    #[serde(default = "default_backoff_base_ms")]
    backoff_base_ms: u64,

    /// Upper bound on any single delay (milliseconds)
    #[serde(default = "default_backoff_cap_ms")]
    backoff_cap_ms: u64,

    /// Randomize each delay within `[0, delay]`
    #[serde(default = "default_jitter")]
    jitter: bool,
}

fn default_max_attempts() -> u32 {
    3
}

fn default_max_malformed_attempts() -> u32 {
    2
}

fn default_backoff_base_ms() -> u64 {
    500
}

fn default_backoff_cap_ms() -> u64 {
    8000
}

fn default_jitter() -> bool {
    true
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            max_malformed_attempts: default_max_malformed_attempts(),
            backoff_base_ms: default_backoff_base_ms(),
            backoff_cap_ms: default_backoff_cap_ms(),
            jitter: default_jitter(),
        }
    }
}

impl RetryPolicy {
    /// Start building a retry policy.
    pub fn builder() -> RetryPolicyBuilder {
        RetryPolicyBuilder::default()
    }

    /// Delay before the attempt following attempt number `attempts`.
    ///
    /// `min(base * 2^(attempts - 1), cap)`. A server `hint` raises the delay
    /// but never past the cap. Jitter, when enabled, applies to the computed
    /// delay only; a hint is always honoured in full.
    pub fn backoff(&self, attempts: u32, hint: Option<Duration>) -> Duration {
        let cap = Duration::from_millis(self.backoff_cap_ms);
        let exponent = attempts.saturating_sub(1).min(31);
        let computed = Duration::from_millis(
            self.backoff_base_ms
                .saturating_mul(1u64 << exponent)
                .min(self.backoff_cap_ms),
        );
        let computed = if self.jitter {
            tokio_retry2::strategy::jitter(computed)
        } else {
            computed
        };
        match hint {
            Some(hint) => computed.max(hint).min(cap),
            None => computed,
        }
    }
}
