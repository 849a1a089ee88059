//! Scripted completion client for testing.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use wayfarer_core::{CompletionOutput, CompletionRequest};
use wayfarer_error::{CompletionError, CompletionErrorKind};
use wayfarer_interface::CompletionClient;
use wayfarer_models::shape_output;

/// A single scripted response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Raw completion text, shaped like a real provider's output
    Text(String),
    /// Fail with the given kind
    Error(CompletionErrorKind),
    /// Never answer
    Hang,
}

/// Behavior configuration for scripted responses.
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Return the same response on every call
    Always(MockResponse),
    /// Return responses in order; calls past the end fail as upstream errors
    Sequence(Vec<MockResponse>),
}

/// Completion client that plays back a script.
///
/// Records every prompt it receives so tests can check retry steering.
pub struct ScriptedCompletionClient {
    behavior: MockBehavior,
    call_count: Arc<Mutex<usize>>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl ScriptedCompletionClient {
    /// Client that always returns `text`.
    #[allow(dead_code)]
    pub fn always_text(text: impl Into<String>) -> Self {
        Self::new_with_behavior(MockBehavior::Always(MockResponse::Text(text.into())))
    }

    /// Client that always fails with `kind`.
    #[allow(dead_code)]
    pub fn always_error(kind: CompletionErrorKind) -> Self {
        Self::new_with_behavior(MockBehavior::Always(MockResponse::Error(kind)))
    }

    /// Client that plays `responses` in order.
    #[allow(dead_code)]
    pub fn new_sequence(responses: Vec<MockResponse>) -> Self {
        Self::new_with_behavior(MockBehavior::Sequence(responses))
    }

    /// Client with custom behavior.
    pub fn new_with_behavior(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            call_count: Arc::new(Mutex::new(0)),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Get the number of times complete() was called.
    #[allow(dead_code)]
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    /// Prompts received, in call order.
    #[allow(dead_code)]
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    fn next_response(&self, request: &CompletionRequest) -> MockResponse {
        self.prompts.lock().unwrap().push(request.prompt().clone());
        let mut count = self.call_count.lock().unwrap();
        let current = *count;
        *count += 1;

        match &self.behavior {
            MockBehavior::Always(response) => response.clone(),
            MockBehavior::Sequence(responses) => {
                responses.get(current).cloned().unwrap_or_else(|| {
                    MockResponse::Error(CompletionErrorKind::Upstream {
                        status: None,
                        message: format!(
                            "Mock sequence exhausted (call {} beyond {} responses)",
                            current + 1,
                            responses.len()
                        ),
                    })
                })
            }
        }
    }
}

#[async_trait]
impl CompletionClient for ScriptedCompletionClient {
    async fn complete(&self, req: &CompletionRequest) -> Result<CompletionOutput, CompletionError> {
        match self.next_response(req) {
            MockResponse::Text(text) => shape_output(&text, *req.shape()),
            MockResponse::Error(kind) => Err(CompletionError::new(kind)),
            MockResponse::Hang => {
                tokio::time::sleep(Duration::from_secs(24 * 60 * 60)).await;
                Err(CompletionError::new(CompletionErrorKind::Timeout))
            }
        }
    }

    fn provider_name(&self) -> &'static str {
        "scripted"
    }

    fn model_name(&self) -> &str {
        "scripted-model"
    }
}
