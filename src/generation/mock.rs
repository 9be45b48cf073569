/*!
 * Mock text generator for tests and offline runs.
 *
 * The mock simulates the behaviours the analysis engine must survive:
 * - `MockGenerator::working()` - Returns canned responses per schema
 * - `MockGenerator::failing()` - Always fails with an error
 * - `MockGenerator::slow(ms)` - Answers only after a delay (timeout testing)
 * - `MockGenerator::malformed()` - Returns output that violates the schema
 * - `MockGenerator::intermittent(n)` - Fails every nth request
 */

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::errors::ProviderError;
use crate::generation::{GenerationRequest, TextGenerator};

/// Behavior mode for the mock generator
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds with the canned response
    Working,
    /// Always fails with an API error
    Failing,
    /// Succeeds after a delay
    Slow { delay_ms: u64 },
    /// Returns JSON that does not match the requested schema
    Malformed,
    /// Fails every nth request
    Intermittent { fail_every: usize },
}

/// Builds a response from the request
pub type Responder = fn(&GenerationRequest) -> Value;

/// Deterministic stand-in for a real provider
#[derive(Debug, Clone)]
pub struct MockGenerator {
    behavior: MockBehavior,
    responses: HashMap<String, Value>,
    responder: Option<Responder>,
    request_count: Arc<AtomicUsize>,
    requests: Arc<Mutex<Vec<GenerationRequest>>>,
}

impl MockGenerator {
    /// Create a mock with the given behavior and no canned responses
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            responses: HashMap::new(),
            responder: None,
            request_count: Arc::new(AtomicUsize::new(0)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a mock that always succeeds
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create a mock that always fails
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create a mock that answers after `delay_ms`
    pub fn slow(delay_ms: u64) -> Self {
        Self::new(MockBehavior::Slow { delay_ms })
    }

    /// Create a mock whose output never matches the schema
    pub fn malformed() -> Self {
        Self::new(MockBehavior::Malformed)
    }

    /// Create a mock that fails every `fail_every` requests
    pub fn intermittent(fail_every: usize) -> Self {
        Self::new(MockBehavior::Intermittent { fail_every })
    }

    /// Set the canned response for a schema name
    pub fn with_response(mut self, schema_name: impl Into<String>, response: Value) -> Self {
        self.responses.insert(schema_name.into(), response);
        self
    }

    /// Compute responses from the request instead of using canned ones
    pub fn with_responder(mut self, responder: Responder) -> Self {
        self.responder = Some(responder);
        self
    }

    /// Number of requests received so far
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Requests received so far, in arrival order
    pub fn recorded_requests(&self) -> Vec<GenerationRequest> {
        match self.requests.lock() {
            Ok(requests) => requests.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn respond(&self, request: &GenerationRequest) -> Result<Value, ProviderError> {
        let response = match self.responder {
            Some(responder) => responder(request),
            None => self
                .responses
                .get(&request.schema.name)
                .cloned()
                .ok_or_else(|| {
                    ProviderError::RequestFailed(format!(
                        "no canned response for schema '{}'",
                        request.schema.name
                    ))
                })?,
        };
        request.schema.validate(&response)?;
        Ok(response)
    }
}

#[async_trait]
impl TextGenerator for MockGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<Value, ProviderError> {
        let count = self.request_count.fetch_add(1, Ordering::SeqCst);
        match self.requests.lock() {
            Ok(mut requests) => requests.push(request.clone()),
            Err(poisoned) => poisoned.into_inner().push(request.clone()),
        }

        match self.behavior {
            MockBehavior::Working => self.respond(request),

            MockBehavior::Failing => Err(ProviderError::ApiError {
                status_code: 500,
                message: "Mock provider failure".to_string(),
            }),

            MockBehavior::Slow { delay_ms } => {
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                self.respond(request)
            }

            MockBehavior::Malformed => {
                let garbage = json!({"unexpected": "shape"});
                request.schema.validate(&garbage)?;
                Ok(garbage)
            }

            MockBehavior::Intermittent { fail_every } => {
                if fail_every > 0 && count % fail_every == fail_every - 1 {
                    Err(ProviderError::ConnectionError(format!(
                        "Mock intermittent failure on request {}",
                        count + 1
                    )))
                } else {
                    self.respond(request)
                }
            }
        }
    }

    fn describe(&self) -> String {
        format!("mock/{:?}", self.behavior)
    }
}
