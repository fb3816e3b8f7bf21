//! Mock text generator for testing.
//!
//! Queue-configurable implementation of the `TextGenerator` port so tests
//! run without a real model.
//!
//! # Example
//!
//! ```ignore
//! let generator = MockTextGenerator::new()
//!     .with_response(r#"{"address": "Kosice"}"#)
//!     .with_error(CompletionError::network("down"));
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::ports::{CompletionError, TextGenerator};

/// Mock text generator. Responses are consumed in queue order; an empty
/// queue behaves like a network failure, which callers treat as a
/// degraded collaborator.
#[derive(Debug, Clone, Default)]
pub struct MockTextGenerator {
    responses: Arc<Mutex<VecDeque<Result<String, CompletionError>>>>,
    /// Prompts seen, for verification.
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockTextGenerator {
    /// Creates a mock with an empty response queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful response.
    pub fn with_response(self, content: impl Into<String>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(content.into()));
        self
    }

    /// Queues an error.
    pub fn with_error(self, error: CompletionError) -> Self {
        self.responses.lock().unwrap().push_back(Err(error));
        self
    }

    /// Prompts the mock has been called with, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of calls made.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn next(&self, prompt: &str) -> Result<String, CompletionError> {
        self.calls.lock().unwrap().push(prompt.to_string());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(CompletionError::network("mock: no scripted response")))
    }
}

#[async_trait]
impl TextGenerator for MockTextGenerator {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        self.next(prompt)
    }

    async fn respond(
        &self,
        _system: &str,
        user: &str,
        _model: Option<&str>,
    ) -> Result<String, CompletionError> {
        self.next(user)
    }
}
