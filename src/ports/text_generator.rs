//! Text-generation collaborator port.
//!
//! Every failure mode is a typed error, never a sentinel string in the
//! returned text; callers decide whether to degrade or surface.

use async_trait::async_trait;
use thiserror::Error;

/// Port for the text-generation collaborator.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// One-shot completion of a bare user prompt.
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError>;

    /// Completion with an explicit system message and optional model
    /// override.
    async fn respond(
        &self,
        system: &str,
        user: &str,
        model: Option<&str>,
    ) -> Result<String, CompletionError>;
}

/// Text-generation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompletionError {
    /// Request never reached the provider or the connection dropped.
    #[error("network failure: {0}")]
    Network(String),

    /// Provider answered with a non-success status.
    #[error("API failure: status {status}: {body}")]
    Api { status: u16, body: String },

    /// Provider response could not be decoded.
    #[error("parse failure: {0}")]
    Parse(String),

    /// Provider response decoded but did not match the expected shape.
    #[error("invalid response schema: {0}")]
    InvalidSchema(String),

    /// Bounded per-call timeout elapsed.
    #[error("request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },
}

impl CompletionError {
    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Creates an invalid schema error.
    pub fn invalid_schema(message: impl Into<String>) -> Self {
        Self::InvalidSchema(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_display_their_kind() {
        assert_eq!(
            CompletionError::network("refused").to_string(),
            "network failure: refused"
        );
        assert_eq!(
            CompletionError::Api {
                status: 429,
                body: "rate limited".to_string()
            }
            .to_string(),
            "API failure: status 429: rate limited"
        );
        assert_eq!(
            CompletionError::Timeout { timeout_secs: 10 }.to_string(),
            "request timed out after 10s"
        );
    }
}
