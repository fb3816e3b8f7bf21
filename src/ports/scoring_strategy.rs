//! Scoring strategy port.
//!
//! Two variants exist: the deterministic reference formulas and an
//! AI-delegated mode that asks the text-generation collaborator to score
//! within the same bands. Which one runs is chosen by configuration, never
//! by code duplication.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::analysis::AnalysisResult;
use crate::domain::profile::UserProfile;
use crate::domain::technical::TechnicalData;

use super::CompletionError;

/// Scoring failures. Only the AI-delegated strategy can fail; the analysis
/// stage degrades these to an incomplete response with a diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoringError {
    /// The scoring model returned something that is not three scores.
    #[error("scoring model returned malformed output: {0}")]
    MalformedOutput(String),

    /// The collaborator call itself failed.
    #[error("scoring model call failed: {0}")]
    Provider(#[from] CompletionError),
}

/// Port for technology suitability scoring.
#[async_trait]
pub trait ScoringStrategy: Send + Sync {
    async fn score(
        &self,
        profile: &UserProfile,
        technical: &TechnicalData,
    ) -> Result<AnalysisResult, ScoringError>;
}
