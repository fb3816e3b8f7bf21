//! Deterministic scoring strategy: the reference formulas, no I/O.

use async_trait::async_trait;

use crate::domain::analysis::scoring;
use crate::domain::analysis::AnalysisResult;
use crate::domain::profile::UserProfile;
use crate::domain::technical::TechnicalData;
use crate::ports::{ScoringError, ScoringStrategy};

/// The reference scoring: pure functions over profile and technical data.
/// Never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeterministicScoring;

impl DeterministicScoring {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ScoringStrategy for DeterministicScoring {
    async fn score(
        &self,
        profile: &UserProfile,
        technical: &TechnicalData,
    ) -> Result<AnalysisResult, ScoringError> {
        Ok(scoring::analyze(profile, technical))
    }
}
