//! AI-delegated scoring strategy.
//!
//! The same score bands as the deterministic formulas, communicated as
//! instructions to the text-generation collaborator, which returns one
//! {score, reasoning} object per technology. The recommendation thresholds
//! stay in domain code so the two strategies can never diverge on them.

use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;

use crate::domain::analysis::{scoring, AnalysisResult, Technology, TechnologyScore};
use crate::domain::profile::UserProfile;
use crate::domain::technical::TechnicalData;
use crate::ports::{ScoringError, ScoringStrategy, TextGenerator};

const SCORING_SYSTEM: &str =
    "You are a strict renewable-energy scoring assistant. Respond ONLY with valid JSON.";

/// Scoring delegated to the text-generation collaborator.
pub struct AiDelegatedScoring {
    generator: Arc<dyn TextGenerator>,
}

impl AiDelegatedScoring {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    fn prompt(profile: &UserProfile, technical: &TechnicalData) -> String {
        format!(
            "Score the suitability of three renewable technologies for this \
             property on a 0-100 scale.\n\n\
             Profile: {}\n\
             Technical data: {}\n\n\
             Apply these bands:\n\
             - solar: irradiation >1100 kWh/kWp -> 40, >950 -> 30, >850 -> 20, else 10; \
             roof (family house only): >=50 m² -> 30, >=30 m² -> 20, >0 -> 10; \
             consumption: >4000 kWh -> 30, >2500 -> 20, else 10.\n\
             - wind: speed >6 m/s -> 50, >4.5 -> 30, >3.5 -> 15, else 0; \
             family house -> 30; speed >5 m/s -> 20 extra. Cap at 100.\n\
             - heat_pump: 60 base; avg temp >10 °C -> 20, >7 -> 15, else 10; \
             insulation good -> 20, average -> 10, else 0. Cap at 100.\n\n\
             Respond with a single JSON object exactly of the form \
             {{\"solar\": {{\"score\": N, \"reasoning\": \"...\"}}, \
             \"wind\": {{\"score\": N, \"reasoning\": \"...\"}}, \
             \"heat_pump\": {{\"score\": N, \"reasoning\": \"...\"}}}} \
             with no extra text.",
            serde_json::to_string(profile).unwrap_or_default(),
            serde_json::to_string(technical).unwrap_or_default(),
        )
    }

    fn parse(raw: &str) -> Result<AnalysisResult, ScoringError> {
        let scores: WireScores = serde_json::from_str(raw.trim())
            .map_err(|e| ScoringError::MalformedOutput(e.to_string()))?;

        let solar = scores.solar.into_score(Technology::Solar);
        let wind = scores.wind.into_score(Technology::Wind);
        let heat_pump = scores.heat_pump.into_score(Technology::HeatPump);
        let recommended = scoring::recommend(&solar, &wind, &heat_pump);

        Ok(AnalysisResult {
            solar,
            wind,
            heat_pump,
            recommended,
        })
    }
}

#[derive(Debug, Deserialize)]
struct WireScores {
    solar: WireScore,
    wind: WireScore,
    heat_pump: WireScore,
}

#[derive(Debug, Deserialize)]
struct WireScore {
    score: f64,
    reasoning: String,
}

impl WireScore {
    fn into_score(self, technology: Technology) -> TechnologyScore {
        TechnologyScore::new(technology, self.score.clamp(0.0, 100.0) as u32, self.reasoning)
    }
}

#[async_trait]
impl ScoringStrategy for AiDelegatedScoring {
    async fn score(
        &self,
        profile: &UserProfile,
        technical: &TechnicalData,
    ) -> Result<AnalysisResult, ScoringError> {
        let prompt = Self::prompt(profile, technical);
        let raw = self
            .generator
            .respond(SCORING_SYSTEM, &prompt, None)
            .await?;
        Self::parse(&raw)
    }
}
