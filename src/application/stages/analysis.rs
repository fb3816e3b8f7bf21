//! Analysis stage: scores the three technologies and picks recommendations.

use std::sync::Arc;

use tracing::warn;

use crate::domain::analysis::AnalysisResult;
use crate::domain::session::Session;
use crate::ports::ScoringStrategy;

use super::StageResponse;

/// Handler for the analysis stage. Scoring is pluggable: the deterministic
/// reference formulas or the AI-delegated variant, chosen by configuration.
pub struct AnalysisStage {
    strategy: Arc<dyn ScoringStrategy>,
}

impl AnalysisStage {
    pub fn new(strategy: Arc<dyn ScoringStrategy>) -> Self {
        Self { strategy }
    }

    /// Scores the session's profile. Needs no user input; runs as part of
    /// the auto-advance chain.
    pub async fn handle(&self, session: &mut Session) -> StageResponse {
        let Some(technical) = session.technical.clone() else {
            // Unreachable through the orchestrator, but the handler stays
            // total: report incomplete instead of panicking.
            warn!("analysis invoked without technical data");
            return StageResponse::incomplete(
                "I am still missing some technical data about your location. \
                 Please send another message so we can continue.",
                session.profile.collection_progress(),
            );
        };

        let result = match self.strategy.score(&session.profile, &technical).await {
            Ok(result) => result,
            Err(e) => {
                warn!(error = %e, "scoring failed");
                return StageResponse::incomplete(
                    "I could not score the technology options this time. \
                     Please send any message and I will retry the analysis.",
                    25,
                );
            }
        };

        let message = analysis_message(session, &result);
        session.analysis = Some(result);

        StageResponse::complete(message, 50)
    }
}

/// The user-facing summary of the three scores.
fn analysis_message(session: &Session, result: &AnalysisResult) -> String {
    format!(
        "📊 **Analysis complete!**\n\n\
         Based on your location ({}) and the technical data:\n\n\
         ☀️ **Solar potential: {}/100**\n{}\n\n\
         💨 **Wind potential: {}/100**\n{}\n\n\
         🔥 **Heat pump: {}/100**\n{}\n\n\
         I am now calculating the optimal setup for your home...",
        session
            .profile
            .location
            .address
            .as_deref()
            .unwrap_or("your location"),
        result.solar.score,
        result.solar.reasoning,
        result.wind.score,
        result.wind.reasoning,
        result.heat_pump.score,
        result.heat_pump.reasoning,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockTextGenerator;
    use crate::adapters::scoring::{AiDelegatedScoring, DeterministicScoring};
    use crate::domain::profile::{Building, BuildingType, Consumption, InsulationLevel, Roof};
    use crate::domain::technical::TechnicalData;

    fn session_with_data() -> Session {
        let mut session = Session::new();
        session.profile.location.address = Some("Kosice".to_string());
        session.profile.building = Building {
            building_type: Some(BuildingType::FamilyHouse),
            heated_area_m2: Some(120.0),
            insulation_level: Some(InsulationLevel::Good),
        };
        session.profile.consumption = Consumption {
            electricity_kwh_year: Some(4500.0),
            heating_fuel: None,
        };
        session.profile.roof = Roof { area_m2: Some(60.0) };
        session.attach_technical(TechnicalData::fallback());
        session
    }

    #[tokio::test]
    async fn deterministic_analysis_completes_with_scores() {
        let stage = AnalysisStage::new(Arc::new(DeterministicScoring::new()));
        let mut session = session_with_data();

        let response = stage.handle(&mut session).await;

        assert!(response.is_complete);
        assert_eq!(response.progress, 50);
        assert!(response.message.contains("Solar potential"));
        assert!(response.message.contains("Kosice"));

        let analysis = session.analysis.unwrap();
        assert!(!analysis.recommended.is_empty());
    }

    #[tokio::test]
    async fn missing_technical_data_reports_incomplete() {
        let stage = AnalysisStage::new(Arc::new(DeterministicScoring::new()));
        let mut session = Session::new();

        let response = stage.handle(&mut session).await;

        assert!(!response.is_complete);
        assert!(session.analysis.is_none());
    }

    #[tokio::test]
    async fn malformed_ai_scoring_degrades_to_incomplete_diagnostic() {
        let generator = Arc::new(MockTextGenerator::new().with_response("not json at all"));
        let stage = AnalysisStage::new(Arc::new(AiDelegatedScoring::new(generator)));
        let mut session = session_with_data();

        let response = stage.handle(&mut session).await;

        assert!(!response.is_complete);
        assert!(response.message.contains("retry"));
        assert!(session.analysis.is_none());
    }
}
