//! Report stage: assembles the final plan.
//!
//! Every section is deterministic except the conclusion, which is asked
//! from the text-generation collaborator; if that call fails the fixed
//! template takes its place and the user never notices.

use std::sync::Arc;

use tracing::warn;

use crate::domain::report::composer;
use crate::domain::session::Session;
use crate::ports::TextGenerator;

use super::StageResponse;

/// Handler for the report stage.
pub struct ReportStage {
    generator: Arc<dyn TextGenerator>,
}

impl ReportStage {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    pub async fn handle(&self, session: &mut Session) -> StageResponse {
        let (Some(analysis), Some(calculations)) = (&session.analysis, &session.calculations)
        else {
            warn!("report invoked without calculation results");
            return StageResponse::incomplete(
                "The calculations have not finished yet. Please send another \
                 message so we can continue.",
                75,
            );
        };

        let conclusion = match calculations.best_overall() {
            Some(best) => {
                let prompt = composer::conclusion_prompt(&session.profile, best);
                match self.generator.complete(&prompt).await {
                    Ok(text) if !text.trim().is_empty() => text,
                    Ok(_) => composer::fallback_conclusion(&session.profile, best),
                    Err(e) => {
                        warn!(error = %e, "conclusion generation failed, using template");
                        composer::fallback_conclusion(&session.profile, best)
                    }
                }
            }
            None => composer::empty_conclusion().to_string(),
        };

        let report = composer::compose(&session.profile, analysis, calculations, &conclusion);

        StageResponse::complete(report, 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockTextGenerator;
    use crate::domain::analysis::{AnalysisResult, Technology, TechnologyScore};
    use crate::domain::economics::{CalculationResult, SystemCalculation, SystemKind};
    use crate::ports::CompletionError;
    use std::collections::BTreeMap;

    fn system(kind: SystemKind, payback: Option<f64>) -> SystemCalculation {
        SystemCalculation {
            technology: kind,
            size_descriptor: "3.5 kWp".to_string(),
            yearly_production: "3850 kWh".to_string(),
            installation_cost: 5250.0,
            yearly_savings: 596.75,
            payback_years: payback,
            roi_percent: payback.map(|_| 184.0),
            details: BTreeMap::new(),
        }
    }

    fn prepared_session() -> Session {
        let mut session = Session::new();
        session.profile.location.address = Some("Kosice".to_string());
        session.analysis = Some(AnalysisResult {
            solar: TechnologyScore::new(Technology::Solar, 90, "sunny"),
            wind: TechnologyScore::new(Technology::Wind, 30, "calm"),
            heat_pump: TechnologyScore::new(Technology::HeatPump, 85, "mild"),
            recommended: vec![Technology::Solar],
        });
        session.calculations = Some(CalculationResult {
            solar: Some(system(SystemKind::Solar, Some(8.8))),
            wind: None,
            heat_pump: None,
            combined: Some(system(SystemKind::Combined, Some(7.5))),
        });
        session
    }

    #[tokio::test]
    async fn report_uses_the_generated_conclusion() {
        let generator =
            Arc::new(MockTextGenerator::new().with_response("Go green, it pays off!"));
        let stage = ReportStage::new(generator);
        let mut session = prepared_session();

        let response = stage.handle(&mut session).await;

        assert!(response.is_complete);
        assert_eq!(response.progress, 100);
        assert!(response.message.contains("PERSONALIZED ENERGY PLAN"));
        assert!(response.message.contains("Go green, it pays off!"));
    }

    #[tokio::test]
    async fn collaborator_failure_substitutes_the_template() {
        let generator = Arc::new(
            MockTextGenerator::new().with_error(CompletionError::Timeout { timeout_secs: 10 }),
        );
        let stage = ReportStage::new(generator);
        let mut session = prepared_session();

        let response = stage.handle(&mut session).await;

        assert!(response.is_complete);
        // The deterministic template carries the same values the prompt had.
        assert!(response.message.contains("Start saving today!"));
        assert!(response.message.contains("Kosice"));
    }

    #[tokio::test]
    async fn blank_conclusion_also_substitutes_the_template() {
        let generator = Arc::new(MockTextGenerator::new().with_response("   "));
        let stage = ReportStage::new(generator);
        let mut session = prepared_session();

        let response = stage.handle(&mut session).await;

        assert!(response.message.contains("Start saving today!"));
    }

    #[tokio::test]
    async fn all_payback_undefined_still_produces_a_report() {
        let generator = Arc::new(MockTextGenerator::new());
        let stage = ReportStage::new(generator.clone());
        let mut session = prepared_session();
        session.calculations = Some(CalculationResult {
            solar: Some(system(SystemKind::Solar, None)),
            wind: None,
            heat_pump: None,
            combined: None,
        });

        let response = stage.handle(&mut session).await;

        assert!(response.is_complete);
        assert!(response.message.contains("not applicable"));
        // No best system, so the collaborator is never asked.
        assert_eq!(generator.call_count(), 0);
    }

    #[tokio::test]
    async fn missing_calculations_report_incomplete() {
        let generator = Arc::new(MockTextGenerator::new());
        let stage = ReportStage::new(generator);
        let mut session = Session::new();

        let response = stage.handle(&mut session).await;

        assert!(!response.is_complete);
        assert_eq!(response.progress, 75);
    }
}
