//! Calculation stage: economics for every recommended technology.

use tracing::warn;

use crate::domain::economics::{calculator, CalculationResult, SystemCalculation};
use crate::domain::session::Session;

use super::StageResponse;

/// Handler for the calculation stage. Fully deterministic; needs no user
/// input and no collaborators.
#[derive(Debug, Clone, Copy, Default)]
pub struct CalculationStage;

impl CalculationStage {
    pub fn new() -> Self {
        Self
    }

    pub fn handle(&self, session: &mut Session) -> StageResponse {
        let (Some(technical), Some(analysis)) = (&session.technical, &session.analysis) else {
            warn!("calculation invoked without analysis results");
            return StageResponse::incomplete(
                "The analysis has not finished yet. Please send another \
                 message so we can continue.",
                50,
            );
        };

        let result = calculator::calculate(&session.profile, technical, analysis);
        let message = calculation_message(&result);
        session.calculations = Some(result);

        StageResponse::complete(message, 75)
    }
}

/// The user-facing summary of the computed systems.
fn calculation_message(result: &CalculationResult) -> String {
    let mut message = String::from("💰 **Economic calculation:**\n\n");

    for system in result.single_systems() {
        message.push_str(&format_system(system));
    }

    if let Some(combined) = &result.combined {
        message.push_str("\n🎯 **RECOMMENDED COMBINATION:**\n");
        message.push_str(&format_system(combined));
    }

    if result.is_empty() {
        message.push_str(
            "No technology cleared the recommendation thresholds for your \
             property, so there is nothing to price yet.\n",
        );
    }

    message.push_str("\nI am preparing the final report with detailed recommendations...");
    message
}

fn format_system(calc: &SystemCalculation) -> String {
    format!(
        "\n**{}** ({})\n\
         • Investment: {:.0} €\n\
         • Yearly saving: {:.0} €\n\
         • Payback: {}\n\
         • ROI: {}\n",
        calc.technology,
        calc.size_descriptor,
        calc.installation_cost,
        calc.yearly_savings,
        calc.payback_text(),
        calc.roi_text(),
    )
}
