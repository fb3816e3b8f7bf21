//! Analysis result types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A renewable technology the advisor can recommend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Technology {
    Solar,
    Wind,
    HeatPump,
}

impl Technology {
    pub fn label(&self) -> &'static str {
        match self {
            Technology::Solar => "Solar PV",
            Technology::Wind => "Wind turbine",
            Technology::HeatPump => "Heat pump",
        }
    }
}

impl fmt::Display for Technology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Suitability score for one technology, 0-100, with reasoning text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnologyScore {
    pub technology: Technology,
    pub score: u8,
    pub reasoning: String,
}

impl TechnologyScore {
    /// Creates a score, clamping to the 0-100 scale.
    pub fn new(technology: Technology, score: u32, reasoning: impl Into<String>) -> Self {
        Self {
            technology,
            score: score.min(100) as u8,
            reasoning: reasoning.into(),
        }
    }
}

/// Scores for all three technologies plus the recommended subset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub solar: TechnologyScore,
    pub wind: TechnologyScore,
    pub heat_pump: TechnologyScore,
    pub recommended: Vec<Technology>,
}

impl AnalysisResult {
    pub fn score_for(&self, technology: Technology) -> &TechnologyScore {
        match technology {
            Technology::Solar => &self.solar,
            Technology::Wind => &self.wind,
            Technology::HeatPump => &self.heat_pump,
        }
    }

    pub fn recommends(&self, technology: Technology) -> bool {
        self.recommended.contains(&technology)
    }
}
