//! Technology suitability analysis: scores, reasoning, recommendations.

mod result;
pub mod scoring;

pub use result::{AnalysisResult, Technology, TechnologyScore};
