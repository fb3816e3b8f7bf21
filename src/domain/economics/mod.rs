//! Sizing, cost, savings, payback and ROI for the recommended technologies.

pub mod calculator;
mod result;

pub use result::{CalculationResult, SystemCalculation, SystemKind};
