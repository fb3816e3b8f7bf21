//! Economic calculation result types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// The system a calculation describes: one of the three technologies or the
/// combined bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SystemKind {
    Solar,
    Wind,
    HeatPump,
    Combined,
}

impl SystemKind {
    pub fn label(&self) -> &'static str {
        match self {
            SystemKind::Solar => "Solar PV",
            SystemKind::Wind => "Wind turbine",
            SystemKind::HeatPump => "Heat pump",
            SystemKind::Combined => "Combined system",
        }
    }
}

impl fmt::Display for SystemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Economics of one system.
///
/// `payback_years` and `roi_percent` are `None` when yearly savings are zero
/// or negative; that case renders as "not applicable" rather than surfacing
/// an infinite or NaN value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemCalculation {
    pub technology: SystemKind,
    pub size_descriptor: String,
    pub yearly_production: String,
    pub installation_cost: f64,
    pub yearly_savings: f64,
    pub payback_years: Option<f64>,
    pub roi_percent: Option<f64>,
    pub details: BTreeMap<String, String>,
}

impl SystemCalculation {
    /// Payback formatted for the user, "8.8 years" or "not applicable".
    pub fn payback_text(&self) -> String {
        match self.payback_years {
            Some(years) => format!("{:.1} years", years),
            None => "not applicable".to_string(),
        }
    }

    /// ROI formatted for the user, "184%" or "not applicable".
    pub fn roi_text(&self) -> String {
        match self.roi_percent {
            Some(roi) => format!("{:.0}%", roi),
            None => "not applicable".to_string(),
        }
    }
}

/// Calculations for every recommended technology plus the optional combined
/// system. The combined system exists only when at least one single-system
/// calculation exists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub solar: Option<SystemCalculation>,
    pub wind: Option<SystemCalculation>,
    pub heat_pump: Option<SystemCalculation>,
    pub combined: Option<SystemCalculation>,
}

impl CalculationResult {
    /// Single-technology systems in computation order (solar, wind,
    /// heat pump). The order is the tie-break for best-system selection.
    pub fn single_systems(&self) -> Vec<&SystemCalculation> {
        [&self.solar, &self.wind, &self.heat_pump]
            .into_iter()
            .flatten()
            .collect()
    }

    /// The single system with the lowest defined payback; ties keep the
    /// first-computed system. Systems with undefined payback never win.
    pub fn best_single(&self) -> Option<&SystemCalculation> {
        self.single_systems()
            .into_iter()
            .filter(|s| s.payback_years.is_some())
            .min_by(|a, b| {
                a.payback_years
                    .partial_cmp(&b.payback_years)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
    }

    /// The system the report leads with: the combined system when its
    /// payback is under 10 years, otherwise the best single system.
    pub fn best_overall(&self) -> Option<&SystemCalculation> {
        if let Some(combined) = &self.combined {
            if matches!(combined.payback_years, Some(p) if p < 10.0) {
                return Some(combined);
            }
        }
        self.best_single()
    }

    pub fn is_empty(&self) -> bool {
        self.single_systems().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn system(kind: SystemKind, payback: Option<f64>) -> SystemCalculation {
        SystemCalculation {
            technology: kind,
            size_descriptor: "test".to_string(),
            yearly_production: "test".to_string(),
            installation_cost: 1000.0,
            yearly_savings: 100.0,
            payback_years: payback,
            roi_percent: payback.map(|_| 50.0),
            details: BTreeMap::new(),
        }
    }

    #[test]
    fn undefined_payback_renders_not_applicable() {
        let calc = system(SystemKind::Wind, None);
        assert_eq!(calc.payback_text(), "not applicable");
        assert_eq!(calc.roi_text(), "not applicable");
    }

    #[test]
    fn best_single_picks_lowest_payback() {
        let result = CalculationResult {
            solar: Some(system(SystemKind::Solar, Some(9.0))),
            wind: Some(system(SystemKind::Wind, Some(14.0))),
            heat_pump: Some(system(SystemKind::HeatPump, Some(6.5))),
            combined: None,
        };
        assert_eq!(
            result.best_single().unwrap().technology,
            SystemKind::HeatPump
        );
    }

    #[test]
    fn best_single_ties_keep_computation_order() {
        let result = CalculationResult {
            solar: Some(system(SystemKind::Solar, Some(8.0))),
            wind: None,
            heat_pump: Some(system(SystemKind::HeatPump, Some(8.0))),
            combined: None,
        };
        assert_eq!(result.best_single().unwrap().technology, SystemKind::Solar);
    }

    #[test]
    fn systems_without_payback_never_win() {
        let result = CalculationResult {
            solar: Some(system(SystemKind::Solar, None)),
            wind: Some(system(SystemKind::Wind, Some(12.0))),
            heat_pump: None,
            combined: None,
        };
        assert_eq!(result.best_single().unwrap().technology, SystemKind::Wind);

        let all_undefined = CalculationResult {
            solar: Some(system(SystemKind::Solar, None)),
            wind: None,
            heat_pump: None,
            combined: None,
        };
        assert!(all_undefined.best_single().is_none());
    }

    #[test]
    fn combined_wins_only_under_ten_year_payback() {
        let mut result = CalculationResult {
            solar: Some(system(SystemKind::Solar, Some(9.0))),
            wind: None,
            heat_pump: None,
            combined: Some(system(SystemKind::Combined, Some(7.0))),
        };
        assert_eq!(
            result.best_overall().unwrap().technology,
            SystemKind::Combined
        );

        result.combined = Some(system(SystemKind::Combined, Some(12.0)));
        assert_eq!(result.best_overall().unwrap().technology, SystemKind::Solar);
    }
}
