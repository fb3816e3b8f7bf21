//! Deterministic reference scoring.
//!
//! The score bands are fixed product rules, not tunables: solar is driven by
//! irradiation, roof and consumption; wind by mean speed and building type;
//! heat pumps start from a high base and adjust for climate and insulation.
//! `Excellent` insulation is treated as good-or-better wherever a band names
//! `good`.

use crate::domain::profile::{BuildingType, InsulationLevel, UserProfile};
use crate::domain::technical::TechnicalData;

use super::{AnalysisResult, Technology, TechnologyScore};

/// Scores all three technologies and selects the recommended subset.
pub fn analyze(profile: &UserProfile, technical: &TechnicalData) -> AnalysisResult {
    let solar = score_solar(profile, technical);
    let wind = score_wind(profile, technical);
    let heat_pump = score_heat_pump(profile, technical);
    let recommended = recommend(&solar, &wind, &heat_pump);

    AnalysisResult {
        solar,
        wind,
        heat_pump,
        recommended,
    }
}

/// Solar suitability: irradiation (0-40) + roof (0-30) + consumption (0-30).
pub fn score_solar(profile: &UserProfile, technical: &TechnicalData) -> TechnologyScore {
    let mut score = 0u32;
    let mut factors = Vec::new();

    let radiation = technical.solar.yearly_kwh_per_kwp;
    if radiation > 1100.0 {
        score += 40;
        factors.push(format!(
            "excellent solar irradiation ({:.0} kWh/kWp per year)",
            radiation
        ));
    } else if radiation > 950.0 {
        score += 30;
        factors.push(format!(
            "good solar irradiation ({:.0} kWh/kWp per year)",
            radiation
        ));
    } else if radiation > 850.0 {
        score += 20;
        factors.push(format!(
            "average solar irradiation ({:.0} kWh/kWp per year)",
            radiation
        ));
    } else {
        score += 10;
        factors.push(format!(
            "low solar irradiation ({:.0} kWh/kWp per year)",
            radiation
        ));
    }

    let roof_area = profile.roof.area_m2.unwrap_or(0.0);
    match profile.building.building_type {
        Some(BuildingType::FamilyHouse) if roof_area > 0.0 => {
            if roof_area >= 50.0 {
                score += 30;
                factors.push(format!("large usable roof area ({:.0} m²)", roof_area));
            } else if roof_area >= 30.0 {
                score += 20;
                factors.push(format!("sufficient roof area ({:.0} m²)", roof_area));
            } else {
                score += 10;
                factors.push(format!("small roof area ({:.0} m²)", roof_area));
            }
        }
        Some(BuildingType::Apartment) => {
            factors.push("apartment - limited mounting options".to_string());
        }
        _ => {}
    }

    let consumption = profile.consumption.electricity_kwh_year.unwrap_or(0.0);
    if consumption > 4000.0 {
        score += 30;
        factors.push("high consumption - fast payback for PV".to_string());
    } else if consumption > 2500.0 {
        score += 20;
        factors.push("medium consumption".to_string());
    } else {
        score += 10;
        factors.push("low consumption".to_string());
    }

    TechnologyScore::new(Technology::Solar, score, factors.join(", "))
}

/// Wind suitability: mean speed (0-50) + building type (0-30) + open
/// locality (0-20), capped at 100.
pub fn score_wind(profile: &UserProfile, technical: &TechnicalData) -> TechnologyScore {
    let mut score = 0u32;
    let mut factors = Vec::new();

    let speed = technical.wind.average_speed;
    if speed > 6.0 {
        score += 50;
        factors.push(format!("excellent wind ({:.1} m/s)", speed));
    } else if speed > 4.5 {
        score += 30;
        factors.push(format!("good wind ({:.1} m/s)", speed));
    } else if speed > 3.5 {
        score += 15;
        factors.push(format!("weak wind ({:.1} m/s)", speed));
    } else {
        factors.push(format!("insufficient wind ({:.1} m/s)", speed));
    }

    if profile.building.building_type == Some(BuildingType::FamilyHouse) {
        score += 30;
        factors.push("family house - turbine installation possible".to_string());
    } else {
        factors.push("apartment/building - difficult turbine installation".to_string());
    }

    // Open locality is estimated from the wind speed itself.
    if speed > 5.0 {
        score += 20;
        factors.push("open locality".to_string());
    }

    TechnologyScore::new(Technology::Wind, score, factors.join(", "))
}

/// Heat pump suitability: 60 base + climate (10-20) + insulation (0-20),
/// capped at 100.
pub fn score_heat_pump(profile: &UserProfile, technical: &TechnicalData) -> TechnologyScore {
    let mut score = 60u32;
    let mut factors = Vec::new();

    let avg_temp = technical.climate.year_average_temp;
    if avg_temp > 10.0 {
        score += 20;
        factors.push(format!("mild climate ({:.1} °C average)", avg_temp));
    } else if avg_temp > 7.0 {
        score += 15;
        factors.push(format!("cooler climate ({:.1} °C average)", avg_temp));
    } else {
        score += 10;
        factors.push(format!(
            "cold climate ({:.1} °C average) - reduced efficiency",
            avg_temp
        ));
    }

    match profile.building.insulation_level {
        Some(InsulationLevel::Good) | Some(InsulationLevel::Excellent) => {
            score += 20;
            factors.push("good insulation - ideal for a heat pump".to_string());
        }
        Some(InsulationLevel::Average) => {
            score += 10;
            factors.push("average insulation".to_string());
        }
        _ => {
            factors.push("poor insulation - insulate first".to_string());
        }
    }

    TechnologyScore::new(Technology::HeatPump, score, factors.join(", "))
}

/// Recommendation thresholds: solar ≥ 70, wind ≥ 60, heat pump ≥ 70.
///
/// When nothing clears its threshold, at most one fallback is added: solar
/// at ≥ 50, otherwise heat pump at ≥ 50. Wind is never a fallback pick.
pub fn recommend(
    solar: &TechnologyScore,
    wind: &TechnologyScore,
    heat_pump: &TechnologyScore,
) -> Vec<Technology> {
    let mut recommended = Vec::new();

    if solar.score >= 70 {
        recommended.push(Technology::Solar);
    }
    if wind.score >= 60 {
        recommended.push(Technology::Wind);
    }
    if heat_pump.score >= 70 {
        recommended.push(Technology::HeatPump);
    }

    if recommended.is_empty() {
        if solar.score >= 50 {
            recommended.push(Technology::Solar);
        } else if heat_pump.score >= 50 {
            recommended.push(Technology::HeatPump);
        }
    }

    recommended
}
