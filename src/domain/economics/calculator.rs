//! Deterministic economic calculations per technology.
//!
//! Tariffs and unit costs are the fixed product assumptions: 1500 €/kWp
//! installed PV, 0.20 €/kWh avoided grid purchase, 0.05 €/kWh feed-in,
//! 15 000 € for a 5 kW turbine at 0.18 €/kWh, 2500 €/kW heat pump capacity,
//! and fuel tariffs of 0.08/0.18/0.05 €/kWh for gas/electricity/wood with
//! 0.10 €/kWh as the default.

use std::collections::BTreeMap;

use crate::domain::analysis::{AnalysisResult, Technology};
use crate::domain::profile::{HeatingFuel, InsulationLevel, UserProfile};
use crate::domain::technical::TechnicalData;

use super::{CalculationResult, SystemCalculation, SystemKind};

/// Computes economics for every recommended technology, plus the combined
/// system when solar or a heat pump is in the mix.
pub fn calculate(
    profile: &UserProfile,
    technical: &TechnicalData,
    analysis: &AnalysisResult,
) -> CalculationResult {
    let mut result = CalculationResult::default();

    if analysis.recommends(Technology::Solar) {
        result.solar = Some(calculate_solar(profile, technical));
    }
    if analysis.recommends(Technology::Wind) {
        result.wind = Some(calculate_wind(technical));
    }
    if analysis.recommends(Technology::HeatPump) {
        result.heat_pump = Some(calculate_heat_pump(profile, technical));
    }

    result.combined = calculate_combined(result.solar.as_ref(), result.heat_pump.as_ref());

    result
}

/// Photovoltaic system sized to consumption, limited by usable roof area.
pub fn calculate_solar(profile: &UserProfile, technical: &TechnicalData) -> SystemCalculation {
    let roof_area = profile.roof.area_m2.unwrap_or(50.0);
    let consumption = profile.consumption.electricity_kwh_year.unwrap_or(3500.0);

    // 2 m² per panel, 70% of the roof usable, 400 Wp panels.
    let roof_limit_kwp = roof_area * 0.7 / 2.0 * 0.4;
    let optimal_kwp = (consumption / 1000.0).min(roof_limit_kwp);
    let panels = (optimal_kwp / 0.4).floor() as u32;

    let yearly_production = optimal_kwp * technical.solar.yearly_kwh_per_kwp;
    let installation_cost = optimal_kwp * 1500.0;

    let self_consumption = (yearly_production * 0.7).min(consumption);
    let grid_export = yearly_production - self_consumption;
    let yearly_savings = self_consumption * 0.20 + grid_export * 0.05;

    let (payback_years, roi_percent) = payback_and_roi(installation_cost, yearly_savings, 25.0);

    let mut details = BTreeMap::new();
    details.insert(
        "Self-consumption".to_string(),
        format!("{:.0} kWh/year", self_consumption),
    );
    details.insert(
        "Grid export".to_string(),
        format!("{:.0} kWh/year", grid_export),
    );
    details.insert(
        "Consumption coverage".to_string(),
        format!("{:.0}%", self_consumption / consumption * 100.0),
    );
    details.insert("Panels".to_string(), format!("{} × 400 Wp", panels));

    SystemCalculation {
        technology: SystemKind::Solar,
        size_descriptor: format!("{:.1} kWp", optimal_kwp),
        yearly_production: format!("{:.0} kWh", yearly_production),
        installation_cost,
        yearly_savings,
        payback_years,
        roi_percent,
        details,
    }
}

/// Fixed 5 kW small turbine; output scales with the capacity factor
/// implied by the mean wind speed.
pub fn calculate_wind(technical: &TechnicalData) -> SystemCalculation {
    let speed = technical.wind.average_speed;

    let capacity_factor = if speed > 6.0 {
        0.30
    } else if speed > 5.0 {
        0.20
    } else if speed > 4.0 {
        0.15
    } else {
        0.10
    };

    let yearly_production = 5.0 * 8760.0 * capacity_factor;
    let installation_cost = 15_000.0;
    let yearly_savings = yearly_production * 0.18;

    let (payback_years, roi_percent) = payback_and_roi(installation_cost, yearly_savings, 20.0);

    let mut details = BTreeMap::new();
    details.insert(
        "Average wind speed".to_string(),
        format!("{:.1} m/s", speed),
    );
    details.insert(
        "Capacity factor".to_string(),
        format!("{:.0}%", capacity_factor * 100.0),
    );
    details.insert(
        "Yearly production".to_string(),
        format!("{:.0} kWh", yearly_production),
    );

    SystemCalculation {
        technology: SystemKind::Wind,
        size_descriptor: "5 kW".to_string(),
        yearly_production: format!("{:.0} kWh", yearly_production),
        installation_cost,
        yearly_savings,
        payback_years,
        roi_percent,
        details,
    }
}

/// Heat pump sized from the heating demand; savings compare the current
/// fuel bill against heat pump electricity at the assumed COP.
pub fn calculate_heat_pump(profile: &UserProfile, technical: &TechnicalData) -> SystemCalculation {
    let heated_area = profile.building.heated_area_m2.unwrap_or(150.0);
    let heating_demand = heated_area * specific_demand(profile.building.insulation_level);

    // Roughly 2000 full-load heating hours per year.
    let size_kw = heating_demand / 2000.0;

    let cop = if technical.climate.year_average_temp > 8.0 {
        3.5
    } else {
        3.0
    };

    let current_cost = heating_demand * fuel_price(profile.consumption.heating_fuel);
    let heat_pump_cost = (heating_demand / cop) * 0.18;
    let yearly_savings = current_cost - heat_pump_cost;
    let installation_cost = size_kw * 2500.0;

    let (payback_years, roi_percent) = payback_and_roi(installation_cost, yearly_savings, 15.0);

    let mut details = BTreeMap::new();
    details.insert(
        "Heating demand".to_string(),
        format!("{:.0} kWh/year", heating_demand),
    );
    details.insert(
        "Current heating cost".to_string(),
        format!("{:.0} €/year", current_cost),
    );
    details.insert(
        "Heat pump running cost".to_string(),
        format!("{:.0} €/year", heat_pump_cost),
    );
    details.insert(
        "Yearly saving".to_string(),
        format!("{:.0} €/year", yearly_savings),
    );

    SystemCalculation {
        technology: SystemKind::HeatPump,
        size_descriptor: format!("{:.0} kW", size_kw),
        yearly_production: format!("COP {:.1}", cop),
        installation_cost,
        yearly_savings,
        payback_years,
        roi_percent,
        details,
    }
}

/// Combined bundle: discounted installation (10% on PV, 5% on the heat
/// pump) and a 10% synergy bonus on the summed savings.
pub fn calculate_combined(
    solar: Option<&SystemCalculation>,
    heat_pump: Option<&SystemCalculation>,
) -> Option<SystemCalculation> {
    if solar.is_none() && heat_pump.is_none() {
        return None;
    }

    let mut total_cost = 0.0;
    let mut total_savings = 0.0;
    let mut components = Vec::new();

    if let Some(solar) = solar {
        total_cost += solar.installation_cost * 0.9;
        total_savings += solar.yearly_savings;
        components.push(format!("PV {}", solar.size_descriptor));
    }
    if let Some(heat_pump) = heat_pump {
        total_cost += heat_pump.installation_cost * 0.95;
        total_savings += heat_pump.yearly_savings;
        components.push(format!("HP {}", heat_pump.size_descriptor));
    }

    let yearly_savings = total_savings * 1.1;
    let (payback_years, roi_percent) = payback_and_roi(total_cost, yearly_savings, 20.0);

    let mut details = BTreeMap::new();
    details.insert(
        "Synergy".to_string(),
        "PV powers the heat pump = cheaper heating".to_string(),
    );
    details.insert(
        "Total investment".to_string(),
        format!("{:.0} €", total_cost),
    );
    details.insert(
        "Yearly saving".to_string(),
        format!("{:.0} €", yearly_savings),
    );

    Some(SystemCalculation {
        technology: SystemKind::Combined,
        size_descriptor: components.join(" + "),
        yearly_production: String::new(),
        installation_cost: total_cost,
        yearly_savings,
        payback_years,
        roi_percent,
        details,
    })
}

/// Payback and ROI over the given horizon; undefined when savings are zero
/// or negative.
fn payback_and_roi(cost: f64, savings: f64, horizon_years: f64) -> (Option<f64>, Option<f64>) {
    if savings <= 0.0 {
        return (None, None);
    }
    let payback = cost / savings;
    let roi = (savings * horizon_years - cost) / cost * 100.0;
    (Some(payback), Some(roi))
}

/// Specific heating demand in kWh/m²/year by insulation level.
///
/// `Excellent` is treated as good-or-better; an unset level assumes average.
fn specific_demand(insulation: Option<InsulationLevel>) -> f64 {
    match insulation {
        Some(InsulationLevel::Good) | Some(InsulationLevel::Excellent) => 50.0,
        Some(InsulationLevel::Poor) => 150.0,
        Some(InsulationLevel::Average) | None => 100.0,
    }
}

/// Current heating tariff in €/kWh by fuel.
fn fuel_price(fuel: Option<HeatingFuel>) -> f64 {
    match fuel {
        Some(HeatingFuel::Gas) => 0.08,
        Some(HeatingFuel::Electricity) => 0.18,
        Some(HeatingFuel::Wood) => 0.05,
        Some(HeatingFuel::Other) | None => 0.10,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analysis::TechnologyScore;
    use crate::domain::profile::{
        Building, BuildingType, Consumption, Electrical, Location, Roof,
    };
    use crate::domain::technical::{Climate, SolarResource, WindResource};

    fn profile(roof: f64, consumption: f64) -> UserProfile {
        UserProfile {
            location: Location {
                address: Some("Kosice".to_string()),
            },
            building: Building {
                building_type: Some(BuildingType::FamilyHouse),
                heated_area_m2: Some(120.0),
                insulation_level: Some(InsulationLevel::Good),
            },
            consumption: Consumption {
                electricity_kwh_year: Some(consumption),
                heating_fuel: Some(HeatingFuel::Gas),
            },
            roof: Roof { area_m2: Some(roof) },
            electrical: Electrical::default(),
        }
    }

    fn technical(kwh_per_kwp: f64, wind_speed: f64, avg_temp: f64) -> TechnicalData {
        TechnicalData {
            solar: SolarResource {
                yearly_kwh_per_kwp: kwh_per_kwp,
                optimal_angle: 35.0,
            },
            wind: WindResource {
                average_speed: wind_speed,
            },
            climate: Climate {
                year_average_temp: avg_temp,
            },
        }
    }

    #[test]
    fn solar_reference_case_matches_expected_numbers() {
        let calc = calculate_solar(&profile(50.0, 3500.0), &technical(1100.0, 4.0, 9.0));

        // optimalKwp = min(3.5, 50 × 0.7 / 2 × 0.4 = 7.0) = 3.5
        assert_eq!(calc.size_descriptor, "3.5 kWp");
        assert!((calc.installation_cost - 5250.0).abs() < 1e-9);
        assert_eq!(calc.yearly_production, "3850 kWh");
        // savings = 2695 × 0.20 + 1155 × 0.05 = 596.75
        assert!((calc.yearly_savings - 596.75).abs() < 1e-9);
        let payback = calc.payback_years.unwrap();
        assert!((payback - 8.7975).abs() < 0.005);
    }

    #[test]
    fn solar_is_roof_limited_on_small_roofs() {
        // Roof limit: 10 × 0.7 / 2 × 0.4 = 1.4 kWp, below consumption/1000.
        let calc = calculate_solar(&profile(10.0, 5000.0), &technical(1000.0, 4.0, 9.0));
        assert_eq!(calc.size_descriptor, "1.4 kWp");
    }

    #[test]
    fn wind_capacity_factor_bands() {
        for (speed, expected_production) in [
            (6.5, 5.0 * 8760.0 * 0.30),
            (5.5, 5.0 * 8760.0 * 0.20),
            (4.5, 5.0 * 8760.0 * 0.15),
            (3.0, 5.0 * 8760.0 * 0.10),
        ] {
            let calc = calculate_wind(&technical(1000.0, speed, 9.0));
            assert_eq!(
                calc.yearly_production,
                format!("{:.0} kWh", expected_production)
            );
        }
    }

    #[test]
    fn heat_pump_savings_compare_fuel_against_cop() {
        // 120 m² good insulation: demand 6000 kWh; COP 3.5 at 12 °C.
        let calc = calculate_heat_pump(&profile(50.0, 3500.0), &technical(1000.0, 4.0, 12.0));

        // size = 6000/2000 = 3 kW, cost = 7500 €
        assert_eq!(calc.size_descriptor, "3 kW");
        assert!((calc.installation_cost - 7500.0).abs() < 1e-9);
        // current: 6000 × 0.08 = 480; hp: 6000/3.5 × 0.18 ≈ 308.57
        assert!((calc.yearly_savings - (480.0 - 6000.0 / 3.5 * 0.18)).abs() < 1e-9);
        assert_eq!(calc.yearly_production, "COP 3.5");
    }

    #[test]
    fn negative_savings_yield_not_applicable() {
        // Wood is cheaper than heat pump electricity at COP 3.0.
        let mut p = profile(50.0, 3500.0);
        p.consumption.heating_fuel = Some(HeatingFuel::Wood);
        p.building.insulation_level = Some(InsulationLevel::Poor);
        let calc = calculate_heat_pump(&p, &technical(1000.0, 4.0, 5.0));

        assert!(calc.yearly_savings <= 0.0);
        assert_eq!(calc.payback_years, None);
        assert_eq!(calc.roi_percent, None);
        assert_eq!(calc.payback_text(), "not applicable");
    }

    #[test]
    fn combined_applies_discounts_and_synergy() {
        let solar = calculate_solar(&profile(50.0, 3500.0), &technical(1100.0, 4.0, 9.0));
        let hp = calculate_heat_pump(&profile(50.0, 3500.0), &technical(1100.0, 4.0, 12.0));

        let combined = calculate_combined(Some(&solar), Some(&hp)).unwrap();

        let expected_cost = solar.installation_cost * 0.9 + hp.installation_cost * 0.95;
        let expected_savings = (solar.yearly_savings + hp.yearly_savings) * 1.1;
        assert!((combined.installation_cost - expected_cost).abs() < 1e-9);
        assert!((combined.yearly_savings - expected_savings).abs() < 1e-9);
        assert!(combined.size_descriptor.contains("PV"));
        assert!(combined.size_descriptor.contains("HP"));
    }

    #[test]
    fn combined_absent_without_solar_or_heat_pump() {
        assert!(calculate_combined(None, None).is_none());
    }

    #[test]
    fn wind_only_recommendation_produces_no_combined_system() {
        let analysis = AnalysisResult {
            solar: TechnologyScore::new(Technology::Solar, 40, "low"),
            wind: TechnologyScore::new(Technology::Wind, 100, "windy"),
            heat_pump: TechnologyScore::new(Technology::HeatPump, 40, "cold"),
            recommended: vec![Technology::Wind],
        };
        let result = calculate(&profile(50.0, 3500.0), &technical(900.0, 7.0, 9.0), &analysis);

        assert!(result.solar.is_none());
        assert!(result.wind.is_some());
        assert!(result.heat_pump.is_none());
        assert!(result.combined.is_none());
    }

    #[test]
    fn recommended_subset_drives_what_is_calculated() {
        let analysis = AnalysisResult {
            solar: TechnologyScore::new(Technology::Solar, 100, "sunny"),
            wind: TechnologyScore::new(Technology::Wind, 20, "calm"),
            heat_pump: TechnologyScore::new(Technology::HeatPump, 90, "mild"),
            recommended: vec![Technology::Solar, Technology::HeatPump],
        };
        let result = calculate(
            &profile(60.0, 4500.0),
            &technical(1200.0, 3.0, 12.0),
            &analysis,
        );

        assert!(result.solar.is_some());
        assert!(result.wind.is_none());
        assert!(result.heat_pump.is_some());
        assert!(result.combined.is_some());
    }
}
