//! Typed user profile with per-field presence and the canonical required set.
//!
//! Every leaf field is optional until the conversation fills it. Merging an
//! extraction writes a field only when the extraction carries a value, so
//! prior answers are never erased by a later turn that omits them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Building category recognised by the advisor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildingType {
    FamilyHouse,
    Apartment,
    Company,
}

impl BuildingType {
    /// Parses an extracted value, accepting common synonyms.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "family_house" | "family house" | "house" | "detached house" => {
                Some(BuildingType::FamilyHouse)
            }
            "apartment" | "flat" => Some(BuildingType::Apartment),
            "company" | "commercial" | "office" | "company_building" => {
                Some(BuildingType::Company)
            }
            _ => None,
        }
    }

    /// Human-readable label for report text.
    pub fn label(&self) -> &'static str {
        match self {
            BuildingType::FamilyHouse => "family house",
            BuildingType::Apartment => "apartment",
            BuildingType::Company => "company building",
        }
    }
}

impl fmt::Display for BuildingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// How well the building retains heat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsulationLevel {
    Poor,
    Average,
    Good,
    Excellent,
}

impl InsulationLevel {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "poor" | "bad" | "none" => Some(InsulationLevel::Poor),
            "average" | "medium" | "moderate" => Some(InsulationLevel::Average),
            "good" => Some(InsulationLevel::Good),
            "excellent" | "passive" => Some(InsulationLevel::Excellent),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            InsulationLevel::Poor => "poor",
            InsulationLevel::Average => "average",
            InsulationLevel::Good => "good",
            InsulationLevel::Excellent => "excellent",
        }
    }
}

impl fmt::Display for InsulationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Primary heating energy source.
///
/// Fuels without a known tariff normalize to `Other` and are priced at the
/// default rate by the economics calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeatingFuel {
    Gas,
    Electricity,
    Wood,
    Other,
}

impl HeatingFuel {
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        match raw.to_ascii_lowercase().as_str() {
            "gas" | "natural_gas" | "natural gas" => Some(HeatingFuel::Gas),
            "electricity" | "electric" => Some(HeatingFuel::Electricity),
            "wood" | "pellets" | "biomass" => Some(HeatingFuel::Wood),
            _ => Some(HeatingFuel::Other),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            HeatingFuel::Gas => "gas",
            HeatingFuel::Electricity => "electricity",
            HeatingFuel::Wood => "wood",
            HeatingFuel::Other => "other",
        }
    }
}

impl fmt::Display for HeatingFuel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Grid connection phase count, `1f` or `3f` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GridPhase {
    #[serde(rename = "1f")]
    Single,
    #[serde(rename = "3f")]
    Three,
}

impl GridPhase {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "1f" | "1" | "single" | "single-phase" | "single_phase" => Some(GridPhase::Single),
            "3f" | "3" | "three" | "three-phase" | "three_phase" => Some(GridPhase::Three),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            GridPhase::Single => "1f",
            GridPhase::Three => "3f",
        }
    }
}

impl fmt::Display for GridPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Where the property is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub address: Option<String>,
}

/// What kind of building it is and how it holds heat.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Building {
    pub building_type: Option<BuildingType>,
    pub heated_area_m2: Option<f64>,
    pub insulation_level: Option<InsulationLevel>,
}

/// Annual energy use.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Consumption {
    pub electricity_kwh_year: Option<f64>,
    pub heating_fuel: Option<HeatingFuel>,
}

/// Usable roof surface.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Roof {
    pub area_m2: Option<f64>,
}

/// Grid connection details.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Electrical {
    pub phase: Option<GridPhase>,
}

/// A profile field the conversation must fill before analysis can start.
///
/// `RoofArea` is required only when the building is a family house.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredField {
    Address,
    BuildingType,
    HeatedArea,
    InsulationLevel,
    ElectricityConsumption,
    HeatingFuel,
    RoofArea,
    Phase,
}

impl RequiredField {
    /// The fixed clarifying question asked when this field is the first one
    /// missing. One literal question per field.
    pub fn question(&self) -> &'static str {
        match self {
            RequiredField::Address => "In which town or city is your property located?",
            RequiredField::BuildingType => {
                "Is it a family house, an apartment, or a company building?"
            }
            RequiredField::HeatedArea => {
                "What is the heated floor area of your property in m²?"
            }
            RequiredField::InsulationLevel => {
                "How would you rate the insulation: poor, average, good, or excellent?"
            }
            RequiredField::ElectricityConsumption => {
                "How many kWh of electricity do you use per year? (you can find it on your bill)"
            }
            RequiredField::HeatingFuel => "What do you heat with? (gas, electricity, wood...)",
            RequiredField::RoofArea => "What is the approximate usable roof area in m²?",
            RequiredField::Phase => {
                "Is your grid connection single-phase (1f) or three-phase (3f)?"
            }
        }
    }
}

/// The structured profile accumulated over the conversation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub location: Location,
    pub building: Building,
    pub consumption: Consumption,
    pub roof: Roof,
    pub electrical: Electrical,
}

impl UserProfile {
    /// Merges extracted fields into the profile.
    ///
    /// A field is written only when the extraction carries a value; existing
    /// values are never cleared by omission.
    pub fn merge(&mut self, extracted: &super::ExtractedProfile) {
        if let Some(address) = &extracted.address {
            self.location.address = Some(address.clone());
        }
        if let Some(building_type) = extracted.building_type {
            self.building.building_type = Some(building_type);
        }
        if let Some(area) = extracted.heated_area_m2 {
            self.building.heated_area_m2 = Some(area);
        }
        if let Some(level) = extracted.insulation_level {
            self.building.insulation_level = Some(level);
        }
        if let Some(kwh) = extracted.electricity_kwh_year {
            self.consumption.electricity_kwh_year = Some(kwh);
        }
        if let Some(fuel) = extracted.heating_fuel {
            self.consumption.heating_fuel = Some(fuel);
        }
        if let Some(area) = extracted.roof_area_m2 {
            self.roof.area_m2 = Some(area);
        }
        if let Some(phase) = extracted.phase {
            self.electrical.phase = Some(phase);
        }
    }

    /// The required fields for this profile, in question order.
    ///
    /// Roof area joins the set only once the building is known to be a
    /// family house.
    fn required_fields(&self) -> Vec<RequiredField> {
        let mut fields = vec![
            RequiredField::Address,
            RequiredField::BuildingType,
            RequiredField::HeatedArea,
            RequiredField::InsulationLevel,
            RequiredField::ElectricityConsumption,
            RequiredField::HeatingFuel,
        ];
        if self.building.building_type == Some(BuildingType::FamilyHouse) {
            fields.push(RequiredField::RoofArea);
        }
        fields.push(RequiredField::Phase);
        fields
    }

    fn is_filled(&self, field: RequiredField) -> bool {
        match field {
            RequiredField::Address => self.location.address.is_some(),
            RequiredField::BuildingType => self.building.building_type.is_some(),
            RequiredField::HeatedArea => self.building.heated_area_m2.is_some(),
            RequiredField::InsulationLevel => self.building.insulation_level.is_some(),
            RequiredField::ElectricityConsumption => {
                self.consumption.electricity_kwh_year.is_some()
            }
            RequiredField::HeatingFuel => self.consumption.heating_fuel.is_some(),
            RequiredField::RoofArea => self.roof.area_m2.is_some(),
            RequiredField::Phase => self.electrical.phase.is_some(),
        }
    }

    /// Required fields not yet filled, in question order.
    pub fn missing_required_fields(&self) -> Vec<RequiredField> {
        self.required_fields()
            .into_iter()
            .filter(|f| !self.is_filled(*f))
            .collect()
    }

    /// True when every required field is present.
    pub fn is_complete(&self) -> bool {
        self.missing_required_fields().is_empty()
    }

    /// Data collection progress, 0-25, proportional to filled fields.
    pub fn collection_progress(&self) -> u8 {
        let required = self.required_fields();
        let filled = required.iter().filter(|f| self.is_filled(**f)).count();
        (25.0 * filled as f64 / required.len() as f64).round() as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::profile::ExtractedProfile;

    fn complete_profile() -> UserProfile {
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
                electricity_kwh_year: Some(4500.0),
                heating_fuel: Some(HeatingFuel::Gas),
            },
            roof: Roof {
                area_m2: Some(60.0),
            },
            electrical: Electrical {
                phase: Some(GridPhase::Three),
            },
        }
    }

    #[test]
    fn empty_profile_is_missing_everything_required() {
        let profile = UserProfile::default();
        let missing = profile.missing_required_fields();
        // Building type unknown, so roof area is not yet in the set.
        assert_eq!(missing.len(), 7);
        assert_eq!(missing[0], RequiredField::Address);
        assert!(!profile.is_complete());
    }

    #[test]
    fn complete_profile_has_no_missing_fields() {
        assert!(complete_profile().is_complete());
    }

    #[test]
    fn roof_area_required_only_for_family_house() {
        let mut profile = complete_profile();
        profile.roof.area_m2 = None;
        assert_eq!(
            profile.missing_required_fields(),
            vec![RequiredField::RoofArea]
        );

        profile.building.building_type = Some(BuildingType::Apartment);
        assert!(profile.is_complete());
    }

    #[test]
    fn merge_with_omitted_field_keeps_existing_value() {
        let mut profile = complete_profile();
        let extraction = ExtractedProfile {
            heated_area_m2: Some(200.0),
            ..ExtractedProfile::default()
        };

        profile.merge(&extraction);

        assert_eq!(profile.building.heated_area_m2, Some(200.0));
        assert_eq!(profile.location.address.as_deref(), Some("Kosice"));
        assert_eq!(profile.consumption.heating_fuel, Some(HeatingFuel::Gas));
    }

    #[test]
    fn merge_of_empty_extraction_is_identity() {
        let mut profile = complete_profile();
        let before = profile.clone();
        profile.merge(&ExtractedProfile::default());
        assert_eq!(profile, before);
    }

    #[test]
    fn collection_progress_is_proportional() {
        let mut profile = UserProfile::default();
        assert_eq!(profile.collection_progress(), 0);

        profile.location.address = Some("Poprad".to_string());
        // 1 of 7 known-required fields.
        assert_eq!(profile.collection_progress(), 4);

        let complete = complete_profile();
        assert_eq!(complete.collection_progress(), 25);
    }

    #[test]
    fn building_type_parses_synonyms() {
        assert_eq!(
            BuildingType::parse("Family House"),
            Some(BuildingType::FamilyHouse)
        );
        assert_eq!(BuildingType::parse("flat"), Some(BuildingType::Apartment));
        assert_eq!(BuildingType::parse("castle"), None);
    }

    #[test]
    fn heating_fuel_maps_unknown_to_other() {
        assert_eq!(HeatingFuel::parse("coal"), Some(HeatingFuel::Other));
        assert_eq!(HeatingFuel::parse("  "), None);
    }

    #[test]
    fn grid_phase_parses_wire_forms() {
        assert_eq!(GridPhase::parse("1f"), Some(GridPhase::Single));
        assert_eq!(GridPhase::parse("3"), Some(GridPhase::Three));
        assert_eq!(GridPhase::parse("2f"), None);
    }
}
