//! Normalization of AI-extracted fields onto the canonical profile.
//!
//! The text-extraction collaborator is asked for a flat JSON object, but
//! models routinely wrap it in prose, rename keys, or return numbers as
//! strings. This module scans the raw output for the first balanced JSON
//! object, maps alias keys onto canonical field names, and coerces values
//! into the typed profile fields. Anything unrecognised is dropped; a
//! dropped field just means the stage asks again.

use serde_json::Value;
use thiserror::Error;

use super::{BuildingType, GridPhase, HeatingFuel, InsulationLevel};

/// Fields pulled out of one user message. All optional; merge writes only
/// the fields that are present.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedProfile {
    pub address: Option<String>,
    pub building_type: Option<BuildingType>,
    pub heated_area_m2: Option<f64>,
    pub insulation_level: Option<InsulationLevel>,
    pub electricity_kwh_year: Option<f64>,
    pub heating_fuel: Option<HeatingFuel>,
    pub roof_area_m2: Option<f64>,
    pub phase: Option<GridPhase>,
}

impl ExtractedProfile {
    /// True when no field was extracted.
    pub fn is_empty(&self) -> bool {
        *self == ExtractedProfile::default()
    }
}

/// What the extraction collaborator said about one message.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractionOutcome {
    /// The message was off-topic; no fields were consumed.
    Irrelevant,
    /// Zero or more profile fields were extracted.
    Fields(ExtractedProfile),
}

/// Failures while turning model output into an extraction.
///
/// Callers degrade every variant to an empty extraction; the error exists
/// so the degradation can be logged with a reason.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionError {
    #[error("no JSON object found in model output")]
    NoJsonObject,

    #[error("malformed JSON: {0}")]
    MalformedJson(String),

    #[error("expected a JSON object, got another value")]
    NotAnObject,
}

/// Parses raw model output into an extraction outcome.
pub fn parse_extraction(raw: &str) -> Result<ExtractionOutcome, ExtractionError> {
    let json = first_json_object(raw).ok_or(ExtractionError::NoJsonObject)?;
    let value: Value =
        serde_json::from_str(json).map_err(|e| ExtractionError::MalformedJson(e.to_string()))?;
    let object = value.as_object().ok_or(ExtractionError::NotAnObject)?;

    if object
        .get("irrelevant")
        .and_then(Value::as_bool)
        .unwrap_or(false)
    {
        return Ok(ExtractionOutcome::Irrelevant);
    }

    let mut extracted = ExtractedProfile::default();
    for (key, value) in object {
        if value.is_null() {
            continue;
        }
        match canonical_key(key) {
            Some("address") => extracted.address = string_value(value),
            Some("building_type") => {
                extracted.building_type = string_value(value).as_deref().and_then(BuildingType::parse)
            }
            Some("heated_area_m2") => extracted.heated_area_m2 = number_value(value),
            Some("insulation_level") => {
                extracted.insulation_level =
                    string_value(value).as_deref().and_then(InsulationLevel::parse)
            }
            Some("electricity_kwh_year") => extracted.electricity_kwh_year = number_value(value),
            Some("heating_fuel") => {
                extracted.heating_fuel = string_value(value).as_deref().and_then(HeatingFuel::parse)
            }
            Some("roof_area_m2") => extracted.roof_area_m2 = number_value(value),
            Some("phase") => {
                extracted.phase = phase_value(value)
            }
            _ => {}
        }
    }

    Ok(ExtractionOutcome::Fields(extracted))
}

/// Maps an arbitrary extraction key onto a canonical field name.
fn canonical_key(key: &str) -> Option<&'static str> {
    match key.trim().to_ascii_lowercase().as_str() {
        "address" | "city" | "town" | "location" | "municipality" => Some("address"),
        "building_type" | "building" | "property_type" | "house_type" => Some("building_type"),
        "heated_area_m2" | "heated_area" | "floor_area" | "area_m2" => Some("heated_area_m2"),
        "insulation_level" | "insulation" => Some("insulation_level"),
        "electricity_kwh_year" | "electricity_consumption" | "yearly_consumption_kwh"
        | "consumption_kwh" | "electricity" => Some("electricity_kwh_year"),
        "heating_fuel" | "fuel" | "heating" => Some("heating_fuel"),
        "roof_area_m2" | "roof_area" | "roof" => Some("roof_area_m2"),
        "phase" | "phases" | "grid_phase" | "electrical_phase" => Some("phase"),
        _ => None,
    }
}

fn string_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        _ => None,
    }
}

/// Accepts numbers and numeric strings, tolerating trailing units
/// ("120 m²", "4500 kWh").
fn number_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let token: String = s
                .trim()
                .chars()
                .take_while(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
                .collect();
            token.parse().ok()
        }
        _ => None,
    }
}

/// Phase arrives as "1f"/"3f" but also as the bare numbers 1 and 3.
fn phase_value(value: &Value) -> Option<GridPhase> {
    match value {
        Value::String(s) => GridPhase::parse(s),
        Value::Number(n) => match n.as_i64() {
            Some(1) => Some(GridPhase::Single),
            Some(3) => Some(GridPhase::Three),
            _ => None,
        },
        _ => None,
    }
}

/// Finds the first balanced JSON object in the input, skipping any prose
/// the model wrapped around it. Brace counting is string-aware.
fn first_json_object(input: &str) -> Option<&str> {
    let start = input.find('{')?;
    let bytes = input.as_bytes();
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, byte) in bytes[start..].iter().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if *byte == b'\\' {
                escaped = true;
            } else if *byte == b'"' {
                in_string = false;
            }
            continue;
        }
        match byte {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&input[start..start + offset + 1]);
                }
            }
            _ => {}
        }
    }
    None
}
