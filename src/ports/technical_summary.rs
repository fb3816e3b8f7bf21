//! Technical-summary collaborator port.
//!
//! The summary aggregates solar, wind and climate lookups; each sub-result
//! is independently optional because the upstream sources fail
//! independently. Conversion to `TechnicalData` fills the gaps with the
//! documented fallback constants.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::technical::{
    Climate, SolarResource, TechnicalData, WindResource, DEFAULT_OPTIMAL_ANGLE,
    DEFAULT_WIND_SPEED, DEFAULT_YEARLY_KWH_PER_KWP, DEFAULT_YEAR_AVERAGE_TEMP,
};

use super::GeoError;

/// Solar resource sub-result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolarSummary {
    pub yearly_kwh_per_kwp: f64,
    pub optimal_angle: f64,
}

/// Wind sub-result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindSummary {
    pub mean_speed: f64,
}

/// Climate sub-result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClimateSummary {
    pub average_temp: f64,
}

/// Aggregate technical summary for a location.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TechnicalSummary {
    pub solar: Option<SolarSummary>,
    pub wind: Option<WindSummary>,
    pub climate: Option<ClimateSummary>,
}

impl TechnicalSummary {
    /// Converts to session technical data, substituting fallback constants
    /// for absent sub-results.
    pub fn into_technical_data(self) -> TechnicalData {
        TechnicalData {
            solar: self
                .solar
                .map(|s| SolarResource {
                    yearly_kwh_per_kwp: s.yearly_kwh_per_kwp,
                    optimal_angle: s.optimal_angle,
                })
                .unwrap_or(SolarResource {
                    yearly_kwh_per_kwp: DEFAULT_YEARLY_KWH_PER_KWP,
                    optimal_angle: DEFAULT_OPTIMAL_ANGLE,
                }),
            wind: self
                .wind
                .map(|w| WindResource {
                    average_speed: w.mean_speed,
                })
                .unwrap_or(WindResource {
                    average_speed: DEFAULT_WIND_SPEED,
                }),
            climate: self
                .climate
                .map(|c| Climate {
                    year_average_temp: c.average_temp,
                })
                .unwrap_or(Climate {
                    year_average_temp: DEFAULT_YEAR_AVERAGE_TEMP,
                }),
        }
    }
}

/// Port for the technical-summary collaborator.
#[async_trait]
pub trait TechnicalSummaryProvider: Send + Sync {
    async fn summary(&self, lat: f64, lon: f64) -> Result<TechnicalSummary, GeoError>;
}
