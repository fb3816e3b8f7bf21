//! Aggregate environmental data for the resolved location.
//!
//! Fetched exactly once when data collection completes, then immutable for
//! the session. When a collaborator sub-result is absent the affected field
//! falls back to a conservative regional default, so the pipeline degrades
//! instead of stalling.

use serde::{Deserialize, Serialize};

/// Fallback solar yield when the solar resource lookup fails, kWh/kWp/year.
pub const DEFAULT_YEARLY_KWH_PER_KWP: f64 = 1000.0;
/// Fallback optimal panel tilt, degrees.
pub const DEFAULT_OPTIMAL_ANGLE: f64 = 35.0;
/// Fallback mean wind speed, m/s.
pub const DEFAULT_WIND_SPEED: f64 = 4.5;
/// Fallback yearly average temperature, °C.
pub const DEFAULT_YEAR_AVERAGE_TEMP: f64 = 10.0;

/// Photovoltaic yield potential at the location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolarResource {
    /// Expected yearly production per installed kWp.
    pub yearly_kwh_per_kwp: f64,
    /// Optimal panel tilt in degrees.
    pub optimal_angle: f64,
}

/// Wind conditions at the location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindResource {
    /// Multi-year mean wind speed in m/s.
    pub average_speed: f64,
}

/// Climate conditions at the location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Climate {
    /// Yearly average temperature in °C.
    pub year_average_temp: f64,
}

/// Environmental data driving the analysis and calculation stages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnicalData {
    pub solar: SolarResource,
    pub wind: WindResource,
    pub climate: Climate,
}

impl TechnicalData {
    /// The full-fallback dataset used when every lookup fails.
    pub fn fallback() -> Self {
        Self {
            solar: SolarResource {
                yearly_kwh_per_kwp: DEFAULT_YEARLY_KWH_PER_KWP,
                optimal_angle: DEFAULT_OPTIMAL_ANGLE,
            },
            wind: WindResource {
                average_speed: DEFAULT_WIND_SPEED,
            },
            climate: Climate {
                year_average_temp: DEFAULT_YEAR_AVERAGE_TEMP,
            },
        }
    }
}
