//! Location collaborator configuration

use serde::Deserialize;
use std::time::Duration;

/// Geocoding and technical summary configuration
#[derive(Debug, Clone, Deserialize)]
pub struct GeoConfig {
    /// Nominatim base URL
    #[serde(default = "default_nominatim_url")]
    pub nominatim_url: String,

    /// Technical summary service base URL
    #[serde(default = "default_summary_url")]
    pub summary_url: String,

    /// Bounded per-call timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl GeoConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for GeoConfig {
    fn default() -> Self {
        Self {
            nominatim_url: default_nominatim_url(),
            summary_url: default_summary_url(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_nominatim_url() -> String {
    "https://nominatim.openstreetmap.org".to_string()
}

fn default_summary_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_timeout() -> u64 {
    10
}
