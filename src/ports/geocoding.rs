//! Geocoding collaborator port.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A resolved location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// The address as the geocoder understood it.
    pub display_address: String,
    pub lat: f64,
    pub lon: f64,
}

/// Failures talking to location collaborators (geocoding and technical
/// summary).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeoError {
    #[error("network failure: {0}")]
    Network(String),

    #[error("API failure: status {status}: {body}")]
    Api { status: u16, body: String },

    #[error("parse failure: {0}")]
    Parse(String),

    #[error("request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },
}

impl GeoError {
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }
}

/// Port for address resolution.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Resolves an address to coordinates. `Ok(None)` means the address is
    /// well-formed but unknown to the collaborator.
    async fn geocode(&self, address: &str) -> Result<Option<GeoPoint>, GeoError>;
}
