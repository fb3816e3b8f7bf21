//! Nominatim implementation of the `Geocoder` port.
//!
//! Free-text search, first hit wins. Nominatim's usage policy requires an
//! identifying User-Agent.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::ports::{GeoError, GeoPoint, Geocoder};

const USER_AGENT: &str = concat!("energy-advisor/", env!("CARGO_PKG_VERSION"));

/// Nominatim search client.
pub struct NominatimGeocoder {
    base_url: String,
    client: Client,
    timeout_secs: u64,
}

impl NominatimGeocoder {
    /// Creates a geocoder against the given Nominatim base URL.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.into(),
            client,
            timeout_secs: timeout.as_secs(),
        }
    }

    fn map_error(&self, e: reqwest::Error) -> GeoError {
        if e.is_timeout() {
            GeoError::Timeout {
                timeout_secs: self.timeout_secs,
            }
        } else {
            GeoError::network(e.to_string())
        }
    }
}

#[derive(Debug, Deserialize)]
struct NominatimHit {
    display_name: Option<String>,
    lat: String,
    lon: String,
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn geocode(&self, address: &str) -> Result<Option<GeoPoint>, GeoError> {
        let url = format!("{}/search", self.base_url);
        let response = self
            .client
            .get(url)
            .query(&[("q", address), ("format", "json"), ("limit", "1")])
            .send()
            .await
            .map_err(|e| self.map_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GeoError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let hits: Vec<NominatimHit> = response
            .json()
            .await
            .map_err(|e| GeoError::parse(e.to_string()))?;

        let Some(first) = hits.into_iter().next() else {
            return Ok(None);
        };

        let lat = first
            .lat
            .parse::<f64>()
            .map_err(|e| GeoError::parse(format!("bad latitude '{}': {}", first.lat, e)))?;
        let lon = first
            .lon
            .parse::<f64>()
            .map_err(|e| GeoError::parse(format!("bad longitude '{}': {}", first.lon, e)))?;

        Ok(Some(GeoPoint {
            display_address: first.display_name.unwrap_or_else(|| address.to_string()),
            lat,
            lon,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_deserializes_nominatim_shape() {
        let json = r#"[{"display_name": "Košice, Slovakia", "lat": "48.7164", "lon": "21.2611"}]"#;
        let hits: Vec<NominatimHit> = serde_json::from_str(json).unwrap();
        assert_eq!(hits[0].lat, "48.7164");
        assert_eq!(hits[0].display_name.as_deref(), Some("Košice, Slovakia"));
    }
}
