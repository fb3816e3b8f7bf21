//! HTTP implementation of the `TechnicalSummaryProvider` port.
//!
//! Posts coordinates to the aggregate summary endpoint and maps its wire
//! shape onto the port types. Each sub-result is optional on the wire; a
//! missing one simply stays `None` and falls back during conversion.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::ports::{
    ClimateSummary, GeoError, SolarSummary, TechnicalSummary, TechnicalSummaryProvider,
    WindSummary,
};

/// Client for the technical-summary collaborator.
pub struct SummaryClient {
    base_url: String,
    client: Client,
    timeout_secs: u64,
}

impl SummaryClient {
    /// Creates a client against the given summary service base URL.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.into(),
            client,
            timeout_secs: timeout.as_secs(),
        }
    }
}

#[derive(Debug, Serialize)]
struct SummaryRequest {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct SummaryResponse {
    solar: Option<WireSolar>,
    wind: Option<WireWind>,
    climate: Option<WireClimate>,
}

#[derive(Debug, Deserialize)]
struct WireSolar {
    yearly_kwh_per_kwp: f64,
    optimal_angle: f64,
}

#[derive(Debug, Deserialize)]
struct WireWind {
    mean_speed: f64,
}

#[derive(Debug, Deserialize)]
struct WireClimate {
    avg_temp: f64,
}

#[async_trait]
impl TechnicalSummaryProvider for SummaryClient {
    async fn summary(&self, lat: f64, lon: f64) -> Result<TechnicalSummary, GeoError> {
        let url = format!("{}/summary", self.base_url);
        let response = self
            .client
            .post(url)
            .json(&SummaryRequest { lat, lon })
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GeoError::Timeout {
                        timeout_secs: self.timeout_secs,
                    }
                } else {
                    GeoError::network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GeoError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: SummaryResponse = response
            .json()
            .await
            .map_err(|e| GeoError::parse(e.to_string()))?;

        Ok(TechnicalSummary {
            solar: parsed.solar.map(|s| SolarSummary {
                yearly_kwh_per_kwp: s.yearly_kwh_per_kwp,
                optimal_angle: s.optimal_angle,
            }),
            wind: parsed.wind.map(|w| WindSummary {
                mean_speed: w.mean_speed,
            }),
            climate: parsed.climate.map(|c| ClimateSummary {
                average_temp: c.avg_temp,
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_tolerates_missing_sub_results() {
        let json = r#"{"solar": {"yearly_kwh_per_kwp": 1120.0, "optimal_angle": 34.0}, "wind": null}"#;
        let parsed: SummaryResponse = serde_json::from_str(json).unwrap();
        assert!(parsed.solar.is_some());
        assert!(parsed.wind.is_none());
        assert!(parsed.climate.is_none());
    }
}
