//! Geocoding tool backed by the Open-Meteo geocoding API.
//!
//! Resolves a free-text place name to coordinates. The result is a JSON
//! string (`{lat, lon, displayName}`) the model reads back to chain into
//! a weather or time lookup.

use async_trait::async_trait;
use serde::Deserialize;
use stepline_core::activity::ToolName;
use stepline_core::error::ToolError;
use stepline_core::tool::{Tool, ToolParams};
use tracing::debug;

pub struct GeocodeTool {
    base_url: String,
    client: reqwest::Client,
}

impl GeocodeTool {
    /// Create a geocoding tool against the given API base URL
    /// (e.g. `https://geocoding-api.open-meteo.com/v1`).
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        }
    }
}

#[async_trait]
impl Tool for GeocodeTool {
    fn name(&self) -> ToolName {
        ToolName::GetCoordinates
    }

    fn description(&self) -> &str {
        "Resolve a place name to latitude and longitude coordinates."
    }

    async fn execute(&self, params: ToolParams) -> Result<String, ToolError> {
        let place = match params {
            ToolParams::Place(name) => name,
            other => {
                return Err(ToolError::InvalidParams {
                    tool: self.name().to_string(),
                    reason: format!("expected a place name, got {other:?}"),
                });
            }
        };

        debug!(place = %place, "Geocoding place name");

        let url = format!("{}/search", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("name", place.as_str()), ("count", "1")])
            .send()
            .await
            .map_err(|e| ToolError::LookupFailed {
                tool: self.name().to_string(),
                reason: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(ToolError::LookupFailed {
                tool: self.name().to_string(),
                reason: format!("geocoding API returned status {}", response.status()),
            });
        }

        let payload: GeocodingResponse =
            response.json().await.map_err(|e| ToolError::LookupFailed {
                tool: self.name().to_string(),
                reason: format!("unparsable geocoding payload: {e}"),
            })?;

        let Some(hit) = payload.results.into_iter().next() else {
            return Err(ToolError::NotFound {
                tool: self.name().to_string(),
                query: place,
            });
        };

        let display_name = match hit.country {
            Some(country) => format!("{}, {country}", hit.name),
            None => hit.name,
        };

        Ok(serde_json::json!({
            "lat": hit.latitude,
            "lon": hit.longitude,
            "displayName": display_name,
        })
        .to_string())
    }
}

#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    #[serde(default)]
    results: Vec<GeocodingHit>,
}

#[derive(Debug, Deserialize)]
struct GeocodingHit {
    name: String,
    latitude: f64,
    longitude: f64,
    #[serde(default)]
    country: Option<String>,
}
