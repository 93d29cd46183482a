//! Current-weather tool backed by the Open-Meteo forecast API.
//!
//! Takes a coordinate pair and returns a one-line human-readable
//! description of the current conditions.

use async_trait::async_trait;
use serde::Deserialize;
use stepline_core::activity::ToolName;
use stepline_core::error::ToolError;
use stepline_core::tool::{Tool, ToolParams};
use tracing::debug;

pub struct WeatherTool {
    base_url: String,
    client: reqwest::Client,
}

impl WeatherTool {
    /// Create a weather tool against the given API base URL
    /// (e.g. `https://api.open-meteo.com/v1`).
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
impl Tool for WeatherTool {
    fn name(&self) -> ToolName {
        ToolName::GetWeather
    }

    fn description(&self) -> &str {
        "Look up the current weather at a latitude/longitude pair."
    }

    async fn execute(&self, params: ToolParams) -> Result<String, ToolError> {
        let (lat, lon) = match params {
            ToolParams::Coordinates { lat, lon } => (lat, lon),
            other => {
                return Err(ToolError::InvalidParams {
                    tool: self.name().to_string(),
                    reason: format!("expected coordinates, got {other:?}"),
                });
            }
        };

        debug!(lat, lon, "Looking up current weather");

        let url = format!("{}/forecast", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("latitude", lat.to_string()),
                ("longitude", lon.to_string()),
                ("current_weather", "true".to_string()),
            ])
            .send()
            .await
            .map_err(|e| ToolError::LookupFailed {
                tool: self.name().to_string(),
                reason: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(ToolError::LookupFailed {
                tool: self.name().to_string(),
                reason: format!("weather API returned status {}", response.status()),
            });
        }

        let payload: ForecastResponse =
            response.json().await.map_err(|e| ToolError::LookupFailed {
                tool: self.name().to_string(),
                reason: format!("unparsable weather payload: {e}"),
            })?;

        let Some(current) = payload.current_weather else {
            return Err(ToolError::LookupFailed {
                tool: self.name().to_string(),
                reason: "weather payload missing current conditions".into(),
            });
        };

        Ok(format!(
            "{}, {}°C, wind {} km/h",
            describe_weather_code(current.weathercode),
            current.temperature,
            current.windspeed,
        ))
    }
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    #[serde(default)]
    current_weather: Option<CurrentWeather>,
}

#[derive(Debug, Deserialize)]
struct CurrentWeather {
    temperature: f64,
    windspeed: f64,
    weathercode: u8,
}

/// Map a WMO weather interpretation code to a short description.
pub fn describe_weather_code(code: u8) -> &'static str {
    match code {
        0 => "Clear sky",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 | 48 => "Fog",
        51 | 53 | 55 => "Drizzle",
        56 | 57 => "Freezing drizzle",
        61 | 63 | 65 => "Rain",
        66 | 67 => "Freezing rain",
        71 | 73 | 75 => "Snowfall",
        77 => "Snow grains",
        80 | 81 | 82 => "Rain showers",
        85 | 86 => "Snow showers",
        95 => "Thunderstorm",
        96 | 99 => "Thunderstorm with hail",
        _ => "Unknown conditions",
    }
}
