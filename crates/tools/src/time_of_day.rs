//! Local-time tool backed by the timeapi.io coordinate endpoint.
//!
//! Takes a coordinate pair and returns the local date, time, and time
//! zone at that location.

use async_trait::async_trait;
use serde::Deserialize;
use stepline_core::activity::ToolName;
use stepline_core::error::ToolError;
use stepline_core::tool::{Tool, ToolParams};
use tracing::debug;

pub struct TimeTool {
    base_url: String,
    client: reqwest::Client,
}

impl TimeTool {
    /// Create a time tool against the given API base URL
    /// (e.g. `https://timeapi.io/api`).
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
impl Tool for TimeTool {
    fn name(&self) -> ToolName {
        ToolName::GetTime
    }

    fn description(&self) -> &str {
        "Look up the current local time at a latitude/longitude pair."
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

        debug!(lat, lon, "Looking up local time");

        let url = format!("{}/Time/current/coordinate", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("latitude", lat.to_string()),
                ("longitude", lon.to_string()),
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
                reason: format!("time API returned status {}", response.status()),
            });
        }

        let payload: TimeResponse =
            response.json().await.map_err(|e| ToolError::LookupFailed {
                tool: self.name().to_string(),
                reason: format!("unparsable time payload: {e}"),
            })?;

        Ok(format!(
            "{} {} ({})",
            payload.date, payload.time, payload.time_zone
        ))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TimeResponse {
    date: String,
    time: String,
    time_zone: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_identity() {
        let tool = TimeTool::new("https://timeapi.io/api");
        assert_eq!(tool.name(), ToolName::GetTime);
    }

    #[test]
    fn parse_time_payload() {
        let data = r#"{
            "year": 2024,
            "month": 5,
            "day": 1,
            "hour": 14,
            "minute": 30,
            "date": "05/01/2024",
            "time": "14:30",
            "timeZone": "Europe/Paris",
            "dayOfWeek": "Wednesday"
        }"#;
        let parsed: TimeResponse = serde_json::from_str(data).unwrap();
        assert_eq!(parsed.time, "14:30");
        assert_eq!(parsed.time_zone, "Europe/Paris");
    }

    #[tokio::test]
    async fn place_params_rejected() {
        let tool = TimeTool::new("http://localhost:9");
        let err = tool
            .execute(ToolParams::Place("Paris".into()))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidParams { .. }));
    }
}
