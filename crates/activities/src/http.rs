//! HTTP activity store — the REST client for the collaboration platform.
//!
//! The platform owns all records. This client speaks a minimal shape:
//!
//! ```text
//! POST /sessions/{id}/activities          body: content payload
//! GET  /sessions/{id}/activities?after=…  -> { records, next_cursor }
//! ```
//!
//! Listing returns newest-first pages; `next_cursor` is opaque to us.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use stepline_core::activity::{ActivityContent, ActivityRecord};
use stepline_core::error::StoreError;
use stepline_core::message::SessionId;
use stepline_core::store::{ActivityPage, ActivityStore};
use tracing::{debug, warn};

/// A REST client for the external activity platform.
pub struct HttpActivityStore {
    base_url: String,
    api_token: Option<String>,
    client: reqwest::Client,
}

impl HttpActivityStore {
    /// Create a new client for the given platform base URL.
    pub fn new(base_url: impl Into<String>, api_token: Option<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_token,
            client,
        }
    }

    fn activities_url(&self, session: &SessionId) -> String {
        format!("{}/sessions/{}/activities", self.base_url, session.0)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_token {
            Some(token) => request.header("Authorization", format!("Bearer {token}")),
            None => request,
        }
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
        let status = response.status().as_u16();

        if status == 401 || status == 403 {
            return Err(StoreError::AuthenticationFailed(
                "Invalid platform token or insufficient permissions".into(),
            ));
        }

        if !(200..300).contains(&status) {
            let error_body = response.text().await.unwrap_or_default();
            warn!(status, body = %error_body, "Activity platform returned error");
            return Err(StoreError::ApiError {
                status_code: status,
                message: error_body,
            });
        }

        Ok(response)
    }
}

#[async_trait]
impl ActivityStore for HttpActivityStore {
    fn name(&self) -> &str {
        "http"
    }

    async fn create_activity(
        &self,
        session: &SessionId,
        content: ActivityContent,
    ) -> Result<ActivityRecord, StoreError> {
        debug!(session = %session, activity_type = ?content.activity_type(), "Creating activity");

        let request = self.client.post(self.activities_url(session)).json(&content);
        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;

        let response = Self::check_status(response).await?;

        let api_record: ApiRecord = response
            .json()
            .await
            .map_err(|e| StoreError::MalformedPayload(e.to_string()))?;

        Ok(api_record.into_record(session))
    }

    async fn list_activities(
        &self,
        session: &SessionId,
        after_cursor: Option<&str>,
    ) -> Result<ActivityPage, StoreError> {
        let mut request = self.client.get(self.activities_url(session));
        if let Some(cursor) = after_cursor {
            request = request.query(&[("after", cursor)]);
        }

        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;

        let response = Self::check_status(response).await?;

        let api_page: ApiPage = response
            .json()
            .await
            .map_err(|e| StoreError::MalformedPayload(e.to_string()))?;

        Ok(ActivityPage {
            records: api_page
                .records
                .into_iter()
                .map(|r| r.into_record(session))
                .collect(),
            next_cursor: api_page.next_cursor,
        })
    }
}

// --- Platform wire types (internal) ---

#[derive(Debug, Deserialize)]
struct ApiRecord {
    id: String,
    content: ActivityContent,
    #[serde(default = "Utc::now")]
    created_at: DateTime<Utc>,
}

impl ApiRecord {
    fn into_record(self, session: &SessionId) -> ActivityRecord {
        ActivityRecord {
            id: self.id,
            session_id: session.clone(),
            content: self.content,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ApiPage {
    records: Vec<ApiRecord>,
    #[serde(default)]
    next_cursor: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use stepline_core::activity::{ActivityType, ToolName};

    #[test]
    fn url_building() {
        let store = HttpActivityStore::new("http://platform.local/", None);
        assert_eq!(
            store.activities_url(&SessionId::from("s1")),
            "http://platform.local/sessions/s1/activities"
        );
    }

    #[test]
    fn parse_record_payload() {
        let data = r#"{
            "id": "act_1",
            "content": {"type": "action", "tool": "getWeather", "parameter": "48.85,2.35"},
            "created_at": "2024-05-01T12:00:00Z"
        }"#;
        let record: ApiRecord = serde_json::from_str(data).unwrap();
        let record = record.into_record(&SessionId::from("s1"));
        assert_eq!(record.id, "act_1");
        assert_eq!(record.content.activity_type(), ActivityType::Action);
        match record.content {
            ActivityContent::Action { tool, parameter, result } => {
                assert_eq!(tool, ToolName::GetWeather);
                assert_eq!(parameter.as_deref(), Some("48.85,2.35"));
                assert!(result.is_none());
            }
            other => panic!("unexpected content: {other:?}"),
        }
    }

    #[test]
    fn parse_page_with_cursor() {
        let data = r#"{
            "records": [
                {"id": "act_2", "content": {"type": "response", "body": "done"}},
                {"id": "act_1", "content": {"type": "prompt", "body": "hi"}}
            ],
            "next_cursor": "opaque-token"
        }"#;
        let page: ApiPage = serde_json::from_str(data).unwrap();
        assert_eq!(page.records.len(), 2);
        assert_eq!(page.next_cursor.as_deref(), Some("opaque-token"));
    }

    #[test]
    fn parse_final_page_without_cursor() {
        let data = r#"{"records": []}"#;
        let page: ApiPage = serde_json::from_str(data).unwrap();
        assert!(page.records.is_empty());
        assert!(page.next_cursor.is_none());
    }
}
