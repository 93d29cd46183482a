//! Activity domain types.
//!
//! An activity is one recorded step in a session's timeline: the inbound
//! prompt, an intermediate thought, a tool action (announced and then
//! completed), or one of the three terminal steps (response, elicitation,
//! error). Records are owned and persisted by the external activity
//! platform; the core only creates and reads them, never mutates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ClassificationError;
use crate::message::SessionId;

/// The closed set of tool names the agent may invoke.
///
/// Validated at classification time — an unrecognized name is a
/// classification error, never a silent no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ToolName {
    #[serde(rename = "getCoordinates")]
    GetCoordinates,
    #[serde(rename = "getWeather")]
    GetWeather,
    #[serde(rename = "getTime")]
    GetTime,
}

impl ToolName {
    /// All registered tool names, in a stable order.
    pub const ALL: [ToolName; 3] = [
        ToolName::GetCoordinates,
        ToolName::GetWeather,
        ToolName::GetTime,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ToolName::GetCoordinates => "getCoordinates",
            ToolName::GetWeather => "getWeather",
            ToolName::GetTime => "getTime",
        }
    }
}

impl std::fmt::Display for ToolName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ToolName {
    type Err = ClassificationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "getCoordinates" => Ok(ToolName::GetCoordinates),
            "getWeather" => Ok(ToolName::GetWeather),
            "getTime" => Ok(ToolName::GetTime),
            other => Err(ClassificationError::UnknownTool(other.to_string())),
        }
    }
}

/// The type tag of an activity record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActivityType {
    Prompt,
    Thought,
    Action,
    Response,
    Elicitation,
    Error,
}

/// The typed content payload of an activity record.
///
/// Exactly one variant per unit. An `Action` is recorded twice per tool
/// call: once pre-execution (`result: None`) and once post-execution
/// (`result: Some(..)`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ActivityContent {
    Prompt {
        body: String,
    },
    Thought {
        body: String,
    },
    Action {
        tool: ToolName,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        parameter: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        result: Option<String>,
    },
    Response {
        body: String,
    },
    Elicitation {
        body: String,
    },
    Error {
        body: String,
    },
}

impl ActivityContent {
    /// The type tag matching this content payload.
    pub fn activity_type(&self) -> ActivityType {
        match self {
            ActivityContent::Prompt { .. } => ActivityType::Prompt,
            ActivityContent::Thought { .. } => ActivityType::Thought,
            ActivityContent::Action { .. } => ActivityType::Action,
            ActivityContent::Response { .. } => ActivityType::Response,
            ActivityContent::Elicitation { .. } => ActivityType::Elicitation,
            ActivityContent::Error { .. } => ActivityType::Error,
        }
    }

    /// Whether this content ends the turn loop.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ActivityContent::Response { .. }
                | ActivityContent::Elicitation { .. }
                | ActivityContent::Error { .. }
        )
    }
}

/// A persisted activity, as returned by the activity platform.
///
/// Append-only and server-owned: the core never mutates or deletes one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityRecord {
    /// Server-assigned record ID
    pub id: String,

    /// The session this activity belongs to
    pub session_id: SessionId,

    /// The typed content payload
    pub content: ActivityContent,

    /// When the record was created
    pub created_at: DateTime<Utc>,
}

impl ActivityRecord {
    /// Create a fresh record with a generated ID (used by store
    /// implementations that assign IDs locally).
    pub fn new(session_id: SessionId, content: ActivityContent) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            session_id,
            content,
            created_at: Utc::now(),
        }
    }
}
