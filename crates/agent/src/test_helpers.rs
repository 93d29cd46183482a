//! Shared mock model and tool implementations for controller tests.

use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use stepline_core::activity::ToolName;
use stepline_core::error::{ModelError, ToolError};
use stepline_core::message::Message;
use stepline_core::model::ModelClient;
use stepline_core::tool::{Tool, ToolParams};

/// A model that replays a fixed script of replies, one per invocation,
/// repeating the last reply once the script runs out. Records every
/// message list it was shown.
pub(crate) struct ScriptedModel {
    replies: Vec<String>,
    calls: AtomicUsize,
    seen: Mutex<Vec<Vec<Message>>>,
}

impl ScriptedModel {
    pub(crate) fn new(replies: &[&str]) -> Self {
        Self {
            replies: replies.iter().map(|r| r.to_string()).collect(),
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        }
    }

    /// Number of times the model was invoked.
    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// The message lists passed to each invocation, in order.
    pub(crate) fn seen(&self) -> Vec<Vec<Message>> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl ModelClient for ScriptedModel {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn invoke(
        &self,
        _system_prompt: &str,
        messages: &[Message],
    ) -> Result<String, ModelError> {
        self.seen.lock().unwrap().push(messages.to_vec());
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        self.replies
            .get(call)
            .or_else(|| self.replies.last())
            .cloned()
            .ok_or_else(|| ModelError::MalformedReply("empty script".into()))
    }
}

/// A model whose every invocation fails with a network error.
pub(crate) struct FailingModel;

#[async_trait]
impl ModelClient for FailingModel {
    fn name(&self) -> &str {
        "failing"
    }

    async fn invoke(
        &self,
        _system_prompt: &str,
        _messages: &[Message],
    ) -> Result<String, ModelError> {
        Err(ModelError::Network("connection refused".into()))
    }
}

/// A geocoding stub that returns a fixed result string for any place.
pub(crate) struct StubCoordinatesTool {
    pub(crate) reply: String,
}

#[async_trait]
impl Tool for StubCoordinatesTool {
    fn name(&self) -> ToolName {
        ToolName::GetCoordinates
    }

    fn description(&self) -> &str {
        "Stub geocoder with a fixed reply"
    }

    async fn execute(&self, params: ToolParams) -> Result<String, ToolError> {
        match params {
            ToolParams::Place(_) => Ok(self.reply.clone()),
            other => Err(ToolError::InvalidParams {
                tool: self.name().to_string(),
                reason: format!("expected a place name, got {other:?}"),
            }),
        }
    }
}

/// A tool that always fails its lookup.
pub(crate) struct FailingTool {
    pub(crate) name: ToolName,
}

#[async_trait]
impl Tool for FailingTool {
    fn name(&self) -> ToolName {
        self.name
    }

    fn description(&self) -> &str {
        "Stub tool that always fails"
    }

    async fn execute(&self, _params: ToolParams) -> Result<String, ToolError> {
        Err(ToolError::LookupFailed {
            tool: self.name.to_string(),
            reason: "backend unavailable".into(),
        })
    }
}
