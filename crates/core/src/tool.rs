//! Tool trait — the abstraction over the agent's lookup capabilities.
//!
//! Tools are the side-effecting leaves the turn loop invokes: geocoding,
//! weather, and time-of-day lookups. Every failure mode (network, non-2xx
//! status, unparsable payload, not-found) surfaces as a [`ToolError`] the
//! controller renders as result text — a tool never takes the loop down.

use async_trait::async_trait;
use std::collections::HashMap;

use crate::activity::ToolName;
use crate::error::ToolError;

/// Parsed, validated tool parameters.
///
/// The classifier hands the controller an opaque parameter string; the
/// controller parses it per tool before execution. Latitude precedes
/// longitude everywhere.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolParams {
    /// A free-text place name (geocoding).
    Place(String),
    /// A coordinate pair (weather, time).
    Coordinates { lat: f64, lon: f64 },
}

/// The core Tool trait.
///
/// Each lookup tool implements this and registers in the [`ToolRegistry`],
/// keyed by its closed [`ToolName`].
#[async_trait]
pub trait Tool: Send + Sync {
    /// The registered name of this tool.
    fn name(&self) -> ToolName;

    /// A description of what this tool does.
    fn description(&self) -> &str;

    /// Execute the tool and return a human-readable result string.
    async fn execute(&self, params: ToolParams) -> Result<String, ToolError>;
}

/// A registry of available tools, keyed by [`ToolName`].
///
/// The turn loop uses this to execute the tool an `ACTION:` reply names.
pub struct ToolRegistry {
    tools: HashMap<ToolName, Box<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Register a tool. Replaces any existing tool with the same name.
    pub fn register(&mut self, tool: Box<dyn Tool>) {
        self.tools.insert(tool.name(), tool);
    }

    /// Get a tool by name.
    pub fn get(&self, name: ToolName) -> Option<&dyn Tool> {
        self.tools.get(&name).map(|t| t.as_ref())
    }

    /// Execute the named tool with already-parsed parameters.
    pub async fn execute(&self, name: ToolName, params: ToolParams) -> Result<String, ToolError> {
        let tool = self
            .tools
            .get(&name)
            .ok_or_else(|| ToolError::NotRegistered(name.to_string()))?;
        tool.execute(params).await
    }

    /// List all registered tool names.
    pub fn names(&self) -> Vec<ToolName> {
        self.tools.keys().copied().collect()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
