//! Configuration loading, validation, and management for Stepline.
//!
//! Loads configuration from `~/.stepline/config.toml` with environment
//! variable overrides. Validates all settings at startup.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `~/.stepline/config.toml`.
#[derive(Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Model provider API key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Model invocation configuration
    #[serde(default)]
    pub model: ModelConfig,

    /// Turn-loop configuration
    #[serde(default)]
    pub agent: AgentConfig,

    /// Activity platform configuration
    #[serde(default)]
    pub activities: ActivitiesConfig,

    /// Lookup service endpoints for the built-in tools
    #[serde(default)]
    pub tools: ToolsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Base URL of an OpenAI-compatible API
    #[serde(default = "default_model_api_url")]
    pub api_url: String,

    /// Model name
    #[serde(default = "default_model_name")]
    pub model: String,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

fn default_model_api_url() -> String {
    "https://api.openai.com/v1".into()
}
fn default_model_name() -> String {
    "gpt-4o-mini".into()
}
fn default_temperature() -> f32 {
    0.7
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            api_url: default_model_api_url(),
            model: default_model_name(),
            temperature: default_temperature(),
        }
    }
}

/// Turn-loop limits and pacing. All injected into the controller at
/// construction — no embedded literals in the loop itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Maximum model invocations per inbound prompt
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,

    /// Courtesy delay between loop iterations, in milliseconds
    #[serde(default = "default_courtesy_delay_ms")]
    pub courtesy_delay_ms: u64,

    /// Upper bound applied uniformly to every model and tool call,
    /// in seconds
    #[serde(default = "default_call_timeout_secs")]
    pub call_timeout_secs: u64,

    /// Override the built-in system prompt
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,
}

fn default_max_iterations() -> u32 {
    10
}
fn default_courtesy_delay_ms() -> u64 {
    1000
}
fn default_call_timeout_secs() -> u64 {
    60
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            max_iterations: default_max_iterations(),
            courtesy_delay_ms: default_courtesy_delay_ms(),
            call_timeout_secs: default_call_timeout_secs(),
            system_prompt: None,
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct ActivitiesConfig {
    /// Base URL of the activity platform API
    #[serde(default = "default_activities_api_url")]
    pub api_url: String,

    /// Bearer token for the activity platform
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,

    /// Page size used by the in-memory store (the platform chooses its
    /// own page size server-side)
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

fn default_activities_api_url() -> String {
    "http://localhost:8080".into()
}
fn default_page_size() -> usize {
    20
}

impl Default for ActivitiesConfig {
    fn default() -> Self {
        Self {
            api_url: default_activities_api_url(),
            api_token: None,
            page_size: default_page_size(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolsConfig {
    /// Forward-geocoding service base URL
    #[serde(default = "default_geocoding_url")]
    pub geocoding_url: String,

    /// Weather service base URL
    #[serde(default = "default_weather_url")]
    pub weather_url: String,

    /// Time-of-day service base URL
    #[serde(default = "default_time_url")]
    pub time_url: String,
}

fn default_geocoding_url() -> String {
    "https://geocoding-api.open-meteo.com/v1".into()
}
fn default_weather_url() -> String {
    "https://api.open-meteo.com/v1".into()
}
fn default_time_url() -> String {
    "https://timeapi.io/api".into()
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            geocoding_url: default_geocoding_url(),
            weather_url: default_weather_url(),
            time_url: default_time_url(),
        }
    }
}

/// Redact a secret string for Debug output.
fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &redact(&self.api_key))
            .field("model", &self.model)
            .field("agent", &self.agent)
            .field("activities", &self.activities)
            .field("tools", &self.tools)
            .finish()
    }
}

impl std::fmt::Debug for ActivitiesConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActivitiesConfig")
            .field("api_url", &self.api_url)
            .field("api_token", &redact(&self.api_token))
            .field("page_size", &self.page_size)
            .finish()
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.stepline/config.toml).
    ///
    /// Also checks environment variables:
    /// - `STEPLINE_API_KEY` (highest priority), then `OPENAI_API_KEY`
    /// - `STEPLINE_MODEL` overrides the model name
    /// - `STEPLINE_ACTIVITIES_URL` / `STEPLINE_ACTIVITIES_TOKEN`
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;

        if config.api_key.is_none() {
            config.api_key = std::env::var("STEPLINE_API_KEY")
                .ok()
                .or_else(|| std::env::var("OPENAI_API_KEY").ok());
        }

        if let Ok(model) = std::env::var("STEPLINE_MODEL") {
            config.model.model = model;
        }

        if let Ok(url) = std::env::var("STEPLINE_ACTIVITIES_URL") {
            config.activities.api_url = url;
        }

        if config.activities.api_token.is_none() {
            config.activities.api_token = std::env::var("STEPLINE_ACTIVITIES_TOKEN").ok();
        }

        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".stepline")
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.model.temperature < 0.0 || self.model.temperature > 2.0 {
            return Err(ConfigError::ValidationError(
                "model.temperature must be between 0.0 and 2.0".into(),
            ));
        }

        if self.agent.max_iterations == 0 {
            return Err(ConfigError::ValidationError(
                "agent.max_iterations must be at least 1".into(),
            ));
        }

        if self.activities.page_size == 0 {
            return Err(ConfigError::ValidationError(
                "activities.page_size must be at least 1".into(),
            ));
        }

        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: ModelConfig::default(),
            agent: AgentConfig::default(),
            activities: ActivitiesConfig::default(),
            tools: ToolsConfig::default(),
        }
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.agent.max_iterations, 10);
        assert_eq!(config.agent.courtesy_delay_ms, 1000);
        assert_eq!(config.agent.call_timeout_secs, 60);
    }

    #[test]
    fn config_roundtrip_toml() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.model.model, config.model.model);
        assert_eq!(parsed.agent.max_iterations, config.agent.max_iterations);
    }

    #[test]
    fn invalid_temperature_rejected() {
        let config = AppConfig {
            model: ModelConfig {
                temperature: 5.0,
                ..ModelConfig::default()
            },
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_iterations_rejected() {
        let config = AppConfig {
            agent: AgentConfig {
                max_iterations: 0,
                ..AgentConfig::default()
            },
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn missing_config_file_returns_defaults() {
        let result = AppConfig::load_from(Path::new("/nonexistent/config.toml"));
        assert!(result.is_ok());
        assert_eq!(result.unwrap().agent.max_iterations, 10);
    }

    #[test]
    fn partial_config_fills_defaults() {
        let toml_str = r#"
[agent]
max_iterations = 3
courtesy_delay_ms = 0

[tools]
geocoding_url = "http://localhost:9000"
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.agent.max_iterations, 3);
        assert_eq!(config.agent.courtesy_delay_ms, 0);
        assert_eq!(config.agent.call_timeout_secs, 60);
        assert_eq!(config.tools.geocoding_url, "http://localhost:9000");
        assert!(config.tools.weather_url.contains("open-meteo"));
    }

    #[test]
    fn debug_redacts_secrets() {
        let config = AppConfig {
            api_key: Some("sk-secret".into()),
            ..AppConfig::default()
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("sk-secret"));
        assert!(debug.contains("[REDACTED]"));
    }
}
