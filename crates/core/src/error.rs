//! Error types for the Stepline domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant. The turn loop relies on
//! this split: tool errors degrade into result text fed back to the model,
//! while model, classification, and parameter errors terminate the turn as
//! a user-visible Error activity.

use thiserror::Error;

/// The top-level error type for all Stepline operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Model invocation errors ---
    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    // --- Activity store errors ---
    #[error("Activity store error: {0}")]
    Store(#[from] StoreError),

    // --- Tool errors ---
    #[error("Tool error: {0}")]
    Tool(#[from] ToolError),

    // --- Reply classification errors ---
    #[error("Classification error: {0}")]
    Classification(#[from] ClassificationError),

    // --- Tool parameter errors ---
    #[error("Parameter error: {0}")]
    Parameter(#[from] ParameterError),

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // --- Generic ---
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

#[derive(Debug, Clone, Error)]
pub enum ModelError {
    #[error("API request failed: {message} (status: {status_code})")]
    ApiError { status_code: u16, message: String },

    #[error("Rate limited by model provider, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Model invocation timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    #[error("Malformed model reply: {0}")]
    MalformedReply(String),

    #[error("Network error: {0}")]
    Network(String),
}

#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("Activity API request failed: {message} (status: {status_code})")]
    ApiError { status_code: u16, message: String },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Invalid pagination cursor: {0}")]
    InvalidCursor(String),

    #[error("Malformed activity payload: {0}")]
    MalformedPayload(String),

    #[error("Network error: {0}")]
    Network(String),
}

#[derive(Debug, Clone, Error)]
pub enum ToolError {
    #[error("Tool not registered: {0}")]
    NotRegistered(String),

    #[error("Invalid tool parameters for {tool}: {reason}")]
    InvalidParams { tool: String, reason: String },

    #[error("Lookup failed for {tool}: {reason}")]
    LookupFailed { tool: String, reason: String },

    #[error("No result found for {tool}: {query}")]
    NotFound { tool: String, query: String },

    #[error("Tool timed out: {tool} after {timeout_secs}s")]
    Timeout { tool: String, timeout_secs: u64 },
}

#[derive(Debug, Clone, Error)]
pub enum ClassificationError {
    #[error("Malformed action call (expected NAME(params)): {0}")]
    MalformedAction(String),

    #[error("Unknown tool name: {0}")]
    UnknownTool(String),
}

#[derive(Debug, Clone, Error)]
pub enum ParameterError {
    #[error("Missing required parameter for {tool}")]
    Missing { tool: String },

    #[error("Invalid coordinates for {tool} (expected \"lat,lon\"): {raw}")]
    InvalidCoordinates { tool: String, raw: String },
}
