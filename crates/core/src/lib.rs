//! # Stepline Core
//!
//! Domain types, traits, and error definitions for the Stepline activity
//! agent. This crate has **zero framework dependencies** — it defines the
//! domain model that all other crates implement against.
//!
//! ## Design Philosophy
//!
//! Every external collaborator is defined as a trait here: the language
//! model ([`ModelClient`]), the activity-storage platform
//! ([`ActivityStore`]), and the lookup tools ([`Tool`]). Implementations
//! live in their respective crates. This enables:
//! - Swapping implementations via configuration
//! - Easy testing with mock/stub implementations
//! - Clean dependency graph (all crates depend inward on core)

pub mod activity;
pub mod error;
pub mod message;
pub mod model;
pub mod store;
pub mod tool;

// Re-export key types at crate root for ergonomics
pub use activity::{ActivityContent, ActivityRecord, ActivityType, ToolName};
pub use error::{Error, Result};
pub use message::{Message, Role, SessionId};
pub use model::ModelClient;
pub use store::{ActivityPage, ActivityStore};
pub use tool::{Tool, ToolParams, ToolRegistry};
