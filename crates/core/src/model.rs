//! ModelClient trait — the abstraction over the language model.
//!
//! The turn loop treats the model as a black-box request/response
//! function: a system prompt plus an ordered message sequence in, a single
//! free-text reply out. No streaming — the classifier needs the complete
//! reply before it can do anything.

use async_trait::async_trait;

use crate::error::ModelError;
use crate::message::Message;

/// The model invocation contract.
///
/// Implementations: OpenAI-compatible HTTP backends, scripted mocks in
/// tests.
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// A human-readable name for this client (e.g. "openai", "scripted").
    fn name(&self) -> &str;

    /// Send the system prompt and conversation to the model and return
    /// its raw free-text reply.
    async fn invoke(
        &self,
        system_prompt: &str,
        messages: &[Message],
    ) -> Result<String, ModelError>;
}
