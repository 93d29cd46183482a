//! Model client implementations for Stepline.
//!
//! The turn loop only needs one thing from a model backend: send a system
//! prompt plus messages, get a free-text reply. The OpenAI-compatible
//! client covers OpenAI, OpenRouter, Ollama, vLLM, and any other backend
//! exposing a `/chat/completions` endpoint.

pub mod openai_compat;

pub use openai_compat::OpenAiCompatClient;
