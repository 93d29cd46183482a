//! Activity store implementations for Stepline.
//!
//! Two backends implement the [`stepline_core::ActivityStore`] contract:
//!
//! - [`HttpActivityStore`] — the REST client for the external
//!   collaboration platform that owns all records.
//! - [`InMemoryActivityStore`] — a paging store for tests, demos, and
//!   ephemeral sessions.

pub mod http;
pub mod in_memory;

pub use http::HttpActivityStore;
pub use in_memory::InMemoryActivityStore;
