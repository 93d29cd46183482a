//! ActivityStore trait — the contract with the external activity platform.
//!
//! The platform owns the records; the core only ever creates new ones and
//! pages through existing ones. Listing returns records in **arrival order
//! (newest first)** with an opaque continuation cursor; callers that need
//! the full history must follow the cursor until it is exhausted.

use async_trait::async_trait;

use crate::activity::{ActivityContent, ActivityRecord};
use crate::error::StoreError;
use crate::message::SessionId;

/// One page of a session's activity timeline.
#[derive(Debug, Clone)]
pub struct ActivityPage {
    /// Records in arrival order (newest first).
    pub records: Vec<ActivityRecord>,

    /// Opaque token for the next page; `None` when the timeline is
    /// exhausted.
    pub next_cursor: Option<String>,
}

impl ActivityPage {
    /// An empty, final page.
    pub fn empty() -> Self {
        Self {
            records: Vec::new(),
            next_cursor: None,
        }
    }
}

/// The activity-storage contract.
///
/// Implementations: the HTTP platform client, and an in-memory store for
/// tests and ephemeral sessions.
#[async_trait]
pub trait ActivityStore: Send + Sync {
    /// A human-readable name for this store (e.g. "http", "in_memory").
    fn name(&self) -> &str;

    /// Append a new activity to the session's timeline.
    async fn create_activity(
        &self,
        session: &SessionId,
        content: ActivityContent,
    ) -> Result<ActivityRecord, StoreError>;

    /// List one page of the session's activities, newest first.
    ///
    /// Pass the previous page's `next_cursor` to continue; `None` starts
    /// from the most recent record. An unknown session yields an empty
    /// final page, not an error.
    async fn list_activities(
        &self,
        session: &SessionId,
        after_cursor: Option<&str>,
    ) -> Result<ActivityPage, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_page_has_no_cursor() {
        let page = ActivityPage::empty();
        assert!(page.records.is_empty());
        assert!(page.next_cursor.is_none());
    }
}
