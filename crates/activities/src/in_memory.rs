//! In-memory activity store — useful for testing and ephemeral sessions.
//!
//! Mirrors the platform's observable behavior: records are append-only,
//! and listing pages through them newest first with an offset cursor.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use stepline_core::activity::{ActivityContent, ActivityRecord};
use stepline_core::error::StoreError;
use stepline_core::message::SessionId;
use stepline_core::store::{ActivityPage, ActivityStore};
use tokio::sync::RwLock;

/// An in-memory activity store keyed by session.
pub struct InMemoryActivityStore {
    sessions: Arc<RwLock<HashMap<String, Vec<ActivityRecord>>>>,
    page_size: usize,
}

impl InMemoryActivityStore {
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            page_size: 20,
        }
    }

    /// Set the page size used by `list_activities`.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// All records for a session in chronological order. Test/demo helper;
    /// production callers page via the trait.
    pub async fn all(&self, session: &SessionId) -> Vec<ActivityRecord> {
        self.sessions
            .read()
            .await
            .get(&session.0)
            .cloned()
            .unwrap_or_default()
    }
}

impl Default for InMemoryActivityStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ActivityStore for InMemoryActivityStore {
    fn name(&self) -> &str {
        "in_memory"
    }

    async fn create_activity(
        &self,
        session: &SessionId,
        content: ActivityContent,
    ) -> Result<ActivityRecord, StoreError> {
        let record = ActivityRecord::new(session.clone(), content);
        let mut sessions = self.sessions.write().await;
        sessions
            .entry(session.0.clone())
            .or_default()
            .push(record.clone());
        Ok(record)
    }

    async fn list_activities(
        &self,
        session: &SessionId,
        after_cursor: Option<&str>,
    ) -> Result<ActivityPage, StoreError> {
        let sessions = self.sessions.read().await;
        let Some(records) = sessions.get(&session.0) else {
            return Ok(ActivityPage::empty());
        };

        let offset = match after_cursor {
            Some(cursor) => cursor
                .parse::<usize>()
                .map_err(|_| StoreError::InvalidCursor(cursor.to_string()))?,
            None => 0,
        };

        // Newest first: walk the append-ordered Vec from the back.
        let page: Vec<ActivityRecord> = records
            .iter()
            .rev()
            .skip(offset)
            .take(self.page_size)
            .cloned()
            .collect();

        let consumed = offset + page.len();
        let next_cursor = if consumed < records.len() {
            Some(consumed.to_string())
        } else {
            None
        };

        Ok(ActivityPage {
            records: page,
            next_cursor,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stepline_core::activity::ActivityType;

    fn prompt(body: &str) -> ActivityContent {
        ActivityContent::Prompt { body: body.into() }
    }

    #[tokio::test]
    async fn create_and_list() {
        let store = InMemoryActivityStore::new();
        let session = SessionId::from("s1");

        let record = store.create_activity(&session, prompt("hello")).await.unwrap();
        assert!(!record.id.is_empty());

        let page = store.list_activities(&session, None).await.unwrap();
        assert_eq!(page.records.len(), 1);
        assert!(page.next_cursor.is_none());
        assert_eq!(page.records[0].content.activity_type(), ActivityType::Prompt);
    }

    #[tokio::test]
    async fn unknown_session_yields_empty_page() {
        let store = InMemoryActivityStore::new();
        let page = store
            .list_activities(&SessionId::from("nope"), None)
            .await
            .unwrap();
        assert!(page.records.is_empty());
        assert!(page.next_cursor.is_none());
    }

    #[tokio::test]
    async fn listing_is_newest_first() {
        let store = InMemoryActivityStore::new();
        let session = SessionId::from("s1");

        store.create_activity(&session, prompt("first")).await.unwrap();
        store.create_activity(&session, prompt("second")).await.unwrap();

        let page = store.list_activities(&session, None).await.unwrap();
        let bodies: Vec<_> = page
            .records
            .iter()
            .map(|r| match &r.content {
                ActivityContent::Prompt { body } => body.clone(),
                other => panic!("unexpected content: {other:?}"),
            })
            .collect();
        assert_eq!(bodies, vec!["second", "first"]);
    }

    #[tokio::test]
    async fn cursor_walks_all_pages() {
        let store = InMemoryActivityStore::new().with_page_size(2);
        let session = SessionId::from("s1");

        for i in 0..5 {
            store
                .create_activity(&session, prompt(&format!("p{i}")))
                .await
                .unwrap();
        }

        let mut cursor: Option<String> = None;
        let mut seen = Vec::new();
        let mut pages = 0;
        loop {
            let page = store
                .list_activities(&session, cursor.as_deref())
                .await
                .unwrap();
            seen.extend(page.records);
            pages += 1;
            match page.next_cursor {
                Some(next) => cursor = Some(next),
                None => break,
            }
        }

        assert_eq!(seen.len(), 5);
        assert_eq!(pages, 3);
    }

    #[tokio::test]
    async fn invalid_cursor_rejected() {
        let store = InMemoryActivityStore::new();
        let session = SessionId::from("s1");
        store.create_activity(&session, prompt("hello")).await.unwrap();

        let err = store
            .list_activities(&session, Some("not-a-number"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidCursor(_)));
    }

    #[tokio::test]
    async fn sessions_are_isolated() {
        let store = InMemoryActivityStore::new();
        store
            .create_activity(&SessionId::from("a"), prompt("for a"))
            .await
            .unwrap();

        let page = store
            .list_activities(&SessionId::from("b"), None)
            .await
            .unwrap();
        assert!(page.records.is_empty());
    }
}
