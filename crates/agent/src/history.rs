//! Session history reconstruction.
//!
//! The loop holds no durable state between inbound prompts: a session's
//! transcript is rebuilt from the activity store on every turn. Only
//! prompts and responses feed the model; all other activity types are
//! step-tracking noise and stay out of the context window.

use stepline_core::activity::{ActivityContent, ActivityRecord};
use stepline_core::error::StoreError;
use stepline_core::message::{Message, SessionId};
use stepline_core::store::ActivityStore;
use tracing::debug;

/// Load a session's prior conversation from the activity store.
///
/// Pages through the store until the cursor is exhausted — stopping a
/// page early silently truncates model context, so the walk is total.
/// Records arrive newest first and are reversed to chronological order;
/// prompts map to human messages, responses to assistant messages. An
/// empty session yields an empty sequence.
pub async fn load_history(
    store: &dyn ActivityStore,
    session: &SessionId,
) -> Result<Vec<Message>, StoreError> {
    let mut records: Vec<ActivityRecord> = Vec::new();
    let mut cursor: Option<String> = None;

    loop {
        let page = store.list_activities(session, cursor.as_deref()).await?;
        records.extend(page.records);
        match page.next_cursor {
            Some(next) => cursor = Some(next),
            None => break,
        }
    }

    let messages: Vec<Message> = records
        .into_iter()
        .rev()
        .filter_map(|record| match record.content {
            ActivityContent::Prompt { body } => Some(Message::human(body)),
            ActivityContent::Response { body } => Some(Message::assistant(body)),
            _ => None,
        })
        .collect();

    debug!(session = %session, messages = messages.len(), "Reconstructed session history");
    Ok(messages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use stepline_activities::InMemoryActivityStore;
    use stepline_core::activity::ToolName;
    use stepline_core::message::Role;

    #[tokio::test]
    async fn empty_session_yields_empty_history() {
        let store = InMemoryActivityStore::new();
        let history = load_history(&store, &SessionId::from("fresh")).await.unwrap();
        assert!(history.is_empty());
    }

    #[tokio::test]
    async fn filters_to_prompts_and_responses() {
        let store = InMemoryActivityStore::new();
        let session = SessionId::from("s1");

        store
            .create_activity(&session, ActivityContent::Prompt { body: "q1".into() })
            .await
            .unwrap();
        store
            .create_activity(&session, ActivityContent::Thought { body: "hmm".into() })
            .await
            .unwrap();
        store
            .create_activity(
                &session,
                ActivityContent::Action {
                    tool: ToolName::GetTime,
                    parameter: Some("48.85,2.35".into()),
                    result: Some("14:30".into()),
                },
            )
            .await
            .unwrap();
        store
            .create_activity(&session, ActivityContent::Response { body: "a1".into() })
            .await
            .unwrap();

        let history = load_history(&store, &session).await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].role, Role::Human);
        assert_eq!(history[0].content, "q1");
        assert_eq!(history[1].role, Role::Assistant);
        assert_eq!(history[1].content, "a1");
    }

    #[tokio::test]
    async fn pagination_is_exhaustive_and_chronological() {
        // Five turns across three pages of two; the walk must cover all
        // of them and restore chronological order.
        let store = InMemoryActivityStore::new().with_page_size(2);
        let session = SessionId::from("s1");

        for i in 0..5 {
            let content = if i % 2 == 0 {
                ActivityContent::Prompt { body: format!("q{i}") }
            } else {
                ActivityContent::Response { body: format!("a{i}") }
            };
            store.create_activity(&session, content).await.unwrap();
        }

        let history = load_history(&store, &session).await.unwrap();
        assert_eq!(history.len(), 5);

        let contents: Vec<_> = history.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["q0", "a1", "q2", "a3", "q4"]);
        assert_eq!(history[0].role, Role::Human);
        assert_eq!(history[1].role, Role::Assistant);
    }
}
