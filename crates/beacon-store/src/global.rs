//! Global chat store: one shared, append-only feed.
//!
//! No addressing, no per-user filtering, no pagination.  The full history
//! is the rendered list, and a fresh store is seeded with a single system
//! welcome message.

use beacon_shared::constants::GLOBAL_WELCOME_TEXT;
use beacon_shared::types::{MessageId, MessageKind, SenderId};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::models::GlobalMessage;

/// A mutation of the global feed.
#[derive(Debug, Clone, PartialEq)]
pub enum GlobalAction {
    /// Append a message to the feed.
    Post { message: GlobalMessage },
}

/// Snapshot of the app-wide feed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GlobalStore {
    messages: Vec<GlobalMessage>,
}

impl GlobalStore {
    /// A fresh feed, seeded with the system welcome message.
    pub fn new() -> Self {
        Self {
            messages: vec![GlobalMessage {
                id: MessageId::new(),
                author: SenderId::system(),
                is_self: false,
                kind: MessageKind::Text,
                text: GLOBAL_WELCOME_TEXT.to_string(),
                media: None,
                timestamp: Utc::now(),
            }],
        }
    }

    /// Apply one action, producing the next snapshot.
    pub fn apply(&self, action: GlobalAction) -> Self {
        match action {
            GlobalAction::Post { message } => {
                let mut messages = self.messages.clone();
                messages.push(message);
                Self { messages }
            }
        }
    }

    /// Append a message with a fresh id and the current time.
    pub fn post(
        &self,
        author: SenderId,
        is_self: bool,
        kind: MessageKind,
        text: impl Into<String>,
        media: Option<String>,
    ) -> Self {
        self.apply(GlobalAction::Post {
            message: GlobalMessage {
                id: MessageId::new(),
                author,
                is_self,
                kind,
                text: text.into(),
                media,
                timestamp: Utc::now(),
            },
        })
    }

    /// The full feed in append order.
    pub fn messages(&self) -> &[GlobalMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }
}

impl Default for GlobalStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_feed_contains_only_the_welcome_message() {
        let store = GlobalStore::new();

        assert_eq!(store.len(), 1);
        let seed = &store.messages()[0];
        assert!(seed.author.is_system());
        assert_eq!(seed.text, GLOBAL_WELCOME_TEXT);
        assert!(!seed.is_self);
    }

    #[test]
    fn posts_append_after_the_seed() {
        let store = GlobalStore::new()
            .post(SenderId::from("u1"), true, MessageKind::Text, "hello", None)
            .post(
                SenderId::from("u2"),
                false,
                MessageKind::Image,
                "",
                Some("https://cdn.example/pic.jpg".to_string()),
            );

        assert_eq!(store.len(), 3);
        assert_eq!(store.messages()[1].text, "hello");
        assert!(store.messages()[1].is_self);
        assert_eq!(
            store.messages()[2].media.as_deref(),
            Some("https://cdn.example/pic.jpg")
        );
        assert!(!store.messages()[2].author.is_system());
    }
}
