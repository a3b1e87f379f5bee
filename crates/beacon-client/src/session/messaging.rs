//! Direct-chat and global-feed operations.

use beacon_shared::types::{Contact, ContactId, ConversationId, MessageId, MessageKind, SenderId};
use beacon_store::{Conversation, GlobalMessage, Message};
use chrono::Utc;
use tracing::info;

use crate::error::Result;
use crate::events::StoreEvent;
use crate::relay::RelayCommand;
use crate::session::Session;

impl Session {
    // ------------------------------------------------------------------
    // Direct chats
    // ------------------------------------------------------------------

    /// Ensure a conversation exists for `contact`.
    ///
    /// Called on entry to a chat screen; idempotent, so a double-tap from
    /// two entry points still yields a single thread.
    pub fn open_conversation(&self, contact: Contact) -> Result<()> {
        let contact_id = contact.id.clone();

        let created = {
            let mut guard = self.lock()?;
            let before = guard.chats.len();
            guard.chats = guard.chats.add_conversation(contact);
            guard.chats.len() > before
        };

        if created {
            info!(contact = %contact_id, "Conversation opened");
            self.emit(StoreEvent::ConversationAdded {
                contact_id: contact_id.0,
            });
        }
        Ok(())
    }

    /// Append `message` to the conversation for `contact_id`, then attempt
    /// remote delivery.
    ///
    /// The local append is unconditional and is the source of truth for
    /// rendering; relay failure is reported but never rolled back.  If no
    /// conversation exists the store drops the message silently — callers
    /// open the conversation on screen entry.
    pub fn send_direct_message(&self, contact_id: &ContactId, message: Message) -> Result<MessageId> {
        let message_id = message.id;

        let appended = {
            let mut guard = self.lock()?;
            let next = guard.chats.add_message(contact_id, message.clone());
            let appended = next != guard.chats;
            guard.chats = next;
            appended
        };

        if !appended {
            return Ok(message_id);
        }

        self.emit(StoreEvent::MessageAdded {
            contact_id: contact_id.0.clone(),
            message_id: message_id.to_string(),
        });

        self.relay(RelayCommand::DeliverDirect {
            contact_id: contact_id.clone(),
            message,
        });

        info!(msg_id = %message_id, contact = %contact_id, "Message sent");
        Ok(message_id)
    }

    /// Remove a conversation.  Idempotent.
    pub fn remove_conversation(&self, conversation_id: ConversationId) -> Result<()> {
        {
            let mut guard = self.lock()?;
            guard.chats = guard.chats.remove_conversation(conversation_id);
        }
        self.emit(StoreEvent::ConversationRemoved {
            conversation_id: conversation_id.to_string(),
        });
        Ok(())
    }

    /// Cloned snapshot of all conversations, most recently created first.
    pub fn conversations(&self) -> Result<Vec<Conversation>> {
        Ok(self.lock()?.chats.conversations().to_vec())
    }

    /// Cloned snapshot of the conversation for `contact_id`, if any.
    pub fn conversation_for(&self, contact_id: &ContactId) -> Result<Option<Conversation>> {
        Ok(self.lock()?.chats.conversation_for(contact_id).cloned())
    }

    // ------------------------------------------------------------------
    // Global feed
    // ------------------------------------------------------------------

    /// Append a message to the shared global feed.
    ///
    /// `is_self` marks messages authored on this device; only those are
    /// relayed out (inbound feed messages arrive already delivered).
    pub fn post_global_message(
        &self,
        author: SenderId,
        is_self: bool,
        kind: MessageKind,
        text: impl Into<String>,
        media: Option<String>,
    ) -> Result<MessageId> {
        let message = GlobalMessage {
            id: MessageId::new(),
            author,
            is_self,
            kind,
            text: text.into(),
            media,
            timestamp: Utc::now(),
        };
        let message_id = message.id;

        {
            let mut guard = self.lock()?;
            guard.global = guard.global.apply(beacon_store::GlobalAction::Post {
                message: message.clone(),
            });
        }

        self.emit(StoreEvent::GlobalMessagePosted {
            message_id: message_id.to_string(),
        });

        if is_self {
            self.relay(RelayCommand::PostGlobal { message });
        }

        Ok(message_id)
    }

    /// Cloned snapshot of the full global feed.
    pub fn global_feed(&self) -> Result<Vec<GlobalMessage>> {
        Ok(self.lock()?.global.messages().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    fn contact(id: &str, name: &str) -> Contact {
        Contact {
            id: ContactId::from(id),
            display_name: name.to_string(),
            avatar: None,
        }
    }

    #[test]
    fn open_then_send_end_to_end() {
        let session = Session::new();
        let mut events = session.subscribe();

        session.open_conversation(contact("u1", "Alice")).unwrap();
        session
            .send_direct_message(
                &ContactId::from("u1"),
                Message::text(SenderId::from("me"), "hi"),
            )
            .unwrap();

        let conversations = session.conversations().unwrap();
        assert_eq!(conversations.len(), 1);
        assert_eq!(conversations[0].messages.len(), 1);
        assert_eq!(conversations[0].last_message_preview, "hi");

        assert!(matches!(
            events.try_recv().unwrap(),
            StoreEvent::ConversationAdded { .. }
        ));
        assert!(matches!(
            events.try_recv().unwrap(),
            StoreEvent::MessageAdded { .. }
        ));
        // No relay attached: the send still lands locally and the failure
        // is reported as an event.
        assert!(matches!(
            events.try_recv().unwrap(),
            StoreEvent::RelayFailed { .. }
        ));
    }

    #[test]
    fn duplicate_open_emits_once() {
        let session = Session::new();
        let mut events = session.subscribe();

        session.open_conversation(contact("u1", "Alice")).unwrap();
        session.open_conversation(contact("u1", "Alice")).unwrap();

        assert_eq!(session.conversations().unwrap().len(), 1);
        assert!(matches!(
            events.try_recv().unwrap(),
            StoreEvent::ConversationAdded { .. }
        ));
        assert!(events.try_recv().is_err());
    }

    #[test]
    fn send_to_unknown_contact_stays_silent() {
        let session = Session::new();
        let mut events = session.subscribe();

        session
            .send_direct_message(
                &ContactId::from("nobody"),
                Message::text(SenderId::from("me"), "hello?"),
            )
            .unwrap();

        assert!(session.conversations().unwrap().is_empty());
        assert!(events.try_recv().is_err());
    }

    #[test]
    fn relay_failure_keeps_local_append() {
        let session = Session::new();

        // Dropped receiver: every try_send fails as closed.
        let (tx, rx) = mpsc::channel(1);
        drop(rx);
        session.state().lock().unwrap().relay_tx = Some(tx);

        session.open_conversation(contact("u1", "Alice")).unwrap();
        let mut events = session.subscribe();
        session
            .send_direct_message(
                &ContactId::from("u1"),
                Message::text(SenderId::from("me"), "still here"),
            )
            .unwrap();

        let conv = session
            .conversation_for(&ContactId::from("u1"))
            .unwrap()
            .unwrap();
        assert_eq!(conv.messages.len(), 1);
        assert_eq!(conv.messages[0].text, "still here");

        assert!(matches!(
            events.try_recv().unwrap(),
            StoreEvent::MessageAdded { .. }
        ));
        assert!(matches!(
            events.try_recv().unwrap(),
            StoreEvent::RelayFailed { .. }
        ));
    }

    #[test]
    fn successful_relay_enqueues_the_message() {
        let session = Session::new();
        let (tx, mut rx) = mpsc::channel(8);
        session.state().lock().unwrap().relay_tx = Some(tx);

        session.open_conversation(contact("u1", "Alice")).unwrap();
        session
            .send_direct_message(
                &ContactId::from("u1"),
                Message::text(SenderId::from("me"), "over the wire"),
            )
            .unwrap();

        match rx.try_recv().unwrap() {
            RelayCommand::DeliverDirect { contact_id, message } => {
                assert_eq!(contact_id.as_str(), "u1");
                assert_eq!(message.text, "over the wire");
            }
            other => panic!("unexpected relay command: {other:?}"),
        }
    }

    #[test]
    fn global_feed_starts_seeded_and_appends() {
        let session = Session::new();
        let (tx, mut rx) = mpsc::channel(8);
        session.state().lock().unwrap().relay_tx = Some(tx);

        session
            .post_global_message(SenderId::from("u1"), true, MessageKind::Text, "hello all", None)
            .unwrap();
        // Inbound message from another device: no relay.
        session
            .post_global_message(SenderId::from("u2"), false, MessageKind::Text, "hi back", None)
            .unwrap();

        let feed = session.global_feed().unwrap();
        assert_eq!(feed.len(), 3);
        assert!(feed[0].author.is_system());
        assert_eq!(feed[1].text, "hello all");

        assert!(matches!(
            rx.try_recv().unwrap(),
            RelayCommand::PostGlobal { .. }
        ));
        assert!(rx.try_recv().is_err());
    }
}
