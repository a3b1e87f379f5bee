//! Direct-chat store: the list of one-to-one conversations.
//!
//! The store is an immutable snapshot.  [`ChatStore::apply`] is the single
//! reducer every mutation goes through; the named helpers construct an
//! action and delegate to it, so no code path can mutate a snapshot out of
//! band.

use beacon_shared::types::{Contact, ContactId, ConversationId};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{Conversation, Message};

/// A mutation of the direct-chat store.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatAction {
    /// Create a conversation for `contact`.  No-op if one already exists
    /// for the same contact id.
    AddConversation { contact: Contact },
    /// Append `message` to the conversation for `contact_id`.  No-op if no
    /// conversation matches.
    AddMessage {
        contact_id: ContactId,
        message: Message,
    },
    /// Remove the conversation with `conversation_id`.  No-op if absent.
    RemoveConversation { conversation_id: ConversationId },
}

/// Snapshot of all one-to-one conversations.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ChatStore {
    conversations: Vec<Conversation>,
}

impl ChatStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Reducer
    // ------------------------------------------------------------------

    /// Apply one action, producing the next snapshot.
    ///
    /// Never fails: actions referencing unknown conversations return the
    /// snapshot unchanged.
    pub fn apply(&self, action: ChatAction) -> Self {
        match action {
            ChatAction::AddConversation { contact } => {
                if self.conversation_for(&contact.id).is_some() {
                    // Creation is dedup-checked: a double-tap from two UI
                    // entry points must not produce a second thread.
                    debug!(contact = %contact.id, "conversation already exists");
                    return self.clone();
                }
                let mut conversations = Vec::with_capacity(self.conversations.len() + 1);
                conversations.push(Conversation::new(contact));
                conversations.extend(self.conversations.iter().cloned());
                Self { conversations }
            }
            ChatAction::AddMessage {
                contact_id,
                message,
            } => {
                if self.conversation_for(&contact_id).is_none() {
                    debug!(contact = %contact_id, "no conversation for message, dropping");
                    return self.clone();
                }
                let conversations = self
                    .conversations
                    .iter()
                    .cloned()
                    .map(|mut c| {
                        if c.contact.id == contact_id {
                            c.last_message_preview = message.preview();
                            c.last_activity = Some(message.timestamp);
                            c.messages.push(message.clone());
                        }
                        c
                    })
                    .collect();
                Self { conversations }
            }
            ChatAction::RemoveConversation { conversation_id } => {
                let conversations = self
                    .conversations
                    .iter()
                    .filter(|c| c.id != conversation_id)
                    .cloned()
                    .collect();
                Self { conversations }
            }
        }
    }

    // ------------------------------------------------------------------
    // Convenience mutators
    // ------------------------------------------------------------------

    /// Create a conversation for `contact` (idempotent).
    pub fn add_conversation(&self, contact: Contact) -> Self {
        self.apply(ChatAction::AddConversation { contact })
    }

    /// Append `message` to the conversation for `contact_id`.
    pub fn add_message(&self, contact_id: &ContactId, message: Message) -> Self {
        self.apply(ChatAction::AddMessage {
            contact_id: contact_id.clone(),
            message,
        })
    }

    /// Remove a conversation by id (idempotent).
    pub fn remove_conversation(&self, conversation_id: ConversationId) -> Self {
        self.apply(ChatAction::RemoveConversation { conversation_id })
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// All conversations, most recently created first.
    pub fn conversations(&self) -> &[Conversation] {
        &self.conversations
    }

    /// Find the conversation with `contact_id`, if any.
    pub fn conversation_for(&self, contact_id: &ContactId) -> Option<&Conversation> {
        self.conversations
            .iter()
            .find(|c| &c.contact.id == contact_id)
    }

    /// Find a conversation by its own id, if any.
    pub fn conversation(&self, id: ConversationId) -> Option<&Conversation> {
        self.conversations.iter().find(|c| c.id == id)
    }

    pub fn len(&self) -> usize {
        self.conversations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conversations.is_empty()
    }
}
