//! Domain model structs held by the in-memory stores.
//!
//! Every struct derives `Serialize` and `Deserialize` so a snapshot can be
//! handed directly to a UI layer.  None of these are persisted.

use beacon_shared::constants::EMPTY_CONVERSATION_PREVIEW;
use beacon_shared::types::{Contact, ConversationId, GroupId, MessageId, MessageKind, SenderId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Message
// ---------------------------------------------------------------------------

/// A single direct-chat message.
///
/// A text message carries no media reference; a media message carries a URI
/// and may have empty text.  A message with neither is stored as-is and
/// renders as an empty bubble; the store does not validate shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    /// Unique message identifier.
    pub id: MessageId,
    /// Identity of the author.
    pub sender: SenderId,
    /// Payload discriminant.
    pub kind: MessageKind,
    /// Text content (empty for pure media messages).
    pub text: String,
    /// Media content reference (URI), absent for text messages.
    pub media: Option<String>,
    /// When the message was created.
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// Build a text message with a fresh id and the current time.
    pub fn text(sender: SenderId, text: impl Into<String>) -> Self {
        Self {
            id: MessageId::new(),
            sender,
            kind: MessageKind::Text,
            text: text.into(),
            media: None,
            timestamp: Utc::now(),
        }
    }

    /// Build a media message with a fresh id and the current time.
    pub fn media(sender: SenderId, kind: MessageKind, uri: impl Into<String>) -> Self {
        Self {
            id: MessageId::new(),
            sender,
            kind,
            text: String::new(),
            media: Some(uri.into()),
            timestamp: Utc::now(),
        }
    }

    /// One-line stand-in used for conversation previews: the text itself,
    /// or a label describing the media kind.
    pub fn preview(&self) -> String {
        match self.kind {
            MessageKind::Text => self.text.clone(),
            kind => kind.preview_label().to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Conversation
// ---------------------------------------------------------------------------

/// A one-to-one message thread with a single contact.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Conversation {
    /// Unique conversation identifier.
    pub id: ConversationId,
    /// The other party.
    pub contact: Contact,
    /// Messages in send order.
    pub messages: Vec<Message>,
    /// Denormalized preview of the last message.  Informational only.
    pub last_message_preview: String,
    /// Timestamp of the last append.  Informational only.
    pub last_activity: Option<DateTime<Utc>>,
    /// Unread counter.  Informational only.
    pub unread_count: u32,
}

impl Conversation {
    /// A fresh, empty conversation for `contact`.
    pub fn new(contact: Contact) -> Self {
        Self {
            id: ConversationId::new(),
            contact,
            messages: Vec::new(),
            last_message_preview: EMPTY_CONVERSATION_PREVIEW.to_string(),
            last_activity: None,
            unread_count: 0,
        }
    }
}

// ---------------------------------------------------------------------------
// Group
// ---------------------------------------------------------------------------

/// A message inside a group thread.
///
/// Group messages do not carry a kind tag; media is represented by the
/// optional image/video reference fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GroupMessage {
    /// Unique message identifier.
    pub id: MessageId,
    /// Identity of the author.
    pub sender: SenderId,
    /// Text content.
    pub text: String,
    /// Optional image reference (URI).
    pub image: Option<String>,
    /// Optional video reference (URI).
    pub video: Option<String>,
    /// When the message was created.
    pub timestamp: DateTime<Utc>,
}

/// A named multi-member message thread.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Group {
    /// Unique group identifier.
    pub id: GroupId,
    /// Display name.
    pub name: String,
    /// Member identities.  Not deduplicated; the first member is treated
    /// as the owner by convention.
    pub members: Vec<String>,
    /// Messages in send order.
    pub messages: Vec<GroupMessage>,
}

impl Group {
    /// The conventional owner: the first member, if any.
    pub fn owner(&self) -> Option<&str> {
        self.members.first().map(String::as_str)
    }
}

// ---------------------------------------------------------------------------
// Global message
// ---------------------------------------------------------------------------

/// A message in the app-wide global feed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GlobalMessage {
    /// Unique message identifier.
    pub id: MessageId,
    /// Author identity; [`SenderId::system`] for seeded/service messages.
    pub author: SenderId,
    /// Whether the local user authored this message (render hint).
    pub is_self: bool,
    /// Payload discriminant.
    pub kind: MessageKind,
    /// Text content.
    pub text: String,
    /// Media content reference (URI), absent for text messages.
    pub media: Option<String>,
    /// When the message was created.
    pub timestamp: DateTime<Utc>,
}
