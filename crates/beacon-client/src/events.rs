//! Change events emitted by the session layer.
//!
//! Every store mutation that actually changed a snapshot produces one
//! event on a `tokio::sync::broadcast` channel so UI observers can
//! re-render from the new snapshot.  Emitting to a channel with no
//! subscribers is normal (headless operation, tests) and is logged at
//! debug, never propagated.

use serde::Serialize;
use tokio::sync::broadcast;
use tracing::debug;

/// A change notification from the session layer.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum StoreEvent {
    /// A new one-to-one conversation was created.
    ConversationAdded { contact_id: String },
    /// A message was appended to a conversation.
    MessageAdded {
        contact_id: String,
        message_id: String,
    },
    /// A conversation was removed.
    ConversationRemoved { conversation_id: String },
    /// A group was created.
    GroupCreated { group_id: String, name: String },
    /// A message was appended to a group thread.
    GroupMessageSent {
        group_id: String,
        message_id: String,
    },
    /// A group was renamed or its member list changed.
    GroupUpdated { group_id: String },
    /// A message was appended to the global feed.
    GlobalMessagePosted { message_id: String },
    /// Remote delivery could not be enqueued; the local append stands.
    RelayFailed { detail: String },
    /// A persisted preference was toggled.
    PreferenceChanged { key: String },
}

/// Send `event` to all subscribers, swallowing the no-subscriber case.
pub fn emit_event(tx: &broadcast::Sender<StoreEvent>, event: StoreEvent) {
    if let Err(e) = tx.send(event) {
        debug!(error = %e, "no event subscribers");
    }
}
