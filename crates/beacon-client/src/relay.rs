//! Commands handed to the remote delivery task.
//!
//! The task draining the receiver half (a network layer, a Firebase
//! bridge, a test harness) is an external collaborator; the session only
//! enqueues.  Delivery is best-effort: the local store append has already
//! happened by the time a command is sent, and a full or closed channel
//! is reported as a relay failure without rolling anything back.

use beacon_shared::types::{ContactId, GroupId};
use beacon_store::{GlobalMessage, GroupMessage, Message};

/// One unit of outbound remote delivery.
#[derive(Debug, Clone)]
pub enum RelayCommand {
    /// Deliver a direct-chat message to the contact's device.
    DeliverDirect {
        contact_id: ContactId,
        message: Message,
    },
    /// Deliver a group message to the group's members.
    DeliverGroup {
        group_id: GroupId,
        message: GroupMessage,
    },
    /// Publish a message to the shared global feed.
    PostGlobal { message: GlobalMessage },
}
