//! Group store: named multi-member message threads.
//!
//! Same discipline as the direct-chat store: [`GroupStore::apply`] is the
//! single reducer, and rename / member changes go through it too, so every
//! observer sees a new snapshot for every mutation.

use beacon_shared::types::{GroupId, MessageId, SenderId};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{Group, GroupMessage};

/// A mutation of the group store.
#[derive(Debug, Clone, PartialEq)]
pub enum GroupAction {
    /// Create a group.  The id is allocated by the caller so it can be
    /// handed back for immediate navigation to the new thread.
    Create {
        id: GroupId,
        name: String,
        members: Vec<String>,
    },
    /// Append a message to the group's thread.  No-op on an unknown id.
    SendMessage {
        group_id: GroupId,
        message: GroupMessage,
    },
    /// Change the group's display name.  No-op on an unknown id.
    Rename { group_id: GroupId, name: String },
    /// Add a member.  Members are not deduplicated.
    AddMember { group_id: GroupId, member: String },
    /// Remove every occurrence of a member.  Removing the owner or the
    /// local user is a caller convention, not enforced here.
    RemoveMember { group_id: GroupId, member: String },
}

/// Snapshot of all groups.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GroupStore {
    groups: Vec<Group>,
}

impl GroupStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Reducer
    // ------------------------------------------------------------------

    /// Apply one action, producing the next snapshot.
    pub fn apply(&self, action: GroupAction) -> Self {
        match action {
            GroupAction::Create { id, name, members } => {
                let mut groups = self.groups.clone();
                groups.push(Group {
                    id,
                    name,
                    members,
                    messages: Vec::new(),
                });
                Self { groups }
            }
            GroupAction::SendMessage { group_id, message } => {
                self.update(group_id, |g| g.messages.push(message.clone()))
            }
            GroupAction::Rename { group_id, name } => {
                self.update(group_id, |g| g.name = name.clone())
            }
            GroupAction::AddMember { group_id, member } => {
                self.update(group_id, |g| g.members.push(member.clone()))
            }
            GroupAction::RemoveMember { group_id, member } => {
                self.update(group_id, |g| g.members.retain(|m| m != &member))
            }
        }
    }

    /// Rebuild the snapshot with `f` applied to the matching group; the
    /// snapshot is returned unchanged when `group_id` is unknown.
    fn update(&self, group_id: GroupId, f: impl Fn(&mut Group)) -> Self {
        if self.group(group_id).is_none() {
            debug!(group = %group_id, "unknown group, dropping action");
            return self.clone();
        }
        let groups = self
            .groups
            .iter()
            .cloned()
            .map(|mut g| {
                if g.id == group_id {
                    f(&mut g);
                }
                g
            })
            .collect();
        Self { groups }
    }

    // ------------------------------------------------------------------
    // Convenience mutators
    // ------------------------------------------------------------------

    /// Create a group and return the new snapshot together with the id of
    /// the created group.
    pub fn create_group(&self, name: impl Into<String>, members: Vec<String>) -> (Self, GroupId) {
        let id = GroupId::new();
        let next = self.apply(GroupAction::Create {
            id,
            name: name.into(),
            members,
        });
        (next, id)
    }

    /// Append a message with a fresh id and the current time.
    pub fn send_message(
        &self,
        group_id: GroupId,
        sender: SenderId,
        text: impl Into<String>,
        image: Option<String>,
        video: Option<String>,
    ) -> Self {
        self.apply(GroupAction::SendMessage {
            group_id,
            message: GroupMessage {
                id: MessageId::new(),
                sender,
                text: text.into(),
                image,
                video,
                timestamp: Utc::now(),
            },
        })
    }

    /// Rename a group.
    pub fn rename_group(&self, group_id: GroupId, name: impl Into<String>) -> Self {
        self.apply(GroupAction::Rename {
            group_id,
            name: name.into(),
        })
    }

    /// Add a member to a group.
    pub fn add_member(&self, group_id: GroupId, member: impl Into<String>) -> Self {
        self.apply(GroupAction::AddMember {
            group_id,
            member: member.into(),
        })
    }

    /// Remove a member from a group.
    pub fn remove_member(&self, group_id: GroupId, member: &str) -> Self {
        self.apply(GroupAction::RemoveMember {
            group_id,
            member: member.to_string(),
        })
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// All groups in creation order.
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Find a group by id.  Callers must handle the absent case (the UI
    /// renders a "group not found" state).
    pub fn group(&self, id: GroupId) -> Option<&Group> {
        self.groups.iter().find(|g| g.id == id)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
