//! Group thread operations.

use beacon_shared::types::{GroupId, MessageId, SenderId};
use beacon_store::{Group, GroupAction, GroupMessage};
use chrono::Utc;
use tracing::{info, warn};

use crate::error::Result;
use crate::events::StoreEvent;
use crate::relay::RelayCommand;
use crate::session::Session;

impl Session {
    /// Create a group and return its id for immediate navigation to the
    /// new thread.
    pub fn create_group(&self, name: impl Into<String>, members: Vec<String>) -> Result<GroupId> {
        let name = name.into();

        let group_id = {
            let mut guard = self.lock()?;
            let (next, id) = guard.groups.create_group(name.clone(), members);
            guard.groups = next;
            id
        };

        info!(group_id = %group_id, name = %name, "Group created");
        self.emit(StoreEvent::GroupCreated {
            group_id: group_id.to_string(),
            name,
        });
        Ok(group_id)
    }

    /// Append a message to a group's thread, then attempt remote delivery.
    ///
    /// Unknown group ids are a silent no-op (the screen renders a "group
    /// not found" state from the accessor, not from here).
    pub fn send_group_message(
        &self,
        group_id: GroupId,
        sender: SenderId,
        text: impl Into<String>,
        image: Option<String>,
        video: Option<String>,
    ) -> Result<Option<MessageId>> {
        let message = GroupMessage {
            id: MessageId::new(),
            sender,
            text: text.into(),
            image,
            video,
            timestamp: Utc::now(),
        };
        let message_id = message.id;

        let appended = {
            let mut guard = self.lock()?;
            if guard.groups.group(group_id).is_none() {
                false
            } else {
                guard.groups = guard.groups.apply(GroupAction::SendMessage {
                    group_id,
                    message: message.clone(),
                });
                true
            }
        };

        if !appended {
            warn!(group = %group_id, "message for unknown group dropped");
            return Ok(None);
        }

        self.emit(StoreEvent::GroupMessageSent {
            group_id: group_id.to_string(),
            message_id: message_id.to_string(),
        });
        self.relay(RelayCommand::DeliverGroup { group_id, message });

        Ok(Some(message_id))
    }

    /// Rename a group.  No-op on an unknown id.
    pub fn rename_group(&self, group_id: GroupId, name: impl Into<String>) -> Result<()> {
        {
            let mut guard = self.lock()?;
            guard.groups = guard.groups.rename_group(group_id, name);
        }
        self.emit(StoreEvent::GroupUpdated {
            group_id: group_id.to_string(),
        });
        Ok(())
    }

    /// Add a member to a group.  No-op on an unknown id.
    pub fn add_group_member(&self, group_id: GroupId, member: impl Into<String>) -> Result<()> {
        {
            let mut guard = self.lock()?;
            guard.groups = guard.groups.add_member(group_id, member);
        }
        self.emit(StoreEvent::GroupUpdated {
            group_id: group_id.to_string(),
        });
        Ok(())
    }

    /// Remove a member from a group.  No-op on an unknown id; whether the
    /// owner or the local user may be removed is the screen's convention.
    pub fn remove_group_member(&self, group_id: GroupId, member: &str) -> Result<()> {
        {
            let mut guard = self.lock()?;
            guard.groups = guard.groups.remove_member(group_id, member);
        }
        self.emit(StoreEvent::GroupUpdated {
            group_id: group_id.to_string(),
        });
        Ok(())
    }

    /// Cloned snapshot of a group, or `None` for the "group not found"
    /// state.
    pub fn group(&self, group_id: GroupId) -> Result<Option<Group>> {
        Ok(self.lock()?.groups.group(group_id).cloned())
    }

    /// Cloned snapshot of all groups in creation order.
    pub fn groups(&self) -> Result<Vec<Group>> {
        Ok(self.lock()?.groups.groups().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_returns_navigable_id() {
        let session = Session::new();
        let id = session
            .create_group("Test", vec!["A".to_string(), "B".to_string()])
            .unwrap();

        let group = session.group(id).unwrap().expect("group should exist");
        assert_eq!(group.name, "Test");
        assert_eq!(group.members.len(), 2);
        assert!(group.messages.is_empty());
    }

    #[test]
    fn unknown_group_renders_not_found() {
        let session = Session::new();
        assert!(session.group(GroupId::new()).unwrap().is_none());

        let sent = session
            .send_group_message(GroupId::new(), SenderId::from("A"), "hi", None, None)
            .unwrap();
        assert!(sent.is_none());
    }

    #[test]
    fn rename_and_member_changes_notify_observers() {
        let session = Session::new();
        let id = session
            .create_group("Old", vec!["A".to_string(), "B".to_string()])
            .unwrap();

        let mut events = session.subscribe();
        session.rename_group(id, "New").unwrap();
        session.remove_group_member(id, "B").unwrap();
        session.add_group_member(id, "C").unwrap();

        let group = session.group(id).unwrap().unwrap();
        assert_eq!(group.name, "New");
        assert_eq!(group.members, vec!["A".to_string(), "C".to_string()]);

        for _ in 0..3 {
            assert!(matches!(
                events.try_recv().unwrap(),
                StoreEvent::GroupUpdated { .. }
            ));
        }
    }

    #[test]
    fn group_message_lands_locally_and_on_the_relay() {
        let session = Session::new();
        let (tx, mut rx) = tokio::sync::mpsc::channel(8);
        session.state().lock().unwrap().relay_tx = Some(tx);

        let id = session
            .create_group("Walk", vec!["A".to_string()])
            .unwrap();
        let message_id = session
            .send_group_message(id, SenderId::from("A"), "on my way", None, None)
            .unwrap()
            .expect("known group");

        let group = session.group(id).unwrap().unwrap();
        assert_eq!(group.messages.len(), 1);
        assert_eq!(group.messages[0].id, message_id);

        match rx.try_recv().unwrap() {
            RelayCommand::DeliverGroup { group_id, message } => {
                assert_eq!(group_id, id);
                assert_eq!(message.text, "on my way");
            }
            other => panic!("unexpected relay command: {other:?}"),
        }
    }
}
