//! Application state shared across all session operations.
//!
//! The [`AppState`] struct is wrapped in `Arc<Mutex<>>` and owned by a
//! [`crate::Session`] for the lifetime of the app session.  The stores
//! inside it are immutable snapshots: operations replace a whole store
//! with the reducer's output, never mutate one in place.

use tokio::sync::mpsc;

use beacon_store::{ChatStore, GlobalStore, GroupStore, Preferences};

use crate::error::Result;
use crate::relay::RelayCommand;

/// Central application state.
///
/// Holds the three chat stores, the preference handle, the relay command
/// channel, and the scalar flags mirrored from persisted preferences.
pub struct AppState {
    /// One-to-one conversations.
    pub chats: ChatStore,

    /// Named multi-member groups.
    pub groups: GroupStore,

    /// The shared app-wide feed, seeded with the system welcome message.
    pub global: GlobalStore,

    /// Handle to the local preference database.
    /// `None` until preferences are attached (e.g. in unit tests).
    pub preferences: Option<Preferences>,

    /// Sender half of the channel used to dispatch outbound deliveries to
    /// the remote relay task.  `None` when no relay is running; local
    /// appends still succeed.
    pub relay_tx: Option<mpsc::Sender<RelayCommand>>,

    /// The local user's identity, if known.
    pub user_id: Option<String>,

    /// Whether the user posts to the community anonymously.
    pub is_anonymous: bool,

    /// Whether dark mode is enabled.
    pub is_dark_mode: bool,

    /// Whether the user has agreed to the community rules.
    pub has_agreed_community_rules: bool,

    /// Whether the community rules screen has been shown at least once.
    pub has_seen_community_rules: bool,
}

impl AppState {
    /// Create a new state with empty chat and group stores and a freshly
    /// seeded global feed.
    pub fn new() -> Self {
        Self {
            chats: ChatStore::new(),
            groups: GroupStore::new(),
            global: GlobalStore::new(),
            preferences: None,
            relay_tx: None,
            user_id: None,
            is_anonymous: false,
            is_dark_mode: false,
            has_agreed_community_rules: false,
            has_seen_community_rules: false,
        }
    }

    /// Attach the preference database and mirror its flags into the state.
    ///
    /// Called once at startup; the flags are read once here and written
    /// back on every toggle.
    pub fn attach_preferences(&mut self, preferences: Preferences) -> Result<()> {
        self.user_id = preferences.user_id()?;
        self.is_anonymous = preferences.is_anonymous()?;
        self.is_dark_mode = preferences.is_dark_mode()?;
        self.has_agreed_community_rules = preferences.has_agreed_community_rules()?;
        self.has_seen_community_rules = preferences.has_seen_community_rules()?;
        self.preferences = Some(preferences);
        Ok(())
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
