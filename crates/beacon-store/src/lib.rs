//! # beacon-store
//!
//! Client-side chat state for the Beacon application.
//!
//! Three independent in-memory stores (direct chats, groups, global feed)
//! hold the session's message state as immutable snapshots: every mutation
//! is a pure reducer that takes the current snapshot plus an action and
//! returns the next snapshot.  Message history is never persisted; the only
//! thing written to disk is a handful of scalar preferences, kept in a
//! small rusqlite key-value table by [`Preferences`].

pub mod chats;
pub mod global;
pub mod groups;
pub mod models;
pub mod prefs;

mod error;

pub use chats::{ChatAction, ChatStore};
pub use error::StoreError;
pub use global::{GlobalAction, GlobalStore};
pub use groups::{GroupAction, GroupStore};
pub use models::*;
pub use prefs::Preferences;
