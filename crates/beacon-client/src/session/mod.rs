//! Session operations over the shared application state.
//!
//! Each sub-module groups related operations by domain, mirroring the
//! screens that call them.  Every mutation locks the state, routes the
//! change through the owning store's reducer, replaces the snapshot, and
//! emits a [`StoreEvent`].  Remote delivery is best-effort and never
//! blocks or undoes a local append.

pub mod groups;
pub mod messaging;
pub mod settings;

use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::broadcast;
use tracing::warn;

use crate::error::{ClientError, Result};
use crate::events::{emit_event, StoreEvent};
use crate::relay::RelayCommand;
use crate::state::AppState;

/// Default capacity of the event broadcast channel.
const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Handle through which the UI drives the chat core.
///
/// Cheap to clone; all clones share the same state and event channel.
#[derive(Clone)]
pub struct Session {
    state: Arc<Mutex<AppState>>,
    events: broadcast::Sender<StoreEvent>,
}

impl Session {
    /// Create a session over a fresh [`AppState`].
    pub fn new() -> Self {
        Self::with_state(Arc::new(Mutex::new(AppState::new())))
    }

    /// Create a session over an externally constructed state (tests,
    /// custom bootstrapping).
    pub fn with_state(state: Arc<Mutex<AppState>>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self { state, events }
    }

    /// The shared state handle.
    pub fn state(&self) -> &Arc<Mutex<AppState>> {
        &self.state
    }

    /// Subscribe to change events.
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    pub(crate) fn lock(&self) -> Result<MutexGuard<'_, AppState>> {
        self.state.lock().map_err(|_| ClientError::LockPoisoned)
    }

    pub(crate) fn emit(&self, event: StoreEvent) {
        emit_event(&self.events, event);
    }

    /// Enqueue a remote delivery.  Failure (no relay, channel full or
    /// closed) is reported via [`StoreEvent::RelayFailed`] and a warning;
    /// the already-applied local change is kept either way.
    pub(crate) fn relay(&self, command: RelayCommand) {
        let tx = match self.lock() {
            Ok(guard) => guard.relay_tx.clone(),
            Err(_) => None,
        };

        let Some(tx) = tx else {
            warn!("no relay attached, message stays local");
            self.emit(StoreEvent::RelayFailed {
                detail: "no relay attached".to_string(),
            });
            return;
        };

        if let Err(e) = tx.try_send(command) {
            warn!(error = %e, "failed to enqueue remote delivery");
            self.emit(StoreEvent::RelayFailed {
                detail: e.to_string(),
            });
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
