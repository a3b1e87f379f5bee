//! # beacon-client
//!
//! Session layer of the Beacon chat core.  Owns the in-memory store
//! snapshots behind `Arc<Mutex<AppState>>`, routes every mutation through
//! the store reducers, notifies observers over a broadcast channel, and
//! hosts the typed boundary clients (directions lookup, SOS alert
//! dispatch).
//!
//! Delivery policy: optimistic local, best-effort remote.  The local
//! store append is the source of truth for rendering; remote delivery is
//! attempted afterwards and a failure is reported without undoing the
//! local append.

pub mod events;
pub mod relay;
pub mod routes;
pub mod session;
pub mod sos;
pub mod state;

mod error;

pub use error::ClientError;
pub use events::StoreEvent;
pub use relay::RelayCommand;
pub use session::settings::SettingsSnapshot;
pub use session::Session;
pub use state::AppState;

use tracing_subscriber::{fmt, EnvFilter};

/// Initialise tracing for an embedding application.
///
/// Honours `RUST_LOG`; defaults to debug for the Beacon crates.  Safe to
/// call more than once (later calls are ignored).
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("beacon_client=debug,beacon_store=info,warn"));

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .try_init();
}
