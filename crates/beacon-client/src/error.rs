use thiserror::Error;

/// Errors surfaced by the session layer and boundary clients.
///
/// All of these are local to one screen-level operation; none is fatal.
/// Lookup misses inside the stores are not errors at all (they are
/// no-ops), so they never appear here.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Preference persistence failure.
    #[error("Store error: {0}")]
    Store(#[from] beacon_store::StoreError),

    /// HTTP transport failure talking to a boundary service.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A boundary service answered with something unusable.
    #[error("Unexpected response from {service}: {detail}")]
    BadResponse {
        service: &'static str,
        detail: String,
    },

    /// The shared state mutex was poisoned by a panicking holder.
    #[error("State lock poisoned")]
    LockPoisoned,
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ClientError>;
