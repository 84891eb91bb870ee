//! Error types for the catalog client and the view

use thiserror::Error;

/// Errors raised by the remote catalog client
///
/// Consumed entirely inside the store that issued the call; nothing here
/// crosses a component boundary as a panic.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport-level failure (connect, timeout, body decode)
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// The service answered with a non-success status
    #[error("unexpected status: {0}")]
    Status(reqwest::StatusCode),
    /// The requested entity does not exist
    #[error("not found")]
    NotFound,
}

/// Which fetch path failed; displayed as a single human-readable message
/// replacing the content area. Network-unreachable and non-2xx collapse to
/// the same kind, and a later success on the same path clears it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The paginated browse fetch failed
    #[error("Failed to fetch artists")]
    List,
    /// The live search fetch failed
    #[error("Failed to search artists")]
    Search,
}
