//! Error types for the remote boundaries.

use thiserror::Error;

/// Result type for remote store operations.
pub type RemoteResult<T> = Result<T, RemoteError>;

/// Errors that can occur talking to the remote stores.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// The client configuration is unusable (empty endpoint or secret).
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Transport-level failure (connect, timeout, body read).
    #[error("network error: {0}")]
    Network(String),

    /// The store answered but rejected the operation.
    #[error("remote api error: {0}")]
    Api(String),

    /// A request or response body could not be (de)serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
