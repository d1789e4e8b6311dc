//! Protocol error types.

use thiserror::Error;

/// Result type for protocol operations.
pub type ProtocolResult<T> = Result<T, ProtocolError>;

/// Errors that can occur while exchanging frames with the host.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Frame exceeds maximum allowed size.
    #[error("message too large: {size} bytes (max: {max})")]
    MessageTooLarge { size: u64, max: u32 },

    /// Failed to serialize or parse a JSON payload.
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error during read/write.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Incomplete frame (buffer shorter than its length prefix).
    #[error("incomplete message: expected {expected} bytes, got {received}")]
    IncompleteMessage { expected: usize, received: usize },

    /// Zero-length frame received.
    #[error("empty message")]
    EmptyMessage,

    /// The host closed its end before answering a call.
    #[error("host closed the channel before replying to {function}")]
    HostClosed { function: &'static str },
}
