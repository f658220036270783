//! Error types for the chat client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// Could not open the WebSocket
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The connection dropped after it was established
    #[error("Connection lost: {0}")]
    ConnectionLost(String),
}
