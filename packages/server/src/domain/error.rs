//! Domain errors.

use thiserror::Error;

/// Delivery of a frame to a single connection failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SendError {
    /// The connection's outbound side has already shut down
    #[error("connection closed")]
    Closed,

    /// The outbound queue is full, the peer is not keeping up
    #[error("outbound queue full")]
    Full,

    /// The transport rejected the frame
    #[error("send failed: {0}")]
    Failed(String),
}

/// The word matcher could not be built.
#[derive(Debug, Error)]
pub enum CensorError {
    #[error("failed to build word matcher: {0}")]
    Pattern(#[from] regex::Error),
}
