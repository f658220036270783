//! Transport boundary.
//!
//! The relay core never sees sockets. Outbound delivery goes through
//! [`Connection`]; inbound frames come from an [`InboundSource`]. The
//! WebSocket implementations live in `infrastructure::message_pusher`.

use async_trait::async_trait;
use bytes::Bytes;

use super::{Frame, SendError};

/// Outbound half of one live connection.
///
/// `send` hands the frame to the connection's own writer and must not wait on
/// network I/O, so fan-out to many connections never stalls on a slow peer.
/// It fails once the connection is gone.
#[cfg_attr(test, mockall::automock)]
pub trait Connection: Send + Sync {
    fn send(&self, frame: Frame) -> Result<(), SendError>;
}

/// What the transport delivered next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inbound {
    Text(String),
    Binary(Bytes),
    /// The peer closed the connection cleanly
    Closed,
    /// The transport failed while reading
    Failed(String),
}

/// Inbound half of one live connection.
#[async_trait]
pub trait InboundSource: Send {
    /// Wait for the next inbound frame. After `Closed` or `Failed` is
    /// returned the source is not polled again.
    async fn receive(&mut self) -> Inbound;
}
