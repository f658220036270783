//! Human-readable chat lines produced by the relay itself.

use std::fmt;

use super::Identity;

/// System announcements broadcast to the room.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemMessage {
    Joined(Identity),
    Left(Identity),
    LeftDueToError(Identity),
    ClearedByServer,
}

impl fmt::Display for SystemMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SystemMessage::Joined(id) => write!(f, "** #{id} joined **"),
            SystemMessage::Left(id) => write!(f, "** #{id} left **"),
            SystemMessage::LeftDueToError(id) => write!(f, "** #{id} left due to error **"),
            SystemMessage::ClearedByServer => write!(f, "** Chat cleared by server command **"),
        }
    }
}

/// Format a user chat line: `#<id>: <text>`.
pub fn format_user_message(sender: impl fmt::Display, text: &str) -> String {
    format!("#{sender}: {text}")
}
