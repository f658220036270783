//! Infrastructure layer
//!
//! Concrete implementations of the domain's transport traits and the
//! file-backed word list.

pub mod dto;
pub mod message_pusher;
pub mod wordlist;
