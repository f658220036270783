//! Shared utilities for the Agora chat relay.
//!
//! Used by both `agora-server` and `agora-client`.

pub mod logger;
pub mod protocol;
pub mod time;
