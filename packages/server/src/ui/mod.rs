//! HTTP, WebSocket and operator console surfaces of the relay.

mod handler;
pub mod operator;
mod server;
mod signal;
pub mod state;

pub use server::{Server, ServerConfig};
