//! Request handlers.

pub mod http;
pub mod websocket;

pub use http::{clear_history, get_history, health_check, index, post_message};
pub use websocket::websocket_handler;
