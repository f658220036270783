//! メッセージ送受信の実装
//!
//! ## 概要
//!
//! このモジュールは `Connection` / `InboundSource` trait の具体的な実装を提供します。
//!
//! ## 実装
//!
//! - `websocket`: WebSocket を使った実装

pub mod websocket;

pub use websocket::{WebSocketConnection, WebSocketInbound, pusher_loop};
