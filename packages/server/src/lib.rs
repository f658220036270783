//! Broadcast chat relay library.
//!
//! Clients connect over WebSocket; every payload is fanned out to all
//! connected clients and retained in a bounded history that is replayed to
//! newcomers.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
