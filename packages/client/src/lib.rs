//! Terminal client for the Agora chat relay.

mod domain;
pub mod error;
mod formatter;
mod runner;
mod session;
mod typing;
mod ui;

pub use runner::run_client;
