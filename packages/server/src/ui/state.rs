//! Server state shared by all handlers.

use std::{path::PathBuf, sync::Arc, time::Duration};

use crate::usecase::BroadcastHub;

/// Shared application state
pub struct AppState {
    /// The single hub every session talks to
    pub hub: Arc<BroadcastHub>,
    /// Directory holding `index.html` and other static assets
    pub static_dir: PathBuf,
    /// Optional deadline for a single WebSocket write
    pub send_timeout: Option<Duration>,
}
