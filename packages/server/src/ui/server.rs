//! Server execution logic.

use std::{future::Future, path::PathBuf, sync::Arc, time::Duration};

use axum::{
    Router,
    http::{HeaderName, HeaderValue},
    routing::{get, post},
};
use tokio::{
    net::TcpListener,
    sync::{Notify, mpsc},
};
use tower_http::{
    cors::CorsLayer, services::ServeDir, set_header::SetResponseHeaderLayer, trace::TraceLayer,
};

use crate::usecase::BroadcastHub;

use super::{
    handler::{
        clear_history, get_history, health_check, index, post_message, websocket_handler,
    },
    operator::{run_operator, spawn_console_reader},
    signal::shutdown_signal,
    state::AppState,
};

/// Lets browsers reach the relay through an ngrok tunnel without the interstitial page.
const NGROK_SKIP_HEADER: &str = "ngrok-skip-browser-warning";
const NGROK_SKIP_VALUE: &str = "69420";

/// Runtime settings for [`Server`]
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// The host address to bind to (e.g., "127.0.0.1")
    pub host: String,
    /// The port number to bind to (e.g., 8000)
    pub port: u16,
    /// Directory served under `/static` and holding `index.html`
    pub static_dir: PathBuf,
    /// Deadline for a single WebSocket write, `None` waits for the transport
    pub send_timeout: Option<Duration>,
    /// Read operator commands from stdin
    pub console: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            static_dir: PathBuf::from("static"),
            send_timeout: None,
            console: true,
        }
    }
}

/// Broadcast chat relay server
///
/// # Example
///
/// ```ignore
/// let hub = Arc::new(BroadcastHub::new(censor, HubConfig::default()));
/// Server::new(hub, ServerConfig::default()).run().await?;
/// ```
pub struct Server {
    hub: Arc<BroadcastHub>,
    config: ServerConfig,
}

impl Server {
    pub fn new(hub: Arc<BroadcastHub>, config: ServerConfig) -> Self {
        Self { hub, config }
    }

    /// Build the router with every endpoint and layer attached
    pub fn router(&self) -> Router {
        let app_state = Arc::new(AppState {
            hub: self.hub.clone(),
            static_dir: self.config.static_dir.clone(),
            send_timeout: self.config.send_timeout,
        });

        Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/", get(index))
            .route("/api/health", get(health_check))
            .route("/api/history", get(get_history))
            .route("/api/history/clear", post(clear_history))
            .route("/api/messages", post(post_message))
            .nest_service("/static", ServeDir::new(&self.config.static_dir))
            .layer(SetResponseHeaderLayer::overriding(
                HeaderName::from_static(NGROK_SKIP_HEADER),
                HeaderValue::from_static(NGROK_SKIP_VALUE),
            ))
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
            .with_state(app_state)
    }

    /// Serve on an already bound listener until `shutdown` resolves
    pub async fn serve<F>(&self, listener: TcpListener, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await
    }

    /// Run the relay server
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the configured address or
    /// if there's an error during server execution.
    pub async fn run(self) -> Result<(), Box<dyn std::error::Error>> {
        // Bind the server to the host and port
        let bind_addr = format!("{}:{}", self.config.host, self.config.port);
        let listener = TcpListener::bind(&bind_addr).await?;

        tracing::info!("Chat relay listening on {}", listener.local_addr()?);
        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        let operator_exit = Arc::new(Notify::new());
        let console = if self.config.console {
            let (tx, rx) = mpsc::channel(16);
            let reader = spawn_console_reader(tx);
            let executor = tokio::spawn(run_operator(self.hub.clone(), rx, operator_exit.clone()));
            Some((reader, executor))
        } else {
            None
        };

        self.serve(listener, shutdown_signal(operator_exit)).await?;

        if let Some((reader, executor)) = console {
            reader.abort();
            executor.abort();
        }

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
