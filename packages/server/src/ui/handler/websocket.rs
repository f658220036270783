//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::stream::StreamExt;

use crate::{
    infrastructure::message_pusher::{WebSocketConnection, WebSocketInbound, pusher_loop},
    ui::state::AppState,
    usecase::{SessionEnd, SessionLoop},
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_failed_upgrade(|e| tracing::warn!("WebSocket upgrade failed: {}", e))
        .on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (sink, stream) = socket.split();

    // Outbound frames go through the connection's queue to the pusher loop
    let (connection, receiver) = WebSocketConnection::channel();
    let mut send_task = pusher_loop(receiver, sink, state.send_timeout);

    let session = SessionLoop::new(state.hub.clone());
    let identity = match session.join(Arc::new(connection)).await {
        Ok(identity) => identity,
        Err(e) => {
            tracing::warn!("Rejected connection: {}", e);
            send_task.abort();
            return;
        }
    };

    let mut inbound = WebSocketInbound::new(stream);

    // If the writer dies first the peer is unreachable, treat it as an error
    let end = tokio::select! {
        end = session.serve(identity, &mut inbound) => end,
        _ = &mut send_task => {
            tracing::warn!("Writer for #{} stopped", identity);
            SessionEnd::Failed
        }
    };
    send_task.abort();

    session.close(identity, end).await;
}
