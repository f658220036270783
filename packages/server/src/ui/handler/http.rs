//! HTTP endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::{
    domain::{Frame, format_user_message},
    infrastructure::dto::http::{
        ErrorResponse, HistoryEntryDto, PostMessageRequest, StatusResponse,
    },
    ui::{operator::clear_chat, state::AppState},
};

/// Serve `index.html` from the static directory
pub async fn index(State(state): State<Arc<AppState>>) -> Response {
    let path = state.static_dir.join("index.html");
    match tokio::fs::read_to_string(&path).await {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::warn!("Failed to read {}: {}", path.display(), e);
            (
                StatusCode::NOT_FOUND,
                Html("<h1>index.html not found</h1>"),
            )
                .into_response()
        }
    }
}

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Retained history in arrival order
pub async fn get_history(State(state): State<Arc<AppState>>) -> Json<Vec<HistoryEntryDto>> {
    let history = state.hub.history().await;
    Json(history.iter().map(HistoryEntryDto::from).collect())
}

/// Request/response way of sending a chat line
pub async fn post_message(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PostMessageRequest>,
) -> Result<Json<StatusResponse>, (StatusCode, Json<ErrorResponse>)> {
    let Some((sender, text)) = request.validate() else {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("message required")),
        ));
    };

    state
        .hub
        .broadcast(Frame::Text(format_user_message(sender, text)), true)
        .await;

    Ok(Json(StatusResponse::new("sent")))
}

/// Same as the console `clear` command
pub async fn clear_history(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    clear_chat(&state.hub).await;
    Json(StatusResponse::new("history-cleared"))
}
