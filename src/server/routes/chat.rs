//! Chat log endpoints

use axum::{extract::State, Json};

use crate::server::state::AppState;
use crate::types::response::ChatHistoryResponse;

/// GET /api/chat - the full chat log, oldest first
pub async fn chat_history(State(state): State<AppState>) -> Json<ChatHistoryResponse> {
    let session = state.session().read();
    Json(ChatHistoryResponse {
        turns: session.chat_log().to_vec(),
        exchanges: session.exchanges(),
    })
}

/// DELETE /api/chat - clear the chat log, keeping the corpus
pub async fn clear_chat(State(state): State<AppState>) -> axum::http::StatusCode {
    state.session().write().clear_chat();
    tracing::info!("Chat log cleared");
    axum::http::StatusCode::NO_CONTENT
}

/// DELETE /api/session - full reset: corpus and chat log
pub async fn reset_session(State(state): State<AppState>) -> axum::http::StatusCode {
    state.session().write().reset();
    tracing::info!("Session reset");
    axum::http::StatusCode::NO_CONTENT
}
