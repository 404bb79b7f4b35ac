//! API routes for the Q&A server

pub mod chat;
pub mod documents;
pub mod query;
pub mod voice;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};

use crate::server::state::AppState;

/// Build all API routes
pub fn api_routes(max_upload_size: usize) -> Router<AppState> {
    Router::new()
        // Document management - larger body limit for uploads
        .route(
            "/documents",
            post(documents::upload_documents)
                .layer(DefaultBodyLimit::max(max_upload_size))
                .get(documents::list_documents)
                .delete(documents::clear_documents),
        )
        // Questions
        .route("/query", post(query::query))
        .route(
            "/voice",
            post(voice::voice_query).layer(DefaultBodyLimit::max(max_upload_size)),
        )
        // Chat log
        .route("/chat", get(chat::chat_history).delete(chat::clear_chat))
        .route("/session", delete(chat::reset_session))
        // Info
        .route("/info", get(info))
}

/// API info endpoint
async fn info() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "name": "askdoc",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Document Q&A with retrieval-grounded answers and encyclopedia fallback",
        "endpoints": {
            "POST /api/documents": "Upload PDF/TXT files and rebuild the corpus",
            "GET /api/documents": "List ingested documents",
            "DELETE /api/documents": "Clear the corpus",
            "POST /api/query": "Ask a typed question",
            "POST /api/voice": "Ask by voice (WAV clip)",
            "GET /api/chat": "Read the chat log",
            "DELETE /api/chat": "Clear the chat log",
            "DELETE /api/session": "Full reset (corpus + chat)"
        },
        "fallback_ladder": ["grounded", "encyclopedia", "open_domain"]
    }))
}
