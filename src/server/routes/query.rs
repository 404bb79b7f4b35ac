//! Typed question endpoint

use axum::{extract::State, Json};
use std::time::Instant;

use crate::error::{Error, Result};
use crate::server::state::AppState;
use crate::types::response::{QueryRequest, QueryResponse};

/// POST /api/query - answer a typed question through the fallback ladder
pub async fn query(
    State(state): State<AppState>,
    Json(request): Json<QueryRequest>,
) -> Result<Json<QueryResponse>> {
    let start = Instant::now();

    let question = request.question.trim().to_string();
    if question.is_empty() {
        return Err(Error::InvalidRequest("question must not be empty".to_string()));
    }

    tracing::info!("Query: \"{}\"", question);

    // Snapshot the corpus; the session lock is never held across an await.
    let corpus = state.corpus();

    let outcome = state
        .pipeline()
        .answer(
            corpus.as_deref(),
            &question,
            request.model.as_deref(),
            request.top_k,
        )
        .await?;

    state.record_exchange(&question, &outcome.answer);

    let processing_time_ms = start.elapsed().as_millis() as u64;
    tracing::info!(
        "Answered via {:?} tier in {}ms",
        outcome.tier,
        processing_time_ms
    );

    Ok(Json(QueryResponse {
        question,
        answer: outcome.answer,
        tier: outcome.tier,
        chunks_retrieved: outcome.chunks_retrieved,
        processing_time_ms,
    }))
}
