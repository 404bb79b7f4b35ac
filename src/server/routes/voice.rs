//! Voice question endpoint

use axum::{
    extract::{Multipart, State},
    Json,
};
use std::time::Instant;

use crate::error::{Error, Result};
use crate::server::state::AppState;
use crate::types::response::{QueryResponse, VoiceResponse};

/// POST /api/voice - transcribe a WAV clip and answer the spoken question
///
/// An empty transcription means no question was asked: the response carries
/// the empty transcription, no answer is generated, and no chat turn is
/// recorded.
pub async fn voice_query(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<VoiceResponse>> {
    let start = Instant::now();

    let mut clip: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::internal(format!("Failed to read multipart field: {}", e)))?
    {
        let data = field
            .bytes()
            .await
            .map_err(|e| Error::internal(format!("Failed to read audio clip: {}", e)))?;
        if !data.is_empty() {
            clip = Some(data.to_vec());
            break;
        }
    }

    let clip = clip.ok_or_else(|| Error::InvalidRequest("no audio clip uploaded".to_string()))?;

    let transcription = state.speech().transcribe(clip).await?;

    if transcription.is_empty() {
        tracing::info!("Transcription empty, treating as no question asked");
        return Ok(Json(VoiceResponse {
            transcription,
            answer: None,
        }));
    }

    tracing::info!("Transcribed question: \"{}\"", transcription);

    let corpus = state.corpus();
    let outcome = state
        .pipeline()
        .answer(corpus.as_deref(), &transcription, None, None)
        .await?;

    state.record_exchange(&transcription, &outcome.answer);

    let processing_time_ms = start.elapsed().as_millis() as u64;

    Ok(Json(VoiceResponse {
        answer: Some(QueryResponse {
            question: transcription.clone(),
            answer: outcome.answer,
            tier: outcome.tier,
            chunks_retrieved: outcome.chunks_retrieved,
            processing_time_ms,
        }),
        transcription,
    }))
}
