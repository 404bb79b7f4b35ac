//! Document upload and corpus management

use axum::{
    extract::{Multipart, State},
    Json,
};
use ndarray::Array2;
use std::time::Instant;

use crate::error::{Error, Result};
use crate::ingestion::{hash_content, normalize_whitespace, TextExtractor, WordChunker};
use crate::server::state::AppState;
use crate::session::Corpus;
use crate::types::response::{DocumentSummary, UploadResponse};

/// POST /api/documents - upload files and rebuild the corpus
///
/// Per-file extraction failures are collected and reported; the upload only
/// aborts when no file yields any text. A rebuild replaces the chunk list
/// and the embedding matrix together, never one without the other.
pub async fn upload_documents(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>> {
    let start = Instant::now();

    let mut raw_files: Vec<(String, Vec<u8>)> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::internal(format!("Failed to read multipart field: {}", e)))?
    {
        let filename = match field.file_name() {
            Some(name) => name.to_string(),
            None => continue,
        };

        let data = field
            .bytes()
            .await
            .map_err(|e| Error::internal(format!("Failed to read '{}': {}", filename, e)))?;

        tracing::info!("Received file: {} ({} bytes)", filename, data.len());
        raw_files.push((filename, data.to_vec()));
    }

    if raw_files.is_empty() {
        return Err(Error::InvalidRequest("no files uploaded".to_string()));
    }

    let batch = TextExtractor::extract_batch(
        raw_files
            .iter()
            .map(|(name, data)| (name.as_str(), data.as_slice())),
    );

    // Whole-batch failure aborts before any chunking or embedding runs.
    if batch.is_empty() {
        return Err(Error::NoExtractableText);
    }

    let combined = normalize_whitespace(&batch.combined_text());
    let content_hash = hash_content(&combined);

    // Identical content: keep the current corpus untouched.
    if let Some(corpus) = state.corpus() {
        if corpus.content_hash() == content_hash {
            tracing::info!("Upload matches current corpus, skipping rebuild");
            return Ok(Json(UploadResponse {
                success: true,
                unchanged: true,
                documents: corpus.documents().iter().map(DocumentSummary::from).collect(),
                failures: batch.failures,
                total_chunks: corpus.chunk_count(),
                processing_time_ms: start.elapsed().as_millis() as u64,
            }));
        }
    }

    let chunker = WordChunker::new(state.config().chunking.window_words);
    let chunks = chunker.chunk(&combined);
    tracing::info!(
        "Chunked {} words into {} chunks",
        combined.split_whitespace().count(),
        chunks.len()
    );

    let texts: Vec<String> = chunks.iter().map(|c| c.text.clone()).collect();
    let vectors = state.embedder().embed_batch(&texts).await?;

    let dimensions = state.embedder().dimensions();
    let flat: Vec<f32> = vectors.into_iter().flatten().collect();
    let embeddings = Array2::from_shape_vec((chunks.len(), dimensions), flat)
        .map_err(|e| Error::embedding(format!("Embedding matrix shape mismatch: {}", e)))?;

    let documents: Vec<_> = batch.files.iter().map(|f| f.document.clone()).collect();
    let summaries: Vec<DocumentSummary> = documents.iter().map(DocumentSummary::from).collect();

    let corpus = Corpus::new(documents, chunks, embeddings, content_hash)?;
    let total_chunks = corpus.chunk_count();
    state.set_corpus(corpus);

    tracing::info!(
        "Corpus rebuilt: {} documents, {} chunks in {}ms",
        summaries.len(),
        total_chunks,
        start.elapsed().as_millis()
    );

    Ok(Json(UploadResponse {
        success: true,
        unchanged: false,
        documents: summaries,
        failures: batch.failures,
        total_chunks,
        processing_time_ms: start.elapsed().as_millis() as u64,
    }))
}

/// GET /api/documents - list ingested documents
pub async fn list_documents(State(state): State<AppState>) -> Json<Vec<DocumentSummary>> {
    let summaries = state
        .corpus()
        .map(|corpus| corpus.documents().iter().map(DocumentSummary::from).collect())
        .unwrap_or_default();
    Json(summaries)
}

/// DELETE /api/documents - clear the corpus
pub async fn clear_documents(State(state): State<AppState>) -> axum::http::StatusCode {
    state.clear_corpus();
    tracing::info!("Corpus cleared");
    axum::http::StatusCode::NO_CONTENT
}
