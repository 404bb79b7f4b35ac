//! Request and response types for the API surface

use serde::{Deserialize, Serialize};

use super::chat::ChatTurn;
use super::document::{Document, FileType};

/// Which tier of the fallback ladder produced an answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerTier {
    /// Answer constrained to retrieved document chunks
    Grounded,
    /// Answer derived from an encyclopedia summary
    Encyclopedia,
    /// Unconstrained language-model answer
    OpenDomain,
}

/// Query request for a typed question
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryRequest {
    /// The question to answer
    pub question: String,

    /// Generation model override (default: configured model)
    #[serde(default)]
    pub model: Option<String>,

    /// Number of chunks to retrieve (default: configured top_k)
    #[serde(default)]
    pub top_k: Option<usize>,
}

/// Response for a question, typed or transcribed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResponse {
    /// The question that was answered
    pub question: String,
    /// The answer text
    pub answer: String,
    /// Which fallback tier produced the answer
    pub tier: AnswerTier,
    /// Number of chunks retrieved for grounding (0 when no corpus)
    pub chunks_retrieved: usize,
    /// Processing time in milliseconds
    pub processing_time_ms: u64,
}

/// Per-file extraction failure, reported as a batch warning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionFailure {
    /// Filename as uploaded
    pub filename: String,
    /// Why extraction failed
    pub error: String,
}

/// Summary of an ingested document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentSummary {
    pub id: uuid::Uuid,
    pub filename: String,
    pub file_type: FileType,
    pub total_pages: Option<u32>,
    pub word_count: usize,
    pub file_size: u64,
}

impl From<&Document> for DocumentSummary {
    fn from(doc: &Document) -> Self {
        Self {
            id: doc.id,
            filename: doc.filename.clone(),
            file_type: doc.file_type,
            total_pages: doc.total_pages,
            word_count: doc.word_count,
            file_size: doc.file_size,
        }
    }
}

/// Response from a document upload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    /// Whether a corpus is available after this upload
    pub success: bool,
    /// True when the upload matched the current corpus and no rebuild ran
    pub unchanged: bool,
    /// Documents that contributed text
    pub documents: Vec<DocumentSummary>,
    /// Files that yielded no extractable text
    pub failures: Vec<ExtractionFailure>,
    /// Number of chunks in the rebuilt corpus
    pub total_chunks: usize,
    /// Processing time in milliseconds
    pub processing_time_ms: u64,
}

/// Response from a voice interaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoiceResponse {
    /// What the speech model heard (may be empty for silence)
    pub transcription: String,
    /// The answer, absent when no question was asked
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<QueryResponse>,
}

/// Chat log response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatHistoryResponse {
    /// All recorded turns, oldest first
    pub turns: Vec<ChatTurn>,
    /// Number of question/answer exchanges
    pub exchanges: usize,
}
