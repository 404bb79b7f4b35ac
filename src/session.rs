//! Session state: the document corpus and the chat log
//!
//! The corpus (chunk list + embedding matrix) is replaced or cleared as a
//! whole; the two are never updated independently, so their row
//! correspondence cannot drift.

use ndarray::Array2;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::types::{
    chat::{ChatRole, ChatTurn},
    document::{Chunk, Document},
};

/// An immutable snapshot of the uploaded document set: extracted documents,
/// their chunk list, and the matching embedding matrix.
#[derive(Debug)]
pub struct Corpus {
    /// Documents that contributed text, in upload order
    documents: Vec<Document>,
    /// Chunks of the concatenated normalized text, in source order
    chunks: Vec<Chunk>,
    /// One embedding row per chunk, unit-normalized
    embeddings: Array2<f32>,
    /// Hash of the combined extracted text, for upload dedup
    content_hash: String,
}

impl Corpus {
    /// Create a corpus. Fails unless the chunk list and the embedding matrix
    /// have matching length and row correspondence.
    pub fn new(
        documents: Vec<Document>,
        chunks: Vec<Chunk>,
        embeddings: Array2<f32>,
        content_hash: String,
    ) -> Result<Self> {
        if chunks.len() != embeddings.nrows() {
            return Err(Error::internal(format!(
                "Corpus invariant violated: {} chunks but {} embedding rows",
                chunks.len(),
                embeddings.nrows()
            )));
        }

        Ok(Self {
            documents,
            chunks,
            embeddings,
            content_hash,
        })
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    pub fn embeddings(&self) -> &Array2<f32> {
        &self.embeddings
    }

    pub fn content_hash(&self) -> &str {
        &self.content_hash
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }
}

/// The single active session: an optional corpus plus the append-only chat
/// log. Owned by the caller (the server state), passed explicitly to the
/// pipeline stages that need it.
#[derive(Debug, Default)]
pub struct Session {
    /// Current corpus; handlers snapshot the Arc and drop the session lock
    corpus: Option<Arc<Corpus>>,
    /// Append-only chat log, the only durable state of the session
    chat: Vec<ChatTurn>,
}

impl Session {
    /// Create an empty session
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot the current corpus
    pub fn corpus(&self) -> Option<Arc<Corpus>> {
        self.corpus.clone()
    }

    /// True when a document set has been ingested
    pub fn has_corpus(&self) -> bool {
        self.corpus.is_some()
    }

    /// Replace the corpus wholesale
    pub fn set_corpus(&mut self, corpus: Corpus) {
        self.corpus = Some(Arc::new(corpus));
    }

    /// Drop the corpus (chunks and embeddings together)
    pub fn clear_corpus(&mut self) {
        self.corpus = None;
    }

    /// Append a question/answer exchange to the chat log
    pub fn record_exchange(&mut self, question: &str, answer: &str) {
        self.chat.push(ChatTurn::user(question));
        self.chat.push(ChatTurn::assistant(answer));
    }

    /// The full chat log, oldest first
    pub fn chat_log(&self) -> &[ChatTurn] {
        &self.chat
    }

    /// Number of question/answer exchanges recorded
    pub fn exchanges(&self) -> usize {
        self.chat
            .iter()
            .filter(|t| t.role == ChatRole::User)
            .count()
    }

    /// Clear the chat log only
    pub fn clear_chat(&mut self) {
        self.chat.clear();
    }

    /// Full reset: corpus and chat log
    pub fn reset(&mut self) {
        self.clear_corpus();
        self.clear_chat();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::document::FileType;

    fn sample_document() -> Document {
        Document::new(
            "sample.pdf".to_string(),
            FileType::Pdf,
            "abc123".to_string(),
            42,
        )
    }

    #[test]
    fn corpus_rejects_row_mismatch() {
        let chunks = vec![Chunk::new(0, "hello world".to_string())];
        let embeddings = Array2::<f32>::zeros((2, 4));
        let result = Corpus::new(vec![sample_document()], chunks, embeddings, "h".to_string());
        assert!(result.is_err());
    }

    #[test]
    fn corpus_accepts_matching_rows() {
        let chunks = vec![
            Chunk::new(0, "hello world".to_string()),
            Chunk::new(1, "more text".to_string()),
        ];
        let embeddings = Array2::<f32>::zeros((2, 4));
        let corpus =
            Corpus::new(vec![sample_document()], chunks, embeddings, "h".to_string()).unwrap();
        assert_eq!(corpus.chunk_count(), 2);
    }

    #[test]
    fn corpus_is_replaced_and_cleared_atomically() {
        let mut session = Session::new();
        assert!(!session.has_corpus());

        let chunks = vec![Chunk::new(0, "text".to_string())];
        let corpus = Corpus::new(
            vec![sample_document()],
            chunks,
            Array2::<f32>::zeros((1, 4)),
            "h1".to_string(),
        )
        .unwrap();
        session.set_corpus(corpus);
        assert!(session.has_corpus());

        session.clear_corpus();
        assert!(session.corpus().is_none());
    }

    #[test]
    fn chat_log_is_append_only_and_ordered() {
        let mut session = Session::new();
        session.record_exchange("first question", "first answer");
        session.record_exchange("second question", "second answer");

        let log = session.chat_log();
        assert_eq!(log.len(), 4);
        assert_eq!(log[0].role, ChatRole::User);
        assert_eq!(log[0].message, "first question");
        assert_eq!(log[1].role, ChatRole::Assistant);
        assert_eq!(log[3].message, "second answer");
        assert_eq!(session.exchanges(), 2);
    }

    #[test]
    fn reset_clears_everything() {
        let mut session = Session::new();
        session.record_exchange("q", "a");
        session.reset();
        assert!(session.chat_log().is_empty());
        assert!(!session.has_corpus());
    }
}
