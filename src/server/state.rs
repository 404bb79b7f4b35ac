//! Application state for the Q&A server

use parking_lot::RwLock;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::error::Result;
use crate::pipeline::{AnswerPipeline, PipelineOptions};
use crate::providers::{
    EmbeddingProvider, GroqClient, LlmProvider, LookupProvider, OnnxEmbedder, SpeechProvider,
    WikipediaClient,
};
use crate::retrieval::ChunkRanker;
use crate::session::{Corpus, Session};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Configuration
    config: AppConfig,
    /// Shared embedding model instance
    embedder: Arc<dyn EmbeddingProvider>,
    /// Speech-to-text provider
    speech: Arc<dyn SpeechProvider>,
    /// The answer pipeline (retrieval + fallback ladder)
    pipeline: AnswerPipeline,
    /// The single active session
    session: RwLock<Session>,
    /// Ready state
    ready: RwLock<bool>,
}

impl AppState {
    /// Create new application state, initializing all providers
    pub async fn new(config: AppConfig) -> Result<Self> {
        tracing::info!("Initializing application state...");

        let embedder: Arc<dyn EmbeddingProvider> =
            Arc::new(OnnxEmbedder::new(&config.embeddings).await?);
        tracing::info!("Embedder initialized ({} dims)", embedder.dimensions());

        let groq = Arc::new(GroqClient::new(&config.llm, &config.transcription)?);
        tracing::info!("LLM client initialized (model: {})", config.llm.model);

        let wikipedia: Arc<dyn LookupProvider> =
            Arc::new(WikipediaClient::new(&config.encyclopedia)?);
        tracing::info!("Encyclopedia client initialized");

        let ranker = ChunkRanker::new(config.retrieval.keyword_boosts.clone());
        let pipeline = AnswerPipeline::new(
            Arc::clone(&embedder),
            groq.clone() as Arc<dyn LlmProvider>,
            wikipedia,
            ranker,
            PipelineOptions {
                top_k: config.retrieval.top_k,
                summary_sentences: config.encyclopedia.sentences,
            },
        );

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                embedder,
                speech: groq as Arc<dyn SpeechProvider>,
                pipeline,
                session: RwLock::new(Session::new()),
                ready: RwLock::new(true),
            }),
        })
    }

    /// Get configuration
    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    /// Get the shared embedder
    pub fn embedder(&self) -> &Arc<dyn EmbeddingProvider> {
        &self.inner.embedder
    }

    /// Get the speech-to-text provider
    pub fn speech(&self) -> &Arc<dyn SpeechProvider> {
        &self.inner.speech
    }

    /// Get the answer pipeline
    pub fn pipeline(&self) -> &AnswerPipeline {
        &self.inner.pipeline
    }

    /// Snapshot the current corpus without holding the session lock
    pub fn corpus(&self) -> Option<Arc<Corpus>> {
        self.inner.session.read().corpus()
    }

    /// Replace the session's corpus
    pub fn set_corpus(&self, corpus: Corpus) {
        self.inner.session.write().set_corpus(corpus);
    }

    /// Clear the session's corpus
    pub fn clear_corpus(&self) {
        self.inner.session.write().clear_corpus();
    }

    /// Append a question/answer exchange to the chat log
    pub fn record_exchange(&self, question: &str, answer: &str) {
        self.inner.session.write().record_exchange(question, answer);
    }

    /// Read access to the session
    pub fn session(&self) -> &RwLock<Session> {
        &self.inner.session
    }

    /// Check if the server is ready
    pub fn is_ready(&self) -> bool {
        *self.inner.ready.read()
    }

    /// Set ready state
    pub fn set_ready(&self, ready: bool) {
        *self.inner.ready.write() = ready;
    }
}
