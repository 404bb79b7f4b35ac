//! The answer pipeline: retrieval plus the fallback ladder
//!
//! Tiers, in order: grounded answer from retrieved chunks, encyclopedia
//! summary, open-domain language-model answer. With no corpus the ladder
//! starts at the encyclopedia tier. A language-model failure at any tier
//! propagates to the caller; encyclopedia absence never does.

use std::sync::Arc;

use crate::error::Result;
use crate::generation::{GroundedAnswer, PromptBuilder};
use crate::providers::{EmbeddingProvider, LlmProvider, LookupProvider};
use crate::retrieval::ChunkRanker;
use crate::session::Corpus;
use crate::types::response::AnswerTier;

/// Tunables for a pipeline instance
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Chunks retrieved per grounded query
    pub top_k: usize,
    /// Sentences kept from an encyclopedia summary
    pub summary_sentences: usize,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            top_k: 5,
            summary_sentences: 4,
        }
    }
}

/// A single answer produced by the ladder
#[derive(Debug, Clone)]
pub struct AnswerOutcome {
    /// The answer text
    pub answer: String,
    /// Which tier produced it
    pub tier: AnswerTier,
    /// Chunks retrieved for grounding (0 when retrieval was skipped)
    pub chunks_retrieved: usize,
}

/// Orchestrates retrieval and the fallback ladder over provider trait objects
pub struct AnswerPipeline {
    embedder: Arc<dyn EmbeddingProvider>,
    llm: Arc<dyn LlmProvider>,
    lookup: Arc<dyn LookupProvider>,
    ranker: ChunkRanker,
    options: PipelineOptions,
}

impl AnswerPipeline {
    /// Create a pipeline
    pub fn new(
        embedder: Arc<dyn EmbeddingProvider>,
        llm: Arc<dyn LlmProvider>,
        lookup: Arc<dyn LookupProvider>,
        ranker: ChunkRanker,
        options: PipelineOptions,
    ) -> Self {
        Self {
            embedder,
            llm,
            lookup,
            ranker,
            options,
        }
    }

    /// Answer a question against an optional corpus.
    ///
    /// `model_override` selects the generation model for this request;
    /// `top_k_override` adjusts how many chunks ground the answer.
    pub async fn answer(
        &self,
        corpus: Option<&Corpus>,
        question: &str,
        model_override: Option<&str>,
        top_k_override: Option<usize>,
    ) -> Result<AnswerOutcome> {
        let model = model_override.unwrap_or_else(|| self.llm.default_model());

        match corpus {
            Some(corpus) if corpus.chunk_count() > 0 => {
                self.answer_grounded(corpus, question, model, top_k_override)
                    .await
            }
            _ => self.answer_without_corpus(question, model).await,
        }
    }

    /// Grounded tier: retrieve, prompt with the sentinel contract, escalate
    /// on a reported miss.
    async fn answer_grounded(
        &self,
        corpus: &Corpus,
        question: &str,
        model: &str,
        top_k_override: Option<usize>,
    ) -> Result<AnswerOutcome> {
        let query_embedding = self.embedder.embed(question).await?;
        let k = top_k_override.unwrap_or(self.options.top_k);

        let retrieved =
            self.ranker
                .top_k(&query_embedding, corpus.chunks(), corpus.embeddings(), k);
        let chunks_retrieved = retrieved.len();

        tracing::info!(
            "Retrieved {} of {} chunks for grounding",
            chunks_retrieved,
            corpus.chunk_count()
        );

        let context = PromptBuilder::build_context(&retrieved);
        let prompt = PromptBuilder::build_grounded_prompt(question, &context);
        let raw = self.llm.complete(model, &prompt).await?;

        match GroundedAnswer::from_model_output(&raw) {
            GroundedAnswer::Grounded(answer) => Ok(AnswerOutcome {
                answer,
                tier: AnswerTier::Grounded,
                chunks_retrieved,
            }),
            GroundedAnswer::NotFound => {
                tracing::info!("Document holds no answer, escalating");
                self.after_grounded_miss(question, model, chunks_retrieved)
                    .await
            }
        }
    }

    /// Encyclopedia tier after a grounded miss: the summary itself becomes
    /// the answer, behind an explicit not-in-document disclaimer.
    async fn after_grounded_miss(
        &self,
        question: &str,
        model: &str,
        chunks_retrieved: usize,
    ) -> Result<AnswerOutcome> {
        match self
            .lookup
            .summarize(question, self.options.summary_sentences)
            .await
        {
            Ok(summary) => Ok(AnswerOutcome {
                answer: PromptBuilder::not_in_document_answer(&summary),
                tier: AnswerTier::Encyclopedia,
                chunks_retrieved,
            }),
            Err(reason) => {
                tracing::info!("Encyclopedia lookup failed ({}), going open-domain", reason);
                let answer = self.llm.complete(model, question).await?;
                Ok(AnswerOutcome {
                    answer: answer.trim().to_string(),
                    tier: AnswerTier::OpenDomain,
                    chunks_retrieved,
                })
            }
        }
    }

    /// No-document path: retrieval is skipped and the ladder starts at the
    /// encyclopedia tier. A successful lookup constrains the model to the
    /// summary; a failed one falls through to the raw question.
    async fn answer_without_corpus(&self, question: &str, model: &str) -> Result<AnswerOutcome> {
        match self
            .lookup
            .summarize(question, self.options.summary_sentences)
            .await
        {
            Ok(summary) => {
                let prompt = PromptBuilder::build_encyclopedia_prompt(question, &summary);
                let answer = self.llm.complete(model, &prompt).await?;
                Ok(AnswerOutcome {
                    answer: answer.trim().to_string(),
                    tier: AnswerTier::Encyclopedia,
                    chunks_retrieved: 0,
                })
            }
            Err(reason) => {
                tracing::info!("Encyclopedia lookup failed ({}), going open-domain", reason);
                let answer = self.llm.complete(model, question).await?;
                Ok(AnswerOutcome {
                    answer: answer.trim().to_string(),
                    tier: AnswerTier::OpenDomain,
                    chunks_retrieved: 0,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::generation::NOT_IN_DOCUMENT_SENTINEL;
    use crate::providers::LookupError;
    use crate::types::document::{Chunk, Document, FileType};
    use async_trait::async_trait;
    use ndarray::Array2;
    use parking_lot::Mutex;
    use std::collections::VecDeque;

    struct MockEmbedder;

    #[async_trait]
    impl EmbeddingProvider for MockEmbedder {
        async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
            Ok(vec![1.0, 0.0])
        }

        fn dimensions(&self) -> usize {
            2
        }

        fn name(&self) -> &str {
            "mock"
        }
    }

    /// Scripted LLM: pops canned replies in order, records prompts
    struct MockLlm {
        replies: Mutex<VecDeque<String>>,
        prompts: Mutex<Vec<String>>,
    }

    impl MockLlm {
        fn scripted(replies: &[&str]) -> Self {
            Self {
                replies: Mutex::new(replies.iter().map(|s| s.to_string()).collect()),
                prompts: Mutex::new(Vec::new()),
            }
        }

        fn prompts(&self) -> Vec<String> {
            self.prompts.lock().clone()
        }
    }

    #[async_trait]
    impl LlmProvider for MockLlm {
        async fn complete(&self, _model: &str, prompt: &str) -> Result<String> {
            self.prompts.lock().push(prompt.to_string());
            self.replies
                .lock()
                .pop_front()
                .ok_or_else(|| Error::llm("no scripted reply"))
        }

        fn default_model(&self) -> &str {
            "mock-model"
        }
    }

    struct MockLookup {
        result: std::result::Result<String, LookupError>,
    }

    #[async_trait]
    impl LookupProvider for MockLookup {
        async fn summarize(
            &self,
            _term: &str,
            _sentences: usize,
        ) -> std::result::Result<String, LookupError> {
            self.result.clone()
        }
    }

    fn corpus_with(texts: &[&str]) -> Corpus {
        let chunks: Vec<Chunk> = texts
            .iter()
            .enumerate()
            .map(|(i, t)| Chunk::new(i as u32, t.to_string()))
            .collect();
        let n = chunks.len();
        let embeddings = Array2::from_shape_fn((n, 2), |(i, j)| if j == 0 {
            1.0 - i as f32 * 0.1
        } else {
            0.0
        });
        let doc = Document::new("doc.pdf".to_string(), FileType::Pdf, "h".to_string(), 1);
        Corpus::new(vec![doc], chunks, embeddings, "h".to_string()).unwrap()
    }

    fn pipeline(
        llm: Arc<MockLlm>,
        lookup: std::result::Result<String, LookupError>,
    ) -> AnswerPipeline {
        AnswerPipeline::new(
            Arc::new(MockEmbedder),
            llm,
            Arc::new(MockLookup { result: lookup }),
            ChunkRanker::default(),
            PipelineOptions::default(),
        )
    }

    #[tokio::test]
    async fn grounded_answer_stays_grounded() {
        let llm = Arc::new(MockLlm::scripted(&["The treaty covers outer space."]));
        let pipeline = pipeline(llm.clone(), Err(LookupError::NotFound));
        let corpus = corpus_with(&["the treaty text", "more text"]);

        let outcome = pipeline
            .answer(Some(&corpus), "What does the treaty cover?", None, None)
            .await
            .unwrap();

        assert_eq!(outcome.tier, AnswerTier::Grounded);
        assert_eq!(outcome.answer, "The treaty covers outer space.");
        assert_eq!(outcome.chunks_retrieved, 2);

        // the single prompt was the grounded one
        let prompts = llm.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("the treaty text"));
        assert!(prompts[0].contains(NOT_IN_DOCUMENT_SENTINEL));
    }

    #[tokio::test]
    async fn sentinel_then_lookup_success_yields_disclaimed_summary() {
        let llm = Arc::new(MockLlm::scripted(&[NOT_IN_DOCUMENT_SENTINEL]));
        let pipeline = pipeline(llm.clone(), Ok("A preamble is an introduction.".to_string()));
        let corpus = corpus_with(&["unrelated text"]);

        let outcome = pipeline
            .answer(Some(&corpus), "What is a preamble?", None, None)
            .await
            .unwrap();

        assert_eq!(outcome.tier, AnswerTier::Encyclopedia);
        assert!(outcome.answer.starts_with("It's not mentioned in the document"));
        assert!(outcome.answer.contains("A preamble is an introduction."));
        // the summary is the answer; no second model call happens
        assert_eq!(llm.prompts().len(), 1);
    }

    #[tokio::test]
    async fn sentinel_then_lookup_failure_goes_open_domain() {
        let llm = Arc::new(MockLlm::scripted(&[
            NOT_IN_DOCUMENT_SENTINEL,
            "An open-domain explanation.",
        ]));
        let pipeline = pipeline(llm.clone(), Err(LookupError::Ambiguous));
        let corpus = corpus_with(&["unrelated text"]);

        let outcome = pipeline
            .answer(Some(&corpus), "Explain quicksort", None, None)
            .await
            .unwrap();

        assert_eq!(outcome.tier, AnswerTier::OpenDomain);
        assert_eq!(outcome.answer, "An open-domain explanation.");
        // the second prompt is the raw question
        assert_eq!(llm.prompts()[1], "Explain quicksort");
    }

    #[tokio::test]
    async fn no_corpus_with_lookup_success_constrains_to_summary() {
        let llm = Arc::new(MockLlm::scripted(&["Ada Lovelace, per the encyclopedia."]));
        let pipeline = pipeline(
            llm.clone(),
            Ok("Ada Lovelace was an English mathematician.".to_string()),
        );

        let outcome = pipeline
            .answer(None, "Who was Ada Lovelace?", None, None)
            .await
            .unwrap();

        assert_eq!(outcome.tier, AnswerTier::Encyclopedia);
        assert_eq!(outcome.chunks_retrieved, 0);

        // retrieval was skipped and the model saw only the summary-constrained prompt
        let prompts = llm.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("ONLY this encyclopedia information"));
        assert!(prompts[0].contains("Ada Lovelace was an English mathematician."));
        assert!(!prompts[0].contains(NOT_IN_DOCUMENT_SENTINEL));
    }

    #[tokio::test]
    async fn no_corpus_with_lookup_failure_goes_open_domain() {
        let llm = Arc::new(MockLlm::scripted(&["A general answer."]));
        let pipeline = pipeline(llm.clone(), Err(LookupError::Transport("offline".into())));

        let outcome = pipeline
            .answer(None, "Write a haiku about rivers", None, None)
            .await
            .unwrap();

        assert_eq!(outcome.tier, AnswerTier::OpenDomain);
        assert_eq!(llm.prompts()[0], "Write a haiku about rivers");
    }

    #[tokio::test]
    async fn empty_corpus_behaves_like_no_corpus() {
        let llm = Arc::new(MockLlm::scripted(&["From the summary."]));
        let pipeline = pipeline(llm.clone(), Ok("Summary text.".to_string()));
        let corpus = corpus_with(&[]);

        let outcome = pipeline
            .answer(Some(&corpus), "Anything?", None, None)
            .await
            .unwrap();

        assert_eq!(outcome.tier, AnswerTier::Encyclopedia);
        assert_eq!(outcome.chunks_retrieved, 0);
    }

    #[tokio::test]
    async fn llm_failure_propagates() {
        // no scripted replies: the first completion call errors
        let llm = Arc::new(MockLlm::scripted(&[]));
        let pipeline = pipeline(llm, Err(LookupError::NotFound));
        let corpus = corpus_with(&["text"]);

        let result = pipeline.answer(Some(&corpus), "question", None, None).await;
        assert!(matches!(result, Err(Error::Llm(_))));
    }

    #[tokio::test]
    async fn top_k_override_limits_retrieval() {
        let llm = Arc::new(MockLlm::scripted(&["answer"]));
        let pipeline = pipeline(llm, Err(LookupError::NotFound));
        let corpus = corpus_with(&["a", "b", "c", "d"]);

        let outcome = pipeline
            .answer(Some(&corpus), "q", None, Some(2))
            .await
            .unwrap();
        assert_eq!(outcome.chunks_retrieved, 2);
    }
}
