//! Prompt templates for the fallback ladder

use crate::retrieval::RankedChunk;

/// The phrase the model must reply with when the retrieved context does not
/// contain an answer. Part of the prompt contract; model output is checked
/// for it exactly once, in [`GroundedAnswer::from_model_output`].
pub const NOT_IN_DOCUMENT_SENTINEL: &str = "Information not in document.";

/// Outcome of the grounded answering step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroundedAnswer {
    /// The model answered from the provided context
    Grounded(String),
    /// The model reported that the context holds no answer
    NotFound,
}

impl GroundedAnswer {
    /// Classify raw model output by the sentinel contract
    pub fn from_model_output(output: &str) -> Self {
        // Match without the trailing period so lightly reworded refusals
        // ("Information not in document as far as I can tell") still count.
        if output.contains(NOT_IN_DOCUMENT_SENTINEL.trim_end_matches('.')) {
            Self::NotFound
        } else {
            Self::Grounded(output.trim().to_string())
        }
    }
}

/// Builds the prompts used by each tier of the ladder
pub struct PromptBuilder;

impl PromptBuilder {
    /// Join retrieved chunks into the context block
    pub fn build_context(retrieved: &[RankedChunk<'_>]) -> String {
        retrieved
            .iter()
            .map(|r| r.chunk.text.as_str())
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Grounded prompt: the retrieved chunks are the only permitted evidence,
    /// and the model must emit the sentinel when they hold no answer.
    pub fn build_grounded_prompt(question: &str, context: &str) -> String {
        format!(
            r#"You are an AI assistant. Answer the question using ONLY the provided document context.
Give a detailed explanation in 3-5 sentences, expanding the meaning of concepts from the document.
If the answer is not found, respond with: "{sentinel}"

CONTEXT:
{context}

QUESTION:
{question}"#,
            sentinel = NOT_IN_DOCUMENT_SENTINEL,
            context = context,
            question = question
        )
    }

    /// Encyclopedia-constrained prompt for the no-document path: the answer
    /// must be derived from the supplied summary alone.
    pub fn build_encyclopedia_prompt(question: &str, summary: &str) -> String {
        format!(
            r#"Use ONLY this encyclopedia information to answer the question factually and directly.

{summary}

Question: {question}"#,
            summary = summary,
            question = question
        )
    }

    /// Disclaimer-prefixed answer for an encyclopedia summary reached after a
    /// grounded miss.
    pub fn not_in_document_answer(summary: &str) -> String {
        format!(
            "It's not mentioned in the document, but here's what the encyclopedia says:\n\n{}",
            summary
        )
    }
}
