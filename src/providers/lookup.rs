//! Encyclopedia lookup provider trait

use async_trait::async_trait;

/// Why a lookup produced no summary
///
/// The fallback ladder treats every variant uniformly as "fall through to the
/// next tier"; the type exists so the causes stay distinguishable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    /// No page matches the term
    #[error("no encyclopedia entry found")]
    NotFound,
    /// The term matches multiple candidate pages
    #[error("term is ambiguous")]
    Ambiguous,
    /// Network or protocol failure
    #[error("lookup transport error: {0}")]
    Transport(String),
}

/// Trait for encyclopedia summary lookup
#[async_trait]
pub trait LookupProvider: Send + Sync {
    /// Fetch a short summary for a term, truncated to `sentences` sentences
    async fn summarize(&self, term: &str, sentences: usize) -> Result<String, LookupError>;
}
