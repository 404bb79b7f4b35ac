//! Wikipedia summary lookup
//!
//! Fetches a short plain-text summary for a term via the REST API. Absence
//! (no page, disambiguation page, transport failure) is reported as a typed
//! `LookupError`; the caller decides what to do with it.

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use std::time::Duration;
use unicode_segmentation::UnicodeSegmentation;

use crate::config::EncyclopediaConfig;
use crate::error::Error;

use super::lookup::{LookupError, LookupProvider};

/// Wikipedia REST API client
pub struct WikipediaClient {
    /// HTTP client with request timeout
    client: Client,
    /// REST API base URL
    base_url: String,
}

/// Relevant fields of the page-summary response
#[derive(Debug, Deserialize)]
struct SummaryPage {
    /// Page type; "disambiguation" marks ambiguous terms
    #[serde(rename = "type", default)]
    page_type: String,
    /// Plain-text summary
    #[serde(default)]
    extract: String,
}

impl WikipediaClient {
    /// Create a new client
    pub fn new(config: &EncyclopediaConfig) -> crate::error::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("askdoc/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    /// Build the summary URL for a term
    fn summary_url(&self, term: &str) -> Result<Url, LookupError> {
        let title = term.trim().replace(' ', "_");
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| LookupError::Transport(format!("Invalid base URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| LookupError::Transport("Base URL cannot have segments".to_string()))?
            .extend(["page", "summary", &title]);
        Ok(url)
    }
}

/// Map a summary response to a usable extract
fn interpret_summary(status: StatusCode, page: Option<SummaryPage>) -> Result<String, LookupError> {
    if status == StatusCode::NOT_FOUND {
        return Err(LookupError::NotFound);
    }
    if !status.is_success() {
        return Err(LookupError::Transport(format!("HTTP {}", status)));
    }

    let page = page.ok_or_else(|| LookupError::Transport("Unparseable response".to_string()))?;

    if page.page_type == "disambiguation" {
        return Err(LookupError::Ambiguous);
    }
    if page.extract.trim().is_empty() {
        return Err(LookupError::NotFound);
    }

    Ok(page.extract)
}

/// Keep the first `count` sentences of a text
fn truncate_sentences(text: &str, count: usize) -> String {
    if count == 0 {
        return String::new();
    }
    text.split_sentence_bounds()
        .take(count)
        .collect::<String>()
        .trim()
        .to_string()
}

#[async_trait]
impl LookupProvider for WikipediaClient {
    async fn summarize(&self, term: &str, sentences: usize) -> Result<String, LookupError> {
        let url = self.summary_url(term)?;

        tracing::debug!("Encyclopedia lookup: {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| LookupError::Transport(e.to_string()))?;

        let status = response.status();
        let page = response.json::<SummaryPage>().await.ok();

        let extract = interpret_summary(status, page)?;
        Ok(truncate_sentences(&extract, sentences))
    }
}
