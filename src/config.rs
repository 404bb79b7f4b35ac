//! Configuration for the document Q&A service

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Language model configuration
    #[serde(default)]
    pub llm: LlmConfig,
    /// Speech-to-text configuration
    #[serde(default)]
    pub transcription: TranscriptionConfig,
    /// Embedding configuration
    #[serde(default)]
    pub embeddings: EmbeddingConfig,
    /// Chunking configuration
    #[serde(default)]
    pub chunking: ChunkingConfig,
    /// Retrieval configuration
    #[serde(default)]
    pub retrieval: RetrievalConfig,
    /// Encyclopedia lookup configuration
    #[serde(default)]
    pub encyclopedia: EncyclopediaConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file, falling back to defaults when the
    /// file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address
    pub host: String,
    /// Port number
    pub port: u16,
    /// Enable CORS
    pub enable_cors: bool,
    /// Maximum upload size in bytes (default: 50MB)
    pub max_upload_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            enable_cors: true,
            max_upload_size: 50 * 1024 * 1024,
        }
    }
}

/// Language model (Groq) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// OpenAI-compatible API base URL
    pub base_url: String,
    /// Default generation model, overridable per request
    pub model: String,
    /// Environment variable holding the API key
    pub api_key_env: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.groq.com/openai/v1".to_string(),
            model: "llama-3.1-8b-instant".to_string(),
            api_key_env: "GROQ_API_KEY".to_string(),
            timeout_secs: 60,
        }
    }
}

/// Speech-to-text configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptionConfig {
    /// Transcription model name
    pub model: String,
    /// Instructional bias passed to the speech model. Discourages numeral
    /// auto-correction of spoken technical phrases; not a correctness
    /// guarantee.
    pub initial_prompt: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for TranscriptionConfig {
    fn default() -> Self {
        Self {
            model: "whisper-large-v3".to_string(),
            initial_prompt: "Transcribe exactly as spoken. The user may give technical \
                             commands such as 'write a python code' or 'create a function'. \
                             Do not convert words like 'write' to numbers. Do not auto-correct, \
                             guess, or interpret."
                .to_string(),
            timeout_secs: 60,
        }
    }
}

/// Embedding configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    /// Sentence-transformers model name
    pub model: String,
    /// Embedding dimensions (384 for MiniLM)
    pub dimensions: usize,
    /// Batch size for embedding generation
    pub batch_size: usize,
    /// Maximum sequence length
    pub max_length: usize,
    /// Cache directory for model files
    pub cache_dir: PathBuf,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            model: "all-MiniLM-L6-v2".to_string(),
            dimensions: 384,
            batch_size: 32,
            max_length: 256,
            cache_dir: dirs::cache_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("askdoc")
                .join("models"),
        }
    }
}

/// Text chunking configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkingConfig {
    /// Window size in words; the last window may be shorter
    pub window_words: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self { window_words: 200 }
    }
}

/// Retrieval configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// Number of chunks to retrieve per query
    pub top_k: usize,
    /// Multiplicative score boosts for chunks containing a keyword
    pub keyword_boosts: Vec<KeywordBoost>,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: 5,
            keyword_boosts: vec![KeywordBoost {
                keyword: "preamble".to_string(),
                factor: 3.0,
            }],
        }
    }
}

/// A keyword-based score boost applied during ranking
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordBoost {
    /// Keyword matched as a case-insensitive substring of the chunk text
    pub keyword: String,
    /// Multiplicative factor applied to the chunk's similarity score
    pub factor: f32,
}

/// Encyclopedia lookup configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncyclopediaConfig {
    /// REST API base URL
    pub base_url: String,
    /// Number of sentences to keep from a summary
    pub sentences: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for EncyclopediaConfig {
    fn default() -> Self {
        Self {
            base_url: "https://en.wikipedia.org/api/rest_v1".to_string(),
            sentences: 4,
            timeout_secs: 15,
        }
    }
}
