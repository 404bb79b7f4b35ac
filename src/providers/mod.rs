//! Provider traits and clients for external models and services

pub mod embedding;
pub mod groq;
pub mod llm;
pub mod lookup;
pub mod onnx;
pub mod wikipedia;

pub use embedding::EmbeddingProvider;
pub use groq::GroqClient;
pub use llm::{LlmProvider, SpeechProvider};
pub use lookup::{LookupError, LookupProvider};
pub use onnx::OnnxEmbedder;
pub use wikipedia::WikipediaClient;
