//! Language model and speech-to-text provider traits

use async_trait::async_trait;

use crate::error::Result;

/// Trait for language-model text completion
///
/// A call failure is terminal for the interaction: implementations return a
/// typed error and callers propagate it rather than retrying.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Complete a single-user-message prompt with the given model
    async fn complete(&self, model: &str, prompt: &str) -> Result<String>;

    /// The configured default model
    fn default_model(&self) -> &str;
}

/// Trait for speech-to-text transcription
///
/// Given a non-empty WAV clip, produces a single concatenated text string
/// from time-ordered speech segments. Silence or unintelligible audio may
/// produce an empty string, which callers must treat as "no question asked".
#[async_trait]
pub trait SpeechProvider: Send + Sync {
    /// Transcribe a WAV-encoded audio clip
    async fn transcribe(&self, wav_bytes: Vec<u8>) -> Result<String>;
}
