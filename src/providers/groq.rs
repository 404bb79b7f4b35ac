//! Groq API client for chat completion and audio transcription
//!
//! One HTTP client serves both the OpenAI-compatible chat-completions
//! endpoint and the audio-transcriptions endpoint. Calls carry an explicit
//! timeout and fail with a typed error; there are no retries, so a failed
//! generation is terminal for the interaction.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::{LlmConfig, TranscriptionConfig};
use crate::error::{Error, Result};

use super::llm::{LlmProvider, SpeechProvider};

/// Groq API client
pub struct GroqClient {
    /// HTTP client with request timeout
    client: Client,
    /// Chat completion configuration
    llm: LlmConfig,
    /// Transcription configuration
    transcription: TranscriptionConfig,
    /// API key resolved from the configured environment variable
    api_key: String,
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

#[derive(Deserialize)]
struct TranscriptionResponse {
    text: String,
}

impl GroqClient {
    /// Create a new client. Fails when the API key variable is unset.
    pub fn new(llm: &LlmConfig, transcription: &TranscriptionConfig) -> Result<Self> {
        let api_key = std::env::var(&llm.api_key_env).map_err(|_| {
            Error::Config(format!(
                "API key not found: set the {} environment variable",
                llm.api_key_env
            ))
        })?;

        let timeout = llm.timeout_secs.max(transcription.timeout_secs);
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout))
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            llm: llm.clone(),
            transcription: transcription.clone(),
            api_key,
        })
    }

    /// Check that the API is reachable with the configured key
    pub async fn health_check(&self) -> bool {
        let url = format!("{}/models", self.llm.base_url);
        match self
            .client
            .get(&url)
            .bearer_auth(&self.api_key)
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }

    /// Single-message chat completion
    async fn chat_completion(&self, model: &str, prompt: &str) -> Result<String> {
        let url = format!("{}/chat/completions", self.llm.base_url);

        let request = ChatRequest {
            model: model.to_string(),
            messages: vec![ChatMessage {
                role: "user",
                content: prompt.to_string(),
            }],
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::llm(format!("Completion request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::llm(format!(
                "Completion failed: HTTP {} - {}",
                status, body
            )));
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| Error::llm(format!("Failed to parse completion response: {}", e)))?;

        chat.choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| Error::llm("Completion response contained no choices"))
    }
}

#[async_trait]
impl LlmProvider for GroqClient {
    async fn complete(&self, model: &str, prompt: &str) -> Result<String> {
        tracing::info!("Generating completion with model: {}", model);
        self.chat_completion(model, prompt).await
    }

    fn default_model(&self) -> &str {
        &self.llm.model
    }
}

#[async_trait]
impl SpeechProvider for GroqClient {
    async fn transcribe(&self, wav_bytes: Vec<u8>) -> Result<String> {
        let url = format!("{}/audio/transcriptions", self.llm.base_url);

        tracing::info!(
            "Transcribing {} bytes with model: {}",
            wav_bytes.len(),
            self.transcription.model
        );

        // The clip is streamed as a multipart part; nothing touches disk.
        let part = reqwest::multipart::Part::bytes(wav_bytes)
            .file_name("clip.wav")
            .mime_str("audio/wav")
            .map_err(|e| Error::transcription(format!("Invalid audio part: {}", e)))?;

        let form = reqwest::multipart::Form::new()
            .text("model", self.transcription.model.clone())
            .text("prompt", self.transcription.initial_prompt.clone())
            .text("response_format", "json")
            .part("file", part);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| Error::transcription(format!("Transcription request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::transcription(format!(
                "Transcription failed: HTTP {} - {}",
                status, body
            )));
        }

        let transcription: TranscriptionResponse = response.json().await.map_err(|e| {
            Error::transcription(format!("Failed to parse transcription response: {}", e))
        })?;

        Ok(transcription.text.trim().to_string())
    }
}
