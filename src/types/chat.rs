//! Chat log types

use serde::{Deserialize, Serialize};

/// Who produced a chat turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

/// A single turn in the append-only chat log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurn {
    /// Speaker
    pub role: ChatRole,
    /// Message text
    pub message: String,
    /// When the turn was recorded
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl ChatTurn {
    /// Create a user turn
    pub fn user(message: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            message: message.into(),
            created_at: chrono::Utc::now(),
        }
    }

    /// Create an assistant turn
    pub fn assistant(message: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            message: message.into(),
            created_at: chrono::Utc::now(),
        }
    }
}
