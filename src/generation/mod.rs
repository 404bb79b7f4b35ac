//! Prompt construction and grounded-answer interpretation

mod prompt;

pub use prompt::{GroundedAnswer, PromptBuilder, NOT_IN_DOCUMENT_SENTINEL};
