//! askdoc: document Q&A chat service with a retrieval-and-fallback pipeline
//!
//! Users upload PDFs and ask questions by text or voice. Answers are grounded
//! in the uploaded documents; when the documents don't contain an answer the
//! service escalates to an encyclopedia summary and finally to an open-domain
//! language-model answer.

pub mod config;
pub mod error;
pub mod generation;
pub mod ingestion;
pub mod pipeline;
pub mod providers;
pub mod retrieval;
pub mod server;
pub mod session;
pub mod types;

pub use config::AppConfig;
pub use error::{Error, Result};
pub use pipeline::{AnswerOutcome, AnswerPipeline};
pub use session::{Corpus, Session};
pub use types::{
    chat::{ChatRole, ChatTurn},
    document::{Chunk, Document, FileType},
    response::{AnswerTier, QueryResponse, UploadResponse},
};
