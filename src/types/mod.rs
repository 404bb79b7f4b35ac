//! Core types for the document Q&A service

pub mod chat;
pub mod document;
pub mod response;

pub use chat::{ChatRole, ChatTurn};
pub use document::{Chunk, Document, FileType};
pub use response::{
    AnswerTier, ChatHistoryResponse, DocumentSummary, ExtractionFailure, QueryRequest,
    QueryResponse, UploadResponse, VoiceResponse,
};
