//! Document ingestion: text extraction and chunking

mod chunker;
mod extractor;

pub use chunker::{normalize_whitespace, WordChunker};
pub use extractor::{hash_content, ExtractedFile, ExtractionBatch, TextExtractor};
