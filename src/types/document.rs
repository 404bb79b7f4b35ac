//! Document and chunk types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Supported file types
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    /// PDF document
    Pdf,
    /// Plain text file
    Txt,
    /// Unknown file type
    Unknown,
}

impl FileType {
    /// Detect file type from extension
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "pdf" => Self::Pdf,
            "txt" | "text" => Self::Txt,
            _ => Self::Unknown,
        }
    }

    /// Detect file type from a filename
    pub fn from_filename(filename: &str) -> Self {
        let ext = filename.rsplit('.').next().unwrap_or("");
        Self::from_extension(ext)
    }

    /// Check if this is a supported file type
    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Unknown)
    }

    /// Get display name
    pub fn display_name(&self) -> &str {
        match self {
            Self::Pdf => "PDF",
            Self::Txt => "Text File",
            Self::Unknown => "Unknown",
        }
    }
}

/// A document whose text has been extracted into the corpus
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Unique document ID
    pub id: Uuid,
    /// Original filename as uploaded
    pub filename: String,
    /// File type
    pub file_type: FileType,
    /// Content hash of the extracted text (hex-encoded SHA-256)
    pub content_hash: String,
    /// Total number of pages (if applicable)
    pub total_pages: Option<u32>,
    /// Number of whitespace-separated words extracted
    pub word_count: usize,
    /// File size in bytes
    pub file_size: u64,
    /// Upload timestamp
    pub uploaded_at: chrono::DateTime<chrono::Utc>,
}

impl Document {
    /// Create a new document record
    pub fn new(
        filename: String,
        file_type: FileType,
        content_hash: String,
        file_size: u64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            filename,
            file_type,
            content_hash,
            total_pages: None,
            word_count: 0,
            file_size,
            uploaded_at: chrono::Utc::now(),
        }
    }
}

/// A fixed-size word window of the normalized corpus text, the unit of
/// retrieval. Chunks are immutable once produced; the whole list is rebuilt
/// whenever the document set changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    /// Position within the corpus, in source order
    pub index: u32,
    /// Chunk text (at most the configured window size in words)
    pub text: String,
    /// Number of words in this chunk
    pub word_count: usize,
}

impl Chunk {
    /// Create a new chunk
    pub fn new(index: u32, text: String) -> Self {
        let word_count = text.split_whitespace().count();
        Self {
            index,
            text,
            word_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_type_from_extension() {
        assert_eq!(FileType::from_extension("pdf"), FileType::Pdf);
        assert_eq!(FileType::from_extension("PDF"), FileType::Pdf);
        assert_eq!(FileType::from_extension("txt"), FileType::Txt);
        assert_eq!(FileType::from_extension("docx"), FileType::Unknown);
        assert!(!FileType::Unknown.is_supported());
    }

    #[test]
    fn file_type_from_filename() {
        assert_eq!(FileType::from_filename("report.pdf"), FileType::Pdf);
        assert_eq!(FileType::from_filename("notes.v2.txt"), FileType::Txt);
        assert_eq!(FileType::from_filename("archive"), FileType::Unknown);
    }

    #[test]
    fn chunk_counts_words() {
        let chunk = Chunk::new(0, "one two three".to_string());
        assert_eq!(chunk.word_count, 3);
        assert_eq!(chunk.index, 0);
    }
}
