//! Text extraction from uploaded files
//!
//! Per-file failures are collected and reported as a batch warning; the
//! upload continues with whatever files yielded text.

use sha2::{Digest, Sha256};

use crate::error::{Error, Result};
use crate::types::{
    document::{Document, FileType},
    response::ExtractionFailure,
};

/// A file whose text was successfully extracted
#[derive(Debug, Clone)]
pub struct ExtractedFile {
    /// Document record (hash, page count, word count filled in)
    pub document: Document,
    /// Extracted raw text, non-empty
    pub text: String,
}

/// Result of extracting a whole upload batch
#[derive(Debug, Default)]
pub struct ExtractionBatch {
    /// Files that yielded text, in upload order
    pub files: Vec<ExtractedFile>,
    /// Files that failed to parse or yielded no text
    pub failures: Vec<ExtractionFailure>,
}

impl ExtractionBatch {
    /// Combined raw text of all successful files, in upload order
    pub fn combined_text(&self) -> String {
        let mut text = String::new();
        for file in &self.files {
            text.push_str(&file.text);
            text.push(' ');
        }
        text
    }

    /// True when no file yielded any text
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Extracts raw text from uploaded document bytes
pub struct TextExtractor;

impl TextExtractor {
    /// Extract text from a single file.
    ///
    /// Empty extracted text is an error: a file that parses but contains no
    /// text (e.g. a scanned-image PDF) counts as an extraction failure.
    pub fn extract(filename: &str, data: &[u8]) -> Result<ExtractedFile> {
        let file_type = FileType::from_filename(filename);

        let (text, total_pages) = match file_type {
            FileType::Pdf => Self::extract_pdf(filename, data)?,
            FileType::Txt => (String::from_utf8_lossy(data).into_owned(), None),
            FileType::Unknown => {
                return Err(Error::UnsupportedFileType(filename.to_string()));
            }
        };

        if text.trim().is_empty() {
            return Err(Error::extraction(filename, "no extractable text"));
        }

        let mut document = Document::new(
            filename.to_string(),
            file_type,
            hash_content(&text),
            data.len() as u64,
        );
        document.total_pages = total_pages;
        document.word_count = text.split_whitespace().count();

        Ok(ExtractedFile { document, text })
    }

    /// Extract a whole upload batch, collecting per-file failures.
    pub fn extract_batch<'a, I>(files: I) -> ExtractionBatch
    where
        I: IntoIterator<Item = (&'a str, &'a [u8])>,
    {
        let mut batch = ExtractionBatch::default();

        for (filename, data) in files {
            match Self::extract(filename, data) {
                Ok(file) => batch.files.push(file),
                Err(e) => {
                    tracing::warn!("Could not extract text from {}: {}", filename, e);
                    batch.failures.push(ExtractionFailure {
                        filename: filename.to_string(),
                        error: e.to_string(),
                    });
                }
            }
        }

        batch
    }

    /// Extract PDF text and count pages
    fn extract_pdf(filename: &str, data: &[u8]) -> Result<(String, Option<u32>)> {
        let text = pdf_extract::extract_text_from_mem(data)
            .map_err(|e| Error::extraction(filename, e.to_string()))?;

        let total_pages = match lopdf::Document::load_mem(data) {
            Ok(doc) => Some(doc.get_pages().len() as u32),
            Err(_) => None,
        };

        Ok((text, total_pages))
    }
}

/// Hex-encoded SHA-256 of extracted text, used for upload dedup
pub fn hash_content(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_plain_text() {
        let file = TextExtractor::extract("notes.txt", b"hello world, twice over").unwrap();
        assert_eq!(file.document.file_type, FileType::Txt);
        assert_eq!(file.document.word_count, 4);
        assert_eq!(file.text, "hello world, twice over");
        assert!(!file.document.content_hash.is_empty());
    }

    #[test]
    fn empty_text_is_a_failure() {
        let err = TextExtractor::extract("blank.txt", b"   \n\t ").unwrap_err();
        assert!(matches!(err, Error::Extraction { .. }));
    }

    #[test]
    fn unsupported_extension_is_a_failure() {
        let err = TextExtractor::extract("photo.png", b"\x89PNG").unwrap_err();
        assert!(matches!(err, Error::UnsupportedFileType(_)));
    }

    #[test]
    fn batch_collects_failures_and_continues() {
        let files: Vec<(&str, &[u8])> = vec![
            ("a.txt", b"alpha beta".as_slice()),
            ("blank.txt", b"  ".as_slice()),
            ("b.txt", b"gamma".as_slice()),
        ];
        let batch = TextExtractor::extract_batch(files);

        assert_eq!(batch.files.len(), 2);
        assert_eq!(batch.failures.len(), 1);
        assert_eq!(batch.failures[0].filename, "blank.txt");
        assert!(batch.combined_text().contains("alpha beta"));
        assert!(batch.combined_text().contains("gamma"));
    }

    #[test]
    fn identical_text_hashes_identically() {
        assert_eq!(hash_content("same"), hash_content("same"));
        assert_ne!(hash_content("same"), hash_content("other"));
    }
}
