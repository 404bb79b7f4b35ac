//! Whitespace normalization and fixed-size word-window chunking

use crate::types::Chunk;

/// Collapse newlines, tabs, and whitespace runs into single spaces.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Splits normalized text into contiguous, non-overlapping windows of at most
/// `window_words` words, in source order. The last window may be shorter.
pub struct WordChunker {
    /// Window size in words
    window_words: usize,
}

impl WordChunker {
    /// Create a new chunker. A zero window is clamped to one word.
    pub fn new(window_words: usize) -> Self {
        Self {
            window_words: window_words.max(1),
        }
    }

    /// Chunk normalized text. Empty input yields an empty sequence; callers
    /// must treat that as "no content", not an error.
    pub fn chunk(&self, text: &str) -> Vec<Chunk> {
        let words: Vec<&str> = text.split_whitespace().collect();

        words
            .chunks(self.window_words)
            .enumerate()
            .map(|(i, window)| Chunk::new(i as u32, window.join(" ")))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_newlines_and_tabs() {
        assert_eq!(
            normalize_whitespace("a\nb\tc   d\r\n e"),
            "a b c d e"
        );
        assert_eq!(normalize_whitespace("   "), "");
    }

    #[test]
    fn empty_text_yields_no_chunks() {
        let chunker = WordChunker::new(200);
        assert!(chunker.chunk("").is_empty());
        assert!(chunker.chunk("   ").is_empty());
    }

    #[test]
    fn exact_windows_with_shorter_tail() {
        let chunker = WordChunker::new(3);
        let chunks = chunker.chunk("one two three four five six seven");

        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].text, "one two three");
        assert_eq!(chunks[1].text, "four five six");
        assert_eq!(chunks[2].text, "seven");
        assert_eq!(chunks[2].word_count, 1);
        assert_eq!(
            chunks.iter().map(|c| c.index).collect::<Vec<_>>(),
            vec![0, 1, 2]
        );
    }

    #[test]
    fn chunking_is_deterministic() {
        let chunker = WordChunker::new(4);
        let text = normalize_whitespace("the quick brown fox jumps over the lazy dog");
        let first = chunker.chunk(&text);
        let second = chunker.chunk(&text);

        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.text, b.text);
            assert_eq!(a.index, b.index);
        }
    }

    #[test]
    fn single_window_when_text_fits() {
        let chunker = WordChunker::new(500);
        let chunks = chunker.chunk("Section 1: Introduction to Orbital Mechanics. Preamble: this treaty establishes the principles governing activities in outer space.");
        assert_eq!(chunks.len(), 1);
        assert!(chunks[0].text.contains("Preamble"));
    }
}
