//! Similarity ranking with keyword boosts
//!
//! Scores are inner products between the (unit-length) chunk embedding rows
//! and the query embedding, i.e. cosine similarities. A configurable keyword
//! boost multiplies the score of any chunk containing the keyword.

use ndarray::{Array2, ArrayView1};

use crate::config::KeywordBoost;
use crate::types::Chunk;

/// A chunk selected for grounding, with its boosted score
#[derive(Debug, Clone)]
pub struct RankedChunk<'a> {
    /// The retrieved chunk
    pub chunk: &'a Chunk,
    /// Boosted similarity score
    pub score: f32,
}

/// Ranks chunks against a query embedding
#[derive(Debug, Clone, Default)]
pub struct ChunkRanker {
    /// Keyword boosts applied to matching chunks
    boosts: Vec<KeywordBoost>,
}

impl ChunkRanker {
    /// Create a ranker with the given keyword boosts
    pub fn new(boosts: Vec<KeywordBoost>) -> Self {
        Self { boosts }
    }

    /// Return the top `k` chunks by boosted similarity, ties broken by
    /// original index ascending. Pure function of its inputs.
    ///
    /// With fewer than `k` chunks all of them are returned; with zero chunks
    /// or `k == 0` the result is empty.
    pub fn top_k<'a>(
        &self,
        query_embedding: &[f32],
        chunks: &'a [Chunk],
        embeddings: &Array2<f32>,
        k: usize,
    ) -> Vec<RankedChunk<'a>> {
        if chunks.is_empty() || k == 0 {
            return Vec::new();
        }
        if embeddings.nrows() != chunks.len() || embeddings.ncols() != query_embedding.len() {
            tracing::warn!(
                "Embedding matrix shape {:?} does not match {} chunks / query dim {}",
                embeddings.dim(),
                chunks.len(),
                query_embedding.len()
            );
            return Vec::new();
        }

        let query = ArrayView1::from(query_embedding);
        let scores = embeddings.dot(&query);

        let mut ranked: Vec<RankedChunk<'a>> = chunks
            .iter()
            .zip(scores.iter())
            .map(|(chunk, &score)| RankedChunk {
                chunk,
                score: score * self.boost_factor(&chunk.text),
            })
            .collect();

        // Stable sort keeps source order on equal scores.
        ranked.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        ranked.truncate(k);
        ranked
    }

    /// Combined boost factor for a chunk's text
    fn boost_factor(&self, text: &str) -> f32 {
        let lower = text.to_lowercase();
        self.boosts
            .iter()
            .filter(|b| lower.contains(&b.keyword.to_lowercase()))
            .map(|b| b.factor)
            .product()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr2;

    fn preamble_ranker() -> ChunkRanker {
        ChunkRanker::new(vec![KeywordBoost {
            keyword: "preamble".to_string(),
            factor: 3.0,
        }])
    }

    fn chunks(texts: &[&str]) -> Vec<Chunk> {
        texts
            .iter()
            .enumerate()
            .map(|(i, t)| Chunk::new(i as u32, t.to_string()))
            .collect()
    }

    #[test]
    fn zero_k_returns_nothing() {
        let chunks = chunks(&["a", "b"]);
        let embeddings = arr2(&[[1.0, 0.0], [0.0, 1.0]]);
        let ranked = preamble_ranker().top_k(&[1.0, 0.0], &chunks, &embeddings, 0);
        assert!(ranked.is_empty());
    }

    #[test]
    fn k_larger_than_count_returns_all() {
        let chunks = chunks(&["a", "b"]);
        let embeddings = arr2(&[[1.0, 0.0], [0.0, 1.0]]);
        let ranked = preamble_ranker().top_k(&[1.0, 0.0], &chunks, &embeddings, 10);
        assert_eq!(ranked.len(), 2);
    }

    #[test]
    fn no_chunks_returns_nothing() {
        let embeddings = Array2::<f32>::zeros((0, 2));
        let ranked = preamble_ranker().top_k(&[1.0, 0.0], &[], &embeddings, 3);
        assert!(ranked.is_empty());
    }

    #[test]
    fn boost_overtakes_small_raw_gap() {
        // raw scores: 0.9 (plain) vs 0.5 (preamble); gap < 3x, boost wins
        let chunks = chunks(&["orbital mechanics overview", "Preamble: this treaty"]);
        let embeddings = arr2(&[[0.9, 0.0], [0.5, 0.0]]);
        let ranked = preamble_ranker().top_k(&[1.0, 0.0], &chunks, &embeddings, 1);
        assert!(ranked[0].chunk.text.contains("Preamble"));
        assert!((ranked[0].score - 1.5).abs() < 1e-6);
    }

    #[test]
    fn boost_does_not_overtake_large_raw_gap() {
        // raw scores: 0.9 vs 0.2; gap >= 3x, boost is not enough
        let chunks = chunks(&["orbital mechanics overview", "Preamble: this treaty"]);
        let embeddings = arr2(&[[0.9, 0.0], [0.2, 0.0]]);
        let ranked = preamble_ranker().top_k(&[1.0, 0.0], &chunks, &embeddings, 1);
        assert!(ranked[0].chunk.text.contains("orbital"));
    }

    #[test]
    fn ties_keep_source_order() {
        let chunks = chunks(&["first", "second", "third"]);
        let embeddings = arr2(&[[0.5, 0.0], [0.5, 0.0], [0.5, 0.0]]);
        let ranked = preamble_ranker().top_k(&[1.0, 0.0], &chunks, &embeddings, 3);
        let order: Vec<u32> = ranked.iter().map(|r| r.chunk.index).collect();
        assert_eq!(order, vec![0, 1, 2]);
    }

    #[test]
    fn boost_matches_case_insensitively() {
        let ranker = preamble_ranker();
        assert!((ranker.boost_factor("The PREAMBLE says") - 3.0).abs() < 1e-6);
        assert!((ranker.boost_factor("no keyword here") - 1.0).abs() < 1e-6);
    }

    #[test]
    fn single_chunk_preamble_scenario() {
        // window=500 over a short document yields one chunk; the boost keeps
        // it retrievable for a preamble question even with a modest raw score
        let chunker = crate::ingestion::WordChunker::new(500);
        let text = "Section 1: Introduction to Orbital Mechanics. Preamble: this treaty establishes the principles governing space activities.";
        let chunks = chunker.chunk(text);
        assert_eq!(chunks.len(), 1);

        let embeddings = arr2(&[[0.3, 0.1]]);
        let ranked = preamble_ranker().top_k(&[1.0, 0.0], &chunks, &embeddings, 3);
        assert_eq!(ranked.len(), 1);
        assert!(ranked[0].chunk.text.contains("Preamble"));
    }
}
