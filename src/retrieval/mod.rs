//! Chunk ranking against a query embedding

mod ranker;

pub use ranker::{ChunkRanker, RankedChunk};
