//! Selection of the chunks most relevant to a query.
//!
//! Embedding models and vector indexes are external; they plug in through [`Retriever`].

use async_trait::async_trait;
use thiserror::Error;

use crate::budget::Chunk;

#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error("Retrieval backend failed: {0}")]
    Backend(String),
}

#[async_trait]
pub trait Retriever: Send + Sync {
    /// Return at most `k` chunks, most relevant first
    async fn retrieve(
        &self,
        query: &str,
        chunks: &[Chunk],
        k: usize,
    ) -> Result<Vec<Chunk>, RetrievalError>;
}

/// Takes the first `k` chunks in document order, ignoring the query
pub struct LeadingChunks;

#[async_trait]
impl Retriever for LeadingChunks {
    async fn retrieve(
        &self,
        _query: &str,
        chunks: &[Chunk],
        k: usize,
    ) -> Result<Vec<Chunk>, RetrievalError> {
        Ok(chunks.iter().take(k).cloned().collect())
    }
}

/// Joins retrieved chunks into one context block
pub fn join_chunks(chunks: &[Chunk]) -> String {
    chunks
        .iter()
        .map(|c| c.text.as_str())
        .collect::<Vec<_>>()
        .join("\n\n")
}
