use serde::{Deserialize, Serialize};

use super::error::BudgetError;
use super::{
    DEFAULT_BASE_CHUNK_SIZE, DEFAULT_CHUNK_OVERLAP, DEFAULT_MIN_CHUNK_SIZE, DEFAULT_SAFETY_MARGIN,
    DEFAULT_TOKEN_LIMIT,
};

/// Limits for one model. Missing fields fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BudgetConfig {
    /// Maximum estimated tokens for a combined prompt
    pub token_limit: usize,
    /// Chunk size in characters while the input fits the limit
    pub base_chunk_size: usize,
    /// Floor for the adjusted chunk size
    pub min_chunk_size: usize,
    /// Characters shared by consecutive chunks
    pub chunk_overlap: usize,
    /// Tokens held back when truncating
    pub safety_margin: usize,
}

impl Default for BudgetConfig {
    fn default() -> Self {
        Self {
            token_limit: DEFAULT_TOKEN_LIMIT,
            base_chunk_size: DEFAULT_BASE_CHUNK_SIZE,
            min_chunk_size: DEFAULT_MIN_CHUNK_SIZE,
            chunk_overlap: DEFAULT_CHUNK_OVERLAP,
            safety_margin: DEFAULT_SAFETY_MARGIN,
        }
    }
}

impl BudgetConfig {
    /// Reject limits that would stall chunking or invert the size range
    pub fn validate(&self) -> Result<(), BudgetError> {
        if self.token_limit == 0 {
            return Err(BudgetError::invalid("token limit must be positive"));
        }
        if self.base_chunk_size == 0 || self.min_chunk_size == 0 {
            return Err(BudgetError::invalid("chunk sizes must be positive"));
        }
        if self.min_chunk_size > self.base_chunk_size {
            return Err(BudgetError::invalid(format!(
                "minimum chunk size ({}) exceeds base chunk size ({})",
                self.min_chunk_size, self.base_chunk_size
            )));
        }
        // The smallest size the budgeter can pick must still advance
        if self.chunk_overlap >= self.min_chunk_size {
            return Err(BudgetError::invalid(format!(
                "chunk overlap ({}) must be smaller than minimum chunk size ({})",
                self.chunk_overlap, self.min_chunk_size
            )));
        }
        Ok(())
    }
}
