use super::config::BudgetConfig;
use super::error::BudgetError;
use super::sizing::chunk_size_for_tokens;
use super::splitter::{Chunk, split_into_chunks};
use super::tokens::estimate_tokens;
use super::truncate::{BudgetWarning, Truncation, truncate_to_budget_with_margin};

/// Budget functions bound to one validated [`BudgetConfig`].
///
/// Holds no mutable state; share it freely between tasks.
#[derive(Debug, Clone)]
pub struct ChunkBudgeter {
    config: BudgetConfig,
}

impl ChunkBudgeter {
    pub fn new(config: BudgetConfig) -> Result<Self, BudgetError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &BudgetConfig {
        &self.config
    }

    pub fn estimate_tokens(&self, text: &str) -> usize {
        estimate_tokens(text)
    }

    /// Chunk size for `text` under this budget's limits
    pub fn chunk_size_for(&self, text: &str) -> usize {
        let tokens = estimate_tokens(text);
        let size = chunk_size_for_tokens(
            tokens,
            self.config.base_chunk_size,
            self.config.min_chunk_size,
            self.config.token_limit,
        );

        if size != self.config.base_chunk_size {
            tracing::info!(
                base = self.config.base_chunk_size,
                adjusted = size,
                tokens,
                "Adjusting chunk size"
            );
        }

        size
    }

    /// Split `text` with a chunk size adapted to its length
    pub fn split(&self, text: &str) -> Result<Vec<Chunk>, BudgetError> {
        let size = self.chunk_size_for(text);
        split_into_chunks(text, size, self.config.chunk_overlap)
    }

    /// Fit `text` beside `reserved_tokens` of fixed prompt
    pub fn truncate(&self, text: &str, reserved_tokens: usize) -> Truncation {
        let truncation = truncate_to_budget_with_margin(
            text,
            reserved_tokens,
            self.config.token_limit,
            self.config.safety_margin,
        );

        if truncation.truncated {
            tracing::warn!(
                original_tokens = truncation.original_tokens,
                final_tokens = truncation.final_tokens,
                limit = self.config.token_limit,
                reserved_tokens,
                "Prompt exceeds token limit, truncating variable content"
            );
        }

        truncation
    }

    /// Warning for input that on its own exceeds the token limit
    pub fn check_input(&self, text: &str) -> Option<BudgetWarning> {
        let total_tokens = estimate_tokens(text);
        if total_tokens <= self.config.token_limit {
            return None;
        }

        let warning = BudgetWarning::InputExceedsLimit {
            total_tokens,
            limit: self.config.token_limit,
        };
        tracing::warn!("{}", warning);
        Some(warning)
    }
}

impl Default for ChunkBudgeter {
    fn default() -> Self {
        Self {
            config: BudgetConfig::default(),
        }
    }
}
