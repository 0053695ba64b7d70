//! Token budgeting for model prompts.
//!
//! Everything here is a pure function of its arguments. [`ChunkBudgeter`] bundles the
//! functions with a validated [`BudgetConfig`] so callers with different model limits can
//! share one code path.

mod budgeter;
mod config;
mod error;
mod sizing;
mod splitter;
mod tokens;
mod truncate;

#[cfg(test)]
mod tests;

pub use budgeter::ChunkBudgeter;
pub use config::BudgetConfig;
pub use error::BudgetError;
pub use sizing::{chunk_size_for_tokens, determine_chunk_size};
pub use splitter::{Chunk, ChunkMetadata, split_into_chunks};
pub use tokens::{estimate_tokens, sanitize_text};
pub use truncate::{
    BudgetWarning, Truncation, allowed_tokens, truncate_to_budget, truncate_to_budget_with_margin,
};

/// Maximum estimated tokens a single model call may receive
pub const DEFAULT_TOKEN_LIMIT: usize = 4096;

/// Chunk size (characters) used while the input fits inside the token limit
pub const DEFAULT_BASE_CHUNK_SIZE: usize = 1000;

/// Smallest chunk size (characters) the budgeter will shrink to
pub const DEFAULT_MIN_CHUNK_SIZE: usize = 500;

/// Characters repeated between consecutive chunks
pub const DEFAULT_CHUNK_OVERLAP: usize = 100;

/// Tokens held back when truncating an assembled prompt
pub const DEFAULT_SAFETY_MARGIN: usize = 50;
