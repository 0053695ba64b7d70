// Public API exports
pub mod budget;
pub mod config;
pub mod extract;
pub mod ingest;
pub mod model;
pub mod pipeline;
pub mod prompt;
pub mod retrieval;
pub mod retry;

// Re-export main types for convenience
pub use budget::{
    BudgetConfig, BudgetError, BudgetWarning, Chunk, ChunkBudgeter, ChunkMetadata, Truncation,
    determine_chunk_size, estimate_tokens, sanitize_text, split_into_chunks, truncate_to_budget,
};

pub use config::{ConfigError, PipelineConfig};

pub use extract::{ExtractError, Extractor, ExtractorRegistry, PlainTextExtractor};

pub use ingest::{Document, collect_files, combined_text, load_document};

pub use model::{ChatMessage, ChatModel, ModelError, Role};

pub use pipeline::{CodeReviewPipeline, FileReview, PipelineError, TestPlanOutcome, TestPlanPipeline};

pub use retrieval::{LeadingChunks, RetrievalError, Retriever};

pub use retry::{Backoff, RetryError, RetryPolicy, with_retry};
