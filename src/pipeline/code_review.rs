use serde::Serialize;
use std::path::Path;

use super::{PipelineError, complete_non_empty};
use crate::budget::{ChunkBudgeter, sanitize_text, split_into_chunks};
use crate::config::PipelineConfig;
use crate::extract::detect_language;
use crate::ingest::Document;
use crate::model::ChatModel;
use crate::prompt::code_review_prompt;
use crate::retry::with_retry;

/// Review of one source file, chunk by chunk
#[derive(Debug, Clone, Serialize)]
pub struct FileReview {
    pub file_name: String,
    /// Language the code was tagged with in the review prompts
    pub language: Option<&'static str>,
    /// Every chunk's review, labelled "Chunk i/n Review:" and separated by blank lines
    pub reviews: String,
    pub chunk_count: usize,
}

/// Reviews each source file in model-sized chunks
pub struct CodeReviewPipeline<M> {
    config: PipelineConfig,
    budgeter: ChunkBudgeter,
    model: M,
}

impl<M: ChatModel> CodeReviewPipeline<M> {
    pub fn new(config: PipelineConfig, model: M) -> Result<Self, PipelineError> {
        config.validate()?;
        let budgeter = ChunkBudgeter::new(config.budget.clone())?;

        Ok(Self {
            config,
            budgeter,
            model,
        })
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    /// Review every non-empty document; files without content are skipped
    pub async fn run(&self, documents: &[Document]) -> Result<Vec<FileReview>, PipelineError> {
        if documents.is_empty() {
            return Err(PipelineError::NoDocuments);
        }

        let mut all_reviews = Vec::new();

        for document in documents {
            let code = sanitize_text(&document.text);
            if code.is_empty() {
                tracing::warn!(file = %document.name, "No valid content found");
                continue;
            }

            all_reviews.push(self.review_file(document.base_name(), &code).await?);
        }

        if all_reviews.is_empty() {
            return Err(PipelineError::NoReviewableContent);
        }

        Ok(all_reviews)
    }

    async fn review_file(&self, file_name: &str, code: &str) -> Result<FileReview, PipelineError> {
        let chunk_size = self.budgeter.chunk_size_for(code);
        let chunks = split_into_chunks(code, chunk_size, self.config.budget.chunk_overlap)?;
        let total = chunks.len();
        let language = detect_language(Path::new(file_name));
        tracing::info!(
            file = file_name,
            language = language.unwrap_or("unknown"),
            model = self.model.name(),
            chunks = total,
            chunk_size,
            "File split into chunks"
        );

        let timeout = self.config.retry.attempt_timeout();

        let mut file_reviews = Vec::with_capacity(total);
        for chunk in &chunks {
            let index = chunk.metadata.index;
            let messages = [code_review_prompt(file_name, language, &chunk.text, index, total)];

            let model = &self.model;
            let messages = messages.as_slice();
            let review = with_retry(&self.config.retry, move || {
                complete_non_empty(model, messages, timeout)
            })
            .await
            .map_err(|source| PipelineError::Model {
                context: format!("{} chunk {}", file_name, index + 1),
                source,
            })?;

            file_reviews.push(format!("Chunk {}/{} Review:\n{}", index + 1, total, review));
        }

        Ok(FileReview {
            file_name: file_name.to_string(),
            language,
            reviews: file_reviews.join("\n\n"),
            chunk_count: total,
        })
    }
}
