use serde::Serialize;

use super::{PipelineError, complete_non_empty};
use crate::budget::{BudgetWarning, ChunkBudgeter, split_into_chunks};
use crate::config::PipelineConfig;
use crate::ingest::{Document, combined_text};
use crate::model::ChatModel;
use crate::prompt::test_plan_prompt;
use crate::retrieval::{Retriever, join_chunks};
use crate::retry::with_retry;

#[derive(Debug, Clone, Serialize)]
pub struct TestPlanOutcome {
    /// Model output
    pub result: String,
    /// Budget signals to show the user, in the order they were raised
    pub warnings: Vec<BudgetWarning>,
    pub chunk_size: usize,
    pub chunk_count: usize,
}

impl TestPlanOutcome {
    /// All warnings as one user-facing string, empty when there are none
    pub fn warning_message(&self) -> String {
        self.warnings
            .iter()
            .map(|w| w.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Documents → chunks → retrieved context → bounded prompt → model
pub struct TestPlanPipeline<M, R> {
    config: PipelineConfig,
    budgeter: ChunkBudgeter,
    model: M,
    retriever: R,
}

impl<M: ChatModel, R: Retriever> TestPlanPipeline<M, R> {
    pub fn new(config: PipelineConfig, model: M, retriever: R) -> Result<Self, PipelineError> {
        config.validate()?;
        let budgeter = ChunkBudgeter::new(config.budget.clone())?;

        Ok(Self {
            config,
            budgeter,
            model,
            retriever,
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    /// Generate a test plan from `documents`.
    ///
    /// `requested_model` must match the configured model identifier when given.
    pub async fn run(
        &self,
        requested_model: Option<&str>,
        documents: &[Document],
    ) -> Result<TestPlanOutcome, PipelineError> {
        if let Some(requested) = requested_model {
            if requested != self.config.model_identifier {
                tracing::error!(requested, "Invalid model name provided");
                return Err(PipelineError::UnknownModel {
                    requested: requested.to_string(),
                    available: self.config.model_identifier.clone(),
                });
            }
        }

        let aggregated = combined_text(documents);

        if aggregated.is_empty() {
            tracing::error!(files = documents.len(), "No valid text extracted from files");
            return Err(PipelineError::NoTextExtracted);
        }

        let mut warnings = Vec::new();
        warnings.extend(self.budgeter.check_input(&aggregated));

        let chunk_size = self.budgeter.chunk_size_for(&aggregated);
        let chunks = split_into_chunks(&aggregated, chunk_size, self.config.budget.chunk_overlap)?;
        tracing::info!(
            files = documents.len(),
            chunks = chunks.len(),
            chunk_size,
            "Documents chunked"
        );

        let relevant = self
            .retriever
            .retrieve(&self.config.query, &chunks, self.config.retrieval_k)
            .await?;
        let retrieved = join_chunks(&relevant);

        let prompt = test_plan_prompt(&self.config.system_message, &retrieved, &self.budgeter);
        warnings.extend(prompt.truncation.warning());
        tracing::debug!(
            model = self.model.name(),
            prompt_tokens = prompt.estimated_tokens(),
            "Prompt assembled"
        );

        let model = &self.model;
        let messages = prompt.messages.as_slice();
        let timeout = self.config.retry.attempt_timeout();
        let result = with_retry(&self.config.retry, move || {
            complete_non_empty(model, messages, timeout)
        })
        .await
        .map_err(|source| PipelineError::Model {
            context: "test plan".to_string(),
            source,
        })?;

        Ok(TestPlanOutcome {
            result,
            warnings,
            chunk_size,
            chunk_count: chunks.len(),
        })
    }
}
