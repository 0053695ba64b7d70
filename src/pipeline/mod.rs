//! End-to-end runs: documents in, model output plus budget warnings out.

mod code_review;
mod error;
mod test_plan;


pub use code_review::{CodeReviewPipeline, FileReview};
pub use error::PipelineError;
pub use test_plan::{TestPlanOutcome, TestPlanPipeline};

use std::time::Duration;

use crate::model::{ChatMessage, ChatModel, ModelError};

/// One completion, with a blank answer treated as a failure so it gets retried.
/// An attempt running past `timeout` fails with [`ModelError::Timeout`].
async fn complete_non_empty<M: ChatModel + ?Sized>(
    model: &M,
    messages: &[ChatMessage],
    timeout: Option<Duration>,
) -> Result<String, ModelError> {
    let response = match timeout {
        Some(limit) => tokio::time::timeout(limit, model.complete(messages))
            .await
            .map_err(|_| ModelError::Timeout(limit))??,
        None => model.complete(messages).await?,
    };
    if response.trim().is_empty() {
        return Err(ModelError::EmptyResponse);
    }
    Ok(response)
}
