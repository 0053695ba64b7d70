use thiserror::Error;

use crate::budget::BudgetError;
use crate::config::ConfigError;
use crate::model::ModelError;
use crate::retrieval::RetrievalError;
use crate::retry::RetryError;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Unknown model '{requested}'. Available model: {available}")]
    UnknownModel { requested: String, available: String },

    #[error("No documents were provided")]
    NoDocuments,

    #[error("No valid text could be extracted from the uploaded files")]
    NoTextExtracted,

    #[error("No reviewable code content was found")]
    NoReviewableContent,

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Budget(#[from] BudgetError),

    #[error(transparent)]
    Retrieval(#[from] RetrievalError),

    #[error("Model invocation failed for {context}: {source}")]
    Model {
        context: String,
        #[source]
        source: RetryError<ModelError>,
    },
}
