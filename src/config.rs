use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::budget::{BudgetConfig, BudgetError};
use crate::prompt::{DEFAULT_SYSTEM_MESSAGE, TEST_PLAN_QUERY};
use crate::retry::RetryPolicy;

pub const DEFAULT_MODEL_IDENTIFIER: &str = "llama-3.2-3b-instruct";

/// Chunks handed to the test-plan prompt
pub const DEFAULT_RETRIEVAL_K: usize = 3;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Budget(#[from] BudgetError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Settings for a full ingest-to-model run. Every field has a default, so a
/// config file only names what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub budget: BudgetConfig,
    /// The model this deployment serves; requests naming another model are refused
    pub model_identifier: String,
    pub system_message: String,
    /// Query used to pick context for the test plan
    pub query: String,
    pub retrieval_k: usize,
    pub retry: RetryPolicy,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            budget: BudgetConfig::default(),
            model_identifier: DEFAULT_MODEL_IDENTIFIER.to_string(),
            system_message: DEFAULT_SYSTEM_MESSAGE.to_string(),
            query: TEST_PLAN_QUERY.to_string(),
            retrieval_k: DEFAULT_RETRIEVAL_K,
            retry: RetryPolicy::default(),
        }
    }
}

impl PipelineConfig {
    /// Load and validate a JSON config file
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let config: Self = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.budget.validate()?;

        if self.retry.max_attempts == 0 {
            return Err(ConfigError::Invalid(
                "retry.max_attempts must be at least 1".to_string(),
            ));
        }
        if self.retrieval_k == 0 {
            return Err(ConfigError::Invalid(
                "retrieval_k must be at least 1".to_string(),
            ));
        }
        if self.model_identifier.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "model_identifier must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
