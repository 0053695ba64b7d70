use serde::Serialize;
use std::fmt;

use super::DEFAULT_SAFETY_MARGIN;
use super::tokens::estimate_tokens;

/// Outcome of fitting variable prompt content into a token budget
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Truncation {
    /// Content that fits the budget
    pub text: String,
    /// Whether any content was removed
    pub truncated: bool,
    /// Estimated tokens before truncation
    pub original_tokens: usize,
    /// Estimated tokens after truncation
    pub final_tokens: usize,
}

impl Truncation {
    /// The warning to surface to an end user, if content was dropped
    pub fn warning(&self) -> Option<BudgetWarning> {
        self.truncated.then_some(BudgetWarning::Truncated {
            original_tokens: self.original_tokens,
            final_tokens: self.final_tokens,
        })
    }
}

/// Non-fatal budget signals. Returned as values, never raised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BudgetWarning {
    /// Prompt content was cut to fit the token limit
    Truncated {
        original_tokens: usize,
        final_tokens: usize,
    },
    /// The uploaded input alone is larger than the model accepts
    InputExceedsLimit { total_tokens: usize, limit: usize },
}

impl fmt::Display for BudgetWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Truncated {
                original_tokens,
                final_tokens,
            } => write!(
                f,
                "Retrieved context was truncated from {} to {} tokens to fit the model's token limit.",
                original_tokens, final_tokens
            ),
            Self::InputExceedsLimit {
                total_tokens,
                limit,
            } => write!(
                f,
                "Uploaded documents' token count ({}) exceeds the processing limit ({}). Some content may be truncated.",
                total_tokens, limit
            ),
        }
    }
}

/// Tokens left for variable content once the fixed prompt and the safety margin are
/// taken out of the limit. Saturates at zero.
pub fn allowed_tokens(token_limit: usize, reserved_tokens: usize, safety_margin: usize) -> usize {
    token_limit
        .saturating_sub(reserved_tokens)
        .saturating_sub(safety_margin)
}

/// Fit `text` beside `reserved_tokens` of fixed prompt under `token_limit`,
/// holding back the default safety margin.
///
/// The margin is always enforced: text is cut once it exceeds
/// `token_limit - reserved_tokens - margin`, even if the combined prompt would
/// still be under `token_limit`.
pub fn truncate_to_budget(text: &str, reserved_tokens: usize, token_limit: usize) -> Truncation {
    truncate_to_budget_with_margin(text, reserved_tokens, token_limit, DEFAULT_SAFETY_MARGIN)
}

/// Keep the first `allowed_tokens` words of `text` when it does not fit.
///
/// Content within the allowance is returned untouched. Truncated content is
/// rejoined with single spaces, so its estimate is exactly the allowance and a
/// second pass with the same budget is a no-op.
pub fn truncate_to_budget_with_margin(
    text: &str,
    reserved_tokens: usize,
    token_limit: usize,
    safety_margin: usize,
) -> Truncation {
    let allowed = allowed_tokens(token_limit, reserved_tokens, safety_margin);
    let original_tokens = estimate_tokens(text);

    if original_tokens <= allowed {
        return Truncation {
            text: text.to_string(),
            truncated: false,
            original_tokens,
            final_tokens: original_tokens,
        };
    }

    let kept: Vec<&str> = text.split_whitespace().take(allowed).collect();

    Truncation {
        final_tokens: kept.len(),
        text: kept.join(" "),
        truncated: true,
        original_tokens,
    }
}
