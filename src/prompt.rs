use crate::budget::{ChunkBudgeter, Truncation, estimate_tokens};
use crate::model::ChatMessage;

/// Retrieval query for the test-plan step
pub const TEST_PLAN_QUERY: &str = "Create a detailed test plan based on the documents";

/// Closing instruction appended after the retrieved context
pub const TEST_PLAN_INSTRUCTION: &str = "Based on these documents, create a detailed test plan.";

pub const DEFAULT_SYSTEM_MESSAGE: &str = "You are a senior software test engineer. \
Read the provided project documents and write a structured test plan with scope, \
test objectives, test cases (preconditions, steps, expected results), and risks.";

/// A prompt ready for a model call, with the record of any truncation
#[derive(Debug, Clone)]
pub struct AssembledPrompt {
    pub messages: Vec<ChatMessage>,
    pub truncation: Truncation,
}

impl AssembledPrompt {
    /// Estimated tokens across all messages
    pub fn estimated_tokens(&self) -> usize {
        self.messages
            .iter()
            .map(|m| estimate_tokens(&m.content))
            .sum()
    }
}

/// Build the test-plan prompt, cutting `retrieved` so the whole prompt fits the budget.
///
/// The system message and the closing instruction are the reserved part; only the
/// retrieved context is ever truncated.
pub fn test_plan_prompt(
    system_message: &str,
    retrieved: &str,
    budgeter: &ChunkBudgeter,
) -> AssembledPrompt {
    let reserved = estimate_tokens(system_message) + estimate_tokens(TEST_PLAN_INSTRUCTION);
    let truncation = budgeter.truncate(retrieved, reserved);

    let user = format!("{}\n\n{}", truncation.text, TEST_PLAN_INSTRUCTION);

    AssembledPrompt {
        messages: vec![ChatMessage::system(system_message), ChatMessage::user(user)],
        truncation,
    }
}

/// Review request for one chunk of a source file. `index` is zero-based.
///
/// When `language` is known the code is fenced with it as the info string.
pub fn code_review_prompt(
    file_name: &str,
    language: Option<&str>,
    chunk: &str,
    index: usize,
    total: usize,
) -> ChatMessage {
    let code = match language {
        Some(lang) => format!("```{}\n{}\n```", lang, chunk),
        None => chunk.to_string(),
    };

    ChatMessage::user(format!(
        "Please perform a detailed code review of the following code snippet from file '{}' \
(chunk {} of {}).\n\
Focus on:\n\
1. Potential bugs\n\
2. Code improvements\n\
3. Best practices\n\
4. Security concerns\n\
Provide structured feedback with suggestions for improvement.\n\n\
Code:\n{}",
        file_name,
        index + 1,
        total,
        code
    ))
}
