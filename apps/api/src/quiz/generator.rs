use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::llm_client::lenient::{lenient_items, lenient_string, lenient_u32, string_items};
use crate::llm_client::prompts::{fill, JSON_ONLY_INSTRUCTION};
use crate::llm_client::{LlmError, TextGenerator};
use crate::quiz::prompts::QUIZ_PROMPT_TEMPLATE;

pub const DEFAULT_DIFFICULTY: &str = "Medium";
pub const DEFAULT_QUESTION_COUNT: u32 = 5;
pub const MAX_QUESTION_COUNT: u32 = 20;

/// Every question is multiple choice over exactly this many options.
pub const QUIZ_OPTION_COUNT: usize = 4;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Question {
    #[serde(deserialize_with = "lenient_u32")]
    pub id: u32,
    #[serde(deserialize_with = "lenient_string")]
    pub question: String,
    #[serde(deserialize_with = "string_items")]
    pub options: Vec<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub correct: String,
    #[serde(deserialize_with = "lenient_string")]
    pub explanation: String,
}

#[derive(Debug, Deserialize)]
struct QuizDraft {
    #[serde(default, deserialize_with = "lenient_items")]
    questions: Vec<Question>,
}

/// Keeps answered questions that have text and exactly four options,
/// numbering them from 1 in order.
fn tidy(questions: Vec<Question>) -> Vec<Question> {
    questions
        .into_iter()
        .filter(|q| {
            !q.question.trim().is_empty()
                && !q.correct.trim().is_empty()
                && q.options.len() == QUIZ_OPTION_COUNT
        })
        .zip(1..)
        .map(|(q, id)| Question { id, ..q })
        .collect()
}

/// Asks the model for `count` questions (clamped to 1..=20) on `topic`.
pub async fn generate_questions(
    llm: &dyn TextGenerator,
    topic: &str,
    difficulty: &str,
    count: u32,
) -> Result<Vec<Question>, LlmError> {
    let count = count.clamp(1, MAX_QUESTION_COUNT).to_string();
    let prompt = format!(
        "{}\n{JSON_ONLY_INSTRUCTION}",
        fill(
            QUIZ_PROMPT_TEMPLATE,
            &[("count", &count), ("difficulty", difficulty), ("topic", topic)],
        )
    );

    let draft: QuizDraft = llm.call_json(&prompt).await.map_err(|e| {
        warn!("Quiz generation failed for {topic:?}: {e}");
        e
    })?;
    Ok(tidy(draft.questions))
}
