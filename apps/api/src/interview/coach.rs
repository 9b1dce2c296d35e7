//! Interview feedback built on the text generator.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::interview::prompts::{SESSION_EVALUATION_PROMPT_TEMPLATE, TURN_FEEDBACK_PROMPT_TEMPLATE};
use crate::llm_client::json::extract_json;
use crate::llm_client::prompts::{fill, JSON_ONLY_INSTRUCTION};
use crate::llm_client::{LlmError, TextGenerator};

pub const SUGGESTION_COUNT: usize = 3;

const FALLBACK_SCORE: u32 = 50;

const GENERIC_SUGGESTIONS: [&str; SUGGESTION_COUNT] = [
    "Structure answers with the STAR method (Situation, Task, Action, Result).",
    "Back up claims with concrete examples and measurable outcomes.",
    "Pause to clarify the question before answering and summarise at the end.",
];

// ────────────────────────────────────────────────────────────────────────────
// Turn feedback
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TurnFeedback {
    /// Model reply as returned.
    pub response: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_question: Option<String>,
}

fn text_field(value: &Value, key: &str) -> Option<String> {
    value
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

/// Feedback on one answer plus the next question. The raw reply is always
/// returned; `feedback` and `next_question` are filled when it holds JSON.
pub async fn turn_feedback(
    llm: &dyn TextGenerator,
    role: &str,
    previous_question: &str,
    response: &str,
) -> Result<TurnFeedback, LlmError> {
    let prompt = format!(
        "{}\n{JSON_ONLY_INSTRUCTION}",
        fill(
            TURN_FEEDBACK_PROMPT_TEMPLATE,
            &[
                ("role", role),
                ("previous_question", previous_question),
                ("response", response),
            ],
        )
    );

    let text = llm.generate(&prompt).await?;
    let parsed = extract_json(&text).ok();
    Ok(TurnFeedback {
        feedback: parsed.as_ref().and_then(|v| text_field(v, "feedback")),
        next_question: parsed.as_ref().and_then(|v| text_field(v, "next_question")),
        response: text,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Session evaluation
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptTurn {
    pub sender: String,
    pub text: String,
}

impl TranscriptTurn {
    fn is_candidate(&self) -> bool {
        matches!(self.sender.to_ascii_lowercase().as_str(), "user" | "candidate" | "me")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InterviewReport {
    pub score: u32,
    pub feedback: String,
    pub suggestions: Vec<String>,
    pub detailed_analysis: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct DraftReport {
    score: f64,
    feedback: String,
    suggestions: Vec<String>,
    detailed_analysis: String,
}

/// Exactly three suggestions: the model's first three, padded from the
/// generic list.
fn normalize_suggestions(suggestions: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = suggestions
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .take(SUGGESTION_COUNT)
        .collect();
    for generic in GENERIC_SUGGESTIONS {
        if out.len() >= SUGGESTION_COUNT {
            break;
        }
        if !out.iter().any(|s| s == generic) {
            out.push(generic.to_string());
        }
    }
    out
}

/// Report used when the model cannot evaluate the session.
pub fn fallback_report(role: &str) -> InterviewReport {
    InterviewReport {
        score: FALLBACK_SCORE,
        feedback: format!(
            "Thanks for completing the {role} mock interview. Automatic evaluation is unavailable right now, \
             so review your answers against the suggestions below."
        ),
        suggestions: normalize_suggestions(vec![]),
        detailed_analysis: "A detailed analysis could not be generated for this session.".to_string(),
    }
}

fn render_transcript(transcript: &[TranscriptTurn]) -> String {
    transcript
        .iter()
        .map(|turn| {
            let speaker = if turn.is_candidate() { "Candidate" } else { "Interviewer" };
            format!("{speaker}: {}", turn.text.trim())
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Scores a finished session. Never fails: without candidate answers, or on
/// a model error, the static report is returned.
pub async fn evaluate_session(
    llm: &dyn TextGenerator,
    role: &str,
    round: &str,
    transcript: &[TranscriptTurn],
) -> InterviewReport {
    if !transcript.iter().any(TranscriptTurn::is_candidate) {
        warn!("Interview transcript has no candidate answers, returning static report");
        return fallback_report(role);
    }

    let prompt = format!(
        "{}\n{JSON_ONLY_INSTRUCTION}",
        fill(
            SESSION_EVALUATION_PROMPT_TEMPLATE,
            &[
                ("role", role),
                ("round", round),
                ("transcript", &render_transcript(transcript)),
            ],
        )
    );

    match llm.call_json::<DraftReport>(&prompt).await {
        Ok(draft) => {
            let fallback = fallback_report(role);
            InterviewReport {
                score: draft.score.clamp(0.0, 100.0).round() as u32,
                feedback: if draft.feedback.trim().is_empty() {
                    fallback.feedback
                } else {
                    draft.feedback
                },
                suggestions: normalize_suggestions(draft.suggestions),
                detailed_analysis: if draft.detailed_analysis.trim().is_empty() {
                    fallback.detailed_analysis
                } else {
                    draft.detailed_analysis
                },
            }
        }
        Err(e) => {
            warn!("Interview evaluation failed, returning static report: {e}");
            fallback_report(role)
        }
    }
}
