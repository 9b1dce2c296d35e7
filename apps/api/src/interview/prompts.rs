// Interview prompts. Placeholders are filled by `interview::coach`.

/// Per-answer feedback. Fill `{role}`, `{previous_question}` and `{response}`.
pub const TURN_FEEDBACK_PROMPT_TEMPLATE: &str = r#"You are an interviewer for a {role} position.
The candidate was asked: "{previous_question}"
The candidate replied: "{response}"

Provide feedback on the candidate's answer (tone, accuracy) and ask the next follow-up question.
Return JSON with:
- feedback
- next_question
"#;

/// Session evaluation. Fill `{role}`, `{round}` and `{transcript}`.
pub const SESSION_EVALUATION_PROMPT_TEMPLATE: &str = r#"You are a senior interviewer reviewing a mock {round} interview for a {role} position.

Transcript:
{transcript}

Evaluate the candidate's performance across the whole conversation.
Return a JSON object with this structure:
{
  "score": integer from 0 to 100,
  "feedback": "two or three sentence summary of the performance",
  "suggestions": [exactly 3 specific, actionable improvement suggestions],
  "detailed_analysis": "a paragraph covering communication, technical accuracy and structure of answers"
}
"#;
