// Prompt for quiz generation. `{count}`, `{difficulty}` and `{topic}` are
// filled before sending.

pub const QUIZ_PROMPT_TEMPLATE: &str = r#"Generate {count} {difficulty} multiple-choice questions about {topic}.
Each question must be challenging and relevant.
Return a JSON object with a key "questions" containing an array of objects.
Each object must have:
- id: (unique number)
- question: (string)
- options: (list of 4 strings)
- correct: (the exact correct option string)
- explanation: (brief reason why it is correct)
"#;
