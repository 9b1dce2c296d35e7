// Multiple-choice quizzes generated per topic, and score submission.

pub mod generator;
pub mod handlers;
pub mod prompts;
