// Mock interviews: per-answer feedback with a follow-up question, and an
// end-of-session evaluation over the whole transcript.

pub mod coach;
pub mod handlers;
pub mod prompts;
