// Skill evaluation: résumé skills scored against a job description by the
// model, with a deterministic keyword fallback when the model is unavailable.

pub mod handlers;
pub mod prompts;
pub mod skills;
