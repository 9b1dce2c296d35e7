// Learning plans: a four-week roadmap over the evaluation's missing skills,
// enriched with tutorial videos and a cover image, plus week completion and
// the completion badge.

pub mod completion;
pub mod handlers;
pub mod prompts;
pub mod roadmap;
