// Résumé pipeline: PDF text extraction, model structuring into
// `StructuredResume`, and PDF rendering of an edited résumé.

pub mod handlers;
pub mod metrics;
pub mod parser;
pub mod pdf;
pub mod prompts;
pub mod schema;
