use tracing::{debug, warn};

use crate::llm_client::prompts::{fill, JSON_ONLY_INSTRUCTION};
use crate::llm_client::{LlmError, TextGenerator};
use crate::resume::prompts::RESUME_PARSE_PROMPT_TEMPLATE;
use crate::resume::schema::StructuredResume;

/// Characters of résumé text sent to the model.
pub const MAX_PROMPT_CHARS: usize = 4000;

/// Extracts the text layer of a PDF on a blocking thread.
///
/// Unreadable documents, and panics inside the extractor, yield an empty
/// string.
pub async fn extract_pdf_text(bytes: Vec<u8>) -> String {
    let result = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes)).await;
    match result {
        Ok(Ok(text)) => text.trim().to_string(),
        Ok(Err(e)) => {
            warn!("Error reading PDF: {e}");
            String::new()
        }
        Err(e) => {
            warn!("PDF extraction task failed: {e}");
            String::new()
        }
    }
}

fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Structures résumé text with the model.
pub async fn structure_resume(llm: &dyn TextGenerator, text: &str) -> Result<StructuredResume, LlmError> {
    debug!("Structuring resume text ({} chars)", text.chars().count());
    let prompt = format!(
        "{}\n{JSON_ONLY_INSTRUCTION}",
        fill(
            RESUME_PARSE_PROMPT_TEMPLATE,
            &[("resume_text", truncate_chars(text, MAX_PROMPT_CHARS))],
        )
    );
    llm.call_json(&prompt).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::ScriptedLlm;

    #[test]
    fn test_truncate_respects_char_boundaries() {
        let text = "é".repeat(10);
        assert_eq!(truncate_chars(&text, 3), "ééé");
        assert_eq!(truncate_chars("abc", 10), "abc");
    }

    #[tokio::test]
    async fn test_prompt_carries_at_most_limit_chars_of_text() {
        let llm = ScriptedLlm::failing();
        let text = format!("{}TAIL", "x".repeat(MAX_PROMPT_CHARS));
        let _ = structure_resume(&llm, &text).await;
        let prompt = &llm.prompts.lock().unwrap()[0];
        assert!(prompt.contains(&"x".repeat(MAX_PROMPT_CHARS)));
        assert!(!prompt.contains("TAIL"));
    }

    #[tokio::test]
    async fn test_structured_reply_is_typed() {
        let llm = ScriptedLlm::replying(&[
            r#"Here you go: {"personal": {"firstName": "Grace"}, "skills": ["COBOL"]}"#,
        ]);
        let resume = structure_resume(&llm, "Grace Hopper, COBOL").await.unwrap();
        assert_eq!(resume.personal.first_name, "Grace");
        assert_eq!(resume.skills, vec!["COBOL"]);
    }

    #[tokio::test]
    async fn test_garbage_pdf_yields_empty_text() {
        assert_eq!(extract_pdf_text(b"not a pdf".to_vec()).await, "");
    }
}
