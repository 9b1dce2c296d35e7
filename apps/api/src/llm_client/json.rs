//! Best-effort JSON recovery from free-form model output.
//!
//! Models are asked for bare JSON but routinely wrap it in prose or code
//! fences. Extraction is permissive: take everything from the first `{` to the
//! last `}` and parse that; failing that, strip fence markers and parse the
//! whole reply. Braces are not matched, so trailing commentary that itself
//! contains a `}` breaks the first attempt.

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum JsonExtractError {
    #[error("model reply was empty")]
    Empty,

    #[error("no JSON object found in model reply: {0}")]
    Invalid(#[from] serde_json::Error),
}

/// Extracts the JSON object embedded in `text`.
pub fn extract_json(text: &str) -> Result<Value, JsonExtractError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(JsonExtractError::Empty);
    }

    if let (Some(start), Some(end)) = (text.find('{'), text.rfind('}')) {
        if start < end {
            if let Ok(value) = serde_json::from_str(&text[start..=end]) {
                return Ok(value);
            }
        }
    }

    let unfenced = text.replace("```json", "").replace("```", "");
    Ok(serde_json::from_str(unfenced.trim())?)
}
