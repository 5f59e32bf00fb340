//! Decodes raw AI output into a structured resume.

use crate::errors::AppError;
use crate::models::resume::GeneratedResume;

/// Strips surrounding code fences and whitespace, then decodes the remainder
/// as JSON. A decode failure is `MalformedGeneration` — deliberately distinct
/// from the adapter's transport errors. No semantic validation of field
/// contents happens here.
pub fn parse_generated_resume(raw: &str) -> Result<GeneratedResume, AppError> {
    let body = strip_code_fences(raw);
    serde_json::from_str(body).map_err(|err| AppError::MalformedGeneration(err.to_string()))
}

/// Removes a leading ```json or ``` fence and a trailing ``` fence, if present.
fn strip_code_fences(text: &str) -> &str {
    let mut body = text.trim();
    for prefix in ["```json", "```"] {
        if let Some(stripped) = body.strip_prefix(prefix) {
            body = stripped;
            break;
        }
    }
    body = body.strip_suffix("```").unwrap_or(body);
    body.trim()
}
