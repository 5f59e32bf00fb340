//! Axum route handler for resume generation.

use axum::{extract::State, http::HeaderMap, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::optional_owner;
use crate::errors::AppError;
use crate::generation::pipeline::{generate_resume, PipelineOutcome};
use crate::models::resume::ResumeInput;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GenerateResumeRequest {
    #[serde(flatten)]
    pub input: ResumeInput,
    /// Template identifier, e.g. "template1.html".
    pub template: String,
    /// Owner identity for unauthenticated callers; a valid bearer token wins
    /// when both are present.
    pub user_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct GenerateResumeResponse {
    pub success: bool,
    pub content: String,
    #[serde(rename = "templateHtml", skip_serializing_if = "Option::is_none")]
    pub template_html: Option<String>,
}

/// POST /api/generate-resume
///
/// Runs the full pipeline: prompt → AI → parse → best-effort save → render.
/// An empty generation is a soft failure: 200 with `success: false` so the
/// caller can display it.
pub async fn handle_generate(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<GenerateResumeRequest>,
) -> Result<Json<GenerateResumeResponse>, AppError> {
    if request.template.trim().is_empty() {
        return Err(AppError::Validation("template cannot be empty".to_string()));
    }

    let owner = match optional_owner(state.identity.as_ref(), &headers).await {
        Some(id) => Some(id),
        None => request.user_id,
    };

    let outcome = generate_resume(
        state.store.as_ref(),
        state.ai.as_ref(),
        state.templates.as_ref(),
        &request.input,
        &request.template,
        owner,
    )
    .await?;

    let response = match outcome {
        PipelineOutcome::Completed {
            content,
            template_html,
        } => GenerateResumeResponse {
            success: true,
            content,
            template_html: Some(template_html),
        },
        PipelineOutcome::EmptyGeneration => GenerateResumeResponse {
            success: false,
            content: "Empty AI response.".to_string(),
            template_html: None,
        },
    };

    Ok(Json(response))
}
