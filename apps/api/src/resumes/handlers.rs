//! Axum route handlers for saved-resume CRUD.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::{bearer_token, require_owner};
use crate::errors::AppError;
use crate::models::resume::{
    CustomSection, EducationEntry, ExperienceEntry, NewResume, ResumePatch, ResumeRow,
};
use crate::state::AppState;
use crate::store::Mutation;

#[derive(Debug, Deserialize)]
pub struct CreateResumeRequest {
    pub user_id: Option<Uuid>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    pub summary: Option<String>,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
    #[serde(default)]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default, rename = "customSections", alias = "custom_sections")]
    pub custom_sections: Vec<CustomSection>,
    #[serde(alias = "template_url")]
    pub template_ref: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ResumeResponse {
    pub success: bool,
    pub resume: ResumeRow,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
}

/// POST /api/resumes
pub async fn handle_create(
    State(state): State<AppState>,
    Json(request): Json<CreateResumeRequest>,
) -> Result<(StatusCode, Json<ResumeResponse>), AppError> {
    if request.name.trim().is_empty() {
        return Err(AppError::Validation("name is required".to_string()));
    }
    if request.email.trim().is_empty() {
        return Err(AppError::Validation("email is required".to_string()));
    }

    let record = NewResume {
        user_id: request.user_id,
        name: request.name,
        email: request.email,
        summary: request.summary,
        education: request.education,
        experience: request.experience,
        skills: request.skills,
        custom_sections: request.custom_sections,
        template_ref: request.template_ref,
    };

    let resume = state.store.create(record).await?;
    Ok((
        StatusCode::CREATED,
        Json(ResumeResponse {
            success: true,
            resume,
        }),
    ))
}

/// GET /api/resumes/:id
pub async fn handle_get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ResumeRow>, AppError> {
    let resume = state
        .store
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))?;
    Ok(Json(resume))
}

/// GET /api/resumes/owner/:owner_id
///
/// Newest-created first.
pub async fn handle_list_by_owner(
    State(state): State<AppState>,
    Path(owner_id): Path<Uuid>,
) -> Result<Json<Vec<ResumeRow>>, AppError> {
    let resumes = state.store.list_by_owner(owner_id).await?;
    Ok(Json(resumes))
}

/// PUT /api/resumes/:id
///
/// Requires a valid bearer; updating someone else's record is Unauthorized.
pub async fn handle_update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
    Json(patch): Json<ResumePatch>,
) -> Result<Json<ResumeResponse>, AppError> {
    let owner = require_owner(state.identity.as_ref(), &headers).await?;

    match state.store.update(id, owner, patch).await? {
        Mutation::Applied(resume) => Ok(Json(ResumeResponse {
            success: true,
            resume,
        })),
        Mutation::NotOwner => Err(AppError::Unauthorized),
        Mutation::NotFound => Err(AppError::NotFound(format!("Resume {id} not found"))),
    }
}

/// DELETE /api/resumes/:id
///
/// A missing identity is a request error (400). Not-found and not-owned both
/// surface as 404 so callers cannot probe other owners' records.
pub async fn handle_delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
) -> Result<Json<DeleteResponse>, AppError> {
    let Some(token) = bearer_token(&headers) else {
        return Err(AppError::Validation("missing owner identity".to_string()));
    };
    let owner = state.identity.resolve(token).await?.id;

    match state.store.delete(id, owner).await? {
        Mutation::Applied(()) => Ok(Json(DeleteResponse { success: true })),
        Mutation::NotFound | Mutation::NotOwner => {
            Err(AppError::NotFound(format!("Resume {id} not found")))
        }
    }
}
