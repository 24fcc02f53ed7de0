//! Axum route handlers for resume CRUD.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::{ResumeInput, ResumeRecord};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CreateResumeResponse {
    pub resume_id: String,
}

#[derive(Debug, Serialize)]
pub struct ResumeResponse {
    pub resume: ResumeRecord,
}

#[derive(Debug, Serialize)]
pub struct ResumeListResponse {
    pub resumes: Vec<ResumeRecord>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// POST /api/v1/resumes
pub async fn handle_create(
    State(state): State<AppState>,
    Json(input): Json<ResumeInput>,
) -> Result<(StatusCode, Json<CreateResumeResponse>), AppError> {
    input.validate()?;

    let mut record = ResumeRecord::new(Uuid::new_v4().to_string());
    record.apply(input);
    let resume_id = record.id.clone();
    state.repo.put(record).await?;

    info!(%resume_id, "resume created");
    Ok((StatusCode::CREATED, Json(CreateResumeResponse { resume_id })))
}

/// GET /api/v1/resumes
pub async fn handle_list(
    State(state): State<AppState>,
) -> Result<Json<ResumeListResponse>, AppError> {
    let resumes = state.repo.list().await?;
    Ok(Json(ResumeListResponse { resumes }))
}

/// GET /api/v1/resumes/:id
pub async fn handle_get(
    State(state): State<AppState>,
    Path(resume_id): Path<String>,
) -> Result<Json<ResumeResponse>, AppError> {
    let resume = state
        .repo
        .get(&resume_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Resume {resume_id} not found")))?;
    Ok(Json(ResumeResponse { resume }))
}

/// PUT /api/v1/resumes/:id
///
/// Partial update: only fields present in the body are changed.
pub async fn handle_update(
    State(state): State<AppState>,
    Path(resume_id): Path<String>,
    Json(input): Json<ResumeInput>,
) -> Result<Json<MessageResponse>, AppError> {
    input.validate()?;

    state
        .repo
        .update(&resume_id, input)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Resume {resume_id} not found")))?;

    info!(%resume_id, "resume updated");
    Ok(Json(MessageResponse {
        message: "Resume updated successfully".to_string(),
    }))
}

/// DELETE /api/v1/resumes/:id
pub async fn handle_delete(
    State(state): State<AppState>,
    Path(resume_id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    if !state.repo.delete(&resume_id).await? {
        return Err(AppError::NotFound(format!("Resume {resume_id} not found")));
    }

    info!(%resume_id, "resume deleted");
    Ok(Json(MessageResponse {
        message: "Resume deleted successfully".to_string(),
    }))
}
