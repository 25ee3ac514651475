//! Axum route handlers for the Render and Template APIs.

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use resume_merge::{ResumeRecord, TemplateDocument};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::template::{NewTemplate, TemplateRow};
use crate::render::{merge, render_stored};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct PreviewRequest {
    pub template: TemplateDocument,
    #[serde(default)]
    pub resume: ResumeRecord,
}

#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    pub html: String,
    /// True when the template has no body yet; the editor shows its
    /// placeholder state instead of an empty frame.
    pub empty: bool,
}

#[derive(Debug, Deserialize)]
pub struct DocumentQuery {
    pub template_id: Option<Uuid>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/render/preview
///
/// Merges an in-flight template and record from the editor. Called on every
/// (debounced) keystroke, so nothing is loaded or stored.
pub async fn handle_preview(
    State(state): State<AppState>,
    Json(request): Json<PreviewRequest>,
) -> Result<Json<PreviewResponse>, AppError> {
    let html = merge(&state.merger, request.template, request.resume).await?;
    Ok(Json(PreviewResponse {
        empty: html.is_empty(),
        html,
    }))
}

/// POST /api/v1/templates
pub async fn handle_create_template(
    State(state): State<AppState>,
    Json(request): Json<NewTemplate>,
) -> Result<(StatusCode, Json<TemplateRow>), AppError> {
    if request.name.trim().is_empty() {
        return Err(AppError::Validation("name cannot be empty".to_string()));
    }
    if request.html_body.trim().is_empty() {
        return Err(AppError::Validation("html_body cannot be empty".to_string()));
    }

    state.merger.check_template(&request.document())?;

    let row = state.templates.insert_template(request).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// GET /api/v1/templates/:id
pub async fn handle_get_template(
    State(state): State<AppState>,
    Path(template_id): Path<Uuid>,
) -> Result<Json<TemplateRow>, AppError> {
    let template = state
        .templates
        .get_template(template_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Template {template_id} not found")))?;
    Ok(Json(template))
}

/// GET /api/v1/resumes/:id/document?template_id=
///
/// Returns the merged document as `text/html`, for the download and
/// manual-inspection paths.
pub async fn handle_resume_document(
    State(state): State<AppState>,
    Path(resume_id): Path<Uuid>,
    Query(query): Query<DocumentQuery>,
) -> Result<Html<String>, AppError> {
    let html = render_stored(&state, resume_id, query.template_id).await?;
    Ok(Html(html))
}

/// GET /api/v1/resumes/:id/pdf?template_id=
///
/// Merges the stored resume and hands the document to the PDF renderer.
pub async fn handle_resume_pdf(
    State(state): State<AppState>,
    Path(resume_id): Path<Uuid>,
    Query(query): Query<DocumentQuery>,
) -> Result<Response, AppError> {
    let html = render_stored(&state, resume_id, query.template_id).await?;
    let pdf = state.pdf.render_pdf(&html).await?;

    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"resume-{resume_id}.pdf\""),
        ),
    ];
    Ok((headers, pdf).into_response())
}
