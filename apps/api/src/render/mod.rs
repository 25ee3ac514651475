//! Render service: loads stored templates and resumes, runs them through the
//! merge engine and hands documents to the PDF renderer. Preview, document and
//! PDF paths all merge through [`merge`].

pub mod handlers;

use resume_merge::{Merger, ResumeRecord, TemplateDocument};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;

/// Runs the merge engine off the async executor.
///
/// Merging is CPU-bound (pattern scans over the whole template), so it runs
/// inside `spawn_blocking`. Owned inputs satisfy the `'static` closure bound.
pub async fn merge(
    merger: &Merger,
    template: TemplateDocument,
    record: ResumeRecord,
) -> Result<String, AppError> {
    let merger = merger.clone();
    tokio::task::spawn_blocking(move || merger.render(&template, &record))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in merge: {e}")))?
        .map_err(AppError::from)
}

/// Loads a stored resume and template and merges them into a full document.
///
/// `template_id` overrides the resume's own template. An empty merge result
/// means the template has no body, which is surfaced as 422 rather than an
/// empty document.
pub async fn render_stored(
    state: &AppState,
    resume_id: Uuid,
    template_id: Option<Uuid>,
) -> Result<String, AppError> {
    let resume = state
        .resumes
        .get_resume(resume_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Resume {resume_id} not found")))?;

    let template_id = template_id.or(resume.template_id).ok_or_else(|| {
        AppError::Validation("template_id is required when the resume has no template".to_string())
    })?;

    let template = state
        .templates
        .get_template(template_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Template {template_id} not found")))?;

    let html = merge(&state.merger, template.document(), resume.record()).await?;
    if html.is_empty() {
        return Err(AppError::UnprocessableEntity(format!(
            "Template {template_id} has no body to render"
        )));
    }

    info!(
        resume_id = %resume_id,
        template_id = %template_id,
        html_bytes = html.len(),
        "rendered stored resume"
    );
    Ok(html)
}
