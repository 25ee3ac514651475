use std::sync::Arc;

use resume_merge::Merger;

use crate::config::Config;
use crate::pdf_client::PdfRenderer;
use crate::store::{ResumeStore, TemplateStore};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub templates: Arc<dyn TemplateStore>,
    pub resumes: Arc<dyn ResumeStore>,
    /// External headless-browser renderer. Default: `HttpPdfRenderer`.
    pub pdf: Arc<dyn PdfRenderer>,
    /// Merge engine front carrying the configured limits and page size.
    pub merger: Merger,
    pub config: Config,
}
