pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::render::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Live preview: template and record both supplied by the editor
        .route("/api/v1/render/preview", post(handlers::handle_preview))
        // Templates
        .route("/api/v1/templates", post(handlers::handle_create_template))
        .route("/api/v1/templates/:id", get(handlers::handle_get_template))
        // Stored resumes
        .route(
            "/api/v1/resumes/:id/document",
            get(handlers::handle_resume_document),
        )
        .route("/api/v1/resumes/:id/pdf", get(handlers::handle_resume_pdf))
        .with_state(state)
}
