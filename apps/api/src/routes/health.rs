use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns a simple status object with service version and merge settings.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "resume-api",
        "page_size": state.config.page_size,
        "max_template_bytes": state.config.merge_limits.max_template_bytes,
        "max_items_per_region": state.config.merge_limits.max_items_per_region,
        "max_brace_depth": state.config.merge_limits.max_brace_depth
    }))
}
