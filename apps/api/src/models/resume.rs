use chrono::{DateTime, Utc};
use resume_merge::ResumeRecord;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use tracing::warn;
use uuid::Uuid;

/// A stored resume. `data` is the editor's JSON document, kept as JSONB.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub template_id: Option<Uuid>,
    pub data: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ResumeRow {
    /// The engine-facing record. A document that is not a JSON object merges
    /// as an empty record rather than failing the render.
    pub fn record(&self) -> ResumeRecord {
        match serde_json::from_value(self.data.clone()) {
            Ok(record) => record,
            Err(e) => {
                warn!(resume_id = %self.id, "resume data is not a record, rendering empty: {e}");
                ResumeRecord::default()
            }
        }
    }
}
