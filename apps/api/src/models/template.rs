use chrono::{DateTime, Utc};
use resume_merge::TemplateDocument;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TemplateRow {
    pub id: Uuid,
    pub name: String,
    pub html_body: String,
    pub css_text: String,
    pub created_at: DateTime<Utc>,
}

impl TemplateRow {
    /// The engine-facing view of this row.
    pub fn document(&self) -> TemplateDocument {
        TemplateDocument {
            id: Some(self.id.to_string()),
            html_body: self.html_body.clone(),
            css_text: self.css_text.clone(),
        }
    }
}

/// Fields supplied when a template author saves a new template.
#[derive(Debug, Clone, Deserialize)]
pub struct NewTemplate {
    pub name: String,
    pub html_body: String,
    #[serde(default)]
    pub css_text: String,
}

impl NewTemplate {
    /// The engine-facing view, for limit checks before storing.
    pub fn document(&self) -> TemplateDocument {
        TemplateDocument::new(self.html_body.clone(), self.css_text.clone())
    }
}
