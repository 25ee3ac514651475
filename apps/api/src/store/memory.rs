use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::ResumeRow;
use crate::models::template::{NewTemplate, TemplateRow};
use crate::store::{ResumeStore, TemplateStore};

/// In-process store for handler tests.
#[derive(Default)]
pub struct MemoryStore {
    templates: RwLock<HashMap<Uuid, TemplateRow>>,
    resumes: RwLock<HashMap<Uuid, ResumeRow>>,
}

impl MemoryStore {
    pub fn put_template(&self, row: TemplateRow) {
        self.templates.write().unwrap().insert(row.id, row);
    }

    pub fn put_resume(&self, row: ResumeRow) {
        self.resumes.write().unwrap().insert(row.id, row);
    }
}

#[async_trait]
impl TemplateStore for MemoryStore {
    async fn get_template(&self, id: Uuid) -> Result<Option<TemplateRow>, AppError> {
        Ok(self.templates.read().unwrap().get(&id).cloned())
    }

    async fn insert_template(&self, template: NewTemplate) -> Result<TemplateRow, AppError> {
        let row = TemplateRow {
            id: Uuid::new_v4(),
            name: template.name,
            html_body: template.html_body,
            css_text: template.css_text,
            created_at: Utc::now(),
        };
        self.put_template(row.clone());
        Ok(row)
    }
}

#[async_trait]
impl ResumeStore for MemoryStore {
    async fn get_resume(&self, id: Uuid) -> Result<Option<ResumeRow>, AppError> {
        Ok(self.resumes.read().unwrap().get(&id).cloned())
    }
}
