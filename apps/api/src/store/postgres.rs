use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::ResumeRow;
use crate::models::template::{NewTemplate, TemplateRow};
use crate::store::{ResumeStore, TemplateStore};

/// Postgres-backed store for the `templates` and `resumes` tables.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TemplateStore for PgStore {
    async fn get_template(&self, id: Uuid) -> Result<Option<TemplateRow>, AppError> {
        let row = sqlx::query_as::<_, TemplateRow>(
            "SELECT id, name, html_body, css_text, created_at FROM templates WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn insert_template(&self, template: NewTemplate) -> Result<TemplateRow, AppError> {
        let row = sqlx::query_as::<_, TemplateRow>(
            r#"
            INSERT INTO templates (id, name, html_body, css_text)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, html_body, css_text, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&template.name)
        .bind(&template.html_body)
        .bind(&template.css_text)
        .fetch_one(&self.pool)
        .await?;

        info!(template_id = %row.id, name = %row.name, "template stored");
        Ok(row)
    }
}

#[async_trait]
impl ResumeStore for PgStore {
    async fn get_resume(&self, id: Uuid) -> Result<Option<ResumeRow>, AppError> {
        let row = sqlx::query_as::<_, ResumeRow>(
            r#"
            SELECT id, user_id, title, template_id, data, created_at, updated_at
            FROM resumes
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }
}
