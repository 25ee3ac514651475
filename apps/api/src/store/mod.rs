//! Storage collaborators. The merge engine never touches storage; handlers
//! load a template and a resume through these traits and hand both over.
//!
//! `AppState` holds each as an `Arc<dyn …>` so tests can swap in memory.

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::ResumeRow;
use crate::models::template::{NewTemplate, TemplateRow};

#[cfg(test)]
pub mod memory;
pub mod postgres;

#[async_trait]
pub trait TemplateStore: Send + Sync {
    async fn get_template(&self, id: Uuid) -> Result<Option<TemplateRow>, AppError>;

    async fn insert_template(&self, template: NewTemplate) -> Result<TemplateRow, AppError>;
}

#[async_trait]
pub trait ResumeStore: Send + Sync {
    async fn get_resume(&self, id: Uuid) -> Result<Option<ResumeRow>, AppError>;
}
