//! Resume document merge engine.
//!
//! Takes a [`TemplateDocument`] (HTML with placeholders and repeatable
//! regions) and a [`ResumeRecord`], and deterministically produces a finished
//! HTML document. The transformation is pure: no I/O, no shared mutable
//! state, no failure on missing or malformed data.
//!
//! ```text
//! <h1>{FULL_NAME}</h1>
//! <ul>{#SKILLS}<li>{SKILL}</li>{/SKILLS}</ul>
//! <!-- BEGIN EXPERIENCE --><h3>{JOB_TITLE}</h3>{DESCRIPTION}<!-- END EXPERIENCE -->
//! ```
//!
//! Template authors: a region must not contain another region with the same
//! name. See [`blocks`] for the delimiter forms.

pub mod blocks;
pub mod cleanup;
pub mod engine;
pub mod error;
pub mod escape;
pub mod models;
pub mod scalar;
pub mod vocabulary;
pub mod wrapper;

pub use engine::{merge_body, render_document, render_with, MergeLimits, Merger};
pub use error::MergeError;
pub use models::{
    EducationEntry, ListItem, PersonalRecord, ReferenceEntry, ResumeRecord, TemplateDocument,
    WorkEntry,
};
pub use vocabulary::Region;
pub use wrapper::{PageSize, ShellOptions};
