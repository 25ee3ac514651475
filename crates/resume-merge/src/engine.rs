//! Merge pipeline entry points.
//!
//! Flow: scalar pass → block pass → residual cleanup → document shell.
//!
//! Everything here is a pure function of its inputs. No state survives a
//! call, so the engine is safe to call per keystroke and from any thread.

use tracing::{debug, warn};

use crate::blocks::expand_blocks;
use crate::cleanup::{brace_depth, strip_residual_tokens};
use crate::error::MergeError;
use crate::models::{ResumeRecord, TemplateDocument};
use crate::scalar::substitute_outside_regions;
use crate::vocabulary::Region;
use crate::wrapper::{wrap_document, ShellOptions};

/// Merges `record` into a template body and returns the body fragment,
/// without the document shell.
pub fn merge_body(template_body: &str, record: &ResumeRecord) -> String {
    let substituted = substitute_outside_regions(template_body, &record.personal);
    let expanded = expand_blocks(&substituted, record);
    strip_residual_tokens(&expanded)
}

/// Produces the finished HTML document with default shell options.
///
/// Returns an empty string when the template has no body text. Callers treat
/// that as "not ready to render", not as an empty document.
pub fn render_document(template: &TemplateDocument, record: &ResumeRecord) -> String {
    render_with(template, record, &ShellOptions::default())
}

/// [`render_document`] with explicit shell options.
pub fn render_with(
    template: &TemplateDocument,
    record: &ResumeRecord,
    options: &ShellOptions,
) -> String {
    if template.html_body.trim().is_empty() {
        debug!(template_id = ?template.id, "template has no body, nothing to render");
        return String::new();
    }
    let body = merge_body(&template.html_body, record);
    debug!(
        template_id = ?template.id,
        template_bytes = template.html_body.len(),
        body_bytes = body.len(),
        "merged template"
    );
    wrap_document(&body, &template.css_text, options)
}

// ────────────────────────────────────────────────────────────────────────────
// Bounded entry point
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeLimits {
    /// Upper bound on `html_body` plus `css_text`, in bytes.
    pub max_template_bytes: usize,
    /// Upper bound on the length of any single collection.
    pub max_items_per_region: usize,
    /// Upper bound on `{` nesting in `html_body`. The scalar and cleanup
    /// passes rescan the body once per nesting level.
    pub max_brace_depth: usize,
}

impl Default for MergeLimits {
    fn default() -> Self {
        Self {
            max_template_bytes: 256 * 1024,
            max_items_per_region: 200,
            max_brace_depth: 32,
        }
    }
}

/// Engine front for templates from untrusted authors: checks [`MergeLimits`]
/// before merging so scanning cost stays bounded.
#[derive(Debug, Clone, Default)]
pub struct Merger {
    limits: MergeLimits,
    shell: ShellOptions,
}

impl Merger {
    pub fn new(limits: MergeLimits) -> Self {
        Self {
            limits,
            shell: ShellOptions::default(),
        }
    }

    pub fn with_shell(mut self, shell: ShellOptions) -> Self {
        self.shell = shell;
        self
    }

    pub fn limits(&self) -> MergeLimits {
        self.limits
    }

    /// Template-only limits: size of body plus stylesheet, and brace nesting
    /// in the body. Also used when a template is stored.
    pub fn check_template(&self, template: &TemplateDocument) -> Result<(), MergeError> {
        let size = template.html_body.len() + template.css_text.len();
        if size > self.limits.max_template_bytes {
            warn!(size, limit = self.limits.max_template_bytes, "template rejected");
            return Err(MergeError::TemplateTooLarge {
                size,
                limit: self.limits.max_template_bytes,
            });
        }
        let depth = brace_depth(&template.html_body);
        if depth > self.limits.max_brace_depth {
            warn!(depth, limit = self.limits.max_brace_depth, "template rejected");
            return Err(MergeError::BracesTooDeep {
                depth,
                limit: self.limits.max_brace_depth,
            });
        }
        Ok(())
    }

    pub fn check(
        &self,
        template: &TemplateDocument,
        record: &ResumeRecord,
    ) -> Result<(), MergeError> {
        self.check_template(template)?;
        for region in Region::ALL {
            let count = region.item_count(record);
            if count > self.limits.max_items_per_region {
                warn!(region = region.name(), count, "record rejected");
                return Err(MergeError::TooManyItems {
                    region: region.name(),
                    count,
                    limit: self.limits.max_items_per_region,
                });
            }
        }
        Ok(())
    }

    /// Checks limits, then renders. An empty `Ok` string means "not ready".
    pub fn render(
        &self,
        template: &TemplateDocument,
        record: &ResumeRecord,
    ) -> Result<String, MergeError> {
        self.check(template, record)?;
        Ok(render_with(template, record, &self.shell))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cleanup::has_residual_tokens;
    use crate::models::{ListItem, PersonalRecord, WorkEntry};

    fn jane(skills: &[&str]) -> ResumeRecord {
        ResumeRecord {
            personal: PersonalRecord {
                full_name: Some("Jane Doe".into()),
                ..Default::default()
            },
            skills: skills.iter().map(|&s| ListItem::from(s)).collect(),
            ..Default::default()
        }
    }

    const SKILLS_TEMPLATE: &str = "{FULL_NAME} — {#SKILLS}<li>{SKILL}</li>{/SKILLS}";

    #[test]
    fn test_skills_scenario() {
        assert_eq!(
            merge_body(SKILLS_TEMPLATE, &jane(&["Go", "Rust"])),
            "Jane Doe — <li>Go</li><li>Rust</li>"
        );
    }

    #[test]
    fn test_empty_skills_scenario() {
        assert_eq!(merge_body(SKILLS_TEMPLATE, &jane(&[])), "Jane Doe — ");
    }

    #[test]
    fn test_missing_email_is_empty() {
        assert_eq!(merge_body("{EMAIL}", &ResumeRecord::default()), "");
    }

    #[test]
    fn test_current_role_end_date_is_present() {
        let record = ResumeRecord {
            experience: vec![WorkEntry {
                end: Some("2020-05".into()),
                current: true,
                ..Default::default()
            }],
            ..Default::default()
        };
        assert_eq!(
            merge_body("{#EXPERIENCE}{END_DATE}{/EXPERIENCE}", &record),
            "Present"
        );
    }

    #[test]
    fn test_unknown_tokens_removed() {
        let out = merge_body("<p>{GITHUB}{{ WEBSITE }}{#PROJECTS}x{/PROJECTS}</p>", &jane(&[]));
        assert_eq!(out, "<p>x</p>");
        assert!(!has_residual_tokens(&out));
    }

    #[test]
    fn test_dual_syntax_equivalence() {
        let record = jane(&["Go", "Rust", "SQL"]);
        let current = merge_body("<ul>{#SKILLS}<li>{SKILL} / {FULL_NAME}</li>{/SKILLS}</ul>", &record);
        let legacy = merge_body(
            "<ul><!-- BEGIN SKILLS --><li>{SKILL} / {FULL_NAME}</li><!-- END SKILLS --></ul>",
            &record,
        );
        assert_eq!(current, legacy);
    }

    #[test]
    fn test_inputs_not_mutated() {
        let template = TemplateDocument::new(SKILLS_TEMPLATE, "h1{}");
        let record = jane(&["Go"]);
        let (template_before, record_before) = (template.clone(), record.clone());
        let _ = render_document(&template, &record);
        assert_eq!(template, template_before);
        assert_eq!(record, record_before);
    }

    #[test]
    fn test_render_document_wraps_body() {
        let template = TemplateDocument::new("<h1>{FULL_NAME}</h1>", ".x { color: red; }");
        let html = render_document(&template, &jane(&[]));
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<h1>Jane Doe</h1>"));
        assert!(html.contains(".x { color: red; }"));
        assert!(html.trim_end().ends_with("</html>"));
    }

    #[test]
    fn test_empty_template_body_returns_empty_string() {
        let record = jane(&["Go"]);
        assert_eq!(render_document(&TemplateDocument::default(), &record), "");
        assert_eq!(render_document(&TemplateDocument::new("  \n", "p{}"), &record), "");
    }

    #[test]
    fn test_deterministic() {
        let template = TemplateDocument::new(SKILLS_TEMPLATE, "");
        let record = jane(&["Go", "Rust"]);
        assert_eq!(render_document(&template, &record), render_document(&template, &record));
    }

    #[test]
    fn test_merger_rejects_large_template() {
        let merger = Merger::new(MergeLimits {
            max_template_bytes: 10,
            max_items_per_region: 5,
            max_brace_depth: 32,
        });
        let err = merger
            .render(&TemplateDocument::new("<p>{FULL_NAME}</p>", ""), &jane(&[]))
            .unwrap_err();
        assert_eq!(err, MergeError::TemplateTooLarge { size: 18, limit: 10 });
    }

    #[test]
    fn test_merger_rejects_too_many_items() {
        let merger = Merger::new(MergeLimits {
            max_template_bytes: 1024,
            max_items_per_region: 2,
            max_brace_depth: 32,
        });
        let err = merger
            .render(&TemplateDocument::new(SKILLS_TEMPLATE, ""), &jane(&["a", "b", "c"]))
            .unwrap_err();
        assert_eq!(
            err,
            MergeError::TooManyItems {
                region: "SKILLS",
                count: 3,
                limit: 2
            }
        );
    }

    #[test]
    fn test_merger_rejects_deep_brace_nesting() {
        let merger = Merger::default();
        let depth = 4000;
        let body = format!("{}{}", "{".repeat(depth), "}".repeat(depth));
        let err = merger
            .render(&TemplateDocument::new(body, ""), &jane(&[]))
            .unwrap_err();
        assert_eq!(err, MergeError::BracesTooDeep { depth, limit: 32 });

        let chain = format!("{}{{PHONE}}{}", "{ ".repeat(100), "PHONE}".repeat(100));
        assert!(matches!(
            merger.check_template(&TemplateDocument::new(chain, "")),
            Err(MergeError::BracesTooDeep { depth: 101, .. })
        ));
    }

    #[test]
    fn test_deep_braces_in_stylesheet_are_not_counted() {
        let css = format!("{}{}", "{".repeat(64), "}".repeat(64));
        let template = TemplateDocument::new("<p>{{ FULL_NAME }}</p>", css);
        assert_eq!(Merger::default().check_template(&template), Ok(()));
    }

    #[test]
    fn test_merger_within_limits_matches_render_document() {
        let template = TemplateDocument::new(SKILLS_TEMPLATE, "");
        let record = jane(&["Go"]);
        assert_eq!(
            Merger::default().render(&template, &record).unwrap(),
            render_document(&template, &record)
        );
    }
}
