//! The closed placeholder vocabulary.
//!
//! Every mergeable field is one row in a static table: placeholder name plus
//! an accessor returning HTML-safe text. The scalar pass and each region's
//! item mapper are driven from these tables, so adding a field is a one-line
//! change here. Templates cannot extend the vocabulary at runtime.

use std::sync::LazyLock;

use regex::{NoExpand, Regex};

use crate::escape::escape_html;
use crate::models::{
    EducationEntry, ListItem, PersonalRecord, ReferenceEntry, ResumeRecord, WorkEntry,
};
use crate::scalar::placeholder_pattern;

/// Rendered in place of `END_DATE` for a role the person still holds.
pub const PRESENT: &str = "Present";

/// One placeholder name and the accessor producing its HTML-safe value.
pub struct Field<T> {
    pub token: &'static str,
    pub value: fn(&T) -> String,
}

/// A field table with its placeholder patterns compiled once per process.
pub struct FieldSet<T: 'static> {
    fields: &'static [Field<T>],
    patterns: LazyLock<Vec<Regex>>,
}

impl<T: 'static> FieldSet<T> {
    pub fn tokens(&self) -> impl Iterator<Item = &'static str> {
        self.fields.iter().map(|f| f.token)
    }

    /// Replaces every placeholder of this table in `text` with `item`'s values.
    ///
    /// Repeats until nothing changes, since an emptied placeholder can join
    /// its neighbours into a new one (`{ {EMAIL}}CITY}`). Each round removes
    /// at least one brace and values carry none, so this terminates.
    pub fn apply(&self, text: &str, item: &T) -> String {
        let mut out = text.to_string();
        while self.apply_once(&mut out, item) {}
        out
    }

    fn apply_once(&self, text: &mut String, item: &T) -> bool {
        let mut changed = false;
        for (field, pattern) in self.fields.iter().zip(self.patterns.iter()) {
            if !pattern.is_match(text) {
                continue;
            }
            let value = (field.value)(item);
            let replaced = pattern.replace_all(text, NoExpand(&value)).into_owned();
            *text = replaced;
            changed = true;
        }
        changed
    }
}

fn compile<T>(fields: &[Field<T>]) -> Vec<Regex> {
    fields.iter().map(|f| placeholder_pattern(f.token)).collect()
}

fn text(value: &Option<String>) -> String {
    value.as_deref().map(escape_html).unwrap_or_default()
}

// ────────────────────────────────────────────────────────────────────────────
// Scalar fields
// ────────────────────────────────────────────────────────────────────────────

const PERSONAL_FIELDS: &[Field<PersonalRecord>] = &[
    Field { token: "FULL_NAME", value: |p| escape_html(&p.display_name()) },
    Field { token: "NAME", value: |p| text(&p.first_name) },
    Field { token: "SURNAME", value: |p| text(&p.last_name) },
    Field { token: "TAGLINE", value: |p| text(&p.tagline) },
    Field { token: "EMAIL", value: |p| text(&p.email) },
    Field { token: "PHONE", value: |p| text(&p.phone) },
    Field { token: "ADDRESS", value: |p| text(&p.address) },
    Field { token: "CITY", value: |p| text(&p.city) },
    Field { token: "LOCATION", value: |p| text(&p.region) },
    Field { token: "POSTCODE", value: |p| text(&p.postcode) },
    Field { token: "LINKEDIN", value: |p| text(&p.linkedin) },
    Field { token: "PORTFOLIO", value: |p| text(&p.portfolio) },
    Field { token: "PROFESSIONAL_SUMMARY", value: |p| text(&p.professional_summary) },
];

pub static SCALAR_FIELDS: FieldSet<PersonalRecord> = FieldSet {
    fields: PERSONAL_FIELDS,
    patterns: LazyLock::new(|| compile(PERSONAL_FIELDS)),
};

// ────────────────────────────────────────────────────────────────────────────
// Region-local fields
// ────────────────────────────────────────────────────────────────────────────

const WORK_FIELDS: &[Field<WorkEntry>] = &[
    Field { token: "JOB_TITLE", value: |w| text(&w.title) },
    Field { token: "COMPANY", value: |w| text(&w.employer) },
    Field { token: "LOCATION", value: |w| text(&w.location) },
    Field { token: "START_DATE", value: |w| text(&w.start) },
    Field { token: "END_DATE", value: end_date },
    Field { token: "DESCRIPTION", value: |w| description_list(&w.description) },
];

const EDUCATION_FIELDS: &[Field<EducationEntry>] = &[
    Field { token: "DEGREE", value: |e| text(&e.degree) },
    Field { token: "INSTITUTION", value: |e| text(&e.institution) },
    Field { token: "LOCATION", value: |e| text(&e.location) },
    Field { token: "START_DATE", value: |e| text(&e.start) },
    Field { token: "END_DATE", value: |e| text(&e.end) },
    Field { token: "GRADE", value: |e| text(&e.grade) },
    Field { token: "DESCRIPTION", value: |e| text(&e.note) },
];

const SKILL_FIELDS: &[Field<ListItem>] =
    &[Field { token: "SKILL", value: |i| escape_html(i.label()) }];
const ACHIEVEMENT_FIELDS: &[Field<ListItem>] =
    &[Field { token: "ACHIEVEMENT", value: |i| escape_html(i.label()) }];
const LANGUAGE_FIELDS: &[Field<ListItem>] =
    &[Field { token: "LANGUAGE", value: |i| escape_html(i.label()) }];
const CERTIFICATION_FIELDS: &[Field<ListItem>] =
    &[Field { token: "CERTIFICATION", value: |i| escape_html(i.label()) }];

const REFERENCE_FIELDS: &[Field<ReferenceEntry>] = &[
    Field { token: "REFERENCE_NAME", value: |r| text(&r.name) },
    Field { token: "REFERENCE_COMPANY", value: |r| text(&r.company) },
    Field { token: "REFERENCE_PHONE", value: |r| text(&r.phone) },
    Field { token: "REFERENCE_EMAIL", value: |r| text(&r.email) },
];

pub static EXPERIENCE: FieldSet<WorkEntry> = FieldSet {
    fields: WORK_FIELDS,
    patterns: LazyLock::new(|| compile(WORK_FIELDS)),
};
pub static EDUCATION: FieldSet<EducationEntry> = FieldSet {
    fields: EDUCATION_FIELDS,
    patterns: LazyLock::new(|| compile(EDUCATION_FIELDS)),
};
pub static SKILLS: FieldSet<ListItem> = FieldSet {
    fields: SKILL_FIELDS,
    patterns: LazyLock::new(|| compile(SKILL_FIELDS)),
};
pub static ACHIEVEMENTS: FieldSet<ListItem> = FieldSet {
    fields: ACHIEVEMENT_FIELDS,
    patterns: LazyLock::new(|| compile(ACHIEVEMENT_FIELDS)),
};
pub static LANGUAGES: FieldSet<ListItem> = FieldSet {
    fields: LANGUAGE_FIELDS,
    patterns: LazyLock::new(|| compile(LANGUAGE_FIELDS)),
};
pub static CERTIFICATIONS: FieldSet<ListItem> = FieldSet {
    fields: CERTIFICATION_FIELDS,
    patterns: LazyLock::new(|| compile(CERTIFICATION_FIELDS)),
};
pub static REFERENCES: FieldSet<ReferenceEntry> = FieldSet {
    fields: REFERENCE_FIELDS,
    patterns: LazyLock::new(|| compile(REFERENCE_FIELDS)),
};

fn end_date(entry: &WorkEntry) -> String {
    if entry.current {
        PRESENT.to_string()
    } else {
        text(&entry.end)
    }
}

/// `<ul>` of the non-blank description lines, or nothing when all are blank.
fn description_list(lines: &[String]) -> String {
    let items: Vec<String> = lines
        .iter()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .map(|line| format!("<li>{}</li>", escape_html(line)))
        .collect();
    if items.is_empty() {
        return String::new();
    }
    format!("<ul>{}</ul>", items.concat())
}

// ────────────────────────────────────────────────────────────────────────────
// Regions
// ────────────────────────────────────────────────────────────────────────────

/// The repeatable regions, in the order the block pass visits them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Experience,
    Education,
    Skills,
    Achievements,
    Languages,
    Certifications,
    References,
}

impl Region {
    pub const ALL: [Region; 7] = [
        Region::Experience,
        Region::Education,
        Region::Skills,
        Region::Achievements,
        Region::Languages,
        Region::Certifications,
        Region::References,
    ];

    /// The marker name used in templates.
    pub fn name(self) -> &'static str {
        match self {
            Region::Experience => "EXPERIENCE",
            Region::Education => "EDUCATION",
            Region::Skills => "SKILLS",
            Region::Achievements => "ACHIEVEMENTS",
            Region::Languages => "LANGUAGES",
            Region::Certifications => "CERTIFICATIONS",
            Region::References => "REFERENCES",
        }
    }

    pub fn item_count(self, record: &ResumeRecord) -> usize {
        match self {
            Region::Experience => record.experience.len(),
            Region::Education => record.education.len(),
            Region::Skills => record.skills.len(),
            Region::Achievements => record.achievements.len(),
            Region::Languages => record.languages.len(),
            Region::Certifications => record.certifications.len(),
            Region::References => record.references.len(),
        }
    }

    /// Renders `body` once per item of this region's collection, with the
    /// item's fields and then the personal fields substituted, concatenated in
    /// stored order. Empty collections render nothing.
    pub fn render(self, body: &str, record: &ResumeRecord) -> String {
        match self {
            Region::Experience => repeat(body, &record.experience, &EXPERIENCE, record),
            Region::Education => repeat(body, &record.education, &EDUCATION, record),
            Region::Skills => repeat(body, &record.skills, &SKILLS, record),
            Region::Achievements => repeat(body, &record.achievements, &ACHIEVEMENTS, record),
            Region::Languages => repeat(body, &record.languages, &LANGUAGES, record),
            Region::Certifications => {
                repeat(body, &record.certifications, &CERTIFICATIONS, record)
            }
            Region::References => repeat(body, &record.references, &REFERENCES, record),
        }
    }
}

fn repeat<T: 'static>(
    body: &str,
    items: &[T],
    fields: &FieldSet<T>,
    record: &ResumeRecord,
) -> String {
    items
        .iter()
        .map(|item| SCALAR_FIELDS.apply(&fields.apply(body, item), &record.personal))
        .collect()
}
