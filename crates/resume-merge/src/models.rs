//! Input records for the merge engine.
//!
//! Records arrive from the editor or from a database row. Deserialisation is
//! forgiving: a scalar field accepts a string, number, bool or null, and a
//! malformed collection item becomes an empty item rather than failing the
//! whole record.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// ────────────────────────────────────────────────────────────────────────────
// Template
// ────────────────────────────────────────────────────────────────────────────

/// An authored template: HTML body with placeholders plus its stylesheet.
/// Read-only to the engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateDocument {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, alias = "html_body", alias = "html")]
    #[serde(deserialize_with = "lenient::string")]
    pub html_body: String,
    #[serde(default, alias = "css_text", alias = "css")]
    #[serde(deserialize_with = "lenient::string")]
    pub css_text: String,
}

impl TemplateDocument {
    pub fn new(html_body: impl Into<String>, css_text: impl Into<String>) -> Self {
        Self {
            id: None,
            html_body: html_body.into(),
            css_text: css_text.into(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Resume record
// ────────────────────────────────────────────────────────────────────────────

/// The full data record merged into a template.
///
/// Personal fields sit at the top level of the serialized form next to the
/// collections, e.g. `{"fullName": "Jane Doe", "skills": ["Go"]}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeRecord {
    #[serde(flatten)]
    pub personal: PersonalRecord,
    #[serde(default, alias = "workExperience", deserialize_with = "lenient::seq")]
    pub experience: Vec<WorkEntry>,
    #[serde(default, deserialize_with = "lenient::seq")]
    pub education: Vec<EducationEntry>,
    #[serde(default, deserialize_with = "lenient::seq")]
    pub skills: Vec<ListItem>,
    #[serde(default, deserialize_with = "lenient::seq")]
    pub languages: Vec<ListItem>,
    #[serde(default, deserialize_with = "lenient::seq")]
    pub achievements: Vec<ListItem>,
    #[serde(default, deserialize_with = "lenient::seq")]
    pub certifications: Vec<ListItem>,
    #[serde(default, deserialize_with = "lenient::seq")]
    pub references: Vec<ReferenceEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalRecord {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, alias = "postCode", alias = "zip")]
    #[serde(deserialize_with = "lenient::opt_string")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postcode: Option<String>,
    /// Country or region. Rendered by the `LOCATION` placeholder.
    #[serde(default, alias = "location", deserialize_with = "lenient::opt_string")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, alias = "linkedIn", deserialize_with = "lenient::opt_string")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, alias = "website", deserialize_with = "lenient::opt_string")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub portfolio: Option<String>,
    #[serde(default, alias = "summary", deserialize_with = "lenient::opt_string")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub professional_summary: Option<String>,
    /// Free text used for AI drafting upstream. Carried, never merged.
    #[serde(default, deserialize_with = "lenient::opt_string")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_role_description: Option<String>,
}

impl PersonalRecord {
    /// The stored full name, or "first last" built from whichever parts exist.
    pub fn display_name(&self) -> String {
        if let Some(full) = self.full_name.as_deref().filter(|s| !s.trim().is_empty()) {
            return full.to_string();
        }
        [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkEntry {
    #[serde(default, alias = "jobTitle", deserialize_with = "lenient::opt_string")]
    pub title: Option<String>,
    #[serde(default, alias = "company", deserialize_with = "lenient::opt_string")]
    pub employer: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub location: Option<String>,
    #[serde(default, alias = "startDate", deserialize_with = "lenient::opt_string")]
    pub start: Option<String>,
    #[serde(default, alias = "endDate", deserialize_with = "lenient::opt_string")]
    pub end: Option<String>,
    #[serde(default, alias = "isCurrent", deserialize_with = "lenient::flag")]
    pub current: bool,
    #[serde(default, alias = "bullets", deserialize_with = "lenient::lines")]
    pub description: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationEntry {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub degree: Option<String>,
    #[serde(default, alias = "school", deserialize_with = "lenient::opt_string")]
    pub institution: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub location: Option<String>,
    #[serde(default, alias = "startDate", deserialize_with = "lenient::opt_string")]
    pub start: Option<String>,
    #[serde(default, alias = "endDate", deserialize_with = "lenient::opt_string")]
    pub end: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub grade: Option<String>,
    #[serde(default, alias = "description", deserialize_with = "lenient::opt_string")]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceEntry {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub company: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub email: Option<String>,
}

/// A skill, language, achievement or certification.
///
/// Editors store these either as bare strings or as records carrying a `name`
/// (or `title`). Both shapes resolve through [`ListItem::label`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ListItem {
    Text(String),
    Named { name: String },
}

impl ListItem {
    pub fn label(&self) -> &str {
        match self {
            ListItem::Text(text) => text,
            ListItem::Named { name } => name,
        }
    }

    fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => {
                let name = ["name", "title"]
                    .iter()
                    .filter_map(|key| map.get(*key))
                    .find(|v| matches!(v, Value::String(_) | Value::Number(_) | Value::Bool(_)))
                    .cloned()
                    .and_then(lenient::scalar_text)
                    .unwrap_or_default();
                ListItem::Named { name }
            }
            other => ListItem::Text(lenient::scalar_text(other).unwrap_or_default()),
        }
    }
}

impl Default for ListItem {
    fn default() -> Self {
        ListItem::Text(String::new())
    }
}

impl From<&str> for ListItem {
    fn from(text: &str) -> Self {
        ListItem::Text(text.to_string())
    }
}

impl<'de> Deserialize<'de> for ListItem {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(ListItem::from_value(Value::deserialize(deserializer)?))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Lenient field deserialisers
// ────────────────────────────────────────────────────────────────────────────

mod lenient {
    use serde::de::DeserializeOwned;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub(super) fn scalar_text(value: Value) -> Option<String> {
        match value {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    pub fn opt_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        Ok(scalar_text(Value::deserialize(d)?))
    }

    pub fn string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
        Ok(opt_string(d)?.unwrap_or_default())
    }

    pub fn flag<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::Bool(b) => b,
            Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
            Value::String(s) => matches!(s.trim().to_ascii_lowercase().as_str(), "true" | "yes" | "1"),
            _ => false,
        })
    }

    /// Description lines: a list of strings, or one string split on line breaks.
    pub fn lines<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::Array(items) => items.into_iter().filter_map(scalar_text).collect(),
            Value::String(s) => s.lines().map(str::to_string).collect(),
            _ => Vec::new(),
        })
    }

    pub fn seq<'de, D, T>(d: D) -> Result<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned + Default,
    {
        Ok(match Value::deserialize(d)? {
            Value::Array(items) => items
                .into_iter()
                .map(|item| serde_json::from_value(item).unwrap_or_default())
                .collect(),
            _ => Vec::new(),
        })
    }
}
