//! Scalar substitution: singular placeholders such as `{EMAIL}` or
//! `{{ FULL_NAME }}` replaced by personal fields.

use regex::Regex;

use crate::blocks::region_spans;
use crate::escape::escape_token;
use crate::models::PersonalRecord;
use crate::vocabulary::SCALAR_FIELDS;

/// Pattern for `token` wrapped in one or more braces on each side, with any
/// interior whitespace. Case-sensitive.
pub fn placeholder_pattern(token: &str) -> Regex {
    Regex::new(&format!(r"\{{+\s*{}\s*\}}+", escape_token(token)))
        .expect("escaped placeholder pattern is always valid")
}

/// Replaces every scalar placeholder in `text`. Absent fields become empty.
///
/// Idempotent: values are HTML-escaped (braces included), so a substituted
/// value never forms a new placeholder.
pub fn substitute_scalars(text: &str, personal: &PersonalRecord) -> String {
    SCALAR_FIELDS.apply(text, personal)
}

/// Scalar pass for a whole template: block regions are copied through
/// untouched so region-local names (`LOCATION` inside EXPERIENCE) stay bound
/// to the item. Items get the scalar pass when the region is rendered.
pub fn substitute_outside_regions(text: &str, personal: &PersonalRecord) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for span in region_spans().find_iter(text) {
        out.push_str(&substitute_scalars(&text[last..span.start()], personal));
        out.push_str(span.as_str());
        last = span.end();
    }
    out.push_str(&substitute_scalars(&text[last..], personal));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jane() -> PersonalRecord {
        PersonalRecord {
            full_name: Some("Jane Doe".into()),
            first_name: Some("Jane".into()),
            last_name: Some("Doe".into()),
            email: Some("jane@example.com".into()),
            region: Some("Germany".into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_single_and_nested_braces() {
        let out = substitute_scalars("{FULL_NAME}|{{FULL_NAME}}|{{{ FULL_NAME }}}", &jane());
        assert_eq!(out, "Jane Doe|Jane Doe|Jane Doe");
    }

    #[test]
    fn test_interior_whitespace() {
        assert_eq!(substitute_scalars("{ \tEMAIL\n }", &jane()), "jane@example.com");
    }

    #[test]
    fn test_case_sensitive() {
        assert_eq!(substitute_scalars("{email}", &jane()), "{email}");
    }

    #[test]
    fn test_name_does_not_match_inside_longer_tokens() {
        assert_eq!(
            substitute_scalars("{NAME} {SURNAME} {FULL_NAME}", &jane()),
            "Jane Doe Jane Doe"
        );
    }

    #[test]
    fn test_every_occurrence_replaced_inline() {
        let out = substitute_scalars("<a href=\"mailto:{EMAIL}\">{EMAIL}</a>", &jane());
        assert_eq!(out, "<a href=\"mailto:jane@example.com\">jane@example.com</a>");
    }

    #[test]
    fn test_missing_field_is_empty_not_undefined() {
        assert_eq!(substitute_scalars("[{PHONE}]", &jane()), "[]");
    }

    #[test]
    fn test_dollar_in_value_is_literal() {
        let personal = PersonalRecord {
            tagline: Some("Saved $1 and $2 ${x}".into()),
            ..Default::default()
        };
        assert_eq!(
            substitute_scalars("{TAGLINE}", &personal),
            "Saved $1 and $2 $&#123;x&#125;"
        );
    }

    #[test]
    fn test_value_containing_token_is_not_resubstituted() {
        let personal = PersonalRecord {
            tagline: Some("{EMAIL}".into()),
            email: Some("a@b.c".into()),
            ..Default::default()
        };
        let once = substitute_scalars("{TAGLINE} {EMAIL}", &personal);
        assert_eq!(once, "&#123;EMAIL&#125; a@b.c");
        assert_eq!(substitute_scalars(&once, &personal), once);
    }

    #[test]
    fn test_emptied_placeholder_exposing_another_is_substituted() {
        let personal = PersonalRecord {
            email: Some("a@b.c".into()),
            ..Default::default()
        };
        let once = substitute_scalars("{ {PHONE}}EMAIL}", &personal);
        assert_eq!(once, "a@b.c");
        assert_eq!(substitute_scalars(&once, &personal), once);
    }

    #[test]
    fn test_unknown_tokens_left_for_cleanup() {
        assert_eq!(substitute_scalars("{WEBSITE}", &jane()), "{WEBSITE}");
    }

    #[test]
    fn test_outside_regions_skips_region_bodies() {
        let out = substitute_outside_regions(
            "{LOCATION} {#EXPERIENCE}<p>{LOCATION}</p>{/EXPERIENCE} {LOCATION}",
            &jane(),
        );
        assert_eq!(out, "Germany {#EXPERIENCE}<p>{LOCATION}</p>{/EXPERIENCE} Germany");
    }

    #[test]
    fn test_outside_regions_skips_legacy_bodies() {
        let out = substitute_outside_regions(
            "<!-- BEGIN EDUCATION -->{LOCATION}<!-- END EDUCATION -->{EMAIL}",
            &jane(),
        );
        assert_eq!(
            out,
            "<!-- BEGIN EDUCATION -->{LOCATION}<!-- END EDUCATION -->jane@example.com"
        );
    }

    #[test]
    fn test_outside_regions_without_regions_matches_plain_pass() {
        let template = "<h1>{FULL_NAME}</h1><p>{EMAIL}</p>";
        assert_eq!(
            substitute_outside_regions(template, &jane()),
            substitute_scalars(template, &jane())
        );
    }
}
