//! Property tests for the merge engine's output invariants.

use proptest::prelude::*;
use resume_merge::cleanup::{has_residual_tokens, strip_residual_tokens};
use resume_merge::scalar::substitute_scalars;
use resume_merge::{merge_body, ListItem, PersonalRecord, Region, ResumeRecord, WorkEntry};

/// Template-ish text: markup, braces, block sigils and known names.
fn template_text() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            Just("{".to_string()),
            Just("}".to_string()),
            Just("{{".to_string()),
            Just("}}".to_string()),
            Just("#".to_string()),
            Just("/".to_string()),
            Just("SKILLS".to_string()),
            Just("SKILL".to_string()),
            Just("FULL_NAME".to_string()),
            Just("EXPERIENCE".to_string()),
            Just("<!-- BEGIN SKILLS -->".to_string()),
            Just("<!-- END SKILLS -->".to_string()),
            "[a-z <>=\"]{1,6}",
        ],
        0..24,
    )
    .prop_map(|parts| parts.concat())
}

fn record() -> impl Strategy<Value = ResumeRecord> {
    (
        proptest::option::of(any::<String>()),
        proptest::option::of(any::<String>()),
        prop::collection::vec(any::<String>(), 0..4),
        prop::collection::vec((proptest::option::of(any::<String>()), any::<bool>()), 0..3),
    )
        .prop_map(|(full_name, email, skills, jobs)| ResumeRecord {
            personal: PersonalRecord {
                full_name,
                email,
                ..Default::default()
            },
            skills: skills.into_iter().map(ListItem::Text).collect(),
            experience: jobs
                .into_iter()
                .map(|(title, current)| WorkEntry {
                    title,
                    current,
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        })
}

proptest! {
    #[test]
    fn cleanup_is_idempotent(text in any::<String>()) {
        let once = strip_residual_tokens(&text);
        prop_assert_eq!(strip_residual_tokens(&once), once);
    }

    #[test]
    fn cleanup_leaves_no_tokens(text in template_text()) {
        prop_assert!(!has_residual_tokens(&strip_residual_tokens(&text)));
    }

    #[test]
    fn merged_body_never_leaks_placeholders(template in template_text(), record in record()) {
        let out = merge_body(&template, &record);
        prop_assert!(!has_residual_tokens(&out), "leaked token in {:?}", out);
    }

    #[test]
    fn scalar_pass_is_idempotent(template in template_text(), record in record()) {
        let once = substitute_scalars(&template, &record.personal);
        prop_assert_eq!(substitute_scalars(&once, &record.personal), once);
    }

    #[test]
    fn empty_collections_contribute_nothing(
        pre in "[a-z <>]{0,12}",
        post in "[a-z <>]{0,12}",
        body in "[a-z <>]{0,12}",
    ) {
        let record = ResumeRecord::default();
        for region in Region::ALL {
            let name = region.name();
            let current = format!("{pre}{{#{name}}}{body}{{/{name}}}{post}");
            let legacy = format!("{pre}<!-- BEGIN {name} -->{body}<!-- END {name} -->{post}");
            prop_assert_eq!(merge_body(&current, &record), format!("{pre}{post}"));
            prop_assert_eq!(merge_body(&legacy, &record), format!("{pre}{post}"));
        }
    }

    #[test]
    fn one_body_copy_per_item(skills in prop::collection::vec(any::<String>(), 0..12)) {
        let record = ResumeRecord {
            skills: skills.iter().cloned().map(ListItem::Text).collect(),
            ..Default::default()
        };
        let out = merge_body("{#SKILLS}<li>{SKILL}</li>{/SKILLS}", &record);
        prop_assert_eq!(out.matches("<li>").count(), skills.len());
    }

    #[test]
    fn current_and_legacy_forms_render_identically(record in record()) {
        let current = merge_body(
            "<ul>{#SKILLS}<li>{SKILL} {FULL_NAME}</li>{/SKILLS}</ul>{#EXPERIENCE}<h3>{JOB_TITLE}</h3>{END_DATE}{/EXPERIENCE}",
            &record,
        );
        let legacy = merge_body(
            "<ul><!-- BEGIN SKILLS --><li>{SKILL} {FULL_NAME}</li><!-- END SKILLS --></ul><!--BEGIN EXPERIENCE--><h3>{JOB_TITLE}</h3>{END_DATE}<!--END EXPERIENCE-->",
            &record,
        );
        prop_assert_eq!(current, legacy);
    }
}
