//! Snapshot Diff Tests
//!
//! Round-trip identity, determinism, and the JSON shape of a diff.

mod common;

use chronicle_core::diff::{diff_summaries, ChangeType, SummaryDiff};
use chronicle_core::model::BLANK_EVENT_KEY;
use common::{character, day, event, jane_full, summary, summary_strategy, with_actions};
use proptest::prelude::*;

#[test]
fn test_self_diff_of_populated_summary() {
    let s = summary(
        vec![jane_full(), character("Bob", "40")],
        vec![
            day("June 1", vec![event("7am", "Woke up"), event("", "")]),
            day("June 2", vec![event("noon", "Lunch at the docks")]),
        ],
    );
    let diff = diff_summaries(&s, &s);
    assert!(diff.is_unchanged());
    let (characters, events) = diff.counts();
    assert_eq!(characters.unchanged, 2);
    assert_eq!(events.unchanged, 3);
    assert!(diff.events.iter().any(|e| e.key == BLANK_EVENT_KEY));
}

#[test]
fn test_diff_is_deterministic() {
    let old = summary(
        vec![character("Zed", "30"), character("Amy", "20")],
        vec![day("June 2", vec![event("b", "Two")]), day("June 1", vec![event("a", "One")])],
    );
    let new = summary(
        vec![character("amy", "21"), character("Kai", "")],
        vec![day("June 1", vec![event("a", "One!")])],
    );
    let first = diff_summaries(&old, &new);
    let second = diff_summaries(&old, &new);
    assert_eq!(first, second);

    let names: Vec<&str> = first.characters.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Kai", "Zed", "amy"]);
    let states: Vec<ChangeType> = first.characters.iter().map(|c| c.state).collect();
    assert_eq!(
        states,
        vec![ChangeType::Added, ChangeType::Removed, ChangeType::Modified]
    );
}

#[test]
fn test_added_character_lists_actions() {
    let new = summary(
        vec![with_actions(character("Mara", "29"), &["Stole the map"])],
        vec![],
    );
    let diff = diff_summaries(&summary(vec![], vec![]), &new);
    assert_eq!(diff.characters[0].state, ChangeType::Added);
    assert_eq!(diff.characters[0].notable_add, vec!["Stole the map".to_string()]);
    assert_eq!(diff.characters[0].field_diffs.len(), 13);
}

#[test]
fn test_diff_json_shape() {
    let old = summary(vec![character("Jane", "17")], vec![]);
    let new = summary(vec![character("Jane", "18")], vec![]);
    let diff = diff_summaries(&old, &new);

    let json = serde_json::to_value(&diff).unwrap();
    assert_eq!(json["characters"][0]["state"], "modified");
    assert_eq!(json["characters"][0]["field_diffs"][0]["path"], "Age");
    assert_eq!(json["characters"][0]["field_diffs"][0]["diff"]["old"], "17");

    let back: SummaryDiff = serde_json::from_value(json).unwrap();
    assert_eq!(back, diff);
}

proptest! {
    #[test]
    fn prop_self_diff_is_unchanged(s in summary_strategy()) {
        let diff = diff_summaries(&s, &s);
        prop_assert!(diff.is_unchanged());
        let (characters, events) = diff.counts();
        prop_assert_eq!(characters.changed(), 0);
        prop_assert_eq!(events.changed(), 0);
        prop_assert_eq!(events.unchanged, s.event_count());
    }
}
