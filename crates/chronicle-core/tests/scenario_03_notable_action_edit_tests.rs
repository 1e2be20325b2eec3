//! Scenario: a notable action is reworded between snapshots
//!
//! Rewordings within the similarity threshold are edits; rewordings beyond
//! it degrade to a deletion plus an addition.

mod common;

use chronicle_core::diff::{diff_characters, fuzzy_list_diff, ChangeType};
use chronicle_core::similarity;
use common::{character, with_actions};

#[test]
fn test_similar_rewording_is_single_edit() {
    let old = vec![with_actions(character("Jane", "17"), &["Saved the dog"])];
    let new = vec![with_actions(character("Jane", "17"), &["Saved the old dog"])];
    assert!(similarity("Saved the dog", "Saved the old dog") >= 0.70);

    let out = diff_characters(&old, &new);

    assert_eq!(out[0].state, ChangeType::Modified);
    assert_eq!(out[0].notable_edit.len(), 1);
    assert!(out[0].notable_add.is_empty());
    assert!(out[0].notable_del.is_empty());
    assert_eq!(out[0].notable_edit[0].old, "Saved the dog");
    assert_eq!(out[0].notable_edit[0].new, "Saved the old dog");
}

#[test]
fn test_heavy_rewording_is_delete_and_add() {
    let old = vec!["Saved the dog".to_string()];
    let new = vec!["Saved the neighbor's dog bravely".to_string()];
    assert!(similarity(&old[0], &new[0]) < 0.70);

    let (adds, dels, edits) = fuzzy_list_diff(&old, &new);
    assert_eq!(adds, new);
    assert_eq!(dels, old);
    assert!(edits.is_empty());
}

#[test]
fn test_unchanged_actions_only_is_unchanged() {
    let jane = with_actions(character("Jane", "17"), &["Saved the dog", "Baked bread"]);
    let out = diff_characters(&[jane.clone()], &[jane]);
    assert_eq!(out[0].state, ChangeType::Unchanged);
}
