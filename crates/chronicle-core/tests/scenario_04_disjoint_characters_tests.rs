//! Scenario: old and new snapshots share no character identities

use chronicle_core::diff::{diff_characters, ChangeType};
use chronicle_core::model::Character;
use proptest::prelude::*;

fn named(prefix: &str, n: usize) -> Vec<Character> {
    (0..n)
        .map(|i| Character::named(format!("{prefix}{i}")))
        .collect()
}

#[test]
fn test_disjoint_sets_are_all_added_or_removed() {
    let out = diff_characters(&named("old", 3), &named("new", 2));
    let removed = out.iter().filter(|c| c.state == ChangeType::Removed).count();
    let added = out.iter().filter(|c| c.state == ChangeType::Added).count();
    assert_eq!(removed, 3);
    assert_eq!(added, 2);
    assert_eq!(out.len(), 5);
}

#[test]
fn test_removed_names_keep_old_spelling() {
    let out = diff_characters(&[Character::named("Bob")], &[Character::named("Mara")]);
    let names: Vec<&str> = out.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Bob", "Mara"]);
}

proptest! {
    #[test]
    fn prop_disjoint_counts(m in 0usize..8, n in 0usize..8) {
        let out = diff_characters(&named("old", m), &named("new", n));
        let removed = out.iter().filter(|c| c.state == ChangeType::Removed).count();
        let added = out.iter().filter(|c| c.state == ChangeType::Added).count();
        let modified = out.iter().filter(|c| c.state == ChangeType::Modified).count();
        prop_assert_eq!(removed, m);
        prop_assert_eq!(added, n);
        prop_assert_eq!(modified, 0);
    }
}
