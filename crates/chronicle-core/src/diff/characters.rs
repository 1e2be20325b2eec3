//! Character-level snapshot diff.

use crate::config::SIMILARITY_THRESHOLD;
use crate::diff::model::{ChangeType, CharacterDiff, FieldDiff, StringDiff};
use crate::diff::words::{insert_only, word_diff};
use crate::model::Character;
use crate::text::similarity;
use std::collections::BTreeMap;

/// Fixed field paths in report order, paired with their values.
///
/// Optional lengths read as `""` when absent.
fn field_values(c: &Character) -> [(&'static str, &str); 13] {
    let pd = &c.physical_description;
    let sc = &c.sexual_characteristics;
    [
        ("Age", c.age.as_str()),
        ("Gender", c.gender.as_str()),
        ("Role", c.role.as_str()),
        ("Personality", c.personality.as_str()),
        ("PhysicalDescription.Height", pd.height.as_str()),
        ("PhysicalDescription.Build", pd.build.as_str()),
        ("PhysicalDescription.Hair", pd.hair.as_str()),
        ("PhysicalDescription.Other", pd.other.as_str()),
        ("SexualCharacteristics.Genitalia", sc.genitalia.as_str()),
        ("SexualCharacteristics.PubicHair", sc.pubic_hair.as_str()),
        ("SexualCharacteristics.Other", sc.other.as_str()),
        (
            "SexualCharacteristics.PenisLengthFlaccid",
            sc.penis_length_flaccid.as_deref().unwrap_or(""),
        ),
        (
            "SexualCharacteristics.PenisLengthErect",
            sc.penis_length_erect.as_deref().unwrap_or(""),
        ),
    ]
}

/// Diff two character lists with the default similarity threshold.
pub fn diff_characters(old: &[Character], new: &[Character]) -> Vec<CharacterDiff> {
    diff_characters_with(old, new, SIMILARITY_THRESHOLD)
}

/// Full outer join of `old` and `new` on identity key, sorted by name.
///
/// When a list repeats an identity the last entry is the one compared.
pub fn diff_characters_with(
    old: &[Character],
    new: &[Character],
    threshold: f64,
) -> Vec<CharacterDiff> {
    let mut joined: BTreeMap<String, (Option<&Character>, Option<&Character>)> = BTreeMap::new();
    for c in old {
        joined.entry(c.identity_key()).or_default().0 = Some(c);
    }
    for c in new {
        joined.entry(c.identity_key()).or_default().1 = Some(c);
    }

    let mut out: Vec<CharacterDiff> = joined
        .into_values()
        .filter_map(|pair| match pair {
            (Some(o), None) => Some(removed(o)),
            (None, Some(n)) => Some(added(n)),
            (Some(o), Some(n)) => Some(compared(o, n, threshold)),
            (None, None) => None,
        })
        .collect();
    out.sort_by(|a, b| a.name.cmp(&b.name));
    out
}

fn removed(o: &Character) -> CharacterDiff {
    CharacterDiff {
        name: o.name.clone(),
        state: ChangeType::Removed,
        field_diffs: Vec::new(),
        notable_add: Vec::new(),
        notable_del: Vec::new(),
        notable_edit: Vec::new(),
    }
}

fn added(n: &Character) -> CharacterDiff {
    CharacterDiff {
        name: n.name.clone(),
        state: ChangeType::Added,
        field_diffs: field_values(n)
            .into_iter()
            .map(|(path, value)| FieldDiff {
                path: path.to_string(),
                diff: insert_only(value),
            })
            .collect(),
        notable_add: n.notable_actions.clone(),
        notable_del: Vec::new(),
        notable_edit: Vec::new(),
    }
}

fn compared(o: &Character, n: &Character, threshold: f64) -> CharacterDiff {
    let field_diffs: Vec<FieldDiff> = field_values(o)
        .into_iter()
        .zip(field_values(n))
        .filter(|((_, a), (_, b))| a != b)
        .map(|((path, a), (_, b))| FieldDiff {
            path: path.to_string(),
            diff: word_diff(a, b),
        })
        .collect();
    let (adds, dels, edits) =
        fuzzy_list_diff_with(&o.notable_actions, &n.notable_actions, threshold);

    let state = if field_diffs.is_empty() && adds.is_empty() && dels.is_empty() && edits.is_empty()
    {
        ChangeType::Unchanged
    } else {
        ChangeType::Modified
    };

    CharacterDiff {
        name: n.name.clone(),
        state,
        field_diffs,
        notable_add: adds,
        notable_del: dels,
        notable_edit: edits,
    }
}

/// Fuzzy list diff with the default similarity threshold.
pub fn fuzzy_list_diff(
    old: &[String],
    new: &[String],
) -> (Vec<String>, Vec<String>, Vec<StringDiff>) {
    fuzzy_list_diff_with(old, new, SIMILARITY_THRESHOLD)
}

/// Pair each old item with its most similar unused new item.
///
/// Returns `(additions, deletions, edits)`. The first candidate wins a tie.
/// A pairing below `threshold` leaves the old item as a deletion; literal
/// equals pair silently and reworded items become edits. New items never
/// paired are additions, in their original order.
pub fn fuzzy_list_diff_with(
    old: &[String],
    new: &[String],
    threshold: f64,
) -> (Vec<String>, Vec<String>, Vec<StringDiff>) {
    let mut used = vec![false; new.len()];
    let mut dels = Vec::new();
    let mut edits = Vec::new();

    for item in old {
        let mut best: Option<(usize, f64)> = None;
        for (j, candidate) in new.iter().enumerate() {
            if used[j] {
                continue;
            }
            let score = similarity(item, candidate);
            if score > best.map_or(0.0, |(_, s)| s) {
                best = Some((j, score));
            }
        }
        match best {
            Some((j, score)) if score >= threshold => {
                if *item != new[j] {
                    edits.push(word_diff(item, &new[j]));
                }
                used[j] = true;
            }
            _ => dels.push(item.clone()),
        }
    }

    let adds = new
        .iter()
        .zip(&used)
        .filter(|(_, used)| !**used)
        .map(|(item, _)| item.clone())
        .collect();
    (adds, dels, edits)
}
