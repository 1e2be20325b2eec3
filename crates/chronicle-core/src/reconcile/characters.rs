//! Character entity resolution and field-level merge.

use super::text_len;
use crate::config::SIMILARITY_THRESHOLD;
use crate::model::{identity_key, Character, PhysicalDescription, SexualCharacteristics};
use crate::text::similarity;
use std::collections::{HashMap, HashSet};

/// Drop blank names and collapse duplicate identities, keeping the first.
///
/// Kept names are trimmed and their aliases tidied. Later duplicates are
/// discarded without contributing any fields.
pub fn dedupe_by_name(input: &[Character]) -> Vec<Character> {
    let mut seen: HashSet<String> = HashSet::with_capacity(input.len());
    let mut out = Vec::with_capacity(input.len());
    for ch in input {
        let name = ch.name.trim();
        if name.is_empty() || !seen.insert(name.to_lowercase()) {
            continue;
        }
        let mut kept = ch.clone();
        kept.name = name.to_string();
        kept.aliases = union_aliases(name, &ch.aliases, &[]);
        out.push(kept);
    }
    out
}

/// Merge `updates` into `base` using the default similarity threshold.
pub fn merge_characters(base: &[Character], updates: &[Character]) -> Vec<Character> {
    merge_characters_with(base, updates, SIMILARITY_THRESHOLD)
}

/// Merge `updates` into `base`.
///
/// Output keeps base order, then characters first introduced by `updates`
/// in the order they appear there. Blank-named base entries are dropped and
/// repeated base identities fold into their first occurrence.
pub fn merge_characters_with(
    base: &[Character],
    updates: &[Character],
    threshold: f64,
) -> Vec<Character> {
    let mut merged: Vec<Character> = Vec::with_capacity(base.len() + updates.len());
    let mut index: HashMap<String, usize> = HashMap::with_capacity(base.len());

    for ch in base {
        let key = ch.identity_key();
        if key.is_empty() {
            continue;
        }
        match index.get(&key) {
            Some(&i) => merged[i] = merge_one(&merged[i], ch, threshold),
            None => {
                let mut kept = ch.clone();
                kept.aliases = union_aliases(&ch.name, &ch.aliases, &[]);
                index.insert(key, merged.len());
                merged.push(kept);
            }
        }
    }

    let cleaned = dedupe_by_name(updates);
    let mut introduced = 0usize;
    for up in cleaned {
        let key = up.identity_key();
        match index.get(&key) {
            Some(&i) => merged[i] = merge_one(&merged[i], &up, threshold),
            None => {
                index.insert(key, merged.len());
                merged.push(up);
                introduced += 1;
            }
        }
    }

    tracing::debug!(
        base_len = base.len(),
        updates_len = updates.len(),
        introduced,
        merged_len = merged.len(),
        "merged characters"
    );
    merged
}

/// Fold one update into a copy of its matching base character.
fn merge_one(base: &Character, update: &Character, threshold: f64) -> Character {
    Character {
        name: base.name.clone(),
        aliases: union_aliases(&base.name, &base.aliases, &update.aliases),
        kind: prefer(&update.kind, &base.kind),
        role: prefer(&update.role, &base.role),
        age: prefer(&update.age, &base.age),
        gender: prefer(&update.gender, &base.gender),
        species: prefer(&update.species, &base.species),
        personality: prefer(&update.personality, &base.personality),
        physical_description: PhysicalDescription {
            height: prefer(
                &update.physical_description.height,
                &base.physical_description.height,
            ),
            build: prefer(
                &update.physical_description.build,
                &base.physical_description.build,
            ),
            hair: prefer(
                &update.physical_description.hair,
                &base.physical_description.hair,
            ),
            other: prefer(
                &update.physical_description.other,
                &base.physical_description.other,
            ),
        },
        sexual_characteristics: merge_sexual(
            &base.sexual_characteristics,
            &update.sexual_characteristics,
        ),
        notable_actions: if update.notable_actions.is_empty() {
            base.notable_actions.clone()
        } else {
            merge_actions(&base.notable_actions, &update.notable_actions, threshold)
        },
    }
}

fn merge_sexual(base: &SexualCharacteristics, update: &SexualCharacteristics) -> SexualCharacteristics {
    SexualCharacteristics {
        genitalia: prefer(&update.genitalia, &base.genitalia),
        penis_length_flaccid: prefer_opt(&update.penis_length_flaccid, &base.penis_length_flaccid),
        penis_length_erect: prefer_opt(&update.penis_length_erect, &base.penis_length_erect),
        pubic_hair: prefer(&update.pubic_hair, &base.pubic_hair),
        other: prefer(&update.other, &base.other),
    }
}

/// The update's value unless it is blank.
fn prefer(update: &str, base: &str) -> String {
    if update.trim().is_empty() {
        base.to_string()
    } else {
        update.to_string()
    }
}

fn prefer_opt(update: &Option<String>, base: &Option<String>) -> Option<String> {
    match update {
        Some(v) if !v.trim().is_empty() => Some(v.clone()),
        _ => base.clone(),
    }
}

/// Case-insensitive alias union that never contains the canonical name.
fn union_aliases(name: &str, base: &[String], update: &[String]) -> Vec<String> {
    let name_key = identity_key(name);
    let mut seen: HashSet<String> = HashSet::new();
    let mut out = Vec::with_capacity(base.len() + update.len());
    for alias in base.iter().chain(update) {
        let alias = alias.trim();
        if alias.is_empty() {
            continue;
        }
        let key = alias.to_lowercase();
        if key == name_key || !seen.insert(key) {
            continue;
        }
        out.push(alias.to_string());
    }
    out
}

/// Fuzzy union of notable actions.
///
/// Each update action replaces the first retained action it resembles when
/// it is strictly longer, and is appended when it resembles none.
fn merge_actions(base: &[String], update: &[String], threshold: f64) -> Vec<String> {
    let mut out: Vec<String> = base
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    for action in update {
        let action = action.trim();
        if action.is_empty() {
            continue;
        }
        match out
            .iter_mut()
            .find(|existing| similarity(existing, action) >= threshold)
        {
            Some(existing) => {
                if text_len(action) > text_len(existing) {
                    *existing = action.to_string();
                }
            }
            None => out.push(action.to_string()),
        }
    }
    out
}
