//! Name rosters: the lightweight name + alias lists gathered before a full
//! summary exists, and a local detector used when no model output is usable.

use crate::model::identity_key;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

/// Up to three capitalized words in a row.
const NAME_PHRASE: &str = r"\b[[:upper:]][[:lower:]]+(?:\s+[[:upper:]][[:lower:]]+){0,2}\b";

/// Capitalized words that start sentences far more often than they name anyone.
const STOP_WORDS: [&str; 2] = ["the", "and"];

/// A phrase must appear this often before it counts as a name.
const MIN_OCCURRENCES: usize = 2;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameEntry {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
}

impl NameEntry {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            aliases: Vec::new(),
        }
    }
}

/// Roster file layout. Shares the `characters` key with a summary, so a
/// roster can seed ingestion directly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameRoster {
    #[serde(default)]
    pub characters: Vec<NameEntry>,
}

/// Merge `updates` into `base` by identity key.
///
/// A known name gains the update's trimmed aliases that it does not already
/// carry verbatim; an alias equal to the name (ignoring case) is dropped. An
/// unknown name is appended trimmed, with its aliases tidied the same way.
/// Blank update names are skipped. Existing entries are otherwise untouched.
pub fn merge_name_roster(base: &[NameEntry], updates: &[NameEntry]) -> Vec<NameEntry> {
    let mut out = base.to_vec();
    let mut index: HashMap<String, usize> = HashMap::with_capacity(out.len());
    for (i, entry) in out.iter().enumerate() {
        let key = identity_key(&entry.name);
        if !key.is_empty() {
            index.insert(key, i);
        }
    }

    for up in updates {
        let name = up.name.trim();
        if name.is_empty() {
            continue;
        }
        let key = identity_key(name);
        match index.get(&key) {
            Some(&i) => {
                let entry = &mut out[i];
                let mut seen: HashSet<String> = entry
                    .aliases
                    .iter()
                    .map(|a| a.trim())
                    .filter(|a| !a.is_empty())
                    .map(str::to_string)
                    .collect();
                for alias in fresh_aliases(name, &up.aliases, &mut seen) {
                    entry.aliases.push(alias);
                }
            }
            None => {
                let mut seen = HashSet::new();
                out.push(NameEntry {
                    name: name.to_string(),
                    aliases: fresh_aliases(name, &up.aliases, &mut seen),
                });
                index.insert(key, out.len() - 1);
            }
        }
    }

    tracing::debug!(
        base_len = base.len(),
        updates_len = updates.len(),
        roster_len = out.len(),
        "merged name roster"
    );
    out
}

fn fresh_aliases(name: &str, aliases: &[String], seen: &mut HashSet<String>) -> Vec<String> {
    let mut out = Vec::new();
    for alias in aliases {
        let alias = alias.trim();
        if alias.is_empty() || alias.to_lowercase() == name.to_lowercase() {
            continue;
        }
        if seen.insert(alias.to_string()) {
            out.push(alias.to_string());
        }
    }
    out
}

fn name_phrase() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(NAME_PHRASE).ok()).as_ref()
}

/// Guess character names from raw story text.
///
/// Counts capitalized phrases of one to three words and keeps those seen at
/// least twice, most frequent first. Ties keep first-appearance order.
pub fn detect_names(text: &str) -> Vec<NameEntry> {
    let Some(re) = name_phrase() else {
        return Vec::new();
    };

    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for m in re.find_iter(text) {
        let phrase = m.as_str();
        if phrase.chars().count() < 3 || STOP_WORDS.contains(&phrase.to_lowercase().as_str()) {
            continue;
        }
        let count = counts.entry(phrase).or_insert(0);
        if *count == 0 {
            order.push(phrase);
        }
        *count += 1;
    }

    let mut found: Vec<(&str, usize)> = order
        .into_iter()
        .map(|p| (p, counts.get(p).copied().unwrap_or(0)))
        .filter(|&(_, n)| n >= MIN_OCCURRENCES)
        .collect();
    found.sort_by(|a, b| b.1.cmp(&a.1));

    tracing::debug!(
        text_len = text.len(),
        names_len = found.len(),
        "heuristic name detection"
    );
    found.into_iter().map(|(p, _)| NameEntry::new(p)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, aliases: &[&str]) -> NameEntry {
        NameEntry {
            name: name.to_string(),
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
        }
    }

    #[test]
    fn test_known_name_gains_new_trimmed_aliases() {
        let base = vec![entry("Jane", &["Janie"])];
        let out = merge_name_roster(&base, &[entry(" jane ", &[" J ", "Janie", "JANE", ""])]);
        assert_eq!(out, vec![entry("Jane", &["Janie", "J"])]);
    }

    #[test]
    fn test_alias_match_is_case_sensitive() {
        let base = vec![entry("Jane", &["Janie"])];
        let out = merge_name_roster(&base, &[entry("Jane", &["janie"])]);
        assert_eq!(out[0].aliases, vec!["Janie", "janie"]);
    }

    #[test]
    fn test_unknown_name_is_appended_trimmed() {
        let out = merge_name_roster(
            &[entry("Jane", &[])],
            &[entry("  Kai ", &["kai", "K", "K"]), entry("   ", &["ghost"])],
        );
        assert_eq!(out, vec![entry("Jane", &[]), entry("Kai", &["K"])]);
    }

    #[test]
    fn test_repeated_update_names_fold_together() {
        let out = merge_name_roster(&[], &[entry("Kai", &["K"]), entry("KAI", &["Kazu"])]);
        assert_eq!(out, vec![entry("Kai", &["K", "Kazu"])]);
    }

    #[test]
    fn test_base_entries_are_kept_as_given() {
        let base = vec![entry(" Jane ", &[" Janie "])];
        let out = merge_name_roster(&base, &[]);
        assert_eq!(out, base);
    }

    #[test]
    fn test_detects_repeated_capitalized_phrases() {
        let text = "Tom met Mary Jane. Tom waved. Mary Jane laughed, and Tom left. Once Paris.";
        let names: Vec<String> = detect_names(text).into_iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["Tom", "Mary Jane"]);
    }

    #[test]
    fn test_skips_sentence_start_stop_words() {
        let text = "The cat sat. The dog ran. And then. And again. Bo Bo.";
        assert!(detect_names(text).is_empty());
    }

    #[test]
    fn test_ties_keep_first_appearance_order() {
        let text = "Kai saw Zed. Zed saw Kai.";
        let names: Vec<String> = detect_names(text).into_iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["Kai", "Zed"]);
    }

    #[test]
    fn test_roster_decodes_as_summary_seed() {
        let roster = NameRoster {
            characters: vec![entry("Jane", &["Janie"])],
        };
        let json = serde_json::to_string(&roster).unwrap();
        let summary: crate::model::Summary = serde_json::from_str(&json).unwrap();
        assert_eq!(summary.characters[0].name, "Jane");
        assert_eq!(summary.characters[0].aliases, vec!["Janie"]);
    }
}
