//! Snapshot diff output types.
//!
//! All types implement `Debug, Clone, Serialize, Deserialize, PartialEq`.
//! Lists are emitted in a deterministic order: characters by name, events
//! by date then identity key.

use serde::{Deserialize, Serialize};

/// How one entity changed between the two snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeType {
    Unchanged,
    Added,
    Removed,
    Modified,
}

/// Word-level edit operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Op {
    Equal,
    Insert,
    Delete,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordDelta {
    pub op: Op,
    pub text: String,
}

impl WordDelta {
    pub fn new(op: Op, text: impl Into<String>) -> Self {
        Self {
            op,
            text: text.into(),
        }
    }
}

/// Old and new text plus the deltas that turn one into the other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StringDiff {
    pub old: String,
    pub new: String,
    pub deltas: Vec<WordDelta>,
}

/// A changed field, addressed by a dotted path such as `PhysicalDescription.Hair`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDiff {
    pub path: String,
    pub diff: StringDiff,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterDiff {
    pub name: String,
    pub state: ChangeType,
    #[serde(default)]
    pub field_diffs: Vec<FieldDiff>,
    /// Notable actions only present in the new snapshot
    #[serde(default)]
    pub notable_add: Vec<String>,
    /// Notable actions only present in the old snapshot
    #[serde(default)]
    pub notable_del: Vec<String>,
    /// Notable actions that were reworded
    #[serde(default)]
    pub notable_edit: Vec<StringDiff>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventChange {
    pub date: String,
    /// Identity key of the event (`time|description` or `(blank)`)
    pub key: String,
    pub state: ChangeType,
    #[serde(default)]
    pub field_diffs: Vec<FieldDiff>,
}

/// The top-level structured diff between two summaries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryDiff {
    pub characters: Vec<CharacterDiff>,
    pub events: Vec<EventChange>,
}

/// Tally of entry states across a [`SummaryDiff`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeCounts {
    pub added: usize,
    pub removed: usize,
    pub modified: usize,
    pub unchanged: usize,
}

impl ChangeCounts {
    fn record(&mut self, state: ChangeType) {
        match state {
            ChangeType::Added => self.added += 1,
            ChangeType::Removed => self.removed += 1,
            ChangeType::Modified => self.modified += 1,
            ChangeType::Unchanged => self.unchanged += 1,
        }
    }

    /// Entries that are not Unchanged
    pub fn changed(&self) -> usize {
        self.added + self.removed + self.modified
    }
}

impl SummaryDiff {
    /// True when every character and event entry is Unchanged.
    pub fn is_unchanged(&self) -> bool {
        self.characters
            .iter()
            .all(|c| c.state == ChangeType::Unchanged)
            && self.events.iter().all(|e| e.state == ChangeType::Unchanged)
    }

    /// State tallies for characters and events, in that order.
    pub fn counts(&self) -> (ChangeCounts, ChangeCounts) {
        let mut characters = ChangeCounts::default();
        for c in &self.characters {
            characters.record(c.state);
        }
        let mut events = ChangeCounts::default();
        for e in &self.events {
            events.record(e.state);
        }
        (characters, events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_diff_is_unchanged() {
        let diff = SummaryDiff::default();
        assert!(diff.is_unchanged());
        let (c, e) = diff.counts();
        assert_eq!(c.changed() + e.changed(), 0);
    }

    #[test]
    fn test_counts_tally_states() {
        let entry = |state| EventChange {
            date: "June 1".into(),
            key: "(blank)".into(),
            state,
            field_diffs: vec![],
        };
        let diff = SummaryDiff {
            characters: vec![],
            events: vec![
                entry(ChangeType::Added),
                entry(ChangeType::Added),
                entry(ChangeType::Unchanged),
                entry(ChangeType::Removed),
            ],
        };
        let (_, events) = diff.counts();
        assert_eq!(events.added, 2);
        assert_eq!(events.removed, 1);
        assert_eq!(events.unchanged, 1);
        assert_eq!(events.changed(), 3);
        assert!(!diff.is_unchanged());
    }

    #[test]
    fn test_change_type_serializes_snake_case() {
        let json = serde_json::to_string(&ChangeType::Modified).unwrap();
        assert_eq!(json, "\"modified\"");
    }
}
