//! Reconciliation of partial extraction batches into an accumulated summary.
//!
//! Both reconcilers borrow their inputs and return freshly built lists, so a
//! caller-owned base is never mutated or aliased by the result.

pub mod characters;
pub mod names;
pub mod timeline;

pub use characters::{dedupe_by_name, merge_characters, merge_characters_with};
pub use names::{detect_names, merge_name_roster, NameEntry, NameRoster};
pub use timeline::{merge_timelines, merge_timelines_with};

use crate::config::Thresholds;
use crate::model::{Character, Summary, Timeline};

/// Character count used by the "longer text wins" rules.
pub(crate) fn text_len(s: &str) -> usize {
    s.chars().count()
}

/// Reconcilers bound to a configured similarity threshold.
#[derive(Debug, Clone, Copy, Default)]
pub struct Reconciler {
    thresholds: Thresholds,
}

impl Reconciler {
    pub fn new(thresholds: Thresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    pub fn merge_characters(&self, base: &[Character], updates: &[Character]) -> Vec<Character> {
        merge_characters_with(base, updates, self.thresholds.similarity)
    }

    pub fn merge_timelines(&self, base: &[Timeline], updates: &[Timeline]) -> Vec<Timeline> {
        merge_timelines_with(base, updates, self.thresholds.similarity)
    }

    /// Fold one extraction batch into `base`.
    pub fn merge_summary(&self, base: &Summary, batch: &Summary) -> Summary {
        Summary {
            characters: self.merge_characters(&base.characters, &batch.characters),
            timeline: self.merge_timelines(&base.timeline, &batch.timeline),
        }
    }
}
