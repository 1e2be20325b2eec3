//! Summary diff entry point.
//!
//! [`diff_summaries`] combines the character and timeline differs and logs
//! one start/end pair per call.

use crate::config::Thresholds;
use crate::diff::characters::diff_characters_with;
use crate::diff::model::SummaryDiff;
use crate::diff::timeline::diff_timelines_with;
use crate::model::Summary;
use crate::{log_op_end, log_op_start};

/// Differ bound to a configured similarity threshold.
#[derive(Debug, Clone, Copy, Default)]
pub struct SnapshotDiffer {
    thresholds: Thresholds,
}

impl SnapshotDiffer {
    pub fn new(thresholds: Thresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    /// Diff two full snapshots.
    pub fn diff(&self, old: &Summary, new: &Summary) -> SummaryDiff {
        log_op_start!(
            "diff_summaries",
            old_characters = old.characters.len(),
            new_characters = new.characters.len()
        );
        let start = std::time::Instant::now();

        let threshold = self.thresholds.similarity;
        let diff = SummaryDiff {
            characters: diff_characters_with(&old.characters, &new.characters, threshold),
            events: diff_timelines_with(&old.timeline, &new.timeline, threshold),
        };

        let (characters, events) = diff.counts();
        log_op_end!(
            "diff_summaries",
            duration_ms = start.elapsed().as_millis() as u64,
            characters_changed = characters.changed(),
            events_changed = events.changed()
        );
        diff
    }
}

/// Diff two full snapshots with the default thresholds.
pub fn diff_summaries(old: &Summary, new: &Summary) -> SummaryDiff {
    SnapshotDiffer::default().diff(old, new)
}
