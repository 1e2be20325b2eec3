//! Dated event merge.

use super::text_len;
use crate::config::SIMILARITY_THRESHOLD;
use crate::model::{Event, Timeline};
use crate::text::similarity;
use std::collections::BTreeMap;

/// Merge `updates` into `base` using the default similarity threshold.
pub fn merge_timelines(base: &[Timeline], updates: &[Timeline]) -> Vec<Timeline> {
    merge_timelines_with(base, updates, SIMILARITY_THRESHOLD)
}

/// Merge `updates` into `base`, returning timelines ordered by date.
///
/// Dates are opaque and compared byte-wise. Base timelines sharing a date
/// are concatenated into one bucket. An update event folds into the first
/// event in its bucket whose description or time resembles its own,
/// including events appended earlier from the same batch.
pub fn merge_timelines_with(
    base: &[Timeline],
    updates: &[Timeline],
    threshold: f64,
) -> Vec<Timeline> {
    let mut buckets: BTreeMap<String, Vec<Event>> = BTreeMap::new();
    for t in base {
        buckets
            .entry(t.date.clone())
            .or_default()
            .extend(t.events.iter().cloned());
    }

    let mut matched = 0usize;
    let mut appended = 0usize;
    for up in updates {
        let bucket = buckets.entry(up.date.clone()).or_default();
        for ev in &up.events {
            if fold_event(bucket, ev, threshold) {
                matched += 1;
            } else {
                bucket.push(ev.clone());
                appended += 1;
            }
        }
    }

    tracing::debug!(
        dates = buckets.len(),
        matched,
        appended,
        "merged timelines"
    );

    buckets
        .into_iter()
        .map(|(date, events)| Timeline { date, events })
        .collect()
}

/// Fold `ev` into the first similar event of `bucket`; false when none matches.
fn fold_event(bucket: &mut [Event], ev: &Event, threshold: f64) -> bool {
    let Some(existing) = bucket.iter_mut().find(|e| {
        similarity(&e.description, &ev.description) >= threshold
            || similarity(&e.time, &ev.time) >= threshold
    }) else {
        return false;
    };

    if text_len(&ev.description) > text_len(&existing.description) {
        existing.description = ev.description.clone();
    }
    if existing.time.trim().is_empty() && !ev.time.trim().is_empty() {
        existing.time = ev.time.clone();
    }
    true
}
