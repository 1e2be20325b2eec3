//! Event-level snapshot diff.

use crate::config::SIMILARITY_THRESHOLD;
use crate::diff::model::{ChangeType, EventChange, FieldDiff};
use crate::diff::words::{insert_only, word_diff};
use crate::model::{Event, Timeline};
use crate::text::similarity;
use std::collections::BTreeMap;

/// Diff two timelines with the default similarity threshold.
pub fn diff_timelines(old: &[Timeline], new: &[Timeline]) -> Vec<EventChange> {
    diff_timelines_with(old, new, SIMILARITY_THRESHOLD)
}

/// Outer join of `old` and `new` by date, sorted by (date, key).
///
/// Within a date events pair by identical identity key first, then by best
/// description-or-time similarity. Timelines repeating a date on one side
/// contribute all of their events to that date.
pub fn diff_timelines_with(old: &[Timeline], new: &[Timeline], threshold: f64) -> Vec<EventChange> {
    let mut joined: BTreeMap<&str, (Vec<&Event>, Vec<&Event>)> = BTreeMap::new();
    for t in old {
        joined.entry(t.date.as_str()).or_default().0.extend(&t.events);
    }
    for t in new {
        joined.entry(t.date.as_str()).or_default().1.extend(&t.events);
    }

    let mut out = Vec::new();
    for (date, (old_events, new_events)) in joined {
        diff_date(date, &old_events, &new_events, threshold, &mut out);
    }
    out.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.key.cmp(&b.key)));
    out
}

fn diff_date(
    date: &str,
    old: &[&Event],
    new: &[&Event],
    threshold: f64,
    out: &mut Vec<EventChange>,
) {
    let mut old_used = vec![false; old.len()];
    let mut new_used = vec![false; new.len()];

    // Exact identity first
    for (i, o) in old.iter().enumerate() {
        let key = o.identity_key();
        let Some(j) = (0..new.len()).find(|&j| !new_used[j] && new[j].identity_key() == key)
        else {
            continue;
        };
        let field_diffs = event_field_diffs(o, new[j]);
        let state = if field_diffs.is_empty() {
            ChangeType::Unchanged
        } else {
            ChangeType::Modified
        };
        out.push(EventChange {
            date: date.to_string(),
            key,
            state,
            field_diffs,
        });
        old_used[i] = true;
        new_used[j] = true;
    }

    // Then the most similar unused event on the new side
    for (i, o) in old.iter().enumerate() {
        if old_used[i] {
            continue;
        }
        let mut best: Option<(usize, f64)> = None;
        for (j, n) in new.iter().enumerate() {
            if new_used[j] {
                continue;
            }
            let score = similarity(&o.description, &n.description)
                .max(similarity(&o.time, &n.time));
            if score > best.map_or(0.0, |(_, s)| s) {
                best = Some((j, score));
            }
        }
        if let Some((j, score)) = best {
            if score >= threshold {
                out.push(EventChange {
                    date: date.to_string(),
                    key: new[j].identity_key(),
                    state: ChangeType::Modified,
                    field_diffs: event_field_diffs(o, new[j]),
                });
                old_used[i] = true;
                new_used[j] = true;
            }
        }
    }

    for (o, _) in old.iter().zip(&old_used).filter(|(_, used)| !**used) {
        out.push(EventChange {
            date: date.to_string(),
            key: o.identity_key(),
            state: ChangeType::Removed,
            field_diffs: Vec::new(),
        });
    }
    for (n, _) in new.iter().zip(&new_used).filter(|(_, used)| !**used) {
        out.push(EventChange {
            date: date.to_string(),
            key: n.identity_key(),
            state: ChangeType::Added,
            field_diffs: vec![
                FieldDiff {
                    path: "Time".to_string(),
                    diff: insert_only(&n.time),
                },
                FieldDiff {
                    path: "Description".to_string(),
                    diff: insert_only(&n.description),
                },
            ],
        });
    }
}

/// Word diffs for the literally differing fields of a paired event.
fn event_field_diffs(a: &Event, b: &Event) -> Vec<FieldDiff> {
    let mut out = Vec::new();
    if a.time != b.time {
        out.push(FieldDiff {
            path: "Time".to_string(),
            diff: word_diff(&a.time, &b.time),
        });
    }
    if a.description != b.description {
        out.push(FieldDiff {
            path: "Description".to_string(),
            diff: word_diff(&a.description, &b.description),
        });
    }
    out
}
