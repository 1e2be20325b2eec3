//! Word-level string diff.

use crate::diff::model::{Op, StringDiff, WordDelta};
use crate::text::tokenize;

/// Diff `old` against `new` at word granularity.
///
/// Identical inputs yield a single Equal delta. Otherwise the token streams
/// are aligned by longest common subsequence, deleting before inserting when
/// both are equally good, and adjacent same-op deltas are coalesced.
pub fn word_diff(old: &str, new: &str) -> StringDiff {
    if old == new {
        return StringDiff {
            old: old.to_string(),
            new: new.to_string(),
            deltas: vec![WordDelta::new(Op::Equal, old)],
        };
    }
    let a = tokenize(old);
    let b = tokenize(new);
    StringDiff {
        old: old.to_string(),
        new: new.to_string(),
        deltas: coalesce(align(&a, &b)),
    }
}

/// The diff shown for a value that did not exist before.
pub fn insert_only(new: &str) -> StringDiff {
    StringDiff {
        old: String::new(),
        new: new.to_string(),
        deltas: vec![WordDelta::new(Op::Insert, new)],
    }
}

fn align<'a>(a: &[&'a str], b: &[&'a str]) -> Vec<(Op, &'a str)> {
    let prefix = a.iter().zip(b).take_while(|(x, y)| x == y).count();
    let suffix = a[prefix..]
        .iter()
        .rev()
        .zip(b[prefix..].iter().rev())
        .take_while(|(x, y)| x == y)
        .count();
    let a_mid = &a[prefix..a.len() - suffix];
    let b_mid = &b[prefix..b.len() - suffix];
    let (n, m) = (a_mid.len(), b_mid.len());

    // lcs[i][j] is the LCS length of a_mid[i..] and b_mid[j..]
    let mut lcs = vec![vec![0usize; m + 1]; n + 1];
    for i in (0..n).rev() {
        for j in (0..m).rev() {
            lcs[i][j] = if a_mid[i] == b_mid[j] {
                lcs[i + 1][j + 1] + 1
            } else {
                lcs[i + 1][j].max(lcs[i][j + 1])
            };
        }
    }

    let mut out: Vec<(Op, &'a str)> = Vec::with_capacity(a.len() + b.len());
    out.extend(a[..prefix].iter().map(|t| (Op::Equal, *t)));

    let (mut i, mut j) = (0, 0);
    while i < n && j < m {
        if a_mid[i] == b_mid[j] {
            out.push((Op::Equal, a_mid[i]));
            i += 1;
            j += 1;
        } else if lcs[i + 1][j] >= lcs[i][j + 1] {
            out.push((Op::Delete, a_mid[i]));
            i += 1;
        } else {
            out.push((Op::Insert, b_mid[j]));
            j += 1;
        }
    }
    out.extend(a_mid[i..].iter().map(|t| (Op::Delete, *t)));
    out.extend(b_mid[j..].iter().map(|t| (Op::Insert, *t)));
    out.extend(a[a.len() - suffix..].iter().map(|t| (Op::Equal, *t)));
    out
}

/// Merge runs of the same op. Whitespace-only Equal tokens join whatever
/// run is being accumulated.
fn coalesce(raw: Vec<(Op, &str)>) -> Vec<WordDelta> {
    let mut out = Vec::with_capacity(raw.len());
    let mut current: Option<Op> = None;
    let mut buf = String::new();

    for (op, text) in raw {
        if op == Op::Equal && text.trim().is_empty() {
            buf.push_str(text);
            continue;
        }
        if let Some(cur) = current {
            if cur != op && !buf.is_empty() {
                out.push(WordDelta::new(cur, std::mem::take(&mut buf)));
            }
        }
        current = Some(op);
        buf.push_str(text);
    }
    if !buf.is_empty() {
        out.push(WordDelta::new(current.unwrap_or(Op::Equal), buf));
    }
    out
}
