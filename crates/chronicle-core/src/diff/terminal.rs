//! Colorized terminal rendering of a [`SummaryDiff`].
//!
//! Whether escapes are emitted follows `colored`'s global control, so
//! callers can force plain output with `colored::control::set_override`.

use crate::diff::model::{ChangeType, Op, StringDiff, SummaryDiff};
use colored::{ColoredString, Colorize};

pub fn render_terminal(diff: &SummaryDiff) -> String {
    let mut out = String::new();

    if !diff.characters.is_empty() {
        out.push_str(&format!("{}\n", "Characters".cyan()));
        for c in &diff.characters {
            out.push_str(&format!("  {} {}\n", tag(c.state), c.name));
            for f in &c.field_diffs {
                out.push_str(&format!("    {}: {}\n", f.path, render_string_diff(&f.diff)));
            }
            for s in &c.notable_del {
                out.push_str(&format!("    Notable: {}\n", s.red().strikethrough()));
            }
            for s in &c.notable_add {
                out.push_str(&format!("    Notable: {}\n", s.green().underline()));
            }
            for sd in &c.notable_edit {
                out.push_str(&format!("    Notable*: {}\n", render_string_diff(sd)));
            }
        }
    }

    if !diff.events.is_empty() {
        out.push_str(&format!("{}\n", "Events".cyan()));
        let mut current_date: Option<&str> = None;
        for e in &diff.events {
            if current_date != Some(e.date.as_str()) {
                current_date = Some(e.date.as_str());
                out.push_str(&format!("  {}\n", e.date.dimmed()));
            }
            out.push_str(&format!("    {} {}\n", tag(e.state), e.key));
            for f in &e.field_diffs {
                out.push_str(&format!("      {}: {}\n", f.path, render_string_diff(&f.diff)));
            }
        }
    }

    out
}

fn tag(state: ChangeType) -> ColoredString {
    match state {
        ChangeType::Added => "[+]".green(),
        ChangeType::Removed => "[-]".red(),
        ChangeType::Modified => "[~]".yellow(),
        ChangeType::Unchanged => "[=]".dimmed(),
    }
}

/// Inline rendering: inserts green and underlined, deletes red and struck.
pub fn render_string_diff(sd: &StringDiff) -> String {
    let mut out = String::new();
    for d in &sd.deltas {
        match d.op {
            Op::Equal => out.push_str(&d.text),
            Op::Insert => out.push_str(&d.text.green().underline().to_string()),
            Op::Delete => out.push_str(&d.text.red().strikethrough().to_string()),
        }
    }
    out
}
