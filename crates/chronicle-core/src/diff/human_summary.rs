//! Human-readable summary renderer for summary diffs.

use crate::diff::model::{ChangeCounts, ChangeType, CharacterDiff, EventChange, SummaryDiff};

/// Render a Markdown review summary of a [`SummaryDiff`].
///
/// Unchanged entries are counted but not listed.
pub fn render_human_summary(diff: &SummaryDiff) -> String {
    let mut out = String::new();

    // Header
    out.push_str("## Summary Diff\n\n");

    // Counts
    let (characters, events) = diff.counts();
    out.push_str(
        "| | Added | Removed | Modified | Unchanged |\n\
         |---|---|---|---|---|\n",
    );
    out.push_str(&count_row("Characters", &characters));
    out.push_str(&count_row("Events", &events));
    out.push('\n');

    if diff.is_unchanged() {
        out.push_str("_No changes detected._\n");
        return out;
    }

    // Characters
    if characters.changed() > 0 {
        out.push_str("### Characters\n\n");
        for c in diff
            .characters
            .iter()
            .filter(|c| c.state != ChangeType::Unchanged)
        {
            push_character(&mut out, c);
        }
        out.push('\n');
    }

    // Events
    if events.changed() > 0 {
        out.push_str("### Events\n\n");
        let mut current_date: Option<&str> = None;
        for e in diff
            .events
            .iter()
            .filter(|e| e.state != ChangeType::Unchanged)
        {
            if current_date != Some(e.date.as_str()) {
                current_date = Some(e.date.as_str());
                out.push_str(&format!("- **{}**\n", display_date(&e.date)));
            }
            push_event(&mut out, e);
        }
        out.push('\n');
    }

    out
}

fn count_row(label: &str, c: &ChangeCounts) -> String {
    format!(
        "| {} | {} | {} | {} | {} |\n",
        label, c.added, c.removed, c.modified, c.unchanged
    )
}

fn state_label(state: ChangeType) -> &'static str {
    match state {
        ChangeType::Added => "Added",
        ChangeType::Removed => "Removed",
        ChangeType::Modified => "Modified",
        ChangeType::Unchanged => "Unchanged",
    }
}

fn push_character(out: &mut String, c: &CharacterDiff) {
    out.push_str(&format!("- **{}** `{}`\n", state_label(c.state), c.name));
    for f in &c.field_diffs {
        match c.state {
            // Added characters carry every path; show only the populated ones
            ChangeType::Added if f.diff.new.is_empty() => {}
            ChangeType::Added => {
                out.push_str(&format!("  - {}: `{}`\n", f.path, f.diff.new));
            }
            _ => out.push_str(&format!(
                "  - {}: `{}` → `{}`\n",
                f.path, f.diff.old, f.diff.new
            )),
        }
    }
    for s in &c.notable_del {
        out.push_str(&format!("  - Notable removed: {}\n", s));
    }
    for s in &c.notable_add {
        out.push_str(&format!("  - Notable added: {}\n", s));
    }
    for sd in &c.notable_edit {
        out.push_str(&format!("  - Notable edited: {} → {}\n", sd.old, sd.new));
    }
}

fn push_event(out: &mut String, e: &EventChange) {
    out.push_str(&format!("  - **{}** `{}`\n", state_label(e.state), e.key));
    if e.state == ChangeType::Modified {
        for f in &e.field_diffs {
            out.push_str(&format!(
                "    - {}: `{}` → `{}`\n",
                f.path, f.diff.old, f.diff.new
            ));
        }
    }
}

fn display_date(date: &str) -> &str {
    if date.trim().is_empty() {
        "(undated)"
    } else {
        date
    }
}
