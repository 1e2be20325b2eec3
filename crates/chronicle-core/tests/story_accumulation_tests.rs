//! Story Accumulation Tests
//!
//! Drives the per-chunk pipeline: chunk the text, screen refused content,
//! parse raw model output, and fold batches into one summary.
//!
//! ## Scenarios Covered
//!
//! 1. Batches that re-describe known facts refine rather than duplicate them
//! 2. Refused chunks and their near-copies are skipped
//! 3. Unusable model output leaves the summary untouched
//! 4. The prompt context reflects the latest summary

mod common;

use chronicle_core::errors::ChronicleError;
use chronicle_core::screen::{ForbiddenEntry, ForbiddenScreen};
use chronicle_core::text::chunk_text;
use chronicle_core::{diff_summaries, StoryAccumulator};
use common::{character, day, event, summary};

const BATCH_1: &str = r#"<think>Jane is introduced.</think>
```json
{
  "characters": [
    {"name": "Jane", "age": "17", "notable_actions": ["Saved the dog"]},
    {"name": "jane", "role": "ignored duplicate"}
  ],
  "timeline": [
    {"date": "June 1", "events": [{"time": "7am", "description": "Woke up"}]}
  ]
}
```"#;

const BATCH_2: &str = r#"{
  "characters": [
    {"name": "JANE", "role": "Student", "aliases": ["Janie", "jane"],
     "notable_actions": ["Saved the old dog", "Climbed the lighthouse"]},
    {"name": "Bob", "age": "40"}
  ],
  "timeline": [
    {"date": "June 1", "events": [{"time": "7am", "description": "Woke up and showered"}]},
    {"date": "June 2", "events": [{"time": "", "description": "Bob sailed out"}]}
  ]
}"#;

#[test]
fn test_batches_refine_known_facts() {
    let mut acc = StoryAccumulator::new(summary(vec![], vec![]));
    acc.apply_raw(BATCH_1).unwrap();
    acc.apply_raw(BATCH_2).unwrap();

    let s = acc.summary();
    assert_eq!(acc.chunks_applied(), 2);
    assert_eq!(s.characters.len(), 2);

    let jane = &s.characters[0];
    assert_eq!(jane.name, "Jane");
    assert_eq!(jane.age, "17");
    assert_eq!(jane.role, "Student");
    assert_eq!(jane.aliases, vec!["Janie"]);
    assert_eq!(
        jane.notable_actions,
        vec!["Saved the old dog", "Climbed the lighthouse"]
    );

    assert_eq!(s.timeline.len(), 2);
    assert_eq!(s.timeline[0].events.len(), 1);
    assert_eq!(s.timeline[0].events[0].description, "Woke up and showered");
    assert_eq!(s.timeline[1].date, "June 2");
}

#[test]
fn test_refused_chunks_are_screened() {
    let refused = "Mara crept into the vault beneath the old chapel at midnight.";
    let text = format!(
        "{refused}\n\nJane spent the morning baking bread.\n\n{}",
        "Mara crept into the vault beneath the old chapel at midnite."
    );

    let mut screen = ForbiddenScreen::new();
    screen.insert("story:1 chunk:0", ForbiddenEntry::new("summarization forbidden", refused));

    let chunks = chunk_text(&text, 70);
    assert_eq!(chunks.len(), 3);

    let kept: Vec<&String> = chunks
        .iter()
        .enumerate()
        .filter(|(i, chunk)| !screen.screen(&format!("story:2 chunk:{i}"), chunk))
        .map(|(_, chunk)| chunk)
        .collect();

    assert_eq!(kept, vec!["Jane spent the morning baking bread."]);
    assert!(screen.contains("story:2 chunk:0"));
    assert!(screen.contains("story:2 chunk:2"));
}

#[test]
fn test_unusable_output_is_rejected_without_side_effects() {
    let seed = summary(vec![character("Jane", "17")], vec![]);
    let mut acc = StoryAccumulator::new(seed.clone());

    assert!(matches!(
        acc.apply_raw("Sorry, I can't help with that."),
        Err(ChronicleError::NoJson { .. })
    ));
    assert!(matches!(
        acc.apply_raw("{\"characters\": [}"),
        Err(ChronicleError::Json { .. })
    ));
    assert_eq!(
        acc.apply_raw("{\"characters\": []}").unwrap_err(),
        ChronicleError::EmptyExtraction
    );

    assert_eq!(acc.chunks_applied(), 0);
    assert!(diff_summaries(&seed, acc.summary()).is_unchanged());
}

#[test]
fn test_prompt_context_tracks_summary() {
    let mut acc = StoryAccumulator::new(summary(vec![], vec![]));
    assert_eq!(acc.prompt_context().unwrap(), "");

    acc.apply(&summary(
        vec![character("Jane", "17")],
        vec![day("June 1", vec![event("7am", "Woke up")])],
    ));
    let ctx = acc.prompt_context().unwrap();
    assert!(ctx.contains("only changing details if mentioned or explicitly stated:\n{"));
    assert!(ctx.contains("\"description\": \"Woke up\""));
}
