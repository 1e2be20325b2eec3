//! Chronicle Core - reconciliation and diffing of extracted story summaries
//!
//! A story is summarized one chunk at a time; each chunk yields a partial,
//! noisy snapshot of the same characters and events. This crate provides:
//! - The summary data model and its JSON shape
//! - Normalized edit-distance similarity and a lossless word tokenizer
//! - Character and timeline reconcilers that fold batches into one summary
//! - Name rosters with alias union and a heuristic name detector
//! - A snapshot differ with word-level field diffs, plus renderers
//! - Pre/post-processing around extraction: chunking, output cleanup,
//!   refused-content screening and per-story accumulation
//!
//! The engine is synchronous and total; only extraction parsing and
//! configuration loading can fail.

pub mod accumulator;
pub mod config;
pub mod diff;
pub mod errors;
pub mod extract;
pub mod logging_facility;
pub mod model;
pub mod reconcile;
pub mod screen;
pub mod text;

// Used by the logging macros
pub use chronicle_core_types;

// Re-export commonly used types
pub use accumulator::StoryAccumulator;
pub use config::{ChronicleConfig, Thresholds, FORBID_THRESHOLD, SIMILARITY_THRESHOLD};
pub use diff::{diff_summaries, SnapshotDiffer, SummaryDiff};
pub use errors::{ChronicleError, ExError, ExErrorKind, Result};
pub use extract::parse_extraction;
pub use model::{Character, Event, Summary, Timeline};
pub use reconcile::{
    dedupe_by_name, detect_names, merge_characters, merge_name_roster, merge_timelines, NameEntry,
    NameRoster, Reconciler,
};
pub use screen::{ForbiddenEntry, ForbiddenScreen};
pub use text::{chunk_text, similarity, tokenize};
