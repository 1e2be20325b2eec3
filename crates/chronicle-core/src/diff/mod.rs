//! Snapshot diff engine.
//!
//! Compares two full summaries and produces a structured, deterministic
//! diff for human review. Rendering lives apart from computation:
//!
//! ```
//! use chronicle_core::diff::{diff_summaries, render_human_summary};
//! use chronicle_core::model::Summary;
//!
//! let diff = diff_summaries(&Summary::default(), &Summary::default());
//! assert!(render_human_summary(&diff).contains("No changes detected"));
//! ```

pub mod characters;
pub mod engine;
pub mod human_summary;
pub mod model;
pub mod terminal;
pub mod timeline;
pub mod words;

pub use characters::{diff_characters, fuzzy_list_diff};
pub use engine::{diff_summaries, SnapshotDiffer};
pub use human_summary::render_human_summary;
pub use model::{
    ChangeCounts, ChangeType, CharacterDiff, EventChange, FieldDiff, Op, StringDiff, SummaryDiff,
    WordDelta,
};
pub use terminal::render_terminal;
pub use timeline::diff_timelines;
pub use words::word_diff;
