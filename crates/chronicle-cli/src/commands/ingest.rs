//! Ingest command
//!
//! Usage: chronicle ingest <RAW>... [--seed <FILE>] [--story <ID>] [--output <FILE>]
//!
//! Each RAW file holds one model response for one chunk, in story order.
//! Responses that yield no usable summary are reported and skipped.

use super::{emit, read_summary, read_text, to_json, CommandResult};
use chronicle_core::config::ChronicleConfig;
use chronicle_core::errors::{ChronicleError, ExError};
use chronicle_core::{Reconciler, StoryAccumulator, Summary};
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct IngestArgs {
    /// Raw model output files, one per chunk
    #[arg(required = true)]
    pub raw: Vec<PathBuf>,

    /// Summary JSON to start from
    #[arg(long)]
    pub seed: Option<PathBuf>,

    /// Story identifier attached to skip reports
    #[arg(long)]
    pub story: Option<String>,

    /// Output file path (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Execute ingest command
pub fn execute(args: IngestArgs, config: &ChronicleConfig) -> CommandResult {
    let seed = match &args.seed {
        Some(path) => read_summary(path)?,
        None => Summary::default(),
    };
    let seeded = !seed.is_empty();

    let mut acc = StoryAccumulator::with_reconciler(seed, Reconciler::new(config.thresholds));
    let mut skipped = 0usize;

    for (index, path) in args.raw.iter().enumerate() {
        let raw = read_text(path)?;
        if let Err(e) = acc.apply_raw(&raw) {
            skipped += 1;
            let report = skip_report(e, index, args.story.as_deref());
            tracing::warn!(
                chunk_index = index,
                file = %path.display(),
                code = report.code(),
                "skipping unusable model output"
            );
            eprintln!("⚠ Skipped {}: {}", path.display(), report);
        }
    }

    if acc.chunks_applied() == 0 && !seeded {
        return Err(ChronicleError::EmptyExtraction.into());
    }

    tracing::info!(
        applied = acc.chunks_applied(),
        skipped,
        characters_len = acc.summary().characters.len(),
        events_len = acc.summary().event_count(),
        "ingest complete"
    );

    emit(args.output.as_deref(), &to_json(acc.summary())?)
}

fn skip_report(err: ChronicleError, chunk_index: usize, story: Option<&str>) -> ExError {
    let report = ExError::from(err).with_chunk_index(chunk_index);
    match story {
        Some(id) => report.with_story_id(id),
        None => report,
    }
}
