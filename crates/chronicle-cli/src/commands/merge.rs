//! Merge command
//!
//! Usage: chronicle merge <BASE> <UPDATE>... [--output <FILE>]

use super::{emit, read_summary, to_json, CommandResult};
use chronicle_core::config::ChronicleConfig;
use chronicle_core::Reconciler;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct MergeArgs {
    /// Base summary JSON file
    pub base: PathBuf,

    /// Update summary JSON files, applied in order
    #[arg(required = true)]
    pub updates: Vec<PathBuf>,

    /// Output file path (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Execute merge command
pub fn execute(args: MergeArgs, config: &ChronicleConfig) -> CommandResult {
    let reconciler = Reconciler::new(config.thresholds);

    let mut merged = read_summary(&args.base)?;
    for path in &args.updates {
        let update = read_summary(path)?;
        merged = reconciler.merge_summary(&merged, &update);
        tracing::debug!(
            update = %path.display(),
            characters_len = merged.characters.len(),
            events_len = merged.event_count(),
            "applied update"
        );
    }

    emit(args.output.as_deref(), &to_json(&merged)?)
}
