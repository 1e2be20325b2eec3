//! Names command
//!
//! Usage: chronicle names <TEXT_FILE>... [--roster <FILE>] [--output <FILE>]
//!
//! Detects recurring capitalized names in each text file and folds them into
//! a name roster. The output doubles as an `ingest --seed` file.

use super::{emit, read_text, to_json, CommandResult};
use chronicle_core::config::ChronicleConfig;
use chronicle_core::{detect_names, merge_name_roster, NameRoster};
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct NamesArgs {
    /// Story text files, in reading order
    #[arg(required = true)]
    pub text_files: Vec<PathBuf>,

    /// Existing roster JSON to extend
    #[arg(long)]
    pub roster: Option<PathBuf>,

    /// Output file path (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Execute names command
pub fn execute(args: NamesArgs, _config: &ChronicleConfig) -> CommandResult {
    let mut roster = match &args.roster {
        Some(path) => {
            let raw = read_text(path)?;
            serde_json::from_str::<NameRoster>(&raw)
                .map_err(|e| format!("{}: {}", path.display(), e))?
        }
        None => NameRoster::default(),
    };

    for path in &args.text_files {
        let found = detect_names(&read_text(path)?);
        tracing::debug!(file = %path.display(), names_len = found.len(), "detected names");
        roster.characters = merge_name_roster(&roster.characters, &found);
    }

    emit(args.output.as_deref(), &to_json(&roster)?)
}
