//! Diff command
//!
//! Usage: chronicle diff <OLD> <NEW> [--format terminal|markdown|json]

use super::{read_summary, to_json, CommandResult};
use chronicle_core::config::ChronicleConfig;
use chronicle_core::diff::{render_human_summary, render_terminal};
use chronicle_core::SnapshotDiffer;
use clap::{Args, ValueEnum};
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DiffFormat {
    /// Colorized listing of every entry
    Terminal,
    /// Markdown review summary of changed entries
    Markdown,
    /// Structured diff
    Json,
}

#[derive(Debug, Args)]
pub struct DiffArgs {
    /// Older summary JSON file
    pub old: PathBuf,

    /// Newer summary JSON file
    pub new: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = DiffFormat::Terminal)]
    pub format: DiffFormat,

    /// Disable ANSI colors in terminal output
    #[arg(long)]
    pub no_color: bool,

    /// Exit with status 3 when the summaries differ
    #[arg(long)]
    pub exit_code: bool,
}

/// Execute diff command
pub fn execute(args: DiffArgs, config: &ChronicleConfig) -> CommandResult {
    let old = read_summary(&args.old)?;
    let new = read_summary(&args.new)?;

    let diff = SnapshotDiffer::new(config.thresholds).diff(&old, &new);

    let rendered = match args.format {
        DiffFormat::Terminal => {
            if args.no_color {
                colored::control::set_override(false);
            }
            render_terminal(&diff)
        }
        DiffFormat::Markdown => render_human_summary(&diff),
        DiffFormat::Json => to_json(&diff)?,
    };
    let mut stdout = std::io::stdout();
    stdout.write_all(rendered.as_bytes())?;
    stdout.flush()?;

    if args.exit_code && !diff.is_unchanged() {
        std::process::exit(3);
    }
    Ok(())
}
