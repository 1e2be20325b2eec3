//! Chunk command
//!
//! Usage: chronicle chunk <TEXT_FILE> [--limit <N>] [--forbidden <FILE>] [--json]
//!        chronicle chunk --paragraphs <FILE> [--limit <N>] [--forbidden <FILE>] [--json]

use super::{read_text, to_json, CommandResult};
use chronicle_core::config::ChronicleConfig;
use chronicle_core::errors::ChronicleError;
use chronicle_core::text::{chunk_paragraphs, encode_paragraphs};
use chronicle_core::{chunk_text, ForbiddenScreen};
use clap::Args;
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct ChunkArgs {
    /// Story text file
    #[arg(required_unless_present = "paragraphs")]
    pub text_file: Option<PathBuf>,

    /// Numbered paragraphs as a JSON object (`{"1": "text", ...}`); each
    /// chunk is emitted as an index-keyed JSON object
    #[arg(long, conflicts_with = "text_file")]
    pub paragraphs: Option<PathBuf>,

    /// Maximum chunk length in characters (default: from config)
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Forbidden-content screen JSON; matching chunks are flagged
    #[arg(long)]
    pub forbidden: Option<PathBuf>,

    /// Emit chunks as a JSON array
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct ChunkReport<'a> {
    index: usize,
    chars: usize,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    paragraphs: Option<&'a [usize]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    forbidden: Option<Flag<'a>>,
}

#[derive(Debug, Serialize)]
struct Flag<'a> {
    id: &'a str,
    reason: &'a str,
}

/// Execute chunk command
pub fn execute(args: ChunkArgs, config: &ChronicleConfig) -> CommandResult {
    let limit = args.limit.unwrap_or(config.chunking.limit);
    if limit == 0 {
        return Err(ChronicleError::Config {
            message: "chunk limit must be positive".to_string(),
        }
        .into());
    }

    let screen = match &args.forbidden {
        Some(path) => Some(load_screen(path, config.thresholds.forbid)?),
        None => None,
    };

    let chunks: Vec<(String, Option<Vec<usize>>)> = match (&args.paragraphs, &args.text_file) {
        (Some(path), _) => {
            let paras = read_paragraphs(path)?;
            chunk_paragraphs(&paras, limit)
                .into_iter()
                .map(|group| {
                    let indices = group.iter().map(|p| p.index).collect();
                    (encode_paragraphs(&group), Some(indices))
                })
                .collect()
        }
        (None, Some(path)) => chunk_text(&read_text(path)?, limit)
            .into_iter()
            .map(|chunk| (chunk, None))
            .collect(),
        (None, None) => return Err("either TEXT_FILE or --paragraphs is required".into()),
    };

    let reports: Vec<ChunkReport<'_>> = chunks
        .iter()
        .enumerate()
        .map(|(index, (chunk, indices))| ChunkReport {
            index,
            chars: chunk.chars().count(),
            text: chunk,
            paragraphs: indices.as_deref(),
            forbidden: screen
                .as_ref()
                .and_then(|s| s.check(chunk))
                .map(|(id, entry)| Flag {
                    id,
                    reason: &entry.reason,
                }),
        })
        .collect();

    let flagged = reports.iter().filter(|r| r.forbidden.is_some()).count();
    tracing::info!(
        chunks_len = reports.len(),
        flagged,
        limit,
        "chunked story text"
    );

    if args.json {
        print!("{}", to_json(&reports)?);
        return Ok(());
    }

    for report in &reports {
        match &report.forbidden {
            Some(flag) => println!(
                "--- chunk {} ({} chars) FORBIDDEN: {} [{}] ---",
                report.index, report.chars, flag.reason, flag.id
            ),
            None => println!("--- chunk {} ({} chars) ---", report.index, report.chars),
        }
        println!("{}", report.text);
    }
    Ok(())
}

fn read_paragraphs(path: &Path) -> Result<HashMap<String, String>, Box<dyn std::error::Error>> {
    let raw = read_text(path)?;
    serde_json::from_str(&raw).map_err(|e| format!("{}: {}", path.display(), e).into())
}

fn load_screen(path: &Path, threshold: f64) -> Result<ForbiddenScreen, Box<dyn std::error::Error>> {
    let raw = read_text(path)?;
    let mut screen: ForbiddenScreen =
        serde_json::from_str(&raw).map_err(|e| format!("{}: {}", path.display(), e))?;
    screen.set_threshold(threshold);
    Ok(screen)
}
