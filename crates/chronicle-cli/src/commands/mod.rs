//! Subcommand implementations and shared file helpers

pub mod chunk;
pub mod diff;
pub mod ingest;
pub mod merge;
pub mod names;

use chronicle_core::errors::ChronicleError;
use chronicle_core::model::Summary;
use std::path::Path;

pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

pub fn read_text(path: &Path) -> Result<String, ChronicleError> {
    std::fs::read_to_string(path).map_err(|e| ChronicleError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Load a summary JSON file.
pub fn read_summary(path: &Path) -> Result<Summary, Box<dyn std::error::Error>> {
    let text = read_text(path)?;
    serde_json::from_str(&text).map_err(|e| format!("{}: {}", path.display(), e).into())
}

/// Print to stdout, or write to `output` and report where.
pub fn emit(output: Option<&Path>, content: &str) -> CommandResult {
    match output {
        Some(path) => {
            std::fs::write(path, content).map_err(|e| ChronicleError::Io {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
            println!("✓ Wrote {}", path.display());
        }
        None => print!("{}", content),
    }
    Ok(())
}

/// Pretty JSON with a trailing newline.
pub fn to_json<T: serde::Serialize>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value).map(|mut s| {
        s.push('\n');
        s
    })
}
