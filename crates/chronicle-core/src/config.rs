//! Engine configuration.
//!
//! Loaded from TOML; every section is optional:
//!
//! ```toml
//! [thresholds]
//! similarity = 0.70
//! forbid = 0.80
//!
//! [chunking]
//! limit = 32768
//! ```

use crate::errors::{ChronicleError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Cutoff at which two notable actions or two events are the same fact.
pub const SIMILARITY_THRESHOLD: f64 = 0.70;

/// Cutoff at which a chunk is treated as a copy of previously refused text.
pub const FORBID_THRESHOLD: f64 = 0.80;

/// Default chunk size in characters.
pub const DEFAULT_CHUNK_LIMIT: usize = 8192 * 4;

/// Fuzzy-match cutoffs used by the reconcilers, the differ, and the screen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    #[serde(default = "default_similarity")]
    pub similarity: f64,
    #[serde(default = "default_forbid")]
    pub forbid: f64,
}

fn default_similarity() -> f64 {
    SIMILARITY_THRESHOLD
}
fn default_forbid() -> f64 {
    FORBID_THRESHOLD
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            similarity: SIMILARITY_THRESHOLD,
            forbid: FORBID_THRESHOLD,
        }
    }
}

impl Thresholds {
    /// Reject cutoffs outside `[0, 1]`.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("similarity", self.similarity), ("forbid", self.forbid)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ChronicleError::InvalidThreshold {
                    name: name.to_string(),
                    value,
                });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkingConfig {
    #[serde(default = "default_chunk_limit")]
    pub limit: usize,
}

fn default_chunk_limit() -> usize {
    DEFAULT_CHUNK_LIMIT
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            limit: DEFAULT_CHUNK_LIMIT,
        }
    }
}

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChronicleConfig {
    #[serde(default)]
    pub thresholds: Thresholds,
    #[serde(default)]
    pub chunking: ChunkingConfig,
}

impl ChronicleConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let config: ChronicleConfig = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse, and validate a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| ChronicleError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(
            path = %path.display(),
            similarity = config.thresholds.similarity,
            forbid = config.thresholds.forbid,
            chunk_limit = config.chunking.limit,
            "loaded configuration"
        );
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.thresholds.validate()?;
        if self.chunking.limit == 0 {
            return Err(ChronicleError::Config {
                message: "chunking.limit must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}
