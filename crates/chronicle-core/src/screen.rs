//! Near-duplicate screening against chunks the model previously refused.

use crate::config::FORBID_THRESHOLD;
use crate::text::similarity;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A chunk that was refused upstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForbiddenEntry {
    pub reason: String,
    pub text: String,
    /// Upstream error payload, when one was returned
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
}

impl ForbiddenEntry {
    pub fn new(reason: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
            text: text.into(),
            raw: None,
        }
    }
}

/// Refused chunks keyed by chunk id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForbiddenScreen {
    entries: BTreeMap<String, ForbiddenEntry>,
    #[serde(skip, default = "default_threshold")]
    threshold: f64,
}

fn default_threshold() -> f64 {
    FORBID_THRESHOLD
}

impl Default for ForbiddenScreen {
    fn default() -> Self {
        Self::with_threshold(FORBID_THRESHOLD)
    }
}

impl ForbiddenScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_threshold(threshold: f64) -> Self {
        Self {
            entries: BTreeMap::new(),
            threshold,
        }
    }

    pub fn set_threshold(&mut self, threshold: f64) {
        self.threshold = threshold;
    }

    pub fn insert(&mut self, id: impl Into<String>, entry: ForbiddenEntry) {
        self.entries.insert(id.into(), entry);
    }

    /// True when the chunk id was already refused.
    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First entry, in id order, whose text resembles `chunk`.
    pub fn check(&self, chunk: &str) -> Option<(&str, &ForbiddenEntry)> {
        let hit = self
            .entries
            .iter()
            .find(|(_, entry)| similarity(&entry.text, chunk) >= self.threshold)
            .map(|(id, entry)| (id.as_str(), entry));
        if let Some((id, _)) = hit {
            tracing::debug!(forbidden_id = id, "chunk matches refused content");
        }
        hit
    }

    /// Record `chunk` under `id` when it resembles a refused entry.
    ///
    /// Returns true when the chunk was screened out.
    pub fn screen(&mut self, id: &str, chunk: &str) -> bool {
        let Some((_, matched)) = self.check(chunk) else {
            return false;
        };
        let entry = ForbiddenEntry {
            reason: "similar to forbidden content".to_string(),
            text: chunk.to_string(),
            raw: matched.raw.clone(),
        };
        self.insert(id, entry);
        true
    }
}
