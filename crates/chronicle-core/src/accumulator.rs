//! Per-story accumulation of extraction batches.

use crate::errors::Result;
use crate::extract::parse_extraction;
use crate::model::Summary;
use crate::reconcile::{dedupe_by_name, Reconciler};

const PROMPT_PREFIX: &str =
    "\n\nIterate on the following JSON, only changing details if mentioned or explicitly stated:\n";

/// Owns one story's summary between chunks.
#[derive(Debug, Clone)]
pub struct StoryAccumulator {
    summary: Summary,
    reconciler: Reconciler,
    chunks_applied: usize,
}

impl StoryAccumulator {
    /// Start from `seed` with the default thresholds.
    pub fn new(seed: Summary) -> Self {
        Self::with_reconciler(seed, Reconciler::default())
    }

    pub fn with_reconciler(seed: Summary, reconciler: Reconciler) -> Self {
        Self {
            summary: Summary {
                characters: dedupe_by_name(&seed.characters),
                timeline: seed.timeline,
            },
            reconciler,
            chunks_applied: 0,
        }
    }

    /// Fold one parsed batch into the summary and return the new snapshot.
    pub fn apply(&mut self, batch: &Summary) -> &Summary {
        tracing::debug!(
            chunk_index = self.chunks_applied,
            characters_len = batch.characters.len(),
            events_len = batch.event_count(),
            "merging extraction batch"
        );
        self.summary = self.reconciler.merge_summary(&self.summary, batch);
        self.chunks_applied += 1;
        &self.summary
    }

    /// Parse raw model output and fold it in.
    ///
    /// # Errors
    ///
    /// Propagates [`parse_extraction`] failures; the summary is left as is.
    pub fn apply_raw(&mut self, raw: &str) -> Result<&Summary> {
        let batch = parse_extraction(raw)?;
        Ok(self.apply(&batch))
    }

    pub fn summary(&self) -> &Summary {
        &self.summary
    }

    pub fn into_summary(self) -> Summary {
        self.summary
    }

    pub fn chunks_applied(&self) -> usize {
        self.chunks_applied
    }

    /// Prompt suffix carrying the current summary, empty while nothing is known.
    ///
    /// # Errors
    ///
    /// `Json` if the summary fails to serialize.
    pub fn prompt_context(&self) -> Result<String> {
        if self.summary.is_empty() {
            return Ok(String::new());
        }
        let json = serde_json::to_string_pretty(&self.summary)?;
        Ok(format!("{PROMPT_PREFIX}{json}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ChronicleError;
    use crate::model::Character;

    #[test]
    fn test_seed_is_deduplicated() {
        let seed = Summary::new(
            vec![Character::named("Jane"), Character::named(" jane"), Character::named("")],
            vec![],
        );
        let acc = StoryAccumulator::new(seed);
        assert_eq!(acc.summary().characters.len(), 1);
        assert_eq!(acc.chunks_applied(), 0);
    }

    #[test]
    fn test_empty_summary_has_no_prompt_context() {
        let acc = StoryAccumulator::new(Summary::default());
        assert_eq!(acc.prompt_context().unwrap(), "");
    }

    #[test]
    fn test_prompt_context_embeds_pretty_json() {
        let acc = StoryAccumulator::new(Summary::new(vec![Character::named("Jane")], vec![]));
        let ctx = acc.prompt_context().unwrap();
        assert!(ctx.starts_with("\n\nIterate on the following JSON, only changing details"));
        assert!(ctx.contains("\"name\": \"Jane\""));
    }

    #[test]
    fn test_failed_raw_batch_leaves_summary() {
        let mut acc = StoryAccumulator::new(Summary::new(vec![Character::named("Jane")], vec![]));
        let err = acc.apply_raw("{\"characters\": []}").unwrap_err();
        assert_eq!(err, ChronicleError::EmptyExtraction);
        assert_eq!(acc.chunks_applied(), 0);
        assert_eq!(acc.summary().characters.len(), 1);
    }

    #[test]
    fn test_raw_batches_accumulate() {
        let mut acc = StoryAccumulator::new(Summary::default());
        acc.apply_raw(r#"{"characters":[{"name":"Jane","age":"17"}]}"#)
            .unwrap();
        acc.apply_raw(r#"{"characters":[{"name":"JANE","role":"Student"},{"name":"Bob"}]}"#)
            .unwrap();
        let s = acc.summary();
        assert_eq!(acc.chunks_applied(), 2);
        assert_eq!(s.characters.len(), 2);
        assert_eq!(s.characters[0].name, "Jane");
        assert_eq!(s.characters[0].age, "17");
        assert_eq!(s.characters[0].role, "Student");
    }
}
