//! Cleanup and parsing of raw extraction model output.

use crate::errors::{ChronicleError, Result};
use crate::model::Summary;
use crate::{log_op_end, log_op_error, log_op_start};

const THINK_OPEN: &str = "<think>";
const THINK_CLOSE: &str = "</think>";
const FENCE: &str = "```";

/// Parse one extraction batch from raw model output.
///
/// Reasoning blocks and code fences are stripped and the text is cut to the
/// outermost `{ ... }` before decoding.
///
/// # Errors
///
/// - `NoJson` when no object delimiters are found
/// - `Json` when the object does not decode as a [`Summary`]
/// - `EmptyExtraction` when the batch names no characters
pub fn parse_extraction(raw: &str) -> Result<Summary> {
    log_op_start!("parse_extraction", raw_len = raw.len());
    let start = std::time::Instant::now();

    let result = parse_extraction_impl(raw);
    match &result {
        Ok(summary) => {
            log_op_end!(
                "parse_extraction",
                duration_ms = start.elapsed().as_millis() as u64,
                characters_len = summary.characters.len(),
                events_len = summary.event_count()
            );
        }
        Err(e) => {
            log_op_error!(
                "parse_extraction",
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64
            );
        }
    }
    result
}

fn parse_extraction_impl(raw: &str) -> Result<Summary> {
    let body = extract_json_object(raw)?;
    let summary: Summary = serde_json::from_str(body)?;
    if summary.characters.is_empty() {
        return Err(ChronicleError::EmptyExtraction);
    }
    Ok(summary)
}

/// Locate the JSON object inside raw model output.
///
/// # Errors
///
/// `NoJson` when the output has no `{` or no `}` after it.
pub fn extract_json_object(raw: &str) -> Result<&str> {
    let text = strip_fence(strip_reasoning(raw).trim());

    let open = text.find('{').ok_or_else(|| ChronicleError::NoJson {
        detail: "no opening brace".to_string(),
    })?;
    let close = text.rfind('}').ok_or_else(|| ChronicleError::NoJson {
        detail: "no closing brace".to_string(),
    })?;
    if close < open {
        return Err(ChronicleError::NoJson {
            detail: "closing brace precedes opening brace".to_string(),
        });
    }
    Ok(&text[open..=close])
}

/// Everything after the last `</think>` when a reasoning block is present.
fn strip_reasoning(raw: &str) -> &str {
    if !raw.contains(THINK_OPEN) {
        return raw;
    }
    match raw.rfind(THINK_CLOSE) {
        Some(idx) => &raw[idx + THINK_CLOSE.len()..],
        None => raw,
    }
}

/// Drop a surrounding markdown code fence, including its language tag.
fn strip_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix(FENCE) else {
        return text;
    };
    let rest = match rest.find('\n') {
        Some(nl) => &rest[nl + 1..],
        None => rest,
    };
    rest.strip_suffix(FENCE).unwrap_or(rest).trim()
}
