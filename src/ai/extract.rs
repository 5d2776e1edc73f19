//! Structured-data extraction from generated text
//!
//! Generation services routinely wrap JSON in explanatory prose or code
//! fences. Extraction tries, in order:
//!
//! 1. A fenced ```json block (the shape our prompts ask for)
//! 2. A left-to-right brace-depth scan over every `{` position
//! 3. The whole trimmed input as-is
//!
//! Any parse error is converted to [`ExtractionFailure`], never
//! propagated. Schema validation is the caller's job; this module only
//! answers "is there a JSON object in here".

use regex::Regex;
use serde_json::Value;
use thiserror::Error;

/// The response text contained no parseable JSON object
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("no structured data found in response text")]
pub struct ExtractionFailure;

/// Extract the first JSON object found in `raw`
pub fn extract_json(raw: &str) -> Result<Value, ExtractionFailure> {
    // Strategy 1: fenced block explicitly marked as json
    // (?s) enables dot-matches-newline for multiline JSON bodies
    let fence = Regex::new(r"(?s)```json\s*(\{.*?\})\s*```").expect("static regex");
    if let Some(captures) = fence.captures(raw) {
        if let Some(m) = captures.get(1) {
            if let Ok(value) = serde_json::from_str::<Value>(m.as_str()) {
                return Ok(value);
            }
        }
    }

    // Strategy 2: brace-depth scan from every opening brace
    if let Some(value) = scan_braces(raw) {
        return Ok(value);
    }

    // Strategy 3: the entire trimmed input
    serde_json::from_str::<Value>(raw.trim()).map_err(|_| ExtractionFailure)
}

/// For each `{`, grow a depth counter until it returns to zero and try to
/// parse the spanned substring. First successful parse wins.
fn scan_braces(raw: &str) -> Option<Value> {
    let bytes = raw.as_bytes();
    for start in 0..bytes.len() {
        if bytes[start] != b'{' {
            continue;
        }
        let mut depth = 0usize;
        for (offset, &b) in bytes[start..].iter().enumerate() {
            match b {
                b'{' => depth += 1,
                b'}' => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        let candidate = &raw[start..=start + offset];
                        if let Ok(value) = serde_json::from_str::<Value>(candidate) {
                            return Some(value);
                        }
                        break; // unparsable span; try the next opening brace
                    }
                }
                _ => {}
            }
        }
    }
    None
}
