//! Per-file analysis task
//!
//! State machine for one file:
//!
//! ```text
//! START → SIZE_CHECK → (SKIPPED | GENERATE)
//!   GENERATE → EXTRACT_OK   → DONE (generated)
//!   GENERATE → EXTRACT_FAIL → HEURISTIC → DONE
//!   GENERATE_FAIL           → HEURISTIC → DONE
//!   READ_FAIL               → ERROR
//! ```
//!
//! No failure escapes this boundary; every path produces a `FileRecord`.

use crate::ai::{extract_json, TextGenerator};
use crate::analyzer::{heuristic, prompts};
use crate::config::AnalyzerConfig;
use crate::models::{mean_of_scores, AnalysisSource, FileRecord};
use serde_json::Value;
use std::path::Path;
use tracing::debug;

pub struct FileAnalysisTask<'a> {
    generator: &'a dyn TextGenerator,
    config: &'a AnalyzerConfig,
}

impl<'a> FileAnalysisTask<'a> {
    pub fn new(generator: &'a dyn TextGenerator, config: &'a AnalyzerConfig) -> Self {
        Self { generator, config }
    }

    /// Analyze one file. Never fails; failures become record fields.
    pub fn run(&self, repo_root: &Path, rel_path: &Path) -> FileRecord {
        let file_name = rel_path.display().to_string();
        let full_path = repo_root.join(rel_path);

        // Size ceiling: no content read, no generation call
        let size = match std::fs::metadata(&full_path) {
            Ok(meta) => meta.len(),
            Err(e) => return FileRecord::error(file_name, format!("Failed to stat file: {e}")),
        };
        if size > self.config.max_file_bytes {
            debug!(file = %file_name, size, "skipping oversized file");
            return FileRecord::skipped(
                file_name,
                format!(
                    "File exceeds size ceiling ({size} > {} bytes)",
                    self.config.max_file_bytes
                ),
            );
        }

        let content = match std::fs::read_to_string(&full_path) {
            Ok(content) => content,
            Err(e) => return FileRecord::error(file_name, format!("Failed to read file: {e}")),
        };

        let truncated = truncate_chars(&content, self.config.max_prompt_chars);
        let prompt = prompts::file_analysis(&file_name, truncated);

        let raw = match self.generator.generate(&prompt) {
            Ok(raw) => raw,
            Err(e) => {
                debug!(file = %file_name, error = %e, "generation failed, using heuristic");
                return heuristic::analyze(&file_name, &content);
            }
        };

        match extract_json(&raw).ok().and_then(|v| record_from_value(&file_name, &v)) {
            Some(record) => record,
            None => {
                debug!(file = %file_name, "unusable response, using heuristic");
                heuristic::analyze(&file_name, &content)
            }
        }
    }
}

/// Cut `content` at a char boundary after at most `max_chars` characters
fn truncate_chars(content: &str, max_chars: usize) -> &str {
    match content.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &content[..byte_idx],
        None => content,
    }
}

/// Build a generated record from a parsed object, filling neutral defaults
/// for absent fields. Returns `None` when no overall score is derivable,
/// which routes the caller to the heuristic fallback (a generated record
/// must always carry an overall score).
fn record_from_value(file_name: &str, value: &Value) -> Option<FileRecord> {
    let correctness = score_field(value, "correctness_score");
    let efficiency = score_field(value, "efficiency_score");
    let best_practices = score_field(value, "best_practices_score");

    let overall = score_field(value, "overall_score").or(match (correctness, efficiency, best_practices) {
        (Some(c), Some(e), Some(b)) => Some(mean_of_scores(c, e, b)),
        _ => None,
    })?;

    Some(FileRecord {
        file_name: file_name.to_string(),
        correctness_score: correctness,
        efficiency_score: efficiency,
        best_practices_score: best_practices,
        overall_score: Some(overall),
        key_issues: string_list(value, "key_issues"),
        recommendations: string_list(value, "recommendations"),
        analysis_source: AnalysisSource::Generated,
    })
}

fn score_field(value: &Value, key: &str) -> Option<u8> {
    value
        .get(key)?
        .as_f64()
        .map(|n| n.round().clamp(0.0, 100.0) as u8)
}

fn string_list(value: &Value, key: &str) -> Vec<String> {
    value
        .get(key)
        .and_then(|v| v.as_array())
        .map(|arr| {
            arr.iter()
                .filter_map(|v| v.as_str().map(|s| s.to_string()))
                .collect()
        })
        .unwrap_or_default()
}
