//! Deterministic heuristic analyzer
//!
//! The fallback scorer used whenever the generation service fails or its
//! output is unusable. Scores are derived from static textual signals
//! only: identical input always yields an identical record. No I/O, no
//! clock, no randomness.

use crate::models::{mean_of_scores, AnalysisSource, FileRecord};

const BASE_SCORE: i32 = 70;
const BASE_MIN: i32 = 10;
const BASE_MAX: i32 = 95;
const SUB_MIN: i32 = 5;
const SUB_MAX: i32 = 100;
const LONG_FILE_LINES: usize = 500;

/// Markers of unfinished work
const UNFINISHED_MARKERS: &[&str] = &["TODO", "FIXME", "XXX", "HACK"];

/// Debug-print calls across the supported languages
const DEBUG_PRINTS: &[&str] = &[
    "print(",
    "println!",
    "console.log",
    "System.out.print",
    "fmt.Println",
    "dbg!",
];

/// Signs a logging facility is in use (debug prints forgiven)
const LOGGING_FACILITIES: &[&str] = &[
    "logging.",
    "logger.",
    "log::",
    "tracing::",
    "log.info",
    "log.debug",
    "slog",
];

/// Test-framework references
const TEST_MARKERS: &[&str] = &[
    "#[test]",
    "def test_",
    "import pytest",
    "unittest",
    "describe(",
    "it(",
    "@Test",
    "assert",
];

/// Documentation / definition markers that earn the best-practices bonus
const DOC_MARKERS: &[&str] = &["///", "\"\"\"", "/**", "def ", "fn ", "function "];

fn contains_any(code: &str, patterns: &[&str]) -> bool {
    patterns.iter().any(|p| code.contains(p))
}

/// A loop header line whose body (deeper indentation, within the next few
/// lines) starts another loop. Purely textual; good enough to flag the
/// obvious O(n^2) shape.
fn has_nested_loop(code: &str) -> bool {
    let lines: Vec<&str> = code.lines().collect();
    for (i, line) in lines.iter().enumerate() {
        if !is_loop_line(line) {
            continue;
        }
        let outer_indent = indent_width(line);
        for inner in lines.iter().skip(i + 1).take(20) {
            let trimmed = inner.trim();
            if trimmed.is_empty() {
                continue;
            }
            let inner_indent = indent_width(inner);
            if inner_indent <= outer_indent {
                break; // left the loop body
            }
            if is_loop_line(inner) {
                return true;
            }
        }
    }
    false
}

fn is_loop_line(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.starts_with("for ")
        || trimmed.starts_with("for(")
        || trimmed.starts_with("while ")
        || trimmed.starts_with("while(")
}

fn indent_width(line: &str) -> usize {
    line.chars()
        .take_while(|c| c.is_whitespace())
        .map(|c| if c == '\t' { 4 } else { 1 })
        .sum()
}

fn clamp(value: i32, min: i32, max: i32) -> u8 {
    value.clamp(min, max) as u8
}

/// Score file content from static signals alone. Never fails.
pub fn analyze(file_name: &str, code: &str) -> FileRecord {
    let mut base = BASE_SCORE;
    let mut key_issues = Vec::new();
    let mut recommendations = Vec::new();

    if contains_any(code, UNFINISHED_MARKERS) {
        base -= 20;
        key_issues.push("Unfinished-work markers (TODO/FIXME) present".to_string());
        recommendations.push("Resolve or ticket the outstanding TODO/FIXME items".to_string());
    }

    let has_debug_prints = contains_any(code, DEBUG_PRINTS);
    let has_logging = contains_any(code, LOGGING_FACILITIES);
    if has_debug_prints && !has_logging {
        base -= 5;
        key_issues.push("Debug print statements without a logging facility".to_string());
        recommendations.push("Replace ad hoc prints with structured logging".to_string());
    }

    let line_count = code.lines().count();
    if line_count > LONG_FILE_LINES {
        base -= 10;
        key_issues.push(format!("File is long ({line_count} lines)"));
        recommendations.push("Split the file into smaller focused modules".to_string());
    }

    let nested_loops = has_nested_loop(code);
    if nested_loops {
        base -= 15;
        key_issues.push("Nested loops suggest quadratic behavior".to_string());
        recommendations.push("Check whether the inner loop can be replaced with a lookup".to_string());
    }

    if contains_any(code, TEST_MARKERS) {
        base += 5;
    }

    let base = clamp(base, BASE_MIN, BASE_MAX) as i32;

    let correctness = clamp(base - 5, SUB_MIN, SUB_MAX);
    let efficiency = clamp(if nested_loops { base - 15 } else { base - 5 }, SUB_MIN, SUB_MAX);
    let best_practices = clamp(
        if contains_any(code, DOC_MARKERS) {
            base + 5
        } else {
            base
        },
        SUB_MIN,
        SUB_MAX,
    );

    if key_issues.is_empty() {
        key_issues.push("No obvious issues detected by static checks".to_string());
        recommendations.push("Confirm behavior with the project's test suite".to_string());
    }

    FileRecord {
        file_name: file_name.to_string(),
        correctness_score: Some(correctness),
        efficiency_score: Some(efficiency),
        best_practices_score: Some(best_practices),
        overall_score: Some(mean_of_scores(correctness, efficiency, best_practices)),
        key_issues,
        recommendations,
        analysis_source: AnalysisSource::Heuristic,
    }
}
