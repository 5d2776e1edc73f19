//! Text (terminal) formatter with colors and formatting

use crate::models::{AnalysisReport, AnalysisSource, Verdict};
use anyhow::Result;

/// Verdict colors (ANSI escape codes)
fn verdict_color(verdict: Verdict) -> &'static str {
    match verdict {
        Verdict::Good => "\x1b[32m",     // Green
        Verdict::Moderate => "\x1b[33m", // Yellow
        Verdict::Poor => "\x1b[31m",     // Red
        Verdict::Unknown => "\x1b[90m",  // Gray
    }
}

/// Reset ANSI color
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

/// Source tag shown in the per-file table
fn source_tag(source: AnalysisSource) -> &'static str {
    match source {
        AnalysisSource::Generated => "[ai]",
        AnalysisSource::Heuristic => "[heur]",
        AnalysisSource::Skipped => "[skip]",
        AnalysisSource::Error => "[err]",
    }
}

/// Render report as formatted terminal output
pub fn render(report: &AnalysisReport) -> Result<String> {
    let mut out = String::new();

    let verdict_c = verdict_color(report.summary.verdict);
    out.push_str(&format!("\n{BOLD}Critiq Analysis: {}{RESET}\n", report.repo_name));
    out.push_str(&format!(
        "{DIM}──────────────────────────────────────{RESET}\n"
    ));
    out.push_str(&format!(
        "Score: {BOLD}{:.1}/100{RESET}  Verdict: {verdict_c}{BOLD}{}{RESET}  Files: {}\n\n",
        report.summary.overall_score, report.summary.verdict, report.file_count
    ));

    for record in &report.files {
        let score = match record.overall_score {
            Some(s) => format!("{s:>3}"),
            None => "  -".to_string(),
        };
        out.push_str(&format!(
            "  {score}  {:<6} {}\n",
            source_tag(record.analysis_source),
            record.file_name
        ));
        for issue in &record.key_issues {
            out.push_str(&format!("         {DIM}- {issue}{RESET}\n"));
        }
    }

    out.push_str(&format!("\n{BOLD}Summary{RESET}\n"));
    out.push_str(&format!("{}\n", report.summary.summary));

    Ok(out)
}
