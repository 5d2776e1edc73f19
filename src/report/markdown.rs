//! Markdown formatter for GitHub-flavored Markdown output
//!
//! Generates reports suitable for pull request comments and wikis.

use crate::models::{AnalysisReport, FileRecord, Verdict};
use anyhow::Result;

/// Render report as GitHub-flavored Markdown
pub fn render(report: &AnalysisReport) -> Result<String> {
    let mut md = String::new();

    md.push_str(&render_header(report));
    md.push('\n');
    md.push_str(&render_file_table(&report.files));
    md.push('\n');
    md.push_str(&render_details(&report.files));

    Ok(md)
}

fn render_header(report: &AnalysisReport) -> String {
    let verdict_emoji = match report.summary.verdict {
        Verdict::Good => "✅",
        Verdict::Moderate => "⚠️",
        Verdict::Poor => "❌",
        Verdict::Unknown => "❓",
    };

    format!(
        r#"# {} Code Quality Report: {}

**Verdict: {}** | **Score: {:.1}/100** | **Files: {}**

{}
"#,
        verdict_emoji,
        report.repo_name,
        report.summary.verdict,
        report.summary.overall_score,
        report.file_count,
        report.summary.summary
    )
}

fn render_file_table(files: &[FileRecord]) -> String {
    let mut md = String::from(
        "## Per-file scores\n\n| File | Overall | Correctness | Efficiency | Best Practices | Source |\n|---|---|---|---|---|---|\n",
    );
    for record in files {
        md.push_str(&format!(
            "| `{}` | {} | {} | {} | {} | {} |\n",
            record.file_name,
            cell(record.overall_score),
            cell(record.correctness_score),
            cell(record.efficiency_score),
            cell(record.best_practices_score),
            record.analysis_source
        ));
    }
    md
}

fn cell(score: Option<u8>) -> String {
    match score {
        Some(s) => s.to_string(),
        None => "—".to_string(),
    }
}

fn render_details(files: &[FileRecord]) -> String {
    let mut md = String::from("## Issues and recommendations\n\n");
    for record in files {
        if record.key_issues.is_empty() && record.recommendations.is_empty() {
            continue;
        }
        md.push_str(&format!("### `{}`\n\n", record.file_name));
        for issue in &record.key_issues {
            md.push_str(&format!("- ⚠ {issue}\n"));
        }
        for rec in &record.recommendations {
            md.push_str(&format!("- 💡 {rec}\n"));
        }
        md.push('\n');
    }
    md
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::tests::test_report;

    #[test]
    fn test_markdown_contains_table_and_details() {
        let report = test_report();
        let md = render(&report).unwrap();
        assert!(md.contains("# ✅ Code Quality Report: demo-repo"));
        assert!(md.contains("| `src/main.py` | 87 | 88 | 82 | 90 | generated |"));
        assert!(md.contains("| `assets/blob.js` | — |"));
        assert!(md.contains("Split main() into helpers"));
    }
}
