//! Prompt builders for per-file analysis and the repository summary

use crate::models::FileRecord;

/// Prompt asking for a per-file quality score in strict JSON
pub fn file_analysis(file_name: &str, code: &str) -> String {
    format!(
        r#"You are a code review expert. Analyze this source file for correctness, efficiency, and best practices.

FILE: {file_name}

```
{code}
```

Respond with ONLY a JSON object in a ```json fenced block, using exactly this schema:
{{
  "correctness_score": <0-100>,
  "efficiency_score": <0-100>,
  "best_practices_score": <0-100>,
  "key_issues": ["<short issue>", ...],
  "recommendations": ["<short recommendation>", ...]
}}"#
    )
}

/// Prompt asking for a repository-level verdict. Sends only the compact
/// name+score view, never file content.
pub fn repo_summary(repo_name: &str, records: &[FileRecord]) -> String {
    let mut lines = String::new();
    for record in records {
        match record.overall_score {
            Some(score) => lines.push_str(&format!("- {}: {}/100\n", record.file_name, score)),
            None => lines.push_str(&format!(
                "- {}: no score ({})\n",
                record.file_name, record.analysis_source
            )),
        }
    }

    format!(
        r#"You are a code review expert. These are per-file quality scores for the repository "{repo_name}":

{lines}
Respond with ONLY a JSON object in a ```json fenced block, using exactly this schema:
{{
  "verdict": "Good" | "Moderate" | "Poor",
  "summary": "<2-3 sentence narrative about overall code quality>"
}}"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AnalysisSource;

    #[test]
    fn test_file_prompt_includes_content() {
        let prompt = file_analysis("main.py", "print('hi')");
        assert!(prompt.contains("main.py"));
        assert!(prompt.contains("print('hi')"));
        assert!(prompt.contains("correctness_score"));
    }

    #[test]
    fn test_summary_prompt_is_compact() {
        let records = vec![
            FileRecord {
                file_name: "a.py".into(),
                overall_score: Some(88),
                ..Default::default()
            },
            FileRecord {
                file_name: "b.py".into(),
                analysis_source: AnalysisSource::Skipped,
                ..Default::default()
            },
        ];
        let prompt = repo_summary("demo", &records);
        assert!(prompt.contains("a.py: 88/100"));
        assert!(prompt.contains("b.py: no score (skipped)"));
        // Never resends file content
        assert!(!prompt.contains("```\nprint"));
    }
}
