//! Core data models for critiq
//!
//! These models are used throughout the codebase for representing
//! per-file analysis results and the repository-level report.

use serde::{Deserialize, Serialize};

/// Provenance of a per-file analysis result
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisSource {
    /// Scores came from the generation service
    Generated,
    /// Scores came from the deterministic heuristic analyzer
    #[default]
    Heuristic,
    /// File exceeded the size ceiling; no analysis attempted
    Skipped,
    /// File could not be read; no scores available
    Error,
}

impl std::fmt::Display for AnalysisSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalysisSource::Generated => write!(f, "generated"),
            AnalysisSource::Heuristic => write!(f, "heuristic"),
            AnalysisSource::Skipped => write!(f, "skipped"),
            AnalysisSource::Error => write!(f, "error"),
        }
    }
}

/// Result of analyzing a single file
///
/// Invariant: `overall_score` is `Some` iff `analysis_source` is
/// `Generated` or `Heuristic`. Skipped and errored files never carry
/// scores. `key_issues` and `recommendations` are always present; an
/// empty list means "nothing detected", not "not analyzed".
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FileRecord {
    pub file_name: String,
    #[serde(default)]
    pub correctness_score: Option<u8>,
    #[serde(default)]
    pub efficiency_score: Option<u8>,
    #[serde(default)]
    pub best_practices_score: Option<u8>,
    #[serde(default)]
    pub overall_score: Option<u8>,
    #[serde(default)]
    pub key_issues: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
    #[serde(default)]
    pub analysis_source: AnalysisSource,
}

impl FileRecord {
    /// Record for a file that exceeded the size ceiling
    pub fn skipped(file_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            key_issues: vec![reason.into()],
            analysis_source: AnalysisSource::Skipped,
            ..Default::default()
        }
    }

    /// Record for a file that could not be read
    pub fn error(file_name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            key_issues: vec![description.into()],
            analysis_source: AnalysisSource::Error,
            ..Default::default()
        }
    }

    /// Whether this record carries a usable score
    pub fn is_scored(&self) -> bool {
        self.overall_score.is_some()
    }
}

/// Rounded mean of the three sub-scores
pub fn mean_of_scores(correctness: u8, efficiency: u8, best_practices: u8) -> u8 {
    let sum = correctness as u32 + efficiency as u32 + best_practices as u32;
    ((sum as f64 / 3.0).round() as u32).min(100) as u8
}

/// Coarse categorical judgment of overall repository quality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Verdict {
    Good,
    Moderate,
    Poor,
    /// No file produced a score; quality cannot be judged
    #[default]
    Unknown,
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::Good => write!(f, "Good"),
            Verdict::Moderate => write!(f, "Moderate"),
            Verdict::Poor => write!(f, "Poor"),
            Verdict::Unknown => write!(f, "Unknown"),
        }
    }
}

impl Verdict {
    /// Map an average score to a verdict
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s >= 80.0 => Verdict::Good,
            s if s >= 50.0 => Verdict::Moderate,
            _ => Verdict::Poor,
        }
    }
}

/// Repository-level summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoSummary {
    pub verdict: Verdict,
    pub summary: String,
    pub overall_score: f64,
}

/// Immutable aggregate handed to the formatter
///
/// `files` preserves the input path order, not completion order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub repo_name: String,
    pub file_count: usize,
    pub files: Vec<FileRecord>,
    pub summary: RepoSummary,
}
