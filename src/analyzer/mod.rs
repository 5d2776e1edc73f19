//! Resilient analysis pipeline
//!
//! Per-file flow: prompt the generation service, extract a structured
//! record from whatever text comes back, and fall back to the
//! deterministic heuristic scorer when the service fails or its output is
//! unusable. The dispatcher fans tasks out over a bounded worker pool;
//! the summarizer folds the per-file records into one repository verdict.

pub mod dispatcher;
pub mod heuristic;
pub mod prompts;
pub mod summary;
pub mod task;

pub use dispatcher::{Dispatcher, ProgressCallback};
pub use summary::RepoSummarizer;
pub use task::FileAnalysisTask;
