//! Concurrent task dispatch
//!
//! Runs [`FileAnalysisTask`] over the candidate files on a bounded rayon
//! pool. Every file gets exactly one output record, in input order,
//! regardless of completion order or individual failures.

use crate::ai::TextGenerator;
use crate::analyzer::task::FileAnalysisTask;
use crate::config::AnalyzerConfig;
use crate::models::FileRecord;
use anyhow::Result;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::info;

/// Progress callback: (file name, completed, total)
pub type ProgressCallback = Box<dyn Fn(&str, usize, usize) + Send + Sync>;

pub struct Dispatcher<'a> {
    generator: &'a dyn TextGenerator,
    config: &'a AnalyzerConfig,
    progress_callback: Option<ProgressCallback>,
}

impl<'a> Dispatcher<'a> {
    pub fn new(generator: &'a dyn TextGenerator, config: &'a AnalyzerConfig) -> Self {
        Self {
            generator,
            config,
            progress_callback: None,
        }
    }

    /// Set a progress callback
    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    /// Analyze every file, one record per input path, input order preserved.
    pub fn run_all(&self, repo_root: &Path, files: &[PathBuf]) -> Result<Vec<FileRecord>> {
        if files.is_empty() {
            return Ok(Vec::new());
        }

        // At least one worker, never more workers than files
        let workers = self.config.workers.min(files.len()).max(1);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .build()?;

        info!(files = files.len(), workers, "dispatching analysis tasks");

        let completed = AtomicUsize::new(0);
        let total = files.len();
        let task = FileAnalysisTask::new(self.generator, self.config);

        // Indexed par_iter keeps collect() in input order
        let records: Vec<FileRecord> = pool.install(|| {
            files
                .par_iter()
                .map(|rel_path| {
                    let record = task.run(repo_root, rel_path);

                    let done = completed.fetch_add(1, Ordering::SeqCst) + 1;
                    if let Some(ref callback) = self.progress_callback {
                        callback(&record.file_name, done, total);
                    }

                    record
                })
                .collect()
        });

        debug_assert_eq!(records.len(), files.len());
        Ok(records)
    }
}
