//! CLI command definition and handler

use crate::ai::GeminiClient;
use crate::analyzer::{Dispatcher, RepoSummarizer};
use crate::config::AnalyzerConfig;
use crate::report::{self, OutputFormat};
use crate::repo;
use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::str::FromStr;
use tracing::info;

/// Parse and validate workers count (1-64)
fn parse_workers(s: &str) -> Result<usize, String> {
    let n: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if n == 0 {
        Err("workers must be at least 1".to_string())
    } else if n > 64 {
        Err("workers cannot exceed 64".to_string())
    } else {
        Ok(n)
    }
}

/// Critiq - AI-assisted code quality analysis
#[derive(Parser, Debug)]
#[command(name = "critiq")]
#[command(
    version,
    about = "Score every source file in a repository with AI analysis and a deterministic heuristic fallback",
    long_about = "Critiq sends each source file to a generation service for a quality review \
and converts the response into structured per-file scores. When the service is \
unreachable or answers with unusable text, a deterministic heuristic analyzer \
scores the file instead, so a run always completes.\n\n\
Requires GEMINI_API_KEY (environment or ~/.config/critiq/config.toml).",
    after_help = "\
Examples:
  critiq .                             Analyze current directory
  critiq ../myrepo --format json       JSON output for scripting
  critiq . --format md -o report.md    Write a Markdown report
  critiq . --workers 4                 Limit concurrent service calls"
)]
pub struct Cli {
    /// Path to an already-cloned repository (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Repository display name (default: directory base name)
    #[arg(long)]
    pub name: Option<String>,

    /// Output format: text, json, markdown
    #[arg(long, short = 'f', default_value = "text")]
    pub format: String,

    /// Output file path (default: stdout)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Number of parallel workers (1-64)
    #[arg(long, value_parser = parse_workers)]
    pub workers: Option<usize>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,
}

pub fn run(cli: Cli) -> Result<()> {
    let format = OutputFormat::from_str(&cli.format)?;

    let mut config = AnalyzerConfig::load()?;
    if let Some(workers) = cli.workers {
        config.workers = workers;
    }

    // Fatal startup precondition, checked before touching any file
    let api_key = config.require_api_key()?.to_string();
    let client = GeminiClient::new(api_key, config.model.clone(), config.timeout());

    let repo_name = cli
        .name
        .clone()
        .unwrap_or_else(|| repo::repo_display_name(&cli.path));
    let files = repo::collect_source_files(&cli.path)?;
    info!(repo = %repo_name, files = files.len(), "starting analysis");

    if files.is_empty() {
        eprintln!("No source files found under {}", cli.path.display());
    }

    let bar = ProgressBar::new(files.len() as u64);
    bar.set_style(
        ProgressStyle::with_template("{bar:30.cyan/blue} {pos}/{len} {msg}")
            .expect("static template"),
    );
    let bar_for_tasks = bar.clone();

    let records = Dispatcher::new(&client, &config)
        .with_progress_callback(Box::new(move |file_name, _done, _total| {
            bar_for_tasks.set_message(file_name.to_string());
            bar_for_tasks.inc(1);
        }))
        .run_all(&cli.path, &files)?;
    bar.finish_and_clear();

    let summary = RepoSummarizer::new(&client).summarize(&repo_name, &records);
    let analysis = report::assemble(repo_name, records, summary);
    let rendered = report::render(&analysis, format)?;

    match cli.output {
        Some(ref path) => {
            std::fs::write(path, &rendered)
                .with_context(|| format!("failed to write report to {}", path.display()))?;
            eprintln!(
                "{} report written to {}",
                style("✓").green(),
                path.display()
            );
        }
        None => println!("{rendered}"),
    }

    Ok(())
}
