//! Critiq - AI-assisted code quality analysis
//!
//! Analyzes source files in a cloned repository by sending each file to a
//! text-generation service and converting the often-messy response into a
//! structured per-file score. A deterministic heuristic analyzer covers
//! every failure mode, so a run always produces a complete report.

pub mod ai;
pub mod analyzer;
pub mod cli;
pub mod config;
pub mod models;
pub mod repo;
pub mod report;
