//! Generation-service boundary
//!
//! The analysis pipeline talks to a text-generation service through the
//! [`TextGenerator`] trait: `generate(prompt) -> text | failure`. The
//! concrete Gemini adapter lives in [`gemini`]; tests inject stubs.
//! Responses are unreliable by nature, so [`extract`] recovers structured
//! data from prose-wrapped, fenced, or bare JSON output.
//!
//! # Environment Variables
//!
//! - `GEMINI_API_KEY`: Required for the Gemini backend

mod extract;
mod gemini;

pub use extract::{extract_json, ExtractionFailure};
pub use gemini::{GeminiClient, DEFAULT_MODEL};

use thiserror::Error;

/// Errors that can occur at the generation-service boundary
#[derive(Error, Debug)]
pub enum AiError {
    #[error("Missing API key: {env_var} not set. Get your key at {signup_url}")]
    MissingApiKey { env_var: String, signup_url: String },

    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    #[error("Service returned an empty response")]
    EmptyResponse,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type AiResult<T> = Result<T, AiError>;

/// Opaque text-generation dependency
///
/// One prompt in, one text out. Latency and failure characteristics are
/// the implementation's business; callers treat any `Err` as a single
/// failed attempt and fall back, never retry.
pub trait TextGenerator: Send + Sync {
    fn generate(&self, prompt: &str) -> AiResult<String>;
}
