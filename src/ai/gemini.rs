//! Gemini API client
//!
//! Sync HTTP via ureq — no async runtime needed. The REST API answers in
//! several shapes (a candidate list, a block notice, an error body); all
//! of them are normalized here into `AiResult<String>` so the rest of the
//! pipeline only ever sees `text | failure`.

use crate::ai::{AiError, AiResult, TextGenerator};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

const ENV_KEY: &str = "GEMINI_API_KEY";
const SIGNUP_URL: &str = "https://aistudio.google.com/app/apikey";
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Gemini REST client — sync HTTP via ureq
#[derive(Debug)]
pub struct GeminiClient {
    api_key: String,
    model: String,
    base_url: String,
    agent: ureq::Agent,
}

fn make_agent(timeout: Duration) -> ureq::Agent {
    ureq::config::Config::builder()
        .http_status_as_error(false) // We handle status codes ourselves
        .timeout_global(Some(timeout))
        .build()
        .new_agent()
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>, timeout: Duration) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            agent: make_agent(timeout),
        }
    }

    /// Read the API key from `GEMINI_API_KEY`
    pub fn from_env(model: impl Into<String>, timeout: Duration) -> AiResult<Self> {
        let api_key = env::var(ENV_KEY).map_err(|_| AiError::MissingApiKey {
            env_var: ENV_KEY.to_string(),
            signup_url: SIGNUP_URL.to_string(),
        })?;
        Ok(Self::new(api_key, model, timeout))
    }

    /// Point the client at a different endpoint (local mocks)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn request_url(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

impl TextGenerator for GeminiClient {
    fn generate(&self, prompt: &str) -> AiResult<String> {
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        let response = self
            .agent
            .post(&self.request_url())
            .header("Content-Type", "application/json")
            .header("x-goog-api-key", &self.api_key)
            .send_json(&body)
            .map_err(|e| AiError::ApiError {
                status: 0,
                message: e.to_string(),
            })?;

        let status = response.status().as_u16();
        if status >= 400 {
            let error_text = response.into_body().read_to_string().unwrap_or_default();
            let message = serde_json::from_str::<ErrorEnvelope>(&error_text)
                .map(|e| e.error.message)
                .unwrap_or(error_text);
            return Err(AiError::ApiError { status, message });
        }

        let resp: GenerateResponse = response
            .into_body()
            .read_json()
            .map_err(|e| AiError::ParseError(e.to_string()))?;

        normalize_response(resp)
    }
}

/// Collapse the recognized response shapes into one text-or-failure result
fn normalize_response(resp: GenerateResponse) -> AiResult<String> {
    if let Some(feedback) = resp.prompt_feedback {
        if let Some(reason) = feedback.block_reason {
            return Err(AiError::ParseError(format!("Prompt blocked: {reason}")));
        }
    }

    let text: String = resp
        .candidates
        .into_iter()
        .next()
        .map(|c| {
            c.content
                .parts
                .into_iter()
                .map(|p| p.text)
                .collect::<Vec<_>>()
                .join("")
        })
        .ok_or(AiError::EmptyResponse)?;

    if text.trim().is_empty() {
        return Err(AiError::EmptyResponse);
    }
    Ok(text)
}

// Gemini API types

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default = "empty_content")]
    content: Content,
}

fn empty_content() -> Content {
    Content { parts: Vec::new() }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}
