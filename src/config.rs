//! Analyzer configuration
//!
//! One explicit config object, built at startup and passed by reference
//! into the pipeline. Sources, in priority order:
//! - Environment variables (highest)
//! - User config (~/.config/critiq/config.toml)
//! - Built-in defaults

use crate::ai::AiError;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

const ENV_KEY: &str = "GEMINI_API_KEY";
const SIGNUP_URL: &str = "https://aistudio.google.com/app/apikey";

pub const DEFAULT_MAX_FILE_BYTES: u64 = 100_000;
pub const DEFAULT_MAX_PROMPT_CHARS: usize = 12_000;
pub const DEFAULT_WORKERS: usize = 8;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Runtime configuration for one analysis run
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// Generation-service credential; checked before any analysis begins
    pub api_key: Option<String>,
    /// Generation model name
    pub model: String,
    /// Files above this size are skipped without reading
    pub max_file_bytes: u64,
    /// Content is truncated to this many chars before prompting
    pub max_prompt_chars: usize,
    /// Worker-pool ceiling (actual pool never exceeds the file count)
    pub workers: usize,
    /// Per-call timeout for generation-service requests
    pub timeout_secs: u64,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: crate::ai::DEFAULT_MODEL.to_string(),
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
            max_prompt_chars: DEFAULT_MAX_PROMPT_CHARS,
            workers: DEFAULT_WORKERS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl AnalyzerConfig {
    /// Load config from all sources, with priority:
    /// 1. Environment variables (highest)
    /// 2. User config (~/.config/critiq/config.toml)
    /// 3. Defaults
    pub fn load() -> Result<Self> {
        let mut config = Self::default();

        if let Some(user_config) = Self::user_config_path()
            .filter(|p| p.exists())
            .and_then(|p| std::fs::read_to_string(&p).ok())
            .and_then(|content| toml::from_str::<UserConfigFile>(&content).ok())
        {
            config.apply_file(user_config);
        }

        // Environment variables override everything
        if let Ok(key) = std::env::var(ENV_KEY) {
            config.api_key = Some(key);
        }
        if let Ok(model) = std::env::var("CRITIQ_MODEL") {
            config.model = model;
        }

        Ok(config)
    }

    /// Get the user config file path
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("critiq").join("config.toml"))
    }

    fn apply_file(&mut self, file: UserConfigFile) {
        if let Some(key) = file.ai.gemini_api_key {
            self.api_key = Some(key);
        }
        if let Some(model) = file.ai.model {
            self.model = model;
        }
        if let Some(v) = file.limits.max_file_bytes {
            self.max_file_bytes = v;
        }
        if let Some(v) = file.limits.max_prompt_chars {
            self.max_prompt_chars = v;
        }
        if let Some(v) = file.limits.workers {
            self.workers = v;
        }
        if let Some(v) = file.limits.timeout_secs {
            self.timeout_secs = v;
        }
    }

    /// Fatal startup precondition: the credential must be present before
    /// any analysis begins.
    pub fn require_api_key(&self) -> Result<&str, AiError> {
        self.api_key.as_deref().ok_or_else(|| AiError::MissingApiKey {
            env_var: ENV_KEY.to_string(),
            signup_url: SIGNUP_URL.to_string(),
        })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// On-disk shape of ~/.config/critiq/config.toml
#[derive(Debug, Default, Deserialize, Serialize)]
struct UserConfigFile {
    #[serde(default)]
    ai: AiSection,
    #[serde(default)]
    limits: LimitsSection,
}

#[derive(Debug, Default, Deserialize, Serialize)]
struct AiSection {
    gemini_api_key: Option<String>,
    model: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
struct LimitsSection {
    max_file_bytes: Option<u64>,
    max_prompt_chars: Option<usize>,
    workers: Option<usize>,
    timeout_secs: Option<u64>,
}
