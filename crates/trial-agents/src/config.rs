//! Environment-driven runtime configuration.

use std::path::PathBuf;

use courtroom::{GroqClient, DEFAULT_GROQ_BASE_URL, DEFAULT_GROQ_MODEL, DEFAULT_ROUNDS};

/// Runtime configuration with code defaults for every knob.
#[derive(Debug, Clone)]
pub struct TrialConfig {
    /// Groq API key. An empty key fails closed: every model call degrades
    /// into the deterministic fallbacks.
    pub api_key: String,
    /// Chat-completion model shared by every courtroom role.
    pub model: String,
    /// OpenAI-compatible API root.
    pub base_url: String,
    /// Directory holding one JSON file per case.
    pub cases_dir: PathBuf,
    /// Argument rounds per simulation.
    pub rounds: u32,
}

impl Default for TrialConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

impl TrialConfig {
    /// Read configuration from the environment, falling back to defaults.
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var("GROQ_API_KEY").unwrap_or_default(),
            model: std::env::var("GROQ_MODEL").unwrap_or_else(|_| DEFAULT_GROQ_MODEL.into()),
            base_url: std::env::var("GROQ_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_GROQ_BASE_URL.into()),
            cases_dir: std::env::var("CASES_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("cases")),
            rounds: std::env::var("DEBATE_ROUNDS")
                .ok()
                .and_then(|value| value.parse().ok())
                .unwrap_or(DEFAULT_ROUNDS),
        }
    }

    /// Build the Groq client this configuration names.
    pub fn client(&self) -> GroqClient {
        GroqClient::with_model(
            self.api_key.clone(),
            self.model.clone(),
            self.base_url.clone(),
        )
    }
}
