//! Analyzer configuration.
//!
//! The API credential is an explicit field rather than an implicit
//! process-environment lookup inside the analyzer, so tests can simulate
//! "credential present/absent" without mutating the environment. A layered
//! `figment` loader (defaults -> TOML file -> env) is provided for services
//! that embed the analyzer.

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Configuration for the uniqueness analyzer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Gemini API key. `None` disables the AI path entirely; the analyzer
    /// then always uses the keyword fallback.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Model identifier.
    pub model: String,
    /// Optional base URL override for the API endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Overall request timeout in seconds. A timeout is treated like any
    /// other AI failure and falls through to the keyword path.
    pub timeout_secs: u64,
    /// Connection timeout in seconds.
    pub connect_timeout_secs: u64,
    /// Maximum tokens to generate in a response.
    pub max_output_tokens: u32,
    /// Generation temperature; kept low for consistent scoring.
    pub temperature: f32,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gemini-pro".to_string(),
            base_url: None,
            timeout_secs: 30,
            connect_timeout_secs: 10,
            max_output_tokens: 1024,
            temperature: 0.2,
        }
    }
}

impl AnalyzerConfig {
    /// Load configuration with figment layering:
    /// defaults -> optional TOML file -> `UNIQUENESS_`-prefixed env vars
    /// (e.g. `UNIQUENESS_API_KEY`, `UNIQUENESS_MODEL`).
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(path) = config_file
            && path.exists()
        {
            figment = figment.merge(Toml::file(path));
        }

        figment = figment.merge(Env::prefixed("UNIQUENESS_"));

        figment.extract().map_err(|e| ConfigError::Extract(Box::new(e)))
    }

    /// Convenience constructor for an explicitly provided API key.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Self::default()
        }
    }
}
