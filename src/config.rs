use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::processing::engine::DEFAULT_HORIZON;

pub const API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const LEGACY_API_KEY_ENV: &str = "API_KEY";
pub const MODEL_ENV: &str = "TRENDPLOT_MODEL";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub narrative: NarrativeConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

/// Settings for the text-generation service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NarrativeConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Usually supplied through `GEMINI_API_KEY` rather than the file.
    #[serde(default)]
    pub api_key: Option<String>,
}

impl Default for NarrativeConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            temperature: default_temperature(),
            timeout_secs: default_timeout_secs(),
            api_key: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default = "default_forecast_periods")]
    pub forecast_periods: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            forecast_periods: default_forecast_periods(),
        }
    }
}

fn default_endpoint() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_temperature() -> f32 {
    0.3
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_forecast_periods() -> usize {
    DEFAULT_HORIZON
}

impl Config {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("trendplot").join("config.toml"))
    }

    /// Parse a config file. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }

    /// Load from the default location and apply environment overrides.
    /// Errors are logged and replaced by defaults.
    pub fn load() -> Self {
        let mut config = match Self::default_path() {
            Some(path) => Self::load_from(&path).unwrap_or_else(|e| {
                tracing::warn!("Ignoring config at {:?}: {e}", path);
                Self::default()
            }),
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        config
    }

    /// Overlay values from the environment, read through `lookup`.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let api_key = lookup(API_KEY_ENV)
            .or_else(|| lookup(LEGACY_API_KEY_ENV))
            .filter(|k| !k.trim().is_empty());
        if api_key.is_some() {
            self.narrative.api_key = api_key;
        }
        if let Some(model) = lookup(MODEL_ENV).filter(|m| !m.trim().is_empty()) {
            self.narrative.model = model;
        }
    }
}
