//! Configuration loading, validation, and management for Switchyard.
//!
//! Loads configuration from `~/.switchyard/config.toml` with environment
//! variable overrides. Validates all settings at startup.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `~/.switchyard/config.toml`.
#[derive(Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// API key (can be overridden per-provider)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Default LLM provider
    #[serde(default = "default_provider")]
    pub default_provider: String,

    /// Default model
    #[serde(default = "default_model")]
    pub default_model: String,

    /// Default temperature
    #[serde(default = "default_temperature")]
    pub default_temperature: f32,

    /// Default max tokens per LLM response
    #[serde(default = "default_max_tokens")]
    pub default_max_tokens: u32,

    /// Conversation memory configuration
    #[serde(default)]
    pub memory: MemoryConfig,

    /// Intent patterns and backend call limits
    #[serde(default)]
    pub routing: RoutingConfig,

    /// Log output configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Provider-specific configurations
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
}

fn default_provider() -> String {
    "ollama".into()
}
fn default_model() -> String {
    "mistral".into()
}
fn default_temperature() -> f32 {
    0.7
}
fn default_max_tokens() -> u32 {
    1024
}
fn default_true() -> bool {
    true
}

/// Redact a secret string for Debug output.
fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &redact(&self.api_key))
            .field("default_provider", &self.default_provider)
            .field("default_model", &self.default_model)
            .field("default_temperature", &self.default_temperature)
            .field("default_max_tokens", &self.default_max_tokens)
            .field("memory", &self.memory)
            .field("routing", &self.routing)
            .field("logging", &self.logging)
            .field("providers", &self.providers)
            .finish()
    }
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_key", &redact(&self.api_key))
            .field("api_url", &self.api_url)
            .field("default_model", &self.default_model)
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryConfig {
    /// "file" (durable JSON document) or "none" (in-process only)
    #[serde(default = "default_memory_backend")]
    pub backend: String,

    /// Location of the JSON document; defaults to `~/.switchyard/memory.json`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// How many of the most recent conversations are kept
    #[serde(default = "default_retention")]
    pub retention: usize,
}

fn default_memory_backend() -> String {
    "file".into()
}
fn default_retention() -> usize {
    50
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            backend: default_memory_backend(),
            path: None,
            retention: default_retention(),
        }
    }
}

impl MemoryConfig {
    /// The resolved memory file path.
    pub fn resolved_path(&self) -> PathBuf {
        match &self.path {
            Some(p) => PathBuf::from(p),
            None => AppConfig::config_dir().join("memory.json"),
        }
    }
}

/// Pattern groups for the intent classifier plus generation limits.
///
/// Each group fires when any of its regular expressions matches the
/// lower-cased query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingConfig {
    #[serde(default = "default_math_patterns")]
    pub math_patterns: Vec<String>,

    #[serde(default = "default_write_patterns")]
    pub write_patterns: Vec<String>,

    #[serde(default = "default_translate_patterns")]
    pub translate_patterns: Vec<String>,

    /// Upper bound for a single backend call, in seconds
    #[serde(default = "default_generation_timeout")]
    pub generation_timeout_secs: u64,
}

pub fn default_math_patterns() -> Vec<String> {
    vec![
        r"\b(calculate|compute|solve|find|what is)\b".into(),
        r"\d+\s*[\+\-\*\/]\s*\d+".into(),
        r"\bsquare root\b".into(),
        r"\b(add|subtract|multiply|divide)\b".into(),
        r"\b(sum|difference|product|quotient)\b".into(),
    ]
}

pub fn default_write_patterns() -> Vec<String> {
    vec![
        r"\b(write|create|compose|tell)\b.*\b(story|tale|poem|essay|narrative)\b".into(),
        r"\bwrite\b".into(),
        r"\bstory\b".into(),
        r"\bpoem\b".into(),
        r"\bessay\b".into(),
    ]
}

pub fn default_translate_patterns() -> Vec<String> {
    vec![
        r"\b(translate|translation|convert)\b".into(),
        r"\bto\s+(spanish|french|german|italian|portuguese|chinese|japanese|korean|hindi|arabic)\b".into(),
        r"\bin\s+(spanish|french|german|italian|portuguese|chinese|japanese|korean|hindi|arabic)\b".into(),
    ]
}

fn default_generation_timeout() -> u64 {
    120
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            math_patterns: default_math_patterns(),
            write_patterns: default_write_patterns(),
            translate_patterns: default_translate_patterns(),
            generation_timeout_secs: default_generation_timeout(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Also write logs to this file (JSON lines when `json` is set)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,

    #[serde(default = "default_true")]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file: None,
            json: true,
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_model: Option<String>,
}

impl AppConfig {
    /// Load configuration from the default path (~/.switchyard/config.toml).
    ///
    /// Environment overrides:
    /// - `SWITCHYARD_API_KEY` (then `OPENAI_API_KEY`) when no key is configured
    /// - `SWITCHYARD_PROVIDER`, `SWITCHYARD_MODEL`
    /// - `SWITCHYARD_MEMORY_PATH`
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;

        if config.api_key.is_none() {
            config.api_key = std::env::var("SWITCHYARD_API_KEY")
                .ok()
                .or_else(|| std::env::var("OPENAI_API_KEY").ok());
        }

        if let Ok(provider) = std::env::var("SWITCHYARD_PROVIDER") {
            config.default_provider = provider;
        }

        if let Ok(model) = std::env::var("SWITCHYARD_MODEL") {
            config.default_model = model;
        }

        if let Ok(path) = std::env::var("SWITCHYARD_MEMORY_PATH") {
            config.memory.path = Some(path);
        }

        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".switchyard")
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.default_temperature < 0.0 || self.default_temperature > 2.0 {
            return Err(ConfigError::ValidationError(
                "default_temperature must be between 0.0 and 2.0".into(),
            ));
        }

        if self.memory.retention == 0 {
            return Err(ConfigError::ValidationError(
                "memory.retention must be at least 1".into(),
            ));
        }

        if !matches!(self.memory.backend.as_str(), "file" | "none") {
            return Err(ConfigError::ValidationError(format!(
                "memory.backend must be \"file\" or \"none\", got \"{}\"",
                self.memory.backend
            )));
        }

        if self.routing.generation_timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "routing.generation_timeout_secs must be at least 1".into(),
            ));
        }

        for (group, patterns) in [
            ("math", &self.routing.math_patterns),
            ("write", &self.routing.write_patterns),
            ("translate", &self.routing.translate_patterns),
        ] {
            if patterns.is_empty() {
                return Err(ConfigError::ValidationError(format!(
                    "routing.{group}_patterns must not be empty"
                )));
            }
        }

        Ok(())
    }

    /// Check if an API key is available (from config or environment).
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Generate a default config TOML string (for `onboard` command).
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            default_provider: default_provider(),
            default_model: default_model(),
            default_temperature: default_temperature(),
            default_max_tokens: default_max_tokens(),
            memory: MemoryConfig::default(),
            routing: RoutingConfig::default(),
            logging: LoggingConfig::default(),
            providers: HashMap::new(),
        }
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}
