//! Configuration loading, validation, and management for AgentDesk.
//!
//! Loads configuration from `~/.agentdesk/config.toml` with environment
//! variable overrides. Validates all settings at startup. The resulting
//! [`AppConfig`] is built once in `main` and passed down by reference; there
//! is no global settings instance.
//!
//! A missing LLM API key is not an error: the default responder falls back
//! to canned replies.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Models the default responder may be configured with.
pub const ALLOWED_MODELS: &[&str] = &[
    "gpt-4",
    "gpt-4o",
    "gpt-4o-mini",
    "gpt-4-turbo",
    "gpt-3.5-turbo",
];

/// The root configuration structure.
///
/// Maps directly to `~/.agentdesk/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Default responder (LLM) settings
    #[serde(default)]
    pub llm: LlmConfig,

    /// Session memory settings
    #[serde(default)]
    pub memory: MemoryConfig,

    /// Web search provider credentials
    #[serde(default)]
    pub search: SearchConfig,

    /// Calendar OAuth credentials
    #[serde(default)]
    pub calendar: CalendarConfig,

    /// HTTP gateway settings
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Planner/router settings
    #[serde(default)]
    pub router: RouterConfig,
}

/// Redact a secret for Debug output.
fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Bound on every outbound completion request.
    #[serde(default = "default_llm_timeout")]
    pub timeout_secs: u64,

    /// Force deterministic canned replies even when an API key is present.
    #[serde(default)]
    pub canned_replies: bool,
}

fn default_model() -> String {
    "gpt-4".into()
}
fn default_temperature() -> f32 {
    0.7
}
fn default_max_tokens() -> u32 {
    1024
}
fn default_api_url() -> String {
    "https://api.openai.com/v1".into()
}
fn default_llm_timeout() -> u64 {
    30
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            api_url: default_api_url(),
            timeout_secs: default_llm_timeout(),
            canned_replies: false,
        }
    }
}

impl LlmConfig {
    /// Whether completions go to a live endpoint.
    pub fn uses_network(&self) -> bool {
        self.api_key.is_some() && !self.canned_replies
    }
}

impl std::fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmConfig")
            .field("api_key", &redact(&self.api_key))
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("api_url", &self.api_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("canned_replies", &self.canned_replies)
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryConfig {
    /// Durable store URL (e.g. `sqlite:///var/lib/agentdesk/memory.db`).
    /// Unset means transient storage only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_url: Option<String>,

    /// Name of the record table inside the durable store.
    #[serde(default = "default_database_name")]
    pub database_name: String,

    /// How long the startup reachability probe may take.
    #[serde(default = "default_probe_timeout_ms")]
    pub probe_timeout_ms: u64,

    /// Per-session cap of the short-term store.
    #[serde(default = "default_max_short")]
    pub max_short_memory_size: usize,

    /// Per-session cap of the long-term store when it runs transient.
    #[serde(default = "default_max_long")]
    pub max_long_memory_size: usize,
}

fn default_database_name() -> String {
    "agentic_assistant".into()
}
fn default_probe_timeout_ms() -> u64 {
    2000
}
fn default_max_short() -> usize {
    1000
}
fn default_max_long() -> usize {
    10_000
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            database_name: default_database_name(),
            probe_timeout_ms: default_probe_timeout_ms(),
            max_short_memory_size: default_max_short(),
            max_long_memory_size: default_max_long(),
        }
    }
}

#[derive(Clone, Default, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl std::fmt::Debug for SearchConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchConfig")
            .field("api_key", &redact(&self.api_key))
            .finish()
    }
}

#[derive(Clone, Default, Serialize, Deserialize)]
pub struct CalendarConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_secret: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect_uri: Option<String>,
}

impl CalendarConfig {
    /// All three OAuth settings are present.
    pub fn is_complete(&self) -> bool {
        self.client_id.is_some() && self.client_secret.is_some() && self.redirect_uri.is_some()
    }
}

impl std::fmt::Debug for CalendarConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CalendarConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &redact(&self.client_secret))
            .field("redirect_uri", &self.redirect_uri)
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,
}

fn default_port() -> u16 {
    8000
}
fn default_host() -> String {
    "0.0.0.0".into()
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RouterConfig {
    /// Upper bound for a single agent's execution. Unset = no bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_timeout_secs: Option<u64>,
}

impl AppConfig {
    /// Load configuration from the default path (~/.agentdesk/config.toml),
    /// then apply environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;
        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
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

    /// Apply environment overrides through `lookup`.
    ///
    /// Taking the lookup as a closure keeps tests away from the process
    /// environment.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = var("OPENAI_API_KEY") {
            self.llm.api_key = Some(key);
        }
        if let Some(model) = var("OPENAI_MODEL") {
            self.llm.model = model;
        }
        if let Some(raw) = var("OPENAI_TEMPERATURE") {
            self.llm.temperature = parse_env("OPENAI_TEMPERATURE", &raw)?;
        }
        if let Some(url) = var("OPENAI_API_URL") {
            self.llm.api_url = url;
        }
        if let Some(raw) = var("AGENTDESK_CANNED_REPLIES") {
            self.llm.canned_replies = parse_env("AGENTDESK_CANNED_REPLIES", &raw)?;
        }
        if let Some(url) = var("AGENTDESK_DATABASE_URL") {
            self.memory.database_url = Some(url);
        }
        if let Some(name) = var("AGENTDESK_DATABASE_NAME") {
            self.memory.database_name = name;
        }
        if let Some(raw) = var("MAX_SHORT_MEMORY_SIZE") {
            self.memory.max_short_memory_size = parse_env("MAX_SHORT_MEMORY_SIZE", &raw)?;
        }
        if let Some(raw) = var("MAX_LONG_MEMORY_SIZE") {
            self.memory.max_long_memory_size = parse_env("MAX_LONG_MEMORY_SIZE", &raw)?;
        }
        if let Some(key) = var("SERPER_API_KEY") {
            self.search.api_key = Some(key);
        }
        if let Some(id) = var("GOOGLE_CLIENT_ID") {
            self.calendar.client_id = Some(id);
        }
        if let Some(secret) = var("GOOGLE_CLIENT_SECRET") {
            self.calendar.client_secret = Some(secret);
        }
        if let Some(uri) = var("GOOGLE_REDIRECT_URI") {
            self.calendar.redirect_uri = Some(uri);
        }
        if let Some(host) = var("AGENTDESK_HOST") {
            self.gateway.host = host;
        }
        if let Some(raw) = var("AGENTDESK_PORT") {
            self.gateway.port = parse_env("AGENTDESK_PORT", &raw)?;
        }

        Ok(())
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".agentdesk")
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return Err(ConfigError::ValidationError(
                "llm.temperature must be between 0.0 and 2.0".into(),
            ));
        }

        if !ALLOWED_MODELS.contains(&self.llm.model.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "llm.model '{}' is not one of: {}",
                self.llm.model,
                ALLOWED_MODELS.join(", ")
            )));
        }

        if self.llm.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "llm.timeout_secs must be > 0".into(),
            ));
        }

        if self.memory.max_short_memory_size == 0 || self.memory.max_long_memory_size == 0 {
            return Err(ConfigError::ValidationError(
                "memory size caps must be > 0".into(),
            ));
        }

        if !is_identifier(&self.memory.database_name) {
            return Err(ConfigError::ValidationError(format!(
                "memory.database_name '{}' must contain only letters, digits and underscores",
                self.memory.database_name
            )));
        }

        if self.router.agent_timeout_secs == Some(0) {
            return Err(ConfigError::ValidationError(
                "router.agent_timeout_secs must be > 0 when set".into(),
            ));
        }

        Ok(())
    }

    /// Generate a default config TOML string (for the `init` command).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&Self::default()).unwrap_or_default()
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidEnv {
        key: key.to_string(),
        value: raw.to_string(),
    })
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
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

    #[error("Invalid value for {key}: '{value}'")]
    InvalidEnv { key: String, value: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}
