use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{Result, StudioError};

/// Top-level configuration for the Brightline backend.
///
/// Loaded from `~/.brightline/config.toml` by default, then overlaid with
/// environment variables (see [`StudioConfig::apply_env_overrides`]).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StudioConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub smtp: SmtpConfig,
    #[serde(default)]
    pub contact: ContactConfig,
    #[serde(default)]
    pub api: ApiConfig,
}

impl StudioConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: StudioConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| StudioError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }

    /// Overlay secrets and endpoints from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Overlay values from an arbitrary lookup (the environment in production).
    ///
    /// Recognized keys: `OPENAI_API_KEY`, `SMTP_HOST`, `SMTP_PORT`,
    /// `SMTP_USER`, `SMTP_PASS`, `BRIGHTLINE_PORT`. Empty values are ignored;
    /// unparseable ports are logged and ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = get("OPENAI_API_KEY") {
            self.llm.api_key = Some(key);
        }
        if let Some(host) = get("SMTP_HOST") {
            self.smtp.host = Some(host);
        }
        if let Some(port) = get("SMTP_PORT") {
            match port.trim().parse::<u16>() {
                Ok(p) => self.smtp.port = p,
                Err(_) => warn!(value = %port, "Ignoring invalid SMTP_PORT"),
            }
        }
        if let Some(user) = get("SMTP_USER") {
            self.smtp.username = Some(user);
        }
        if let Some(pass) = get("SMTP_PASS") {
            self.smtp.password = Some(pass);
        }
        if let Some(port) = get("BRIGHTLINE_PORT") {
            match port.trim().parse::<u16>() {
                Ok(p) => self.general.port = p,
                Err(_) => warn!(value = %port, "Ignoring invalid BRIGHTLINE_PORT"),
            }
        }
    }
}

/// General server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Interface to bind.
    pub host: String,
    /// HTTP port.
    pub port: u16,
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            log_level: "info".to_string(),
        }
    }
}

/// LLM provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Bearer key for the completion API. Usually supplied via `OPENAI_API_KEY`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Base URL of an OpenAI-compatible API.
    pub base_url: String,
    /// Model name.
    pub model: String,
    /// Response length cap.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f32,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Number of most recent client turns forwarded to the provider.
    pub history_window: usize,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            max_tokens: 500,
            temperature: 0.7,
            timeout_secs: 30,
            history_window: 20,
        }
    }
}

/// SMTP relay settings. Credentials are checked at send time, not startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SmtpConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    pub port: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Display name used in the `From` header.
    pub from_name: String,
    /// Sender address. Falls back to `username` when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_address: Option<String>,
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: None,
            port: 587,
            username: None,
            password: None,
            from_name: "Brightline Studio".to_string(),
            from_address: None,
        }
    }
}

impl SmtpConfig {
    /// Sender address: explicit `from_address`, else the SMTP username.
    pub fn sender_address(&self) -> Option<&str> {
        self.from_address
            .as_deref()
            .or(self.username.as_deref())
            .filter(|s| !s.is_empty())
    }
}

/// Business details used by the contact flows.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    /// Inbox receiving lead notifications.
    pub team_inbox: String,
    /// Studio name shown in emails.
    pub studio_name: String,
    /// Public website URL linked from confirmation emails.
    pub website_url: String,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            team_inbox: "hello@brightline.studio".to_string(),
            studio_name: "Brightline Studio".to_string(),
            website_url: "https://brightline.studio".to_string(),
        }
    }
}

/// HTTP surface settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Origins allowed by CORS.
    pub allowed_origins: Vec<String>,
    /// Requests per second accepted across the POST endpoints.
    pub rate_limit_per_sec: u64,
    /// Maximum JSON body size in bytes.
    pub body_limit_bytes: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "https://brightline.studio".to_string(),
            ],
            rate_limit_per_sec: 20,
            body_limit_bytes: 64 * 1024,
        }
    }
}
