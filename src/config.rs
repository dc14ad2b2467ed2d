use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

use crate::clients::gemini::{DEFAULT_API_BASE, DEFAULT_MODEL};
use crate::error::{QuickAnswerError, Result};

const DEFAULT_CONFIG_PATH: &str = "quick_answer.toml";

/// Main configuration structure loaded from quick_answer.toml and environment variables
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub llm: LlmConfig,
    /// Secrets and other values that only ever come from the environment
    #[serde(skip)]
    pub runtime: RuntimeConfig,
}

/// HTTP listener configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 5000)),
        }
    }
}

/// Remote model selection
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LlmConfig {
    pub provider: String,
    pub model: String,
    pub api_base: String,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "gemini".to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }
}

/// Runtime configuration loaded from environment variables
#[derive(Clone, Default)]
pub struct RuntimeConfig {
    pub gemini_api_key: Option<String>,
}

impl std::fmt::Debug for RuntimeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuntimeConfig")
            .field(
                "gemini_api_key",
                &self.gemini_api_key.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

impl RuntimeConfig {
    /// Load runtime configuration from environment variables
    pub fn load_from_env() -> Self {
        Self::from_lookup(env_lookup)
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            gemini_api_key: non_empty("GEMINI_API_KEY").or_else(|| non_empty("GOOGLE_API_KEY")),
        }
    }
}

fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

impl Config {
    /// Load environment files: QA_ENV_FILE if set, otherwise ./.env.
    /// Variables already present in the process environment are never overridden,
    /// so this is safe to call more than once.
    pub fn load_env_files() {
        if let Ok(env_path) = std::env::var("QA_ENV_FILE") {
            if let Err(e) = dotenvy::from_path(&env_path) {
                tracing::warn!("Could not load env file {}: {}", env_path, e);
            }
        } else {
            let _ = dotenvy::from_path(".env");
        }
    }

    /// Load configuration from TOML file and environment variables
    /// Uses QUICK_ANSWER_CONFIG environment variable or defaults to "quick_answer.toml"
    pub fn load() -> Result<Self> {
        Self::load_env_files();
        match std::env::var("QUICK_ANSWER_CONFIG") {
            Ok(path) => Self::load_file(&path, true),
            Err(_) => Self::load_file(DEFAULT_CONFIG_PATH, false),
        }
    }

    /// Load from an explicit TOML path, which must be readable.
    pub fn load_from(config_path: &str) -> Result<Self> {
        Self::load_env_files();
        Self::load_file(config_path, true)
    }

    /// Read the TOML file, then apply env overrides and validate. Only an
    /// implicit path may be missing.
    fn load_file(config_path: &str, required: bool) -> Result<Self> {
        let mut config = match std::fs::read_to_string(config_path) {
            Ok(content) => Self::from_toml_str(&content)?,
            Err(e) if !required && e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!("Config file {} not found, using defaults", config_path);
                Self::default()
            }
            Err(e) => {
                return Err(QuickAnswerError::Config {
                    message: format!("Failed to read config file {}: {}", config_path, e),
                });
            }
        };

        config.apply_env_overrides();
        config.runtime = RuntimeConfig::load_from_env();
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Env-first overrides for the listener and the model.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(env_lookup);
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(v) = lookup("QA_HTTP_BIND") {
            match v.parse::<SocketAddr>() {
                Ok(bind) => {
                    self.server.bind = bind;
                    tracing::debug!("QA_HTTP_BIND env override applied");
                }
                Err(_) => tracing::warn!("Ignoring invalid QA_HTTP_BIND '{}'", v),
            }
        }
        // Hosting platforms hand out HOST/PORT
        if let Some(host) = lookup("HOST").and_then(|h| h.parse::<std::net::IpAddr>().ok()) {
            self.server.bind.set_ip(host);
        }
        if let Some(port) = lookup("PORT").and_then(|p| p.parse::<u16>().ok()) {
            self.server.bind.set_port(port);
        }

        if let Some(model) = lookup("QA_LLM_MODEL")
            .filter(|m| !m.trim().is_empty())
            .or_else(|| lookup("GEMINI_MODEL").filter(|m| !m.trim().is_empty()))
        {
            self.llm.model = model;
        }
        if let Some(base) = lookup("QA_LLM_API_BASE").filter(|b| !b.trim().is_empty()) {
            self.llm.api_base = base;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.llm.provider != "gemini" {
            return Err(QuickAnswerError::Config {
                message: format!(
                    "Unsupported LLM provider '{}' (only 'gemini' is available)",
                    self.llm.provider
                ),
            });
        }
        if self.llm.model.trim().is_empty() {
            return Err(QuickAnswerError::Config {
                message: "llm.model must not be empty".to_string(),
            });
        }
        if !self.llm.api_base.starts_with("http://") && !self.llm.api_base.starts_with("https://")
        {
            return Err(QuickAnswerError::Config {
                message: format!(
                    "llm.api_base '{}' must start with http:// or https://",
                    self.llm.api_base
                ),
            });
        }
        Ok(())
    }
}
