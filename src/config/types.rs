use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use url::Url;

pub(super) const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub(super) const DEFAULT_TASK_MODEL: &str = "o3-mini";
pub(super) const DEFAULT_CHAT_MODEL: &str = "gpt-3.5-turbo";
pub(super) const DEFAULT_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to config.toml - computed from home, not serialized
    #[serde(skip)]
    pub config_path: PathBuf,
    pub api_key: Option<String>,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Model used for the structured task request.
    #[serde(default = "default_task_model")]
    pub task_model: String,
    /// Model used for the streamed conversation.
    #[serde(default = "default_chat_model")]
    pub chat_model: String,
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default)]
    pub chat: ChatConfig,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.into()
}

fn default_task_model() -> String {
    DEFAULT_TASK_MODEL.into()
}

fn default_chat_model() -> String {
    DEFAULT_CHAT_MODEL.into()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Send the in-flight empty assistant turn as the last history entry.
    #[serde(default = "default_true")]
    pub include_placeholder_turn: bool,
}

fn default_true() -> bool {
    true
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            include_placeholder_turn: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_path: PathBuf::new(),
            api_key: None,
            base_url: default_base_url(),
            task_model: default_task_model(),
            chat_model: default_chat_model(),
            request_timeout_secs: default_timeout_secs(),
            chat: ChatConfig::default(),
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base_url = Url::parse(&self.base_url)
            .map_err(|e| ConfigError::Validation(format!("base_url {:?}: {e}", self.base_url)))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ConfigError::Validation(format!(
                "base_url must use http or https, got {}",
                base_url.scheme()
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "request_timeout_secs must be greater than zero".into(),
            ));
        }
        if self.task_model.trim().is_empty() || self.chat_model.trim().is_empty() {
            return Err(ConfigError::Validation("model names cannot be empty".into()));
        }
        Ok(())
    }

    /// The configured API key, or a fail-fast error when none is set.
    pub fn require_api_key(&self) -> Result<&str, ConfigError> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::MissingApiKey)
    }
}
