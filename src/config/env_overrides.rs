use super::Config;

const API_KEY_VAR: &str = "SKILLPROOF_API_KEY";
const FALLBACK_API_KEY_VAR: &str = "OPENAI_API_KEY";
const BASE_URL_VAR: &str = "SKILLPROOF_BASE_URL";
const TASK_MODEL_VAR: &str = "SKILLPROOF_TASK_MODEL";
const CHAT_MODEL_VAR: &str = "SKILLPROOF_CHAT_MODEL";
const TIMEOUT_VAR: &str = "SKILLPROOF_TIMEOUT_SECS";

/// Every environment variable [`Config::apply_env_overrides`] reads.
#[cfg(test)]
pub(super) const OVERRIDE_VARS: [&str; 6] = [
    API_KEY_VAR,
    FALLBACK_API_KEY_VAR,
    BASE_URL_VAR,
    TASK_MODEL_VAR,
    CHAT_MODEL_VAR,
    TIMEOUT_VAR,
];

impl Config {
    pub fn apply_env_overrides(&mut self) {
        if let Ok(key) =
            std::env::var(API_KEY_VAR).or_else(|_| std::env::var(FALLBACK_API_KEY_VAR))
            && !key.trim().is_empty()
        {
            self.api_key = Some(key);
        }

        if let Ok(base_url) = std::env::var(BASE_URL_VAR)
            && !base_url.is_empty()
        {
            self.base_url = base_url.trim_end_matches('/').to_string();
        }

        if let Ok(model) = std::env::var(TASK_MODEL_VAR)
            && !model.is_empty()
        {
            self.task_model = model;
        }

        if let Ok(model) = std::env::var(CHAT_MODEL_VAR)
            && !model.is_empty()
        {
            self.chat_model = model;
        }

        if let Ok(timeout_str) = std::env::var(TIMEOUT_VAR)
            && let Ok(timeout) = timeout_str.parse::<u64>()
            && timeout > 0
        {
            self.request_timeout_secs = timeout;
        }
    }
}
