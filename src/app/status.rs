use crate::config::Config;

pub fn render_status(config: &Config) -> String {
    let api_key = if config.require_api_key().is_ok() {
        "set"
    } else {
        "not set"
    };

    [
        "◆ Skillproof status".to_string(),
        String::new(),
        format!("Version     {}", env!("CARGO_PKG_VERSION")),
        format!("Config      {}", config.config_path.display()),
        String::new(),
        format!("  Base URL       {}", config.base_url),
        format!("  API key        {api_key}"),
        format!("  Task model     {}", config.task_model),
        format!("  Chat model     {}", config.chat_model),
        format!("  Timeout        {}s", config.request_timeout_secs),
        format!(
            "  Placeholder    {}",
            if config.chat.include_placeholder_turn {
                "sent"
            } else {
                "omitted"
            }
        ),
    ]
    .join("\n")
}
