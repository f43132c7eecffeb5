use skillproof::config::Config;

#[test]
fn minimal_config_deserializes_with_defaults() {
    let toml = r#"
api_key = "abc"
"#;

    let parsed: Config = toml::from_str(toml).expect("minimal config should deserialize");

    assert_eq!(parsed.api_key.as_deref(), Some("abc"));
    assert_eq!(parsed.base_url, "https://api.openai.com/v1");
    assert_eq!(parsed.task_model, "o3-mini");
    assert_eq!(parsed.chat_model, "gpt-3.5-turbo");
    assert_eq!(parsed.request_timeout_secs, 120);
    assert!(parsed.chat.include_placeholder_turn);
}

#[test]
fn chat_table_can_drop_placeholder_turn() {
    let toml = r#"
chat_model = "gpt-4o-mini"

[chat]
include_placeholder_turn = false
"#;

    let parsed: Config = toml::from_str(toml).expect("chat config should deserialize");

    assert_eq!(parsed.chat_model, "gpt-4o-mini");
    assert!(!parsed.chat.include_placeholder_turn);
    assert!(parsed.validate().is_ok());
}

#[test]
fn non_http_base_url_fails_validation() {
    let toml = r#"
base_url = "ftp://example.com"
"#;

    let parsed: Config = toml::from_str(toml).expect("config should deserialize");
    let err = parsed.validate().expect_err("ftp scheme must be rejected");
    assert!(err.to_string().contains("http or https"));
}
