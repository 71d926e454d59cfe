// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0

use std::time::Duration;

use dealsign::config::{Config, KeyState, fill_key, is_placeholder_key};

// ─── Default values ──────────────────────────────────────────────────────────

#[test]
fn default_config_values() {
    let config = Config::default();
    assert!(config.gemini_api_key.is_none());
    assert!(config.openai_api_key.is_none());
    assert_eq!(config.gemini_model, "gemini-2.0-flash");
    assert_eq!(config.openai_model, "gpt-3.5-turbo");
    assert!(config.gemini_base_url.is_none());
    assert!(config.openai_base_url.is_none());
    assert_eq!(config.timeout_secs, 60);
    assert!((config.temperature - 0.3).abs() < f32::EPSILON);
    assert_eq!(config.max_tokens, 200);
    assert_eq!(config.summary_fallback_chars, 500);
    assert_eq!(config.host, "0.0.0.0");
    assert_eq!(config.port, 8000);
    assert_eq!(config.call_timeout(), Duration::from_secs(60));
}

#[test]
fn default_config_is_valid() {
    assert!(Config::default().validate().is_ok());
}

// ─── TOML deserialization ────────────────────────────────────────────────────

#[test]
fn load_from_valid_toml() {
    let toml_str = r#"
gemini_api_key = "gm-abc123"
gemini_model = "gemini-1.5-pro"
openai_base_url = "http://localhost:8080/v1"
timeout_secs = 15
max_tokens = 512
port = 9000
"#;
    let config: Config = toml::from_str(toml_str).unwrap();
    assert_eq!(config.gemini_api_key.as_deref(), Some("gm-abc123"));
    assert_eq!(config.gemini_model, "gemini-1.5-pro");
    assert_eq!(
        config.openai_base_url.as_deref(),
        Some("http://localhost:8080/v1")
    );
    assert_eq!(config.timeout_secs, 15);
    assert_eq!(config.max_tokens, 512);
    assert_eq!(config.port, 9000);
    assert!(config.validate().is_ok());
}

#[test]
fn load_partial_toml_uses_defaults() {
    let config: Config = toml::from_str(r#"openai_model = "gpt-4o-mini""#).unwrap();
    assert_eq!(config.openai_model, "gpt-4o-mini");
    assert_eq!(config.gemini_model, "gemini-2.0-flash");
    assert_eq!(config.timeout_secs, 60);
    assert_eq!(config.summary_fallback_chars, 500);
}

#[test]
fn load_empty_toml_is_default() {
    let config: Config = toml::from_str("").unwrap();
    assert_eq!(config.port, 8000);
    assert_eq!(config.max_tokens, 200);
}

#[test]
fn invalid_field_type_is_rejected() {
    let result: Result<Config, _> = toml::from_str(r#"timeout_secs = "fast""#);
    assert!(result.is_err());
}

// ─── Placeholder credentials ─────────────────────────────────────────────────

#[test]
fn placeholder_keys_are_detected() {
    for key in [
        "",
        "   ",
        "your_gemini_api_key_here",
        "YOUR-API-KEY",
        "openai_key_here",
        "sk-...",
        "changeme",
        "<your-api-key>",
    ] {
        assert!(is_placeholder_key(key), "{key:?} should be a placeholder");
    }
}

#[test]
fn real_looking_keys_are_not_placeholders() {
    for key in ["AIzaSyA-1234567890abcdef", "sk-proj-abc123", "gm-test-key"] {
        assert!(!is_placeholder_key(key), "{key:?} should be usable");
    }
}

#[test]
fn placeholder_key_is_filtered_from_accessor() {
    let config = Config {
        gemini_api_key: Some("your_api_key_here".into()),
        openai_api_key: Some("sk-proj-abc123".into()),
        ..Config::default()
    };
    assert_eq!(config.gemini_key(), None);
    assert_eq!(config.gemini_key_state(), KeyState::Placeholder);
    assert_eq!(config.openai_key(), Some("sk-proj-abc123"));
    assert_eq!(config.openai_key_state(), KeyState::Configured);
}

#[test]
fn usable_fallback_key_replaces_placeholder() {
    let mut slot = Some("your_api_key_here".to_string());
    fill_key(&mut slot, Some("AIza-real-key-123".into()));
    assert_eq!(slot.as_deref(), Some("AIza-real-key-123"));
}

#[test]
fn usable_key_is_never_replaced() {
    let mut slot = Some("sk-proj-abc123".to_string());
    fill_key(&mut slot, Some("sk-proj-other".into()));
    assert_eq!(slot.as_deref(), Some("sk-proj-abc123"));
}

#[test]
fn placeholder_fallback_only_fills_missing_key() {
    let mut missing = None;
    fill_key(&mut missing, Some("changeme".into()));
    assert_eq!(missing.as_deref(), Some("changeme"));

    let mut placeholder = Some("your_api_key_here".to_string());
    fill_key(&mut placeholder, Some("changeme".into()));
    assert_eq!(placeholder.as_deref(), Some("your_api_key_here"));

    fill_key(&mut placeholder, None);
    assert_eq!(placeholder.as_deref(), Some("your_api_key_here"));
}

#[test]
fn missing_key_state() {
    assert_eq!(Config::default().gemini_key_state(), KeyState::Missing);
    assert_eq!(KeyState::Missing.to_string(), "missing");
}

// ─── Validation ──────────────────────────────────────────────────────────────

fn validation_error(config: Config) -> String {
    config
        .validate()
        .expect_err("config should be rejected")
        .to_string()
}

#[test]
fn timeout_out_of_range_is_rejected() {
    let zero = Config {
        timeout_secs: 0,
        ..Config::default()
    };
    assert!(validation_error(zero).contains("timeout_secs"));

    let huge = Config {
        timeout_secs: 3601,
        ..Config::default()
    };
    assert!(validation_error(huge).contains("timeout_secs"));
}

#[test]
fn temperature_out_of_range_is_rejected() {
    let config = Config {
        temperature: 2.5,
        ..Config::default()
    };
    assert!(validation_error(config).contains("temperature"));
}

#[test]
fn max_tokens_zero_is_rejected() {
    let config = Config {
        max_tokens: 0,
        ..Config::default()
    };
    assert!(validation_error(config).contains("max_tokens"));
}

#[test]
fn summary_window_too_small_is_rejected() {
    let config = Config {
        summary_fallback_chars: 10,
        ..Config::default()
    };
    assert!(validation_error(config).contains("summary_fallback_chars"));
}

#[test]
fn non_http_base_url_is_rejected() {
    let config = Config {
        gemini_base_url: Some("ftp://example.com/v1beta".into()),
        ..Config::default()
    };
    assert!(validation_error(config).contains("gemini_base_url"));

    let config = Config {
        openai_base_url: Some("not a url".into()),
        ..Config::default()
    };
    assert!(validation_error(config).contains("openai_base_url"));
}

#[test]
fn empty_host_is_rejected() {
    let config = Config {
        host: String::new(),
        ..Config::default()
    };
    assert!(validation_error(config).contains("host"));
}
