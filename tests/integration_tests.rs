//! Integration tests for configuration and backend selection.
//!
//! These tests mutate process environment variables and therefore run
//! serially.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::env;

use scenario_timeline::config::{BackendConfig, Config, LogFormat};
use scenario_timeline::error::ConfigError;
use scenario_timeline::gateway::{ModelGateway, HOSTED_BACKEND, LOCAL_BACKEND, NO_BACKEND};
use serial_test::serial;

// ============================================================================
// Test Utilities
// ============================================================================

const VARS: &[&str] = &[
    "OPENAI_API_KEY",
    "OPENAI_MODEL",
    "OPENAI_BASE_URL",
    "API_URL",
    "MODEL_NAME",
    "CLI_MODE",
    "HOST",
    "PORT",
    "LOG_DIR",
    "STATIC_DIR",
    "LOG_LEVEL",
    "LOG_FORMAT",
    "REQUEST_TIMEOUT_MS",
    "SCENARIO_TTL_SECS",
];

fn clear_env() {
    for var in VARS {
        env::remove_var(var);
    }
}

// ============================================================================
// Backend Selection
// ============================================================================

#[test]
#[serial]
fn test_defaults_without_backend() {
    clear_env();

    let config = Config::from_env().unwrap();
    assert_eq!(config.bind_addr(), "127.0.0.1:3003");
    assert_eq!(config.log_dir, "./logs");
    assert_eq!(config.log_format, LogFormat::Text);
    assert!(!config.cli_mode);
    assert!(config.backend().is_none());

    let gateway = ModelGateway::from_config(&config).unwrap();
    assert_eq!(gateway.backend_name(), NO_BACKEND);
}

#[test]
#[serial]
fn test_hosted_backend_wins_over_local() {
    clear_env();
    env::set_var("OPENAI_API_KEY", "sk-test");
    env::set_var("OPENAI_MODEL", "gpt-4o-mini");
    env::set_var("API_URL", "http://localhost:11434/api/generate");

    let config = Config::from_env().unwrap();
    assert!(matches!(config.backend(), Some(BackendConfig::Hosted { .. })));
    assert_eq!(
        ModelGateway::from_config(&config).unwrap().backend_name(),
        HOSTED_BACKEND
    );

    clear_env();
}

#[test]
#[serial]
fn test_key_without_model_falls_back_to_local() {
    clear_env();
    env::set_var("OPENAI_API_KEY", "sk-test");
    env::set_var("API_URL", "http://localhost:11434/api/generate");
    env::set_var("MODEL_NAME", "llama3");

    let config = Config::from_env().unwrap();
    match config.backend() {
        Some(BackendConfig::Local { url, model }) => {
            assert_eq!(url, "http://localhost:11434/api/generate");
            assert_eq!(model.as_deref(), Some("llama3"));
        }
        other => unreachable!("expected local backend, got {other:?}"),
    }
    assert_eq!(
        ModelGateway::from_config(&config).unwrap().backend_name(),
        LOCAL_BACKEND
    );

    clear_env();
}

// ============================================================================
// Validation
// ============================================================================

#[test]
#[serial]
fn test_invalid_port_is_rejected() {
    clear_env();
    env::set_var("PORT", "not-a-port");

    let err = Config::from_env().unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { ref var, .. } if var == "PORT"));

    clear_env();
}

#[test]
#[serial]
fn test_unknown_log_format_is_rejected() {
    clear_env();
    env::set_var("LOG_FORMAT", "yaml");

    let err = Config::from_env().unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { ref var, .. } if var == "LOG_FORMAT"));

    clear_env();
}

#[test]
#[serial]
fn test_cli_mode_requires_literal_true() {
    clear_env();
    env::set_var("CLI_MODE", "yes");
    assert!(!Config::from_env().unwrap().cli_mode);

    env::set_var("CLI_MODE", "true");
    assert!(Config::from_env().unwrap().cli_mode);

    clear_env();
}
