// ABOUTME: Tests for environment-driven configuration
// ABOUTME: Covers policy overrides, validation failures, narration settings, and database selection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::env;
use std::time::Duration;

use pierre_programs::config::{DatabaseUrl, ProgramPolicy, ServerConfig, TextGenerationConfig};
use pierre_programs::errors::ErrorCode;
use serial_test::serial;

const POLICY_VARS: [&str; 6] = [
    "PROGRAM_GATE_MIN_COMPLETION_PERCENT",
    "PROGRAM_ANALYZER_WINDOW",
    "PROGRAM_ANALYZER_MIN_RECORDS",
    "PROGRAM_GOAL_COMPLETION_PERCENT",
    "PROGRAM_GOAL_CONSISTENCY_PERCENT",
    "PROGRAM_MAX_WRITE_RETRIES",
];

const LLM_VARS: [&str; 7] = [
    "PROGRAM_LLM_ENABLED",
    "LOCAL_LLM_BASE_URL",
    "LOCAL_LLM_MODEL",
    "LOCAL_LLM_API_KEY",
    "PROGRAM_LLM_TIMEOUT_SECS",
    "PROGRAM_LLM_MAX_RETRIES",
    "PROGRAM_LLM_MAX_CHARS",
];

fn clear_env() {
    for key in POLICY_VARS.iter().chain(LLM_VARS.iter()) {
        env::remove_var(key);
    }
    env::remove_var("DATABASE_URL");
}

#[test]
#[serial]
fn test_policy_defaults_without_environment() {
    clear_env();
    let policy = ProgramPolicy::from_env().unwrap();
    assert_eq!(policy, ProgramPolicy::default());
    assert!((policy.gate_min_completion_percent - 60.0).abs() < f64::EPSILON);
    assert_eq!(policy.analyzer_window, 30);
    assert_eq!(policy.analyzer_min_records, 5);
    assert_eq!(policy.max_write_retries, 3);
}

#[test]
#[serial]
fn test_policy_overrides_are_applied() {
    clear_env();
    env::set_var("PROGRAM_GATE_MIN_COMPLETION_PERCENT", "75");
    env::set_var("PROGRAM_ANALYZER_WINDOW", "12");
    env::set_var("PROGRAM_MAX_WRITE_RETRIES", "5");

    let policy = ProgramPolicy::from_env().unwrap();
    assert!((policy.gate_min_completion_percent - 75.0).abs() < f64::EPSILON);
    assert_eq!(policy.analyzer_config().window_size, 12);
    assert_eq!(policy.max_write_retries, 5);
    clear_env();
}

#[test]
#[serial]
fn test_invalid_policy_values_are_config_errors() {
    clear_env();
    env::set_var("PROGRAM_GATE_MIN_COMPLETION_PERCENT", "sixty");
    let error = ProgramPolicy::from_env().unwrap_err();
    assert_eq!(error.code, ErrorCode::ConfigError);
    assert!(error.message.contains("PROGRAM_GATE_MIN_COMPLETION_PERCENT"));

    env::set_var("PROGRAM_GATE_MIN_COMPLETION_PERCENT", "140");
    assert_eq!(
        ProgramPolicy::from_env().unwrap_err().code,
        ErrorCode::ConfigError
    );
    clear_env();
}

#[test]
#[serial]
fn test_text_generation_settings() {
    clear_env();
    let defaults = TextGenerationConfig::from_env().unwrap();
    assert!(!defaults.enabled);
    assert!(defaults.api_key.is_none());

    env::set_var("PROGRAM_LLM_ENABLED", "yes");
    env::set_var("LOCAL_LLM_MODEL", "llama3.1:8b");
    env::set_var("LOCAL_LLM_API_KEY", "secret-token");
    env::set_var("PROGRAM_LLM_TIMEOUT_SECS", "4");
    env::set_var("PROGRAM_LLM_MAX_RETRIES", "0");

    let config = TextGenerationConfig::from_env().unwrap();
    assert!(config.enabled);
    assert_eq!(config.model, "llama3.1:8b");
    assert_eq!(config.timeout, Duration::from_secs(4));
    assert_eq!(config.max_retries, 0);
    let debug = format!("{config:?}");
    assert!(!debug.contains("secret-token"));
    assert!(debug.contains("[REDACTED]"));
    clear_env();
}

#[test]
#[serial]
fn test_server_config_reads_database_url() {
    clear_env();
    env::set_var("DATABASE_URL", "memory");
    let config = ServerConfig::from_env().unwrap();
    assert_eq!(config.database, DatabaseUrl::InMemory);
    assert!(config.summary().contains("narration=template"));

    env::set_var("DATABASE_URL", "mysql://localhost/programs");
    assert_eq!(
        ServerConfig::from_env().unwrap_err().code,
        ErrorCode::ConfigError
    );
    clear_env();
}
