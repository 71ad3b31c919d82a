// ABOUTME: Configuration management module for the program engine
// ABOUTME: Environment-driven server, policy, and text-generation settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//! Configuration module
//!
//! All configuration is read from environment variables with documented
//! defaults:
//!
//! - **Environment**: database location and the aggregate [`ServerConfig`]
//! - **Program policy**: gate, analyzer, goal-achievement, and retry tunables
//! - **Text generation**: timeout, retry, and endpoint settings for narration

use std::env;
use std::str::FromStr;

use crate::errors::{AppError, AppResult};

/// Environment and server configuration
pub mod environment;
/// Tunable program-engine policy
pub mod program_policy;
/// Text-generation adapter settings
pub mod text_generation;

pub use environment::{DatabaseUrl, ServerConfig};
pub use program_policy::ProgramPolicy;
pub use text_generation::TextGenerationConfig;

/// Parse an environment variable, falling back to `default` when unset.
///
/// # Errors
///
/// Returns a configuration error when the variable is set but unparseable.
pub(crate) fn env_parse_or<T>(key: &str, default: T) -> AppResult<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw.trim().parse::<T>().map_err(|e| {
            AppError::config(format!("invalid value '{raw}' for {key}: {e}"))
        }),
        _ => Ok(default),
    }
}

/// Read a boolean flag (`1`, `true`, `yes`, `on` are truthy)
pub(crate) fn env_flag(key: &str, default: bool) -> bool {
    env::var(key).map_or(default, |raw| {
        matches!(
            raw.trim().to_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        )
    })
}
