// ABOUTME: Text-generation adapter configuration from environment variables
// ABOUTME: Controls the guarded narration call: endpoint, model, timeout, retries, and length limit
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::env;
use std::time::Duration;

use super::{env_flag, env_parse_or};
use crate::constants::text_generation::{
    DEFAULT_MAX_CHARS, DEFAULT_MAX_RETRIES, DEFAULT_TIMEOUT_SECS,
};
use crate::errors::AppResult;

/// Default base URL for OpenAI-compatible local servers (Ollama)
pub const DEFAULT_BASE_URL: &str = "http://localhost:11434/v1";
/// Default model name
pub const DEFAULT_MODEL: &str = "qwen2.5:14b-instruct";

/// Narration settings
#[derive(Clone, PartialEq, Eq)]
pub struct TextGenerationConfig {
    /// Whether narration calls are attempted at all
    pub enabled: bool,
    /// OpenAI-compatible base URL
    pub base_url: String,
    /// Model name
    pub model: String,
    /// Optional bearer token
    pub api_key: Option<String>,
    /// Per-attempt timeout
    pub timeout: Duration,
    /// Retries after the first attempt
    pub max_retries: u32,
    /// Longest accepted response
    pub max_chars: usize,
}

impl std::fmt::Debug for TextGenerationConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextGenerationConfig")
            .field("enabled", &self.enabled)
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("timeout", &self.timeout)
            .field("max_retries", &self.max_retries)
            .field("max_chars", &self.max_chars)
            .finish()
    }
}

impl Default for TextGenerationConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            base_url: DEFAULT_BASE_URL.to_owned(),
            model: DEFAULT_MODEL.to_owned(),
            api_key: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_retries: DEFAULT_MAX_RETRIES,
            max_chars: DEFAULT_MAX_CHARS,
        }
    }
}

impl TextGenerationConfig {
    /// Load from `PROGRAM_LLM_*` and `LOCAL_LLM_*` environment variables
    ///
    /// # Errors
    ///
    /// Returns a configuration error for unparseable numeric values.
    pub fn from_env() -> AppResult<Self> {
        Ok(Self {
            enabled: env_flag("PROGRAM_LLM_ENABLED", false),
            base_url: env::var("LOCAL_LLM_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_owned()),
            model: env::var("LOCAL_LLM_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_owned()),
            api_key: env::var("LOCAL_LLM_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty()),
            timeout: Duration::from_secs(env_parse_or(
                "PROGRAM_LLM_TIMEOUT_SECS",
                DEFAULT_TIMEOUT_SECS,
            )?),
            max_retries: env_parse_or("PROGRAM_LLM_MAX_RETRIES", DEFAULT_MAX_RETRIES)?,
            max_chars: env_parse_or("PROGRAM_LLM_MAX_CHARS", DEFAULT_MAX_CHARS)?,
        })
    }
}
