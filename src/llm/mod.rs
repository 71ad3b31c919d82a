// ABOUTME: Text-generation abstraction for optional week narration
// ABOUTME: Wraps unreliable generators with a timeout, bounded retries, and response validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Text Generation
//!
//! Narration is decoration, never a dependency: a week is always fully formed
//! from templates before any text-generation call is made.
//!
//! - **[`TextGenerator`]**: async trait for any backend that turns a prompt into text
//! - **[`GuardedGenerator`]**: per-attempt timeout, bounded retries, and validation;
//!   exhaustion maps to [`ProgramError::GenerationFailure`]
//! - **[`WeekNarrator`]**: produces the week's narrative note, falling back to a
//!   deterministic template

mod narration;
mod openai_compatible;

pub use narration::{template_narration, WeekNarrator};
pub use openai_compatible::OpenAiCompatibleGenerator;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::config::TextGenerationConfig;
use crate::errors::{AppResult, ProgramError};

/// Limits passed to a generator with each prompt
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationConstraints {
    /// Longest accepted response in characters
    pub max_chars: usize,
    /// Sampling temperature
    pub temperature: Option<f32>,
    /// Token budget hint for the backend
    pub max_tokens: Option<u32>,
}

impl GenerationConstraints {
    /// Constraints with a character limit and a proportional token budget
    #[must_use]
    pub fn with_max_chars(max_chars: usize) -> Self {
        Self {
            max_chars,
            temperature: Some(0.4),
            max_tokens: u32::try_from(max_chars / 3).ok(),
        }
    }
}

/// Any backend that turns a prompt into text
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Backend name for logging
    fn name(&self) -> &'static str;

    /// Generate text for `prompt`
    async fn generate(&self, prompt: &str, constraints: &GenerationConstraints)
        -> AppResult<String>;
}

/// Timeout, retry, and validation wrapper around a [`TextGenerator`]
#[derive(Clone)]
pub struct GuardedGenerator {
    inner: Arc<dyn TextGenerator>,
    timeout: Duration,
    max_retries: u32,
    max_chars: usize,
}

impl GuardedGenerator {
    /// Wrap `inner` with the limits from `config`
    #[must_use]
    pub fn new(inner: Arc<dyn TextGenerator>, config: &TextGenerationConfig) -> Self {
        Self {
            inner,
            timeout: config.timeout,
            max_retries: config.max_retries,
            max_chars: config.max_chars,
        }
    }

    /// Override the per-attempt timeout
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Generate with up to `1 + max_retries` attempts
    ///
    /// # Errors
    ///
    /// Returns [`ProgramError::GenerationFailure`] carrying the last failure
    /// once every attempt timed out, errored, or produced an invalid response.
    pub async fn generate(&self, prompt: &str) -> Result<String, ProgramError> {
        let constraints = GenerationConstraints::with_max_chars(self.max_chars);
        let attempts = self.max_retries.saturating_add(1);
        let mut last_failure = String::from("no attempt made");

        for attempt in 1..=attempts {
            let outcome =
                tokio::time::timeout(self.timeout, self.inner.generate(prompt, &constraints)).await;
            let failure = match outcome {
                Err(_) => format!("timed out after {}ms", self.timeout.as_millis()),
                Ok(Err(error)) => error.to_string(),
                Ok(Ok(text)) => match validate_response(&text, self.max_chars) {
                    Ok(valid) => {
                        debug!(generator = self.inner.name(), attempt, "Text generated");
                        return Ok(valid);
                    }
                    Err(reason) => reason,
                },
            };
            warn!(
                generator = self.inner.name(),
                attempt,
                attempts,
                reason = %failure,
                "Text generation attempt failed"
            );
            last_failure = failure;
        }

        Err(ProgramError::generation_failure(last_failure))
    }
}

fn validate_response(text: &str, max_chars: usize) -> Result<String, String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err("empty response".to_owned());
    }
    let length = trimmed.chars().count();
    if length > max_chars {
        return Err(format!("response of {length} chars exceeds limit of {max_chars}"));
    }
    Ok(trimmed.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_response_trims_and_limits() {
        assert_eq!(validate_response("  Go easy.  ", 20), Ok("Go easy.".to_owned()));
        assert!(validate_response("   ", 20).is_err());
        assert!(validate_response("x".repeat(21).as_str(), 20).is_err());
    }
}
