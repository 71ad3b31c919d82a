// ABOUTME: Tunable program-engine policy loaded from the environment
// ABOUTME: Gate threshold, analyzer window, goal-achievement thresholds, and write retries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

use super::env_parse_or;
use crate::constants::{analyzer, gate, goal_achievement, storage};
use crate::errors::{AppError, AppResult};
use crate::intelligence::AnalyzerConfig;

/// Policy knobs for gating, analysis, and progress reporting
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProgramPolicy {
    /// Minimum completion (percent) before the next week may be generated
    pub gate_min_completion_percent: f64,
    /// Most recent completions analysed
    pub analyzer_window: usize,
    /// Completions required before patterns are emitted
    pub analyzer_min_records: usize,
    /// Overall completion (percent) required for goal achievement
    pub goal_completion_percent: f64,
    /// Mean consistency (percent) required for goal achievement
    pub goal_consistency_percent: f64,
    /// Attempts for internal read-modify-write loops
    pub max_write_retries: u32,
}

impl Default for ProgramPolicy {
    fn default() -> Self {
        Self {
            gate_min_completion_percent: gate::MIN_COMPLETION_PERCENT,
            analyzer_window: analyzer::WINDOW_SIZE,
            analyzer_min_records: analyzer::MIN_RECORDS,
            goal_completion_percent: goal_achievement::MIN_COMPLETION_PERCENT,
            goal_consistency_percent: goal_achievement::MIN_CONSISTENCY_PERCENT,
            max_write_retries: storage::DEFAULT_MAX_WRITE_RETRIES,
        }
    }
}

impl ProgramPolicy {
    /// Load policy from `PROGRAM_*` environment variables
    ///
    /// # Errors
    ///
    /// Returns a configuration error for unparseable or out-of-range values.
    pub fn from_env() -> AppResult<Self> {
        let defaults = Self::default();
        let policy = Self {
            gate_min_completion_percent: env_parse_or(
                "PROGRAM_GATE_MIN_COMPLETION_PERCENT",
                defaults.gate_min_completion_percent,
            )?,
            analyzer_window: env_parse_or("PROGRAM_ANALYZER_WINDOW", defaults.analyzer_window)?,
            analyzer_min_records: env_parse_or(
                "PROGRAM_ANALYZER_MIN_RECORDS",
                defaults.analyzer_min_records,
            )?,
            goal_completion_percent: env_parse_or(
                "PROGRAM_GOAL_COMPLETION_PERCENT",
                defaults.goal_completion_percent,
            )?,
            goal_consistency_percent: env_parse_or(
                "PROGRAM_GOAL_CONSISTENCY_PERCENT",
                defaults.goal_consistency_percent,
            )?,
            max_write_retries: env_parse_or(
                "PROGRAM_MAX_WRITE_RETRIES",
                defaults.max_write_retries,
            )?,
        };
        policy.validate()?;
        Ok(policy)
    }

    /// Check ranges
    ///
    /// # Errors
    ///
    /// Returns a configuration error describing the first invalid value.
    pub fn validate(&self) -> AppResult<()> {
        for (name, value) in [
            ("gate_min_completion_percent", self.gate_min_completion_percent),
            ("goal_completion_percent", self.goal_completion_percent),
            ("goal_consistency_percent", self.goal_consistency_percent),
        ] {
            if !(0.0..=100.0).contains(&value) {
                return Err(AppError::config(format!(
                    "{name} must be between 0 and 100, got {value}"
                )));
            }
        }
        if self.analyzer_min_records == 0 || self.analyzer_window < self.analyzer_min_records {
            return Err(AppError::config(format!(
                "analyzer window ({}) must be at least min records ({}) and min records must be positive",
                self.analyzer_window, self.analyzer_min_records
            )));
        }
        if self.max_write_retries == 0 {
            return Err(AppError::config("max_write_retries must be at least 1"));
        }
        Ok(())
    }

    /// Analyzer configuration derived from this policy
    #[must_use]
    pub const fn analyzer_config(&self) -> AnalyzerConfig {
        AnalyzerConfig {
            window_size: self.analyzer_window,
            min_records: self.analyzer_min_records,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_is_valid() {
        assert!(ProgramPolicy::default().validate().is_ok());
    }

    #[test]
    fn test_window_smaller_than_minimum_is_rejected() {
        let policy = ProgramPolicy {
            analyzer_window: 3,
            ..ProgramPolicy::default()
        };
        assert!(policy.validate().is_err());
    }
}
