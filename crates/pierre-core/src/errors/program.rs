// ABOUTME: Program-engine domain errors mirroring the progression error taxonomy
// ABOUTME: Provides structured errors that convert into the main AppError system
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Program Error Types
//!
//! Provides structured error types for program-engine operations:
//! - `ProgramError` - failures raised by the engines and the orchestrator
//! - Conversion to `AppError` for transport-level formatting
//!
//! Only `ProgramNotFound`, `ProgramNotActive`, and `ConcurrentModification` are
//! surfaced as hard failures by the orchestrator. The remaining variants are
//! caught internally and degraded to a usable result.

use std::error::Error;
use std::fmt;

use uuid::Uuid;

use super::{AppError, ErrorCode};
use crate::models::ProgramStatus;

/// Errors specific to program operations
#[derive(Debug, Clone)]
pub enum ProgramError {
    /// No program with this id for this user
    ProgramNotFound {
        /// Requested program
        program_id: Uuid,
    },
    /// Program is paused, completed, or archived
    ProgramNotActive {
        /// Program
        program_id: Uuid,
        /// Status found
        status: ProgramStatus,
    },
    /// Target date unusable
    InvalidGoalWindow {
        /// Why the window was rejected
        reason: String,
    },
    /// Analyzer window too small
    InsufficientData {
        /// Records available
        available: usize,
        /// Records required
        required: usize,
    },
    /// Versioned write lost a race
    ConcurrentModification {
        /// Program
        program_id: Uuid,
        /// Version the writer expected
        expected_version: i64,
    },
    /// Text generation exhausted retries or timed out
    GenerationFailure {
        /// Last failure
        reason: String,
    },
    /// Catalog miss
    ExerciseNotFound {
        /// Missing id
        exercise_id: String,
    },
    /// Payload validation failure
    InvalidInput {
        /// What was wrong
        message: String,
    },
}

impl ProgramError {
    /// Create an "invalid input" error
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Create an "invalid goal window" error
    #[must_use]
    pub fn invalid_goal_window(reason: impl Into<String>) -> Self {
        Self::InvalidGoalWindow {
            reason: reason.into(),
        }
    }

    /// Create an "exercise not found" error
    #[must_use]
    pub fn exercise_not_found(exercise_id: impl Into<String>) -> Self {
        Self::ExerciseNotFound {
            exercise_id: exercise_id.into(),
        }
    }

    /// Create a "generation failure" error
    #[must_use]
    pub fn generation_failure(reason: impl Into<String>) -> Self {
        Self::GenerationFailure {
            reason: reason.into(),
        }
    }

    /// Error code for this failure
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::ProgramNotFound { .. } => ErrorCode::ResourceNotFound,
            Self::ProgramNotActive { .. } => ErrorCode::ProgramNotActive,
            Self::InvalidGoalWindow { .. } => ErrorCode::InvalidGoalWindow,
            Self::InsufficientData { .. } => ErrorCode::InsufficientData,
            Self::ConcurrentModification { .. } => ErrorCode::ConcurrentModification,
            Self::GenerationFailure { .. } => ErrorCode::GenerationFailure,
            Self::ExerciseNotFound { .. } => ErrorCode::ExerciseNotFound,
            Self::InvalidInput { .. } => ErrorCode::InvalidInput,
        }
    }
}

impl fmt::Display for ProgramError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ProgramNotFound { program_id } => {
                write!(f, "Program {program_id} not found")
            }
            Self::ProgramNotActive { program_id, status } => {
                write!(f, "Program {program_id} is {status}, not active")
            }
            Self::InvalidGoalWindow { reason } => {
                write!(f, "Invalid goal window: {reason}")
            }
            Self::InsufficientData {
                available,
                required,
            } => {
                write!(
                    f,
                    "Insufficient data: {available} completions available, {required} required"
                )
            }
            Self::ConcurrentModification {
                program_id,
                expected_version,
            } => {
                write!(
                    f,
                    "Program {program_id} changed since version {expected_version}"
                )
            }
            Self::GenerationFailure { reason } => {
                write!(f, "Text generation failed: {reason}")
            }
            Self::ExerciseNotFound { exercise_id } => {
                write!(f, "Exercise '{exercise_id}' not found in catalog")
            }
            Self::InvalidInput { message } => f.write_str(message),
        }
    }
}

impl Error for ProgramError {}

impl From<ProgramError> for AppError {
    fn from(error: ProgramError) -> Self {
        let code = error.code();
        let app_error = Self::new(code, error.to_string());
        match error {
            ProgramError::ProgramNotFound { program_id }
            | ProgramError::ProgramNotActive { program_id, .. }
            | ProgramError::ConcurrentModification { program_id, .. } => {
                app_error.with_resource_id(program_id.to_string())
            }
            ProgramError::ExerciseNotFound { exercise_id } => {
                app_error.with_resource_id(exercise_id)
            }
            ProgramError::InvalidGoalWindow { .. }
            | ProgramError::InsufficientData { .. }
            | ProgramError::GenerationFailure { .. }
            | ProgramError::InvalidInput { .. } => app_error,
        }
    }
}
