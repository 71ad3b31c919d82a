// ABOUTME: Unified error handling for the adaptive program engine
// ABOUTME: Defines ErrorCode, AppError, and conversions from storage and serialization errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling System
//!
//! Every fallible operation in the program engine returns [`AppResult`]. Errors
//! carry an [`ErrorCode`] that maps onto an HTTP status so any transport layer can
//! render them consistently. Domain failures are modelled first as
//! [`ProgramError`] and converted at the service boundary.

mod program;

pub use program::ProgramError;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Standard error codes used throughout the program engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    // Validation (3000-3999)
    /// Request payload failed validation
    #[serde(rename = "INVALID_INPUT")]
    InvalidInput = 3000,
    /// Goal target date cannot be turned into a training window
    #[serde(rename = "INVALID_GOAL_WINDOW")]
    InvalidGoalWindow = 3001,

    // Resource Management (4000-4999)
    /// Program (or other resource) does not exist for this user
    #[serde(rename = "RESOURCE_NOT_FOUND")]
    ResourceNotFound = 4000,
    /// Program exists but is paused, completed, or archived
    #[serde(rename = "PROGRAM_NOT_ACTIVE")]
    ProgramNotActive = 4001,
    /// Versioned write lost a race against another writer
    #[serde(rename = "CONCURRENT_MODIFICATION")]
    ConcurrentModification = 4002,
    /// Exercise id missing from the catalog
    #[serde(rename = "EXERCISE_NOT_FOUND")]
    ExerciseNotFound = 4004,
    /// Not enough completion history for analysis
    #[serde(rename = "INSUFFICIENT_DATA")]
    InsufficientData = 4005,

    // External Services (5000-5999)
    /// External service returned an error
    #[serde(rename = "EXTERNAL_SERVICE_ERROR")]
    ExternalServiceError = 5000,
    /// Text generation timed out, failed, or returned malformed output
    #[serde(rename = "GENERATION_FAILURE")]
    GenerationFailure = 5001,

    // Configuration (6000-6999)
    /// Configuration is missing or invalid
    #[serde(rename = "CONFIG_ERROR")]
    ConfigError = 6000,

    // Internal Errors (9000-9999)
    /// Unexpected internal failure
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError = 9000,
    /// Storage backend failure
    #[serde(rename = "DATABASE_ERROR")]
    DatabaseError = 9001,
    /// Document (de)serialization failure
    #[serde(rename = "SERIALIZATION_ERROR")]
    SerializationError = 9003,
}

impl ErrorCode {
    /// Get the HTTP status code for this error
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        match self {
            // 400 Bad Request
            Self::InvalidInput | Self::InvalidGoalWindow => 400,

            // 404 Not Found
            Self::ResourceNotFound | Self::ExerciseNotFound => 404,

            // 409 Conflict
            Self::ProgramNotActive | Self::ConcurrentModification => 409,

            // 422 Unprocessable Entity
            Self::InsufficientData => 422,

            // 502 Bad Gateway
            Self::ExternalServiceError => 502,

            // 504 Gateway Timeout
            Self::GenerationFailure => 504,

            // 500 Internal Server Error
            Self::ConfigError
            | Self::InternalError
            | Self::DatabaseError
            | Self::SerializationError => 500,
        }
    }

    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::InvalidInput => "The provided input is invalid",
            Self::InvalidGoalWindow => "The goal target date does not leave a usable training window",
            Self::ResourceNotFound => "The requested resource was not found",
            Self::ProgramNotActive => "The program is not active",
            Self::ConcurrentModification => {
                "The program was modified concurrently; re-read and retry"
            }
            Self::ExerciseNotFound => "The exercise was not found in the catalog",
            Self::InsufficientData => "Not enough workout history for analysis",
            Self::ExternalServiceError => "An external service encountered an error",
            Self::GenerationFailure => "Text generation failed or timed out",
            Self::ConfigError => "Configuration error encountered",
            Self::InternalError => "An internal error occurred",
            Self::DatabaseError => "Database operation failed",
            Self::SerializationError => "Data serialization/deserialization failed",
        }
    }
}

/// Additional context that can be attached to errors
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorContext {
    /// User ID if available
    pub user_id: Option<Uuid>,
    /// Resource ID if applicable
    pub resource_id: Option<String>,
    /// Additional key-value context
    pub details: Option<serde_json::Value>,
}

/// Unified error type for the application
#[derive(Debug, Error)]
#[error("{}: {message}", .code.description())]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Additional context
    pub context: ErrorContext,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    /// Add a user ID to the error context
    #[must_use]
    pub const fn with_user_id(mut self, user_id: Uuid) -> Self {
        self.context.user_id = Some(user_id);
        self
    }

    /// Add a resource ID to the error context
    #[must_use]
    pub fn with_resource_id(mut self, resource_id: impl Into<String>) -> Self {
        self.context.resource_id = Some(resource_id.into());
        self
    }

    /// Add details to the error context
    #[must_use]
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.context.details = Some(details);
        self
    }

    /// Get the HTTP status code for this error
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        self.code.http_status()
    }

    /// Resource not found
    #[must_use]
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ResourceNotFound,
            format!("{} not found", resource.into()),
        )
    }

    /// Invalid input
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Internal error
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Database error
    #[must_use]
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DatabaseError, message)
    }

    /// Configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }

    /// External service error
    #[must_use]
    pub fn external_service(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ExternalServiceError,
            format!("{}: {}", service.into(), message.into()),
        )
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::new(ErrorCode::SerializationError, error.to_string())
    }
}

#[cfg(feature = "database-errors")]
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> Self {
        Self::database(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_http_status() {
        assert_eq!(ErrorCode::ResourceNotFound.http_status(), 404);
        assert_eq!(ErrorCode::ConcurrentModification.http_status(), 409);
        assert_eq!(ErrorCode::InvalidGoalWindow.http_status(), 400);
        assert_eq!(ErrorCode::InternalError.http_status(), 500);
    }
}
