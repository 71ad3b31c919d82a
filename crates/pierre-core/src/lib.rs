// ABOUTME: Core types and constants for the Pierre adaptive program engine
// ABOUTME: Foundation crate with program models, error handling, and tunable constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Pierre Core
//!
//! Foundation crate providing shared types and constants for the Pierre adaptive
//! training program engine. This crate is designed to change infrequently, enabling
//! incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `ProgramError`
//! - **constants**: Thresholds and caps used by the program engines, grouped by domain
//! - **models**: Programs, frameworks, weeks, workouts, completions, and patterns

/// Unified error handling system with standard error codes and HTTP status mapping
pub mod errors;

/// Program engine constants organized by domain
pub mod constants;

/// Core data models (Program, `TrainingWeek`, `WorkoutCompletion`, etc.)
pub mod models;
