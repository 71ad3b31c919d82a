// ABOUTME: Error re-exports from pierre-core for the program engine
// ABOUTME: Keeps crate::errors import paths stable while the taxonomy lives in the core crate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling
//!
//! `AppError` carries an [`ErrorCode`] and optional context; `ProgramError` is
//! the domain taxonomy raised by the engines and the orchestrator and converts
//! into `AppError` with `?`.

pub use pierre_core::errors::{AppError, AppResult, ErrorCode, ErrorContext, ProgramError};
