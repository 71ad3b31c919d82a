// ABOUTME: Service layer sequencing the program engines over persistent storage
// ABOUTME: Completion bookkeeping and the program orchestrator used by the CLI and tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Domain service layer
//!
//! The engines in [`crate::intelligence`] are pure; these services own the
//! read-modify-write sequencing, versioned persistence, and logging around them.

/// Completion upserts, weekly summary recompute, and pattern persistence
pub mod completion_store;

/// Program lifecycle, week generation, and week interaction
pub mod program_orchestrator;

pub use completion_store::{CompletionInput, CompletionStore, SavedCompletion};
pub use program_orchestrator::{
    GenerationOutcome, ProgramOrchestrator, ProgramProgress, WeekInsights,
};
