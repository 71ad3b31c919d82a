// ABOUTME: Persistence abstraction for programs, completions, summaries, patterns, and audit records
// ABOUTME: Defines the ProgramRepository trait implemented by the in-memory and SQLite plugins
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Database plugin architecture
//!
//! Programs are stored as versioned documents keyed by `(user_id, program_id)`.
//! Every program write is conditional on the version the writer read; a
//! mismatch fails with `ConcurrentModification` and the caller re-reads.

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::{AppError, AppResult, ProgramError};
use crate::models::{
    GenerationAuditRecord, PerformancePattern, Program, WeeklyCompletionSummary, WorkoutCompletion,
};

/// Backend selection from the configured database URL
pub mod factory;
/// `DashMap`-backed store for tests and ephemeral runs
pub mod memory;
/// `SQLite` store using JSON documents and versioned updates
pub mod sqlite;

/// A program together with the version it was read at
#[derive(Debug, Clone)]
pub struct VersionedProgram {
    /// Stored document
    pub program: Program,
    /// Version for conditional writes; starts at 1
    pub version: i64,
}

/// Storage operations used by the completion store and the orchestrator
#[async_trait]
pub trait ProgramRepository: Send + Sync {
    /// Create tables (no-op for backends without a schema)
    async fn migrate(&self) -> AppResult<()>;

    // ================================
    // Programs
    // ================================

    /// Insert a new program at version 1
    async fn create_program(&self, program: &Program) -> AppResult<VersionedProgram>;

    /// Get a program owned by `user_id`
    async fn get_program(
        &self,
        user_id: Uuid,
        program_id: Uuid,
    ) -> AppResult<Option<VersionedProgram>>;

    /// All programs owned by `user_id`, newest first
    async fn list_programs(&self, user_id: Uuid) -> AppResult<Vec<Program>>;

    /// Replace a program if its stored version still equals `expected_version`.
    ///
    /// Returns the new version. Fails with `ConcurrentModification` when the
    /// stored version moved on and with `ResourceNotFound` when the program is gone.
    async fn update_program(&self, program: &Program, expected_version: i64) -> AppResult<i64>;

    // ================================
    // Completions
    // ================================

    /// Insert or overwrite the completion for its composite key; returns the key
    async fn upsert_completion(&self, completion: &WorkoutCompletion) -> AppResult<String>;

    /// Completions recorded for one week
    async fn get_week_completions(
        &self,
        program_id: Uuid,
        week_number: u32,
    ) -> AppResult<Vec<WorkoutCompletion>>;

    /// Most recent completions for a program, newest first
    async fn get_recent_completions(
        &self,
        program_id: Uuid,
        limit: usize,
    ) -> AppResult<Vec<WorkoutCompletion>>;

    // ================================
    // Derived records
    // ================================

    /// Store (replace) the summary for its week
    async fn save_weekly_summary(&self, summary: &WeeklyCompletionSummary) -> AppResult<()>;

    /// Summary for one week
    async fn get_weekly_summary(
        &self,
        program_id: Uuid,
        week_number: u32,
    ) -> AppResult<Option<WeeklyCompletionSummary>>;

    /// Every stored summary for a program, ordered by week
    async fn list_weekly_summaries(&self, program_id: Uuid)
        -> AppResult<Vec<WeeklyCompletionSummary>>;

    /// Append write-once pattern records
    async fn save_patterns(&self, patterns: &[PerformancePattern]) -> AppResult<()>;

    /// Most recent patterns for a program, newest first
    async fn get_patterns(&self, program_id: Uuid, limit: usize)
        -> AppResult<Vec<PerformancePattern>>;

    /// Append a generation audit record
    async fn record_generation_audit(&self, record: &GenerationAuditRecord) -> AppResult<()>;

    /// Generation audit trail for a program, oldest first
    async fn list_generation_audit(&self, program_id: Uuid)
        -> AppResult<Vec<GenerationAuditRecord>>;
}

pub(crate) fn not_found(program_id: Uuid) -> AppError {
    ProgramError::ProgramNotFound { program_id }.into()
}

pub(crate) fn conflict(program_id: Uuid, expected_version: i64) -> AppError {
    ProgramError::ConcurrentModification {
        program_id,
        expected_version,
    }
    .into()
}
