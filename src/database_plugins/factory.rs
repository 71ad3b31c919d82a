// ABOUTME: Database factory selecting the in-memory or SQLite program store at runtime
// ABOUTME: The Database enum delegates every ProgramRepository call to the selected backend
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Database factory for creating program stores from a [`DatabaseUrl`]

use async_trait::async_trait;
use tracing::info;
use uuid::Uuid;

use super::memory::InMemoryDatabase;
use super::sqlite::SqliteDatabase;
use super::{ProgramRepository, VersionedProgram};
use crate::config::DatabaseUrl;
use crate::errors::AppResult;
use crate::models::{
    GenerationAuditRecord, PerformancePattern, Program, WeeklyCompletionSummary, WorkoutCompletion,
};

/// Database instance wrapper that delegates to the appropriate implementation
#[derive(Clone)]
pub enum Database {
    /// Process-local maps
    Memory(InMemoryDatabase),
    /// SQLite file or in-memory SQLite
    SQLite(SqliteDatabase),
}

impl Database {
    /// Create the backend named by `url`
    ///
    /// # Errors
    ///
    /// Returns an error if the SQLite database cannot be opened or migrated.
    pub async fn new(url: &DatabaseUrl) -> AppResult<Self> {
        match url {
            DatabaseUrl::InMemory => {
                info!("Initializing in-memory program store");
                Ok(Self::Memory(InMemoryDatabase::new()))
            }
            DatabaseUrl::SqliteMemory | DatabaseUrl::Sqlite { .. } => {
                info!(database = %url, "Initializing SQLite program store");
                Ok(Self::SQLite(SqliteDatabase::new(url).await?))
            }
        }
    }

    /// Get a descriptive string for the current database backend
    #[must_use]
    pub const fn backend_info(&self) -> &'static str {
        match self {
            Self::Memory(_) => "In-memory (no persistence)",
            Self::SQLite(_) => "SQLite",
        }
    }
}

#[async_trait]
impl ProgramRepository for Database {
    async fn migrate(&self) -> AppResult<()> {
        match self {
            Self::Memory(db) => db.migrate().await,
            Self::SQLite(db) => db.migrate().await,
        }
    }

    async fn create_program(&self, program: &Program) -> AppResult<VersionedProgram> {
        match self {
            Self::Memory(db) => db.create_program(program).await,
            Self::SQLite(db) => db.create_program(program).await,
        }
    }

    async fn get_program(
        &self,
        user_id: Uuid,
        program_id: Uuid,
    ) -> AppResult<Option<VersionedProgram>> {
        match self {
            Self::Memory(db) => db.get_program(user_id, program_id).await,
            Self::SQLite(db) => db.get_program(user_id, program_id).await,
        }
    }

    async fn list_programs(&self, user_id: Uuid) -> AppResult<Vec<Program>> {
        match self {
            Self::Memory(db) => db.list_programs(user_id).await,
            Self::SQLite(db) => db.list_programs(user_id).await,
        }
    }

    async fn update_program(&self, program: &Program, expected_version: i64) -> AppResult<i64> {
        match self {
            Self::Memory(db) => db.update_program(program, expected_version).await,
            Self::SQLite(db) => db.update_program(program, expected_version).await,
        }
    }

    async fn upsert_completion(&self, completion: &WorkoutCompletion) -> AppResult<String> {
        match self {
            Self::Memory(db) => db.upsert_completion(completion).await,
            Self::SQLite(db) => db.upsert_completion(completion).await,
        }
    }

    async fn get_week_completions(
        &self,
        program_id: Uuid,
        week_number: u32,
    ) -> AppResult<Vec<WorkoutCompletion>> {
        match self {
            Self::Memory(db) => db.get_week_completions(program_id, week_number).await,
            Self::SQLite(db) => db.get_week_completions(program_id, week_number).await,
        }
    }

    async fn get_recent_completions(
        &self,
        program_id: Uuid,
        limit: usize,
    ) -> AppResult<Vec<WorkoutCompletion>> {
        match self {
            Self::Memory(db) => db.get_recent_completions(program_id, limit).await,
            Self::SQLite(db) => db.get_recent_completions(program_id, limit).await,
        }
    }

    async fn save_weekly_summary(&self, summary: &WeeklyCompletionSummary) -> AppResult<()> {
        match self {
            Self::Memory(db) => db.save_weekly_summary(summary).await,
            Self::SQLite(db) => db.save_weekly_summary(summary).await,
        }
    }

    async fn get_weekly_summary(
        &self,
        program_id: Uuid,
        week_number: u32,
    ) -> AppResult<Option<WeeklyCompletionSummary>> {
        match self {
            Self::Memory(db) => db.get_weekly_summary(program_id, week_number).await,
            Self::SQLite(db) => db.get_weekly_summary(program_id, week_number).await,
        }
    }

    async fn list_weekly_summaries(
        &self,
        program_id: Uuid,
    ) -> AppResult<Vec<WeeklyCompletionSummary>> {
        match self {
            Self::Memory(db) => db.list_weekly_summaries(program_id).await,
            Self::SQLite(db) => db.list_weekly_summaries(program_id).await,
        }
    }

    async fn save_patterns(&self, patterns: &[PerformancePattern]) -> AppResult<()> {
        match self {
            Self::Memory(db) => db.save_patterns(patterns).await,
            Self::SQLite(db) => db.save_patterns(patterns).await,
        }
    }

    async fn get_patterns(
        &self,
        program_id: Uuid,
        limit: usize,
    ) -> AppResult<Vec<PerformancePattern>> {
        match self {
            Self::Memory(db) => db.get_patterns(program_id, limit).await,
            Self::SQLite(db) => db.get_patterns(program_id, limit).await,
        }
    }

    async fn record_generation_audit(&self, record: &GenerationAuditRecord) -> AppResult<()> {
        match self {
            Self::Memory(db) => db.record_generation_audit(record).await,
            Self::SQLite(db) => db.record_generation_audit(record).await,
        }
    }

    async fn list_generation_audit(
        &self,
        program_id: Uuid,
    ) -> AppResult<Vec<GenerationAuditRecord>> {
        match self {
            Self::Memory(db) => db.list_generation_audit(program_id).await,
            Self::SQLite(db) => db.list_generation_audit(program_id).await,
        }
    }
}
