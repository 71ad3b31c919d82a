// ABOUTME: SQLite ProgramRepository using sqlx with JSON document columns
// ABOUTME: Program writes are conditional on the stored version; completions upsert on their composite key
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fs;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::de::DeserializeOwned;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Row, SqlitePool};
use tracing::{debug, info};
use uuid::Uuid;

use super::{conflict, not_found, ProgramRepository, VersionedProgram};
use crate::config::DatabaseUrl;
use crate::errors::{AppError, AppResult};
use crate::models::{
    GenerationAuditRecord, PerformancePattern, Program, WeeklyCompletionSummary, WorkoutCompletion,
};

/// SQLite-backed storage
#[derive(Clone)]
pub struct SqliteDatabase {
    pool: SqlitePool,
}

impl SqliteDatabase {
    /// Open (creating if needed) the database and run migrations
    ///
    /// # Errors
    ///
    /// Returns an error if the url is not a SQLite url, the parent directory
    /// cannot be created, the connection fails, or migrations fail.
    pub async fn new(url: &DatabaseUrl) -> AppResult<Self> {
        let pool = match url {
            DatabaseUrl::SqliteMemory => SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect("sqlite::memory:")
                .await
                .map_err(|e| AppError::database(format!("Failed to open in-memory SQLite: {e}")))?,
            DatabaseUrl::Sqlite { path } => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    fs::create_dir_all(parent).map_err(|e| {
                        AppError::database(format!(
                            "Failed to create database directory {}: {e}",
                            parent.display()
                        ))
                    })?;
                }
                let options = SqliteConnectOptions::new()
                    .filename(path)
                    .create_if_missing(true);
                SqlitePoolOptions::new()
                    .connect_with(options)
                    .await
                    .map_err(|e| {
                        AppError::database(format!(
                            "Failed to open SQLite database {}: {e}",
                            path.display()
                        ))
                    })?
            }
            DatabaseUrl::InMemory => {
                return Err(AppError::config(
                    "the in-memory backend is not a SQLite database",
                ))
            }
        };

        let db = Self { pool };
        db.migrate().await?;
        info!(database = %url, "SQLite program store ready");
        Ok(db)
    }

    /// Get a reference to the pool for advanced operations
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn current_version(&self, user_id: Uuid, program_id: Uuid) -> AppResult<Option<i64>> {
        let row = sqlx::query("SELECT version FROM programs WHERE id = $1 AND user_id = $2")
            .bind(program_id.to_string())
            .bind(user_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to read program version: {e}")))?;
        Ok(row.map(|row| row.get("version")))
    }
}

fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn limit_param(limit: usize) -> i64 {
    i64::try_from(limit).unwrap_or(i64::MAX)
}

fn to_document<T: serde::Serialize>(value: &T) -> AppResult<String> {
    Ok(serde_json::to_string(value)?)
}

fn from_document<T: DeserializeOwned>(row: &SqliteRow) -> AppResult<T> {
    let document: String = row.get("document");
    Ok(serde_json::from_str(&document)?)
}

fn from_documents<T: DeserializeOwned>(rows: &[SqliteRow]) -> AppResult<Vec<T>> {
    rows.iter().map(from_document).collect()
}

#[async_trait]
impl ProgramRepository for SqliteDatabase {
    async fn migrate(&self) -> AppResult<()> {
        let statements = [
            r"
            CREATE TABLE IF NOT EXISTS programs (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                status TEXT NOT NULL,
                current_week INTEGER NOT NULL,
                version INTEGER NOT NULL,
                document TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
            "CREATE INDEX IF NOT EXISTS idx_programs_user ON programs(user_id)",
            r"
            CREATE TABLE IF NOT EXISTS workout_completions (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                program_id TEXT NOT NULL,
                week_number INTEGER NOT NULL,
                workout_id TEXT NOT NULL,
                completed_at TEXT NOT NULL,
                document TEXT NOT NULL
            )
            ",
            "CREATE INDEX IF NOT EXISTS idx_completions_program ON workout_completions(program_id, completed_at)",
            r"
            CREATE TABLE IF NOT EXISTS weekly_summaries (
                program_id TEXT NOT NULL,
                week_number INTEGER NOT NULL,
                user_id TEXT NOT NULL,
                computed_at TEXT NOT NULL,
                document TEXT NOT NULL,
                PRIMARY KEY (program_id, week_number)
            )
            ",
            r"
            CREATE TABLE IF NOT EXISTS performance_patterns (
                id TEXT PRIMARY KEY,
                program_id TEXT NOT NULL,
                pattern_type TEXT NOT NULL,
                detected_at TEXT NOT NULL,
                document TEXT NOT NULL
            )
            ",
            "CREATE INDEX IF NOT EXISTS idx_patterns_program ON performance_patterns(program_id, detected_at)",
            r"
            CREATE TABLE IF NOT EXISTS generation_audit (
                id TEXT PRIMARY KEY,
                program_id TEXT NOT NULL,
                user_id TEXT NOT NULL,
                generated_week INTEGER NOT NULL,
                forced BOOLEAN NOT NULL,
                recorded_at TEXT NOT NULL,
                document TEXT NOT NULL
            )
            ",
        ];
        for statement in statements {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(|e| AppError::database(format!("Migration failed: {e}")))?;
        }
        debug!("Program store migrations applied");
        Ok(())
    }

    async fn create_program(&self, program: &Program) -> AppResult<VersionedProgram> {
        sqlx::query(
            r"
            INSERT INTO programs (id, user_id, status, current_week, version, document, created_at, updated_at)
            VALUES ($1, $2, $3, $4, 1, $5, $6, $7)
            ",
        )
        .bind(program.id.to_string())
        .bind(program.user_id.to_string())
        .bind(program.status.as_str())
        .bind(i64::from(program.current_week_number))
        .bind(to_document(program)?)
        .bind(timestamp(program.created_at))
        .bind(timestamp(program.updated_at))
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create program: {e}")))?;

        debug!(program.id = %program.id, "Program created");
        Ok(VersionedProgram {
            program: program.clone(),
            version: 1,
        })
    }

    async fn get_program(
        &self,
        user_id: Uuid,
        program_id: Uuid,
    ) -> AppResult<Option<VersionedProgram>> {
        let row = sqlx::query(
            "SELECT version, document FROM programs WHERE id = $1 AND user_id = $2",
        )
        .bind(program_id.to_string())
        .bind(user_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get program: {e}")))?;

        row.map(|row| {
            Ok(VersionedProgram {
                program: from_document(&row)?,
                version: row.get("version"),
            })
        })
        .transpose()
    }

    async fn list_programs(&self, user_id: Uuid) -> AppResult<Vec<Program>> {
        let rows = sqlx::query(
            "SELECT document FROM programs WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list programs: {e}")))?;
        from_documents(&rows)
    }

    async fn update_program(&self, program: &Program, expected_version: i64) -> AppResult<i64> {
        let result = sqlx::query(
            r"
            UPDATE programs
            SET status = $1, current_week = $2, document = $3, updated_at = $4, version = version + 1
            WHERE id = $5 AND user_id = $6 AND version = $7
            ",
        )
        .bind(program.status.as_str())
        .bind(i64::from(program.current_week_number))
        .bind(to_document(program)?)
        .bind(timestamp(program.updated_at))
        .bind(program.id.to_string())
        .bind(program.user_id.to_string())
        .bind(expected_version)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to update program: {e}")))?;

        if result.rows_affected() == 0 {
            return match self.current_version(program.user_id, program.id).await? {
                Some(_) => Err(conflict(program.id, expected_version)),
                None => Err(not_found(program.id)),
            };
        }

        let version = expected_version + 1;
        debug!(program.id = %program.id, program.version = version, "Program updated");
        Ok(version)
    }

    async fn upsert_completion(&self, completion: &WorkoutCompletion) -> AppResult<String> {
        let id = completion.completion_id();
        sqlx::query(
            r"
            INSERT INTO workout_completions (id, user_id, program_id, week_number, workout_id, completed_at, document)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT(id) DO UPDATE SET
                completed_at = excluded.completed_at,
                document = excluded.document
            ",
        )
        .bind(&id)
        .bind(completion.user_id.to_string())
        .bind(completion.program_id.to_string())
        .bind(i64::from(completion.week_number))
        .bind(&completion.workout_id)
        .bind(timestamp(completion.completed_at))
        .bind(to_document(completion)?)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to save completion: {e}")))?;
        Ok(id)
    }

    async fn get_week_completions(
        &self,
        program_id: Uuid,
        week_number: u32,
    ) -> AppResult<Vec<WorkoutCompletion>> {
        let rows = sqlx::query(
            r"
            SELECT document FROM workout_completions
            WHERE program_id = $1 AND week_number = $2
            ORDER BY completed_at ASC
            ",
        )
        .bind(program_id.to_string())
        .bind(i64::from(week_number))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get week completions: {e}")))?;
        from_documents(&rows)
    }

    async fn get_recent_completions(
        &self,
        program_id: Uuid,
        limit: usize,
    ) -> AppResult<Vec<WorkoutCompletion>> {
        let rows = sqlx::query(
            r"
            SELECT document FROM workout_completions
            WHERE program_id = $1
            ORDER BY completed_at DESC, id DESC
            LIMIT $2
            ",
        )
        .bind(program_id.to_string())
        .bind(limit_param(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get recent completions: {e}")))?;
        from_documents(&rows)
    }

    async fn save_weekly_summary(&self, summary: &WeeklyCompletionSummary) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT INTO weekly_summaries (program_id, week_number, user_id, computed_at, document)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT(program_id, week_number) DO UPDATE SET
                computed_at = excluded.computed_at,
                document = excluded.document
            ",
        )
        .bind(summary.program_id.to_string())
        .bind(i64::from(summary.week_number))
        .bind(summary.user_id.to_string())
        .bind(timestamp(summary.computed_at))
        .bind(to_document(summary)?)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to save weekly summary: {e}")))?;
        Ok(())
    }

    async fn get_weekly_summary(
        &self,
        program_id: Uuid,
        week_number: u32,
    ) -> AppResult<Option<WeeklyCompletionSummary>> {
        let row = sqlx::query(
            "SELECT document FROM weekly_summaries WHERE program_id = $1 AND week_number = $2",
        )
        .bind(program_id.to_string())
        .bind(i64::from(week_number))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get weekly summary: {e}")))?;
        row.as_ref().map(from_document).transpose()
    }

    async fn list_weekly_summaries(
        &self,
        program_id: Uuid,
    ) -> AppResult<Vec<WeeklyCompletionSummary>> {
        let rows = sqlx::query(
            "SELECT document FROM weekly_summaries WHERE program_id = $1 ORDER BY week_number ASC",
        )
        .bind(program_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list weekly summaries: {e}")))?;
        from_documents(&rows)
    }

    async fn save_patterns(&self, patterns: &[PerformancePattern]) -> AppResult<()> {
        for pattern in patterns {
            sqlx::query(
                r"
                INSERT INTO performance_patterns (id, program_id, pattern_type, detected_at, document)
                VALUES ($1, $2, $3, $4, $5)
                ",
            )
            .bind(pattern.id.to_string())
            .bind(pattern.program_id.to_string())
            .bind(pattern.pattern_type.as_str())
            .bind(timestamp(pattern.detected_at))
            .bind(to_document(pattern)?)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to save pattern: {e}")))?;
        }
        Ok(())
    }

    async fn get_patterns(
        &self,
        program_id: Uuid,
        limit: usize,
    ) -> AppResult<Vec<PerformancePattern>> {
        let rows = sqlx::query(
            r"
            SELECT document FROM performance_patterns
            WHERE program_id = $1
            ORDER BY detected_at DESC, rowid DESC
            LIMIT $2
            ",
        )
        .bind(program_id.to_string())
        .bind(limit_param(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get patterns: {e}")))?;
        from_documents(&rows)
    }

    async fn record_generation_audit(&self, record: &GenerationAuditRecord) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT INTO generation_audit (id, program_id, user_id, generated_week, forced, recorded_at, document)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(record.id.to_string())
        .bind(record.program_id.to_string())
        .bind(record.user_id.to_string())
        .bind(i64::from(record.generated_week))
        .bind(record.forced)
        .bind(timestamp(record.recorded_at))
        .bind(to_document(record)?)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to record generation audit: {e}")))?;
        Ok(())
    }

    async fn list_generation_audit(
        &self,
        program_id: Uuid,
    ) -> AppResult<Vec<GenerationAuditRecord>> {
        let rows = sqlx::query(
            r"
            SELECT document FROM generation_audit
            WHERE program_id = $1
            ORDER BY recorded_at ASC, rowid ASC
            ",
        )
        .bind(program_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list generation audit: {e}")))?;
        from_documents(&rows)
    }
}
