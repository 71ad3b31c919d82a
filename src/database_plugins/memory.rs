// ABOUTME: In-memory ProgramRepository backed by DashMap
// ABOUTME: Versioned program writes are compare-and-swap under the per-key entry lock
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::debug;
use uuid::Uuid;

use super::{conflict, not_found, ProgramRepository, VersionedProgram};
use crate::errors::{AppError, AppResult};
use crate::models::{
    GenerationAuditRecord, PerformancePattern, Program, WeeklyCompletionSummary, WorkoutCompletion,
};

/// Process-local storage; contents are lost on exit
#[derive(Clone, Default)]
pub struct InMemoryDatabase {
    programs: Arc<DashMap<Uuid, VersionedProgram>>,
    completions: Arc<DashMap<String, WorkoutCompletion>>,
    summaries: Arc<DashMap<(Uuid, u32), WeeklyCompletionSummary>>,
    patterns: Arc<DashMap<Uuid, Vec<PerformancePattern>>>,
    audit: Arc<DashMap<Uuid, Vec<GenerationAuditRecord>>>,
}

impl InMemoryDatabase {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn completions_where(
        &self,
        predicate: impl Fn(&WorkoutCompletion) -> bool,
    ) -> Vec<WorkoutCompletion> {
        self.completions
            .iter()
            .filter(|entry| predicate(entry.value()))
            .map(|entry| entry.value().clone())
            .collect()
    }
}

#[async_trait]
impl ProgramRepository for InMemoryDatabase {
    async fn migrate(&self) -> AppResult<()> {
        Ok(())
    }

    async fn create_program(&self, program: &Program) -> AppResult<VersionedProgram> {
        let stored = VersionedProgram {
            program: program.clone(),
            version: 1,
        };
        match self.programs.entry(program.id) {
            dashmap::mapref::entry::Entry::Occupied(_) => Err(AppError::invalid_input(format!(
                "program {} already exists",
                program.id
            ))),
            dashmap::mapref::entry::Entry::Vacant(slot) => {
                slot.insert(stored.clone());
                debug!(program.id = %program.id, "Program created");
                Ok(stored)
            }
        }
    }

    async fn get_program(
        &self,
        user_id: Uuid,
        program_id: Uuid,
    ) -> AppResult<Option<VersionedProgram>> {
        Ok(self
            .programs
            .get(&program_id)
            .filter(|entry| entry.program.user_id == user_id)
            .map(|entry| entry.value().clone()))
    }

    async fn list_programs(&self, user_id: Uuid) -> AppResult<Vec<Program>> {
        let mut programs: Vec<Program> = self
            .programs
            .iter()
            .filter(|entry| entry.program.user_id == user_id)
            .map(|entry| entry.program.clone())
            .collect();
        programs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(programs)
    }

    async fn update_program(&self, program: &Program, expected_version: i64) -> AppResult<i64> {
        let Some(mut entry) = self.programs.get_mut(&program.id) else {
            return Err(not_found(program.id));
        };
        if entry.program.user_id != program.user_id {
            return Err(not_found(program.id));
        }
        if entry.version != expected_version {
            return Err(conflict(program.id, expected_version));
        }
        entry.program = program.clone();
        entry.version += 1;
        let version = entry.version;
        drop(entry);

        debug!(program.id = %program.id, program.version = version, "Program updated");
        Ok(version)
    }

    async fn upsert_completion(&self, completion: &WorkoutCompletion) -> AppResult<String> {
        let id = completion.completion_id();
        self.completions.insert(id.clone(), completion.clone());
        Ok(id)
    }

    async fn get_week_completions(
        &self,
        program_id: Uuid,
        week_number: u32,
    ) -> AppResult<Vec<WorkoutCompletion>> {
        let mut completions = self.completions_where(|c| {
            c.program_id == program_id && c.week_number == week_number
        });
        completions.sort_by(|a, b| a.completed_at.cmp(&b.completed_at));
        Ok(completions)
    }

    async fn get_recent_completions(
        &self,
        program_id: Uuid,
        limit: usize,
    ) -> AppResult<Vec<WorkoutCompletion>> {
        let mut completions = self.completions_where(|c| c.program_id == program_id);
        completions.sort_by(|a, b| {
            b.completed_at
                .cmp(&a.completed_at)
                .then_with(|| b.completion_id().cmp(&a.completion_id()))
        });
        completions.truncate(limit);
        Ok(completions)
    }

    async fn save_weekly_summary(&self, summary: &WeeklyCompletionSummary) -> AppResult<()> {
        self.summaries
            .insert((summary.program_id, summary.week_number), summary.clone());
        Ok(())
    }

    async fn get_weekly_summary(
        &self,
        program_id: Uuid,
        week_number: u32,
    ) -> AppResult<Option<WeeklyCompletionSummary>> {
        Ok(self
            .summaries
            .get(&(program_id, week_number))
            .map(|entry| entry.value().clone()))
    }

    async fn list_weekly_summaries(
        &self,
        program_id: Uuid,
    ) -> AppResult<Vec<WeeklyCompletionSummary>> {
        let mut summaries: Vec<WeeklyCompletionSummary> = self
            .summaries
            .iter()
            .filter(|entry| entry.key().0 == program_id)
            .map(|entry| entry.value().clone())
            .collect();
        summaries.sort_by_key(|summary| summary.week_number);
        Ok(summaries)
    }

    async fn save_patterns(&self, patterns: &[PerformancePattern]) -> AppResult<()> {
        for pattern in patterns {
            self.patterns
                .entry(pattern.program_id)
                .or_default()
                .push(pattern.clone());
        }
        Ok(())
    }

    async fn get_patterns(
        &self,
        program_id: Uuid,
        limit: usize,
    ) -> AppResult<Vec<PerformancePattern>> {
        Ok(self
            .patterns
            .get(&program_id)
            .map(|entry| entry.iter().rev().take(limit).cloned().collect())
            .unwrap_or_default())
    }

    async fn record_generation_audit(&self, record: &GenerationAuditRecord) -> AppResult<()> {
        self.audit
            .entry(record.program_id)
            .or_default()
            .push(record.clone());
        Ok(())
    }

    async fn list_generation_audit(
        &self,
        program_id: Uuid,
    ) -> AppResult<Vec<GenerationAuditRecord>> {
        Ok(self
            .audit
            .get(&program_id)
            .map(|entry| entry.value().clone())
            .unwrap_or_default())
    }
}
