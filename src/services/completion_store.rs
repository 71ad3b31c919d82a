// ABOUTME: Completion store: idempotent completion upserts with full weekly summary recompute
// ABOUTME: Runs the performance analyzer synchronously after every save and persists detected patterns
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::database_plugins::ProgramRepository;
use crate::errors::{AppResult, ProgramError};
use crate::intelligence::{
    AnalysisOutcome, AnalyzerConfig, PerformanceAnalyzer, WeeklySummaryCalculator,
};
use crate::models::{
    DifficultyLevel, EnergyLevel, ExerciseActual, MotivationLevel, PerformancePattern,
    SleepQuality, StressLevel, TrainingWeek, WeeklyCompletionSummary, Workout, WorkoutCompletion,
};

/// What the athlete reports when logging a workout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionInput {
    /// When the session happened; defaults to the time of logging
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    /// Actual minutes; defaults to the planned duration
    #[serde(default)]
    pub actual_duration_minutes: Option<u32>,
    /// Rate of perceived exertion (1-10)
    pub rpe: u8,
    /// Overall rating (1-5)
    pub overall_rating: u8,
    /// Per-exercise actuals
    #[serde(default)]
    pub exercises: Vec<ExerciseActual>,
    /// Energy level
    #[serde(default)]
    pub energy: EnergyLevel,
    /// Motivation level
    #[serde(default)]
    pub motivation: MotivationLevel,
    /// Perceived difficulty
    #[serde(default)]
    pub difficulty: DifficultyLevel,
    /// Sleep quality
    #[serde(default)]
    pub sleep_quality: SleepQuality,
    /// Stress level
    #[serde(default)]
    pub stress: StressLevel,
    /// Free-text notes
    #[serde(default)]
    pub notes: Option<String>,
    /// Whether the session was finished
    #[serde(default = "default_is_complete")]
    pub is_complete: bool,
    /// Share completed (0-100); defaults to 100 when complete, 0 otherwise
    #[serde(default)]
    pub completion_percentage: Option<f64>,
}

const fn default_is_complete() -> bool {
    true
}

impl Default for CompletionInput {
    fn default() -> Self {
        Self {
            completed_at: None,
            actual_duration_minutes: None,
            rpe: 6,
            overall_rating: 4,
            exercises: Vec::new(),
            energy: EnergyLevel::default(),
            motivation: MotivationLevel::default(),
            difficulty: DifficultyLevel::default(),
            sleep_quality: SleepQuality::default(),
            stress: StressLevel::default(),
            notes: None,
            is_complete: true,
            completion_percentage: None,
        }
    }
}

impl CompletionInput {
    /// Build the stored record for `workout`
    #[must_use]
    pub fn into_completion(
        self,
        user_id: Uuid,
        program_id: Uuid,
        week_number: u32,
        workout: &Workout,
        now: DateTime<Utc>,
    ) -> WorkoutCompletion {
        let default_percentage = if self.is_complete { 100.0 } else { 0.0 };
        WorkoutCompletion {
            user_id,
            program_id,
            week_number,
            workout_id: workout.id.clone(),
            completed_at: self.completed_at.unwrap_or(now),
            actual_duration_minutes: self
                .actual_duration_minutes
                .unwrap_or(workout.planned_duration_minutes),
            planned_duration_minutes: workout.planned_duration_minutes,
            rpe: self.rpe,
            overall_rating: self.overall_rating,
            exercises: self.exercises,
            energy: self.energy,
            motivation: self.motivation,
            difficulty: self.difficulty,
            sleep_quality: self.sleep_quality,
            stress: self.stress,
            notes: self.notes,
            is_complete: self.is_complete,
            completion_percentage: self.completion_percentage.unwrap_or(default_percentage),
        }
    }
}

/// Result of a completion save
#[derive(Debug, Clone)]
pub struct SavedCompletion {
    /// Composite completion key
    pub completion_id: String,
    /// Freshly recomputed summary for the completion's week
    pub summary: WeeklyCompletionSummary,
    /// Patterns detected and persisted by this save
    pub patterns: Vec<PerformancePattern>,
}

/// Durable record of workout completions and their derived aggregates
#[derive(Clone)]
pub struct CompletionStore {
    repository: Arc<dyn ProgramRepository>,
    analyzer: PerformanceAnalyzer,
    window_size: usize,
}

impl CompletionStore {
    /// Create a store over `repository`
    #[must_use]
    pub fn new(repository: Arc<dyn ProgramRepository>, analyzer_config: AnalyzerConfig) -> Self {
        Self {
            repository,
            analyzer: PerformanceAnalyzer::new(analyzer_config),
            window_size: analyzer_config.window_size,
        }
    }

    /// Upsert `completion`, recompute its week's summary, and run the analyzer.
    ///
    /// A second save for the same `(user, program, week, workout)` overwrites
    /// the first. `week` must be the program week the completion belongs to.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for out-of-range ratings or a week mismatch and
    /// propagates storage errors.
    pub async fn save_completion(
        &self,
        week: &TrainingWeek,
        completion: &WorkoutCompletion,
        now: DateTime<Utc>,
    ) -> AppResult<SavedCompletion> {
        completion.validate()?;
        if completion.week_number != week.week_number {
            return Err(ProgramError::invalid_input(format!(
                "completion is for week {} but week {} was supplied",
                completion.week_number, week.week_number
            ))
            .into());
        }

        let completion_id = self.repository.upsert_completion(completion).await?;
        debug!(completion.id = %completion_id, "Completion stored");

        let summary = self
            .recompute_summary(completion.user_id, completion.program_id, week, now)
            .await?;

        let patterns = match self.analyze(completion.program_id, now).await? {
            Some(outcome) => {
                self.repository.save_patterns(&outcome.patterns).await?;
                outcome.patterns
            }
            None => Vec::new(),
        };

        Ok(SavedCompletion {
            completion_id,
            summary,
            patterns,
        })
    }

    /// Rebuild and persist the summary for `week` from stored completions
    ///
    /// # Errors
    ///
    /// Propagates storage errors.
    pub async fn recompute_summary(
        &self,
        user_id: Uuid,
        program_id: Uuid,
        week: &TrainingWeek,
        now: DateTime<Utc>,
    ) -> AppResult<WeeklyCompletionSummary> {
        let completions = self
            .repository
            .get_week_completions(program_id, week.week_number)
            .await?;
        let summary =
            WeeklySummaryCalculator::summarize(program_id, user_id, week, &completions, now);
        self.repository.save_weekly_summary(&summary).await?;
        Ok(summary)
    }

    /// Analyze the most recent completions; `None` when the window is too small
    ///
    /// # Errors
    ///
    /// Propagates storage errors.
    pub async fn analyze(
        &self,
        program_id: Uuid,
        now: DateTime<Utc>,
    ) -> AppResult<Option<AnalysisOutcome>> {
        let recent = self
            .repository
            .get_recent_completions(program_id, self.window_size)
            .await?;
        match self.analyzer.analyze(program_id, &recent, now) {
            Ok(outcome) => Ok(Some(outcome)),
            Err(ProgramError::InsufficientData {
                available,
                required,
            }) => {
                debug!(
                    program.id = %program_id,
                    available,
                    required,
                    "Not enough completions for pattern analysis"
                );
                Ok(None)
            }
            Err(other) => Err(other.into()),
        }
    }

    /// Completions recorded for one week
    ///
    /// # Errors
    ///
    /// Propagates storage errors.
    pub async fn get_week_completions(
        &self,
        program_id: Uuid,
        week_number: u32,
    ) -> AppResult<Vec<WorkoutCompletion>> {
        self.repository
            .get_week_completions(program_id, week_number)
            .await
    }

    /// Most recent completions, newest first
    ///
    /// # Errors
    ///
    /// Propagates storage errors.
    pub async fn get_recent_completions(
        &self,
        program_id: Uuid,
        limit: usize,
    ) -> AppResult<Vec<WorkoutCompletion>> {
        self.repository
            .get_recent_completions(program_id, limit)
            .await
    }
}
