// ABOUTME: Workout completion records and the derived weekly completion summary
// ABOUTME: Completions are keyed by (user, program, week, workout) with last-write-wins semantics
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::completion::{
    MAX_COMPLETION_PERCENTAGE, MAX_OVERALL_RATING, MAX_RPE, MIN_OVERALL_RATING, MIN_RPE,
};
use crate::errors::ProgramError;

/// Self-reported energy before or during the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnergyLevel {
    /// Exhausted
    VeryLow,
    /// Tired
    Low,
    /// Normal
    #[default]
    Moderate,
    /// Fresh
    High,
    /// Exceptional
    VeryHigh,
}

impl EnergyLevel {
    /// Low energy is a recovery-deficit signal
    #[must_use]
    pub const fn is_low(&self) -> bool {
        matches!(self, Self::VeryLow | Self::Low)
    }
}

/// Self-reported motivation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MotivationLevel {
    /// Had to force it
    Low,
    /// Neutral
    #[default]
    Moderate,
    /// Eager
    High,
}

/// How hard the session felt relative to the plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DifficultyLevel {
    /// Easier than planned
    TooEasy,
    /// As planned
    #[default]
    JustRight,
    /// Harder than planned
    Hard,
    /// Could not hold the prescription
    TooHard,
}

/// Previous night's sleep
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SleepQuality {
    /// Poor
    Poor,
    /// Fair
    Fair,
    /// Good
    #[default]
    Good,
    /// Excellent
    Excellent,
}

impl SleepQuality {
    /// Score on a 0-100 scale
    #[must_use]
    pub const fn score(&self) -> f64 {
        match self {
            Self::Poor => 25.0,
            Self::Fair => 50.0,
            Self::Good => 75.0,
            Self::Excellent => 100.0,
        }
    }
}

/// Life stress around the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StressLevel {
    /// Low
    Low,
    /// Moderate
    #[default]
    Moderate,
    /// High
    High,
}

/// Actual performance on one prescribed exercise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseActual {
    /// Catalog identifier
    pub exercise_id: String,
    /// Sets performed
    pub sets_completed: u32,
    /// Reps per set performed
    pub reps_completed: Option<u32>,
    /// Load used
    pub weight_kg: Option<f64>,
    /// Athlete notes
    pub notes: Option<String>,
}

/// What the athlete actually did for one workout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutCompletion {
    /// Athlete
    pub user_id: Uuid,
    /// Program the workout belongs to
    pub program_id: Uuid,
    /// Week the workout belongs to
    pub week_number: u32,
    /// Workout id within the program
    pub workout_id: String,
    /// When the session was logged
    pub completed_at: DateTime<Utc>,
    /// Actual minutes
    pub actual_duration_minutes: u32,
    /// Planned minutes (copied from the workout)
    pub planned_duration_minutes: u32,
    /// Rate of perceived exertion (1-10)
    pub rpe: u8,
    /// Overall session rating (1-5)
    pub overall_rating: u8,
    /// Per-exercise actuals
    #[serde(default)]
    pub exercises: Vec<ExerciseActual>,
    /// Energy level
    pub energy: EnergyLevel,
    /// Motivation level
    pub motivation: MotivationLevel,
    /// Perceived difficulty
    pub difficulty: DifficultyLevel,
    /// Sleep quality
    pub sleep_quality: SleepQuality,
    /// Stress level
    pub stress: StressLevel,
    /// Free-text notes
    pub notes: Option<String>,
    /// Whether the session was finished
    pub is_complete: bool,
    /// Share of the prescription completed (0-100)
    pub completion_percentage: f64,
}

impl WorkoutCompletion {
    /// Composite identity: one record per (user, program, week, workout)
    #[must_use]
    pub fn completion_id(&self) -> String {
        format!(
            "{}:{}:{}:{}",
            self.user_id, self.program_id, self.week_number, self.workout_id
        )
    }

    /// Validate rating ranges before storage
    ///
    /// # Errors
    ///
    /// Returns [`ProgramError::InvalidInput`] when RPE, rating, or percentage is out of range.
    pub fn validate(&self) -> Result<(), ProgramError> {
        if !(MIN_RPE..=MAX_RPE).contains(&self.rpe) {
            return Err(ProgramError::invalid_input(format!(
                "rpe must be between {MIN_RPE} and {MAX_RPE}, got {}",
                self.rpe
            )));
        }
        if !(MIN_OVERALL_RATING..=MAX_OVERALL_RATING).contains(&self.overall_rating) {
            return Err(ProgramError::invalid_input(format!(
                "overall rating must be between {MIN_OVERALL_RATING} and {MAX_OVERALL_RATING}, got {}",
                self.overall_rating
            )));
        }
        if !(0.0..=MAX_COMPLETION_PERCENTAGE).contains(&self.completion_percentage) {
            return Err(ProgramError::invalid_input(format!(
                "completion percentage must be between 0 and {MAX_COMPLETION_PERCENTAGE}, got {}",
                self.completion_percentage
            )));
        }
        if self.workout_id.trim().is_empty() {
            return Err(ProgramError::invalid_input("workout id must not be empty"));
        }
        Ok(())
    }
}

/// Recovery signals aggregated over a week
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecoveryIndicators {
    /// Completions tagged low or very low energy
    pub low_energy_sessions: u32,
    /// Completions after poor sleep
    pub poor_sleep_sessions: u32,
    /// Completions under high stress
    pub high_stress_sessions: u32,
    /// Completions at RPE 8 or above
    pub high_rpe_sessions: u32,
    /// Mean sleep quality score (0-100)
    pub average_sleep_score: Option<f64>,
}

/// Derived per-(program, week) aggregate; recomputed in full on every save
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyCompletionSummary {
    /// Program
    pub program_id: Uuid,
    /// Owner
    pub user_id: Uuid,
    /// Week
    pub week_number: u32,
    /// Workouts planned in the week
    pub planned_workouts: u32,
    /// Workouts completed
    pub completed_workouts: u32,
    /// Workouts skipped
    pub skipped_workouts: u32,
    /// Completion records stored for the week
    pub logged_completions: u32,
    /// Completed / planned, 0-100
    pub completion_rate: f64,
    /// Mean RPE across completions
    pub average_rpe: Option<f64>,
    /// Mean overall rating across completions
    pub average_rating: Option<f64>,
    /// Mean actual duration across completions
    pub average_duration_minutes: Option<f64>,
    /// 0-100
    pub consistency_score: f64,
    /// 0-100
    pub adherence_score: f64,
    /// 0-100
    pub progression_readiness: f64,
    /// Ids of every completed workout
    pub completed_workout_ids: Vec<String>,
    /// Completed key workout ids
    pub completed_key_workouts: Vec<String>,
    /// Key workouts not completed
    pub missed_key_workouts: Vec<String>,
    /// Detected challenges
    pub challenges: Vec<String>,
    /// Detected positive patterns
    pub positive_patterns: Vec<String>,
    /// Recovery signals
    pub recovery_indicators: RecoveryIndicators,
    /// When this summary was computed
    pub computed_at: DateTime<Utc>,
}
