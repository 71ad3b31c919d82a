// ABOUTME: Training week and workout models with the tagged workout modification type
// ABOUTME: A week is immutable once generated except for completion and skip flags
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc, Weekday};
use serde::{Deserialize, Serialize};

/// Session category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutType {
    /// Conversational-pace aerobic work
    Easy,
    /// Long aerobic session
    Long,
    /// Sustained threshold effort
    Tempo,
    /// Structured repeats
    Intervals,
    /// Resistance training
    Strength,
    /// Circuits and metabolic conditioning
    Conditioning,
    /// Mobility and flexibility
    Mobility,
    /// Active recovery
    Recovery,
    /// Non-specific aerobic cross training
    CrossTraining,
}

impl WorkoutType {
    /// Structured sessions that `simplify_workouts` replaces with steady work
    #[must_use]
    pub const fn is_complex(&self) -> bool {
        matches!(self, Self::Tempo | Self::Intervals)
    }
}

/// Exercise prescribed inside a workout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedExercise {
    /// Catalog identifier
    pub exercise_id: String,
    /// Display name resolved from the catalog
    pub name: String,
    /// Prescribed sets
    pub sets: Option<u32>,
    /// Prescribed reps per set
    pub reps: Option<u32>,
    /// True when the catalog lookup failed and a placeholder was substituted
    #[serde(default)]
    pub placeholder: bool,
}

/// One planned session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workout {
    /// Identifier, unique within the program (`w{week}-{index}`)
    pub id: String,
    /// Day of the week the session is planned for
    pub day: Weekday,
    /// Session category
    pub workout_type: WorkoutType,
    /// Short title
    pub title: String,
    /// Longer description
    pub description: String,
    /// Planned duration in minutes
    pub planned_duration_minutes: u32,
    /// Target RPE (1-10)
    pub target_rpe: u8,
    /// Essential to the goal; weighted by the prerequisite gate
    pub is_key_workout: bool,
    /// Can be dropped when volume is reduced
    pub is_optional: bool,
    /// Logged as completed
    pub completed: bool,
    /// Explicitly skipped
    pub skipped: bool,
    /// Why it was skipped
    pub skip_reason: Option<String>,
    /// Composite id of the latest completion record
    pub completion_id: Option<String>,
    /// Prescribed exercises
    pub exercises: Vec<PlannedExercise>,
    /// Free-form notes added through modifications
    pub notes: Vec<String>,
}

impl Workout {
    /// Neither completed nor skipped yet
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        !self.completed && !self.skipped
    }
}

/// Where the narrative coaching note came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NarrationSource {
    /// Produced by the text-generation service
    Generated,
    /// Deterministic template fallback
    Template,
}

/// One generated week of a program
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingWeek {
    /// 1-based position in the program
    pub week_number: u32,
    /// Phase the week belongs to
    pub phase_name: String,
    /// Short theme line
    pub theme: String,
    /// What the week develops
    pub focus: String,
    /// Ordered sessions
    pub workouts: Vec<Workout>,
    /// Generation timestamp
    pub generated_at: DateTime<Utc>,
    /// Closed: all sessions resolved or the next week was generated
    pub completed: bool,
    /// Coaching notes shown with the week
    pub coaching_notes: Vec<String>,
    /// Origin of the narrative note
    pub narration_source: NarrationSource,
}

impl TrainingWeek {
    /// Workout by id
    #[must_use]
    pub fn workout(&self, workout_id: &str) -> Option<&Workout> {
        self.workouts.iter().find(|w| w.id == workout_id)
    }

    /// Mutable workout by id
    pub fn workout_mut(&mut self, workout_id: &str) -> Option<&mut Workout> {
        self.workouts.iter_mut().find(|w| w.id == workout_id)
    }

    /// Key workouts in plan order
    pub fn key_workouts(&self) -> impl Iterator<Item = &Workout> {
        self.workouts.iter().filter(|w| w.is_key_workout)
    }

    /// Number of completed workouts
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.workouts.iter().filter(|w| w.completed).count()
    }

    /// Close the week once every session is completed or skipped
    pub fn refresh_completed(&mut self) {
        if !self.workouts.is_empty() && self.workouts.iter().all(|w| !w.is_pending()) {
            self.completed = true;
        }
    }
}

/// User-requested change to a generated workout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WorkoutModification {
    /// Swap one prescribed exercise for another catalog exercise
    ReplaceExercise {
        /// Exercise currently prescribed
        from_exercise_id: String,
        /// Replacement catalog id
        to_exercise_id: String,
    },
    /// Shift target RPE by a signed amount (result clamped to 1..=10)
    AdjustIntensity {
        /// RPE delta
        delta: i8,
    },
    /// Exchange planned days with another workout in the same week
    SwapDay {
        /// The other workout
        with_workout_id: String,
    },
    /// Attach a note
    CustomNote {
        /// Note text
        note: String,
    },
}
