// ABOUTME: Core data models for the adaptive progressive program engine
// ABOUTME: Re-exports programs, frameworks, weeks, workouts, completions, and performance patterns
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! This module contains the data structures shared by the program engines and
//! the persistence layer.
//!
//! ## Design Principles
//!
//! - **Append-only weeks**: a `Program` only grows through [`Program::append_week`]
//! - **Derived aggregates**: `WeeklyCompletionSummary` is a pure function of stored completions
//! - **Serializable**: every model round-trips through JSON for document storage
//! - **Type Safe**: enumerations replace free-text status and modification payloads
//!
//! ## Core Models
//!
//! - `Program`: a user's goal-driven program and its generated weeks
//! - `ProgramFramework`: the periodization skeleton fixed at creation
//! - `TrainingWeek` / `Workout`: one generated week and its sessions
//! - `WorkoutCompletion`: what the athlete actually did
//! - `PerformancePattern` / `AdaptationDirective`: analyzer output

mod completion;
mod pattern;
mod prerequisite;
mod program;
mod week;

// Program domain
pub use program::{
    AdaptationRule, ExperienceLevel, FrameworkKind, Milestone, Phase, PhaseKind, Program,
    ProgramFramework, ProgramStatus, UserProfile,
};

// Week domain
pub use week::{
    NarrationSource, PlannedExercise, TrainingWeek, Workout, WorkoutModification, WorkoutType,
};

// Completion domain
pub use completion::{
    DifficultyLevel, EnergyLevel, ExerciseActual, MotivationLevel, RecoveryIndicators,
    SleepQuality, StressLevel, WeeklyCompletionSummary, WorkoutCompletion,
};

// Analysis domain
pub use pattern::{
    AdaptationDirective, DirectiveAxis, PatternDirection, PatternPriority, PatternType,
    PerformancePattern,
};

// Progression domain
pub use prerequisite::{GenerationAuditRecord, PrerequisiteCheck, ProgressionState};
