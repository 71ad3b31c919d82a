// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides quiet logging, in-memory orchestrators, programs, weeks, and completion builders
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic
)]
//! Shared test utilities for `pierre_programs`
//!
//! This module provides common test setup functions to reduce duplication
//! across integration tests.

use std::sync::{Arc, Once};

use chrono::{DateTime, Duration, NaiveDate, Utc, Weekday};
use pierre_programs::catalog::StaticExerciseCatalog;
use pierre_programs::config::ProgramPolicy;
use pierre_programs::database_plugins::memory::InMemoryDatabase;
use pierre_programs::models::{
    DifficultyLevel, EnergyLevel, ExperienceLevel, MotivationLevel, NarrationSource, Program,
    SleepQuality, StressLevel, TrainingWeek, UserProfile, Workout, WorkoutCompletion, WorkoutType,
};
use pierre_programs::services::{CompletionInput, GenerationOutcome, ProgramOrchestrator};
use uuid::Uuid;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// In-memory orchestrator plus its backing store
pub struct TestContext {
    pub orchestrator: ProgramOrchestrator,
    pub database: Arc<InMemoryDatabase>,
    pub user_id: Uuid,
}

/// Standard in-memory orchestrator with default policy
pub fn create_test_context() -> TestContext {
    create_test_context_with_policy(ProgramPolicy::default())
}

/// In-memory orchestrator with a custom policy
pub fn create_test_context_with_policy(policy: ProgramPolicy) -> TestContext {
    init_test_logging();
    let database = Arc::new(InMemoryDatabase::new());
    let orchestrator = ProgramOrchestrator::new(
        database.clone(),
        Arc::new(StaticExerciseCatalog::builtin()),
        policy,
    );
    TestContext {
        orchestrator,
        database,
        user_id: Uuid::new_v4(),
    }
}

/// Date `weeks` whole weeks from today
pub fn target_in_weeks(weeks: i64) -> NaiveDate {
    Utc::now().date_naive() + Duration::weeks(weeks)
}

/// Intermediate athlete training four days a week
pub fn four_day_profile() -> UserProfile {
    UserProfile {
        experience_level: ExperienceLevel::Intermediate,
        available_days_per_week: 4,
        limitations: Vec::new(),
        notes: None,
    }
}

/// Create a 16-week marathon program
pub async fn create_marathon_program(context: &TestContext) -> Program {
    context
        .orchestrator
        .create_program(
            context.user_id,
            "Run a marathon",
            target_in_weeks(16),
            four_day_profile(),
        )
        .await
        .expect("program should be created")
}

/// Generate the next week and expect it to succeed
pub async fn generate_week(context: &TestContext, program_id: Uuid, force: bool) -> TrainingWeek {
    match context
        .orchestrator
        .generate_next_week(context.user_id, program_id, force)
        .await
        .expect("generation should not error")
    {
        GenerationOutcome::Generated { week, .. } => week,
        other => panic!("expected a generated week, got {other:?}"),
    }
}

/// Log every listed workout of `week` with default ratings
pub async fn complete_workouts(
    context: &TestContext,
    program_id: Uuid,
    week: &TrainingWeek,
    workout_ids: &[&str],
) {
    for workout_id in workout_ids {
        context
            .orchestrator
            .save_completion(
                context.user_id,
                program_id,
                week.week_number,
                workout_id,
                CompletionInput::default(),
            )
            .await
            .expect("completion should be saved");
    }
}

/// Ids of every workout in `week`
pub fn workout_ids(week: &TrainingWeek) -> Vec<String> {
    week.workouts.iter().map(|workout| workout.id.clone()).collect()
}

/// Id of the first key workout in `week`
pub fn key_workout_id(week: &TrainingWeek) -> String {
    week.key_workouts()
        .next()
        .map(|workout| workout.id.clone())
        .expect("week should have a key workout")
}

/// Plain workout for hand-built weeks
pub fn workout(id: &str, day: Weekday, is_key: bool) -> Workout {
    Workout {
        id: id.to_owned(),
        day,
        workout_type: if is_key {
            WorkoutType::Long
        } else {
            WorkoutType::Easy
        },
        title: format!("Session {id}"),
        description: String::new(),
        planned_duration_minutes: 40,
        target_rpe: 5,
        is_key_workout: is_key,
        is_optional: false,
        completed: false,
        skipped: false,
        skip_reason: None,
        completion_id: None,
        exercises: Vec::new(),
        notes: Vec::new(),
    }
}

/// Week of `total` workouts where the first `keys` are key sessions
pub fn build_week(week_number: u32, total: usize, keys: usize) -> TrainingWeek {
    let days = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ];
    let workouts = (0..total)
        .map(|index| {
            workout(
                &format!("w{week_number}-{}", index + 1),
                days[index % days.len()],
                index < keys,
            )
        })
        .collect();
    TrainingWeek {
        week_number,
        phase_name: "Base".to_owned(),
        theme: "Base week".to_owned(),
        focus: "Aerobic base".to_owned(),
        workouts,
        generated_at: Utc::now(),
        completed: false,
        coaching_notes: Vec::new(),
        narration_source: NarrationSource::Template,
    }
}

/// Completion record builder
pub struct CompletionBuilder {
    completion: WorkoutCompletion,
}

impl CompletionBuilder {
    pub fn new(program_id: Uuid, week_number: u32, workout_id: &str) -> Self {
        Self {
            completion: WorkoutCompletion {
                user_id: Uuid::nil(),
                program_id,
                week_number,
                workout_id: workout_id.to_owned(),
                completed_at: Utc::now(),
                actual_duration_minutes: 40,
                planned_duration_minutes: 40,
                rpe: 6,
                overall_rating: 4,
                exercises: Vec::new(),
                energy: EnergyLevel::Moderate,
                motivation: MotivationLevel::default(),
                difficulty: DifficultyLevel::default(),
                sleep_quality: SleepQuality::default(),
                stress: StressLevel::default(),
                notes: None,
                is_complete: true,
                completion_percentage: 100.0,
            },
        }
    }

    pub fn user(mut self, user_id: Uuid) -> Self {
        self.completion.user_id = user_id;
        self
    }

    pub fn rpe(mut self, rpe: u8) -> Self {
        self.completion.rpe = rpe;
        self
    }

    pub fn energy(mut self, energy: EnergyLevel) -> Self {
        self.completion.energy = energy;
        self
    }

    pub fn at(mut self, completed_at: DateTime<Utc>) -> Self {
        self.completion.completed_at = completed_at;
        self
    }

    pub fn incomplete(mut self) -> Self {
        self.completion.is_complete = false;
        self.completion.completion_percentage = 30.0;
        self
    }

    pub fn build(self) -> WorkoutCompletion {
        self.completion
    }
}

/// `count` completions one hour apart, newest last, all with `rpe`
pub fn completion_series(program_id: Uuid, count: usize, rpe: u8) -> Vec<WorkoutCompletion> {
    let start = Utc::now() - Duration::hours(i64::try_from(count).unwrap_or(0));
    (0..count)
        .map(|index| {
            CompletionBuilder::new(program_id, 1, &format!("w1-{}", index + 1))
                .rpe(rpe)
                .at(start + Duration::hours(i64::try_from(index).unwrap_or(0)))
                .build()
        })
        .collect()
}
