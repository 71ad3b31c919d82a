// ABOUTME: Integration tests for one-week-at-a-time generation
// ABOUTME: Covers day trimming, the starter week, directive application, and catalog fallbacks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::sync::Arc;

use chrono::{Duration, NaiveDate, Utc, Weekday};
use pierre_programs::catalog::StaticExerciseCatalog;
use pierre_programs::errors::ProgramError;
use pierre_programs::intelligence::{
    Exercise, ExerciseCatalog, ExerciseCategory, FrameworkGenerator, WeekGenerator, WeekRequest,
};
use pierre_programs::models::{
    AdaptationDirective, ProgramFramework, TrainingWeek, UserProfile, WorkoutType,
};

/// Catalog that knows nothing
struct EmptyCatalog;

impl ExerciseCatalog for EmptyCatalog {
    fn get_exercise(&self, exercise_id: &str) -> Result<Exercise, ProgramError> {
        Err(ProgramError::exercise_not_found(exercise_id))
    }

    fn exercises_in_category(&self, _category: ExerciseCategory) -> Vec<Exercise> {
        Vec::new()
    }
}

fn marathon_framework(profile: &UserProfile) -> ProgramFramework {
    let today = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
    FrameworkGenerator
        .generate("Run a marathon", today + Duration::weeks(16), today, profile)
        .unwrap()
}

fn generator() -> WeekGenerator {
    WeekGenerator::new(Arc::new(StaticExerciseCatalog::builtin()))
}

#[test]
fn test_first_week_is_trimmed_and_conservative() {
    let profile = common::four_day_profile();
    let framework = marathon_framework(&profile);
    let generated = generator()
        .generate(&WeekRequest {
            framework: &framework,
            profile: &profile,
            week_number: 1,
            directives: &[],
            generated_at: Utc::now(),
        })
        .unwrap();
    let week = generated.week;

    assert_eq!(week.week_number, 1);
    assert_eq!(week.phase_name, "Base");
    assert_eq!(week.workouts.len(), 4);
    assert!(week.workouts.iter().all(|w| !w.is_optional));
    assert_eq!(week.key_workouts().count(), 1);

    let long_run = week.key_workouts().next().unwrap();
    assert_eq!(long_run.workout_type, WorkoutType::Long);
    assert_eq!(long_run.day, Weekday::Sat);
    // 75 minutes and RPE 5 in the template, eased for the starter week
    assert_eq!(long_run.planned_duration_minutes, 60);
    assert_eq!(long_run.target_rpe, 4);

    let ids: Vec<&str> = week.workouts.iter().map(|w| w.id.as_str()).collect();
    assert_eq!(ids, vec!["w1-1", "w1-2", "w1-3", "w1-4"]);
    assert!(generated.placeholder_exercises.is_empty());
    assert!(week.coaching_notes.iter().any(|n| n.contains("Starter week")));
}

#[test]
fn test_add_recovery_directive_adds_a_recovery_session() {
    let profile = common::four_day_profile();
    let framework = marathon_framework(&profile);
    let generated = generator()
        .generate(&WeekRequest {
            framework: &framework,
            profile: &profile,
            week_number: 2,
            directives: &[
                AdaptationDirective::ReduceIntensity,
                AdaptationDirective::AddRecovery,
            ],
            generated_at: Utc::now(),
        })
        .unwrap();

    assert_eq!(
        generated.applied_directives,
        vec![
            AdaptationDirective::AddRecovery,
            AdaptationDirective::ReduceIntensity
        ]
    );
    let recovery: Vec<_> = generated
        .week
        .workouts
        .iter()
        .filter(|w| w.workout_type == WorkoutType::Recovery)
        .collect();
    assert_eq!(recovery.len(), 1);
    assert_eq!(recovery[0].planned_duration_minutes, 30);
    assert_eq!(recovery[0].day, Weekday::Mon);

    let days: Vec<u32> = generated
        .week
        .workouts
        .iter()
        .map(|w| w.day.num_days_from_monday())
        .collect();
    let mut sorted = days.clone();
    sorted.sort_unstable();
    assert_eq!(days, sorted);
}

#[test]
fn test_emphasize_key_workouts_drops_optional_sessions() {
    let profile = UserProfile {
        available_days_per_week: 7,
        ..UserProfile::default()
    };
    let framework = marathon_framework(&profile);
    let request = |directives: &'static [AdaptationDirective]| {
        generator()
            .generate(&WeekRequest {
                framework: &framework,
                profile: &profile,
                week_number: 2,
                directives,
                generated_at: Utc::now(),
            })
            .unwrap()
    };

    let full = request(&[]);
    assert_eq!(full.week.workouts.len(), 7);
    assert_eq!(full.week.workouts.iter().filter(|w| w.is_optional).count(), 3);

    let emphasized = request(&[AdaptationDirective::EmphasizeKeyWorkouts]);
    assert_eq!(
        emphasized.applied_directives,
        vec![AdaptationDirective::EmphasizeKeyWorkouts]
    );
    let week = emphasized.week;
    assert_eq!(week.workouts.len(), 4);
    assert!(week.workouts.iter().all(|w| !w.is_optional));
    let titles = |week: &TrainingWeek| -> Vec<String> {
        week.key_workouts().map(|w| w.title.clone()).collect()
    };
    assert_eq!(titles(&week), titles(&full.week));
    assert_eq!(titles(&week), vec!["Long aerobic run"]);
    assert!(week
        .coaching_notes
        .iter()
        .any(|note| note.contains("optional sessions were removed")));
}

#[test]
fn test_every_non_recovery_week_has_a_key_workout() {
    let profile = UserProfile {
        available_days_per_week: 2,
        ..UserProfile::default()
    };
    let framework = marathon_framework(&profile);
    for week_number in 1..=framework.estimated_weeks {
        let generated = generator()
            .generate(&WeekRequest {
                framework: &framework,
                profile: &profile,
                week_number,
                directives: &[
                    AdaptationDirective::ReduceVolume,
                    AdaptationDirective::SimplifyWorkouts,
                ],
                generated_at: Utc::now(),
            })
            .unwrap();
        let (phase, _) = framework.phase_for_week(week_number).unwrap();
        assert!(!generated.week.workouts.is_empty());
        if !phase.kind.is_recovery() {
            assert!(
                generated.week.key_workouts().count() >= 1,
                "week {week_number} has no key workout"
            );
        }
    }
}

#[test]
fn test_catalog_misses_become_placeholders() {
    let profile = common::four_day_profile();
    let framework = marathon_framework(&profile);
    let generated = WeekGenerator::new(Arc::new(EmptyCatalog))
        .generate(&WeekRequest {
            framework: &framework,
            profile: &profile,
            week_number: 1,
            directives: &[],
            generated_at: Utc::now(),
        })
        .unwrap();

    assert!(!generated.placeholder_exercises.is_empty());
    let exercises: Vec<_> = generated
        .week
        .workouts
        .iter()
        .flat_map(|w| w.exercises.iter())
        .collect();
    assert!(!exercises.is_empty());
    assert!(exercises.iter().all(|e| e.placeholder));
}

#[test]
fn test_week_zero_is_rejected() {
    let profile = common::four_day_profile();
    let framework = marathon_framework(&profile);
    let error = generator()
        .generate(&WeekRequest {
            framework: &framework,
            profile: &profile,
            week_number: 0,
            directives: &[],
            generated_at: Utc::now(),
        })
        .unwrap_err();
    assert!(matches!(error, ProgramError::InvalidInput { .. }));
}

#[test]
fn test_same_request_produces_the_same_week() {
    let profile = common::four_day_profile();
    let framework = marathon_framework(&profile);
    let now = Utc::now();
    let request = WeekRequest {
        framework: &framework,
        profile: &profile,
        week_number: 7,
        directives: &[AdaptationDirective::IncreaseIntensity],
        generated_at: now,
    };
    let first = generator().generate(&request).unwrap();
    let second = generator().generate(&request).unwrap();
    assert_eq!(first.week, second.week);
    assert_eq!(first.week.phase_name, "Build");
}
