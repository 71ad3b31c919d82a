// ABOUTME: Integration tests for the progression gate
// ABOUTME: Covers completion thresholds, key-workout blockers, warnings, and coaching messages
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::build_week;
use pierre_programs::intelligence::PrerequisiteGate;
use pierre_programs::models::{ProgressionState, TrainingWeek};

const GOAL: &str = "Run a marathon";

fn mark_completed(week: &mut TrainingWeek, ids: &[&str]) {
    for workout in &mut week.workouts {
        if ids.contains(&workout.id.as_str()) {
            workout.completed = true;
        }
    }
}

#[test]
fn test_non_key_completions_without_any_key_workout_block_progression() {
    // 7 workouts, keys are w1-1 and w1-2; the five supporting sessions are done
    let mut week = build_week(1, 7, 2);
    mark_completed(&mut week, &["w1-3", "w1-4", "w1-5", "w1-6", "w1-7"]);

    let check = PrerequisiteGate::default().evaluate(GOAL, &week, &[]);

    assert!((check.completion_rate - 500.0 / 7.0).abs() < 1e-9);
    assert_eq!(check.completed_workouts, 5);
    assert_eq!(check.total_workouts, 7);
    assert!(!check.can_proceed);
    assert_eq!(check.blockers.len(), 1);
    assert!(check.blockers[0].contains("No key workout"));
    assert_eq!(check.missing_workouts, vec!["Session w1-1", "Session w1-2"]);
    assert!(check.coaching_message.contains("Session w1-1"));
    assert_eq!(
        ProgressionState::from_check(&check),
        ProgressionState::AwaitingCompletion(1)
    );
}

#[test]
fn test_low_completion_blocks_even_with_key_done() {
    let mut week = build_week(3, 5, 1);
    mark_completed(&mut week, &["w3-1", "w3-2"]);

    let check = PrerequisiteGate::default().evaluate(GOAL, &week, &[]);

    assert!((check.completion_rate - 40.0).abs() < 1e-9);
    assert!(!check.can_proceed);
    assert!(check.blockers[0].contains("60%"));
}

#[test]
fn test_threshold_is_inclusive_and_warns_below_comfortable() {
    let mut week = build_week(2, 5, 1);
    mark_completed(&mut week, &["w2-1", "w2-2", "w2-3"]);

    let check = PrerequisiteGate::default().evaluate(GOAL, &week, &[]);

    assert!((check.completion_rate - 60.0).abs() < 1e-9);
    assert!(check.can_proceed);
    assert!(check.blockers.is_empty());
    assert!(check.warnings.iter().any(|w| w.contains("80%")));
    assert!(check.coaching_message.starts_with("Great work!"));
    assert!(check.coaching_message.contains("Week 3"));
    assert!(check.coaching_message.contains(GOAL));
}

#[test]
fn test_summary_ids_count_as_completed() {
    let week = build_week(1, 4, 1);
    let completed = vec!["w1-1".to_owned(), "w1-2".to_owned(), "w1-3".to_owned()];

    let check = PrerequisiteGate::default().evaluate(GOAL, &week, &completed);

    assert_eq!(check.completed_workouts, 3);
    assert!(check.can_proceed);
    assert_eq!(check.missing_workouts, vec!["Session w1-4"]);
}

#[test]
fn test_skipped_workouts_and_missed_keys_are_warnings() {
    let mut week = build_week(4, 5, 2);
    mark_completed(&mut week, &["w4-1", "w4-3", "w4-4", "w4-5"]);
    week.workouts[1].skipped = true;

    let check = PrerequisiteGate::default().evaluate(GOAL, &week, &[]);

    assert!(check.can_proceed);
    assert!(check.warnings.iter().any(|w| w.contains("Key workouts missed")));
    assert!(check.warnings.iter().any(|w| w.contains("skipped")));
}

#[test]
fn test_empty_week_passes() {
    let week = build_week(5, 0, 0);
    let check = PrerequisiteGate::default().evaluate(GOAL, &week, &[]);
    assert!((check.completion_rate - 100.0).abs() < f64::EPSILON);
    assert!(check.can_proceed);
}

#[test]
fn test_custom_threshold() {
    let mut week = build_week(1, 4, 1);
    mark_completed(&mut week, &["w1-1", "w1-2", "w1-3"]);

    let strict = PrerequisiteGate::new(90.0);
    assert!((strict.min_completion_percent() - 90.0).abs() < f64::EPSILON);
    assert!(!strict.evaluate(GOAL, &week, &[]).can_proceed);
    assert!(PrerequisiteGate::new(50.0)
        .evaluate(GOAL, &week, &[])
        .can_proceed);
}
