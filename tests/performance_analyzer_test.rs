// ABOUTME: Integration tests for completion pattern detection and directive mapping
// ABOUTME: Covers recovery, intensity, and consistency patterns plus conflict resolution
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use chrono::{Duration, Utc};
use common::{completion_series, CompletionBuilder};
use pierre_programs::errors::ProgramError;
use pierre_programs::intelligence::{AnalyzerConfig, PerformanceAnalyzer};
use pierre_programs::models::{
    AdaptationDirective, EnergyLevel, PatternDirection, PatternPriority, PatternType,
};
use uuid::Uuid;

#[test]
fn test_high_rpe_streak_triggers_recovery_pattern() {
    let program_id = Uuid::new_v4();
    let completions = completion_series(program_id, 7, 8);

    let outcome = PerformanceAnalyzer::default()
        .analyze(program_id, &completions, Utc::now())
        .unwrap();

    let recovery = outcome
        .patterns
        .iter()
        .find(|p| p.pattern_type == PatternType::Recovery)
        .expect("recovery pattern should fire");
    assert_eq!(recovery.priority, PatternPriority::High);
    assert_eq!(recovery.direction, PatternDirection::Concerning);
    assert!(recovery.directives.contains(&AdaptationDirective::AddRecovery));
    assert!(outcome.directives.contains(&AdaptationDirective::AddRecovery));
    assert!(outcome
        .directives
        .contains(&AdaptationDirective::ReduceIntensity));
    assert!(!outcome
        .directives
        .contains(&AdaptationDirective::IncreaseIntensity));
}

#[test]
fn test_fewer_than_minimum_records_is_insufficient_data() {
    let program_id = Uuid::new_v4();
    let completions = completion_series(program_id, 4, 6);

    let error = PerformanceAnalyzer::default()
        .analyze(program_id, &completions, Utc::now())
        .unwrap_err();
    assert!(matches!(
        error,
        ProgramError::InsufficientData {
            available: 4,
            required: 5
        }
    ));
}

#[test]
fn test_consistent_easy_training_maintains_and_adds_intensity() {
    let program_id = Uuid::new_v4();
    let completions = completion_series(program_id, 10, 5);

    let outcome = PerformanceAnalyzer::default()
        .analyze(program_id, &completions, Utc::now())
        .unwrap();

    assert_eq!(outcome.patterns.len(), 1);
    let consistency = &outcome.patterns[0];
    assert_eq!(consistency.pattern_type, PatternType::Consistency);
    assert_eq!(consistency.direction, PatternDirection::Improving);
    assert_eq!(
        outcome.directives,
        vec![
            AdaptationDirective::IncreaseIntensity,
            AdaptationDirective::MaintainProgression
        ]
    );
    assert!(outcome.suppressed_directives.is_empty());
}

#[test]
fn test_low_completion_reduces_volume_and_simplifies() {
    let program_id = Uuid::new_v4();
    let start = Utc::now() - Duration::days(10);
    let completions: Vec<_> = (0..6)
        .map(|index| {
            let builder = CompletionBuilder::new(program_id, 1, &format!("w1-{index}"))
                .at(start + Duration::days(index));
            if index < 4 {
                builder.incomplete().build()
            } else {
                builder.build()
            }
        })
        .collect();

    let outcome = PerformanceAnalyzer::default()
        .analyze(program_id, &completions, Utc::now())
        .unwrap();

    let consistency = outcome
        .patterns
        .iter()
        .find(|p| p.pattern_type == PatternType::Consistency)
        .unwrap();
    assert_eq!(consistency.direction, PatternDirection::Concerning);
    assert_eq!(
        outcome.directives,
        vec![
            AdaptationDirective::ReduceVolume,
            AdaptationDirective::SimplifyWorkouts
        ]
    );
}

#[test]
fn test_rising_rpe_is_flagged_for_monitoring() {
    let program_id = Uuid::new_v4();
    let start = Utc::now() - Duration::days(20);
    let completions: Vec<_> = (0..14)
        .map(|index| {
            let rpe = if index < 7 { 4 } else { 7 };
            CompletionBuilder::new(program_id, 1, &format!("w1-{index}"))
                .rpe(rpe)
                .at(start + Duration::days(index))
                .build()
        })
        .collect();

    let outcome = PerformanceAnalyzer::default()
        .analyze(program_id, &completions, Utc::now())
        .unwrap();

    assert!(outcome
        .patterns
        .iter()
        .any(|p| p.pattern_type == PatternType::Intensity));
    assert!(outcome.directives.contains(&AdaptationDirective::MonitorLoad));
}

#[test]
fn test_low_energy_counts_toward_recovery_deficit() {
    let program_id = Uuid::new_v4();
    let start = Utc::now() - Duration::days(6);
    let completions: Vec<_> = (0..6)
        .map(|index| {
            let energy = if index % 2 == 0 {
                EnergyLevel::Low
            } else {
                EnergyLevel::High
            };
            CompletionBuilder::new(program_id, 1, &format!("w1-{index}"))
                .energy(energy)
                .at(start + Duration::days(index))
                .build()
        })
        .collect();

    let outcome = PerformanceAnalyzer::default()
        .analyze(program_id, &completions, Utc::now())
        .unwrap();

    assert_eq!(outcome.patterns[0].pattern_type, PatternType::Recovery);
    // Consistency is strong but yields to the recovery concern
    assert!(!outcome
        .directives
        .contains(&AdaptationDirective::MaintainProgression));
}

#[test]
fn test_window_only_uses_most_recent_records() {
    let program_id = Uuid::new_v4();
    let start = Utc::now() - Duration::days(40);
    let mut completions: Vec<_> = (0..10)
        .map(|index| {
            CompletionBuilder::new(program_id, 1, &format!("old-{index}"))
                .rpe(9)
                .at(start + Duration::hours(index))
                .build()
        })
        .collect();
    completions.extend((0..5).map(|index| {
        CompletionBuilder::new(program_id, 2, &format!("new-{index}"))
            .rpe(5)
            .at(Utc::now() - Duration::hours(index))
            .build()
    }));

    let analyzer = PerformanceAnalyzer::new(AnalyzerConfig {
        window_size: 5,
        min_records: 5,
    });
    let outcome = analyzer
        .analyze(program_id, &completions, Utc::now())
        .unwrap();

    assert_eq!(outcome.window_size, 5);
    assert!(outcome
        .patterns
        .iter()
        .all(|p| p.pattern_type != PatternType::Recovery));
}
