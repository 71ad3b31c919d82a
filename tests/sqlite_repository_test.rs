// ABOUTME: Integration tests for the SQLite program store
// ABOUTME: Covers versioned updates, reopen persistence, completion upserts, pattern ordering, and orchestration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::sync::Arc;

use chrono::{Duration, NaiveDate, Utc};
use common::{build_week, four_day_profile, CompletionBuilder};
use pierre_programs::catalog::StaticExerciseCatalog;
use pierre_programs::config::{DatabaseUrl, ProgramPolicy};
use pierre_programs::database_plugins::factory::Database;
use pierre_programs::database_plugins::sqlite::SqliteDatabase;
use pierre_programs::database_plugins::ProgramRepository;
use pierre_programs::errors::ErrorCode;
use pierre_programs::intelligence::{FrameworkGenerator, WeeklySummaryCalculator};
use pierre_programs::models::{
    PatternDirection, PatternPriority, PatternType, PerformancePattern, Program, ProgramStatus,
};
use pierre_programs::services::{CompletionInput, GenerationOutcome, ProgramOrchestrator};
use tempfile::TempDir;
use uuid::Uuid;

async fn memory_store() -> SqliteDatabase {
    common::init_test_logging();
    SqliteDatabase::new(&DatabaseUrl::SqliteMemory)
        .await
        .expect("in-memory SQLite should open")
}

fn sample_program(user_id: Uuid) -> Program {
    let today = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
    let profile = four_day_profile();
    let framework = FrameworkGenerator
        .generate("Run a marathon", today + Duration::weeks(16), today, &profile)
        .unwrap();
    Program::new(
        user_id,
        "Run a marathon",
        today + Duration::weeks(16),
        profile,
        framework,
        Utc::now(),
    )
}

fn pattern(program_id: Uuid, pattern_type: PatternType, minutes_ago: i64) -> PerformancePattern {
    PerformancePattern {
        id: Uuid::new_v4(),
        program_id,
        pattern_type,
        direction: PatternDirection::Stable,
        confidence: 0.7,
        evidence: vec!["steady".to_owned()],
        recommendations: Vec::new(),
        priority: PatternPriority::Low,
        directives: Vec::new(),
        detected_at: Utc::now() - Duration::minutes(minutes_ago),
    }
}

#[tokio::test]
async fn test_update_with_stale_version_is_a_conflict() {
    let store = memory_store().await;
    let user_id = Uuid::new_v4();
    let mut program = sample_program(user_id);
    let created = store.create_program(&program).await.unwrap();
    assert_eq!(created.version, 1);

    program.status = ProgramStatus::Paused;
    let version = store.update_program(&program, 1).await.unwrap();
    assert_eq!(version, 2);

    program.status = ProgramStatus::Active;
    let error = store.update_program(&program, 1).await.unwrap_err();
    assert_eq!(error.code, ErrorCode::ConcurrentModification);

    let stored = store.get_program(user_id, program.id).await.unwrap().unwrap();
    assert_eq!(stored.version, 2);
    assert_eq!(stored.program.status, ProgramStatus::Paused);
}

#[tokio::test]
async fn test_update_of_missing_program_is_not_found() {
    let store = memory_store().await;
    let program = sample_program(Uuid::new_v4());
    let error = store.update_program(&program, 1).await.unwrap_err();
    assert_eq!(error.code, ErrorCode::ResourceNotFound);
}

#[tokio::test]
async fn test_programs_are_scoped_to_their_owner() {
    let store = memory_store().await;
    let owner = Uuid::new_v4();
    let program = sample_program(owner);
    store.create_program(&program).await.unwrap();

    assert!(store
        .get_program(Uuid::new_v4(), program.id)
        .await
        .unwrap()
        .is_none());
    assert_eq!(store.list_programs(owner).await.unwrap().len(), 1);
    assert!(store.list_programs(Uuid::new_v4()).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_completion_upsert_replaces_the_previous_record() {
    let store = memory_store().await;
    let program_id = Uuid::new_v4();
    let first = CompletionBuilder::new(program_id, 1, "w1-1").rpe(5).build();
    let second = CompletionBuilder::new(program_id, 1, "w1-1").rpe(9).build();
    let other = CompletionBuilder::new(program_id, 1, "w1-2")
        .at(Utc::now() - Duration::hours(2))
        .build();

    let first_id = store.upsert_completion(&first).await.unwrap();
    let second_id = store.upsert_completion(&second).await.unwrap();
    store.upsert_completion(&other).await.unwrap();
    assert_eq!(first_id, second_id);

    let week = store.get_week_completions(program_id, 1).await.unwrap();
    assert_eq!(week.len(), 2);
    let w1_1 = week.iter().find(|c| c.workout_id == "w1-1").unwrap();
    assert_eq!(w1_1.rpe, 9);

    let recent = store.get_recent_completions(program_id, 1).await.unwrap();
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].workout_id, "w1-1");
}

#[tokio::test]
async fn test_patterns_are_returned_newest_first() {
    let store = memory_store().await;
    let program_id = Uuid::new_v4();
    store
        .save_patterns(&[
            pattern(program_id, PatternType::Consistency, 30),
            pattern(program_id, PatternType::Recovery, 5),
            pattern(program_id, PatternType::Intensity, 60),
        ])
        .await
        .unwrap();
    store
        .save_patterns(&[pattern(Uuid::new_v4(), PatternType::Recovery, 1)])
        .await
        .unwrap();

    let patterns = store.get_patterns(program_id, 10).await.unwrap();
    let types: Vec<PatternType> = patterns.iter().map(|p| p.pattern_type).collect();
    assert_eq!(
        types,
        vec![
            PatternType::Recovery,
            PatternType::Consistency,
            PatternType::Intensity
        ]
    );
    assert_eq!(store.get_patterns(program_id, 2).await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_weekly_summary_is_replaced_per_week() {
    let store = memory_store().await;
    let program_id = Uuid::new_v4();
    let user_id = Uuid::new_v4();
    let week = build_week(1, 4, 1);

    let empty = WeeklySummaryCalculator::summarize(
        program_id,
        user_id,
        &week,
        &[],
        Utc::now(),
    );
    store.save_weekly_summary(&empty).await.unwrap();

    let completion = CompletionBuilder::new(program_id, 1, "w1-1")
        .user(user_id)
        .build();
    let updated = WeeklySummaryCalculator::summarize(
        program_id,
        user_id,
        &week,
        &[completion],
        Utc::now(),
    );
    store.save_weekly_summary(&updated).await.unwrap();

    let stored = store.get_weekly_summary(program_id, 1).await.unwrap().unwrap();
    assert_eq!(stored.completed_workouts, 1);
    assert_eq!(store.list_weekly_summaries(program_id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_file_database_survives_reopen() {
    common::init_test_logging();
    let dir = TempDir::new().unwrap();
    let url = DatabaseUrl::Sqlite {
        path: dir.path().join("nested").join("programs.db"),
    };
    let user_id = Uuid::new_v4();
    let program = sample_program(user_id);

    {
        let store = SqliteDatabase::new(&url).await.unwrap();
        store.create_program(&program).await.unwrap();
        store
            .upsert_completion(&CompletionBuilder::new(program.id, 1, "w1-1").build())
            .await
            .unwrap();
        store.pool().close().await;
    }

    let reopened = SqliteDatabase::new(&url).await.unwrap();
    let stored = reopened
        .get_program(user_id, program.id)
        .await
        .unwrap()
        .expect("program should persist");
    assert_eq!(stored.version, 1);
    assert_eq!(stored.program.goal, program.goal);
    assert_eq!(stored.program.framework, program.framework);
    assert_eq!(stored.program.created_at, program.created_at);
    assert_eq!(
        reopened
            .get_week_completions(program.id, 1)
            .await
            .unwrap()
            .len(),
        1
    );
}

#[tokio::test]
async fn test_orchestrator_runs_over_sqlite() {
    common::init_test_logging();
    let database = Database::new(&DatabaseUrl::SqliteMemory).await.unwrap();
    assert_eq!(database.backend_info(), "SQLite");
    let orchestrator = ProgramOrchestrator::new(
        Arc::new(database),
        Arc::new(StaticExerciseCatalog::builtin()),
        ProgramPolicy::default(),
    );
    let user_id = Uuid::new_v4();

    let program = orchestrator
        .create_program(
            user_id,
            "Squat 150 kg",
            common::target_in_weeks(12),
            four_day_profile(),
        )
        .await
        .unwrap();

    let outcome = orchestrator
        .generate_next_week(user_id, program.id, false)
        .await
        .unwrap();
    let GenerationOutcome::Generated { week, .. } = outcome else {
        panic!("first week should generate");
    };

    let workout_id = week.workouts[0].id.clone();
    orchestrator
        .save_completion(
            user_id,
            program.id,
            1,
            &workout_id,
            CompletionInput::default(),
        )
        .await
        .unwrap();

    let stored = orchestrator.get_program(user_id, program.id).await.unwrap();
    assert_eq!(stored.current_week_number, 1);
    assert!(stored.week(1).unwrap().workout(&workout_id).unwrap().completed);

    let summary = orchestrator
        .get_weekly_summary(user_id, program.id, 1)
        .await
        .unwrap();
    assert_eq!(summary.completed_workout_ids, vec![workout_id]);
}
