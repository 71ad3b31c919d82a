// ABOUTME: Program orchestrator: the public entry point sequencing gate, analyzer, week generator, and persistence
// ABOUTME: Every program mutation is a versioned read-modify-write; concurrent appends fail with ConcurrentModification
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Program Orchestrator
//!
//! Drives a program through its progression states:
//!
//! ```text
//! AwaitingCompletion(N) --gate passes--> Eligible(N) --append--> Generated(N+1)
//! ```
//!
//! A blocked gate is returned as data ([`GenerationOutcome::Blocked`]) and never
//! changes state. Week generation is not retried internally: losing the
//! versioned write surfaces `ConcurrentModification` so the caller re-reads.
//! Completion, skip, modification, and status writes retry a bounded number
//! of times because they re-apply cleanly to fresh state.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use super::completion_store::{CompletionInput, CompletionStore};
use crate::catalog::StaticExerciseCatalog;
use crate::config::{ProgramPolicy, ServerConfig};
use crate::database_plugins::factory::Database;
use crate::database_plugins::{ProgramRepository, VersionedProgram};
use crate::errors::{AppError, AppResult, ErrorCode, ProgramError};
use crate::intelligence::{
    resolve_exercise, ExerciseCatalog, FrameworkGenerator, GeneratedWeek, KeywordSignalExtractor,
    PrerequisiteGate, SignalExtractor, WeekGenerator, WeekRequest, WeeklySummaryCalculator,
};
use crate::llm::{GuardedGenerator, OpenAiCompatibleGenerator, WeekNarrator};
use crate::logging::ProgramLogger;
use crate::models::{
    AdaptationDirective, GenerationAuditRecord, Milestone, NarrationSource, PerformancePattern,
    PrerequisiteCheck, Program, ProgramStatus, ProgressionState, TrainingWeek, UserProfile,
    WeeklyCompletionSummary, WorkoutModification,
};

/// Context returned with a generated week
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekInsights {
    /// Directives applied to the week, in application order
    pub directives: Vec<AdaptationDirective>,
    /// Directives dropped by conflict resolution
    pub suppressed_directives: Vec<AdaptationDirective>,
    /// Patterns behind the directives
    pub patterns: Vec<PerformancePattern>,
    /// False when there was too little history to analyze
    pub analysis_available: bool,
    /// Template exercises the catalog could not resolve
    pub placeholder_exercises: Vec<String>,
    /// Origin of the narrative note
    pub narration_source: NarrationSource,
    /// Whether `force_generate` was requested
    pub forced: bool,
    /// Gate result that the override bypassed
    pub bypassed_prerequisites: Option<PrerequisiteCheck>,
    /// Progression state after the append
    pub progression: ProgressionState,
}

/// Result of a generation attempt
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum GenerationOutcome {
    /// A new week was appended
    Generated {
        /// The new week
        week: TrainingWeek,
        /// Analysis and generation context
        insights: Box<WeekInsights>,
    },
    /// The gate refused progression; nothing changed
    Blocked {
        /// Why, and what to do about it
        prerequisites: PrerequisiteCheck,
    },
    /// Every planned week was already generated; the program is now completed
    ProgramComplete {
        /// The completed program
        program: Box<Program>,
    },
}

/// Program-level progress report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgramProgress {
    /// Program
    pub program_id: Uuid,
    /// Lifecycle status
    pub status: ProgramStatus,
    /// Weeks generated so far
    pub weeks_generated: u32,
    /// Planned program length
    pub estimated_weeks: u32,
    /// Phase of the current week
    pub current_phase: Option<String>,
    /// Completed / planned across every generated week, 0-100
    pub overall_completion_rate: f64,
    /// Mean weekly consistency, 0-100
    pub average_consistency: f64,
    /// Next milestone at or after the current week
    pub next_milestone: Option<Milestone>,
    /// Goal-achievement verdict from the configured thresholds
    pub goal_achieved: bool,
}

/// The engine's public surface
#[derive(Clone)]
pub struct ProgramOrchestrator {
    repository: Arc<dyn ProgramRepository>,
    catalog: Arc<dyn ExerciseCatalog>,
    completions: CompletionStore,
    framework_generator: FrameworkGenerator,
    week_generator: WeekGenerator,
    gate: PrerequisiteGate,
    narrator: WeekNarrator,
    signals: Arc<dyn SignalExtractor>,
    policy: ProgramPolicy,
}

impl ProgramOrchestrator {
    /// Create an orchestrator with template narration and keyword signal extraction
    #[must_use]
    pub fn new(
        repository: Arc<dyn ProgramRepository>,
        catalog: Arc<dyn ExerciseCatalog>,
        policy: ProgramPolicy,
    ) -> Self {
        Self {
            completions: CompletionStore::new(repository.clone(), policy.analyzer_config()),
            repository,
            week_generator: WeekGenerator::new(catalog.clone()),
            catalog,
            framework_generator: FrameworkGenerator,
            gate: PrerequisiteGate::new(policy.gate_min_completion_percent),
            narrator: WeekNarrator::template_only(),
            signals: Arc::new(KeywordSignalExtractor),
            policy,
        }
    }

    /// Build storage, catalog, and narration from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or the HTTP client
    /// for narration cannot be built.
    pub async fn from_config(config: &ServerConfig) -> AppResult<Self> {
        let database = Database::new(&config.database).await?;
        info!(backend = database.backend_info(), "Program store selected");

        let narrator = if config.text_generation.enabled {
            let generator = OpenAiCompatibleGenerator::new(&config.text_generation)?;
            WeekNarrator::with_generator(GuardedGenerator::new(
                Arc::new(generator),
                &config.text_generation,
            ))
        } else {
            WeekNarrator::template_only()
        };

        Ok(Self::new(
            Arc::new(database),
            Arc::new(StaticExerciseCatalog::builtin()),
            config.policy,
        )
        .with_narrator(narrator))
    }

    /// Replace the narrator
    #[must_use]
    pub fn with_narrator(mut self, narrator: WeekNarrator) -> Self {
        self.narrator = narrator;
        self
    }

    /// Replace the signal extractor used on profile notes
    #[must_use]
    pub fn with_signal_extractor(mut self, signals: Arc<dyn SignalExtractor>) -> Self {
        self.signals = signals;
        self
    }

    /// Active policy
    #[must_use]
    pub const fn policy(&self) -> &ProgramPolicy {
        &self.policy
    }

    // ================================
    // Program lifecycle
    // ================================

    /// Derive the framework for `goal` and store a new active program with no weeks
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an empty goal, `InvalidGoalWindow` for an
    /// unusable target date, and storage errors.
    #[instrument(skip_all, fields(user_id = %user_id))]
    pub async fn create_program(
        &self,
        user_id: Uuid,
        goal: &str,
        target_date: NaiveDate,
        profile: UserProfile,
    ) -> AppResult<Program> {
        let profile = self.enrich_profile(profile);
        let now = Utc::now();
        let framework =
            self.framework_generator
                .generate(goal, target_date, now.date_naive(), &profile)?;
        let program = Program::new(user_id, goal.trim(), target_date, profile, framework, now);
        self.repository.create_program(&program).await?;

        info!(
            program.id = %program.id,
            framework = ?program.framework.kind,
            estimated_weeks = program.framework.estimated_weeks,
            "Program created"
        );
        Ok(program)
    }

    /// Get a program owned by `user_id`
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` when the program does not exist for this user.
    pub async fn get_program(&self, user_id: Uuid, program_id: Uuid) -> AppResult<Program> {
        Ok(self.load(user_id, program_id).await?.program)
    }

    /// Every program owned by `user_id`, newest first
    ///
    /// # Errors
    ///
    /// Propagates storage errors.
    pub async fn list_programs(&self, user_id: Uuid) -> AppResult<Vec<Program>> {
        self.repository.list_programs(user_id).await
    }

    /// Pause, resume, archive, or complete a program
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when leaving a terminal status, `ResourceNotFound`
    /// for an unknown program, and `ConcurrentModification` once retries run out.
    #[instrument(skip_all, fields(user_id = %user_id, program_id = %program_id, status = %status))]
    pub async fn set_program_status(
        &self,
        user_id: Uuid,
        program_id: Uuid,
        status: ProgramStatus,
    ) -> AppResult<Program> {
        let (program, ()) = self
            .mutate_program(user_id, program_id, "set_program_status", |program| {
                if program.status == status {
                    return Ok(());
                }
                if program.status.is_terminal() {
                    return Err(ProgramError::invalid_input(format!(
                        "program is {} and can no longer change status",
                        program.status
                    ))
                    .into());
                }
                program.status = status;
                Ok(())
            })
            .await?;
        info!("Program status changed");
        Ok(program)
    }

    // ================================
    // Progression
    // ================================

    /// Evaluate the gate for the current week without changing anything
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown program and storage errors.
    pub async fn check_prerequisites(
        &self,
        user_id: Uuid,
        program_id: Uuid,
    ) -> AppResult<PrerequisiteCheck> {
        let program = self.load(user_id, program_id).await?.program;
        Ok(self
            .evaluate_gate(&program)
            .await?
            .unwrap_or_else(first_week_check))
    }

    /// Generate the next week, or explain why not.
    ///
    /// `force_generate` bypasses the gate; the bypass is recorded as a
    /// [`GenerationAuditRecord`] and flagged in the insights.
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound`, `ProgramNotActive`, or
    /// `ConcurrentModification` (another writer appended first; re-read and retry).
    #[instrument(
        skip_all,
        fields(user_id = %user_id, program_id = %program_id, force = force_generate)
    )]
    pub async fn generate_next_week(
        &self,
        user_id: Uuid,
        program_id: Uuid,
        force_generate: bool,
    ) -> AppResult<GenerationOutcome> {
        let VersionedProgram {
            mut program,
            version,
        } = self.load(user_id, program_id).await?;
        program.ensure_active()?;
        let now = Utc::now();

        let check = self.evaluate_gate(&program).await?;
        let gate_passed = check.as_ref().is_none_or(|check| check.can_proceed);
        if let Some(blocked) = check.as_ref().filter(|_| !gate_passed && !force_generate) {
            info!(blockers = ?blocked.blockers, "Week generation blocked by prerequisites");
            return Ok(GenerationOutcome::Blocked {
                prerequisites: blocked.clone(),
            });
        }

        if program.all_weeks_generated() {
            program.status = ProgramStatus::Completed;
            program.updated_at = now;
            if let Some(last) = program.weeks.last_mut() {
                last.completed = true;
            }
            self.repository.update_program(&program, version).await?;
            info!(weeks = program.current_week_number, "Program completed");
            return Ok(GenerationOutcome::ProgramComplete {
                program: Box::new(program),
            });
        }

        let analysis = self.completions.analyze(program.id, now).await?;
        let analysis_available = analysis.is_some();
        let (directives, suppressed_directives, patterns) = analysis.map_or_else(
            || (Vec::new(), Vec::new(), Vec::new()),
            |outcome| {
                (
                    outcome.directives,
                    outcome.suppressed_directives,
                    outcome.patterns,
                )
            },
        );

        let week_number = program.current_week_number + 1;
        let GeneratedWeek {
            mut week,
            applied_directives,
            placeholder_exercises,
        } = self.week_generator.generate(&WeekRequest {
            framework: &program.framework,
            profile: &program.profile,
            week_number,
            directives: &directives,
            generated_at: now,
        })?;

        let (narrative, narration_source) =
            self.narrator.narrate(program.id, &program.goal, &week).await;
        week.coaching_notes.push(narrative);
        week.narration_source = narration_source;

        let bypassed_prerequisites = if gate_passed { None } else { check.clone() };
        if bypassed_prerequisites.is_some() {
            week.coaching_notes
                .push("Generated with a prerequisite override".to_owned());
        }

        program.append_week(week.clone(), now)?;
        // Audit before commit: a failed audit write must leave the program untouched
        if force_generate {
            self.repository
                .record_generation_audit(&GenerationAuditRecord {
                    id: Uuid::new_v4(),
                    program_id: program.id,
                    user_id,
                    generated_week: week_number,
                    forced: true,
                    prerequisites: check,
                    recorded_at: now,
                })
                .await?;
        }
        if let Err(error) = self.repository.update_program(&program, version).await {
            if error.code == ErrorCode::ConcurrentModification {
                ProgramLogger::log_write_conflict(program_id, version, "generate_next_week");
            }
            return Err(error);
        }

        ProgramLogger::log_week_generated(user_id, program_id, week_number, force_generate);

        Ok(GenerationOutcome::Generated {
            week,
            insights: Box::new(WeekInsights {
                directives: applied_directives,
                suppressed_directives,
                patterns,
                analysis_available,
                placeholder_exercises,
                narration_source,
                forced: force_generate,
                bypassed_prerequisites,
                progression: ProgressionState::Generated(week_number),
            }),
        })
    }

    // ================================
    // Week interaction
    // ================================

    /// Log a workout; a repeated save for the same workout replaces the earlier one.
    ///
    /// Returns the composite completion id.
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown program, week, or workout,
    /// `ProgramNotActive`, `InvalidInput` for out-of-range ratings, and
    /// `ConcurrentModification` once retries run out.
    #[instrument(
        skip_all,
        fields(
            user_id = %user_id,
            program_id = %program_id,
            week = week_number,
            workout_id = %workout_id
        )
    )]
    pub async fn save_completion(
        &self,
        user_id: Uuid,
        program_id: Uuid,
        week_number: u32,
        workout_id: &str,
        input: CompletionInput,
    ) -> AppResult<String> {
        let program = self.load(user_id, program_id).await?.program;
        program.ensure_active()?;
        let workout = program
            .week(week_number)
            .ok_or_else(|| week_not_found(program_id, week_number))?
            .workout(workout_id)
            .ok_or_else(|| workout_not_found(week_number, workout_id))?;

        let now = Utc::now();
        let completion = input.into_completion(user_id, program_id, week_number, workout, now);
        completion.validate()?;
        let completion_id = completion.completion_id();

        let (program, ()) = self
            .mutate_program(user_id, program_id, "save_completion", |program| {
                program.ensure_active()?;
                let week = program
                    .week_mut(week_number)
                    .ok_or_else(|| week_not_found(program_id, week_number))?;
                let workout = week
                    .workout_mut(workout_id)
                    .ok_or_else(|| workout_not_found(week_number, workout_id))?;
                workout.completed = completion.is_complete;
                if completion.is_complete {
                    workout.skipped = false;
                    workout.skip_reason = None;
                }
                workout.completion_id = Some(completion_id.clone());
                week.refresh_completed();
                Ok(())
            })
            .await?;

        let week = program
            .week(week_number)
            .ok_or_else(|| week_not_found(program_id, week_number))?;
        let saved = self.completions.save_completion(week, &completion, now).await?;

        ProgramLogger::log_completion_saved(
            user_id,
            program_id,
            week_number,
            workout_id,
            saved.summary.completion_rate,
        );
        Ok(saved.completion_id)
    }

    /// Mark a workout skipped and note the reason on its week
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an already completed workout, plus the
    /// lookup, status, and concurrency errors of [`Self::save_completion`].
    #[instrument(
        skip_all,
        fields(
            user_id = %user_id,
            program_id = %program_id,
            week = week_number,
            workout_id = %workout_id
        )
    )]
    pub async fn skip_day(
        &self,
        user_id: Uuid,
        program_id: Uuid,
        week_number: u32,
        workout_id: &str,
        reason: &str,
    ) -> AppResult<()> {
        let reason = reason.trim();
        let (program, ()) = self
            .mutate_program(user_id, program_id, "skip_day", |program| {
                program.ensure_active()?;
                let week = program
                    .week_mut(week_number)
                    .ok_or_else(|| week_not_found(program_id, week_number))?;
                let workout = week
                    .workout_mut(workout_id)
                    .ok_or_else(|| workout_not_found(week_number, workout_id))?;
                if workout.completed {
                    return Err(ProgramError::invalid_input(format!(
                        "workout '{workout_id}' is already completed"
                    ))
                    .into());
                }
                if workout.skipped {
                    return Ok(());
                }
                workout.skipped = true;
                workout.skip_reason = (!reason.is_empty()).then(|| reason.to_owned());
                let note = if reason.is_empty() {
                    format!("Skipped {}", workout.title)
                } else {
                    format!("Skipped {}: {reason}", workout.title)
                };
                week.coaching_notes.push(note);
                week.refresh_completed();
                Ok(())
            })
            .await?;

        let week = program
            .week(week_number)
            .ok_or_else(|| week_not_found(program_id, week_number))?;
        self.completions
            .recompute_summary(user_id, program_id, week, Utc::now())
            .await?;
        info!("Workout skipped");
        Ok(())
    }

    /// Apply a user modification to a generated workout
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an inapplicable modification, plus the
    /// lookup, status, and concurrency errors of [`Self::save_completion`].
    #[instrument(
        skip_all,
        fields(
            user_id = %user_id,
            program_id = %program_id,
            week = week_number,
            workout_id = %workout_id
        )
    )]
    pub async fn modify_workout(
        &self,
        user_id: Uuid,
        program_id: Uuid,
        week_number: u32,
        workout_id: &str,
        modification: WorkoutModification,
    ) -> AppResult<TrainingWeek> {
        let catalog = self.catalog.as_ref();
        let (program, ()) = self
            .mutate_program(user_id, program_id, "modify_workout", |program| {
                program.ensure_active()?;
                let week = program
                    .week_mut(week_number)
                    .ok_or_else(|| week_not_found(program_id, week_number))?;
                apply_modification(week, workout_id, &modification, catalog)
            })
            .await?;
        debug!(modification = ?modification, "Workout modified");

        program
            .week(week_number)
            .cloned()
            .ok_or_else(|| week_not_found(program_id, week_number))
    }

    // ================================
    // Reporting
    // ================================

    /// Summary for one week, computed fresh when none is stored yet
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown program or week.
    pub async fn get_weekly_summary(
        &self,
        user_id: Uuid,
        program_id: Uuid,
        week_number: u32,
    ) -> AppResult<WeeklyCompletionSummary> {
        let program = self.load(user_id, program_id).await?.program;
        let week = program
            .week(week_number)
            .ok_or_else(|| week_not_found(program_id, week_number))?;
        if let Some(summary) = self
            .repository
            .get_weekly_summary(program_id, week_number)
            .await?
        {
            return Ok(summary);
        }
        let completions = self
            .completions
            .get_week_completions(program_id, week_number)
            .await?;
        Ok(WeeklySummaryCalculator::summarize(
            program_id,
            user_id,
            week,
            &completions,
            Utc::now(),
        ))
    }

    /// Most recent detected patterns, newest first
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown program.
    pub async fn get_patterns(
        &self,
        user_id: Uuid,
        program_id: Uuid,
        limit: usize,
    ) -> AppResult<Vec<PerformancePattern>> {
        self.load(user_id, program_id).await?;
        self.repository.get_patterns(program_id, limit).await
    }

    /// Forced-generation audit trail, oldest first
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown program.
    pub async fn generation_audit(
        &self,
        user_id: Uuid,
        program_id: Uuid,
    ) -> AppResult<Vec<GenerationAuditRecord>> {
        self.load(user_id, program_id).await?;
        self.repository.list_generation_audit(program_id).await
    }

    /// Progress across every generated week
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown program.
    pub async fn progress_report(
        &self,
        user_id: Uuid,
        program_id: Uuid,
    ) -> AppResult<ProgramProgress> {
        let program = self.load(user_id, program_id).await?.program;
        let summaries = self.repository.list_weekly_summaries(program_id).await?;

        let planned: usize = program.weeks.iter().map(|week| week.workouts.len()).sum();
        let completed: usize = program.weeks.iter().map(TrainingWeek::completed_count).sum();
        let overall_completion_rate = rate(completed, planned);

        let weekly_consistency: Vec<f64> = program
            .weeks
            .iter()
            .map(|week| {
                summaries
                    .iter()
                    .find(|summary| summary.week_number == week.week_number)
                    .map_or_else(
                        || rate(week.completed_count(), week.workouts.len()),
                        |summary| summary.consistency_score,
                    )
            })
            .collect();
        let average_consistency = mean(&weekly_consistency);

        let goal_achieved = overall_completion_rate > self.policy.goal_completion_percent
            && average_consistency > self.policy.goal_consistency_percent
            && program.current_week_number >= program.framework.estimated_weeks;

        Ok(ProgramProgress {
            program_id,
            status: program.status,
            weeks_generated: program.current_week_number,
            estimated_weeks: program.framework.estimated_weeks,
            current_phase: program.current_week().map(|week| week.phase_name.clone()),
            overall_completion_rate,
            average_consistency,
            next_milestone: program
                .framework
                .next_milestone(program.current_week_number.max(1))
                .cloned(),
            goal_achieved,
        })
    }

    // ================================
    // Internals
    // ================================

    async fn load(&self, user_id: Uuid, program_id: Uuid) -> AppResult<VersionedProgram> {
        self.repository
            .get_program(user_id, program_id)
            .await?
            .ok_or_else(|| {
                AppError::from(ProgramError::ProgramNotFound { program_id }).with_user_id(user_id)
            })
    }

    async fn evaluate_gate(&self, program: &Program) -> AppResult<Option<PrerequisiteCheck>> {
        let Some(week) = program.current_week() else {
            return Ok(None);
        };
        let completed_ids = self
            .repository
            .get_weekly_summary(program.id, week.week_number)
            .await?
            .map(|summary| summary.completed_workout_ids)
            .unwrap_or_default();
        Ok(Some(self.gate.evaluate(&program.goal, week, &completed_ids)))
    }

    /// Read, apply, and conditionally write, retrying on version conflicts
    async fn mutate_program<T, F>(
        &self,
        user_id: Uuid,
        program_id: Uuid,
        operation: &'static str,
        mut apply: F,
    ) -> AppResult<(Program, T)>
    where
        F: FnMut(&mut Program) -> AppResult<T> + Send,
        T: Send,
    {
        let attempts = self.policy.max_write_retries.max(1);
        let mut attempt = 0;
        loop {
            attempt += 1;
            let VersionedProgram {
                mut program,
                version,
            } = self.load(user_id, program_id).await?;
            let value = apply(&mut program)?;
            program.updated_at = Utc::now();

            match self.repository.update_program(&program, version).await {
                Ok(_) => return Ok((program, value)),
                Err(error) if error.code == ErrorCode::ConcurrentModification => {
                    ProgramLogger::log_write_conflict(program_id, version, operation);
                    if attempt >= attempts {
                        return Err(error);
                    }
                }
                Err(error) => return Err(error),
            }
        }
    }

    fn enrich_profile(&self, mut profile: UserProfile) -> UserProfile {
        let Some(notes) = profile.notes.as_deref() else {
            return profile;
        };
        let signals = self.signals.extract(notes);
        if !signals.preferences.is_empty() {
            debug!(preferences = ?signals.preferences, "Preferences found in profile notes");
        }
        for limitation in signals.limitations {
            if !profile
                .limitations
                .iter()
                .any(|known| known.eq_ignore_ascii_case(&limitation))
            {
                profile.limitations.push(limitation);
            }
        }
        profile
    }
}

fn apply_modification(
    week: &mut TrainingWeek,
    workout_id: &str,
    modification: &WorkoutModification,
    catalog: &dyn ExerciseCatalog,
) -> AppResult<()> {
    let week_number = week.week_number;
    let workout = week
        .workout(workout_id)
        .ok_or_else(|| workout_not_found(week_number, workout_id))?;
    if workout.completed && !matches!(modification, WorkoutModification::CustomNote { .. }) {
        return Err(ProgramError::invalid_input(format!(
            "workout '{workout_id}' is already completed; only notes can be added"
        ))
        .into());
    }

    match modification {
        WorkoutModification::ReplaceExercise {
            from_exercise_id,
            to_exercise_id,
        } => {
            let workout = week
                .workout_mut(workout_id)
                .ok_or_else(|| workout_not_found(week_number, workout_id))?;
            let slot = workout
                .exercises
                .iter_mut()
                .find(|exercise| exercise.exercise_id == *from_exercise_id)
                .ok_or_else(|| {
                    ProgramError::invalid_input(format!(
                        "workout '{workout_id}' does not include '{from_exercise_id}'"
                    ))
                })?;
            *slot = resolve_exercise(catalog, to_exercise_id, slot.sets, slot.reps);
        }
        WorkoutModification::AdjustIntensity { delta } => {
            let workout = week
                .workout_mut(workout_id)
                .ok_or_else(|| workout_not_found(week_number, workout_id))?;
            let adjusted = i16::from(workout.target_rpe) + i16::from(*delta);
            workout.target_rpe = u8::try_from(adjusted.clamp(1, 10)).unwrap_or(1);
        }
        WorkoutModification::SwapDay { with_workout_id } => {
            if with_workout_id == workout_id {
                return Err(
                    ProgramError::invalid_input("a workout cannot swap days with itself").into(),
                );
            }
            let this_day = workout.day;
            let other_day = week
                .workout(with_workout_id)
                .ok_or_else(|| workout_not_found(week_number, with_workout_id))?
                .day;
            for workout in &mut week.workouts {
                if workout.id == workout_id {
                    workout.day = other_day;
                } else if workout.id == *with_workout_id {
                    workout.day = this_day;
                }
            }
            week.workouts
                .sort_by_key(|workout| workout.day.num_days_from_monday());
        }
        WorkoutModification::CustomNote { note } => {
            let note = note.trim();
            if note.is_empty() {
                return Err(ProgramError::invalid_input("note must not be empty").into());
            }
            week.workout_mut(workout_id)
                .ok_or_else(|| workout_not_found(week_number, workout_id))?
                .notes
                .push(note.to_owned());
        }
    }
    Ok(())
}

fn first_week_check() -> PrerequisiteCheck {
    PrerequisiteCheck {
        week_number: 0,
        completion_rate: 100.0,
        completed_workouts: 0,
        total_workouts: 0,
        missing_workouts: Vec::new(),
        warnings: Vec::new(),
        blockers: Vec::new(),
        can_proceed: true,
        coaching_message: "Your first week is ready to be generated.".to_owned(),
    }
}

fn week_not_found(program_id: Uuid, week_number: u32) -> AppError {
    AppError::not_found(format!("Week {week_number} of program {program_id}"))
}

fn workout_not_found(week_number: u32, workout_id: &str) -> AppError {
    AppError::not_found(format!("Workout '{workout_id}' in week {week_number}"))
}

// Counts are far below 2^52
#[allow(clippy::cast_precision_loss)]
fn rate(done: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        done as f64 / total as f64 * 100.0
    }
}

#[allow(clippy::cast_precision_loss)]
fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}
