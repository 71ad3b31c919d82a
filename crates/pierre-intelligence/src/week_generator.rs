// ABOUTME: Week generator producing exactly one training week from the framework and directives
// ABOUTME: Trims phase templates, applies within-phase progression, then applies directives in fixed order
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Week Generator
//!
//! Produces the next [`TrainingWeek`] of a program. Generation is a pure
//! function of its request:
//!
//! 1. select the phase template and trim it to the athlete's training days
//! 2. scale durations for the week's position inside the phase
//! 3. week 1 only: derive the conservative starter set
//! 4. apply adaptation directives in [`AdaptationDirective::APPLICATION_ORDER`]
//! 5. enforce the key-workout post-condition
//! 6. resolve exercises through the catalog
//!
//! The generator never appends to a program; the orchestrator does.

use std::sync::Arc;

use chrono::{DateTime, Utc, Weekday};
use pierre_core::constants::completion::{MAX_RPE, MIN_RPE};
use pierre_core::constants::week_generation::{
    INTENSITY_STEP, MAX_DURATION_GROWTH, MIN_SESSION_MINUTES, RECOVERY_EXTENSION_MINUTES,
    RECOVERY_PHASE_REDUCTION, RECOVERY_SESSION_MINUTES, RECOVERY_SESSION_RPE,
    SIMPLIFIED_MAX_RPE, STARTER_DURATION_FACTOR, STARTER_RPE_REDUCTION, VOLUME_REDUCTION_FACTOR,
    WEEKLY_DURATION_GROWTH,
};
use pierre_core::errors::ProgramError;
use pierre_core::models::{
    AdaptationDirective, NarrationSource, Phase, ProgramFramework, TrainingWeek, UserProfile,
    Workout, WorkoutType,
};
use tracing::debug;

use crate::catalog::{resolve_exercise, ExerciseCatalog};
use crate::templates::{self, ExerciseSlot, SessionRole, WorkoutTemplate};

/// Inputs for one generation
#[derive(Debug, Clone)]
pub struct WeekRequest<'a> {
    /// Program framework
    pub framework: &'a ProgramFramework,
    /// Athlete profile
    pub profile: &'a UserProfile,
    /// Week to generate (1-based)
    pub week_number: u32,
    /// Analyzer directives; empty for week 1
    pub directives: &'a [AdaptationDirective],
    /// Timestamp stamped on the week
    pub generated_at: DateTime<Utc>,
}

/// Generated week with generation metadata
#[derive(Debug, Clone)]
pub struct GeneratedWeek {
    /// The week, ready to append
    pub week: TrainingWeek,
    /// Directives actually applied, in application order
    pub applied_directives: Vec<AdaptationDirective>,
    /// Exercise ids that fell back to placeholders
    pub placeholder_exercises: Vec<String>,
}

/// Mutable session while directives are applied
#[derive(Debug, Clone)]
struct DraftWorkout {
    day: Weekday,
    workout_type: WorkoutType,
    title: String,
    description: String,
    minutes: u32,
    rpe: u8,
    is_key: bool,
    is_optional: bool,
    exercises: &'static [ExerciseSlot],
}

impl From<&WorkoutTemplate> for DraftWorkout {
    fn from(template: &WorkoutTemplate) -> Self {
        Self {
            day: template.day,
            workout_type: template.workout_type,
            title: template.title.to_owned(),
            description: template.description.to_owned(),
            minutes: template.minutes,
            rpe: template.rpe,
            is_key: template.role == SessionRole::Key,
            is_optional: template.role == SessionRole::Optional,
            exercises: template.exercises,
        }
    }
}

/// Generates one week at a time
#[derive(Clone)]
pub struct WeekGenerator {
    catalog: Arc<dyn ExerciseCatalog>,
}

impl WeekGenerator {
    /// Create a generator backed by `catalog`
    #[must_use]
    pub fn new(catalog: Arc<dyn ExerciseCatalog>) -> Self {
        Self { catalog }
    }

    /// Generate the requested week.
    ///
    /// # Errors
    ///
    /// Returns [`ProgramError::InvalidInput`] when the framework has no phases
    /// or `week_number` is zero.
    pub fn generate(&self, request: &WeekRequest<'_>) -> Result<GeneratedWeek, ProgramError> {
        if request.week_number == 0 {
            return Err(ProgramError::invalid_input("week numbers start at 1"));
        }
        let (phase, week_in_phase) = request
            .framework
            .phase_for_week(request.week_number)
            .ok_or_else(|| ProgramError::invalid_input("framework has no phases"))?;

        let base = templates::base_week(request.framework.kind, phase.kind);
        let mut drafts = trim_to_available_days(base, request.framework.sessions_per_week);

        let factor = progression_factor(phase, week_in_phase);
        for draft in &mut drafts {
            draft.minutes = scale_minutes(draft.minutes, factor);
        }

        let mut notes = vec![format!(
            "{} phase, week {week_in_phase} of {}: {}",
            phase.name, phase.duration_weeks, phase.focus
        )];

        if request.week_number == 1 {
            apply_starter_set(&mut drafts);
            notes.push(
                "Starter week: sessions are shorter and easier while you settle into the plan"
                    .to_owned(),
            );
        }

        let applied_directives = ordered_directives(request.directives);
        for directive in &applied_directives {
            notes.push(apply_directive(*directive, &mut drafts));
        }

        ensure_post_conditions(&mut drafts, base, phase);

        if let Some(milestone) = request
            .framework
            .milestones
            .iter()
            .find(|m| m.week_number == request.week_number)
        {
            notes.push(format!("Milestone this week: {}", milestone.target_description));
        }
        if let Some(rule) = rotating_rule(request.framework, request.week_number) {
            notes.push(format!("Coaching rule: {rule}"));
        }
        for limitation in &request.profile.limitations {
            notes.push(format!(
                "Modify or skip any movement that aggravates your {limitation}"
            ));
        }

        let mut placeholder_exercises = Vec::new();
        let workouts: Vec<Workout> = drafts
            .into_iter()
            .zip(1..)
            .map(|(draft, index): (DraftWorkout, u32)| {
                let exercises: Vec<_> = draft
                    .exercises
                    .iter()
                    .map(|slot| {
                        resolve_exercise(
                            self.catalog.as_ref(),
                            slot.exercise_id,
                            slot.sets,
                            slot.reps,
                        )
                    })
                    .collect();
                placeholder_exercises.extend(
                    exercises
                        .iter()
                        .filter(|exercise| exercise.placeholder)
                        .map(|exercise| exercise.exercise_id.clone()),
                );
                Workout {
                    id: format!("w{}-{index}", request.week_number),
                    day: draft.day,
                    workout_type: draft.workout_type,
                    title: draft.title,
                    description: draft.description,
                    planned_duration_minutes: draft.minutes,
                    target_rpe: draft.rpe,
                    is_key_workout: draft.is_key,
                    is_optional: draft.is_optional,
                    completed: false,
                    skipped: false,
                    skip_reason: None,
                    completion_id: None,
                    exercises,
                    notes: Vec::new(),
                }
            })
            .collect();

        debug!(
            week_number = request.week_number,
            phase = %phase.name,
            workouts = workouts.len(),
            directives = applied_directives.len(),
            "Generated training week"
        );

        Ok(GeneratedWeek {
            week: TrainingWeek {
                week_number: request.week_number,
                phase_name: phase.name.clone(),
                theme: format!("{} week {week_in_phase}", phase.name),
                focus: phase.focus.clone(),
                workouts,
                generated_at: request.generated_at,
                completed: false,
                coaching_notes: notes,
                narration_source: NarrationSource::Template,
            },
            applied_directives,
            placeholder_exercises,
        })
    }
}

/// Keep every key session, then core, then optional sessions, up to `available` days
fn trim_to_available_days(base: &[WorkoutTemplate], available: u8) -> Vec<DraftWorkout> {
    let available = usize::from(available);
    let mut selected = vec![false; base.len()];
    let mut count = 0;
    for role in [SessionRole::Key, SessionRole::Core, SessionRole::Optional] {
        for (index, template) in base.iter().enumerate() {
            if template.role != role {
                continue;
            }
            if role == SessionRole::Key || count < available {
                if let Some(flag) = selected.get_mut(index) {
                    *flag = true;
                    count += 1;
                }
            }
        }
    }
    base.iter()
        .zip(selected)
        .filter(|(_, keep)| *keep)
        .map(|(template, _)| DraftWorkout::from(template))
        .collect()
}

fn progression_factor(phase: &Phase, week_in_phase: u32) -> f64 {
    let completed_in_phase = f64::from(week_in_phase.saturating_sub(1));
    if phase.kind.is_recovery() {
        (1.0 - RECOVERY_PHASE_REDUCTION * completed_in_phase).max(1.0 - MAX_DURATION_GROWTH)
    } else {
        1.0 + (WEEKLY_DURATION_GROWTH * completed_in_phase).min(MAX_DURATION_GROWTH)
    }
}

// Factors are bounded well inside u32 range
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn scale_minutes(minutes: u32, factor: f64) -> u32 {
    (f64::from(minutes) * factor).round().max(1.0) as u32
}

fn apply_starter_set(drafts: &mut Vec<DraftWorkout>) {
    if drafts.iter().any(|draft| !draft.is_optional) {
        drafts.retain(|draft| !draft.is_optional);
    }
    for draft in drafts {
        draft.minutes = scale_minutes(draft.minutes, STARTER_DURATION_FACTOR);
        draft.rpe = draft.rpe.saturating_sub(STARTER_RPE_REDUCTION).max(MIN_RPE);
    }
}

/// Deduplicate and sort into the fixed application order
fn ordered_directives(directives: &[AdaptationDirective]) -> Vec<AdaptationDirective> {
    AdaptationDirective::APPLICATION_ORDER
        .into_iter()
        .filter(|directive| directives.contains(directive))
        .collect()
}

/// Apply one directive and return its coaching note
fn apply_directive(directive: AdaptationDirective, drafts: &mut Vec<DraftWorkout>) -> String {
    match directive {
        AdaptationDirective::AddRecovery => add_recovery(drafts),
        AdaptationDirective::ReduceVolume => {
            if let Some(index) = drafts
                .iter()
                .rposition(|draft| draft.is_optional && !draft.is_key)
            {
                drafts.remove(index);
            }
            for draft in drafts
                .iter_mut()
                .filter(|d| !d.is_key && d.workout_type != WorkoutType::Recovery)
            {
                let reduced = scale_minutes(draft.minutes, VOLUME_REDUCTION_FACTOR);
                draft.minutes = reduced.max(MIN_SESSION_MINUTES).min(draft.minutes);
            }
            "Volume reduced: supporting sessions are shorter this week".to_owned()
        }
        AdaptationDirective::EmphasizeKeyWorkouts => {
            drafts.retain(|draft| draft.is_key || !draft.is_optional);
            "Key workouts take priority; optional sessions were removed".to_owned()
        }
        AdaptationDirective::SimplifyWorkouts => {
            for draft in drafts
                .iter_mut()
                .filter(|d| !d.is_key && d.workout_type.is_complex())
            {
                draft.description = format!(
                    "Simplified from {}: keep the effort steady and conversational",
                    draft.title
                );
                draft.title = "Steady easy session".to_owned();
                draft.workout_type = WorkoutType::Easy;
                draft.rpe = draft.rpe.min(SIMPLIFIED_MAX_RPE);
            }
            "Structured sessions were simplified to steady efforts".to_owned()
        }
        AdaptationDirective::ReduceIntensity => {
            for draft in drafts.iter_mut().filter(|d| !d.is_key) {
                draft.rpe = draft.rpe.saturating_sub(INTENSITY_STEP).max(MIN_RPE);
            }
            "Intensity lowered on supporting sessions".to_owned()
        }
        AdaptationDirective::IncreaseIntensity => {
            for draft in drafts.iter_mut().filter(|d| !d.is_key) {
                draft.rpe = draft.rpe.saturating_add(INTENSITY_STEP).min(MAX_RPE);
            }
            "Intensity raised on supporting sessions; you have been handling the load well"
                .to_owned()
        }
        AdaptationDirective::MonitorLoad => {
            "Effort has been climbing; note how you feel after each session".to_owned()
        }
        AdaptationDirective::MaintainProgression => {
            "Consistency is strong; progression continues as planned".to_owned()
        }
    }
}

fn add_recovery(drafts: &mut Vec<DraftWorkout>) -> String {
    if let Some(existing) = drafts
        .iter_mut()
        .find(|draft| draft.workout_type == WorkoutType::Recovery)
    {
        existing.minutes += RECOVERY_EXTENSION_MINUTES;
        existing.is_optional = false;
        return format!(
            "Recovery emphasized: {} extended by {RECOVERY_EXTENSION_MINUTES} minutes",
            existing.title
        );
    }

    let used: Vec<Weekday> = drafts.iter().map(|draft| draft.day).collect();
    let day = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ]
    .into_iter()
    .find(|day| !used.contains(day))
    .unwrap_or(Weekday::Sun);

    let mut recovery = DraftWorkout::from(&templates::RECOVERY_SESSION);
    recovery.day = day;
    recovery.minutes = RECOVERY_SESSION_MINUTES;
    recovery.rpe = RECOVERY_SESSION_RPE;
    drafts.push(recovery);
    drafts.sort_by_key(|draft| draft.day.num_days_from_monday());
    format!("Recovery emphasized: active recovery session added on {day}")
}

fn ensure_post_conditions(drafts: &mut Vec<DraftWorkout>, base: &[WorkoutTemplate], phase: &Phase) {
    if drafts.is_empty() {
        if let Some(template) = base
            .iter()
            .find(|t| t.role == SessionRole::Key)
            .or_else(|| base.first())
        {
            drafts.push(DraftWorkout::from(template));
        }
    }
    if phase.kind.is_recovery() || drafts.iter().any(|draft| draft.is_key) {
        return;
    }
    let only_recovery = drafts
        .iter()
        .all(|draft| draft.workout_type == WorkoutType::Recovery);
    if let Some(draft) = drafts
        .iter_mut()
        .filter(|draft| only_recovery || draft.workout_type != WorkoutType::Recovery)
        .max_by_key(|draft| draft.minutes)
    {
        draft.is_key = true;
        draft.is_optional = false;
    }
}

fn rotating_rule(framework: &ProgramFramework, week_number: u32) -> Option<&str> {
    let count = framework.adaptation_rules.len();
    if count == 0 {
        return None;
    }
    let index = usize::try_from(week_number.saturating_sub(1)).ok()? % count;
    framework
        .adaptation_rules
        .get(index)
        .map(|rule| rule.description.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(
        title: &str,
        workout_type: WorkoutType,
        minutes: u32,
        rpe: u8,
        key: bool,
        optional: bool,
    ) -> DraftWorkout {
        DraftWorkout {
            day: Weekday::Mon,
            workout_type,
            title: title.to_owned(),
            description: String::new(),
            minutes,
            rpe,
            is_key: key,
            is_optional: optional,
            exercises: &[],
        }
    }

    #[test]
    fn test_directives_are_ordered_and_deduplicated() {
        let ordered = ordered_directives(&[
            AdaptationDirective::IncreaseIntensity,
            AdaptationDirective::ReduceVolume,
            AdaptationDirective::IncreaseIntensity,
            AdaptationDirective::AddRecovery,
        ]);
        assert_eq!(
            ordered,
            vec![
                AdaptationDirective::AddRecovery,
                AdaptationDirective::ReduceVolume,
                AdaptationDirective::IncreaseIntensity,
            ]
        );
    }

    #[test]
    fn test_reduce_volume_respects_minimum_session_length() {
        let mut drafts = vec![
            draft("Long", WorkoutType::Long, 90, 6, true, false),
            draft("Short easy", WorkoutType::Easy, 16, 4, false, false),
            draft("Mobility", WorkoutType::Mobility, 20, 3, false, true),
        ];
        apply_directive(AdaptationDirective::ReduceVolume, &mut drafts);
        assert_eq!(drafts.len(), 2);
        assert_eq!(drafts[0].minutes, 90);
        assert_eq!(drafts[1].minutes, MIN_SESSION_MINUTES);
    }

    #[test]
    fn test_progression_factor_caps_growth() {
        let phase = Phase {
            name: "Base".into(),
            kind: pierre_core::models::PhaseKind::Base,
            focus: String::new(),
            duration_weeks: 12,
        };
        assert!((progression_factor(&phase, 1) - 1.0).abs() < f64::EPSILON);
        assert!((progression_factor(&phase, 3) - 1.10).abs() < 1e-9);
        assert!((progression_factor(&phase, 12) - 1.30).abs() < 1e-9);
    }
}
