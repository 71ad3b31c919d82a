// ABOUTME: Prerequisite gate deciding whether a program may progress past its current week
// ABOUTME: Produces a structured check with blockers, warnings, and a templated coaching message
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use pierre_core::constants::gate::{COMFORTABLE_COMPLETION_PERCENT, MIN_COMPLETION_PERCENT};
use pierre_core::models::{PrerequisiteCheck, TrainingWeek, Workout};
use tracing::info;

/// Progression gate
#[derive(Debug, Clone, Copy)]
pub struct PrerequisiteGate {
    min_completion_percent: f64,
}

impl Default for PrerequisiteGate {
    fn default() -> Self {
        Self::new(MIN_COMPLETION_PERCENT)
    }
}

impl PrerequisiteGate {
    /// Gate with a custom completion threshold (percent)
    #[must_use]
    pub const fn new(min_completion_percent: f64) -> Self {
        Self {
            min_completion_percent,
        }
    }

    /// Configured threshold
    #[must_use]
    pub const fn min_completion_percent(&self) -> f64 {
        self.min_completion_percent
    }

    /// Evaluate `week` for progression.
    ///
    /// A workout counts as done when it is flagged completed on the week or
    /// its id appears in `completed_workout_ids` (from the weekly summary).
    #[must_use]
    pub fn evaluate(
        &self,
        goal: &str,
        week: &TrainingWeek,
        completed_workout_ids: &[String],
    ) -> PrerequisiteCheck {
        let is_done =
            |workout: &Workout| workout.completed || completed_workout_ids.contains(&workout.id);

        let total = u32::try_from(week.workouts.len()).unwrap_or(u32::MAX);
        let done: Vec<&Workout> = week.workouts.iter().filter(|w| is_done(*w)).collect();
        let completed = u32::try_from(done.len()).unwrap_or(u32::MAX);
        let missing: Vec<&Workout> = week.workouts.iter().filter(|w| !is_done(*w)).collect();

        let completion_rate = if total == 0 {
            100.0
        } else {
            f64::from(completed) / f64::from(total) * 100.0
        };

        let keys: Vec<&Workout> = week.key_workouts().collect();
        let keys_done = keys.iter().filter(|w| is_done(**w)).count();
        let missed_keys: Vec<&str> = keys
            .iter()
            .filter(|w| !is_done(**w))
            .map(|w| w.title.as_str())
            .collect();

        let mut blockers = Vec::new();
        let mut warnings = Vec::new();

        if completion_rate < self.min_completion_percent {
            blockers.push(format!(
                "Only {completion_rate:.0}% of week {} completed; {:.0}% is required",
                week.week_number, self.min_completion_percent
            ));
        } else if completion_rate < COMFORTABLE_COMPLETION_PERCENT {
            warnings.push(format!(
                "Completion at {completion_rate:.0}%; aim for {COMFORTABLE_COMPLETION_PERCENT:.0}% to progress comfortably"
            ));
        }

        if !keys.is_empty() && keys_done == 0 {
            blockers.push(format!(
                "No key workout completed yet ({})",
                missed_keys.join(", ")
            ));
        } else if !missed_keys.is_empty() {
            warnings.push(format!("Key workouts missed: {}", missed_keys.join(", ")));
        }

        let skipped = week.workouts.iter().filter(|w| w.skipped).count();
        if skipped > 0 {
            warnings.push(format!("{skipped} workout(s) skipped this week"));
        }

        let can_proceed = blockers.is_empty();
        let missing_workouts: Vec<String> = missing.iter().map(|w| w.title.clone()).collect();
        let coaching_message =
            coaching_message(goal, week.week_number, completion_rate, can_proceed, &missing);

        if !can_proceed {
            info!(
                week_number = week.week_number,
                completion_rate,
                blockers = blockers.len(),
                "Progression blocked by prerequisite gate"
            );
        }

        PrerequisiteCheck {
            week_number: week.week_number,
            completion_rate,
            completed_workouts: completed,
            total_workouts: total,
            missing_workouts,
            warnings,
            blockers,
            can_proceed,
            coaching_message,
        }
    }
}

fn coaching_message(
    goal: &str,
    week_number: u32,
    completion_rate: f64,
    can_proceed: bool,
    missing: &[&Workout],
) -> String {
    if can_proceed {
        return format!(
            "Great work! You completed {completion_rate:.0}% of week {week_number}. \
             Week {} is ready as you build toward {goal}.",
            week_number + 1
        );
    }

    let priority: Vec<&str> = missing
        .iter()
        .filter(|w| w.is_key_workout)
        .chain(missing.iter().filter(|w| !w.is_key_workout))
        .take(3)
        .map(|w| w.title.as_str())
        .collect();
    if priority.is_empty() {
        format!(
            "You've completed {completion_rate:.0}% of week {week_number}. \
             Keep going to stay on track for {goal}."
        )
    } else {
        format!(
            "You've completed {completion_rate:.0}% of week {week_number}. \
             Finish {} before moving on so week {} builds on solid ground toward {goal}.",
            priority.join(", "),
            week_number + 1
        )
    }
}
