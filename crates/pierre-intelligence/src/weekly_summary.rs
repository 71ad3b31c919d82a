// ABOUTME: Weekly completion summary calculator recomputed from stored completions
// ABOUTME: Produces counts, averages, consistency, adherence, readiness, challenges, and recovery indicators
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Weekly Summary
//!
//! [`WeeklySummaryCalculator::summarize`] is a pure function of a week's plan
//! and its stored completions. It is always recomputed in full, never patched,
//! so concurrent recomputations converge on the same value.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use pierre_core::constants::analyzer::HIGH_RPE_THRESHOLD;
use pierre_core::constants::summary::{
    HIGH_AVERAGE_RPE, NEUTRAL_RPE_SCORE, PRODUCTIVE_RPE_MAX, PRODUCTIVE_RPE_MIN,
    READINESS_CONSISTENCY_WEIGHT, READINESS_KEY_WEIGHT, READINESS_RPE_WEIGHT,
    RECOVERY_CHALLENGE_RATIO, RPE_PENALTY_PER_POINT, STRONG_CONSISTENCY, STRONG_RATING,
};
use pierre_core::models::{
    RecoveryIndicators, SleepQuality, StressLevel, TrainingWeek, WeeklyCompletionSummary,
    WorkoutCompletion,
};
use uuid::Uuid;

/// Stateless weekly summary calculator
pub struct WeeklySummaryCalculator;

impl WeeklySummaryCalculator {
    /// Summarize `week` from its completions.
    ///
    /// Completions for other weeks are ignored; several completions for the
    /// same workout collapse to the latest.
    #[must_use]
    pub fn summarize(
        program_id: Uuid,
        user_id: Uuid,
        week: &TrainingWeek,
        completions: &[WorkoutCompletion],
        computed_at: DateTime<Utc>,
    ) -> WeeklyCompletionSummary {
        let latest = latest_per_workout(week.week_number, completions);
        let logged: Vec<&WorkoutCompletion> = latest.values().copied().collect();

        let completed_workout_ids: Vec<String> = week
            .workouts
            .iter()
            .filter(|workout| latest.get(workout.id.as_str()).is_some_and(|c| c.is_complete))
            .map(|workout| workout.id.clone())
            .collect();

        let planned = count(week.workouts.len());
        let completed = count(completed_workout_ids.len());
        let skipped = count(week.workouts.iter().filter(|w| w.skipped).count());

        let completion_rate = percentage(completed, planned);

        let (completed_key_workouts, missed_key_workouts): (Vec<_>, Vec<_>) = week
            .key_workouts()
            .partition(|workout| completed_workout_ids.contains(&workout.id));
        let key_total = count(completed_key_workouts.len() + missed_key_workouts.len());
        let key_completion = if key_total == 0 {
            100.0
        } else {
            percentage(count(completed_key_workouts.len()), key_total)
        };

        let average_rpe = mean(logged.iter().map(|c| f64::from(c.rpe)));
        let average_rating = mean(logged.iter().map(|c| f64::from(c.overall_rating)));
        let average_duration_minutes =
            mean(logged.iter().map(|c| f64::from(c.actual_duration_minutes)));
        let adherence_score = mean(logged.iter().map(|c| c.completion_percentage)).unwrap_or(0.0);

        let consistency_score = completion_rate;
        let progression_readiness = READINESS_CONSISTENCY_WEIGHT * consistency_score
            + READINESS_KEY_WEIGHT * key_completion
            + READINESS_RPE_WEIGHT * rpe_fitness(average_rpe);

        let recovery_indicators = recovery_indicators(&logged);
        let logged_count = count(logged.len());

        let mut challenges = Vec::new();
        if let Some(rpe) = average_rpe.filter(|rpe| *rpe > HIGH_AVERAGE_RPE) {
            challenges.push(format!(
                "Average RPE of {rpe:.1} suggests the week was very hard"
            ));
        }
        if exceeds_share(recovery_indicators.low_energy_sessions, logged_count) {
            challenges.push(format!(
                "Low energy reported in {} of {logged_count} sessions",
                recovery_indicators.low_energy_sessions
            ));
        }
        if exceeds_share(recovery_indicators.poor_sleep_sessions, logged_count) {
            challenges.push(format!(
                "Poor sleep reported in {} of {logged_count} sessions",
                recovery_indicators.poor_sleep_sessions
            ));
        }
        if !missed_key_workouts.is_empty() {
            let titles: Vec<&str> = missed_key_workouts
                .iter()
                .map(|workout| workout.title.as_str())
                .collect();
            challenges.push(format!("Key workouts not completed: {}", titles.join(", ")));
        }

        let mut positive_patterns = Vec::new();
        if key_total > 0 && missed_key_workouts.is_empty() {
            positive_patterns.push("Every key workout completed".to_owned());
        }
        if consistency_score >= STRONG_CONSISTENCY {
            positive_patterns.push(format!("Consistency of {consistency_score:.0}%"));
        }
        if let Some(rating) = average_rating.filter(|rating| *rating >= STRONG_RATING) {
            positive_patterns.push(format!("Average session rating of {rating:.1}"));
        }

        WeeklyCompletionSummary {
            program_id,
            user_id,
            week_number: week.week_number,
            planned_workouts: planned,
            completed_workouts: completed,
            skipped_workouts: skipped,
            logged_completions: logged_count,
            completion_rate,
            average_rpe,
            average_rating,
            average_duration_minutes,
            consistency_score,
            adherence_score,
            progression_readiness,
            completed_key_workouts: completed_key_workouts
                .iter()
                .map(|workout| workout.id.clone())
                .collect(),
            missed_key_workouts: missed_key_workouts
                .iter()
                .map(|workout| workout.id.clone())
                .collect(),
            completed_workout_ids,
            challenges,
            positive_patterns,
            recovery_indicators,
            computed_at,
        }
    }
}

fn latest_per_workout(
    week_number: u32,
    completions: &[WorkoutCompletion],
) -> HashMap<&str, &WorkoutCompletion> {
    let mut latest: HashMap<&str, &WorkoutCompletion> = HashMap::new();
    for completion in completions.iter().filter(|c| c.week_number == week_number) {
        latest
            .entry(completion.workout_id.as_str())
            .and_modify(|current| {
                if completion.completed_at >= current.completed_at {
                    *current = completion;
                }
            })
            .or_insert(completion);
    }
    latest
}

fn recovery_indicators(logged: &[&WorkoutCompletion]) -> RecoveryIndicators {
    RecoveryIndicators {
        low_energy_sessions: tally(logged, |c| c.energy.is_low()),
        poor_sleep_sessions: tally(logged, |c| c.sleep_quality == SleepQuality::Poor),
        high_stress_sessions: tally(logged, |c| c.stress == StressLevel::High),
        high_rpe_sessions: tally(logged, |c| c.rpe >= HIGH_RPE_THRESHOLD),
        average_sleep_score: mean(logged.iter().map(|c| c.sleep_quality.score())),
    }
}

fn tally(logged: &[&WorkoutCompletion], predicate: impl Fn(&WorkoutCompletion) -> bool) -> u32 {
    count(logged.iter().filter(|c| predicate(**c)).count())
}

/// Readiness contribution of the mean RPE
fn rpe_fitness(average_rpe: Option<f64>) -> f64 {
    average_rpe.map_or(NEUTRAL_RPE_SCORE, |rpe| {
        let distance = if rpe < PRODUCTIVE_RPE_MIN {
            PRODUCTIVE_RPE_MIN - rpe
        } else if rpe > PRODUCTIVE_RPE_MAX {
            rpe - PRODUCTIVE_RPE_MAX
        } else {
            0.0
        };
        RPE_PENALTY_PER_POINT.mul_add(-distance, 100.0).max(0.0)
    })
}

fn exceeds_share(part: u32, whole: u32) -> bool {
    whole > 0 && f64::from(part) / f64::from(whole) > RECOVERY_CHALLENGE_RATIO
}

fn percentage(part: u32, whole: u32) -> f64 {
    if whole == 0 {
        0.0
    } else {
        f64::from(part) / f64::from(whole) * 100.0
    }
}

fn count(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, n) = values.fold((0.0, 0_u32), |(sum, n), value| (sum + value, n + 1));
    (n > 0).then(|| sum / f64::from(n))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rpe_fitness_band() {
        assert!((rpe_fitness(None) - 50.0).abs() < f64::EPSILON);
        assert!((rpe_fitness(Some(6.5)) - 100.0).abs() < f64::EPSILON);
        assert!((rpe_fitness(Some(9.0)) - 80.0).abs() < 1e-9);
        assert!((rpe_fitness(Some(3.0)) - 60.0).abs() < 1e-9);
        assert!((rpe_fitness(Some(1.0)) - 20.0).abs() < 1e-9);
        assert!(rpe_fitness(Some(-5.0)).abs() < f64::EPSILON);
    }

    #[test]
    fn test_mean_of_nothing_is_none() {
        assert!(mean(std::iter::empty()).is_none());
        assert_eq!(mean([2.0, 4.0].into_iter()), Some(3.0));
    }
}
