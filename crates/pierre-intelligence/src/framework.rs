// ABOUTME: Periodization framework generator selecting a phase plan from the goal text
// ABOUTME: Splits the available weeks across phases deterministically with largest-remainder rounding
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Framework Generator
//!
//! Derives the immutable [`ProgramFramework`] for a new program. Framework
//! selection is keyword based and checked in a fixed order (endurance before
//! strength), so identical inputs always produce an identical framework.

use chrono::NaiveDate;
use pierre_core::constants::framework::{
    ENDURANCE_KEYWORDS, ENDURANCE_PHASE_PERCENTAGES, ENDURANCE_WEEK_CAP,
    GENERAL_PHASE_PERCENTAGES, GENERAL_WEEK_CAP, MAX_TRAINING_DAYS, MIN_TRAINING_DAYS,
    STRENGTH_KEYWORDS, STRENGTH_PHASE_PERCENTAGES, STRENGTH_WEEK_CAP,
};
use pierre_core::errors::ProgramError;
use pierre_core::models::{
    AdaptationRule, FrameworkKind, Milestone, Phase, PhaseKind, ProgramFramework, UserProfile,
};
use tracing::debug;

/// Phase blueprint before week allocation
struct PhaseBlueprint {
    name: &'static str,
    kind: PhaseKind,
    focus: &'static str,
}

const ENDURANCE_PHASES: [PhaseBlueprint; 4] = [
    PhaseBlueprint {
        name: "Base",
        kind: PhaseKind::Base,
        focus: "Aerobic base and durability",
    },
    PhaseBlueprint {
        name: "Build",
        kind: PhaseKind::Build,
        focus: "Race-specific endurance and threshold",
    },
    PhaseBlueprint {
        name: "Peak",
        kind: PhaseKind::Peak,
        focus: "Race pace sharpening",
    },
    PhaseBlueprint {
        name: "Taper",
        kind: PhaseKind::Taper,
        focus: "Freshness for race day",
    },
];

const STRENGTH_PHASES: [PhaseBlueprint; 4] = [
    PhaseBlueprint {
        name: "Foundation",
        kind: PhaseKind::Foundation,
        focus: "Movement quality and work capacity",
    },
    PhaseBlueprint {
        name: "Hypertrophy",
        kind: PhaseKind::Hypertrophy,
        focus: "Muscle mass and volume tolerance",
    },
    PhaseBlueprint {
        name: "Max Strength",
        kind: PhaseKind::MaxStrength,
        focus: "Heavy low-rep strength",
    },
    PhaseBlueprint {
        name: "Deload",
        kind: PhaseKind::Deload,
        focus: "Recovery and supercompensation",
    },
];

const GENERAL_PHASES: [PhaseBlueprint; 3] = [
    PhaseBlueprint {
        name: "Foundation",
        kind: PhaseKind::Foundation,
        focus: "Habit building and movement quality",
    },
    PhaseBlueprint {
        name: "Development",
        kind: PhaseKind::Development,
        focus: "Aerobic and strength capacity",
    },
    PhaseBlueprint {
        name: "Consolidation",
        kind: PhaseKind::Consolidation,
        focus: "Locking in gains",
    },
];

const ENDURANCE_RULES: [&str; 3] = [
    "Increase weekly volume by no more than 10%",
    "Keep roughly 80% of sessions at conversational effort",
    "Protect the long run when volume must be reduced",
];

const STRENGTH_RULES: [&str; 3] = [
    "Progress load only when every prescribed rep was completed",
    "Keep two reps in reserve outside max strength weeks",
    "Deload when session RPE stays above 8 for a full week",
];

const GENERAL_RULES: [&str; 3] = [
    "Prioritize consistency over intensity",
    "Balance strength and conditioning sessions",
    "Add intensity only after two consistent weeks",
];

/// Builds periodization frameworks from goals
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameworkGenerator;

impl FrameworkGenerator {
    /// Select the framework family for a goal
    #[must_use]
    pub fn select_kind(goal: &str) -> FrameworkKind {
        let lowered = goal.to_lowercase();
        let words: Vec<&str> = lowered
            .split(|c: char| !c.is_alphanumeric())
            .filter(|word| !word.is_empty())
            .collect();
        if ENDURANCE_KEYWORDS.iter().any(|kw| contains_keyword(&words, kw)) {
            FrameworkKind::Endurance
        } else if STRENGTH_KEYWORDS.iter().any(|kw| contains_keyword(&words, kw)) {
            FrameworkKind::Strength
        } else {
            FrameworkKind::GeneralFitness
        }
    }

    /// Generate the framework for a goal.
    ///
    /// # Errors
    ///
    /// Returns [`ProgramError::InvalidInput`] for an empty goal and
    /// [`ProgramError::InvalidGoalWindow`] when `target_date` is not at least
    /// one whole week after `today`.
    pub fn generate(
        &self,
        goal: &str,
        target_date: NaiveDate,
        today: NaiveDate,
        profile: &UserProfile,
    ) -> Result<ProgramFramework, ProgramError> {
        let goal = goal.trim();
        if goal.is_empty() {
            return Err(ProgramError::invalid_input("goal must not be empty"));
        }

        let days = (target_date - today).num_days();
        if days <= 0 {
            return Err(ProgramError::invalid_goal_window(format!(
                "target date {target_date} is not after {today}"
            )));
        }
        let weeks_until_target = u32::try_from(days / 7).unwrap_or(u32::MAX);
        if weeks_until_target == 0 {
            return Err(ProgramError::invalid_goal_window(format!(
                "only {days} days until {target_date}; at least one whole week is required"
            )));
        }

        let kind = Self::select_kind(goal);
        let (cap, blueprints, percentages, rules): (u32, &[PhaseBlueprint], &[u32], &[&str]) =
            match kind {
                FrameworkKind::Endurance => (
                    ENDURANCE_WEEK_CAP,
                    &ENDURANCE_PHASES,
                    &ENDURANCE_PHASE_PERCENTAGES,
                    &ENDURANCE_RULES,
                ),
                FrameworkKind::Strength => (
                    STRENGTH_WEEK_CAP,
                    &STRENGTH_PHASES,
                    &STRENGTH_PHASE_PERCENTAGES,
                    &STRENGTH_RULES,
                ),
                FrameworkKind::GeneralFitness => (
                    GENERAL_WEEK_CAP,
                    &GENERAL_PHASES,
                    &GENERAL_PHASE_PERCENTAGES,
                    &GENERAL_RULES,
                ),
            };

        let estimated_weeks = weeks_until_target.min(cap);
        let durations = allocate_weeks(estimated_weeks, percentages);

        let phases: Vec<Phase> = blueprints
            .iter()
            .zip(durations)
            .filter(|(_, weeks)| *weeks > 0)
            .map(|(blueprint, duration_weeks)| Phase {
                name: blueprint.name.to_owned(),
                kind: blueprint.kind,
                focus: blueprint.focus.to_owned(),
                duration_weeks,
            })
            .collect();

        let milestones = build_milestones(&phases, goal);

        let adaptation_rules = rules
            .iter()
            .map(|rule| AdaptationRule::new(*rule))
            .chain(profile.limitations.iter().map(|limitation| {
                AdaptationRule::new(format!("Respect limitation: {limitation}"))
            }))
            .collect();

        debug!(
            ?kind,
            estimated_weeks,
            phases = phases.len(),
            "Generated program framework"
        );

        Ok(ProgramFramework {
            kind,
            estimated_weeks,
            sessions_per_week: profile
                .available_days_per_week
                .clamp(MIN_TRAINING_DAYS, MAX_TRAINING_DAYS),
            phases,
            milestones,
            adaptation_rules,
        })
    }
}

/// Largest-remainder split of `total` weeks by integer percentages.
///
/// Ties in the fractional remainder go to the earlier phase.
fn allocate_weeks(total: u32, percentages: &[u32]) -> Vec<u32> {
    let mut allocation: Vec<u32> = percentages.iter().map(|pct| total * pct / 100).collect();
    let assigned: u32 = allocation.iter().sum();
    let mut leftover = total.saturating_sub(assigned);

    let mut by_remainder: Vec<(usize, u32)> = percentages
        .iter()
        .enumerate()
        .map(|(index, pct)| (index, total * pct % 100))
        .collect();
    by_remainder.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    for (index, _) in by_remainder {
        if leftover == 0 {
            break;
        }
        if let Some(weeks) = allocation.get_mut(index) {
            *weeks += 1;
            leftover -= 1;
        }
    }
    allocation
}

fn build_milestones(phases: &[Phase], goal: &str) -> Vec<Milestone> {
    let mut milestones = Vec::with_capacity(phases.len());
    let mut end_week = 0;
    for (index, phase) in phases.iter().enumerate() {
        end_week += phase.duration_weeks;
        let target_description = if index + 1 == phases.len() {
            goal.to_owned()
        } else {
            format!("Complete {}: {}", phase.name, phase.focus)
        };
        milestones.push(Milestone {
            week_number: end_week,
            target_description,
        });
    }
    milestones
}

/// Whole-word keyword match; a multi-word keyword must appear as a word
/// sequence and its last word may carry a plural `s`
fn contains_keyword(words: &[&str], keyword: &str) -> bool {
    let parts: Vec<&str> = keyword.split_whitespace().collect();
    let Some((last, leading)) = parts.split_last() else {
        return false;
    };
    words.windows(parts.len()).any(|window| {
        let Some((candidate, prefix)) = window.split_last() else {
            return false;
        };
        prefix == leading
            && (candidate == last || candidate.strip_suffix('s') == Some(*last))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocate_weeks_largest_remainder() {
        assert_eq!(allocate_weeks(16, &[40, 30, 20, 10]), vec![6, 5, 3, 2]);
        assert_eq!(allocate_weeks(1, &[40, 30, 20, 10]), vec![1, 0, 0, 0]);
        assert_eq!(allocate_weeks(12, &[40, 40, 20]), vec![5, 5, 2]);
    }

    #[test]
    fn test_allocation_always_sums_to_total() {
        for total in 1..=24 {
            for split in [&[40, 30, 20, 10][..], &[25, 35, 30, 10], &[40, 40, 20]] {
                assert_eq!(allocate_weeks(total, split).iter().sum::<u32>(), total);
            }
        }
    }

    #[test]
    fn test_endurance_keywords_win_over_strength() {
        assert_eq!(
            FrameworkGenerator::select_kind("Run a marathon and build strength"),
            FrameworkKind::Endurance
        );
        assert_eq!(
            FrameworkGenerator::select_kind("Deadlift twice bodyweight"),
            FrameworkKind::Strength
        );
        assert_eq!(
            FrameworkGenerator::select_kind("Feel healthier"),
            FrameworkKind::GeneralFitness
        );
    }

    #[test]
    fn test_keywords_match_whole_words() {
        let words = ["run", "a", "half", "marathon"];
        assert!(contains_keyword(&words, "half marathon"));
        assert!(contains_keyword(&words, "run"));
        assert!(!contains_keyword(&["crunches"], "run"));
        assert!(!contains_keyword(&["210kg"], "10k"));
        assert!(contains_keyword(&["build", "muscles"], "muscle"));
        assert!(!contains_keyword(&["marathon"], "half marathon"));
    }
}
