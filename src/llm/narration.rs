// ABOUTME: Narrative coaching note for a generated week
// ABOUTME: Uses the guarded generator when configured and a deterministic template otherwise
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt::Write as _;

use uuid::Uuid;

use super::GuardedGenerator;
use crate::logging::ProgramLogger;
use crate::models::{NarrationSource, TrainingWeek};

/// Produces the narrative note attached to each generated week
#[derive(Clone, Default)]
pub struct WeekNarrator {
    generator: Option<GuardedGenerator>,
}

impl WeekNarrator {
    /// Template-only narration
    #[must_use]
    pub const fn template_only() -> Self {
        Self { generator: None }
    }

    /// Narration through `generator`, falling back to the template
    #[must_use]
    pub const fn with_generator(generator: GuardedGenerator) -> Self {
        Self {
            generator: Some(generator),
        }
    }

    /// Narrative note for `week` and where it came from
    pub async fn narrate(
        &self,
        program_id: Uuid,
        goal: &str,
        week: &TrainingWeek,
    ) -> (String, NarrationSource) {
        let Some(generator) = &self.generator else {
            return (template_narration(goal, week), NarrationSource::Template);
        };
        match generator.generate(&narration_prompt(goal, week)).await {
            Ok(text) => (text, NarrationSource::Generated),
            Err(error) => {
                ProgramLogger::log_narration_fallback(
                    program_id,
                    week.week_number,
                    &error.to_string(),
                );
                (template_narration(goal, week), NarrationSource::Template)
            }
        }
    }
}

fn narration_prompt(goal: &str, week: &TrainingWeek) -> String {
    let mut prompt = format!(
        "Athlete goal: {goal}\nWeek {}: {} ({})\nSessions:\n",
        week.week_number, week.theme, week.focus
    );
    for workout in &week.workouts {
        let _ = writeln!(
            prompt,
            "- {:?}: {} ({} min, RPE {}{})",
            workout.day,
            workout.title,
            workout.planned_duration_minutes,
            workout.target_rpe,
            if workout.is_key_workout { ", key" } else { "" }
        );
    }
    prompt.push_str("Write a short motivating overview of this week.");
    prompt
}

/// Deterministic narration used when text generation is off or fails
#[must_use]
pub fn template_narration(goal: &str, week: &TrainingWeek) -> String {
    let key_titles: Vec<&str> = week
        .key_workouts()
        .map(|workout| workout.title.as_str())
        .collect();
    let total_minutes: u32 = week
        .workouts
        .iter()
        .map(|workout| workout.planned_duration_minutes)
        .sum();

    let anchor = match key_titles.as_slice() {
        [] => "No key session this week, so let recovery lead.".to_owned(),
        [single] => format!("{single} is the session that matters most."),
        many => format!("{} are the sessions that matter most.", many.join(" and ")),
    };

    format!(
        "Week {} toward {goal}: {} sessions, about {total_minutes} minutes in total. {anchor} Keep easy days easy.",
        week.week_number,
        week.workouts.len()
    )
}
