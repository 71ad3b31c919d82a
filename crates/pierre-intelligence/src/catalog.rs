// ABOUTME: Read-only exercise catalog interface consumed by the week generator
// ABOUTME: Catalog misses degrade to placeholder exercises instead of aborting a week
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use pierre_core::errors::ProgramError;
use pierre_core::models::PlannedExercise;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Exercise grouping used by catalog listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseCategory {
    /// Squat, hinge, lunge patterns
    LowerBody,
    /// Push and pull patterns
    UpperBody,
    /// Trunk stability
    Core,
    /// Running and cycling drills
    Cardio,
    /// Mobility and flexibility
    Mobility,
    /// Jumps and throws
    Plyometric,
}

/// Catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    /// Stable identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Category
    pub category: ExerciseCategory,
    /// Whether the movement loads joints heavily
    pub high_impact: bool,
}

/// Read-only exercise lookup
pub trait ExerciseCatalog: Send + Sync {
    /// Look up an exercise by id
    ///
    /// # Errors
    ///
    /// Returns [`ProgramError::ExerciseNotFound`] when the id is unknown.
    fn get_exercise(&self, exercise_id: &str) -> Result<Exercise, ProgramError>;

    /// All exercises in a category
    fn exercises_in_category(&self, category: ExerciseCategory) -> Vec<Exercise>;
}

/// Resolve a template exercise, substituting a placeholder on a catalog miss
#[must_use]
pub fn resolve_exercise(
    catalog: &dyn ExerciseCatalog,
    exercise_id: &str,
    sets: Option<u32>,
    reps: Option<u32>,
) -> PlannedExercise {
    match catalog.get_exercise(exercise_id) {
        Ok(exercise) => PlannedExercise {
            exercise_id: exercise.id,
            name: exercise.name,
            sets,
            reps,
            placeholder: false,
        },
        Err(error) => {
            warn!(exercise_id, %error, "Catalog miss, substituting placeholder exercise");
            PlannedExercise {
                exercise_id: exercise_id.to_owned(),
                name: placeholder_name(exercise_id),
                sets,
                reps,
                placeholder: true,
            }
        }
    }
}

fn placeholder_name(exercise_id: &str) -> String {
    let words: Vec<String> = exercise_id
        .split(['_', '-'])
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect::<String>()
            })
        })
        .collect();
    if words.is_empty() {
        "Coach's choice exercise".to_owned()
    } else {
        format!("{} (coach's choice)", words.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EmptyCatalog;

    impl ExerciseCatalog for EmptyCatalog {
        fn get_exercise(&self, exercise_id: &str) -> Result<Exercise, ProgramError> {
            Err(ProgramError::exercise_not_found(exercise_id))
        }

        fn exercises_in_category(&self, _category: ExerciseCategory) -> Vec<Exercise> {
            Vec::new()
        }
    }

    #[test]
    fn test_catalog_miss_substitutes_placeholder() {
        let planned = resolve_exercise(&EmptyCatalog, "bulgarian_split_squat", Some(3), Some(8));
        assert!(planned.placeholder);
        assert_eq!(planned.name, "Bulgarian Split Squat (coach's choice)");
        assert_eq!(planned.sets, Some(3));
    }
}
