// ABOUTME: Builtin read-only exercise catalog used when no external catalog is wired in
// ABOUTME: Covers every exercise referenced by the phase week templates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::HashMap;

use crate::errors::ProgramError;
use crate::intelligence::{Exercise, ExerciseCatalog, ExerciseCategory};

use ExerciseCategory::{Cardio, Core, LowerBody, Mobility, Plyometric, UpperBody};

/// `(id, name, category, high_impact)`
const BUILTIN_EXERCISES: &[(&str, &str, ExerciseCategory, bool)] = &[
    // Lower body
    ("goblet_squat", "Goblet Squat", LowerBody, false),
    ("back_squat", "Back Squat", LowerBody, false),
    ("front_squat", "Front Squat", LowerBody, false),
    ("deadlift", "Deadlift", LowerBody, false),
    ("romanian_deadlift", "Romanian Deadlift", LowerBody, false),
    ("single_leg_deadlift", "Single-Leg Deadlift", LowerBody, false),
    ("walking_lunge", "Walking Lunge", LowerBody, false),
    ("reverse_lunge", "Reverse Lunge", LowerBody, false),
    ("step_up", "Step-Up", LowerBody, false),
    ("glute_bridge", "Glute Bridge", LowerBody, false),
    ("calf_raise", "Calf Raise", LowerBody, false),
    ("kettlebell_swing", "Kettlebell Swing", LowerBody, false),
    // Upper body
    ("bench_press", "Bench Press", UpperBody, false),
    ("overhead_press", "Overhead Press", UpperBody, false),
    ("bent_over_row", "Bent-Over Row", UpperBody, false),
    ("pull_up", "Pull-Up", UpperBody, false),
    ("push_up", "Push-Up", UpperBody, false),
    ("dumbbell_row", "Single-Arm Dumbbell Row", UpperBody, false),
    // Core
    ("plank", "Plank", Core, false),
    ("side_plank", "Side Plank", Core, false),
    ("dead_bug", "Dead Bug", Core, false),
    ("bird_dog", "Bird Dog", Core, false),
    ("mountain_climber", "Mountain Climber", Core, true),
    // Cardio and running drills
    ("a_skip", "A-Skip Drill", Cardio, true),
    ("strides", "Strides", Cardio, true),
    ("jump_rope", "Jump Rope", Cardio, true),
    ("rowing_erg", "Rowing Ergometer", Cardio, false),
    ("stationary_bike", "Stationary Bike", Cardio, false),
    // Plyometric
    ("box_jump", "Box Jump", Plyometric, true),
    ("squat_jump", "Squat Jump", Plyometric, true),
    // Mobility
    ("foam_roll", "Foam Rolling", Mobility, false),
    ("hip_mobility_flow", "Hip Mobility Flow", Mobility, false),
    ("thoracic_rotation", "Thoracic Rotation", Mobility, false),
    ("ankle_mobility", "Ankle Mobility Drill", Mobility, false),
];

/// In-process catalog built from a static table
#[derive(Debug, Clone)]
pub struct StaticExerciseCatalog {
    exercises: HashMap<&'static str, Exercise>,
}

impl StaticExerciseCatalog {
    /// Catalog with the builtin exercise table
    #[must_use]
    pub fn builtin() -> Self {
        let exercises = BUILTIN_EXERCISES
            .iter()
            .map(|&(id, name, category, high_impact)| {
                (
                    id,
                    Exercise {
                        id: id.to_owned(),
                        name: name.to_owned(),
                        category,
                        high_impact,
                    },
                )
            })
            .collect();
        Self { exercises }
    }

    /// Number of exercises
    #[must_use]
    pub fn len(&self) -> usize {
        self.exercises.len()
    }

    /// Whether the catalog is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }
}

impl Default for StaticExerciseCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ExerciseCatalog for StaticExerciseCatalog {
    fn get_exercise(&self, exercise_id: &str) -> Result<Exercise, ProgramError> {
        self.exercises
            .get(exercise_id)
            .cloned()
            .ok_or_else(|| ProgramError::exercise_not_found(exercise_id))
    }

    fn exercises_in_category(&self, category: ExerciseCategory) -> Vec<Exercise> {
        let mut found: Vec<Exercise> = self
            .exercises
            .values()
            .filter(|exercise| exercise.category == category)
            .cloned()
            .collect();
        found.sort_by(|a, b| a.id.cmp(&b.id));
        found
    }
}
