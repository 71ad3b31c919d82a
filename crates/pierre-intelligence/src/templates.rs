// ABOUTME: Phase-appropriate base week templates for every framework phase
// ABOUTME: Templates are static data; the week generator trims and progresses them
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::Weekday;
use pierre_core::models::{FrameworkKind, PhaseKind, WorkoutType};
use SessionRole::{Core, Key, Optional};
use Weekday::{Fri, Mon, Sat, Sun, Thu, Tue, Wed};

/// How a templated session is treated by trimming and directives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionRole {
    /// Essential to the goal, always kept
    Key,
    /// Regular session
    Core,
    /// First to go when volume is reduced
    Optional,
}

/// Exercise reference inside a template
#[derive(Debug, Clone, Copy)]
pub struct ExerciseSlot {
    /// Catalog id
    pub exercise_id: &'static str,
    /// Prescribed sets
    pub sets: Option<u32>,
    /// Prescribed reps
    pub reps: Option<u32>,
}

const fn ex(exercise_id: &'static str, sets: u32, reps: u32) -> ExerciseSlot {
    ExerciseSlot {
        exercise_id,
        sets: Some(sets),
        reps: Some(reps),
    }
}

const fn drill(exercise_id: &'static str) -> ExerciseSlot {
    ExerciseSlot {
        exercise_id,
        sets: None,
        reps: None,
    }
}

/// One templated session
#[derive(Debug, Clone, Copy)]
pub struct WorkoutTemplate {
    /// Planned day
    pub day: Weekday,
    /// Session type
    pub workout_type: WorkoutType,
    /// Title
    pub title: &'static str,
    /// Description
    pub description: &'static str,
    /// Base duration before progression
    pub minutes: u32,
    /// Base target RPE
    pub rpe: u8,
    /// Trimming role
    pub role: SessionRole,
    /// Prescribed exercises
    pub exercises: &'static [ExerciseSlot],
}

const fn session(
    day: Weekday,
    workout_type: WorkoutType,
    title: &'static str,
    minutes: u32,
    rpe: u8,
    role: SessionRole,
) -> WorkoutTemplate {
    WorkoutTemplate {
        day,
        workout_type,
        title,
        description: "",
        minutes,
        rpe,
        role,
        exercises: &[],
    }
}

impl WorkoutTemplate {
    const fn describe(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }

    const fn with(mut self, exercises: &'static [ExerciseSlot]) -> Self {
        self.exercises = exercises;
        self
    }
}

const MOBILITY: &[ExerciseSlot] = &[
    drill("hip_mobility_flow"),
    drill("thoracic_rotation"),
    ex("dead_bug", 2, 10),
];
const RUNNER_STRENGTH: &[ExerciseSlot] = &[
    ex("goblet_squat", 3, 10),
    ex("walking_lunge", 3, 10),
    ex("single_leg_deadlift", 3, 8),
    ex("calf_raise", 3, 15),
];
const RUN_DRILLS: &[ExerciseSlot] = &[drill("a_skip"), drill("strides")];
const RECOVERY_WORK: &[ExerciseSlot] = &[drill("foam_roll"), drill("hip_mobility_flow")];

/// Session inserted by `add_recovery` when the week has no recovery workout
pub const RECOVERY_SESSION: WorkoutTemplate = session(
    Sun,
    WorkoutType::Recovery,
    "Active recovery",
    30,
    3,
    Core,
)
.describe("Easy movement and soft-tissue work to absorb recent training")
.with(RECOVERY_WORK);

const ENDURANCE_BASE: &[WorkoutTemplate] = &[
    session(Mon, WorkoutType::Mobility, "Mobility and core", 25, 3, Optional)
        .describe("Joint mobility and trunk control")
        .with(MOBILITY),
    session(Tue, WorkoutType::Easy, "Easy aerobic run", 40, 4, Core)
        .describe("Conversational pace throughout")
        .with(RUN_DRILLS),
    session(Wed, WorkoutType::Strength, "Runner strength", 35, 5, Core)
        .describe("Single-leg strength and calf capacity")
        .with(RUNNER_STRENGTH),
    session(Thu, WorkoutType::Tempo, "Steady tempo", 40, 6, Core)
        .describe("20 minutes comfortably hard inside an easy run"),
    session(Fri, WorkoutType::Recovery, "Recovery jog", 25, 3, Optional)
        .describe("Very easy, shorten if legs feel heavy")
        .with(RECOVERY_WORK),
    session(Sat, WorkoutType::Long, "Long aerobic run", 75, 5, Key)
        .describe("Steady aerobic effort, fuel every 40 minutes"),
    session(Sun, WorkoutType::CrossTraining, "Easy cross training", 40, 4, Optional)
        .describe("Bike, swim, or elliptical at easy effort"),
];

const ENDURANCE_BUILD: &[WorkoutTemplate] = &[
    session(Mon, WorkoutType::Mobility, "Mobility and core", 25, 3, Optional)
        .describe("Joint mobility and trunk control")
        .with(MOBILITY),
    session(Tue, WorkoutType::Intervals, "Threshold intervals", 50, 8, Key)
        .describe("5 x 6 minutes at threshold with 2 minutes easy")
        .with(RUN_DRILLS),
    session(Wed, WorkoutType::Easy, "Easy aerobic run", 40, 4, Core)
        .describe("Conversational pace throughout"),
    session(Thu, WorkoutType::Tempo, "Tempo run", 45, 7, Core)
        .describe("25 minutes at tempo effort"),
    session(Fri, WorkoutType::Recovery, "Recovery jog", 25, 3, Optional)
        .describe("Very easy, shorten if legs feel heavy")
        .with(RECOVERY_WORK),
    session(Sat, WorkoutType::Long, "Long run with goal-pace finish", 90, 6, Key)
        .describe("Final 20 minutes at goal pace"),
    session(Sun, WorkoutType::Strength, "Runner strength", 35, 5, Optional)
        .describe("Single-leg strength and calf capacity")
        .with(RUNNER_STRENGTH),
];

const ENDURANCE_PEAK: &[WorkoutTemplate] = &[
    session(Mon, WorkoutType::Mobility, "Mobility", 20, 2, Optional)
        .describe("Light mobility only")
        .with(MOBILITY),
    session(Tue, WorkoutType::Intervals, "Goal-pace intervals", 50, 8, Key)
        .describe("4 x 2 km at goal pace with 3 minutes easy")
        .with(RUN_DRILLS),
    session(Wed, WorkoutType::Easy, "Easy aerobic run", 40, 4, Core)
        .describe("Conversational pace throughout"),
    session(Thu, WorkoutType::Tempo, "Goal-pace tempo", 40, 7, Core)
        .describe("Settle into goal pace for 20 minutes"),
    session(Fri, WorkoutType::Recovery, "Recovery jog", 25, 3, Optional)
        .describe("Very easy, shorten if legs feel heavy")
        .with(RECOVERY_WORK),
    session(Sat, WorkoutType::Long, "Goal simulation long run", 100, 6, Key)
        .describe("Rehearse fueling, kit, and pacing"),
    session(Sun, WorkoutType::Easy, "Shakeout run", 30, 3, Optional)
        .describe("Loosen up after the long run"),
];

const ENDURANCE_TAPER: &[WorkoutTemplate] = &[
    session(Mon, WorkoutType::Mobility, "Mobility", 20, 2, Optional)
        .describe("Light mobility only")
        .with(MOBILITY),
    session(Tue, WorkoutType::Intervals, "Sharpening strides", 30, 7, Key)
        .describe("Short goal-pace efforts to stay sharp")
        .with(RUN_DRILLS),
    session(Wed, WorkoutType::Easy, "Easy aerobic run", 30, 4, Core)
        .describe("Keep it short and relaxed"),
    session(Thu, WorkoutType::Recovery, "Recovery jog", 20, 3, Optional)
        .describe("Very easy")
        .with(RECOVERY_WORK),
    session(Sat, WorkoutType::Easy, "Pre-event shakeout", 25, 4, Core)
        .describe("Easy jog with a few strides"),
];

const STRENGTH_FOUNDATION: &[WorkoutTemplate] = &[
    session(Mon, WorkoutType::Strength, "Full-body strength A", 45, 6, Key)
        .describe("Learn the main lifts with crisp technique")
        .with(&[
            ex("back_squat", 3, 8),
            ex("bench_press", 3, 8),
            ex("bent_over_row", 3, 10),
            ex("plank", 3, 1),
        ]),
    session(Tue, WorkoutType::Conditioning, "Aerobic conditioning", 30, 5, Core)
        .describe("Steady circuit to build work capacity")
        .with(&[ex("kettlebell_swing", 3, 15), drill("jump_rope")]),
    session(Wed, WorkoutType::Mobility, "Mobility and core", 25, 3, Optional)
        .describe("Joint mobility and trunk control")
        .with(MOBILITY),
    session(Thu, WorkoutType::Strength, "Full-body strength B", 45, 6, Key)
        .describe("Hinge, press, and pull patterns")
        .with(&[
            ex("deadlift", 3, 6),
            ex("overhead_press", 3, 8),
            ex("pull_up", 3, 6),
            ex("dead_bug", 3, 10),
        ]),
    session(Fri, WorkoutType::Recovery, "Active recovery", 25, 3, Optional)
        .describe("Easy movement and soft-tissue work")
        .with(RECOVERY_WORK),
    session(Sat, WorkoutType::Strength, "Accessory strength", 40, 6, Core)
        .describe("Unilateral and bodyweight accessories")
        .with(&[
            ex("walking_lunge", 3, 10),
            ex("push_up", 3, 12),
            ex("glute_bridge", 3, 12),
        ]),
];

const STRENGTH_HYPERTROPHY: &[WorkoutTemplate] = &[
    session(Mon, WorkoutType::Strength, "Lower body volume", 55, 7, Key)
        .describe("Moderate loads, higher volume")
        .with(&[
            ex("back_squat", 4, 10),
            ex("romanian_deadlift", 3, 10),
            ex("walking_lunge", 3, 12),
            ex("calf_raise", 3, 15),
        ]),
    session(Tue, WorkoutType::Strength, "Upper body volume", 55, 7, Key)
        .describe("Moderate loads, higher volume")
        .with(&[
            ex("bench_press", 4, 10),
            ex("bent_over_row", 4, 10),
            ex("overhead_press", 3, 10),
            ex("pull_up", 3, 8),
        ]),
    session(Wed, WorkoutType::Conditioning, "Light conditioning", 25, 5, Optional)
        .describe("Low-impact conditioning to support recovery")
        .with(&[ex("kettlebell_swing", 3, 12)]),
    session(Thu, WorkoutType::Strength, "Lower body accessory", 45, 7, Core)
        .describe("Unilateral work and posterior chain")
        .with(&[
            ex("goblet_squat", 3, 12),
            ex("single_leg_deadlift", 3, 10),
            ex("glute_bridge", 3, 15),
        ]),
    session(Fri, WorkoutType::Strength, "Upper body accessory", 45, 7, Core)
        .describe("Pressing and pulling volume")
        .with(&[ex("push_up", 4, 15), ex("pull_up", 3, 8), ex("plank", 3, 1)]),
    session(Sat, WorkoutType::Mobility, "Mobility and core", 25, 3, Optional)
        .describe("Joint mobility and trunk control")
        .with(MOBILITY),
];

const STRENGTH_MAX: &[WorkoutTemplate] = &[
    session(Mon, WorkoutType::Strength, "Heavy squat", 50, 8, Key)
        .describe("Work up to heavy triples")
        .with(&[ex("back_squat", 5, 3), ex("box_jump", 3, 5)]),
    session(Tue, WorkoutType::Conditioning, "Light conditioning", 25, 5, Optional)
        .describe("Low-impact conditioning to support recovery")
        .with(&[ex("kettlebell_swing", 3, 12)]),
    session(Wed, WorkoutType::Strength, "Heavy bench", 50, 8, Key)
        .describe("Work up to heavy triples")
        .with(&[ex("bench_press", 5, 3), ex("pull_up", 4, 5)]),
    session(Thu, WorkoutType::Mobility, "Mobility and core", 25, 3, Optional)
        .describe("Joint mobility and trunk control")
        .with(MOBILITY),
    session(Fri, WorkoutType::Strength, "Heavy deadlift", 50, 8, Key)
        .describe("Work up to a heavy double")
        .with(&[ex("deadlift", 5, 2), ex("plank", 3, 1)]),
    session(Sat, WorkoutType::Conditioning, "Aerobic conditioning", 30, 5, Core)
        .describe("Steady circuit to maintain work capacity")
        .with(&[drill("jump_rope"), ex("mountain_climber", 3, 20)]),
];

const STRENGTH_DELOAD: &[WorkoutTemplate] = &[
    session(Mon, WorkoutType::Strength, "Technique squat and press", 35, 5, Core)
        .describe("Light loads, perfect reps")
        .with(&[ex("back_squat", 3, 5), ex("overhead_press", 3, 5)]),
    session(Wed, WorkoutType::Mobility, "Mobility and core", 30, 3, Core)
        .describe("Joint mobility and trunk control")
        .with(MOBILITY),
    session(Fri, WorkoutType::Strength, "Technique hinge and pull", 35, 5, Core)
        .describe("Light loads, perfect reps")
        .with(&[ex("deadlift", 3, 3), ex("pull_up", 3, 5)]),
    session(Sat, WorkoutType::Recovery, "Active recovery", 30, 2, Optional)
        .describe("Easy movement and soft-tissue work")
        .with(RECOVERY_WORK),
];

const GENERAL_FOUNDATION: &[WorkoutTemplate] = &[
    session(Mon, WorkoutType::Strength, "Full-body strength", 35, 5, Key)
        .describe("Fundamental patterns with controlled tempo")
        .with(&[
            ex("goblet_squat", 3, 10),
            ex("push_up", 3, 10),
            ex("bent_over_row", 3, 10),
            ex("plank", 3, 1),
        ]),
    session(Tue, WorkoutType::Easy, "Brisk walk or easy jog", 30, 4, Core)
        .describe("Easy aerobic movement"),
    session(Wed, WorkoutType::Mobility, "Mobility", 20, 3, Optional)
        .describe("Joint mobility and trunk control")
        .with(MOBILITY),
    session(Thu, WorkoutType::Conditioning, "Circuit conditioning", 30, 6, Core)
        .describe("Three rounds, steady pace")
        .with(&[
            ex("kettlebell_swing", 3, 15),
            ex("mountain_climber", 3, 20),
            ex("walking_lunge", 3, 10),
        ]),
    session(Sat, WorkoutType::CrossTraining, "Active weekend session", 45, 4, Optional)
        .describe("Hike, ride, or swim at an easy effort"),
    session(Sun, WorkoutType::Recovery, "Active recovery", 20, 2, Optional)
        .describe("Easy movement and soft-tissue work")
        .with(RECOVERY_WORK),
];

const GENERAL_DEVELOPMENT: &[WorkoutTemplate] = &[
    session(Mon, WorkoutType::Strength, "Strength circuit A", 40, 6, Key)
        .describe("Squat, push, and pull")
        .with(&[
            ex("goblet_squat", 3, 12),
            ex("push_up", 3, 12),
            ex("bent_over_row", 3, 12),
            ex("dead_bug", 3, 10),
        ]),
    session(Tue, WorkoutType::Intervals, "Interval conditioning", 30, 7, Core)
        .describe("30 seconds hard, 60 seconds easy")
        .with(&[ex("mountain_climber", 6, 20), drill("jump_rope")]),
    session(Wed, WorkoutType::Easy, "Easy cardio", 35, 4, Core)
        .describe("Easy aerobic movement"),
    session(Thu, WorkoutType::Strength, "Strength circuit B", 40, 6, Key)
        .describe("Hinge, press, and carry")
        .with(&[
            ex("romanian_deadlift", 3, 10),
            ex("overhead_press", 3, 10),
            ex("pull_up", 3, 6),
            ex("plank", 3, 1),
        ]),
    session(Sat, WorkoutType::CrossTraining, "Active weekend session", 50, 4, Optional)
        .describe("Hike, ride, or swim at an easy effort"),
    session(Sun, WorkoutType::Mobility, "Mobility", 20, 2, Optional)
        .describe("Joint mobility and trunk control")
        .with(MOBILITY),
];

const GENERAL_CONSOLIDATION: &[WorkoutTemplate] = &[
    session(Mon, WorkoutType::Strength, "Full-body strength", 40, 6, Key)
        .describe("Heavier sets of the fundamental patterns")
        .with(&[
            ex("goblet_squat", 4, 8),
            ex("push_up", 4, 12),
            ex("bent_over_row", 4, 8),
        ]),
    session(Tue, WorkoutType::Tempo, "Steady cardio", 35, 6, Core)
        .describe("Sustained moderate effort"),
    session(Thu, WorkoutType::Conditioning, "Benchmark circuit", 35, 7, Key)
        .describe("Repeat the circuit and compare with earlier weeks")
        .with(&[
            ex("kettlebell_swing", 4, 15),
            ex("push_up", 4, 12),
            ex("goblet_squat", 4, 12),
        ]),
    session(Sat, WorkoutType::Easy, "Long easy cardio", 50, 4, Core)
        .describe("Longest aerobic session of the week"),
    session(Sun, WorkoutType::Mobility, "Mobility", 20, 2, Optional)
        .describe("Joint mobility and trunk control")
        .with(MOBILITY),
];

/// Base week template for a phase
#[must_use]
pub const fn base_week(framework: FrameworkKind, phase: PhaseKind) -> &'static [WorkoutTemplate] {
    match phase {
        PhaseKind::Base => ENDURANCE_BASE,
        PhaseKind::Build => ENDURANCE_BUILD,
        PhaseKind::Peak => ENDURANCE_PEAK,
        PhaseKind::Taper => ENDURANCE_TAPER,
        PhaseKind::Foundation => match framework {
            FrameworkKind::Strength => STRENGTH_FOUNDATION,
            FrameworkKind::Endurance | FrameworkKind::GeneralFitness => GENERAL_FOUNDATION,
        },
        PhaseKind::Hypertrophy => STRENGTH_HYPERTROPHY,
        PhaseKind::MaxStrength => STRENGTH_MAX,
        PhaseKind::Deload => STRENGTH_DELOAD,
        PhaseKind::Development => GENERAL_DEVELOPMENT,
        PhaseKind::Consolidation => GENERAL_CONSOLIDATION,
    }
}

/// Every exercise id referenced by the templates
#[must_use]
pub fn referenced_exercise_ids() -> Vec<&'static str> {
    let phases = [
        ENDURANCE_BASE,
        ENDURANCE_BUILD,
        ENDURANCE_PEAK,
        ENDURANCE_TAPER,
        STRENGTH_FOUNDATION,
        STRENGTH_HYPERTROPHY,
        STRENGTH_MAX,
        STRENGTH_DELOAD,
        GENERAL_FOUNDATION,
        GENERAL_DEVELOPMENT,
        GENERAL_CONSOLIDATION,
    ];
    let mut ids: Vec<&'static str> = phases
        .iter()
        .flat_map(|templates| templates.iter())
        .chain(std::iter::once(&RECOVERY_SESSION))
        .flat_map(|template| template.exercises.iter().map(|slot| slot.exercise_id))
        .collect();
    ids.sort_unstable();
    ids.dedup();
    ids
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_PHASES: [(FrameworkKind, PhaseKind); 11] = [
        (FrameworkKind::Endurance, PhaseKind::Base),
        (FrameworkKind::Endurance, PhaseKind::Build),
        (FrameworkKind::Endurance, PhaseKind::Peak),
        (FrameworkKind::Endurance, PhaseKind::Taper),
        (FrameworkKind::Strength, PhaseKind::Foundation),
        (FrameworkKind::Strength, PhaseKind::Hypertrophy),
        (FrameworkKind::Strength, PhaseKind::MaxStrength),
        (FrameworkKind::Strength, PhaseKind::Deload),
        (FrameworkKind::GeneralFitness, PhaseKind::Foundation),
        (FrameworkKind::GeneralFitness, PhaseKind::Development),
        (FrameworkKind::GeneralFitness, PhaseKind::Consolidation),
    ];

    #[test]
    fn test_non_recovery_templates_have_key_sessions() {
        for (framework, phase) in ALL_PHASES {
            let templates = base_week(framework, phase);
            assert!(!templates.is_empty());
            if !phase.is_recovery() {
                assert!(
                    templates.iter().any(|t| t.role == SessionRole::Key),
                    "{phase:?} has no key session"
                );
            }
        }
    }

    #[test]
    fn test_templates_are_ordered_by_day() {
        for (framework, phase) in ALL_PHASES {
            let days: Vec<u32> = base_week(framework, phase)
                .iter()
                .map(|t| t.day.num_days_from_monday())
                .collect();
            assert!(days.windows(2).all(|pair| pair[0] < pair[1]));
        }
    }
}
