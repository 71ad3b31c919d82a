// ABOUTME: Program and periodization framework models
// ABOUTME: Defines Program, ProgramStatus, ProgramFramework, Phase, Milestone, and UserProfile
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::week::TrainingWeek;
use crate::errors::ProgramError;

/// Lifecycle status of a program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgramStatus {
    /// Weeks can be generated and logged
    Active,
    /// Temporarily suspended by the user
    Paused,
    /// Final planned week reached
    Completed,
    /// Retired by the user
    Archived,
}

impl ProgramStatus {
    /// String form used for storage and logging
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Paused => "paused",
            Self::Completed => "completed",
            Self::Archived => "archived",
        }
    }

    /// Terminal states have no transitions out
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Archived)
    }
}

impl fmt::Display for ProgramStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProgramStatus {
    type Err = ProgramError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "paused" => Ok(Self::Paused),
            "completed" => Ok(Self::Completed),
            "archived" => Ok(Self::Archived),
            other => Err(ProgramError::invalid_input(format!(
                "unknown program status '{other}'"
            ))),
        }
    }
}

/// Self-reported training experience
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceLevel {
    /// Less than a year of structured training
    Beginner,
    /// One to three years
    #[default]
    Intermediate,
    /// Three or more years
    Advanced,
}

impl FromStr for ExperienceLevel {
    type Err = ProgramError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "beginner" => Ok(Self::Beginner),
            "intermediate" => Ok(Self::Intermediate),
            "advanced" => Ok(Self::Advanced),
            other => Err(ProgramError::invalid_input(format!(
                "unknown experience level '{other}'"
            ))),
        }
    }
}

/// Athlete profile supplied at program creation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Training experience
    pub experience_level: ExperienceLevel,
    /// Days per week the athlete can train (clamped to 2..=7 by the generators)
    pub available_days_per_week: u8,
    /// Injuries or constraints the plan must respect
    #[serde(default)]
    pub limitations: Vec<String>,
    /// Optional free-text notes (fed through signal extraction)
    #[serde(default)]
    pub notes: Option<String>,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            experience_level: ExperienceLevel::default(),
            available_days_per_week: 4,
            limitations: Vec::new(),
            notes: None,
        }
    }
}

/// Which framework family a goal selected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameworkKind {
    /// Running, cycling, triathlon, and race goals
    Endurance,
    /// Strength and hypertrophy goals
    Strength,
    /// Everything else
    GeneralFitness,
}

/// Training focus of a phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseKind {
    /// Aerobic base building
    Base,
    /// Race-specific build
    Build,
    /// Peak sharpening
    Peak,
    /// Pre-event taper
    Taper,
    /// Movement quality and work capacity
    Foundation,
    /// Volume-driven muscle gain
    Hypertrophy,
    /// Heavy, low-rep strength
    MaxStrength,
    /// Planned unloading
    Deload,
    /// General capacity development
    Development,
    /// Locking in gains
    Consolidation,
}

impl PhaseKind {
    /// Recovery phases are exempt from the key-workout requirement
    #[must_use]
    pub const fn is_recovery(&self) -> bool {
        matches!(self, Self::Taper | Self::Deload)
    }
}

/// Contiguous block of weeks sharing a training focus
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phase {
    /// Display name
    pub name: String,
    /// Phase category
    pub kind: PhaseKind,
    /// What the phase develops
    pub focus: String,
    /// Length in weeks (always >= 1)
    pub duration_weeks: u32,
}

/// Checkpoint within the program
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    /// Week at which the milestone is due (1-based)
    pub week_number: u32,
    /// What should be achieved by then
    pub target_description: String,
}

/// Free-text heuristic consumed by the week generator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdaptationRule {
    /// Rule text
    pub description: String,
}

impl AdaptationRule {
    /// Create a rule from text
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// Periodization skeleton derived once at program creation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramFramework {
    /// Framework family selected from the goal
    pub kind: FrameworkKind,
    /// Planned program length
    pub estimated_weeks: u32,
    /// Sessions per week the templates are trimmed to
    pub sessions_per_week: u8,
    /// Ordered phases; durations sum to `estimated_weeks`
    pub phases: Vec<Phase>,
    /// Ordered milestones
    pub milestones: Vec<Milestone>,
    /// Heuristics for the week generator
    pub adaptation_rules: Vec<AdaptationRule>,
}

impl ProgramFramework {
    /// Locate the phase covering `week_number`, with the 1-based week inside that phase.
    ///
    /// Weeks past the end of the framework resolve to the final phase.
    #[must_use]
    pub fn phase_for_week(&self, week_number: u32) -> Option<(&Phase, u32)> {
        let mut start = 1;
        for phase in &self.phases {
            let end = start + phase.duration_weeks;
            if week_number < end {
                return Some((phase, week_number.saturating_sub(start) + 1));
            }
            start = end;
        }
        self.phases
            .last()
            .map(|phase| (phase, phase.duration_weeks.max(1)))
    }

    /// First milestone due at or after `week_number`
    #[must_use]
    pub fn next_milestone(&self, week_number: u32) -> Option<&Milestone> {
        self.milestones
            .iter()
            .find(|milestone| milestone.week_number >= week_number)
    }
}

/// A user's goal-driven program
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Program {
    /// Program identifier
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// Goal text as entered by the user
    pub goal: String,
    /// Date of the goal event
    pub target_date: NaiveDate,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp
    pub updated_at: DateTime<Utc>,
    /// Number of generated weeks; always equals `weeks.len()`
    pub current_week_number: u32,
    /// Lifecycle status
    pub status: ProgramStatus,
    /// Profile the framework was derived from
    pub profile: UserProfile,
    /// Immutable periodization skeleton
    pub framework: ProgramFramework,
    /// Generated weeks, numbered 1..=N without gaps
    pub weeks: Vec<TrainingWeek>,
}

impl Program {
    /// Create an active program with no generated weeks
    #[must_use]
    pub fn new(
        user_id: Uuid,
        goal: impl Into<String>,
        target_date: NaiveDate,
        profile: UserProfile,
        framework: ProgramFramework,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            goal: goal.into(),
            target_date,
            created_at,
            updated_at: created_at,
            current_week_number: 0,
            status: ProgramStatus::Active,
            profile,
            framework,
            weeks: Vec::new(),
        }
    }

    /// Most recently generated week
    #[must_use]
    pub fn current_week(&self) -> Option<&TrainingWeek> {
        self.weeks.last()
    }

    /// Week by 1-based number
    #[must_use]
    pub fn week(&self, week_number: u32) -> Option<&TrainingWeek> {
        let index = usize::try_from(week_number.checked_sub(1)?).ok()?;
        self.weeks.get(index)
    }

    /// Mutable week by 1-based number
    pub fn week_mut(&mut self, week_number: u32) -> Option<&mut TrainingWeek> {
        let index = usize::try_from(week_number.checked_sub(1)?).ok()?;
        self.weeks.get_mut(index)
    }

    /// Whether every planned week has been generated
    #[must_use]
    pub fn all_weeks_generated(&self) -> bool {
        self.current_week_number >= self.framework.estimated_weeks
    }

    /// Fail with `ProgramNotActive` unless the program is active
    ///
    /// # Errors
    ///
    /// Returns [`ProgramError::ProgramNotActive`] for paused, completed, or archived programs.
    pub fn ensure_active(&self) -> Result<(), ProgramError> {
        if self.status == ProgramStatus::Active {
            Ok(())
        } else {
            Err(ProgramError::ProgramNotActive {
                program_id: self.id,
                status: self.status,
            })
        }
    }

    /// Append the next week, closing the previous one.
    ///
    /// # Errors
    ///
    /// Returns [`ProgramError::InvalidInput`] if `week.week_number` is not
    /// `current_week_number + 1`.
    pub fn append_week(
        &mut self,
        week: TrainingWeek,
        now: DateTime<Utc>,
    ) -> Result<(), ProgramError> {
        let expected = self.current_week_number + 1;
        if week.week_number != expected {
            return Err(ProgramError::invalid_input(format!(
                "week {} cannot follow week {}",
                week.week_number, self.current_week_number
            )));
        }
        if let Some(previous) = self.weeks.last_mut() {
            previous.completed = true;
        }
        self.weeks.push(week);
        self.current_week_number = expected;
        self.updated_at = now;
        Ok(())
    }

    /// Check the week-sequence invariant
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        usize::try_from(self.current_week_number).is_ok_and(|n| n == self.weeks.len())
            && self
                .weeks
                .iter()
                .zip(1..)
                .all(|(week, expected)| week.week_number == expected)
    }
}
