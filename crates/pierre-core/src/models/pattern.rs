// ABOUTME: Performance patterns detected from completion history and the directives they map to
// ABOUTME: Directives carry a fixed application order and the axes they claim during conflict resolution
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Pattern family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternType {
    /// How reliably planned sessions are completed
    Consistency,
    /// How perceived effort is trending
    Intensity,
    /// Whether the athlete is recovering between sessions
    Recovery,
}

impl PatternType {
    /// Storage name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Consistency => "consistency",
            Self::Intensity => "intensity",
            Self::Recovery => "recovery",
        }
    }

    /// Conflict precedence; lower wins (recovery, then intensity, then consistency)
    #[must_use]
    pub const fn precedence(&self) -> u8 {
        match self {
            Self::Recovery => 0,
            Self::Intensity => 1,
            Self::Consistency => 2,
        }
    }
}

/// Direction of a detected pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternDirection {
    /// Trending the right way
    Improving,
    /// Holding steady
    Stable,
    /// Needs intervention
    Concerning,
}

/// Priority of a detected pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternPriority {
    /// Informational
    Low,
    /// Worth acting on
    Medium,
    /// Act now
    High,
}

/// Dimension of the plan a directive changes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DirectiveAxis {
    /// Recovery sessions
    Recovery,
    /// Total training time
    Volume,
    /// Target RPE
    Intensity,
    /// Session composition
    Structure,
    /// Notes only
    Monitoring,
}

/// Structural instruction for the week generator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdaptationDirective {
    /// Insert or extend a recovery session
    AddRecovery,
    /// Drop or shorten non-key sessions
    ReduceVolume,
    /// Drop optional sessions, keep every key session
    EmphasizeKeyWorkouts,
    /// Replace structured non-key sessions with steady work
    SimplifyWorkouts,
    /// Lower non-key target RPE by one step
    ReduceIntensity,
    /// Raise non-key target RPE by one step
    IncreaseIntensity,
    /// Flag rising effort for overreach monitoring
    MonitorLoad,
    /// Keep progressing as planned
    MaintainProgression,
}

impl AdaptationDirective {
    /// Every directive in application order
    pub const APPLICATION_ORDER: [Self; 8] = [
        Self::AddRecovery,
        Self::ReduceVolume,
        Self::EmphasizeKeyWorkouts,
        Self::SimplifyWorkouts,
        Self::ReduceIntensity,
        Self::IncreaseIntensity,
        Self::MonitorLoad,
        Self::MaintainProgression,
    ];

    /// Position in the fixed application order
    #[must_use]
    pub const fn application_order(&self) -> u8 {
        match self {
            Self::AddRecovery => 0,
            Self::ReduceVolume => 1,
            Self::EmphasizeKeyWorkouts => 2,
            Self::SimplifyWorkouts => 3,
            Self::ReduceIntensity => 4,
            Self::IncreaseIntensity => 5,
            Self::MonitorLoad => 6,
            Self::MaintainProgression => 7,
        }
    }

    /// Axes claimed during conflict resolution
    #[must_use]
    pub const fn axes(&self) -> &'static [DirectiveAxis] {
        match self {
            Self::AddRecovery => &[DirectiveAxis::Recovery],
            Self::ReduceVolume | Self::EmphasizeKeyWorkouts => &[DirectiveAxis::Volume],
            Self::SimplifyWorkouts => &[DirectiveAxis::Structure],
            Self::ReduceIntensity | Self::IncreaseIntensity => &[DirectiveAxis::Intensity],
            Self::MonitorLoad => &[DirectiveAxis::Monitoring],
            Self::MaintainProgression => &[DirectiveAxis::Volume, DirectiveAxis::Intensity],
        }
    }

    /// Wire name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AddRecovery => "add_recovery",
            Self::ReduceVolume => "reduce_volume",
            Self::EmphasizeKeyWorkouts => "emphasize_key_workouts",
            Self::SimplifyWorkouts => "simplify_workouts",
            Self::ReduceIntensity => "reduce_intensity",
            Self::IncreaseIntensity => "increase_intensity",
            Self::MonitorLoad => "monitor_load",
            Self::MaintainProgression => "maintain_progression",
        }
    }
}

impl fmt::Display for AdaptationDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Write-once audit record of a detected pattern
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformancePattern {
    /// Record id
    pub id: Uuid,
    /// Program analysed
    pub program_id: Uuid,
    /// Pattern family
    pub pattern_type: PatternType,
    /// Direction
    pub direction: PatternDirection,
    /// Confidence (0-1)
    pub confidence: f64,
    /// Observations supporting the pattern
    pub evidence: Vec<String>,
    /// Coaching recommendations
    pub recommendations: Vec<String>,
    /// Priority
    pub priority: PatternPriority,
    /// Directives this pattern maps to (before conflict resolution)
    pub directives: Vec<AdaptationDirective>,
    /// Detection time
    pub detected_at: DateTime<Utc>,
}
