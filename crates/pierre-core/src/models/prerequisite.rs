// ABOUTME: Progression gate result, progression state machine, and forced-generation audit record
// ABOUTME: PrerequisiteCheck is transient and recomputed on every generation attempt
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Outcome of evaluating the current week against the progression gate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrerequisiteCheck {
    /// Week evaluated
    pub week_number: u32,
    /// Completed / planned, 0-100
    pub completion_rate: f64,
    /// Completed workouts
    pub completed_workouts: u32,
    /// Planned workouts
    pub total_workouts: u32,
    /// Titles of workouts not completed
    pub missing_workouts: Vec<String>,
    /// Non-blocking concerns
    pub warnings: Vec<String>,
    /// Reasons progression is refused
    pub blockers: Vec<String>,
    /// Whether the next week may be generated
    pub can_proceed: bool,
    /// User-facing explanation
    pub coaching_message: String,
}

/// Where a program sits in the week-progression state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "week", rename_all = "snake_case")]
pub enum ProgressionState {
    /// Current week still needs work
    AwaitingCompletion(u32),
    /// Current week passed the gate
    Eligible(u32),
    /// A new week was appended
    Generated(u32),
}

impl ProgressionState {
    /// State implied by a gate evaluation
    #[must_use]
    pub const fn from_check(check: &PrerequisiteCheck) -> Self {
        if check.can_proceed {
            Self::Eligible(check.week_number)
        } else {
            Self::AwaitingCompletion(check.week_number)
        }
    }
}

/// Record of a generation, kept whenever the gate was bypassed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationAuditRecord {
    /// Record id
    pub id: Uuid,
    /// Program
    pub program_id: Uuid,
    /// Requesting user
    pub user_id: Uuid,
    /// Week that was generated
    pub generated_week: u32,
    /// Whether `force_generate` bypassed the gate
    pub forced: bool,
    /// Gate evaluation at the time of the request
    pub prerequisites: Option<PrerequisiteCheck>,
    /// When the generation happened
    pub recorded_at: DateTime<Utc>,
}
