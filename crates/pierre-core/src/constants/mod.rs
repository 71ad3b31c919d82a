// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Thresholds, caps, and tunable defaults for the adaptive program engines
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped by the engine that consumes them. Values that are
//! policy rather than contract (gate threshold, analyzer window, goal-achievement
//! thresholds) are defaults only; the root crate's `ProgramPolicy` can override
//! them from the environment.

/// Service identity used in structured logs
pub mod service_names {
    /// Default service name
    pub const PIERRE_PROGRAMS: &str = "pierre-programs";
}

/// Completion record validation ranges
pub mod completion {
    /// Lowest valid RPE
    pub const MIN_RPE: u8 = 1;
    /// Highest valid RPE
    pub const MAX_RPE: u8 = 10;
    /// Lowest valid overall rating
    pub const MIN_OVERALL_RATING: u8 = 1;
    /// Highest valid overall rating
    pub const MAX_OVERALL_RATING: u8 = 5;
    /// Upper bound for completion percentage
    pub const MAX_COMPLETION_PERCENTAGE: f64 = 100.0;
}

/// Framework generation caps and phase splits
pub mod framework {
    /// Maximum program length for endurance goals
    pub const ENDURANCE_WEEK_CAP: u32 = 24;
    /// Maximum program length for strength goals
    pub const STRENGTH_WEEK_CAP: u32 = 16;
    /// Maximum program length for general fitness goals
    pub const GENERAL_WEEK_CAP: u32 = 12;

    /// Endurance split in percent: base / build / peak / taper
    pub const ENDURANCE_PHASE_PERCENTAGES: [u32; 4] = [40, 30, 20, 10];
    /// Strength split in percent: foundation / hypertrophy / max strength / deload
    pub const STRENGTH_PHASE_PERCENTAGES: [u32; 4] = [25, 35, 30, 10];
    /// General split in percent: foundation / development / consolidation
    pub const GENERAL_PHASE_PERCENTAGES: [u32; 3] = [40, 40, 20];

    /// Fewest training days a template is trimmed to
    pub const MIN_TRAINING_DAYS: u8 = 2;
    /// Most training days a template can use
    pub const MAX_TRAINING_DAYS: u8 = 7;

    /// Goal keywords selecting the endurance framework (checked first)
    pub const ENDURANCE_KEYWORDS: [&str; 9] = [
        "marathon",
        "half marathon",
        "10k",
        "5k",
        "race",
        "run",
        "triathlon",
        "cycling",
        "endurance",
    ];
    /// Goal keywords selecting the strength framework
    pub const STRENGTH_KEYWORDS: [&str; 8] = [
        "strength",
        "muscle",
        "lift",
        "powerlifting",
        "squat",
        "deadlift",
        "bench",
        "hypertrophy",
    ];
}

/// Week generation steps
pub mod week_generation {
    /// Duration growth per week inside a phase
    pub const WEEKLY_DURATION_GROWTH: f64 = 0.05;
    /// Cap on within-phase duration growth
    pub const MAX_DURATION_GROWTH: f64 = 0.30;
    /// Duration reduction per week inside a recovery phase
    pub const RECOVERY_PHASE_REDUCTION: f64 = 0.10;
    /// Starter week duration multiplier
    pub const STARTER_DURATION_FACTOR: f64 = 0.8;
    /// Starter week RPE reduction
    pub const STARTER_RPE_REDUCTION: u8 = 1;
    /// `reduce_volume` duration multiplier for non-key sessions
    pub const VOLUME_REDUCTION_FACTOR: f64 = 0.8;
    /// Shortest session `reduce_volume` will produce
    pub const MIN_SESSION_MINUTES: u32 = 15;
    /// Fixed RPE step for intensity directives
    pub const INTENSITY_STEP: u8 = 1;
    /// RPE ceiling for simplified sessions
    pub const SIMPLIFIED_MAX_RPE: u8 = 6;
    /// Minutes added to an existing recovery session
    pub const RECOVERY_EXTENSION_MINUTES: u32 = 10;
    /// Length of an inserted recovery session
    pub const RECOVERY_SESSION_MINUTES: u32 = 30;
    /// Target RPE of an inserted recovery session
    pub const RECOVERY_SESSION_RPE: u8 = 3;
}

/// Prerequisite gate thresholds
pub mod gate {
    /// Minimum share of the week completed before progressing
    pub const MIN_COMPLETION_PERCENT: f64 = 60.0;
    /// Below this (but above the minimum) a warning is attached
    pub const COMFORTABLE_COMPLETION_PERCENT: f64 = 80.0;
}

/// Performance analyzer thresholds
pub mod analyzer {
    /// Most recent completions analysed
    pub const WINDOW_SIZE: usize = 30;
    /// Fewer completions than this yields `InsufficientData`
    pub const MIN_RECORDS: usize = 5;
    /// Consistency ratio at or above which the athlete is improving
    pub const CONSISTENCY_IMPROVING_RATIO: f64 = 0.8;
    /// Consistency ratio below which the pattern is concerning
    pub const CONSISTENCY_CONCERNING_RATIO: f64 = 0.5;
    /// Confidence of an improving consistency pattern
    pub const CONSISTENCY_IMPROVING_CONFIDENCE: f64 = 0.9;
    /// Confidence of a concerning consistency pattern
    pub const CONSISTENCY_CONCERNING_CONFIDENCE: f64 = 0.8;
    /// Records per half in the intensity comparison
    pub const INTENSITY_HALF_SIZE: usize = 7;
    /// Minimum records in each half
    pub const INTENSITY_MIN_HALF_RECORDS: usize = 3;
    /// RPE rise that fires the intensity pattern
    pub const INTENSITY_RISE_THRESHOLD: f64 = 1.0;
    /// Confidence of the intensity pattern
    pub const INTENSITY_CONFIDENCE: f64 = 0.7;
    /// RPE at or above which a record counts as recovery-deficit tagged
    pub const HIGH_RPE_THRESHOLD: u8 = 8;
    /// Share of tagged records that fires the recovery pattern
    pub const RECOVERY_DEFICIT_RATIO: f64 = 0.4;
    /// Confidence of the recovery pattern
    pub const RECOVERY_CONFIDENCE: f64 = 0.85;
    /// Mean RPE below which a consistent athlete is considered under-loaded
    pub const UNDERLOADED_MEAN_RPE: f64 = 6.0;
}

/// Weekly summary scoring
pub mod summary {
    /// Weight of consistency in progression readiness
    pub const READINESS_CONSISTENCY_WEIGHT: f64 = 0.4;
    /// Weight of key workout completion in progression readiness
    pub const READINESS_KEY_WEIGHT: f64 = 0.3;
    /// Weight of RPE fitness in progression readiness
    pub const READINESS_RPE_WEIGHT: f64 = 0.3;
    /// Lower bound of the productive RPE band
    pub const PRODUCTIVE_RPE_MIN: f64 = 5.0;
    /// Upper bound of the productive RPE band
    pub const PRODUCTIVE_RPE_MAX: f64 = 8.0;
    /// Readiness points lost per RPE point outside the band
    pub const RPE_PENALTY_PER_POINT: f64 = 20.0;
    /// RPE score when no RPE data exists
    pub const NEUTRAL_RPE_SCORE: f64 = 50.0;
    /// Mean RPE above which the week is flagged as very hard
    pub const HIGH_AVERAGE_RPE: f64 = 8.5;
    /// Share of low-energy or poor-sleep sessions flagged as a challenge
    pub const RECOVERY_CHALLENGE_RATIO: f64 = 0.4;
    /// Consistency at which a positive pattern is recorded
    pub const STRONG_CONSISTENCY: f64 = 80.0;
    /// Mean rating at which a positive pattern is recorded
    pub const STRONG_RATING: f64 = 4.0;
}

/// Goal achievement heuristic (tunable policy, not a contract)
pub mod goal_achievement {
    /// Overall completion rate required
    pub const MIN_COMPLETION_PERCENT: f64 = 90.0;
    /// Mean weekly consistency required
    pub const MIN_CONSISTENCY_PERCENT: f64 = 80.0;
}

/// Text generation guard defaults
pub mod text_generation {
    /// Per-attempt timeout
    pub const DEFAULT_TIMEOUT_SECS: u64 = 8;
    /// Retries after the first attempt
    pub const DEFAULT_MAX_RETRIES: u32 = 1;
    /// Longest accepted response
    pub const DEFAULT_MAX_CHARS: usize = 600;
}

/// Persistence defaults
pub mod storage {
    /// Default database location
    pub const DEFAULT_DATABASE_URL: &str = "sqlite:./data/programs.db";
    /// Attempts for internal read-modify-write loops
    pub const DEFAULT_MAX_WRITE_RETRIES: u32 = 3;
    /// Default page size for pattern listings
    pub const DEFAULT_PATTERN_LIMIT: u32 = 20;
}
