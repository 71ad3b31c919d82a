// ABOUTME: Performance analyzer detecting consistency, intensity, and recovery patterns in completions
// ABOUTME: Maps patterns to adaptation directives and resolves conflicts by axis with safety-first precedence
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Performance Analyzer
//!
//! Pure function of a window of [`WorkoutCompletion`] records. Every rule is
//! evaluated independently and more than one pattern may fire.
//!
//! | Pattern     | Fires when                                   | Directives                               |
//! |-------------|----------------------------------------------|------------------------------------------|
//! | recovery    | > 40% of records low energy or RPE >= 8      | `add_recovery`, `reduce_intensity`       |
//! | intensity   | recent 7 mean RPE > prior 7 mean RPE + 1.0   | `monitor_load`                           |
//! | consistency | completion ratio < 0.5                       | `reduce_volume`, `simplify_workouts`     |
//! | consistency | completion ratio >= 0.8, nothing concerning  | `maintain_progression` (+ `increase_intensity` when under-loaded) |
//!
//! Conflicts are resolved per [`DirectiveAxis`]: sources are visited in
//! precedence order (recovery, intensity, consistency) and a directive is
//! dropped when a higher-precedence source already claimed one of its axes.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use pierre_core::constants::analyzer::{
    CONSISTENCY_CONCERNING_CONFIDENCE, CONSISTENCY_CONCERNING_RATIO,
    CONSISTENCY_IMPROVING_CONFIDENCE, CONSISTENCY_IMPROVING_RATIO, HIGH_RPE_THRESHOLD,
    INTENSITY_CONFIDENCE, INTENSITY_HALF_SIZE, INTENSITY_MIN_HALF_RECORDS,
    INTENSITY_RISE_THRESHOLD, MIN_RECORDS, RECOVERY_CONFIDENCE, RECOVERY_DEFICIT_RATIO,
    UNDERLOADED_MEAN_RPE, WINDOW_SIZE,
};
use pierre_core::errors::ProgramError;
use pierre_core::models::{
    AdaptationDirective, DirectiveAxis, PatternDirection, PatternPriority, PatternType,
    PerformancePattern, WorkoutCompletion,
};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

/// Analyzer window configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Most recent completions considered
    pub window_size: usize,
    /// Minimum completions before any pattern is emitted
    pub min_records: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            window_size: WINDOW_SIZE,
            min_records: MIN_RECORDS,
        }
    }
}

/// Result of one analysis pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisOutcome {
    /// Patterns that fired, in precedence order
    pub patterns: Vec<PerformancePattern>,
    /// Conflict-resolved directives in application order
    pub directives: Vec<AdaptationDirective>,
    /// Directives discarded by conflict resolution
    pub suppressed_directives: Vec<AdaptationDirective>,
    /// Records analysed
    pub window_size: usize,
}

/// Detects patterns in completion history
#[derive(Debug, Clone, Default)]
pub struct PerformanceAnalyzer {
    config: AnalyzerConfig,
}

impl PerformanceAnalyzer {
    /// Create an analyzer with explicit configuration
    #[must_use]
    pub const fn new(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    /// Analyze the most recent completions of a program.
    ///
    /// `completions` may be in any order; the window is taken from the most
    /// recent records.
    ///
    /// # Errors
    ///
    /// Returns [`ProgramError::InsufficientData`] when fewer than
    /// `min_records` completions are available.
    pub fn analyze(
        &self,
        program_id: Uuid,
        completions: &[WorkoutCompletion],
        detected_at: DateTime<Utc>,
    ) -> Result<AnalysisOutcome, ProgramError> {
        let mut window: Vec<&WorkoutCompletion> = completions.iter().collect();
        window.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));
        window.truncate(self.config.window_size);

        if window.len() < self.config.min_records {
            return Err(ProgramError::InsufficientData {
                available: window.len(),
                required: self.config.min_records,
            });
        }

        let stats = WindowStats::from_window(&window);
        let mut patterns = Vec::new();

        if let Some(pattern) = detect_recovery(&stats) {
            patterns.push(pattern);
        }
        if let Some(pattern) = detect_intensity(&window) {
            patterns.push(pattern);
        }
        let any_concerning = patterns
            .iter()
            .any(|p| p.direction == PatternDirection::Concerning);
        if let Some(pattern) = detect_consistency(&stats, any_concerning) {
            patterns.push(pattern);
        }

        let patterns: Vec<PerformancePattern> = patterns
            .into_iter()
            .map(|draft| draft.into_pattern(program_id, detected_at))
            .collect();

        let (directives, suppressed_directives) = resolve_conflicts(&patterns);

        debug!(
            %program_id,
            window = window.len(),
            patterns = patterns.len(),
            directives = directives.len(),
            "Analyzed completion window"
        );

        Ok(AnalysisOutcome {
            patterns,
            directives,
            suppressed_directives,
            window_size: window.len(),
        })
    }
}

struct WindowStats {
    total: usize,
    complete: usize,
    deficit_tagged: usize,
    low_energy: usize,
    high_rpe: usize,
    mean_rpe: f64,
}

impl WindowStats {
    // Window sizes are small
    #[allow(clippy::cast_precision_loss)]
    fn from_window(window: &[&WorkoutCompletion]) -> Self {
        let total = window.len();
        let rpe_sum: f64 = window.iter().map(|c| f64::from(c.rpe)).sum();
        Self {
            total,
            complete: window.iter().filter(|c| c.is_complete).count(),
            deficit_tagged: window
                .iter()
                .filter(|c| c.energy.is_low() || c.rpe >= HIGH_RPE_THRESHOLD)
                .count(),
            low_energy: window.iter().filter(|c| c.energy.is_low()).count(),
            high_rpe: window.iter().filter(|c| c.rpe >= HIGH_RPE_THRESHOLD).count(),
            mean_rpe: if total == 0 { 0.0 } else { rpe_sum / total as f64 },
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn ratio(&self, part: usize) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            part as f64 / self.total as f64
        }
    }
}

/// Pattern before ids and timestamps are assigned
struct PatternDraft {
    pattern_type: PatternType,
    direction: PatternDirection,
    confidence: f64,
    priority: PatternPriority,
    evidence: Vec<String>,
    recommendations: Vec<String>,
    directives: Vec<AdaptationDirective>,
}

impl PatternDraft {
    fn into_pattern(self, program_id: Uuid, detected_at: DateTime<Utc>) -> PerformancePattern {
        PerformancePattern {
            id: Uuid::new_v4(),
            program_id,
            pattern_type: self.pattern_type,
            direction: self.direction,
            confidence: self.confidence,
            evidence: self.evidence,
            recommendations: self.recommendations,
            priority: self.priority,
            directives: self.directives,
            detected_at,
        }
    }
}

fn detect_recovery(stats: &WindowStats) -> Option<PatternDraft> {
    let share = stats.ratio(stats.deficit_tagged);
    if share <= RECOVERY_DEFICIT_RATIO {
        return None;
    }
    Some(PatternDraft {
        pattern_type: PatternType::Recovery,
        direction: PatternDirection::Concerning,
        confidence: RECOVERY_CONFIDENCE,
        priority: PatternPriority::High,
        evidence: vec![
            format!(
                "{} of {} recent sessions show low energy or RPE of {HIGH_RPE_THRESHOLD}+",
                stats.deficit_tagged, stats.total
            ),
            format!(
                "{} low-energy sessions, {} high-effort sessions",
                stats.low_energy, stats.high_rpe
            ),
        ],
        recommendations: vec![
            "Take a deload: add recovery and ease off intensity for a week".to_owned(),
            "Prioritize sleep and fueling before the next hard session".to_owned(),
        ],
        directives: vec![
            AdaptationDirective::AddRecovery,
            AdaptationDirective::ReduceIntensity,
        ],
    })
}

// Halves hold at most INTENSITY_HALF_SIZE records
#[allow(clippy::cast_precision_loss)]
fn detect_intensity(window: &[&WorkoutCompletion]) -> Option<PatternDraft> {
    let recent: Vec<f64> = window
        .iter()
        .take(INTENSITY_HALF_SIZE)
        .map(|c| f64::from(c.rpe))
        .collect();
    let prior: Vec<f64> = window
        .iter()
        .skip(INTENSITY_HALF_SIZE)
        .take(INTENSITY_HALF_SIZE)
        .map(|c| f64::from(c.rpe))
        .collect();
    if recent.len() < INTENSITY_MIN_HALF_RECORDS || prior.len() < INTENSITY_MIN_HALF_RECORDS {
        return None;
    }
    let recent_mean = recent.iter().sum::<f64>() / recent.len() as f64;
    let prior_mean = prior.iter().sum::<f64>() / prior.len() as f64;
    let rise = recent_mean - prior_mean;
    if rise <= INTENSITY_RISE_THRESHOLD {
        return None;
    }
    Some(PatternDraft {
        pattern_type: PatternType::Intensity,
        direction: PatternDirection::Improving,
        confidence: INTENSITY_CONFIDENCE,
        priority: PatternPriority::Medium,
        evidence: vec![format!(
            "Average RPE rose from {prior_mean:.1} to {recent_mean:.1} over the last {} sessions",
            recent.len()
        )],
        recommendations: vec![
            "Training harder is working; watch for signs of overreaching".to_owned(),
        ],
        directives: vec![AdaptationDirective::MonitorLoad],
    })
}

fn detect_consistency(stats: &WindowStats, any_concerning: bool) -> Option<PatternDraft> {
    let ratio = stats.ratio(stats.complete);
    let evidence = vec![format!(
        "{} of {} recent sessions completed in full ({:.0}%)",
        stats.complete,
        stats.total,
        ratio * 100.0
    )];

    if ratio < CONSISTENCY_CONCERNING_RATIO {
        return Some(PatternDraft {
            pattern_type: PatternType::Consistency,
            direction: PatternDirection::Concerning,
            confidence: CONSISTENCY_CONCERNING_CONFIDENCE,
            priority: PatternPriority::High,
            evidence,
            recommendations: vec![
                "Shorter, simpler sessions make it easier to stay on track".to_owned(),
            ],
            directives: vec![
                AdaptationDirective::ReduceVolume,
                AdaptationDirective::SimplifyWorkouts,
            ],
        });
    }

    if ratio >= CONSISTENCY_IMPROVING_RATIO {
        let mut directives = Vec::new();
        let mut recommendations = vec!["Keep the current rhythm going".to_owned()];
        if !any_concerning {
            directives.push(AdaptationDirective::MaintainProgression);
            if stats.mean_rpe < UNDERLOADED_MEAN_RPE {
                directives.push(AdaptationDirective::IncreaseIntensity);
                recommendations.push(format!(
                    "Average RPE of {:.1} leaves room for a little more intensity",
                    stats.mean_rpe
                ));
            }
        }
        return Some(PatternDraft {
            pattern_type: PatternType::Consistency,
            direction: PatternDirection::Improving,
            confidence: CONSISTENCY_IMPROVING_CONFIDENCE,
            priority: PatternPriority::Low,
            evidence,
            recommendations,
            directives,
        });
    }

    None
}

/// Resolve directive conflicts by axis; returns (kept, suppressed)
fn resolve_conflicts(
    patterns: &[PerformancePattern],
) -> (Vec<AdaptationDirective>, Vec<AdaptationDirective>) {
    let mut ordered: Vec<&PerformancePattern> = patterns.iter().collect();
    ordered.sort_by_key(|pattern| pattern.pattern_type.precedence());

    let mut claimed: HashSet<DirectiveAxis> = HashSet::new();
    let mut kept: Vec<AdaptationDirective> = Vec::new();
    let mut suppressed: Vec<AdaptationDirective> = Vec::new();

    for pattern in ordered {
        let mut claimed_by_source: Vec<DirectiveAxis> = Vec::new();
        for directive in &pattern.directives {
            if directive.axes().iter().any(|axis| claimed.contains(axis)) {
                suppressed.push(*directive);
            } else if !kept.contains(directive) {
                kept.push(*directive);
                claimed_by_source.extend_from_slice(directive.axes());
            }
        }
        claimed.extend(claimed_by_source);
    }

    kept.sort_by_key(AdaptationDirective::application_order);
    (kept, suppressed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(
        pattern_type: PatternType,
        directives: Vec<AdaptationDirective>,
    ) -> PerformancePattern {
        PerformancePattern {
            id: Uuid::nil(),
            program_id: Uuid::nil(),
            pattern_type,
            direction: PatternDirection::Concerning,
            confidence: 0.5,
            evidence: Vec::new(),
            recommendations: Vec::new(),
            priority: PatternPriority::High,
            directives,
            detected_at: DateTime::<Utc>::MIN_UTC,
        }
    }

    #[test]
    fn test_recovery_claims_intensity_axis_over_consistency() {
        let patterns = vec![
            pattern(
                PatternType::Consistency,
                vec![
                    AdaptationDirective::MaintainProgression,
                    AdaptationDirective::IncreaseIntensity,
                ],
            ),
            pattern(
                PatternType::Recovery,
                vec![
                    AdaptationDirective::AddRecovery,
                    AdaptationDirective::ReduceIntensity,
                ],
            ),
        ];
        let (kept, suppressed) = resolve_conflicts(&patterns);
        assert_eq!(
            kept,
            vec![
                AdaptationDirective::AddRecovery,
                AdaptationDirective::ReduceIntensity
            ]
        );
        assert_eq!(
            suppressed,
            vec![
                AdaptationDirective::MaintainProgression,
                AdaptationDirective::IncreaseIntensity
            ]
        );
    }

    #[test]
    fn test_same_source_directives_do_not_conflict() {
        let patterns = vec![pattern(
            PatternType::Consistency,
            vec![
                AdaptationDirective::MaintainProgression,
                AdaptationDirective::IncreaseIntensity,
            ],
        )];
        let (kept, suppressed) = resolve_conflicts(&patterns);
        assert_eq!(kept.len(), 2);
        assert!(suppressed.is_empty());
    }
}
