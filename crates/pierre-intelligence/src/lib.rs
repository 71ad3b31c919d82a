// ABOUTME: Adaptive program engines: framework, week generation, summaries, analysis, and gating
// ABOUTME: Deterministic and synchronous; all I/O lives in the root crate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Pierre Intelligence
//!
//! The engines behind adaptive, week-at-a-time training programs:
//!
//! - [`FrameworkGenerator`] derives the periodization skeleton once, at creation
//! - [`WeekGenerator`] produces exactly one new week from the framework and directives
//! - [`WeeklySummaryCalculator`] recomputes a week's aggregate from its completions
//! - [`PerformanceAnalyzer`] turns recent completions into adaptation directives
//! - [`PrerequisiteGate`] decides whether the current week allows progression
//!
//! Every engine takes "now" as an argument, so identical inputs always give
//! identical outputs.

/// Exercise catalog interface and placeholder fallback
pub mod catalog;
/// Periodization framework generation
pub mod framework;
/// Completion pattern detection and directive mapping
pub mod performance_analyzer;
/// Progression gate
pub mod prerequisite_gate;
/// Free-text signal extraction
pub mod signals;
/// Phase week templates
pub mod templates;
/// One-week-at-a-time generation
pub mod week_generator;
/// Weekly completion aggregates
pub mod weekly_summary;

pub use catalog::{resolve_exercise, Exercise, ExerciseCatalog, ExerciseCategory};
pub use framework::FrameworkGenerator;
pub use performance_analyzer::{AnalysisOutcome, AnalyzerConfig, PerformanceAnalyzer};
pub use prerequisite_gate::PrerequisiteGate;
pub use signals::{KeywordSignalExtractor, SignalExtractor, Signals};
pub use week_generator::{GeneratedWeek, WeekGenerator, WeekRequest};
pub use weekly_summary::WeeklySummaryCalculator;
