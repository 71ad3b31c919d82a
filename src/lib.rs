// ABOUTME: Main library entry point for the Pierre adaptive progressive program engine
// ABOUTME: Goal-driven training programs generated one week at a time from actual completion data
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

// Crate-level attributes:
// - deny(unsafe_code): Zero-tolerance unsafe policy
#![deny(unsafe_code)]

//! # Pierre Programs
//!
//! An adaptive training-program engine. A user states a goal and a target
//! date; the engine derives a periodization framework once, then generates
//! training weeks one at a time. Each new week is shaped by what the user
//! actually completed, and progression is gated on completing the current week.
//!
//! ## Architecture
//!
//! - **Engines** ([`intelligence`]): framework, week generation, weekly
//!   summaries, performance analysis, and the prerequisite gate. Pure and
//!   deterministic.
//! - **Storage** ([`database_plugins`]): versioned program documents with
//!   conditional writes, in memory or in SQLite
//! - **Services** ([`services`]): the completion store and the
//!   [`services::ProgramOrchestrator`] that sequences everything
//! - **Narration** ([`llm`]): optional text generation for the week's coaching
//!   note, always with a template fallback
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use chrono::{Duration, Utc};
//! use pierre_programs::catalog::StaticExerciseCatalog;
//! use pierre_programs::config::ProgramPolicy;
//! use pierre_programs::database_plugins::memory::InMemoryDatabase;
//! use pierre_programs::errors::AppResult;
//! use pierre_programs::models::UserProfile;
//! use pierre_programs::services::{GenerationOutcome, ProgramOrchestrator};
//! use uuid::Uuid;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let orchestrator = ProgramOrchestrator::new(
//!         Arc::new(InMemoryDatabase::new()),
//!         Arc::new(StaticExerciseCatalog::builtin()),
//!         ProgramPolicy::default(),
//!     );
//!     let user_id = Uuid::new_v4();
//!     let target = Utc::now().date_naive() + Duration::weeks(16);
//!     let program = orchestrator
//!         .create_program(user_id, "Run a marathon", target, UserProfile::default())
//!         .await?;
//!
//!     if let GenerationOutcome::Generated { week, .. } =
//!         orchestrator.generate_next_week(user_id, program.id, false).await?
//!     {
//!         println!("Week {}: {}", week.week_number, week.theme);
//!     }
//!     Ok(())
//! }
//! ```

/// Built-in exercise catalog
pub mod catalog;

/// Environment-driven configuration
pub mod config;

/// Tunable thresholds and defaults
pub mod constants;

/// Program, completion, summary, pattern, and audit persistence
pub mod database_plugins;

/// Unified error handling
pub mod errors;

/// Program engines
pub mod intelligence;

/// Optional text generation for week narration
pub mod llm;

/// Structured logging setup and domain log events
pub mod logging;

/// Data models
pub mod models;

/// Completion store and program orchestrator
pub mod services;
