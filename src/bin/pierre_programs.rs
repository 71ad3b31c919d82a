// ABOUTME: pierre-programs CLI - create programs, generate weeks, and log workouts from the terminal
// ABOUTME: Reads ServerConfig from the environment and prints every result as JSON
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Create a 16-week marathon program
//! pierre-programs --user-id <uuid> create --goal "Run a marathon" --target-date 2026-06-01
//!
//! # Generate the next week (add --force to bypass the prerequisite gate)
//! pierre-programs --user-id <uuid> next-week --program-id <uuid>
//!
//! # Log a workout
//! pierre-programs --user-id <uuid> complete --program-id <uuid> --week 1 --workout-id w1-1 --rpe 6 --rating 4
//!
//! # Skip a workout
//! pierre-programs --user-id <uuid> skip --program-id <uuid> --week 1 --workout-id w1-2 --reason "travel"
//!
//! # Show one program, or list all programs when --program-id is omitted
//! pierre-programs --user-id <uuid> show --program-id <uuid>
//!
//! # Progress report
//! pierre-programs --user-id <uuid> progress --program-id <uuid>
//! ```

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use pierre_programs::config::{DatabaseUrl, ServerConfig};
use pierre_programs::models::{ExperienceLevel, UserProfile};
use pierre_programs::services::{CompletionInput, ProgramOrchestrator};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

#[derive(Parser)]
#[command(
    name = "pierre-programs",
    about = "Pierre adaptive training program CLI",
    long_about = "Create goal-driven training programs, generate them one week at a time, and log completed workouts."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Owning user
    #[arg(long, global = true)]
    user_id: Option<Uuid>,

    /// Database URL override (`memory`, `sqlite::memory:`, or `sqlite:<path>`)
    #[arg(long, global = true)]
    database_url: Option<String>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Create a program and derive its framework
    Create {
        /// Goal, e.g. "Run a marathon"
        #[arg(long)]
        goal: String,

        /// Goal event date (YYYY-MM-DD)
        #[arg(long)]
        target_date: NaiveDate,

        /// beginner, intermediate, or advanced
        #[arg(long, default_value = "intermediate")]
        experience: ExperienceLevel,

        /// Days per week available for training
        #[arg(long, default_value = "4")]
        days: u8,

        /// Injury or constraint (repeatable)
        #[arg(long = "limitation")]
        limitations: Vec<String>,

        /// Free-text notes
        #[arg(long)]
        notes: Option<String>,
    },

    /// Generate the next week, or show why it is blocked
    NextWeek {
        #[arg(long)]
        program_id: Uuid,

        /// Bypass the prerequisite gate (recorded in the audit trail)
        #[arg(long)]
        force: bool,
    },

    /// Log a workout completion
    Complete {
        #[arg(long)]
        program_id: Uuid,

        #[arg(long)]
        week: u32,

        #[arg(long)]
        workout_id: String,

        /// Rate of perceived exertion (1-10)
        #[arg(long, default_value = "6")]
        rpe: u8,

        /// Overall rating (1-5)
        #[arg(long, default_value = "4")]
        rating: u8,

        /// Actual minutes (defaults to planned)
        #[arg(long)]
        duration: Option<u32>,

        /// Percentage completed for a partial session
        #[arg(long)]
        partial: Option<f64>,

        #[arg(long)]
        notes: Option<String>,
    },

    /// Skip a workout
    Skip {
        #[arg(long)]
        program_id: Uuid,

        #[arg(long)]
        week: u32,

        #[arg(long)]
        workout_id: String,

        #[arg(long, default_value = "")]
        reason: String,
    },

    /// Show a program, or list programs
    Show {
        #[arg(long)]
        program_id: Option<Uuid>,

        /// Show a single week with its summary
        #[arg(long, requires = "program_id")]
        week: Option<u32>,
    },

    /// Program progress report
    Progress {
        #[arg(long)]
        program_id: Uuid,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = ServerConfig::from_env().context("failed to load configuration")?;
    if cli.verbose {
        config.logging.level = "debug".into();
    }
    if let Some(url) = &cli.database_url {
        config.database = DatabaseUrl::parse_url(url)?;
    }
    config.logging.init()?;
    info!(config = %config.summary(), "pierre-programs starting");

    let user_id = cli.user_id.context("--user-id is required")?;
    let orchestrator = ProgramOrchestrator::from_config(&config).await?;

    match cli.command {
        Command::Create {
            goal,
            target_date,
            experience,
            days,
            limitations,
            notes,
        } => {
            let profile = UserProfile {
                experience_level: experience,
                available_days_per_week: days,
                limitations,
                notes,
            };
            let program = orchestrator
                .create_program(user_id, &goal, target_date, profile)
                .await?;
            print_json(&program)?;
        }
        Command::NextWeek { program_id, force } => {
            let outcome = orchestrator
                .generate_next_week(user_id, program_id, force)
                .await?;
            print_json(&outcome)?;
        }
        Command::Complete {
            program_id,
            week,
            workout_id,
            rpe,
            rating,
            duration,
            partial,
            notes,
        } => {
            let input = CompletionInput {
                actual_duration_minutes: duration,
                rpe,
                overall_rating: rating,
                notes,
                is_complete: partial.is_none(),
                completion_percentage: partial,
                ..CompletionInput::default()
            };
            let completion_id = orchestrator
                .save_completion(user_id, program_id, week, &workout_id, input)
                .await?;
            let summary = orchestrator
                .get_weekly_summary(user_id, program_id, week)
                .await?;
            print_json(&serde_json::json!({
                "completion_id": completion_id,
                "summary": summary,
            }))?;
        }
        Command::Skip {
            program_id,
            week,
            workout_id,
            reason,
        } => {
            orchestrator
                .skip_day(user_id, program_id, week, &workout_id, &reason)
                .await?;
            let summary = orchestrator
                .get_weekly_summary(user_id, program_id, week)
                .await?;
            print_json(&summary)?;
        }
        Command::Show {
            program_id: Some(program_id),
            week: Some(week_number),
        } => {
            let program = orchestrator.get_program(user_id, program_id).await?;
            let week = program
                .week(week_number)
                .with_context(|| format!("week {week_number} has not been generated"))?;
            let summary = orchestrator
                .get_weekly_summary(user_id, program_id, week_number)
                .await?;
            print_json(&serde_json::json!({ "week": week, "summary": summary }))?;
        }
        Command::Show {
            program_id: Some(program_id),
            week: None,
        } => {
            print_json(&orchestrator.get_program(user_id, program_id).await?)?;
        }
        Command::Show {
            program_id: None, ..
        } => {
            print_json(&orchestrator.list_programs(user_id).await?)?;
        }
        Command::Progress { program_id } => {
            print_json(&orchestrator.progress_report(user_id, program_id).await?)?;
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
