// ABOUTME: Data model re-exports from pierre-core for the program engine
// ABOUTME: Programs, frameworks, weeks, workouts, completions, patterns, and gate results
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use pierre_core::models::*;
