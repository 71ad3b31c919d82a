// ABOUTME: Constant re-exports from pierre-core for the program engine
// ABOUTME: Thresholds, caps, and defaults grouped by the engine that consumes them
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use pierre_core::constants::*;
