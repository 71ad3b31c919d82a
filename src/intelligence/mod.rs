// ABOUTME: Intelligence module re-exports from pierre-intelligence crate
// ABOUTME: Preserves crate::intelligence import paths while delegating to the extracted crate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Intelligence Module
//!
//! Deterministic program engines. This module re-exports the
//! `pierre-intelligence` crate so callers can use `crate::intelligence::*`.

pub use pierre_intelligence::*;
