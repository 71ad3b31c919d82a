// ABOUTME: Signal extraction from free-text profile notes behind a narrow trait
// ABOUTME: Keeps keyword matching out of the adaptation logic; only program creation consumes it
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

/// Structured signals recovered from free text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signals {
    /// Physical limitations (normalized labels)
    pub limitations: Vec<String>,
    /// Training preferences (normalized labels)
    pub preferences: Vec<String>,
}

impl Signals {
    /// True when nothing was recognized
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.limitations.is_empty() && self.preferences.is_empty()
    }
}

/// Turns free text into structured signals
pub trait SignalExtractor: Send + Sync {
    /// Extract signals from `text`
    fn extract(&self, text: &str) -> Signals;
}

const LIMITATION_PHRASES: &[(&str, &str)] = &[
    ("knee", "knee"),
    ("back pain", "lower back"),
    ("lower back", "lower back"),
    ("shoulder", "shoulder"),
    ("ankle", "ankle"),
    ("hip", "hip"),
    ("achilles", "achilles"),
    ("plantar", "plantar fascia"),
    ("wrist", "wrist"),
];

const PREFERENCE_PHRASES: &[(&str, &str)] = &[
    ("morning", "morning sessions"),
    ("evening", "evening sessions"),
    ("outdoor", "outdoor training"),
    ("treadmill", "indoor training"),
    ("gym", "gym access"),
    ("home", "home training"),
    ("short", "short sessions"),
];

/// Phrase-table extractor
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordSignalExtractor;

impl KeywordSignalExtractor {
    fn collect(lowered: &str, table: &[(&str, &str)]) -> Vec<String> {
        let mut found: Vec<String> = Vec::new();
        for (phrase, label) in table {
            if lowered.contains(phrase) && !found.iter().any(|existing| existing == label) {
                found.push((*label).to_owned());
            }
        }
        found
    }
}

impl SignalExtractor for KeywordSignalExtractor {
    fn extract(&self, text: &str) -> Signals {
        let lowered = text.to_lowercase();
        Signals {
            limitations: Self::collect(&lowered, LIMITATION_PHRASES),
            preferences: Self::collect(&lowered, PREFERENCE_PHRASES),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_limitations_and_preferences() {
        let signals = KeywordSignalExtractor
            .extract("Recovering from back pain, and my Knee aches. I prefer morning runs outdoors.");
        assert_eq!(signals.limitations, vec!["knee", "lower back"]);
        assert_eq!(signals.preferences, vec!["morning sessions", "outdoor training"]);
    }

    #[test]
    fn test_deduplicates_labels() {
        let signals = KeywordSignalExtractor.extract("lower back pain, back pain");
        assert_eq!(signals.limitations, vec!["lower back"]);
    }

    #[test]
    fn test_plain_text_yields_nothing() {
        assert!(KeywordSignalExtractor.extract("just want to get fit").is_empty());
    }
}
