// src/core/aggregator.rs
//
// Weighted aggregation of the frozen result set into one verdict.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::{DetectorId, WeightTable};
use crate::detection::DetectorResultSet;

/// Discrete band for the blended 0-100 safety score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SafetyLevel {
    Unsafe,
    Dangerous,
    Concerning,
    Acceptable,
    Good,
    Excellent,
}

/// Score-to-band thresholds, highest first. Tunable configuration, not
/// calibrated ground truth.
const SAFETY_BANDS: [(u8, SafetyLevel); 5] = [
    (90, SafetyLevel::Excellent),
    (75, SafetyLevel::Good),
    (60, SafetyLevel::Acceptable),
    (40, SafetyLevel::Concerning),
    (20, SafetyLevel::Dangerous),
];

impl SafetyLevel {
    pub fn from_score(score: u8) -> Self {
        for &(threshold, level) in &SAFETY_BANDS {
            if score >= threshold {
                return level;
            }
        }
        SafetyLevel::Unsafe
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Acceptable => "acceptable",
            Self::Concerning => "concerning",
            Self::Dangerous => "dangerous",
            Self::Unsafe => "unsafe",
        }
    }
}

impl std::fmt::Display for SafetyLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// The blended safety verdict for one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverallVerdict {
    /// Weighted overall score, 0-100, higher is safer.
    pub score: u8,
    pub safety_level: SafetyLevel,
    /// Each detector's effective (fallback-substituted) score.
    pub per_detector_score: BTreeMap<DetectorId, u8>,
}

/// Compute the weighted overall verdict from a frozen result set.
///
/// Pure and deterministic: identical inputs yield an identical verdict
/// regardless of the order detectors finished, because both inputs
/// iterate in detector-key order. Fallback and error slots contribute
/// the neutral substitute through `effective_score`.
pub fn compute_overall_score(
    results: &DetectorResultSet,
    weights: &WeightTable,
) -> OverallVerdict {
    let mut blended = 0.0f64;
    let mut per_detector_score = BTreeMap::new();

    for result in results.iter() {
        let effective = result.effective_score();
        blended += weights.weight(result.detector) * effective as f64;
        per_detector_score.insert(result.detector, effective.round() as u8);
    }

    let score = blended.round().clamp(0.0, 100.0) as u8;
    OverallVerdict {
        score,
        safety_level: SafetyLevel::from_score(score),
        per_detector_score,
    }
}
