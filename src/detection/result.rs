//! Detector results and the frozen per-request result set

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::DetectorId;
use crate::detectors::DetectorError;

use super::signal::DetectorSignal;

/// Substitute score for a detector whose contribution is unavailable.
///
/// Chosen at the midpoint of the 0-100 scale so a failed or timed-out
/// detector neither penalizes nor flatters the aggregate. Applied
/// uniformly by the orchestrator/aggregator, never by detectors.
pub const NEUTRAL_SCORE: f32 = 50.0;

/// Outcome status of one detector invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectorStatus {
    /// Detector produced a genuine signal.
    Ok,
    /// Detector timed out, was cancelled, or panicked; slot holds the
    /// neutral substitute.
    Fallback,
    /// Detector reported a failure itself; slot holds the neutral
    /// substitute.
    Error,
}

/// Payload a detector produces on success, before the orchestrator
/// stamps status and identity onto it.
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    pub signal: DetectorSignal,
    pub confidence: f32,
    pub raw_score: f32,
    pub findings: Vec<String>,
}

impl Detection {
    pub fn new(signal: DetectorSignal, confidence: f32, raw_score: f32) -> Self {
        Self {
            signal,
            confidence: confidence.clamp(0.0, 1.0),
            raw_score: raw_score.clamp(0.0, 100.0),
            findings: Vec::new(),
        }
    }

    pub fn with_finding(mut self, finding: impl Into<String>) -> Self {
        self.findings.push(finding.into());
        self
    }

    pub fn with_findings(mut self, findings: impl IntoIterator<Item = String>) -> Self {
        self.findings.extend(findings);
        self
    }
}

/// One detector's contribution to a request, immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectorResult {
    pub detector: DetectorId,
    pub signal: DetectorSignal,
    /// Detector confidence in its own signal, 0 for fallback/error slots.
    pub confidence: f32,
    /// Safety score on 0-100, higher is safer.
    pub raw_score: f32,
    pub findings: Vec<String>,
    pub status: DetectorStatus,
}

impl DetectorResult {
    pub fn ok(detector: DetectorId, detection: Detection) -> Self {
        Self {
            detector,
            signal: detection.signal,
            confidence: detection.confidence,
            raw_score: detection.raw_score,
            findings: detection.findings,
            status: DetectorStatus::Ok,
        }
    }

    /// Slot for a detector that timed out, was cancelled, or panicked.
    pub fn fallback(detector: DetectorId, reason: impl Into<String>) -> Self {
        Self {
            detector,
            signal: DetectorSignal::class("unavailable"),
            confidence: 0.0,
            raw_score: NEUTRAL_SCORE,
            findings: vec![reason.into()],
            status: DetectorStatus::Fallback,
        }
    }

    /// Slot for a detector that surfaced its own failure.
    pub fn error(detector: DetectorId, err: &DetectorError) -> Self {
        Self {
            detector,
            signal: DetectorSignal::class("unavailable"),
            confidence: 0.0,
            raw_score: NEUTRAL_SCORE,
            findings: vec![err.to_string()],
            status: DetectorStatus::Error,
        }
    }

    /// Score that enters aggregation: the raw score for genuine results,
    /// the neutral substitute otherwise.
    pub fn effective_score(&self) -> f32 {
        match self.status {
            DetectorStatus::Ok => self.raw_score,
            DetectorStatus::Fallback | DetectorStatus::Error => NEUTRAL_SCORE,
        }
    }
}

/// All detector contributions for one request, keyed by detector.
///
/// Frozen at fan-in; downstream stages are pure readers. BTreeMap keying
/// makes iteration order independent of task completion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetectorResultSet {
    results: BTreeMap<DetectorId, DetectorResult>,
}

impl DetectorResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, result: DetectorResult) {
        self.results.insert(result.detector, result);
    }

    pub fn get(&self, detector: DetectorId) -> Option<&DetectorResult> {
        self.results.get(&detector)
    }

    pub fn contains(&self, detector: DetectorId) -> bool {
        self.results.contains_key(&detector)
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DetectorResult> {
        self.results.values()
    }
}

impl FromIterator<DetectorResult> for DetectorResultSet {
    fn from_iter<I: IntoIterator<Item = DetectorResult>>(iter: I) -> Self {
        let mut set = Self::new();
        for result in iter {
            set.insert(result);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_score_substitutes_neutral() {
        let ok = DetectorResult::ok(
            DetectorId::Spoilage,
            Detection::new(DetectorSignal::class("fresh"), 0.9, 95.0),
        );
        assert_eq!(ok.effective_score(), 95.0);

        let fallback = DetectorResult::fallback(DetectorId::BurntFood, "timed out");
        assert_eq!(fallback.effective_score(), NEUTRAL_SCORE);
        assert_eq!(fallback.confidence, 0.0);

        let error = DetectorResult::error(
            DetectorId::OilQuality,
            &DetectorError::CapabilityUnavailable("model not loaded".into()),
        );
        assert_eq!(error.effective_score(), NEUTRAL_SCORE);
        assert_eq!(error.status, DetectorStatus::Error);
    }

    #[test]
    fn test_detection_clamps_ranges() {
        let detection = Detection::new(DetectorSignal::class("charred"), 1.4, 130.0);
        assert_eq!(detection.confidence, 1.0);
        assert_eq!(detection.raw_score, 100.0);
    }

    #[test]
    fn test_result_set_iterates_in_key_order() {
        let mut set = DetectorResultSet::new();
        set.insert(DetectorResult::fallback(DetectorId::Microplastics, "x"));
        set.insert(DetectorResult::fallback(DetectorId::OilQuality, "x"));
        set.insert(DetectorResult::fallback(DetectorId::Spoilage, "x"));

        let order: Vec<DetectorId> = set.iter().map(|r| r.detector).collect();
        let mut sorted = order.clone();
        sorted.sort();
        assert_eq!(order, sorted);
    }
}
