// src/core/report.rs
//
// Terminal report assembly: pure composition, no I/O.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::DetectorId;
use crate::detection::{DetectorResultSet, DetectorStatus};

use super::aggregator::OverallVerdict;
use super::alerts::SafetyAlert;
use super::recommend::Recommendation;

/// Human-readable digest of one detector's contribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectorSummary {
    pub title: String,
    pub status: DetectorStatus,
    /// Effective score that entered aggregation.
    pub score: u8,
    pub confidence: f32,
    pub headline: String,
    pub findings: Vec<String>,
}

/// The terminal, immutable analysis report handed to the caller, who
/// owns persistence and transport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub report_id: Uuid,
    pub verdict: OverallVerdict,
    pub per_detector: BTreeMap<DetectorId, DetectorSummary>,
    /// Severity-ordered safety alerts.
    pub alerts: Vec<SafetyAlert>,
    /// Ordered, capped recommendations.
    pub recommendations: Vec<Recommendation>,
    pub health_insights: Vec<String>,
    pub generated_at: DateTime<Utc>,
}

fn headline(status: DetectorStatus, label: Option<&str>, score: u8) -> String {
    match status {
        DetectorStatus::Ok => match label {
            Some(label) => format!("classified as {}", label.replace('_', " ")),
            None => format!("estimated health score {score}"),
        },
        DetectorStatus::Fallback => "unavailable, neutral score substituted".to_string(),
        DetectorStatus::Error => "failed, neutral score substituted".to_string(),
    }
}

/// Compose the final report with a caller-supplied timestamp and id.
///
/// Deterministic: the same frozen inputs always produce an identical
/// report, which makes pipeline idempotence directly testable.
pub fn assemble_at(
    results: &DetectorResultSet,
    verdict: OverallVerdict,
    alerts: Vec<SafetyAlert>,
    recommendations: Vec<Recommendation>,
    health_insights: Vec<String>,
    generated_at: DateTime<Utc>,
    report_id: Uuid,
) -> AnalysisReport {
    let per_detector = results
        .iter()
        .map(|result| {
            let score = result.effective_score().round() as u8;
            let summary = DetectorSummary {
                title: result.detector.title().to_string(),
                status: result.status,
                score,
                confidence: result.confidence,
                headline: headline(result.status, result.signal.label(), score),
                findings: result.findings.clone(),
            };
            (result.detector, summary)
        })
        .collect();

    AnalysisReport {
        report_id,
        verdict,
        per_detector,
        alerts,
        recommendations,
        health_insights,
        generated_at,
    }
}

/// Compose the final report stamped with the current time and a fresh id.
pub fn assemble(
    results: &DetectorResultSet,
    verdict: OverallVerdict,
    alerts: Vec<SafetyAlert>,
    recommendations: Vec<Recommendation>,
    health_insights: Vec<String>,
) -> AnalysisReport {
    assemble_at(
        results,
        verdict,
        alerts,
        recommendations,
        health_insights,
        Utc::now(),
        Uuid::new_v4(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WeightTable;
    use crate::core::aggregator::compute_overall_score;
    use crate::detection::{Detection, DetectorResult, DetectorSignal};

    #[test]
    fn test_summary_marks_fallback_slots() {
        let mut results = DetectorResultSet::new();
        results.insert(DetectorResult::ok(
            DetectorId::Spoilage,
            Detection::new(DetectorSignal::class("fresh"), 0.9, 95.0),
        ));
        results.insert(DetectorResult::fallback(DetectorId::BurntFood, "timed out"));

        let verdict = compute_overall_score(&results, &WeightTable::builtin());
        let report = assemble(&results, verdict, vec![], vec![], vec![]);

        let burnt = &report.per_detector[&DetectorId::BurntFood];
        assert_eq!(burnt.status, DetectorStatus::Fallback);
        assert_eq!(burnt.score, 50);

        let spoilage = &report.per_detector[&DetectorId::Spoilage];
        assert_eq!(spoilage.status, DetectorStatus::Ok);
        assert_eq!(spoilage.score, 95);
        assert!(spoilage.headline.contains("fresh"));
    }
}
