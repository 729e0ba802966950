// src/core/alerts.rs
//
// Alert scanning against the criticality table. Deliberately uncoupled
// from the aggregation math: a critical classification raises an alert
// no matter how the blended verdict bands.

use serde::{Deserialize, Serialize};

use crate::config::{AlertSeverity, AlertTrigger, CriticalityTable, DetectorId};
use crate::detection::{DetectorResult, DetectorResultSet, DetectorStatus};

/// A ranked safety alert tied to one detector's outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetyAlert {
    pub severity: AlertSeverity,
    pub message: String,
    pub action: String,
    pub source: DetectorId,
}

fn rule_matches(trigger: &AlertTrigger, result: &DetectorResult) -> bool {
    match trigger {
        AlertTrigger::Label { label } => result.signal.label() == Some(label.as_str()),
        AlertTrigger::ScoreBelow { threshold } => result.raw_score < *threshold,
    }
}

/// Scan a frozen result set and emit severity-ordered alerts.
///
/// At most one alert per detector (the highest-severity matching rule
/// wins); fallback and error slots never alert since they carry no
/// genuine signal. Pure and side-effect-free.
pub fn scan(results: &DetectorResultSet, table: &CriticalityTable) -> Vec<SafetyAlert> {
    let mut alerts: Vec<SafetyAlert> = Vec::new();

    for result in results.iter() {
        if result.status != DetectorStatus::Ok {
            continue;
        }
        let best = table
            .rules_for(result.detector)
            .filter(|rule| rule_matches(&rule.trigger, result))
            .max_by_key(|rule| rule.severity);
        if let Some(rule) = best {
            alerts.push(SafetyAlert {
                severity: rule.severity,
                message: rule.message.clone(),
                action: rule.action.clone(),
                source: result.detector,
            });
        }
    }

    // Critical > high > medium; ties break on detector order for
    // deterministic output.
    alerts.sort_by(|a, b| b.severity.cmp(&a.severity).then(a.source.cmp(&b.source)));
    alerts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::{Detection, DetectorSignal};

    fn class_result(id: DetectorId, label: &str, score: f32) -> DetectorResult {
        DetectorResult::ok(id, Detection::new(DetectorSignal::class(label), 0.9, score))
    }

    #[test]
    fn test_critical_label_alerts() {
        let mut results = DetectorResultSet::new();
        results.insert(class_result(DetectorId::Spoilage, "dangerous_food", 0.0));

        let alerts = scan(&results, &CriticalityTable::builtin());
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].severity, AlertSeverity::Critical);
        assert_eq!(alerts[0].source, DetectorId::Spoilage);
    }

    #[test]
    fn test_one_alert_per_detector() {
        // "dangerous_food" only matches its own rule, so craft a table
        // where two rules match the same result.
        let table = CriticalityTable::new(vec![
            crate::config::CriticalityRule {
                detector: DetectorId::Spoilage,
                trigger: AlertTrigger::Label {
                    label: "spoiled".into(),
                },
                severity: AlertSeverity::High,
                message: "label rule".into(),
                action: "discard".into(),
            },
            crate::config::CriticalityRule {
                detector: DetectorId::Spoilage,
                trigger: AlertTrigger::ScoreBelow { threshold: 50.0 },
                severity: AlertSeverity::Medium,
                message: "score rule".into(),
                action: "discard".into(),
            },
        ]);
        let mut results = DetectorResultSet::new();
        results.insert(class_result(DetectorId::Spoilage, "spoiled", 25.0));

        let alerts = scan(&results, &table);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].severity, AlertSeverity::High);
    }

    #[test]
    fn test_fallback_slots_never_alert() {
        let mut results = DetectorResultSet::new();
        results.insert(DetectorResult::fallback(DetectorId::Spoilage, "timed out"));

        let alerts = scan(&results, &CriticalityTable::builtin());
        assert!(alerts.is_empty());
    }

    #[test]
    fn test_alerts_sorted_by_severity() {
        let mut results = DetectorResultSet::new();
        results.insert(class_result(DetectorId::Temperature, "danger_zone", 30.0));
        results.insert(class_result(DetectorId::Spoilage, "dangerous_food", 0.0));
        results.insert(class_result(DetectorId::SaltSugar, "ignored", 10.0));

        let alerts = scan(&results, &CriticalityTable::builtin());
        assert!(alerts.len() >= 3);
        for pair in alerts.windows(2) {
            assert!(pair[0].severity >= pair[1].severity);
        }
        assert_eq!(alerts[0].source, DetectorId::Spoilage);
    }
}
