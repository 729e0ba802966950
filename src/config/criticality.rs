//! Criticality table: externally supplied data mapping detector outcomes
//! to alert severity, decoupled from the aggregation arithmetic.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{ConfigError, DetectorId};

/// Alert severities, ordered so `Critical` compares greatest.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum AlertSeverity {
    Medium,
    High,
    Critical,
}

impl AlertSeverity {
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Critical => "✗",
            Self::High => "⚠",
            Self::Medium => "⚠",
        }
    }
}

impl std::fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Medium => "medium",
        };
        f.write_str(name)
    }
}

/// Condition under which a rule fires for a detector result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AlertTrigger {
    /// Fires when a classification detector emits this class label.
    Label { label: String },
    /// Fires when a regression detector's derived score drops below the
    /// threshold.
    ScoreBelow { threshold: f32 },
}

/// One entry of the criticality table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriticalityRule {
    pub detector: DetectorId,
    pub trigger: AlertTrigger,
    pub severity: AlertSeverity,
    pub message: String,
    pub action: String,
}

/// The full rule table. Adding a detector or changing severities is a
/// data change here, not a code change in the alert engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CriticalityTable {
    rules: Vec<CriticalityRule>,
}

impl CriticalityTable {
    pub fn new(rules: Vec<CriticalityRule>) -> Self {
        Self { rules }
    }

    /// Load a rule table from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn rules_for(&self, detector: DetectorId) -> impl Iterator<Item = &CriticalityRule> {
        self.rules.iter().filter(move |r| r.detector == detector)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Built-in default table covering the stock detector taxonomies.
    pub fn builtin() -> Self {
        fn label_rule(
            detector: DetectorId,
            label: &str,
            severity: AlertSeverity,
            message: &str,
            action: &str,
        ) -> CriticalityRule {
            CriticalityRule {
                detector,
                trigger: AlertTrigger::Label {
                    label: label.to_string(),
                },
                severity,
                message: message.to_string(),
                action: action.to_string(),
            }
        }

        fn score_rule(
            detector: DetectorId,
            threshold: f32,
            severity: AlertSeverity,
            message: &str,
            action: &str,
        ) -> CriticalityRule {
            CriticalityRule {
                detector,
                trigger: AlertTrigger::ScoreBelow { threshold },
                severity,
                message: message.to_string(),
                action: action.to_string(),
            }
        }

        Self::new(vec![
            label_rule(
                DetectorId::Spoilage,
                "dangerous_food",
                AlertSeverity::Critical,
                "Advanced spoilage detected; the food is unsafe to eat",
                "Discard immediately, do not taste-test",
            ),
            label_rule(
                DetectorId::Spoilage,
                "spoiled",
                AlertSeverity::High,
                "Visible spoilage indicators detected",
                "Discard the item or inspect it very carefully",
            ),
            label_rule(
                DetectorId::BurntFood,
                "severely_burnt",
                AlertSeverity::Critical,
                "Severe charring detected; likely acrylamide/PAH formation",
                "Do not eat the charred portions",
            ),
            label_rule(
                DetectorId::BurntFood,
                "charred",
                AlertSeverity::High,
                "Significant charring detected",
                "Trim burnt areas before eating",
            ),
            label_rule(
                DetectorId::OilQuality,
                "oxidized_oil",
                AlertSeverity::High,
                "Oil appears heavily oxidized or repeatedly reused",
                "Avoid; reused frying oil accumulates harmful compounds",
            ),
            label_rule(
                DetectorId::Temperature,
                "danger_zone",
                AlertSeverity::High,
                "Food appears held in the bacterial danger zone",
                "Reheat above 60°C or chill below 5°C before serving",
            ),
            label_rule(
                DetectorId::ChemicalAdditive,
                "synthetic_dye",
                AlertSeverity::High,
                "Colour pattern consistent with synthetic dye additives",
                "Check the ingredient list for azo colourants",
            ),
            label_rule(
                DetectorId::Microplastics,
                "detected",
                AlertSeverity::High,
                "Particles consistent with microplastic contamination",
                "Avoid consumption and check the packaging/source",
            ),
            score_rule(
                DetectorId::SaltSugar,
                30.0,
                AlertSeverity::Medium,
                "Estimated salt/sugar load is far above dietary guidelines",
                "Balance with low-sodium, low-sugar foods today",
            ),
            score_rule(
                DetectorId::Nutritional,
                25.0,
                AlertSeverity::Medium,
                "Nutritional balance is heavily skewed",
                "Pair with vegetables or protein to balance the meal",
            ),
        ])
    }
}
