//! Recommendation templates and personalization rules, supplied as data

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::criticality::AlertTrigger;
use super::{ConfigError, DetectorId};

/// Health conditions the personalization layer understands.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum HealthCondition {
    Hypertension,
    Diabetes,
    HighCholesterol,
    KidneyDisease,
    Pregnancy,
}

impl HealthCondition {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Hypertension => "hypertension",
            Self::Diabetes => "diabetes",
            Self::HighCholesterol => "high cholesterol",
            Self::KidneyDisease => "kidney disease",
            Self::Pregnancy => "pregnancy",
        }
    }
}

/// Generic recommendation keyed by a detector outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateRule {
    pub detector: DetectorId,
    pub trigger: AlertTrigger,
    pub text: String,
    /// Higher sorts earlier in the final list.
    pub priority: u8,
}

/// Personalized recommendation: fires only when the user's profile
/// carries the condition and the named detector outcome matches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalRule {
    pub condition: HealthCondition,
    pub detector: DetectorId,
    pub trigger: AlertTrigger,
    pub text: String,
    pub priority: u8,
}

/// Overall-verdict advice keyed by the blended score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverallRule {
    /// Fires when the overall score is strictly below this value.
    pub score_below: u8,
    pub text: String,
    pub priority: u8,
}

/// The full recommendation template set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecommendationTemplates {
    pub generic: Vec<TemplateRule>,
    pub personal: Vec<PersonalRule>,
    pub overall: Vec<OverallRule>,
}

impl RecommendationTemplates {
    /// Load templates from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Built-in templates covering the stock detector taxonomies.
    pub fn builtin() -> Self {
        fn generic(
            detector: DetectorId,
            trigger: AlertTrigger,
            text: &str,
            priority: u8,
        ) -> TemplateRule {
            TemplateRule {
                detector,
                trigger,
                text: text.to_string(),
                priority,
            }
        }

        fn personal(
            condition: HealthCondition,
            detector: DetectorId,
            trigger: AlertTrigger,
            text: &str,
            priority: u8,
        ) -> PersonalRule {
            PersonalRule {
                condition,
                detector,
                trigger,
                text: text.to_string(),
                priority,
            }
        }

        let label = |l: &str| AlertTrigger::Label {
            label: l.to_string(),
        };
        let below = |t: f32| AlertTrigger::ScoreBelow { threshold: t };

        Self {
            generic: vec![
                generic(
                    DetectorId::Spoilage,
                    label("spoiled"),
                    "Discard this item; visible spoilage is rarely limited to the surface",
                    90,
                ),
                generic(
                    DetectorId::Spoilage,
                    label("dangerous_food"),
                    "Do not consume under any circumstances; dispose of it sealed",
                    100,
                ),
                generic(
                    DetectorId::Spoilage,
                    label("aging"),
                    "Consume soon; the item is past its freshest state",
                    40,
                ),
                generic(
                    DetectorId::BurntFood,
                    label("charred"),
                    "Scrape or trim charred areas before eating",
                    60,
                ),
                generic(
                    DetectorId::BurntFood,
                    label("severely_burnt"),
                    "Avoid the burnt portions entirely; heavy charring carries acrylamide",
                    85,
                ),
                generic(
                    DetectorId::OilQuality,
                    label("degraded_oil"),
                    "Prefer dishes cooked in fresh oil; this oil shows reuse markers",
                    50,
                ),
                generic(
                    DetectorId::OilQuality,
                    label("oxidized_oil"),
                    "Skip fried items from this batch; the oil appears oxidized",
                    75,
                ),
                generic(
                    DetectorId::Temperature,
                    label("danger_zone"),
                    "Reheat thoroughly before eating; lukewarm holding breeds bacteria",
                    70,
                ),
                generic(
                    DetectorId::ChemicalAdditive,
                    label("suspected_colorant"),
                    "Check the label for artificial colourants if packaging is available",
                    35,
                ),
                generic(
                    DetectorId::ChemicalAdditive,
                    label("synthetic_dye"),
                    "Prefer an undyed alternative; synthetic dye signature detected",
                    65,
                ),
                generic(
                    DetectorId::Microplastics,
                    label("trace_suspected"),
                    "Rinse the item and avoid plastic-packaged versions where possible",
                    30,
                ),
                generic(
                    DetectorId::Microplastics,
                    label("detected"),
                    "Avoid this item; particle pattern suggests plastic contamination",
                    80,
                ),
                generic(
                    DetectorId::SaltSugar,
                    below(40.0),
                    "Balance today's remaining meals with low-salt, low-sugar options",
                    45,
                ),
                generic(
                    DetectorId::Nutritional,
                    below(40.0),
                    "Add a vegetable or lean-protein side to balance this meal",
                    40,
                ),
            ],
            personal: vec![
                personal(
                    HealthCondition::Hypertension,
                    DetectorId::SaltSugar,
                    below(60.0),
                    "With hypertension, keep sodium under 1500 mg today; this item is salt-heavy",
                    95,
                ),
                personal(
                    HealthCondition::Diabetes,
                    DetectorId::SaltSugar,
                    below(60.0),
                    "With diabetes, account for this item's sugar load in your carb budget",
                    95,
                ),
                personal(
                    HealthCondition::Diabetes,
                    DetectorId::Nutritional,
                    below(50.0),
                    "Carb-dominant profile detected; pair with protein to soften the glucose spike",
                    80,
                ),
                personal(
                    HealthCondition::HighCholesterol,
                    DetectorId::OilQuality,
                    label("degraded_oil"),
                    "Reused oil is high in trans fats; with high cholesterol, choose a non-fried option",
                    90,
                ),
                personal(
                    HealthCondition::HighCholesterol,
                    DetectorId::OilQuality,
                    label("oxidized_oil"),
                    "Oxidized oil is especially risky with high cholesterol; avoid this item",
                    95,
                ),
                personal(
                    HealthCondition::KidneyDisease,
                    DetectorId::SaltSugar,
                    below(70.0),
                    "With kidney disease, this sodium estimate warrants skipping the item",
                    95,
                ),
                personal(
                    HealthCondition::Pregnancy,
                    DetectorId::Spoilage,
                    label("aging"),
                    "During pregnancy, avoid borderline-fresh items; listeria risk rises sharply",
                    90,
                ),
                personal(
                    HealthCondition::Pregnancy,
                    DetectorId::Temperature,
                    label("danger_zone"),
                    "During pregnancy, only eat this after reheating it steaming hot",
                    90,
                ),
            ],
            overall: vec![
                OverallRule {
                    score_below: 40,
                    text: "Overall safety is poor; strongly consider a different meal".to_string(),
                    priority: 85,
                },
                OverallRule {
                    score_below: 60,
                    text: "Several quality concerns found; eat in moderation".to_string(),
                    priority: 55,
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_templates_cover_every_condition() {
        let templates = RecommendationTemplates::builtin();
        for condition in [
            HealthCondition::Hypertension,
            HealthCondition::Diabetes,
            HealthCondition::HighCholesterol,
            HealthCondition::KidneyDisease,
            HealthCondition::Pregnancy,
        ] {
            assert!(
                templates.personal.iter().any(|r| r.condition == condition),
                "no personal rule for {condition:?}"
            );
        }
    }

    #[test]
    fn test_json_round_trip() {
        let templates = RecommendationTemplates::builtin();
        let json = serde_json::to_string(&templates).unwrap();
        let parsed: RecommendationTemplates = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, templates);
    }
}
