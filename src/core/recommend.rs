// src/core/recommend.rs
//
// Recommendation synthesis: generic template guidance plus an optional
// personalization layer keyed by the user's health profile.

use serde::{Deserialize, Serialize};

use crate::config::{
    AlertTrigger, DetectorId, HealthCondition, RecommendationTemplates,
};
use crate::detection::{ContinuousProfile, DetectorResultSet, DetectorSignal, DetectorStatus};

use super::aggregator::OverallVerdict;

/// Optional user health context for personalization. A missing or
/// partial profile degrades the output to generic guidance only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthProfile {
    pub conditions: Vec<HealthCondition>,
}

impl HealthProfile {
    pub fn new(conditions: Vec<HealthCondition>) -> Self {
        Self { conditions }
    }

    pub fn has(&self, condition: HealthCondition) -> bool {
        self.conditions.contains(&condition)
    }
}

/// One ordered recommendation in the final report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub text: String,
    /// Higher sorts earlier.
    pub priority: u8,
    pub source: Option<DetectorId>,
    pub personalized: bool,
}

fn trigger_matches(trigger: &AlertTrigger, results: &DetectorResultSet, id: DetectorId) -> bool {
    let Some(result) = results.get(id) else {
        return false;
    };
    if result.status != DetectorStatus::Ok {
        return false;
    }
    match trigger {
        AlertTrigger::Label { label } => result.signal.label() == Some(label.as_str()),
        AlertTrigger::ScoreBelow { threshold } => result.raw_score < *threshold,
    }
}

/// Synthesize ordered, capped recommendations and health insights.
///
/// Ordering: personalized items first, then by descending priority,
/// then by text for a deterministic tie-break. The cap bounds report
/// size; insights are empty without a profile.
pub fn recommend(
    results: &DetectorResultSet,
    verdict: &OverallVerdict,
    profile: Option<&HealthProfile>,
    templates: &RecommendationTemplates,
    max: usize,
) -> (Vec<Recommendation>, Vec<String>) {
    let mut recommendations = Vec::new();

    for rule in &templates.generic {
        if trigger_matches(&rule.trigger, results, rule.detector) {
            recommendations.push(Recommendation {
                text: rule.text.clone(),
                priority: rule.priority,
                source: Some(rule.detector),
                personalized: false,
            });
        }
    }

    for rule in &templates.overall {
        if verdict.score < rule.score_below {
            recommendations.push(Recommendation {
                text: rule.text.clone(),
                priority: rule.priority,
                source: None,
                personalized: false,
            });
        }
    }

    if let Some(profile) = profile {
        for rule in &templates.personal {
            if profile.has(rule.condition)
                && trigger_matches(&rule.trigger, results, rule.detector)
            {
                recommendations.push(Recommendation {
                    text: rule.text.clone(),
                    priority: rule.priority,
                    source: Some(rule.detector),
                    personalized: true,
                });
            }
        }
    }

    recommendations.sort_by(|a, b| {
        b.personalized
            .cmp(&a.personalized)
            .then(b.priority.cmp(&a.priority))
            .then(a.text.cmp(&b.text))
    });
    recommendations.truncate(max);

    let insights = profile
        .map(|p| health_insights(results, p))
        .unwrap_or_default();

    (recommendations, insights)
}

/// Narrative insights crossing the regression profiles with the user's
/// conditions.
fn health_insights(results: &DetectorResultSet, profile: &HealthProfile) -> Vec<String> {
    let mut insights = Vec::new();

    let salt_sugar = results.get(DetectorId::SaltSugar).and_then(|r| {
        match (&r.signal, r.status) {
            (DetectorSignal::Profile(ContinuousProfile::SaltSugar {
                sodium_mg_per_100g,
                sugar_g_per_100g,
            }), DetectorStatus::Ok) => Some((*sodium_mg_per_100g, *sugar_g_per_100g)),
            _ => None,
        }
    });
    let nutrition = results.get(DetectorId::Nutritional).and_then(|r| {
        match (&r.signal, r.status) {
            (DetectorSignal::Profile(ContinuousProfile::Nutrition { fat_g, carbs_g, .. }),
                DetectorStatus::Ok) => Some((*fat_g, *carbs_g)),
            _ => None,
        }
    });

    for &condition in &profile.conditions {
        match condition {
            HealthCondition::Hypertension | HealthCondition::KidneyDisease => {
                if let Some((sodium, _)) = salt_sugar {
                    insights.push(format!(
                        "For {}: estimated sodium is {sodium:.0} mg/100g (guideline for a low-sodium diet: 600 mg)",
                        condition.label()
                    ));
                }
            }
            HealthCondition::Diabetes => {
                if let Some((_, sugar)) = salt_sugar {
                    insights.push(format!(
                        "For diabetes: estimated sugar is {sugar:.1} g/100g; count it against your carb budget"
                    ));
                }
                if let Some((_, carbs)) = nutrition {
                    insights.push(format!(
                        "For diabetes: estimated carbohydrate load is {carbs:.0} g/100g"
                    ));
                }
            }
            HealthCondition::HighCholesterol => {
                if let Some((fat, _)) = nutrition {
                    insights.push(format!(
                        "For high cholesterol: estimated fat content is {fat:.0} g/100g"
                    ));
                }
            }
            HealthCondition::Pregnancy => {
                insights.push(
                    "During pregnancy, prefer freshly prepared, thoroughly heated food".to_string(),
                );
            }
        }
    }

    insights
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WeightTable;
    use crate::core::aggregator::compute_overall_score;
    use crate::detection::{Detection, DetectorResult};

    fn results_with_spoiled() -> DetectorResultSet {
        let mut set = DetectorResultSet::new();
        set.insert(DetectorResult::ok(
            DetectorId::Spoilage,
            Detection::new(DetectorSignal::class("spoiled"), 0.9, 25.0),
        ));
        set
    }

    fn verdict_for(set: &DetectorResultSet) -> OverallVerdict {
        compute_overall_score(set, &WeightTable::builtin())
    }

    #[test]
    fn test_generic_only_without_profile() {
        let results = results_with_spoiled();
        let verdict = verdict_for(&results);
        let (recs, insights) = recommend(
            &results,
            &verdict,
            None,
            &RecommendationTemplates::builtin(),
            8,
        );
        assert!(recs.iter().any(|r| r.source == Some(DetectorId::Spoilage)));
        assert!(recs.iter().all(|r| !r.personalized));
        assert!(insights.is_empty());
    }

    #[test]
    fn test_personalized_items_sort_first() {
        let mut results = DetectorResultSet::new();
        results.insert(DetectorResult::ok(
            DetectorId::SaltSugar,
            Detection::new(
                DetectorSignal::Profile(ContinuousProfile::SaltSugar {
                    sodium_mg_per_100g: 1800.0,
                    sugar_g_per_100g: 8.0,
                }),
                0.6,
                35.0,
            ),
        ));
        let verdict = verdict_for(&results);
        let profile = HealthProfile::new(vec![HealthCondition::Hypertension]);
        let (recs, insights) = recommend(
            &results,
            &verdict,
            Some(&profile),
            &RecommendationTemplates::builtin(),
            8,
        );
        assert!(!recs.is_empty());
        assert!(recs[0].personalized);
        assert!(insights.iter().any(|i| i.contains("sodium")));
    }

    #[test]
    fn test_cap_bounds_output() {
        let results = results_with_spoiled();
        let verdict = verdict_for(&results);
        let (recs, _) = recommend(
            &results,
            &verdict,
            None,
            &RecommendationTemplates::builtin(),
            1,
        );
        assert_eq!(recs.len(), 1);
    }
}
