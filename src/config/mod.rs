//! Engine configuration: detector identity, weights, criticality rules,
//! recommendation templates, and runtime tuning.
//!
//! Everything here is process-wide, loaded once, and read-only for the
//! life of the process. Violations are surfaced at startup as
//! [`ConfigError`], never at request time.

pub mod criticality;
pub mod engine;
pub mod templates;
pub mod weights;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use criticality::{AlertSeverity, AlertTrigger, CriticalityRule, CriticalityTable};
pub use engine::EngineConfig;
pub use templates::{
    HealthCondition, OverallRule, PersonalRule, RecommendationTemplates, TemplateRule,
};
pub use weights::WeightTable;

/// Identity of one detector category.
///
/// Ordering is stable and drives all map keying, so completion order of
/// the concurrent tasks never leaks into output order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum DetectorId {
    OilQuality,
    BurntFood,
    Spoilage,
    Nutritional,
    SaltSugar,
    Temperature,
    ChemicalAdditive,
    Microplastics,
}

impl DetectorId {
    pub fn all() -> [Self; 8] {
        [
            Self::OilQuality,
            Self::BurntFood,
            Self::Spoilage,
            Self::Nutritional,
            Self::SaltSugar,
            Self::Temperature,
            Self::ChemicalAdditive,
            Self::Microplastics,
        ]
    }

    /// Stable snake_case name used in config files and JSON output.
    pub fn name(&self) -> &'static str {
        match self {
            Self::OilQuality => "oil_quality",
            Self::BurntFood => "burnt_food",
            Self::Spoilage => "spoilage",
            Self::Nutritional => "nutritional",
            Self::SaltSugar => "salt_sugar",
            Self::Temperature => "temperature",
            Self::ChemicalAdditive => "chemical_additive",
            Self::Microplastics => "microplastics",
        }
    }

    /// Human-readable category title for report summaries.
    pub fn title(&self) -> &'static str {
        match self {
            Self::OilQuality => "Oil quality",
            Self::BurntFood => "Burnt food",
            Self::Spoilage => "Spoilage",
            Self::Nutritional => "Nutritional balance",
            Self::SaltSugar => "Salt & sugar",
            Self::Temperature => "Serving temperature",
            Self::ChemicalAdditive => "Chemical additives",
            Self::Microplastics => "Microplastics",
        }
    }
}

impl std::fmt::Display for DetectorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Fatal configuration problems, raised at startup/registration only.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("detector weights sum to {sum:.6}, expected 1.0 (tolerance 1e-6)")]
    WeightSum { sum: f64 },

    #[error("weight {weight} for {detector} is outside [0, 1]")]
    WeightRange { detector: DetectorId, weight: f64 },

    #[error("detector {0} registered more than once")]
    DuplicateDetector(DetectorId),

    #[error("no detectors registered")]
    EmptyRegistry,

    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),
}
