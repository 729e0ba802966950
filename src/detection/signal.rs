//! Per-detector output signals: discrete class labels or continuous profiles

use serde::{Deserialize, Serialize};

/// The signal a detector emits for one image.
///
/// Classification detectors emit a label from their fixed class set;
/// the two regression detectors (nutritional, salt/sugar) emit a
/// continuous profile instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DetectorSignal {
    Class { label: String },
    Profile(ContinuousProfile),
}

impl DetectorSignal {
    pub fn class(label: impl Into<String>) -> Self {
        Self::Class {
            label: label.into(),
        }
    }

    /// Class label, if this is a classification signal.
    pub fn label(&self) -> Option<&str> {
        match self {
            Self::Class { label } => Some(label),
            Self::Profile(_) => None,
        }
    }
}

/// Continuous per-100g estimates produced by the regression detectors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "profile", rename_all = "snake_case")]
pub enum ContinuousProfile {
    Nutrition {
        calories_per_100g: f32,
        protein_g: f32,
        fat_g: f32,
        carbs_g: f32,
    },
    SaltSugar {
        sodium_mg_per_100g: f32,
        sugar_g_per_100g: f32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_label() {
        let signal = DetectorSignal::class("spoiled");
        assert_eq!(signal.label(), Some("spoiled"));

        let profile = DetectorSignal::Profile(ContinuousProfile::SaltSugar {
            sodium_mg_per_100g: 450.0,
            sugar_g_per_100g: 12.0,
        });
        assert_eq!(profile.label(), None);
    }
}
