//! Detector weight table with startup-time validation

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{ConfigError, DetectorId};

/// Tolerance on the weight-sum invariant.
const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Per-detector aggregation weights.
///
/// Invariant: every weight is in [0, 1] and the sum is 1 within 1e-6,
/// checked once by [`WeightTable::validated`] at startup. The default
/// weights are tunable configuration, not calibrated ground truth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeightTable {
    weights: BTreeMap<DetectorId, f64>,
}

impl WeightTable {
    /// Build a validated table, rejecting out-of-range or non-normalized
    /// weights.
    pub fn validated(weights: BTreeMap<DetectorId, f64>) -> Result<Self, ConfigError> {
        if weights.is_empty() {
            return Err(ConfigError::EmptyRegistry);
        }
        for (&detector, &weight) in &weights {
            if !(0.0..=1.0).contains(&weight) || !weight.is_finite() {
                return Err(ConfigError::WeightRange { detector, weight });
            }
        }
        let sum: f64 = weights.values().sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ConfigError::WeightSum { sum });
        }
        Ok(Self { weights })
    }

    /// Default weights across all eight detectors.
    pub fn builtin() -> Self {
        let weights = BTreeMap::from([
            (DetectorId::Spoilage, 0.25),
            (DetectorId::BurntFood, 0.20),
            (DetectorId::OilQuality, 0.15),
            (DetectorId::Nutritional, 0.10),
            (DetectorId::SaltSugar, 0.10),
            (DetectorId::Temperature, 0.10),
            (DetectorId::ChemicalAdditive, 0.05),
            (DetectorId::Microplastics, 0.05),
        ]);
        Self::validated(weights).expect("builtin weights are normalized")
    }

    /// Load and validate a weight table from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        let weights: BTreeMap<DetectorId, f64> = serde_json::from_str(&raw)?;
        Self::validated(weights)
    }

    pub fn weight(&self, detector: DetectorId) -> f64 {
        self.weights.get(&detector).copied().unwrap_or(0.0)
    }

    pub fn detectors(&self) -> impl Iterator<Item = DetectorId> + '_ {
        self.weights.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (DetectorId, f64)> + '_ {
        self.weights.iter().map(|(&d, &w)| (d, w))
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

impl Default for WeightTable {
    fn default() -> Self {
        Self::builtin()
    }
}
