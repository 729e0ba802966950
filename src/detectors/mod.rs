//! Detector capability contract, the eight stock variants, and the
//! registration boundary.
//!
//! Detectors are opaque, pluggable capabilities: any vision technique
//! (classical or learned) satisfying [`Detector`] is valid. The stock
//! variants use whole-image colour statistics as lightweight stand-ins
//! for the heavy per-category pixel analysis, which is a separate
//! concern from this engine.

pub mod burnt_food;
pub mod chemical_additive;
pub mod microplastics;
pub mod nutritional;
pub mod oil_quality;
pub mod salt_sugar;
pub mod spoilage;
pub mod temperature;

use std::collections::BTreeMap;
use std::sync::Arc;

use thiserror::Error;

use crate::config::{ConfigError, DetectorId, WeightTable};
use crate::core::FoodImage;
use crate::detection::Detection;

pub use burnt_food::BurntFoodDetector;
pub use chemical_additive::ChemicalAdditiveDetector;
pub use microplastics::MicroplasticsDetector;
pub use nutritional::NutritionalDetector;
pub use oil_quality::OilQualityDetector;
pub use salt_sugar::SaltSugarDetector;
pub use spoilage::SpoilageDetector;
pub use temperature::TemperatureDetector;

/// Failure of one detector invocation, isolated per task.
///
/// This is the contract's non-escaping failure surface: a detector
/// returns `Err`, never lets a fault escape uncaught, and the
/// orchestrator records the slot without needing detector internals.
#[derive(Debug, Error)]
pub enum DetectorError {
    #[error("image unsupported by detector: {0}")]
    UnsupportedImage(String),

    #[error("detector capability unavailable: {0}")]
    CapabilityUnavailable(String),

    #[error("detector internal failure: {0}")]
    Internal(String),
}

/// One analysis capability: a single category's risk/quality signal for
/// one image.
///
/// `predict` runs on a blocking worker and may be compute-heavy; it must
/// not mutate the shared image or observe other detectors.
pub trait Detector: Send + Sync {
    fn id(&self) -> DetectorId;

    fn predict(&self, image: &FoodImage) -> Result<Detection, DetectorError>;
}

struct Registered {
    detector: Arc<dyn Detector>,
    weight: f64,
}

/// Registration boundary for detectors and their aggregation weights.
///
/// The weight-sum invariant is enforced once by [`DetectorRegistry::weights`]
/// at startup, never at request time.
pub struct DetectorRegistry {
    entries: Vec<Registered>,
}

impl DetectorRegistry {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// All eight stock detectors with the built-in weight table.
    pub fn with_defaults() -> Self {
        Self::with_weights(&WeightTable::builtin())
    }

    /// All eight stock detectors weighted by the given table.
    pub fn with_weights(weights: &WeightTable) -> Self {
        let mut registry = Self::new();
        let stock: [Arc<dyn Detector>; 8] = [
            Arc::new(OilQualityDetector),
            Arc::new(BurntFoodDetector),
            Arc::new(SpoilageDetector),
            Arc::new(NutritionalDetector),
            Arc::new(SaltSugarDetector),
            Arc::new(TemperatureDetector),
            Arc::new(ChemicalAdditiveDetector),
            Arc::new(MicroplasticsDetector),
        ];
        for detector in stock {
            let weight = weights.weight(detector.id());
            registry
                .register(detector, weight)
                .expect("stock detectors are distinct");
        }
        registry
    }

    /// Register a detector with its aggregation weight. Registering the
    /// same detector id twice is a configuration error.
    pub fn register(
        &mut self,
        detector: Arc<dyn Detector>,
        weight: f64,
    ) -> Result<(), ConfigError> {
        let id = detector.id();
        if self.entries.iter().any(|e| e.detector.id() == id) {
            return Err(ConfigError::DuplicateDetector(id));
        }
        self.entries.push(Registered { detector, weight });
        Ok(())
    }

    /// Validate the weight table across all registered detectors.
    pub fn weights(&self) -> Result<WeightTable, ConfigError> {
        let map: BTreeMap<DetectorId, f64> = self
            .entries
            .iter()
            .map(|e| (e.detector.id(), e.weight))
            .collect();
        WeightTable::validated(map)
    }

    pub fn ids(&self) -> Vec<DetectorId> {
        self.entries.iter().map(|e| e.detector.id()).collect()
    }

    pub fn detectors(&self) -> impl Iterator<Item = &Arc<dyn Detector>> {
        self.entries.iter().map(|e| &e.detector)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for DetectorRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
