// tests/test_utils/mod.rs
//
// Shared helpers: scripted detectors and synthetic images.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use platescan::config::{DetectorId, WeightTable};
use platescan::core::FoodImage;
use platescan::detection::{Detection, DetectorSignal};
use platescan::detectors::{Detector, DetectorError, DetectorRegistry};

#[derive(Clone, Copy)]
pub enum Behavior {
    Succeed,
    Fail,
    Panic,
}

/// Detector with a scripted outcome, for exercising the orchestrator
/// without real image heuristics.
pub struct ScriptedDetector {
    pub id: DetectorId,
    pub label: &'static str,
    pub score: f32,
    pub delay: Option<Duration>,
    pub behavior: Behavior,
}

impl ScriptedDetector {
    pub fn ok(id: DetectorId, label: &'static str, score: f32) -> Arc<dyn Detector> {
        Arc::new(Self {
            id,
            label,
            score,
            delay: None,
            behavior: Behavior::Succeed,
        })
    }

    pub fn slow(id: DetectorId, delay: Duration) -> Arc<dyn Detector> {
        Arc::new(Self {
            id,
            label: "slow",
            score: 90.0,
            delay: Some(delay),
            behavior: Behavior::Succeed,
        })
    }

    pub fn failing(id: DetectorId) -> Arc<dyn Detector> {
        Arc::new(Self {
            id,
            label: "failing",
            score: 0.0,
            delay: None,
            behavior: Behavior::Fail,
        })
    }

    pub fn panicking(id: DetectorId) -> Arc<dyn Detector> {
        Arc::new(Self {
            id,
            label: "panicking",
            score: 0.0,
            delay: None,
            behavior: Behavior::Panic,
        })
    }
}

impl Detector for ScriptedDetector {
    fn id(&self) -> DetectorId {
        self.id
    }

    fn predict(&self, _image: &FoodImage) -> Result<Detection, DetectorError> {
        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }
        match self.behavior {
            Behavior::Succeed => Ok(Detection::new(
                DetectorSignal::class(self.label),
                0.9,
                self.score,
            )),
            Behavior::Fail => Err(DetectorError::CapabilityUnavailable(
                "scripted failure".into(),
            )),
            Behavior::Panic => panic!("scripted panic"),
        }
    }
}

/// Registry covering all eight detector slots with builtin weights.
/// `overrides` replaces the scripted default for specific detectors.
pub fn full_registry(overrides: Vec<Arc<dyn Detector>>) -> DetectorRegistry {
    let weights = WeightTable::builtin();
    let mut registry = DetectorRegistry::new();
    for id in DetectorId::all() {
        let detector = overrides
            .iter()
            .find(|d| d.id() == id)
            .cloned()
            .unwrap_or_else(|| ScriptedDetector::ok(id, "nominal", 90.0));
        registry.register(detector, weights.weight(id)).unwrap();
    }
    registry
}

/// Small uniform RGB image, valid for every detector.
pub fn sample_image() -> FoodImage {
    FoodImage::from_rgb8(8, 8, [180u8, 140, 90].repeat(64)).unwrap()
}
