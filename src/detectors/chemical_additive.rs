// src/detectors/chemical_additive.rs
//
// Synthetic colourant detection from over-saturated hue coverage.

use crate::config::DetectorId;
use crate::core::FoodImage;
use crate::detection::{Detection, DetectorSignal};

use super::{Detector, DetectorError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdditiveClass {
    NoneDetected,
    SuspectedColorant,
    SyntheticDye,
}

impl AdditiveClass {
    pub fn label(&self) -> &'static str {
        match self {
            Self::NoneDetected => "none_detected",
            Self::SuspectedColorant => "suspected_colorant",
            Self::SyntheticDye => "synthetic_dye",
        }
    }

    pub fn score(&self) -> f32 {
        match self {
            Self::NoneDetected => 95.0,
            Self::SuspectedColorant => 55.0,
            Self::SyntheticDye => 18.0,
        }
    }
}

/// Flags colour saturation levels natural foods rarely reach.
pub struct ChemicalAdditiveDetector;

impl Detector for ChemicalAdditiveDetector {
    fn id(&self) -> DetectorId {
        DetectorId::ChemicalAdditive
    }

    fn predict(&self, image: &FoodImage) -> Result<Detection, DetectorError> {
        if image.pixel_count() < 16 {
            return Err(DetectorError::UnsupportedImage(
                "image too small for additive analysis".into(),
            ));
        }

        let vivid = image.fraction_where(|r, g, b| {
            let max = r.max(g).max(b);
            let min = r.min(g).min(b);
            max - min > 130 && max > 160
        });

        let class = if vivid > 0.35 {
            AdditiveClass::SyntheticDye
        } else if vivid > 0.15 {
            AdditiveClass::SuspectedColorant
        } else {
            AdditiveClass::NoneDetected
        };

        let confidence = (0.5 + vivid).clamp(0.0, 0.9);
        let mut detection =
            Detection::new(DetectorSignal::class(class.label()), confidence, class.score());
        if vivid > 0.15 {
            detection = detection.with_finding(format!(
                "hypersaturated colour on {:.0}% of surface",
                vivid * 100.0
            ));
        }
        Ok(detection)
    }
}
