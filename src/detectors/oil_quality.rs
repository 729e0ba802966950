// src/detectors/oil_quality.rs
//
// Frying-oil quality from brown-tint coverage and gloss statistics.

use crate::config::DetectorId;
use crate::core::FoodImage;
use crate::detection::{Detection, DetectorSignal};

use super::{Detector, DetectorError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OilClass {
    FreshOil,
    UsedOil,
    DegradedOil,
    OxidizedOil,
}

impl OilClass {
    pub fn label(&self) -> &'static str {
        match self {
            Self::FreshOil => "fresh_oil",
            Self::UsedOil => "used_oil",
            Self::DegradedOil => "degraded_oil",
            Self::OxidizedOil => "oxidized_oil",
        }
    }

    pub fn score(&self) -> f32 {
        match self {
            Self::FreshOil => 92.0,
            Self::UsedOil => 65.0,
            Self::DegradedOil => 35.0,
            Self::OxidizedOil => 10.0,
        }
    }
}

/// Classifies oil degradation: reused oil darkens toward brown and loses
/// gloss highlights.
pub struct OilQualityDetector;

impl Detector for OilQualityDetector {
    fn id(&self) -> DetectorId {
        DetectorId::OilQuality
    }

    fn predict(&self, image: &FoodImage) -> Result<Detection, DetectorError> {
        if image.pixel_count() < 16 {
            return Err(DetectorError::UnsupportedImage(
                "image too small for oil analysis".into(),
            ));
        }

        let dark_brown = image.fraction_where(|r, g, b| {
            r > g && g >= b && r < 150 && b < 70 && r > 50
        });
        let highlights = image.fraction_where(|r, g, b| r > 230 && g > 230 && b > 210);

        // Dark-brown coverage rises and specular highlights vanish as oil
        // is reused.
        let degradation = (dark_brown * 1.4 - highlights * 0.8).clamp(0.0, 1.0);

        let class = if degradation > 0.45 {
            OilClass::OxidizedOil
        } else if degradation > 0.28 {
            OilClass::DegradedOil
        } else if degradation > 0.12 {
            OilClass::UsedOil
        } else {
            OilClass::FreshOil
        };

        let confidence = (0.5 + degradation * 0.7).clamp(0.0, 0.9);
        let mut detection =
            Detection::new(DetectorSignal::class(class.label()), confidence, class.score());
        if degradation > 0.12 {
            detection = detection.with_finding(format!(
                "oil degradation index {:.2} (brown {:.0}%, gloss {:.0}%)",
                degradation,
                dark_brown * 100.0,
                highlights * 100.0
            ));
        }
        Ok(detection)
    }
}
