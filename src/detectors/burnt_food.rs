// src/detectors/burnt_food.rs
//
// Charring detection from dark-pixel coverage.

use crate::config::DetectorId;
use crate::core::FoodImage;
use crate::detection::{Detection, DetectorSignal};

use super::{Detector, DetectorError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BurnClass {
    NotBurnt,
    LightlyToasted,
    Charred,
    SeverelyBurnt,
}

impl BurnClass {
    pub fn label(&self) -> &'static str {
        match self {
            Self::NotBurnt => "not_burnt",
            Self::LightlyToasted => "lightly_toasted",
            Self::Charred => "charred",
            Self::SeverelyBurnt => "severely_burnt",
        }
    }

    pub fn score(&self) -> f32 {
        match self {
            Self::NotBurnt => 95.0,
            Self::LightlyToasted => 80.0,
            Self::Charred => 35.0,
            Self::SeverelyBurnt => 8.0,
        }
    }
}

/// Classifies charring from the fraction of near-black pixels.
pub struct BurntFoodDetector;

impl Detector for BurntFoodDetector {
    fn id(&self) -> DetectorId {
        DetectorId::BurntFood
    }

    fn predict(&self, image: &FoodImage) -> Result<Detection, DetectorError> {
        if image.pixel_count() < 16 {
            return Err(DetectorError::UnsupportedImage(
                "image too small for burn analysis".into(),
            ));
        }

        let dark = image.fraction_where(|r, g, b| {
            crate::core::image::luma(r, g, b) < 42.0
        });

        let class = if dark > 0.40 {
            BurnClass::SeverelyBurnt
        } else if dark > 0.18 {
            BurnClass::Charred
        } else if dark > 0.07 {
            BurnClass::LightlyToasted
        } else {
            BurnClass::NotBurnt
        };

        let confidence = (0.6 + dark * 0.8).clamp(0.0, 0.95);
        let mut detection =
            Detection::new(DetectorSignal::class(class.label()), confidence, class.score());
        if dark > 0.07 {
            detection = detection
                .with_finding(format!("charred areas cover {:.0}% of the item", dark * 100.0));
        }
        Ok(detection)
    }
}
