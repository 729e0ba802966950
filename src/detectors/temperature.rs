// src/detectors/temperature.rs
//
// Serving-temperature estimate from warm/cool colour balance.

use crate::config::DetectorId;
use crate::core::FoodImage;
use crate::detection::{Detection, DetectorSignal};

use super::{Detector, DetectorError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemperatureClass {
    SteamingHot,
    Chilled,
    DangerZone,
}

impl TemperatureClass {
    pub fn label(&self) -> &'static str {
        match self {
            Self::SteamingHot => "steaming_hot",
            Self::Chilled => "chilled",
            Self::DangerZone => "danger_zone",
        }
    }

    pub fn score(&self) -> f32 {
        match self {
            Self::SteamingHot => 90.0,
            Self::Chilled => 85.0,
            // 5-60°C holding range where bacteria multiply fastest.
            Self::DangerZone => 30.0,
        }
    }
}

/// Estimates whether food sits in the 5-60°C bacterial danger zone from
/// warm-glow versus cool-tint dominance.
pub struct TemperatureDetector;

impl Detector for TemperatureDetector {
    fn id(&self) -> DetectorId {
        DetectorId::Temperature
    }

    fn predict(&self, image: &FoodImage) -> Result<Detection, DetectorError> {
        if image.pixel_count() < 16 {
            return Err(DetectorError::UnsupportedImage(
                "image too small for temperature analysis".into(),
            ));
        }

        let [r, g, b] = image.mean_rgb();
        let warmth = (r - b) / 255.0;

        let class = if warmth > 0.12 && r > 120.0 {
            TemperatureClass::SteamingHot
        } else if warmth < -0.06 {
            TemperatureClass::Chilled
        } else {
            TemperatureClass::DangerZone
        };

        let confidence = (0.45 + warmth.abs() * 1.5).clamp(0.0, 0.85);
        let mut detection =
            Detection::new(DetectorSignal::class(class.label()), confidence, class.score());
        detection = detection.with_finding(format!(
            "colour balance r={r:.0} g={g:.0} b={b:.0}, warmth index {warmth:.2}"
        ));
        Ok(detection)
    }
}
