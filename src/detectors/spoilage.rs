// src/detectors/spoilage.rs
//
// Spoilage detection from mold/discolouration colour statistics.

use crate::config::DetectorId;
use crate::core::FoodImage;
use crate::detection::{Detection, DetectorSignal};

use super::{Detector, DetectorError};

/// Spoilage classes, ordered from safest to most dangerous.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpoilageClass {
    Fresh,
    Aging,
    Spoiled,
    DangerousFood,
}

impl SpoilageClass {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Fresh => "fresh",
            Self::Aging => "aging",
            Self::Spoiled => "spoiled",
            Self::DangerousFood => "dangerous_food",
        }
    }

    /// Severity-derived safety score on 0-100.
    pub fn score(&self) -> f32 {
        match self {
            Self::Fresh => 95.0,
            Self::Aging => 70.0,
            Self::Spoiled => 25.0,
            Self::DangerousFood => 0.0,
        }
    }
}

/// Classifies spoilage from greenish/grey mold-like colour fractions.
pub struct SpoilageDetector;

impl Detector for SpoilageDetector {
    fn id(&self) -> DetectorId {
        DetectorId::Spoilage
    }

    fn predict(&self, image: &FoodImage) -> Result<Detection, DetectorError> {
        if image.pixel_count() < 16 {
            return Err(DetectorError::UnsupportedImage(
                "image too small for spoilage analysis".into(),
            ));
        }

        // Green/grey casts and dull desaturated patches track mold and
        // bacterial discolouration.
        let moldy = image.fraction_where(|r, g, b| g > r.saturating_add(18) && g > b.saturating_add(12));
        let dull = image.fraction_where(|r, g, b| {
            let max = r.max(g).max(b);
            let min = r.min(g).min(b);
            max - min < 18 && (60..150).contains(&max)
        });
        let indicator = moldy * 1.6 + dull * 0.5;

        let class = if moldy > 0.20 || indicator > 0.45 {
            SpoilageClass::DangerousFood
        } else if indicator > 0.25 {
            SpoilageClass::Spoiled
        } else if indicator > 0.12 {
            SpoilageClass::Aging
        } else {
            SpoilageClass::Fresh
        };

        let confidence = (0.55 + indicator).clamp(0.0, 0.95);
        let mut detection = Detection::new(
            DetectorSignal::class(class.label()),
            confidence,
            class.score(),
        );
        if moldy > 0.05 {
            detection = detection
                .with_finding(format!("mold-like colouration on {:.0}% of surface", moldy * 100.0));
        }
        if dull > 0.2 {
            detection =
                detection.with_finding(format!("dull discolouration on {:.0}% of surface", dull * 100.0));
        }
        Ok(detection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform(rgb: [u8; 3]) -> FoodImage {
        FoodImage::from_rgb8(8, 8, rgb.to_vec().repeat(64)).unwrap()
    }

    #[test]
    fn test_fresh_on_vivid_colors() {
        let detection = SpoilageDetector.predict(&uniform([210, 80, 60])).unwrap();
        assert_eq!(detection.signal.label(), Some("fresh"));
        assert_eq!(detection.raw_score, SpoilageClass::Fresh.score());
    }

    #[test]
    fn test_dangerous_on_moldy_green() {
        let detection = SpoilageDetector.predict(&uniform([70, 130, 75])).unwrap();
        assert_eq!(detection.signal.label(), Some("dangerous_food"));
        assert_eq!(detection.raw_score, 0.0);
    }

    #[test]
    fn test_rejects_tiny_image() {
        let image = FoodImage::from_rgb8(2, 2, vec![0; 12]).unwrap();
        assert!(matches!(
            SpoilageDetector.predict(&image),
            Err(DetectorError::UnsupportedImage(_))
        ));
    }
}
