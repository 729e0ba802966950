// src/detectors/salt_sugar.rs
//
// Regression detector: sodium/sugar load estimate and derived score.

use crate::config::DetectorId;
use crate::core::FoodImage;
use crate::detection::{ContinuousProfile, Detection, DetectorSignal};

use super::{Detector, DetectorError};

/// Daily-guideline anchors used to derive the safety score.
const SODIUM_GUIDELINE_MG: f32 = 600.0;
const SUGAR_GUIDELINE_G: f32 = 22.5;

/// Estimates salt and sugar load: crystalline white specks track surface
/// salt, warm glossy sheen tracks sugary glazes.
pub struct SaltSugarDetector;

impl SaltSugarDetector {
    fn derive_score(sodium_mg: f32, sugar_g: f32) -> f32 {
        let sodium_penalty = (sodium_mg - SODIUM_GUIDELINE_MG).max(0.0) / 20.0;
        let sugar_penalty = (sugar_g - SUGAR_GUIDELINE_G).max(0.0) * 2.0;
        (95.0 - sodium_penalty - sugar_penalty).clamp(0.0, 100.0)
    }
}

impl Detector for SaltSugarDetector {
    fn id(&self) -> DetectorId {
        DetectorId::SaltSugar
    }

    fn predict(&self, image: &FoodImage) -> Result<Detection, DetectorError> {
        if image.pixel_count() < 16 {
            return Err(DetectorError::UnsupportedImage(
                "image too small for salt/sugar analysis".into(),
            ));
        }

        let salt_specks = image.fraction_where(|r, g, b| {
            let min = r.min(g).min(b);
            let max = r.max(g).max(b);
            min > 200 && max - min < 20
        });
        let glaze = image.fraction_where(|r, g, b| r > 190 && g > 130 && b < 140 && r > b);

        let sodium_mg_per_100g = 180.0 + salt_specks * 2800.0;
        let sugar_g_per_100g = 4.0 + glaze * 42.0;

        let raw_score = Self::derive_score(sodium_mg_per_100g, sugar_g_per_100g);
        let profile = ContinuousProfile::SaltSugar {
            sodium_mg_per_100g,
            sugar_g_per_100g,
        };

        let mut detection = Detection::new(DetectorSignal::Profile(profile), 0.55, raw_score)
            .with_finding(format!(
                "estimated {sodium_mg_per_100g:.0} mg sodium and {sugar_g_per_100g:.1} g sugar per 100g"
            ));
        if sodium_mg_per_100g > SODIUM_GUIDELINE_MG {
            detection = detection.with_finding("high_sodium".to_string());
        }
        if sugar_g_per_100g > SUGAR_GUIDELINE_G {
            detection = detection.with_finding("high_sugar".to_string());
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
    fn test_plain_food_scores_high() {
        let detection = SaltSugarDetector.predict(&uniform([110, 90, 70])).unwrap();
        assert!(detection.raw_score > 80.0);
        assert!(!detection.findings.iter().any(|f| f == "high_sodium"));
    }

    #[test]
    fn test_salt_crust_flagged() {
        let detection = SaltSugarDetector.predict(&uniform([230, 228, 225])).unwrap();
        assert!(detection.findings.iter().any(|f| f == "high_sodium"));
        assert!(detection.raw_score < 40.0);
        assert!(matches!(
            detection.signal,
            DetectorSignal::Profile(ContinuousProfile::SaltSugar { .. })
        ));
    }
}
