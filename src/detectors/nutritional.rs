// src/detectors/nutritional.rs
//
// Regression detector: coarse macro-nutrient profile and derived health
// score from colour composition.

use crate::config::DetectorId;
use crate::core::FoodImage;
use crate::detection::{ContinuousProfile, Detection, DetectorSignal};

use super::{Detector, DetectorError};

/// Estimates a per-100g macro profile. Green coverage tracks vegetable
/// content, browned/yellow tones track carbohydrates, gloss tracks fat.
pub struct NutritionalDetector;

impl NutritionalDetector {
    fn derive_score(fat_g: f32, carbs_g: f32, veg: f32) -> f32 {
        let fat_penalty = (fat_g - 20.0).max(0.0) * 1.5;
        let carb_penalty = (carbs_g - 50.0).max(0.0) * 0.8;
        (85.0 - fat_penalty - carb_penalty + veg * 20.0).clamp(0.0, 100.0)
    }
}

impl Detector for NutritionalDetector {
    fn id(&self) -> DetectorId {
        DetectorId::Nutritional
    }

    fn predict(&self, image: &FoodImage) -> Result<Detection, DetectorError> {
        if image.pixel_count() < 16 {
            return Err(DetectorError::UnsupportedImage(
                "image too small for nutritional analysis".into(),
            ));
        }

        let veg = image.fraction_where(|r, g, b| g > r && g > b && g > 70);
        let browned = image.fraction_where(|r, g, b| r > g && g > b && r > 110 && b < 110);
        let gloss = image.fraction_where(|r, g, b| r > 210 && g > 190 && b > 150);

        let calories_per_100g = 110.0 + browned * 380.0 + gloss * 250.0;
        let protein_g = 4.0 + veg * 9.0 + browned * 8.0;
        let fat_g = 4.0 + gloss * 38.0 + browned * 12.0;
        let carbs_g = 14.0 + browned * 55.0;

        let raw_score = Self::derive_score(fat_g, carbs_g, veg);
        let profile = ContinuousProfile::Nutrition {
            calories_per_100g,
            protein_g,
            fat_g,
            carbs_g,
        };

        let mut detection = Detection::new(DetectorSignal::Profile(profile), 0.6, raw_score)
            .with_finding(format!(
                "estimated {calories_per_100g:.0} kcal/100g ({protein_g:.0}g protein, {fat_g:.0}g fat, {carbs_g:.0}g carbs)"
            ));
        if fat_g > 20.0 {
            detection = detection.with_finding("high_fat".to_string());
        }
        if carbs_g > 50.0 {
            detection = detection.with_finding("high_carb".to_string());
        }
        Ok(detection)
    }
}
