// src/detectors/microplastics.rs
//
// Microplastic contamination screening from bright-speck texture.

use crate::config::DetectorId;
use crate::core::FoodImage;
use crate::detection::{Detection, DetectorSignal};

use super::{Detector, DetectorError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MicroplasticClass {
    NotDetected,
    TraceSuspected,
    Detected,
}

impl MicroplasticClass {
    pub fn label(&self) -> &'static str {
        match self {
            Self::NotDetected => "not_detected",
            Self::TraceSuspected => "trace_suspected",
            Self::Detected => "detected",
        }
    }

    pub fn score(&self) -> f32 {
        match self {
            Self::NotDetected => 95.0,
            Self::TraceSuspected => 55.0,
            Self::Detected => 12.0,
        }
    }
}

/// Screens for small bright desaturated specks against a textured
/// background, the visual signature of plastic fragments.
pub struct MicroplasticsDetector;

impl Detector for MicroplasticsDetector {
    fn id(&self) -> DetectorId {
        DetectorId::Microplastics
    }

    fn predict(&self, image: &FoodImage) -> Result<Detection, DetectorError> {
        if image.pixel_count() < 16 {
            return Err(DetectorError::UnsupportedImage(
                "image too small for microplastics analysis".into(),
            ));
        }

        let specks = image.fraction_where(|r, g, b| {
            let max = r.max(g).max(b);
            let min = r.min(g).min(b);
            min > 215 && max - min < 25
        });
        let texture = image.luma_stddev();

        let class = if specks > 0.08 && texture > 70.0 {
            MicroplasticClass::Detected
        } else if specks > 0.02 && texture > 50.0 {
            MicroplasticClass::TraceSuspected
        } else {
            MicroplasticClass::NotDetected
        };

        let confidence = (0.4 + specks * 2.0).clamp(0.0, 0.85);
        let mut detection =
            Detection::new(DetectorSignal::class(class.label()), confidence, class.score());
        if class != MicroplasticClass::NotDetected {
            detection = detection.with_finding(format!(
                "bright speck coverage {:.1}%, texture deviation {:.0}",
                specks * 100.0,
                texture
            ));
        }
        Ok(detection)
    }
}
