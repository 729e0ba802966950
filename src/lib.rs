//! PlateScan - Food safety analysis from a single image
//!
//! A concurrent multi-detector ensemble engine: one food-item image is
//! fanned out to eight independent risk/quality detectors, individual
//! detector failure is tolerated, and the heterogeneous per-category
//! signals are merged into one composite safety verdict, ranked safety
//! alerts, and personalized recommendations.
//!
//! ## Features
//!
//! - **Eight pluggable detectors**: oil quality, burnt food, spoilage,
//!   nutrition, salt/sugar, temperature, chemical additives, microplastics
//! - **Failure isolation**: a detector that errors, times out, or panics
//!   fills its slot with a documented neutral score instead of failing
//!   the request
//! - **Deterministic aggregation**: weighted blending with table-driven
//!   safety banding, independent of task completion order
//! - **Data-driven alerts**: criticality rules supplied as configuration,
//!   decoupled from the aggregation math
//! - **Personalization**: optional health profile raises condition-specific
//!   guidance; degrades gracefully to generic recommendations
//!
//! ## Module Structure
//!
//! - `core` - orchestration, aggregation, alerts, recommendations, report
//! - `detectors` - detector contract, stock variants, registration
//! - `detection` - result and signal types
//! - `config` - weights, criticality table, templates, engine tuning
//! - `cli` - command-line interface
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use platescan::{FoodAnalyzer, FoodImage, HealthProfile};
//! use platescan::config::HealthCondition;
//!
//! let analyzer = FoodAnalyzer::new()?;
//! let image = FoodImage::from_rgb8(width, height, rgb_pixels)?;
//! let profile = HealthProfile::new(vec![HealthCondition::Hypertension]);
//!
//! let report = analyzer.analyze(image, Some(&profile)).await?;
//! println!("Safety: {} ({})", report.verdict.score, report.verdict.safety_level);
//! ```
//!
//! ## Safety Bands
//!
//! | Score | Level      |
//! |-------|------------|
//! | ≥90   | excellent  |
//! | ≥75   | good       |
//! | ≥60   | acceptable |
//! | ≥40   | concerning |
//! | ≥20   | dangerous  |
//! | <20   | unsafe     |

// Core engine
pub mod core;

// Command-line interface
pub mod cli;

// Configuration tables and tuning
pub mod config;

// Detection result types
pub mod detection;

// Detector contract and stock variants
pub mod detectors;

// Re-export commonly used types at crate root for convenience
pub use config::{
    AlertSeverity, ConfigError, CriticalityTable, DetectorId, EngineConfig, HealthCondition,
    RecommendationTemplates, WeightTable,
};
pub use self::core::{
    AnalysisError, AnalysisReport, AnalyzerBuilder, FoodAnalyzer, FoodImage, HealthProfile,
    OverallVerdict, Recommendation, SafetyAlert, SafetyLevel,
};
pub use detection::{
    ContinuousProfile, DetectorResult, DetectorResultSet, DetectorSignal, DetectorStatus,
    NEUTRAL_SCORE,
};
pub use detectors::{Detector, DetectorError, DetectorRegistry};
