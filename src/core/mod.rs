//! Core engine: orchestration, aggregation, alerts, recommendations,
//! and report assembly.

pub mod aggregator;
pub mod alerts;
pub mod analyzer;
pub mod image;
pub mod orchestrator;
pub mod recommend;
pub mod report;

pub use aggregator::{compute_overall_score, OverallVerdict, SafetyLevel};
pub use alerts::{scan, SafetyAlert};
pub use analyzer::{AnalysisError, AnalyzerBuilder, FoodAnalyzer};
pub use image::FoodImage;
pub use orchestrator::Orchestrator;
pub use recommend::{recommend, HealthProfile, Recommendation};
pub use report::{assemble, assemble_at, AnalysisReport, DetectorSummary};
