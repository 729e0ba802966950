// src/core/analyzer.rs
//
// Top-level analysis API with builder pattern.

use std::sync::Arc;
use std::time::Duration;

use log::info;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

use crate::config::{
    ConfigError, CriticalityTable, EngineConfig, RecommendationTemplates, WeightTable,
};
use crate::detectors::DetectorRegistry;

use super::aggregator::compute_overall_score;
use super::alerts;
use super::image::FoodImage;
use super::orchestrator::Orchestrator;
use super::recommend::{recommend, HealthProfile};
use super::report::{assemble, AnalysisReport};

/// The sole failure mode of [`FoodAnalyzer::analyze`]: the image
/// precondition. Detector-level failures never surface here; they are
/// folded into the report as fallback/error slots.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("invalid image: {0}")]
    InvalidImage(String),
}

/// Builder for [`FoodAnalyzer`] configuration.
pub struct AnalyzerBuilder {
    registry: DetectorRegistry,
    criticality: CriticalityTable,
    templates: RecommendationTemplates,
    config: EngineConfig,
}

impl AnalyzerBuilder {
    pub fn new() -> Self {
        Self {
            registry: DetectorRegistry::with_defaults(),
            criticality: CriticalityTable::builtin(),
            templates: RecommendationTemplates::builtin(),
            config: EngineConfig::default(),
        }
    }

    /// Replace the detector registry (weights are validated in `build`).
    pub fn registry(mut self, registry: DetectorRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn criticality_table(mut self, table: CriticalityTable) -> Self {
        self.criticality = table;
        self
    }

    pub fn recommendation_templates(mut self, templates: RecommendationTemplates) -> Self {
        self.templates = templates;
        self
    }

    pub fn detector_timeout(mut self, timeout: Duration) -> Self {
        self.config.detector_timeout = timeout;
        self
    }

    pub fn request_deadline(mut self, deadline: Duration) -> Self {
        self.config.request_deadline = Some(deadline);
        self
    }

    pub fn max_recommendations(mut self, max: usize) -> Self {
        self.config.max_recommendations = max;
        self
    }

    /// Validate configuration and build the analyzer. A weight-table
    /// violation fails here, at startup, never at request time.
    pub fn build(self) -> Result<FoodAnalyzer, ConfigError> {
        let weights = self.registry.weights()?;
        let registry = Arc::new(self.registry);
        let orchestrator = Orchestrator::new(
            Arc::clone(&registry),
            self.config.detector_timeout,
            self.config.request_deadline,
        );
        Ok(FoodAnalyzer {
            orchestrator,
            weights,
            criticality: self.criticality,
            templates: self.templates,
            max_recommendations: self.config.max_recommendations,
        })
    }
}

impl Default for AnalyzerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// The analysis engine: fan-out orchestration plus the pure aggregation,
/// alert, recommendation, and assembly stages.
///
/// Holds only process-wide read-only configuration; every `analyze`
/// call builds its state fresh and discards it with the returned report.
pub struct FoodAnalyzer {
    orchestrator: Orchestrator,
    weights: WeightTable,
    criticality: CriticalityTable,
    templates: RecommendationTemplates,
    max_recommendations: usize,
}

impl FoodAnalyzer {
    /// Analyzer with the stock detectors and built-in tables.
    pub fn new() -> Result<Self, ConfigError> {
        AnalyzerBuilder::new().build()
    }

    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Analyze one image, best effort: always returns a report unless
    /// the image precondition fails before fan-out.
    pub async fn analyze(
        &self,
        image: FoodImage,
        profile: Option<&HealthProfile>,
    ) -> Result<AnalysisReport, AnalysisError> {
        self.analyze_with_cancel(image, profile, CancellationToken::new())
            .await
    }

    /// Analyze with a caller-owned cancellation token. Cancelling stops
    /// waiting on in-flight detectors (their slots become fallbacks) and
    /// is safe to invoke more than once.
    pub async fn analyze_with_cancel(
        &self,
        image: FoodImage,
        profile: Option<&HealthProfile>,
        cancel: CancellationToken,
    ) -> Result<AnalysisReport, AnalysisError> {
        // Fail fast before any detector runs; this is the only way the
        // call as a whole can fail.
        image.validate()?;

        let image = Arc::new(image);
        info!(
            "analyzing {}x{} image across {} detectors",
            image.width(),
            image.height(),
            self.weights.len()
        );

        let results = self.orchestrator.run(image, &cancel).await;

        let verdict = compute_overall_score(&results, &self.weights);
        let safety_alerts = alerts::scan(&results, &self.criticality);
        let (recommendations, insights) = recommend(
            &results,
            &verdict,
            profile,
            &self.templates,
            self.max_recommendations,
        );

        info!(
            "verdict: score {} ({}), {} alert(s)",
            verdict.score,
            verdict.safety_level,
            safety_alerts.len()
        );

        Ok(assemble(
            &results,
            verdict,
            safety_alerts,
            recommendations,
            insights,
        ))
    }
}
