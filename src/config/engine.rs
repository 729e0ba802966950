//! Runtime tuning knobs for the analysis engine

use std::time::Duration;

/// Engine tuning. All values have generous defaults; per-request state
/// never lives here.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Budget for one detector task. A task exceeding it is recorded as
    /// a fallback slot, never retried.
    pub detector_timeout: Duration,
    /// Optional whole-request deadline propagated to all detector tasks.
    pub request_deadline: Option<Duration>,
    /// Cap on the recommendation list to bound report size.
    pub max_recommendations: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            detector_timeout: Duration::from_secs(10),
            request_deadline: None,
            max_recommendations: 8,
        }
    }
}
