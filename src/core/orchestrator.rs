// src/core/orchestrator.rs
//
// Concurrent fan-out of all registered detectors against one image,
// with per-task timeout, cancellation, and failure isolation.

use std::sync::Arc;
use std::time::Duration;

use log::{debug, warn};
use tokio::task::JoinSet;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::detection::{Detection, DetectorResult, DetectorResultSet};
use crate::detectors::{DetectorError, DetectorRegistry};

use super::image::FoodImage;

enum TaskOutcome {
    Completed(Detection),
    Failed(DetectorError),
    TimedOut,
    Cancelled,
    Panicked,
}

/// Dispatches every registered detector as an independent blocking task
/// against the same read-only image and joins them at a single barrier.
///
/// Guarantees: wall-clock cost tracks the slowest detector, not the sum;
/// the returned set holds exactly one entry per registered detector; a
/// failed, timed-out, or cancelled task fills its slot with the neutral
/// substitute instead of aborting siblings. No retries.
pub struct Orchestrator {
    registry: Arc<DetectorRegistry>,
    detector_timeout: Duration,
    request_deadline: Option<Duration>,
}

impl Orchestrator {
    pub fn new(
        registry: Arc<DetectorRegistry>,
        detector_timeout: Duration,
        request_deadline: Option<Duration>,
    ) -> Self {
        Self {
            registry,
            detector_timeout,
            request_deadline,
        }
    }

    /// Fan out all detectors and fan in a complete result set.
    ///
    /// Cancelling `cancel` (from any number of callers; the token is
    /// idempotent) stops waiting on in-flight detectors and records
    /// their slots as fallbacks.
    pub async fn run(
        &self,
        image: Arc<FoodImage>,
        cancel: &CancellationToken,
    ) -> DetectorResultSet {
        let started = Instant::now();
        let mut tasks = JoinSet::new();

        for detector in self.registry.detectors() {
            let detector = Arc::clone(detector);
            let image = Arc::clone(&image);
            let cancel = cancel.clone();
            let budget = self.detector_timeout;

            tasks.spawn(async move {
                let id = detector.id();
                let work = tokio::task::spawn_blocking(move || detector.predict(&image));
                let outcome = tokio::select! {
                    _ = cancel.cancelled() => TaskOutcome::Cancelled,
                    joined = tokio::time::timeout(budget, work) => match joined {
                        Err(_) => TaskOutcome::TimedOut,
                        Ok(Err(_)) => TaskOutcome::Panicked,
                        Ok(Ok(Ok(detection))) => TaskOutcome::Completed(detection),
                        Ok(Ok(Err(err))) => TaskOutcome::Failed(err),
                    },
                };
                (id, outcome)
            });
        }

        // Fan-in barrier. The optional request deadline is armed once;
        // when it fires every remaining task observes the token and
        // resolves as cancelled.
        let mut deadline = self
            .request_deadline
            .map(|d| Box::pin(tokio::time::sleep(d)));
        let mut results = DetectorResultSet::new();

        loop {
            let joined = if let Some(sleep) = deadline.as_mut() {
                tokio::select! {
                    joined = tasks.join_next() => Some(joined),
                    _ = sleep => None,
                }
            } else {
                Some(tasks.join_next().await)
            };

            let Some(joined) = joined else {
                // Deadline fired: cancel once and keep draining; every
                // remaining task resolves via the token.
                warn!("request deadline reached, cancelling in-flight detectors");
                cancel.cancel();
                deadline = None;
                continue;
            };
            let Some(joined) = joined else { break };
            let Ok((id, outcome)) = joined else {
                // Outer task panicked before reporting; its slot is
                // filled by the completeness pass below.
                continue;
            };

            let result = match outcome {
                TaskOutcome::Completed(detection) => {
                    debug!("{id} completed with score {:.0}", detection.raw_score);
                    DetectorResult::ok(id, detection)
                }
                TaskOutcome::Failed(err) => {
                    warn!("{id} failed: {err}");
                    DetectorResult::error(id, &err)
                }
                TaskOutcome::TimedOut => {
                    warn!(
                        "{id} exceeded its {:?} budget, recording fallback",
                        self.detector_timeout
                    );
                    DetectorResult::fallback(
                        id,
                        format!("timed out after {:?}", self.detector_timeout),
                    )
                }
                TaskOutcome::Cancelled => {
                    debug!("{id} cancelled, recording fallback");
                    DetectorResult::fallback(id, "cancelled before completion")
                }
                TaskOutcome::Panicked => {
                    warn!("{id} panicked, recording fallback");
                    DetectorResult::fallback(id, "detector panicked")
                }
            };
            results.insert(result);
        }

        // Completeness invariant: one slot per registered detector, no
        // silent omissions.
        for id in self.registry.ids() {
            if !results.contains(id) {
                results.insert(DetectorResult::fallback(id, "task never reported"));
            }
        }

        debug!(
            "fan-in complete: {} detectors in {:?}",
            results.len(),
            started.elapsed()
        );
        results
    }
}
