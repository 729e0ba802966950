// tests/orchestrator_test.rs
//
// Fan-out/fan-in behavior: failure isolation, timeouts, cancellation,
// and the one-slot-per-detector guarantee.

mod test_utils;

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio_util::sync::CancellationToken;

use platescan::config::DetectorId;
use platescan::core::{FoodAnalyzer, Orchestrator};
use platescan::detection::DetectorStatus;

use test_utils::{full_registry, sample_image, ScriptedDetector};

#[tokio::test]
async fn every_registered_detector_gets_a_slot() {
    let registry = Arc::new(full_registry(vec![
        ScriptedDetector::failing(DetectorId::OilQuality),
        ScriptedDetector::panicking(DetectorId::Microplastics),
    ]));
    let orchestrator = Orchestrator::new(registry, Duration::from_secs(5), None);

    let results = orchestrator
        .run(Arc::new(sample_image()), &CancellationToken::new())
        .await;

    assert_eq!(results.len(), 8);
    for id in DetectorId::all() {
        assert!(results.contains(id), "missing slot for {id}");
    }
    assert_eq!(
        results.get(DetectorId::OilQuality).unwrap().status,
        DetectorStatus::Error
    );
    assert_eq!(
        results.get(DetectorId::Microplastics).unwrap().status,
        DetectorStatus::Fallback
    );
    assert_eq!(
        results.get(DetectorId::Spoilage).unwrap().status,
        DetectorStatus::Ok
    );
}

#[tokio::test]
async fn timed_out_detector_becomes_fallback() {
    let registry = Arc::new(full_registry(vec![ScriptedDetector::slow(
        DetectorId::BurntFood,
        Duration::from_secs(2),
    )]));
    let orchestrator = Orchestrator::new(registry, Duration::from_millis(100), None);

    let results = orchestrator
        .run(Arc::new(sample_image()), &CancellationToken::new())
        .await;

    let burnt = results.get(DetectorId::BurntFood).unwrap();
    assert_eq!(burnt.status, DetectorStatus::Fallback);
    assert_eq!(burnt.effective_score(), 50.0);
    assert_eq!(burnt.confidence, 0.0);
}

#[tokio::test]
async fn wall_clock_tracks_slowest_detector_not_the_sum() {
    let delay = Duration::from_millis(250);
    let registry = Arc::new(full_registry(vec![
        ScriptedDetector::slow(DetectorId::OilQuality, delay),
        ScriptedDetector::slow(DetectorId::BurntFood, delay),
        ScriptedDetector::slow(DetectorId::Spoilage, delay),
        ScriptedDetector::slow(DetectorId::Temperature, delay),
    ]));
    let orchestrator = Orchestrator::new(registry, Duration::from_secs(5), None);

    let started = Instant::now();
    let results = orchestrator
        .run(Arc::new(sample_image()), &CancellationToken::new())
        .await;
    let elapsed = started.elapsed();

    assert_eq!(results.len(), 8);
    // Four sequential 250ms detectors would cost a second; concurrent
    // fan-out should stay well under that.
    assert!(
        elapsed < Duration::from_millis(800),
        "fan-out took {elapsed:?}"
    );
}

#[tokio::test]
async fn cancellation_fills_remaining_slots_and_is_idempotent() {
    let registry = Arc::new(full_registry(vec![ScriptedDetector::slow(
        DetectorId::SaltSugar,
        Duration::from_secs(2),
    )]));
    let orchestrator = Orchestrator::new(registry, Duration::from_secs(60), None);

    let cancel = CancellationToken::new();
    let canceller = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(150)).await;
        canceller.cancel();
        canceller.cancel(); // second cancel is a no-op
    });

    let results = orchestrator.run(Arc::new(sample_image()), &cancel).await;

    assert_eq!(results.len(), 8);
    assert_eq!(
        results.get(DetectorId::SaltSugar).unwrap().status,
        DetectorStatus::Fallback
    );
}

#[tokio::test]
async fn request_deadline_cancels_inflight_detectors() {
    let registry = Arc::new(full_registry(vec![ScriptedDetector::slow(
        DetectorId::Nutritional,
        Duration::from_secs(2),
    )]));
    let orchestrator = Orchestrator::new(
        registry,
        Duration::from_secs(60),
        Some(Duration::from_millis(150)),
    );

    let started = Instant::now();
    let results = orchestrator
        .run(Arc::new(sample_image()), &CancellationToken::new())
        .await;

    assert!(started.elapsed() < Duration::from_secs(5));
    assert_eq!(results.len(), 8);
    assert_eq!(
        results.get(DetectorId::Nutritional).unwrap().status,
        DetectorStatus::Fallback
    );
}

#[tokio::test]
async fn analyze_never_fails_for_detector_level_problems() {
    let registry = full_registry(vec![
        ScriptedDetector::failing(DetectorId::OilQuality),
        ScriptedDetector::panicking(DetectorId::ChemicalAdditive),
        ScriptedDetector::slow(DetectorId::BurntFood, Duration::from_secs(2)),
    ]);
    let analyzer = FoodAnalyzer::builder()
        .registry(registry)
        .detector_timeout(Duration::from_millis(100))
        .build()
        .unwrap();

    let report = analyzer.analyze(sample_image(), None).await.unwrap();

    assert_eq!(report.per_detector.len(), 8);
    assert_eq!(
        report.per_detector[&DetectorId::BurntFood].status,
        DetectorStatus::Fallback
    );
    assert_eq!(
        report.per_detector[&DetectorId::OilQuality].status,
        DetectorStatus::Error
    );
    assert_eq!(
        report.per_detector[&DetectorId::Spoilage].status,
        DetectorStatus::Ok
    );
}

#[tokio::test]
async fn analyze_with_cancel_absorbs_cancelled_detectors() {
    let registry = full_registry(vec![ScriptedDetector::slow(
        DetectorId::Temperature,
        Duration::from_secs(2),
    )]);
    let analyzer = FoodAnalyzer::builder()
        .registry(registry)
        .detector_timeout(Duration::from_secs(60))
        .build()
        .unwrap();

    let cancel = CancellationToken::new();
    let canceller = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(150)).await;
        canceller.cancel();
    });

    let report = analyzer
        .analyze_with_cancel(sample_image(), None, cancel)
        .await
        .unwrap();

    assert_eq!(report.per_detector.len(), 8);
    assert_eq!(
        report.per_detector[&DetectorId::Temperature].status,
        DetectorStatus::Fallback
    );
    // Cancellation substitutes a neutral slot; the call still succeeds.
    assert_eq!(report.per_detector[&DetectorId::Temperature].score, 50);
}

#[tokio::test]
async fn invalid_image_fails_fast() {
    let analyzer = FoodAnalyzer::new().unwrap();
    let bogus = platescan::FoodImage::new(4, 4, vec![0u8; 7]);
    assert!(analyzer.analyze(bogus, None).await.is_err());
}
