use std::sync::Arc;

use async_trait::async_trait;
use image::DynamicImage;
use shoplens::common::{LensBox, LensFrame, LensProduct};
use shoplens::data::CycleResult;
use shoplens::detector::ProductDetector;
use shoplens::playback::{PlaybackController, PlaybackState, PlayerEvent, ViewerSession};
use shoplens::LensError;

struct MockDetector {
    products: Vec<LensProduct>,
}

#[async_trait]
impl ProductDetector for MockDetector {
    async fn detect(&self, _frame: &LensFrame) -> Result<Vec<LensProduct>, LensError> {
        Ok(self.products.clone())
    }
}

struct FailingDetector;

#[async_trait]
impl ProductDetector for FailingDetector {
    async fn detect(&self, _frame: &LensFrame) -> Result<Vec<LensProduct>, LensError> {
        Err(LensError::Detection("service unavailable".to_string()))
    }
}

fn sample_products() -> Vec<LensProduct> {
    vec![LensProduct::new(
        "p1".to_string(),
        "Toaster".to_string(),
        "Electronics".to_string(),
        0.9,
        LensBox::from_wire([100., 200., 400., 600.]),
    )]
}

// The mock completes on its first poll, so a few yields are enough for the
// spawned cycle task to finish on the test runtime.
async fn settle() {
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
}

#[tokio::test]
async fn pause_runs_a_capture_cycle() {
    let detector = Arc::new(MockDetector {
        products: sample_products(),
    });
    let mut controller = PlaybackController::new(detector, 80);
    let source = DynamicImage::new_rgb8(64, 48);

    controller.handle_event(PlayerEvent::Pause, &source);
    assert_eq!(controller.session().state(), PlaybackState::Paused);
    assert!(controller.session().is_processing());

    settle().await;
    controller.pump();

    assert!(!controller.session().is_processing());
    assert_eq!(controller.session().products().len(), 1);
    assert_eq!(controller.session().products()[0].name, "Toaster");
}

#[tokio::test]
async fn resume_clears_detections_and_error_state() {
    let detector = Arc::new(FailingDetector);
    let mut controller = PlaybackController::new(detector, 80);
    let source = DynamicImage::new_rgb8(64, 48);

    controller.handle_event(PlayerEvent::Pause, &source);
    settle().await;
    controller.pump();
    assert!(controller.session().error_banner().is_some());

    controller.handle_event(PlayerEvent::Play, &source);
    assert_eq!(controller.session().state(), PlaybackState::Playing);
    assert!(controller.session().products().is_empty());
    assert!(controller.session().error_banner().is_none());
    assert!(!controller.session().is_processing());
}

#[tokio::test]
async fn result_arriving_after_resume_is_discarded() {
    let detector = Arc::new(MockDetector {
        products: sample_products(),
    });
    let mut controller = PlaybackController::new(detector, 80);
    let source = DynamicImage::new_rgb8(64, 48);

    controller.handle_event(PlayerEvent::Pause, &source);
    // resume before the cycle result is pumped in
    controller.handle_event(PlayerEvent::Play, &source);

    settle().await;
    controller.pump();

    assert!(controller.session().products().is_empty());
}

#[tokio::test]
async fn capture_failure_surfaces_without_a_round_trip() {
    let detector = Arc::new(MockDetector {
        products: sample_products(),
    });
    let mut controller = PlaybackController::new(detector, 80);
    let zero = DynamicImage::new_rgb8(0, 0);

    controller.handle_event(PlayerEvent::Pause, &zero);

    let banner = controller.session().error_banner().unwrap();
    assert!(banner.contains("capture"), "{}", banner);
    assert!(!controller.session().is_processing());
}

#[tokio::test]
async fn media_error_sets_a_dismissible_banner() {
    let detector = Arc::new(MockDetector { products: vec![] });
    let mut controller = PlaybackController::new(detector, 80);
    let source = DynamicImage::new_rgb8(64, 48);

    controller.handle_event(
        PlayerEvent::MediaError("unsupported codec".to_string()),
        &source,
    );
    let banner = controller.session().error_banner().unwrap();
    assert!(banner.contains("unsupported codec"));

    controller.dismiss_error();
    assert!(controller.session().error_banner().is_none());
}

#[test]
fn stale_cycle_results_are_discarded() {
    let mut session = ViewerSession::default();

    let first = session.begin_cycle();
    let second = session.begin_cycle();
    assert!(first < second);

    // the slow first response lands after the second was issued
    session.apply_result(CycleResult {
        seq: first,
        outcome: Ok(sample_products()),
    });
    assert!(session.products().is_empty());
    assert!(session.is_processing());

    session.apply_result(CycleResult {
        seq: second,
        outcome: Ok(vec![]),
    });
    assert!(session.products().is_empty());
    assert!(!session.is_processing());
}

#[test]
fn failed_cycle_clears_products_and_sets_banner() {
    let mut session = ViewerSession::default();

    let seq = session.begin_cycle();
    session.apply_result(CycleResult {
        seq,
        outcome: Ok(sample_products()),
    });
    assert_eq!(session.products().len(), 1);

    let seq = session.begin_cycle();
    session.apply_result(CycleResult {
        seq,
        outcome: Err(LensError::EmptyResponse),
    });
    assert!(session.products().is_empty());
    assert!(session
        .error_banner()
        .unwrap()
        .contains("empty response"));
}
