use std::sync::Arc;

use crate::capture::{self, FrameSource};
use crate::common::LensProduct;
use crate::data::{cycle_channels, CyclePump, CycleResult, CycleSink};
use crate::detector::ProductDetector;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    #[default]
    Playing,
    Paused,
}

/// Media events the viewer forwards from the player surface.
#[derive(Debug, Clone)]
pub enum PlayerEvent {
    Play,
    Pause,
    MediaLoaded { width: u32, height: u32 },
    MediaError(String),
}

/// UI-facing view state for one viewer: playback state, the detections
/// currently on screen, the in-flight flag and the dismissible error banner.
#[derive(Debug, Default)]
pub struct ViewerSession {
    state: PlaybackState,
    products: Vec<LensProduct>,
    processing: bool,
    error_banner: Option<String>,
    issued_seq: u64,
}

impl ViewerSession {
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn products(&self) -> &[LensProduct] {
        &self.products
    }

    pub fn is_processing(&self) -> bool {
        self.processing
    }

    pub fn error_banner(&self) -> Option<&str> {
        self.error_banner.as_deref()
    }

    pub fn dismiss_error(&mut self) {
        self.error_banner = None;
    }

    /// Stamps a new capture cycle on pause. Later cycles always win over
    /// earlier ones. Public so embedders with their own transport can drive
    /// the session directly.
    pub fn begin_cycle(&mut self) -> u64 {
        self.state = PlaybackState::Paused;
        self.issued_seq += 1;
        self.processing = true;
        self.issued_seq
    }

    /// Resume wipes everything the last pause produced.
    fn resume(&mut self) {
        self.state = PlaybackState::Playing;
        self.products.clear();
        self.error_banner = None;
        self.processing = false;
    }

    /// Applies one finished cycle. Results that arrive after resume or
    /// behind a newer cycle are discarded, never rendered.
    pub fn apply_result(&mut self, result: CycleResult) {
        if self.state == PlaybackState::Playing {
            log::debug!("discarding cycle {} result after resume", result.seq);
            return;
        }
        if result.seq < self.issued_seq {
            log::debug!(
                "discarding stale cycle {} (latest issued is {})",
                result.seq,
                self.issued_seq
            );
            return;
        }

        self.processing = false;
        match result.outcome {
            Ok(products) => {
                log::info!("cycle {}: {} products detected", result.seq, products.len());
                self.products = products;
            }
            Err(err) => {
                log::warn!("cycle {} failed: {}", result.seq, err);
                self.products.clear();
                self.error_banner = Some(err.to_string());
            }
        }
    }
}

/// Event wiring between the player surface and the capture pipeline.
///
/// Pause starts a capture cycle; the detect round-trip runs on a spawned
/// task and its result comes back over the cycle channel, applied on the
/// next [`PlaybackController::pump`]. A round-trip is never cancelled; the
/// session's sequence guard keeps a slow early response from overwriting a
/// newer one.
pub struct PlaybackController<D: ProductDetector + 'static> {
    session: ViewerSession,
    detector: Arc<D>,
    jpeg_quality: u8,
    sink: CycleSink,
    pump: CyclePump,
}

impl<D: ProductDetector + 'static> PlaybackController<D> {
    pub fn new(detector: Arc<D>, jpeg_quality: u8) -> Self {
        let (sink, pump) = cycle_channels();
        Self {
            session: ViewerSession::default(),
            detector,
            jpeg_quality,
            sink,
            pump,
        }
    }

    pub fn session(&self) -> &ViewerSession {
        &self.session
    }

    pub fn dismiss_error(&mut self) {
        self.session.dismiss_error();
    }

    /// Feeds one media event through the state machine. Must run inside a
    /// tokio runtime so pause can spawn the detect task.
    pub fn handle_event(&mut self, event: PlayerEvent, source: &dyn FrameSource) {
        match event {
            PlayerEvent::Play => self.session.resume(),
            PlayerEvent::Pause => self.start_cycle(source),
            PlayerEvent::MediaLoaded { width, height } => {
                log::info!("media loaded at {}x{}", width, height);
                // fresh clip, fresh session
                self.session.resume();
            }
            PlayerEvent::MediaError(message) => {
                self.session.error_banner = Some(format!("failed to load media: {}", message));
            }
        }
    }

    fn start_cycle(&mut self, source: &dyn FrameSource) {
        let seq = self.session.begin_cycle();

        // Capture errors surface immediately, no round-trip issued.
        let frame = match capture::capture_frame(source, self.jpeg_quality) {
            Ok(frame) => frame,
            Err(err) => {
                self.session.apply_result(CycleResult {
                    seq,
                    outcome: Err(err),
                });
                return;
            }
        };

        let detector = Arc::clone(&self.detector);
        let res_tx = self.sink.res_tx.clone();
        tokio::spawn(async move {
            let outcome = detector.detect(&frame).await;
            if res_tx.send(CycleResult { seq, outcome }).is_err() {
                log::error!("cycle {}: result channel closed", seq);
            }
        });
    }

    /// Drains finished cycles into the session. Call from the event loop
    /// whenever the view refreshes.
    pub fn pump(&mut self) {
        while let Ok(result) = self.pump.res_rx.try_recv() {
            self.session.apply_result(result);
        }
    }
}
