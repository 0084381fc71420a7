pub mod capture;
pub mod common;
pub mod data;
pub mod detector;
pub mod error;
pub mod mapper;
pub mod overlay;
pub mod playback;

use crate::capture::FrameSource;
use crate::common::{DetectorConfig, LensProduct};
use crate::detector::{DetectionClient, ProductDetector};

pub use crate::error::LensError;

pub type Result<T, E = LensError> = std::result::Result<T, E>;

pub fn init_detector(config: DetectorConfig) -> Result<DetectionClient> {
    log::info!("initializing detection client\n{}", config.describe());
    DetectionClient::new(config)
}

/// One capture cycle: extract the current frame from `source`, submit it to
/// the service and return the mapped products, ready for the overlay.
pub async fn run_capture_cycle(
    client: &DetectionClient,
    source: &dyn FrameSource,
) -> Result<Vec<LensProduct>> {
    let frame = capture::capture_frame(source, client.config().jpeg_quality)?;
    client.detect(&frame).await
}
