use image::{DynamicImage, GenericImageView};

use crate::common::LensFrame;
use crate::error::LensError;

/// Seam standing in for the playing media element: anything that can report
/// its intrinsic size and hand over the currently visible frame.
pub trait FrameSource {
    fn intrinsic_size(&self) -> (u32, u32);

    /// The current visible frame. A source may refuse pixel access, e.g.
    /// when the media was loaded from another origin.
    fn current_frame(&self) -> Result<DynamicImage, LensError>;
}

impl FrameSource for DynamicImage {
    fn intrinsic_size(&self) -> (u32, u32) {
        self.dimensions()
    }

    fn current_frame(&self) -> Result<DynamicImage, LensError> {
        Ok(self.clone())
    }
}

/// Reads the current frame out of `source` at its native resolution and
/// serializes it as JPEG at `jpeg_quality`, ready for submission.
///
/// Fails when the source reports a zero dimension or refuses pixel access;
/// neither case is retried.
pub fn capture_frame(source: &dyn FrameSource, jpeg_quality: u8) -> Result<LensFrame, LensError> {
    let (width, height) = source.intrinsic_size();
    if width == 0 || height == 0 {
        return Err(LensError::Capture(format!(
            "media reports invalid dimensions {}x{}",
            width, height
        )));
    }

    let image = source.current_frame()?;
    let frame = LensFrame::from_image(&image, jpeg_quality)?;

    log::debug!(
        "captured {}x{} frame, {} bytes of jpeg",
        frame.width,
        frame.height,
        frame.jpeg.len()
    );

    Ok(frame)
}
