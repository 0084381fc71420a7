use base64::{engine::general_purpose::STANDARD as B64, Engine as _};
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, GenericImageView};

use crate::error::LensError;

/// A captured still frame: native dimensions, the JPEG encoding at the
/// configured quality factor, and the base64 payload sent to the service.
#[derive(Debug, Clone)]
pub struct LensFrame {
    pub width: u32,
    pub height: u32,
    pub jpeg: Vec<u8>,
    pub base64: String,
}

impl LensFrame {
    /// Serializes `image` as JPEG at `quality` (1-100) and base64-encodes it.
    pub fn from_image(image: &DynamicImage, quality: u8) -> Result<Self, LensError> {
        let (width, height) = image.dimensions();

        let mut jpeg = Vec::new();
        let encoder = JpegEncoder::new_with_quality(&mut jpeg, quality);
        image.write_with_encoder(encoder)?;

        let base64 = B64.encode(&jpeg);

        Ok(Self {
            width,
            height,
            jpeg,
            base64,
        })
    }

    pub fn get_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}
