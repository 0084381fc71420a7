use thiserror::Error;

/// Error classes surfaced to the viewer. None of these are fatal to the
/// session; the playback controller turns them into a dismissible banner.
#[derive(Error, Debug)]
pub enum LensError {
    #[error("invalid media file: {0}")]
    FileValidation(String),

    #[error("frame capture failed: {0}")]
    Capture(String),

    #[error("detection service error: {0}")]
    Detection(String),

    #[error("detection service authentication failed: {0}")]
    Auth(String),

    #[error("detection service returned an empty response")]
    EmptyResponse,
}

impl From<image::ImageError> for LensError {
    fn from(err: image::ImageError) -> Self {
        LensError::Capture(err.to_string())
    }
}
