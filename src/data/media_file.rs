use std::path::Path;

use crate::error::LensError;

/// Upload size cap. Anything above this is rejected before use.
pub const MAX_MEDIA_BYTES: u64 = 200 * 1024 * 1024;

/// Sample clip offered when the user supplies no file of their own.
pub const SAMPLE_MEDIA_URL: &str =
    "https://storage.googleapis.com/gtv-videos-bucket/sample/BigBuckBunny.mp4";

// Fallback list for containers mime_guess has no mapping for.
static VIDEO_EXTENSIONS: [&str; 8] = ["mp4", "m4v", "webm", "mov", "ogv", "ogg", "mkv", "avi"];

/// A user-supplied media file as reported by the picker, validated before
/// the viewer ever touches it.
#[derive(Debug, Clone)]
pub struct MediaFile {
    pub file_name: String,
    pub size_bytes: u64,
}

impl MediaFile {
    pub fn new(file_name: &str, size_bytes: u64) -> Self {
        Self {
            file_name: file_name.to_string(),
            size_bytes,
        }
    }

    pub fn size_mb(&self) -> f64 {
        self.size_bytes as f64 / (1024. * 1024.)
    }

    /// Client-side validation: empty files are always rejected first
    /// (regardless of extension), then the size cap, then the MIME check.
    pub fn validate(&self) -> Result<(), LensError> {
        if self.size_bytes == 0 {
            return Err(LensError::FileValidation(format!(
                "'{}' is empty (0 bytes)",
                self.file_name
            )));
        }

        if self.size_bytes > MAX_MEDIA_BYTES {
            return Err(LensError::FileValidation(format!(
                "'{}' is too large: {:.1} MB exceeds the {} MB limit",
                self.file_name,
                self.size_mb(),
                MAX_MEDIA_BYTES / (1024 * 1024)
            )));
        }

        if !self.is_video() {
            return Err(LensError::FileValidation(format!(
                "'{}' is not a supported video file",
                self.file_name
            )));
        }

        Ok(())
    }

    fn is_video(&self) -> bool {
        if let Some(mime) = mime_guess::from_path(&self.file_name).first() {
            if mime.type_() == mime_guess::mime::VIDEO {
                return true;
            }
        }

        match Path::new(&self.file_name).extension() {
            Some(ext) => {
                let ext = ext.to_string_lossy().to_lowercase();
                VIDEO_EXTENSIONS.contains(&ext.as_str())
            }
            None => false,
        }
    }
}
