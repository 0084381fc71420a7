use std::env;

/// Environment variable consulted for the service key when none is set
/// explicitly.
pub const API_KEY_ENV: &str = "SHOPLENS_API_KEY";

/// Default detection endpoint. Override with [`DetectorConfig::with_api_url`]
/// when pointing at a proxy or a self-hosted gateway.
pub const DEFAULT_API_URL: &str = "https://vision.lensapi.dev/v1/products:detect";

pub const DEFAULT_MODEL: &str = "lens-vision-1";

/// JPEG quality factor used when serializing captured frames.
pub const DEFAULT_JPEG_QUALITY: u8 = 80;

#[derive(Debug, Clone)]
pub struct DetectorConfig {
    pub api_url: String,
    pub api_key: String,
    pub model: String,
    pub jpeg_quality: u8,
    pub timeout_secs: u64,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: env::var(API_KEY_ENV).unwrap_or_default(),
            model: DEFAULT_MODEL.to_string(),
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            timeout_secs: 30,
        }
    }
}

impl DetectorConfig {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_api_url(mut self, api_url: &str) -> Self {
        self.api_url = api_url.to_string();
        self
    }

    pub fn with_api_key(mut self, api_key: &str) -> Self {
        self.api_key = api_key.to_string();
        self
    }

    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    pub fn with_jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = quality.clamp(1, 100);
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Loggable summary. The key itself is never printed.
    pub fn describe(&self) -> String {
        format!(
            "Detection Endpoint: {}\n\
            Model: {}\n\
            API Key: {}\n\
            JPEG Quality: {}\n\
            Request Timeout: {}s",
            self.api_url,
            self.model,
            if self.api_key.trim().is_empty() { "unset" } else { "set" },
            self.jpeg_quality,
            self.timeout_secs
        )
    }
}
