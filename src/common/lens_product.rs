use serde::{Deserialize, Serialize};

use crate::common::LensBox;

/// One product the service identified in a captured frame.
///
/// Created fresh per capture cycle; the playback controller discards the
/// whole list on the next pause cycle or when playback resumes.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LensProduct {
    pub id: String,
    pub name: String,
    pub category: String,
    /// Confidence score in 0.0-1.0 as reported by the service.
    pub confidence: f32,
    pub bbox: LensBox,
    /// Outbound shopping-search link, filled in by the mapper.
    #[serde(default)]
    pub shop_url: String,
}

impl LensProduct {
    pub fn new(id: String, name: String, category: String, confidence: f32, bbox: LensBox) -> Self {
        Self {
            id,
            name,
            category,
            confidence,
            bbox,
            shop_url: String::new(),
        }
    }

    pub fn with_confidence(mut self, confidence: f32) -> Self {
        self.confidence = confidence;
        self
    }

    pub fn with_category(mut self, category: &str) -> Self {
        self.category = category.to_string();
        self
    }

    pub fn with_shop_url(mut self, shop_url: String) -> Self {
        self.shop_url = shop_url;
        self
    }

    /// Hover label shown on the overlay rectangle.
    pub fn label(&self) -> String {
        format!("{} ({:.0}%)", self.name, self.confidence * 100.)
    }
}
