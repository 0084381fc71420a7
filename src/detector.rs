use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::{Duration, Instant};

use crate::common::{DetectorConfig, LensFrame, LensProduct};
use crate::error::LensError;
use crate::mapper;

/// Fixed instruction submitted with every frame. The service is told to
/// answer with JSON only, matching the schema the parser below enforces.
pub const DETECT_INSTRUCTION: &str = "You are a product detection service for shoppable video. \
Identify every purchasable product visible in the supplied frame. Respond with JSON only, no prose: \
{\"products\": [{\"id\": string, \"name\": string, \"category\": string, \
\"box\": [ymin, xmin, ymax, xmax] on a 0-1000 scale, \"confidence\": number between 0 and 1}]}";

/// Boundary the playback controller drives. Lets tests stand in a double
/// for the real HTTP client.
#[async_trait]
pub trait ProductDetector: Send + Sync {
    async fn detect(&self, frame: &LensFrame) -> Result<Vec<LensProduct>, LensError>;
}

/// One product as it appears on the wire, before mapping. Every field is
/// optional so a partially malformed entry can be skipped on its own.
#[derive(Debug, Clone, Deserialize)]
pub struct WireProduct {
    pub id: Option<Value>,
    pub name: Option<String>,
    pub category: Option<String>,
    #[serde(rename = "box", alias = "box_2d")]
    pub bbox: Option<[f32; 4]>,
    pub confidence: Option<f32>,
}

#[derive(Serialize)]
struct DetectRequest<'a> {
    model: &'a str,
    instructions: &'a str,
    image: ImagePayload<'a>,
}

#[derive(Serialize)]
struct ImagePayload<'a> {
    mime_type: &'a str,
    data: &'a str,
}

pub struct DetectionClient {
    http: reqwest::Client,
    config: DetectorConfig,
}

impl DetectionClient {
    pub fn new(config: DetectorConfig) -> Result<Self, LensError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| LensError::Detection(format!("failed to build http client: {}", e)))?;

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }
}

#[async_trait]
impl ProductDetector for DetectionClient {
    async fn detect(&self, frame: &LensFrame) -> Result<Vec<LensProduct>, LensError> {
        if self.config.api_key.trim().is_empty() {
            return Err(LensError::Auth(format!(
                "no API key configured, set {} or use with_api_key",
                crate::common::API_KEY_ENV
            )));
        }

        let request = DetectRequest {
            model: &self.config.model,
            instructions: DETECT_INSTRUCTION,
            image: ImagePayload {
                mime_type: "image/jpeg",
                data: &frame.base64,
            },
        };

        let now = Instant::now();
        log::info!(
            "submitting {}x{} frame to {}",
            frame.width,
            frame.height,
            self.config.api_url
        );

        let response = self
            .http
            .post(&self.config.api_url)
            .header("x-api-key", &self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| LensError::Detection(format!("request failed: {}", e)))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(LensError::Auth(format!(
                "service rejected the API key ({})",
                status
            )));
        }
        if !status.is_success() {
            return Err(LensError::Detection(format!("service returned {}", status)));
        }

        let raw = response
            .text()
            .await
            .map_err(|e| LensError::Detection(format!("failed to read response body: {}", e)))?;

        let products = parse_detection_payload(&raw)?;
        log::info!(
            "detection round-trip took {:.2?}, {} products",
            now.elapsed(),
            products.len()
        );

        Ok(products)
    }
}

/// Lenient decode of the service payload. Malformed JSON or a missing
/// products array degrades to zero detections; only an entirely empty raw
/// body is fatal for the call.
pub fn parse_detection_payload(raw: &str) -> Result<Vec<LensProduct>, LensError> {
    if raw.trim().is_empty() {
        return Err(LensError::EmptyResponse);
    }

    let body = strip_code_fence(raw);
    let value: Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(e) => {
            log::warn!("detection payload is not valid JSON ({}), treating as zero detections", e);
            return Ok(Vec::new());
        }
    };

    let items: Vec<Value> = match &value {
        // some services answer with a bare array
        Value::Array(items) => items.clone(),
        Value::Object(map) => match map.get("products") {
            Some(Value::Array(items)) => items.clone(),
            _ => {
                log::warn!("detection payload has no products array, treating as zero detections");
                Vec::new()
            }
        },
        _ => {
            log::warn!("unexpected detection payload shape, treating as zero detections");
            Vec::new()
        }
    };

    let mut products = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        match serde_json::from_value::<WireProduct>(item) {
            Ok(wire) => match mapper::map_product(index, wire) {
                Some(product) => products.push(product),
                None => log::warn!("skipping product #{} with no usable box", index),
            },
            Err(e) => log::warn!("skipping malformed product #{}: {}", index, e),
        }
    }

    Ok(products)
}

// Multimodal services routinely wrap their JSON in a markdown code fence.
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    if let Some(rest) = trimmed.strip_prefix("```") {
        let rest = rest.strip_prefix("json").unwrap_or(rest);
        if let Some(end) = rest.rfind("```") {
            return rest[..end].trim();
        }
        return rest.trim();
    }
    trimmed
}
