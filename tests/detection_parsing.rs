use image::DynamicImage;
use shoplens::common::{DetectorConfig, LensFrame};
use shoplens::detector::{self, DetectionClient, ProductDetector};
use shoplens::LensError;

const GOOD_PAYLOAD: &str = r#"{"products": [
    {"id": "p1", "name": "Red Sneakers", "category": "Fashion",
     "box": [100, 200, 400, 600], "confidence": 0.92},
    {"id": 7, "name": "Desk Lamp", "category": "Home",
     "box": [50, 50, 300, 250], "confidence": 0.61}
]}"#;

#[test]
fn well_formed_payload_parses() {
    let products = detector::parse_detection_payload(GOOD_PAYLOAD).unwrap();
    assert_eq!(products.len(), 2);

    let first = &products[0];
    assert_eq!(first.id, "p1");
    assert_eq!(first.name, "Red Sneakers");
    assert_eq!(first.bbox.ymin, 100.);
    assert_eq!(first.bbox.xmin, 200.);
    assert_eq!(first.bbox.ymax, 400.);
    assert_eq!(first.bbox.xmax, 600.);
    assert!(first.shop_url.starts_with("https://www.nordstrom.com/"));
    assert!(first.shop_url.ends_with("Red+Sneakers"));

    // numeric ids are stringified
    assert_eq!(products[1].id, "7");
}

#[test]
fn fenced_payload_parses() {
    let fenced = format!("```json\n{}\n```", GOOD_PAYLOAD);
    let products = detector::parse_detection_payload(&fenced).unwrap();
    assert_eq!(products.len(), 2);
}

#[test]
fn bare_array_payload_parses() {
    let raw = r#"[{"id": "a", "name": "Mug", "category": "Home",
                   "box": [0, 0, 100, 100], "confidence": 0.5}]"#;
    let products = detector::parse_detection_payload(raw).unwrap();
    assert_eq!(products.len(), 1);
}

#[test]
fn malformed_json_degrades_to_zero_detections() {
    let products = detector::parse_detection_payload("the model rambled instead").unwrap();
    assert!(products.is_empty());
}

#[test]
fn missing_products_field_degrades_to_zero_detections() {
    assert!(detector::parse_detection_payload("{}").unwrap().is_empty());
    assert!(detector::parse_detection_payload(r#"{"products": "nope"}"#)
        .unwrap()
        .is_empty());
    assert!(detector::parse_detection_payload("42").unwrap().is_empty());
}

#[test]
fn entirely_empty_response_is_fatal() {
    assert!(matches!(
        detector::parse_detection_payload(""),
        Err(LensError::EmptyResponse)
    ));
    assert!(matches!(
        detector::parse_detection_payload("   \n"),
        Err(LensError::EmptyResponse)
    ));
}

#[test]
fn partially_malformed_entries_are_skipped() {
    let raw = r#"{"products": [
        {"id": "no-box", "name": "Ghost", "category": "Home", "confidence": 0.9},
        {"box": [10, 10, 20, 20], "confidence": 1.7}
    ]}"#;
    let products = detector::parse_detection_payload(raw).unwrap();

    // entry without a box is dropped, the other gets safe defaults
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].name, "Unknown product");
    assert_eq!(products[0].id, "product-1");
    assert_eq!(products[0].confidence, 1.0);
}

#[tokio::test]
async fn missing_api_key_is_an_auth_error() {
    let client = DetectionClient::new(DetectorConfig::new().with_api_key("")).unwrap();
    let frame = LensFrame::from_image(&DynamicImage::new_rgb8(8, 8), 80).unwrap();

    match client.detect(&frame).await {
        Err(LensError::Auth(msg)) => assert!(msg.contains("API key")),
        other => panic!("expected auth error, got {:?}", other.map(|p| p.len())),
    }
}
