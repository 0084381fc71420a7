//! Pure mapping from wire detections to renderable products: named box
//! fields plus a generated outbound shopping-search link.

use serde_json::Value;
use url::form_urlencoded;

use crate::common::{LensBox, LensProduct};
use crate::detector::WireProduct;

/// Generic shopping search used when a category has no dedicated target.
pub const DEFAULT_SEARCH_URL: &str = "https://www.google.com/search?tbm=shop&q=";

fn shop_base_url(category: &str) -> &'static str {
    match category.to_lowercase().as_str() {
        "electronics" | "appliances" => "https://www.amazon.com/s?k=",
        "fashion" | "clothing" | "apparel" => "https://www.nordstrom.com/sr?keyword=",
        "home" | "furniture" | "decor" => "https://www.wayfair.com/keyword.php?keyword=",
        "beauty" | "cosmetics" => "https://www.sephora.com/search?keyword=",
        "sports" | "outdoors" => "https://www.rei.com/search?q=",
        _ => DEFAULT_SEARCH_URL,
    }
}

/// Builds the outbound link for one product: category-matched base URL
/// (case-insensitive) with the product name appended URL-encoded.
pub fn shop_search_url(category: &str, product_name: &str) -> String {
    let query: String = form_urlencoded::byte_serialize(product_name.as_bytes()).collect();
    format!("{}{}", shop_base_url(category), query)
}

/// Turns one wire product into a [`LensProduct`]. Returns `None` when the
/// entry carries no box; every other missing field defaults safely.
pub fn map_product(index: usize, wire: WireProduct) -> Option<LensProduct> {
    let bbox = LensBox::from_wire(wire.bbox?);

    let id = match wire.id {
        Some(Value::String(id)) => id,
        Some(other) => other.to_string(),
        None => format!("product-{}", index),
    };
    let name = wire.name.unwrap_or_else(|| "Unknown product".to_string());
    let category = wire.category.unwrap_or_default();
    let confidence = wire.confidence.unwrap_or(0.).clamp(0., 1.);

    let shop_url = shop_search_url(&category, &name);

    Some(
        LensProduct::new(id, name, category, confidence, bbox).with_shop_url(shop_url),
    )
}
