use ab_glyph::{FontRef, PxScale};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_hollow_rect_mut, draw_text_mut};
use imageproc::rect::Rect;

use crate::common::{LensProduct, OverlayRect};

/// One interactive overlay rectangle: percentage geometry, hover label and
/// the shopping link a click opens in a new browsing context.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayBox {
    pub rect: OverlayRect,
    pub label: String,
    pub shop_url: String,
    pub confidence: f32,
}

impl OverlayBox {
    pub fn from_product(product: &LensProduct) -> Self {
        Self {
            rect: product.bbox.to_overlay(),
            label: product.label(),
            shop_url: product.shop_url.clone(),
            confidence: product.confidence,
        }
    }
}

/// What the viewer should show on top of the media element.
#[derive(Debug, Clone, PartialEq)]
pub enum OverlayView {
    /// Nothing to draw: no detections and no cycle in flight.
    Hidden,
    /// Indeterminate loading indicator while a cycle is in flight.
    Processing,
    Boxes(Vec<OverlayBox>),
}

pub fn overlay_view(products: &[LensProduct], processing: bool) -> OverlayView {
    if processing {
        return OverlayView::Processing;
    }
    if products.is_empty() {
        return OverlayView::Hidden;
    }
    OverlayView::Boxes(products.iter().map(OverlayBox::from_product).collect())
}

fn confidence_colour(confidence: f32) -> Rgb<u8> {
    if confidence >= 0.8 {
        Rgb([0, 255, 0])
    } else if confidence >= 0.5 {
        Rgb([255, 200, 0])
    } else {
        Rgb([255, 0, 0])
    }
}

/// Burns the overlay rectangles into `frame`, e.g. for a saved snapshot.
/// Labels are drawn when a font is supplied.
pub fn draw_overlays(frame: &mut RgbImage, boxes: &[OverlayBox], font: Option<&FontRef<'_>>) {
    let (img_w, img_h) = frame.dimensions();

    for overlay in boxes {
        let x = (overlay.rect.left_pct / 100. * img_w as f32).round() as i32;
        let y = (overlay.rect.top_pct / 100. * img_h as f32).round() as i32;
        let w = (overlay.rect.width_pct / 100. * img_w as f32).round().max(1.) as u32;
        let h = (overlay.rect.height_pct / 100. * img_h as f32).round().max(1.) as u32;

        let rect = Rect::at(x, y).of_size(w, h);
        let colour = confidence_colour(overlay.confidence);
        draw_hollow_rect_mut(frame, rect, colour);

        if let Some(font) = font {
            let height = 16.;
            let scale = PxScale {
                x: height,
                y: height,
            };
            draw_text_mut(frame, colour, x, y, scale, font, overlay.label.as_str());
        }
    }
}
