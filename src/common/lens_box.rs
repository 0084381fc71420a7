use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box on the service's fixed 0-1000 scale,
/// independent of the source frame resolution.
///
/// `ymin <= ymax` and `xmin <= xmax` are assumed from trusted service
/// output and not enforced here.
#[derive(Default, Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct LensBox {
    pub ymin: f32,
    pub xmin: f32,
    pub ymax: f32,
    pub xmax: f32,
}

/// Overlay geometry in percent of the media element, ready for
/// percentage-offset positioning. Derived from a [`LensBox`] by dividing
/// each normalized coordinate by 10 (0-1000 -> 0-100%).
#[derive(Default, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverlayRect {
    pub top_pct: f32,
    pub left_pct: f32,
    pub width_pct: f32,
    pub height_pct: f32,
}

impl LensBox {
    pub fn new(ymin: f32, xmin: f32, ymax: f32, xmax: f32) -> Self {
        Self {
            ymin,
            xmin,
            ymax,
            xmax,
        }
    }

    /// Builds a box from the service's 4-element `[ymin, xmin, ymax, xmax]`
    /// wire encoding.
    pub fn from_wire(coords: [f32; 4]) -> Self {
        let [ymin, xmin, ymax, xmax] = coords;
        Self::new(ymin, xmin, ymax, xmax)
    }

    /// Returns the width of the bounding box on the 0-1000 scale.
    pub fn width(&self) -> f32 {
        self.xmax - self.xmin
    }

    /// Returns the height of the bounding box on the 0-1000 scale.
    pub fn height(&self) -> f32 {
        self.ymax - self.ymin
    }

    /// Returns the center coordinates of the bounding box as `(cx, cy)`.
    pub fn center(&self) -> (f32, f32) {
        (
            self.xmin + self.width() / 2.,
            self.ymin + self.height() / 2.,
        )
    }

    /// Converts the 0-1000 box into percentage overlay geometry.
    pub fn to_overlay(&self) -> OverlayRect {
        OverlayRect {
            top_pct: self.ymin / 10.,
            left_pct: self.xmin / 10.,
            width_pct: self.width() / 10.,
            height_pct: self.height() / 10.,
        }
    }
}
