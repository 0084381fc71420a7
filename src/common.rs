mod detector_config;
mod lens_box;
mod lens_frame;
mod lens_product;

pub use detector_config::*;
pub use lens_box::*;
pub use lens_frame::*;
pub use lens_product::*;
