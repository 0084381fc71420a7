mod media_file;
pub mod send_channels;

pub use media_file::*;
pub use send_channels::*;
