//! Image loading, resizing, and saving utilities.

mod load;
mod resize;
mod save;

pub use load::load_rgba;
pub use resize::{resize_to, ResampleFilter};
pub use save::save_png;

/// Default output edge length for app icons.
pub const DEFAULT_ICON_SIZE: u32 = 1024;
