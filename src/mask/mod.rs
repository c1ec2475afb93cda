//! Content detection and rounded-square alpha masking.
//!
//! The masking stages run in order:
//!
//! 1. [`detect_content_bounds`] finds the rectangle of non-background pixels.
//! 2. [`build_rounded_square_mask`] rasterizes a rounded rectangle over it.
//! 3. [`apply_mask`] clears every pixel the mask does not cover.

mod apply;
mod bounds;
mod shape;

pub use apply::{apply_mask, TRANSPARENT_WHITE};
pub use bounds::{detect_content_bounds, Bounds};
pub use shape::{build_rounded_square_mask, EdgeMode, Mask, MAX_SOFT_SAMPLES};

/// Mask value for fully covered pixels.
pub const MASK_FILLED: u8 = 255;

/// Mask value for pixels outside the shape.
pub const MASK_EMPTY: u8 = 0;
