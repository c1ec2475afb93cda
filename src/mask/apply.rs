//! Alpha gating of an image by a mask.

use image::{Rgba, RgbaImage};

use crate::error::{Error, Result};

use super::{Mask, MASK_EMPTY, MASK_FILLED};

/// Fill for pixels outside the mask.
pub const TRANSPARENT_WHITE: Rgba<u8> = Rgba([255, 255, 255, 0]);

/// Gate `img` by `mask`.
///
/// Pixels with mask value 0 become [`TRANSPARENT_WHITE`]; pixels with value
/// 255 are copied unchanged. Partial values (soft edges) keep the color and
/// scale the source alpha by the coverage, so alpha never increases.
///
/// # Errors
///
/// Returns [`Error::ShapeMismatch`] if the mask and image sizes differ.
#[allow(clippy::cast_possible_truncation)]
pub fn apply_mask(img: &RgbaImage, mask: &Mask) -> Result<RgbaImage> {
    if img.dimensions() != mask.dimensions() {
        return Err(Error::ShapeMismatch {
            expected: format!("{}x{}", img.width(), img.height()),
            actual: format!("{}x{}", mask.width(), mask.height()),
        });
    }

    let gray = mask.as_gray();
    let mut out = img.clone();

    for (pixel, coverage) in out.pixels_mut().zip(gray.pixels()) {
        match coverage[0] {
            MASK_EMPTY => *pixel = TRANSPARENT_WHITE,
            MASK_FILLED => {}
            partial => {
                let alpha = u16::from(pixel[3]) * u16::from(partial);
                // Safe: alpha <= 255 * 254, so the rounded quotient fits in u8
                pixel[3] = ((alpha + 127) / 255) as u8;
            }
        }
    }

    Ok(out)
}
