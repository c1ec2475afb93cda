//! Resampling to the output resolution.

use image::imageops::{self, FilterType};
use image::RgbaImage;

use crate::error::{Error, Result};

/// Resampling filter used for the final resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResampleFilter {
    /// Nearest neighbor.
    Nearest,
    /// Linear (bilinear) filter.
    Triangle,
    /// Cubic filter.
    CatmullRom,
    /// Gaussian filter.
    Gaussian,
    /// Windowed sinc with a = 3.
    #[default]
    Lanczos3,
}

impl From<ResampleFilter> for FilterType {
    fn from(filter: ResampleFilter) -> Self {
        match filter {
            ResampleFilter::Nearest => Self::Nearest,
            ResampleFilter::Triangle => Self::Triangle,
            ResampleFilter::CatmullRom => Self::CatmullRom,
            ResampleFilter::Gaussian => Self::Gaussian,
            ResampleFilter::Lanczos3 => Self::Lanczos3,
        }
    }
}

/// Resize an image to exactly `width` x `height`.
///
/// Aspect ratio is not preserved. If the image already has the target size
/// it is returned as-is, without a resampling pass.
///
/// # Errors
///
/// Returns [`Error::UnsupportedDimensions`] if either target dimension or
/// either source dimension is zero.
pub fn resize_to(
    img: &RgbaImage,
    width: u32,
    height: u32,
    filter: ResampleFilter,
) -> Result<RgbaImage> {
    if width == 0 || height == 0 {
        return Err(Error::UnsupportedDimensions {
            width,
            height,
            reason: "target size must be non-zero".to_string(),
        });
    }

    if img.width() == 0 || img.height() == 0 {
        return Err(Error::UnsupportedDimensions {
            width: img.width(),
            height: img.height(),
            reason: "cannot resample an empty image".to_string(),
        });
    }

    if img.dimensions() == (width, height) {
        return Ok(img.clone());
    }

    tracing::debug!(
        "Resizing {}x{} -> {width}x{height} with {filter:?}",
        img.width(),
        img.height()
    );

    Ok(imageops::resize(img, width, height, filter.into()))
}
