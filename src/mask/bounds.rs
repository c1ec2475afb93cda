//! Bounding box of non-background pixels.

use image::RgbaImage;

use crate::error::{Error, Result};

/// Inclusive pixel rectangle.
///
/// `right` and `bottom` are the last covered column and row, so a single
/// pixel at `(3, 7)` is `Bounds { left: 3, top: 7, right: 3, bottom: 7 }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bounds {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl Bounds {
    /// The whole canvas of a `width` x `height` image.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedDimensions`] for an empty canvas.
    pub fn full(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::UnsupportedDimensions {
                width,
                height,
                reason: "image has no pixels".to_string(),
            });
        }

        Ok(Self {
            left: 0,
            top: 0,
            right: width - 1,
            bottom: height - 1,
        })
    }

    /// Number of columns covered.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.right - self.left + 1
    }

    /// Number of rows covered.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.bottom - self.top + 1
    }

    /// Whether the pixel at `(x, y)` lies inside.
    #[must_use]
    pub const fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.left && x <= self.right && y >= self.top && y <= self.bottom
    }

    /// Shrink every side by `margin` pixels (grow for a negative margin).
    ///
    /// The result is clamped to a `width` x `height` canvas.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DegenerateMask`] if the margin leaves no pixel.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn inset(&self, margin: i32, width: u32, height: u32) -> Result<Self> {
        let m = i64::from(margin);
        let max_x = i64::from(width) - 1;
        let max_y = i64::from(height) - 1;

        let left = (i64::from(self.left) + m).clamp(0, max_x.max(0));
        let top = (i64::from(self.top) + m).clamp(0, max_y.max(0));
        let right = (i64::from(self.right) - m).min(max_x);
        let bottom = (i64::from(self.bottom) - m).min(max_y);

        if width == 0 || height == 0 || left > right || top > bottom {
            return Err(Error::DegenerateMask {
                margin,
                width: self.width(),
                height: self.height(),
            });
        }

        // Safe: all four values are within [0, dimension - 1]
        Ok(Self {
            left: left as u32,
            top: top as u32,
            right: right as u32,
            bottom: bottom as u32,
        })
    }
}

/// Find the smallest rectangle containing every content pixel.
///
/// A pixel counts as content when any of its red, green or blue channels is
/// below `threshold`. Alpha is not consulted, so a transparent pixel with a
/// dark color still counts.
///
/// # Errors
///
/// Returns [`Error::UnsupportedDimensions`] for an empty image and
/// [`Error::EmptyContentRegion`] when no pixel qualifies.
pub fn detect_content_bounds(img: &RgbaImage, threshold: u8) -> Result<Bounds> {
    let (width, height) = img.dimensions();
    if width == 0 || height == 0 {
        return Err(Error::UnsupportedDimensions {
            width,
            height,
            reason: "image has no pixels".to_string(),
        });
    }

    let mut found: Option<Bounds> = None;

    for (x, y, pixel) in img.enumerate_pixels() {
        let [r, g, b, _] = pixel.0;
        if r >= threshold && g >= threshold && b >= threshold {
            continue;
        }

        found = Some(match found {
            None => Bounds {
                left: x,
                top: y,
                right: x,
                bottom: y,
            },
            Some(bounds) => Bounds {
                left: bounds.left.min(x),
                top: bounds.top.min(y),
                right: bounds.right.max(x),
                bottom: bounds.bottom.max(y),
            },
        });
    }

    found.ok_or(Error::EmptyContentRegion { threshold })
}
