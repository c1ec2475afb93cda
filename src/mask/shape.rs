//! Rounded-square mask rasterization.

use image::{GrayImage, Luma};

use crate::error::{Error, Result};

use super::{Bounds, MASK_EMPTY, MASK_FILLED};

/// Largest supersampling grid accepted for soft edges.
pub const MAX_SOFT_SAMPLES: u8 = 16;

/// How boundary pixels are rasterized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EdgeMode {
    /// Binary mask: a pixel is in when its center is in.
    #[default]
    Hard,
    /// Coverage from a `samples` x `samples` grid per pixel.
    Soft { samples: u8 },
}

/// Single-channel coverage mask, same size as the image it gates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask(GrayImage);

impl Mask {
    /// Mask width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.0.width()
    }

    /// Mask height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.0.height()
    }

    /// Mask dimensions as `(width, height)`.
    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        self.0.dimensions()
    }

    /// Coverage at `(x, y)`: 0 outside, 255 inside, 1-254 for partially
    /// covered pixels on a soft edge.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is out of bounds.
    #[must_use]
    pub fn value(&self, x: u32, y: u32) -> u8 {
        self.0.get_pixel(x, y)[0]
    }

    /// Number of pixels with non-zero coverage.
    #[must_use]
    pub fn covered(&self) -> usize {
        self.0.pixels().filter(|p| p[0] != MASK_EMPTY).count()
    }

    /// Borrow the underlying grayscale buffer.
    #[must_use]
    pub const fn as_gray(&self) -> &GrayImage {
        &self.0
    }

    /// Take the underlying grayscale buffer.
    #[must_use]
    pub fn into_gray(self) -> GrayImage {
        self.0
    }
}

/// Rounded rectangle in continuous pixel coordinates.
///
/// Pixel `(x, y)` covers `[x, x + 1) x [y, y + 1)`.
#[derive(Debug, Clone, Copy)]
struct RoundedRect {
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
    rx: f64,
    ry: f64,
}

impl RoundedRect {
    fn new(bounds: Bounds, radius: u32) -> Self {
        let x0 = f64::from(bounds.left);
        let y0 = f64::from(bounds.top);
        let w = f64::from(bounds.width());
        let h = f64::from(bounds.height());
        let r = f64::from(radius);

        // Once the corners meet, the shape becomes the inscribed ellipse.
        let (rx, ry) = if r * 2.0 >= w.min(h) {
            (w / 2.0, h / 2.0)
        } else {
            (r, r)
        };

        Self {
            x0,
            y0,
            x1: x0 + w,
            y1: y0 + h,
            rx,
            ry,
        }
    }

    #[allow(clippy::suboptimal_flops, clippy::float_cmp)]
    fn contains(&self, px: f64, py: f64) -> bool {
        if px < self.x0 || px >= self.x1 || py < self.y0 || py >= self.y1 {
            return false;
        }
        if self.rx == 0.0 || self.ry == 0.0 {
            return true;
        }

        // Nearest point of the inner rectangle spanned by the corner centers
        let cx = px.max(self.x0 + self.rx).min(self.x1 - self.rx);
        let cy = py.max(self.y0 + self.ry).min(self.y1 - self.ry);
        let dx = (px - cx) / self.rx;
        let dy = (py - cy) / self.ry;

        dx * dx + dy * dy <= 1.0
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn coverage(&self, x: u32, y: u32, samples: u8) -> u8 {
        let n = u32::from(samples);
        let step = 1.0 / f64::from(n);
        let (fx, fy) = (f64::from(x), f64::from(y));

        let mut inside = 0u32;
        for sy in 0..n {
            let py = (f64::from(sy) + 0.5).mul_add(step, fy);
            for sx in 0..n {
                let px = (f64::from(sx) + 0.5).mul_add(step, fx);
                if self.contains(px, py) {
                    inside += 1;
                }
            }
        }

        // Safe: inside <= n * n, so the rounded quotient is at most 255
        ((inside * 255 + n * n / 2) / (n * n)) as u8
    }
}

/// Build a mask for a rounded rectangle over `bounds` shrunk by `margin`.
///
/// Corners are quarter circles of `radius` pixels. When `radius` reaches half
/// of the shorter side the shape becomes the ellipse inscribed in the
/// rectangle; a radius of 0 gives a plain rectangle.
///
/// # Errors
///
/// Returns [`Error::UnsupportedDimensions`] for an empty canvas,
/// [`Error::DegenerateMask`] if the margin consumes the rectangle, and
/// [`Error::InvalidParameter`] for an out-of-range soft-edge sample count.
pub fn build_rounded_square_mask(
    width: u32,
    height: u32,
    radius: u32,
    bounds: Bounds,
    margin: i32,
    edge: EdgeMode,
) -> Result<Mask> {
    if width == 0 || height == 0 {
        return Err(Error::UnsupportedDimensions {
            width,
            height,
            reason: "mask has no pixels".to_string(),
        });
    }

    let samples = match edge {
        EdgeMode::Hard => None,
        EdgeMode::Soft { samples } if (1..=MAX_SOFT_SAMPLES).contains(&samples) => Some(samples),
        EdgeMode::Soft { .. } => {
            return Err(Error::InvalidParameter {
                name: "samples".to_string(),
                reason: format!("must be between 1 and {MAX_SOFT_SAMPLES}"),
            })
        }
    };

    let region = bounds.inset(margin, width, height)?;
    let shape = RoundedRect::new(region, radius);

    tracing::debug!("Mask region {region:?}, radius {radius}, edges {edge:?}");

    let mask = GrayImage::from_fn(width, height, |x, y| {
        let value = match samples {
            Some(n) => shape.coverage(x, y, n),
            None if shape.contains(f64::from(x) + 0.5, f64::from(y) + 0.5) => MASK_FILLED,
            None => MASK_EMPTY,
        };
        Luma([value])
    });

    Ok(Mask(mask))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(left: u32, top: u32, size: u32) -> Bounds {
        Bounds {
            left,
            top,
            right: left + size - 1,
            bottom: top + size - 1,
        }
    }

    #[test]
    fn test_zero_radius_is_rectangle() {
        let bounds = Bounds {
            left: 5,
            top: 8,
            right: 30,
            bottom: 20,
        };
        let mask = build_rounded_square_mask(40, 30, 0, bounds, 0, EdgeMode::Hard).unwrap();

        for y in 0..30 {
            for x in 0..40 {
                let expected = if bounds.contains(x, y) { 255 } else { 0 };
                assert_eq!(mask.value(x, y), expected, "pixel ({x}, {y})");
            }
        }
    }

    #[test]
    #[allow(clippy::suboptimal_flops)]
    fn test_large_radius_is_inscribed_ellipse() {
        let bounds = Bounds {
            left: 10,
            top: 20,
            right: 69,
            bottom: 59,
        };
        let mask = build_rounded_square_mask(80, 80, 20, bounds, 0, EdgeMode::Hard).unwrap();

        let (w, h) = (60.0_f64, 40.0_f64);
        let (cx, cy) = (10.0 + w / 2.0, 20.0 + h / 2.0);
        for y in 0..80 {
            for x in 0..80 {
                let dx = (f64::from(x) + 0.5 - cx) / (w / 2.0);
                let dy = (f64::from(y) + 0.5 - cy) / (h / 2.0);
                let inside = dx * dx + dy * dy <= 1.0;
                assert_eq!(mask.value(x, y) == 255, inside, "pixel ({x}, {y})");
            }
        }
    }

    #[test]
    fn test_oversized_radius_matches_half_side() {
        let bounds = square(0, 0, 50);
        let a = build_rounded_square_mask(50, 50, 25, bounds, 0, EdgeMode::Hard).unwrap();
        let b = build_rounded_square_mask(50, 50, 500, bounds, 0, EdgeMode::Hard).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_corners_clipped_edges_kept() {
        let bounds = square(0, 0, 100);
        let mask = build_rounded_square_mask(100, 100, 22, bounds, 0, EdgeMode::Hard).unwrap();

        for (x, y) in [(0, 0), (99, 0), (0, 99), (99, 99), (3, 3)] {
            assert_eq!(mask.value(x, y), 0, "corner ({x}, {y})");
        }
        for (x, y) in [(50, 0), (0, 50), (99, 50), (50, 99), (50, 50), (22, 22)] {
            assert_eq!(mask.value(x, y), 255, "edge ({x}, {y})");
        }
    }

    #[test]
    fn test_symmetry() {
        let bounds = square(4, 4, 57);
        let mask = build_rounded_square_mask(65, 65, 13, bounds, 0, EdgeMode::Hard).unwrap();

        for y in 0..65 {
            for x in 0..65 {
                assert_eq!(mask.value(x, y), mask.value(64 - x, y));
                assert_eq!(mask.value(x, y), mask.value(x, 64 - y));
                assert_eq!(mask.value(x, y), mask.value(y, x));
            }
        }
    }

    #[test]
    fn test_margin_shrinks_region() {
        let bounds = square(10, 10, 40);
        let mask = build_rounded_square_mask(60, 60, 0, bounds, 3, EdgeMode::Hard).unwrap();

        assert_eq!(mask.value(12, 30), 0);
        assert_eq!(mask.value(13, 30), 255);
        assert_eq!(mask.value(46, 30), 255);
        assert_eq!(mask.value(47, 30), 0);
        assert_eq!(mask.covered(), 34 * 34);
    }

    #[test]
    fn test_margin_collapse() {
        let bounds = square(10, 10, 4);
        assert!(matches!(
            build_rounded_square_mask(20, 20, 0, bounds, 2, EdgeMode::Hard),
            Err(Error::DegenerateMask { .. })
        ));
    }

    #[test]
    fn test_soft_single_sample_matches_hard() {
        let bounds = square(2, 2, 60);
        let hard = build_rounded_square_mask(64, 64, 14, bounds, 0, EdgeMode::Hard).unwrap();
        let soft =
            build_rounded_square_mask(64, 64, 14, bounds, 0, EdgeMode::Soft { samples: 1 })
                .unwrap();
        assert_eq!(hard, soft);
    }

    #[test]
    fn test_soft_edges_are_partial() {
        let bounds = square(0, 0, 100);
        let hard = build_rounded_square_mask(100, 100, 30, bounds, 0, EdgeMode::Hard).unwrap();
        let soft =
            build_rounded_square_mask(100, 100, 30, bounds, 0, EdgeMode::Soft { samples: 4 })
                .unwrap();

        let mut partial = 0;
        for y in 0..100 {
            for x in 0..100 {
                match soft.value(x, y) {
                    255 => assert_eq!(hard.value(x, y), 255, "pixel ({x}, {y})"),
                    0 => assert_eq!(hard.value(x, y), 0, "pixel ({x}, {y})"),
                    _ => partial += 1,
                }
            }
        }
        assert!(partial > 0);
        assert_eq!(soft.value(50, 50), 255);
        assert_eq!(soft.value(0, 0), 0);
    }

    #[test]
    fn test_soft_sample_range() {
        let bounds = square(0, 0, 10);
        for samples in [0, MAX_SOFT_SAMPLES + 1] {
            assert!(matches!(
                build_rounded_square_mask(10, 10, 2, bounds, 0, EdgeMode::Soft { samples }),
                Err(Error::InvalidParameter { .. })
            ));
        }
    }
}
