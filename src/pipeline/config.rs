//! Masking pipeline configuration.

use crate::error::{Error, Result};
use crate::image::{ResampleFilter, DEFAULT_ICON_SIZE};
use crate::mask::{EdgeMode, MAX_SOFT_SAMPLES};

/// Which rectangle the rounded-square mask covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Region {
    /// Bounding box of non-background pixels.
    ///
    /// Corner radius is a fraction of the image width.
    #[default]
    DetectContent,
    /// The whole canvas, no detection.
    ///
    /// Corner radius is a fraction of the shorter image side.
    FullCanvas,
}

/// Named parameter sets for common icon sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Preset {
    /// Icon on a white canvas: threshold 240, 2px margin, 22% radius.
    #[default]
    Standard,
    /// High resolution render: threshold 245, 1px margin, 22% radius.
    Large,
    /// Icon that already fills the canvas: 15% radius, no resize.
    FullCanvas,
}

/// Configuration for the icon masking pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Channel value below which a pixel counts as content (0-255).
    pub threshold: u8,

    /// Pixels trimmed from each side of the mask rectangle. Negative grows it.
    pub margin: i32,

    /// Corner radius as a fraction of the reference side (0.0-0.5).
    pub radius_ratio: f64,

    /// Rectangle the mask is built over.
    pub region: Region,

    /// Mask edge rasterization.
    pub edge: EdgeMode,

    /// Final output size. None keeps the source size.
    pub target_size: Option<(u32, u32)>,

    /// Filter used for the final resize.
    pub filter: ResampleFilter,

    /// Create missing output directories.
    pub create_dirs: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            threshold: 240,
            margin: 2,
            radius_ratio: 0.22,
            region: Region::DetectContent,
            edge: EdgeMode::Hard,
            target_size: Some((DEFAULT_ICON_SIZE, DEFAULT_ICON_SIZE)),
            filter: ResampleFilter::Lanczos3,
            create_dirs: false,
        }
    }
}

impl Preset {
    /// Expand the preset into a full configuration.
    #[must_use]
    pub fn config(self) -> Config {
        match self {
            Self::Standard => Config::default(),
            Self::Large => Config {
                threshold: 245,
                margin: 1,
                ..Config::default()
            },
            Self::FullCanvas => Config {
                margin: 0,
                radius_ratio: 0.15,
                region: Region::FullCanvas,
                target_size: None,
                ..Config::default()
            },
        }
    }
}

impl From<Preset> for Config {
    fn from(preset: Preset) -> Self {
        preset.config()
    }
}

impl Config {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any parameter is out of valid range.
    pub fn validate(&self) -> Result<()> {
        if !self.radius_ratio.is_finite() || !(0.0..=0.5).contains(&self.radius_ratio) {
            return Err(Error::InvalidParameter {
                name: "radius_ratio".to_string(),
                reason: "must be between 0.0 and 0.5".to_string(),
            });
        }

        if let EdgeMode::Soft { samples } = self.edge {
            if !(1..=MAX_SOFT_SAMPLES).contains(&samples) {
                return Err(Error::InvalidParameter {
                    name: "samples".to_string(),
                    reason: format!("must be between 1 and {MAX_SOFT_SAMPLES}"),
                });
            }
        }

        if let Some((width, height)) = self.target_size {
            if width == 0 || height == 0 {
                return Err(Error::InvalidParameter {
                    name: "target_size".to_string(),
                    reason: format!("{width}x{height} must be non-zero"),
                });
            }
        }

        Ok(())
    }

    /// Corner radius in pixels for a `width` x `height` source.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn radius_for(&self, width: u32, height: u32) -> u32 {
        let side = match self.region {
            Region::DetectContent => width,
            Region::FullCanvas => width.min(height),
        };
        // Safe: ratio is validated to [0, 0.5], so the product fits in u32
        (f64::from(side) * self.radius_ratio).floor() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(Config::default().validate().is_ok());
        for preset in [Preset::Standard, Preset::Large, Preset::FullCanvas] {
            assert!(preset.config().validate().is_ok(), "{preset:?}");
        }
    }

    #[test]
    fn test_presets() {
        let large = Config::from(Preset::Large);
        assert_eq!(large.threshold, 245);
        assert_eq!(large.margin, 1);
        assert_eq!(large.target_size, Some((1024, 1024)));

        let full = Config::from(Preset::FullCanvas);
        assert_eq!(full.region, Region::FullCanvas);
        assert_eq!(full.target_size, None);
        assert!((full.radius_ratio - 0.15).abs() < f64::EPSILON);
    }

    #[test]
    fn test_invalid_radius_ratio() {
        for ratio in [-0.1, 0.51, f64::NAN, f64::INFINITY] {
            let config = Config {
                radius_ratio: ratio,
                ..Config::default()
            };
            assert!(
                matches!(config.validate(), Err(Error::InvalidParameter { ref name, .. }) if name == "radius_ratio"),
                "{ratio}"
            );
        }
    }

    #[test]
    fn test_invalid_samples() {
        let config = Config {
            edge: EdgeMode::Soft { samples: 0 },
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_target() {
        let config = Config {
            target_size: Some((1024, 0)),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_radius_for() {
        let config = Config::default();
        assert_eq!(config.radius_for(1000, 500), 220);
        assert_eq!(config.radius_for(1023, 1023), 225);

        let full = Preset::FullCanvas.config();
        assert_eq!(full.radius_for(1000, 500), 75);
    }
}
