//! Single-image masking pipeline.

use std::fmt;
use std::path::Path;

use ::image::RgbaImage;

use crate::error::Result;
use crate::image;
use crate::mask::{self, Bounds};

use super::{Config, Region};

/// What a pipeline run did to one image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Report {
    /// Source dimensions.
    pub source: (u32, u32),
    /// Rectangle the mask was built over, before the margin.
    pub bounds: Bounds,
    /// Corner radius in source pixels.
    pub radius: u32,
    /// Pixels with non-zero mask coverage.
    pub covered: usize,
    /// Output dimensions.
    pub output: (u32, u32),
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}x{} -> {}x{}, content ({}, {})-({}, {}), radius {}",
            self.source.0,
            self.source.1,
            self.output.0,
            self.output.1,
            self.bounds.left,
            self.bounds.top,
            self.bounds.right,
            self.bounds.bottom,
            self.radius
        )
    }
}

/// Clips icons to a rounded square with a transparent surround.
#[derive(Debug, Clone)]
pub struct Masker {
    config: Config,
}

impl Masker {
    /// Create a masker with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        tracing::debug!("Masker config: {config:?}");

        Ok(Self { config })
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Load `input_path`, mask and resize it, and write PNG to `output_path`.
    ///
    /// # Errors
    ///
    /// Returns an error if loading, any masking stage, or saving fails.
    pub fn process<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_path: P,
        output_path: Q,
    ) -> Result<Report> {
        let input_path = input_path.as_ref();
        let output_path = output_path.as_ref();

        tracing::info!("Processing image: {}", input_path.display());
        let source = image::load_rgba(input_path)?;

        let (output, report) = self.run(&source)?;

        tracing::info!("Saving output to: {}", output_path.display());
        image::save_png(&output, output_path, self.config.create_dirs)?;

        Ok(report)
    }

    /// Run the in-memory stages on an already loaded image.
    ///
    /// # Errors
    ///
    /// Returns an error if no content is found, the margin collapses the
    /// region, or the image is empty.
    pub fn process_image(&self, source: &RgbaImage) -> Result<RgbaImage> {
        self.run(source).map(|(output, _)| output)
    }

    fn run(&self, source: &RgbaImage) -> Result<(RgbaImage, Report)> {
        let (width, height) = source.dimensions();

        let bounds = match self.config.region {
            Region::DetectContent => mask::detect_content_bounds(source, self.config.threshold)?,
            Region::FullCanvas => Bounds::full(width, height)?,
        };
        let radius = self.config.radius_for(width, height);
        tracing::debug!("Content bounds {bounds:?}, corner radius {radius}px");

        let mask = mask::build_rounded_square_mask(
            width,
            height,
            radius,
            bounds,
            self.config.margin,
            self.config.edge,
        )?;
        let masked = mask::apply_mask(source, &mask)?;

        let output = match self.config.target_size {
            Some((w, h)) => image::resize_to(&masked, w, h, self.config.filter)?,
            None => masked,
        };

        let report = Report {
            source: (width, height),
            bounds,
            radius,
            covered: mask.covered(),
            output: output.dimensions(),
        };

        Ok((output, report))
    }
}
