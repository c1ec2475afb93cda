//! Image loading utilities.

use std::io::ErrorKind;
use std::path::Path;

use image::{ImageError, RgbaImage};

use crate::error::{Error, Result};

/// Load an image from disk and convert it to 8-bit RGBA.
///
/// Any format the `image` crate can decode is accepted; palette, grayscale
/// and 16-bit sources are widened or narrowed to RGBA8.
///
/// # Errors
///
/// Returns [`Error::FileNotFound`] if the path does not exist, or
/// [`Error::ImageLoad`] if the file cannot be read or decoded.
pub fn load_rgba<P: AsRef<Path>>(path: P) -> Result<RgbaImage> {
    let path = path.as_ref();

    let img = image::open(path).map_err(|source| match source {
        ImageError::IoError(ref err) if err.kind() == ErrorKind::NotFound => Error::FileNotFound {
            path: path.to_path_buf(),
        },
        source => Error::ImageLoad {
            path: path.to_path_buf(),
            source,
        },
    })?;

    tracing::debug!(
        "Loaded {} ({}x{}, {:?})",
        path.display(),
        img.width(),
        img.height(),
        img.color()
    );

    Ok(img.to_rgba8())
}

#[cfg(test)]
mod tests {
    use super::*;

    use image::{DynamicImage, Rgb, RgbImage};

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.png");

        let err = load_rgba(&path).unwrap_err();
        assert!(matches!(err, Error::FileNotFound { path: p } if p == path));
    }

    #[test]
    fn test_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"definitely not a png").unwrap();

        let err = load_rgba(&path).unwrap_err();
        assert!(matches!(err, Error::ImageLoad { .. }));
    }

    #[test]
    fn test_rgb_gets_opaque_alpha() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rgb.png");
        let rgb = RgbImage::from_pixel(3, 2, Rgb([10, 20, 30]));
        DynamicImage::ImageRgb8(rgb).save(&path).unwrap();

        let img = load_rgba(&path).unwrap();
        assert_eq!(img.dimensions(), (3, 2));
        assert!(img.pixels().all(|p| p.0 == [10, 20, 30, 255]));
    }
}
