//! Image saving utilities.

use std::path::Path;

use image::{ImageFormat, RgbaImage};

use crate::error::{Error, Result};

/// Save an RGBA image as PNG.
///
/// The output is always PNG regardless of the path's extension, so the alpha
/// channel survives. When `create_dirs` is set, missing parent directories are
/// created first.
///
/// # Errors
///
/// Returns [`Error::CreateDir`] if the parent directory cannot be created, or
/// [`Error::ImageSave`] if the file cannot be written.
pub fn save_png<P: AsRef<Path>>(img: &RgbaImage, path: P, create_dirs: bool) -> Result<()> {
    let path = path.as_ref();

    if create_dirs {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| Error::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }

    img.save_with_format(path, ImageFormat::Png)
        .map_err(|source| Error::ImageSave {
            path: path.to_path_buf(),
            source,
        })?;

    tracing::debug!("Wrote {} ({}x{})", path.display(), img.width(), img.height());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use image::Rgba;

    #[test]
    fn test_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.png");
        let img = RgbaImage::new(4, 4);

        let err = save_png(&img, &path, false).unwrap_err();
        assert!(matches!(err, Error::ImageSave { .. }));
    }

    #[test]
    fn test_create_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a").join("b").join("out.png");
        let img = RgbaImage::from_pixel(4, 4, Rgba([1, 2, 3, 4]));

        save_png(&img, &path, true).unwrap();

        let back = image::open(&path).unwrap().to_rgba8();
        assert_eq!(back, img);
    }

    #[test]
    fn test_create_dirs_blocked_by_file() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"not a directory").unwrap();
        let path = blocker.join("sub").join("out.png");
        let img = RgbaImage::new(4, 4);

        let err = save_png(&img, &path, true).unwrap_err();
        match err {
            Error::CreateDir { ref path, .. } => assert_eq!(path, &blocker.join("sub")),
            ref other => panic!("unexpected error: {other}"),
        }
        assert!(err.to_string().contains("blocker"));
    }

    #[test]
    fn test_png_regardless_of_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("icon.jpg");
        let img = RgbaImage::from_pixel(2, 2, Rgba([9, 9, 9, 0]));

        save_png(&img, &path, false).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(image::guess_format(&bytes).unwrap(), ImageFormat::Png);
    }
}
