//! Custom error types for iconmask.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the iconmask library.
#[derive(Error, Debug)]
pub enum Error {
    /// The input path does not exist.
    #[error("input file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read or decode an image file.
    #[error("failed to load image from {path}: {source}")]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Failed to encode or write an image file.
    #[error("failed to save image to {path}: {source}")]
    ImageSave {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// No pixel is darker than the background threshold.
    #[error("no content found: every pixel has all channels at or above {threshold}")]
    EmptyContentRegion { threshold: u8 },

    /// The margin removes the whole content rectangle.
    #[error("margin {margin} collapses the {width}x{height} content region")]
    DegenerateMask { margin: i32, width: u32, height: u32 },

    /// Failed to create an output directory.
    #[error("failed to create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Image dimensions are not supported.
    #[error("unsupported image dimensions {width}x{height}: {reason}")]
    UnsupportedDimensions {
        width: u32,
        height: u32,
        reason: String,
    },

    /// Invalid parameter value.
    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter { name: String, reason: String },

    /// Image and mask sizes disagree.
    #[error("mask shape mismatch: expected {expected}, got {actual}")]
    ShapeMismatch { expected: String, actual: String },

    /// A single batch job failed.
    #[error("{path}: {source}")]
    Job {
        path: PathBuf,
        #[source]
        source: Box<Error>,
    },

    /// One or more batch jobs failed.
    #[error("{failed} of {total} images failed")]
    Batch { failed: usize, total: usize },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for iconmask operations.
pub type Result<T> = std::result::Result<T, Error>;
