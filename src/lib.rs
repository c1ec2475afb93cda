//! # iconmask
//!
//! Clip app icons to a rounded-square silhouette with a transparent surround.
//!
//! Icon renders usually arrive as a rounded square floating on a white canvas.
//! This library finds the non-white content, rasterizes a rounded rectangle
//! over it, makes everything outside fully transparent, and resizes the result
//! to the final icon resolution (1024x1024 by default).
//!
//! ## Example
//!
//! ```no_run
//! use iconmask::{Config, Masker};
//!
//! # fn main() -> iconmask::Result<()> {
//! let masker = Masker::new(Config::default())?;
//!
//! let report = masker.process("raw_logo.png", "logo.png")?;
//! println!("{report}");
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod image;
pub mod mask;
pub mod pipeline;

pub use error::{Error, Result};
pub use pipeline::{Batch, Config, FailurePolicy, Job, Masker, Preset, Region, Report};
