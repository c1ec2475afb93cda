//! Icon masking pipeline: detect, mask, resize, save.

mod batch;
mod config;
mod masker;

pub use batch::{Batch, BatchSummary, FailurePolicy, Job, JobOutcome};
pub use config::{Config, Preset, Region};
pub use masker::{Masker, Report};
