//! iconmask CLI - clip app icons to a rounded square with a transparent background.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{error::ErrorKind, CommandFactory, Parser, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use iconmask::image::ResampleFilter;
use iconmask::mask::EdgeMode;
use iconmask::{Batch, Config, FailurePolicy, Job, Masker, Preset, Region};

/// Clip app icons to a rounded square with a transparent background.
#[derive(Parser, Debug)]
#[command(name = "iconmask")]
#[command(version, about, long_about = None)]
struct Args {
    /// Input and output image paths, in pairs.
    #[arg(value_name = "INPUT OUTPUT", num_args = 2.., required = true)]
    paths: Vec<PathBuf>,

    /// Parameter preset. Explicit options below override it.
    #[arg(short, long, value_enum, default_value_t = PresetArg::Standard)]
    preset: PresetArg,

    /// Channel value below which a pixel counts as icon content (0-255).
    #[arg(short, long, value_name = "INT")]
    threshold: Option<u8>,

    /// Pixels trimmed from each side of the detected content. Negative grows it.
    #[arg(short, long, value_name = "INT", allow_hyphen_values = true)]
    margin: Option<i32>,

    /// Corner radius as a fraction of the image width (0.0-0.5).
    #[arg(short, long, value_name = "FLOAT")]
    radius_ratio: Option<f64>,

    /// Mask the whole canvas instead of the detected content.
    #[arg(long)]
    full_canvas: bool,

    /// Anti-alias the mask edge with an NxN supersampling grid (`--soft-edges=N`).
    #[arg(
        long,
        value_name = "N",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "4"
    )]
    soft_edges: Option<u8>,

    /// Output edge length in pixels.
    #[arg(short, long, value_name = "INT", conflicts_with = "no_resize")]
    size: Option<u32>,

    /// Keep the source dimensions.
    #[arg(long)]
    no_resize: bool,

    /// Resampling filter for the final resize.
    #[arg(long, value_enum, default_value_t = FilterArg::Lanczos3)]
    filter: FilterArg,

    /// Keep processing remaining files after a failure.
    #[arg(short, long)]
    keep_going: bool,

    /// Create missing output directories.
    #[arg(long)]
    create_dirs: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PresetArg {
    Standard,
    Large,
    FullCanvas,
}

impl From<PresetArg> for Preset {
    fn from(arg: PresetArg) -> Self {
        match arg {
            PresetArg::Standard => Self::Standard,
            PresetArg::Large => Self::Large,
            PresetArg::FullCanvas => Self::FullCanvas,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FilterArg {
    Nearest,
    Triangle,
    CatmullRom,
    Gaussian,
    Lanczos3,
}

impl From<FilterArg> for ResampleFilter {
    fn from(arg: FilterArg) -> Self {
        match arg {
            FilterArg::Nearest => Self::Nearest,
            FilterArg::Triangle => Self::Triangle,
            FilterArg::CatmullRom => Self::CatmullRom,
            FilterArg::Gaussian => Self::Gaussian,
            FilterArg::Lanczos3 => Self::Lanczos3,
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    if args.paths.len() % 2 != 0 {
        Args::command()
            .error(
                ErrorKind::WrongNumberOfValues,
                "paths must come in INPUT OUTPUT pairs",
            )
            .exit();
    }

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("iconmask={log_level}").into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    if let Err(err) = run(&args) {
        tracing::error!("{err:#}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn build_config(args: &Args) -> Config {
    let preset = Preset::from(args.preset).config();

    let target_size = if args.no_resize {
        None
    } else {
        args.size.map(|s| (s, s)).or(preset.target_size)
    };

    Config {
        threshold: args.threshold.unwrap_or(preset.threshold),
        margin: args.margin.unwrap_or(preset.margin),
        radius_ratio: args.radius_ratio.unwrap_or(preset.radius_ratio),
        region: if args.full_canvas {
            Region::FullCanvas
        } else {
            preset.region
        },
        edge: args
            .soft_edges
            .map_or(preset.edge, |samples| EdgeMode::Soft { samples }),
        target_size,
        filter: args.filter.into(),
        create_dirs: args.create_dirs,
    }
}

fn run(args: &Args) -> Result<()> {
    let jobs: Vec<Job> = args
        .paths
        .chunks_exact(2)
        .map(|pair| Job::new(&pair[0], &pair[1]))
        .collect();

    let masker = Masker::new(build_config(args)).context("Invalid configuration")?;

    let policy = if args.keep_going {
        FailurePolicy::Continue
    } else {
        FailurePolicy::Abort
    };

    let summary = Batch::new(masker, policy)
        .with_progress(jobs.len() > 1)
        .run(&jobs, |job, report| {
            println!(
                "Processed {} -> {} ({report})",
                job.input.display(),
                job.output.display()
            );
        })
        .context("Failed to process icons")?;

    summary.check().context("Failed to process icons")?;

    Ok(())
}
