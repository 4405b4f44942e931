//! # Plotline CLI
//!
//! Command-line interface for pen plotter jobs.
//!
//! ## Usage
//!
//! ```bash
//! # List available patterns
//! plotline patterns
//!
//! # Fill the silhouette of an SVG with a noise pattern
//! plotline plot logo.svg --pattern diag1 --seed 42
//!
//! # Write the job to a file instead of the plotter
//! plotline plot logo.svg --out job.hpgl --mask-png mask.png
//!
//! # Plot the outlines of an SVG
//! plotline trace logo.svg
//!
//! # Plot a pattern over the whole canvas
//! plotline pattern --pattern noisy_circles --seed 3
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::Level;

use plotline::{
    PlotlineError, PlotterConfig,
    document::{Collected, parse_document},
    job::{self, JobInput},
    mask::{FitTransform, Mask, MaskMode},
    pattern::{self, PATTERNS, PatternKind},
    plotter::{JobConfig, PlotterEncoder},
    transport::{self, DeviceTransport},
};

/// Delay between send attempts
const RETRY_DELAY: Duration = Duration::from_secs(1);

/// Plotline - Pen plotter job builder
#[derive(Parser, Debug)]
#[command(name = "plotline")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fill the silhouette of an SVG with a noise pattern
    Plot {
        /// SVG artwork
        svg: PathBuf,

        #[command(flatten)]
        job: JobArgs,

        #[command(flatten)]
        pattern: PatternArgs,

        /// Plot the pattern over the whole canvas, ignoring the silhouette
        #[arg(long)]
        no_mask: bool,

        /// How separate shapes combine into the silhouette
        #[arg(long, value_enum)]
        mask_mode: Option<MaskModeArg>,

        /// Save the silhouette as a PNG
        #[arg(long, value_name = "FILE")]
        mask_png: Option<PathBuf>,
    },

    /// Plot the outlines of an SVG
    Trace {
        /// SVG artwork
        svg: PathBuf,

        #[command(flatten)]
        job: JobArgs,
    },

    /// Plot a noise pattern over the whole canvas
    Pattern {
        #[command(flatten)]
        job: JobArgs,

        #[command(flatten)]
        pattern: PatternArgs,
    },

    /// List available patterns
    Patterns,
}

/// Options shared by every job.
#[derive(Args, Debug)]
struct JobArgs {
    /// JSON job file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write the job to a file instead of the plotter
    #[arg(long, value_name = "FILE")]
    out: Option<PathBuf>,

    /// Plotter device path
    #[arg(long)]
    device: Option<PathBuf>,

    /// Send attempts before giving up
    #[arg(long)]
    retries: Option<u32>,
}

#[derive(Args, Debug)]
struct PatternArgs {
    /// Pattern name (see `plotline patterns`)
    #[arg(long)]
    pattern: Option<String>,

    /// Noise seed
    #[arg(long)]
    seed: Option<u32>,

    /// Distance between samples in canvas pixels
    #[arg(long)]
    spacing: Option<f64>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum MaskModeArg {
    Fused,
    PerPath,
}

impl From<MaskModeArg> for MaskMode {
    fn from(arg: MaskModeArg) -> Self {
        match arg {
            MaskModeArg::Fused => MaskMode::Fused,
            MaskModeArg::PerPath => MaskMode::PerPath,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => Level::ERROR,
        (false, 0) => Level::WARN,
        (false, 1) => Level::DEBUG,
        (false, _) => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(command: Commands) -> Result<(), PlotlineError> {
    let plotter = PlotterConfig::DEFAULT;

    match command {
        Commands::Patterns => {
            println!("Available patterns:");
            for name in PATTERNS {
                println!("  {}", name);
            }
        }

        Commands::Plot {
            svg,
            job,
            pattern: pattern_args,
            no_mask,
            mask_mode,
            mask_png,
        } => {
            let mut config = load_config(&job)?;
            apply_pattern_args(&mut config, &pattern_args)?;
            if no_mask {
                config.mask.enabled = false;
            }
            if let Some(mode) = mask_mode {
                config.mask.mode = mode.into();
            }

            let collected = load_artwork(&svg, &config)?;
            let mask = if config.mask.enabled || mask_png.is_some() {
                Some(Mask::build(
                    &collected.paths,
                    config.pattern.width,
                    config.pattern.height,
                    config.mask.mode,
                )?)
            } else {
                None
            };
            if let (Some(mask), Some(png_path)) = (&mask, &mask_png) {
                mask.save_png(png_path)?;
                println!("Saved mask to {}", png_path.display());
            }

            let mask = mask.as_ref().filter(|_| config.mask.enabled);
            println!(
                "Generating {} pattern ({}x{}, seed {})...",
                config.pattern.kind, config.pattern.width, config.pattern.height, config.pattern.seed
            );
            let output = pattern::generate(&config.pattern, mask)?;

            let transform = config
                .output
                .transform
                .unwrap_or_else(|| plotter.pattern_transform());
            let mut encoder =
                PlotterEncoder::new(transform).dedupe_pen_down(config.output.dedupe_pen_down);
            if let Some(mask) = mask {
                encoder = encoder.with_mask(mask);
            }
            let data = job::encode_with(&JobInput::from(&output), encoder);
            deliver(&job, &config, &plotter, &data)?;
        }

        Commands::Trace { svg, job } => {
            let config = load_config(&job)?;
            let collected = load_artwork(&svg, &config)?;
            let fit = FitTransform::fit(&collected.paths, config.pattern.width, config.pattern.height)?;
            let fitted = fit.apply_all(&collected.paths);

            println!("Tracing {} paths...", fitted.len());
            let transform = config
                .output
                .transform
                .unwrap_or_else(|| plotter.trace_transform());
            let encoder =
                PlotterEncoder::new(transform).dedupe_pen_down(config.output.dedupe_pen_down);
            let data = job::encode_with(&JobInput::Paths(&fitted), encoder);
            deliver(&job, &config, &plotter, &data)?;
        }

        Commands::Pattern {
            job,
            pattern: pattern_args,
        } => {
            let mut config = load_config(&job)?;
            apply_pattern_args(&mut config, &pattern_args)?;

            println!(
                "Generating {} pattern ({}x{}, seed {})...",
                config.pattern.kind, config.pattern.width, config.pattern.height, config.pattern.seed
            );
            let output = pattern::generate(&config.pattern, None)?;
            let transform = config
                .output
                .transform
                .unwrap_or_else(|| plotter.pattern_transform());
            let encoder =
                PlotterEncoder::new(transform).dedupe_pen_down(config.output.dedupe_pen_down);
            let data = job::encode_with(&JobInput::from(&output), encoder);
            deliver(&job, &config, &plotter, &data)?;
        }
    }

    Ok(())
}

/// Job file if given, defaults otherwise, with command-line overrides.
fn load_config(args: &JobArgs) -> Result<JobConfig, PlotlineError> {
    let mut config = match &args.config {
        Some(path) => JobConfig::load(path)?,
        None => JobConfig::default(),
    };
    if let Some(device) = &args.device {
        config.device.path = device.clone();
    }
    if let Some(retries) = args.retries {
        config.device.retries = retries;
    }
    Ok(config)
}

fn apply_pattern_args(config: &mut JobConfig, args: &PatternArgs) -> Result<(), PlotlineError> {
    if let Some(name) = &args.pattern {
        config.pattern.kind = name.parse::<PatternKind>()?;
    }
    if let Some(seed) = args.seed {
        config.pattern.seed = seed;
    }
    if let Some(spacing) = args.spacing {
        config.pattern.spacing = spacing;
    }
    config.pattern.validate()
}

fn load_artwork(svg: &Path, config: &JobConfig) -> Result<Collected, PlotlineError> {
    let markup = fs::read_to_string(svg).map_err(|e| {
        PlotlineError::Document(format!("Failed to read {}: {}", svg.display(), e))
    })?;
    let collected = parse_document(&markup, &config.document)?;

    let dropped = collected.diagnostics.iter().filter(|d| !d.kept).count();
    if dropped > 0 {
        eprintln!("Warning: skipped {} unreadable element(s)", dropped);
    }
    println!("Loaded {} paths from {}", collected.paths.len(), svg.display());
    Ok(collected)
}

/// Write the job to `--out` or send it to the plotter.
fn deliver(
    args: &JobArgs,
    config: &JobConfig,
    plotter: &PlotterConfig,
    data: &[u8],
) -> Result<(), PlotlineError> {
    if let Some(out) = &args.out {
        fs::write(out, data)?;
        println!("Saved {} bytes to {}", data.len(), out.display());
        return Ok(());
    }

    println!("Sending {} bytes to {}...", data.len(), config.device.path.display());
    transport::send_with_retry(
        || {
            let mut device = DeviceTransport::open(&config.device.path)?;
            device.set_chunk_size(plotter.chunk_size);
            Ok(device)
        },
        data,
        config.device.retries,
        RETRY_DELAY,
    )?;
    println!("Plotted successfully!");
    Ok(())
}
