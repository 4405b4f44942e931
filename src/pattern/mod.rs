//! # Noise Patterns
//!
//! Procedural fill patterns for the plotter, sampled on a canvas-sized grid
//! and jittered by a seeded [`NoiseField`].
//!
//! | Kind | Output | Description |
//! |------|--------|-------------|
//! | `horizontal` | strokes | Rows displaced vertically by noise |
//! | `vertical` | strokes | Columns displaced horizontally by noise |
//! | `diag1` | strokes | Falling diagonal bands, jittered on both axes |
//! | `diag2` | strokes | Rising diagonal bands, jittered on both axes |
//! | `grid` | strokes | `horizontal` followed by `vertical` |
//! | `dots` | point cloud | Jittered grid of single points |
//! | `noisy_circles` | strokes | Packed circles with wobbly outlines |
//!
//! The same [`PatternSpec`] always produces the same output.
//!
//! ## Example
//!
//! ```
//! use plotline::pattern::{self, PatternKind, PatternSpec};
//!
//! let spec = PatternSpec { kind: PatternKind::Grid, seed: 3, ..Default::default() };
//! let output = pattern::generate(&spec, None)?;
//! assert!(output.point_count() > 0);
//! # Ok::<(), plotline::PlotlineError>(())
//! ```

pub mod circles;
pub mod diagonal;
pub mod dots;
pub mod scan;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::PlotlineError;
use crate::mask::Mask;
use crate::path::{PathSequence, Point};
use crate::shader::NoiseField;

/// All pattern names, in display order.
pub const PATTERNS: &[&str] = &[
    "horizontal",
    "vertical",
    "diag1",
    "diag2",
    "grid",
    "dots",
    "noisy_circles",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    #[default]
    Horizontal,
    Vertical,
    Diag1,
    Diag2,
    Grid,
    Dots,
    NoisyCircles,
}

impl PatternKind {
    pub const ALL: [PatternKind; 7] = [
        Self::Horizontal,
        Self::Vertical,
        Self::Diag1,
        Self::Diag2,
        Self::Grid,
        Self::Dots,
        Self::NoisyCircles,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
            Self::Diag1 => "diag1",
            Self::Diag2 => "diag2",
            Self::Grid => "grid",
            Self::Dots => "dots",
            Self::NoisyCircles => "noisy_circles",
        }
    }
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PatternKind {
    type Err = PlotlineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|k| k.name() == lower)
            .ok_or_else(|| {
                PlotlineError::Config(format!(
                    "Unknown pattern '{}'. Available: {}",
                    s,
                    PATTERNS.join(", ")
                ))
            })
    }
}

/// Everything a pattern depends on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternSpec {
    pub kind: PatternKind,
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Distance between samples. Default: 10
    pub spacing: f64,
    /// Seed for noise and circle placement. Default: 0
    pub seed: u32,
}

impl Default for PatternSpec {
    fn default() -> Self {
        Self {
            kind: PatternKind::Horizontal,
            width: 600,
            height: 600,
            spacing: 10.0,
            seed: 0,
        }
    }
}

/// Smallest accepted sample spacing in pixels.
pub const MIN_SPACING: f64 = 0.1;

impl PatternSpec {
    pub fn validate(&self) -> Result<(), PlotlineError> {
        if !(self.spacing.is_finite() && self.spacing >= MIN_SPACING) {
            return Err(PlotlineError::Config(format!(
                "spacing must be at least {}, got {}",
                MIN_SPACING, self.spacing
            )));
        }
        Ok(())
    }
}

/// Generated geometry.
#[derive(Debug, Clone, PartialEq)]
pub enum PatternOutput {
    /// Polylines, one pen stroke each.
    Strokes(Vec<PathSequence>),
    /// Independent points, one dot each.
    Cloud(Vec<Point>),
}

impl PatternOutput {
    pub fn point_count(&self) -> usize {
        match self {
            Self::Strokes(paths) => paths.iter().map(|p| p.len()).sum(),
            Self::Cloud(points) => points.len(),
        }
    }
}

/// Generate a pattern.
///
/// The mask only affects `noisy_circles`, which places and clips circles
/// against it. Other kinds are clipped later by the encoder.
#[tracing::instrument(skip(mask), fields(masked = mask.is_some()))]
pub fn generate(spec: &PatternSpec, mask: Option<&Mask>) -> Result<PatternOutput, PlotlineError> {
    spec.validate()?;
    let noise = NoiseField::new(spec.seed);

    let output = match spec.kind {
        PatternKind::Horizontal => PatternOutput::Strokes(scan::horizontal(spec, &noise)),
        PatternKind::Vertical => PatternOutput::Strokes(scan::vertical(spec, &noise)),
        PatternKind::Diag1 => PatternOutput::Strokes(diagonal::falling(spec, &noise)),
        PatternKind::Diag2 => PatternOutput::Strokes(diagonal::rising(spec, &noise)),
        PatternKind::Grid => {
            let mut paths = scan::horizontal(spec, &noise);
            paths.extend(scan::vertical(spec, &noise));
            PatternOutput::Strokes(paths)
        }
        PatternKind::Dots => PatternOutput::Cloud(dots::cloud(spec, &noise)),
        PatternKind::NoisyCircles => {
            PatternOutput::Strokes(circles::noisy_circles(spec, &noise, mask))
        }
    };

    debug!(kind = %spec.kind, points = output.point_count(), "generated pattern");
    Ok(output)
}

/// Sample positions `0, spacing, 2·spacing, ...` below `extent`.
///
/// Positions come from an integer step count, not an accumulated sum.
pub(crate) fn steps(start: f64, end: f64, spacing: f64) -> impl Iterator<Item = f64> {
    (0u64..)
        .map(move |i| start + i as f64 * spacing)
        .take_while(move |v| *v < end)
}
