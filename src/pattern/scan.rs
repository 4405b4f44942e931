//! Horizontal and vertical scan lines.
//!
//! Every sample is displaced across the line direction by
//! `noise(0.01x, 0.01y)` mapped into ±[`AMPLITUDE`].

use super::{PatternSpec, steps};
use crate::path::{PathSequence, Point};
use crate::shader::{NoiseField, jitter};

/// Maximum displacement in pixels.
pub const AMPLITUDE: f64 = 20.0;

const FREQUENCY: f64 = 0.01;

/// One stroke per row.
pub fn horizontal(spec: &PatternSpec, noise: &NoiseField) -> Vec<PathSequence> {
    let (w, h) = (spec.width as f64, spec.height as f64);
    steps(0.0, h, spec.spacing)
        .filter_map(|y| {
            let points = steps(0.0, w, spec.spacing)
                .map(|x| {
                    let n = noise.sample(x * FREQUENCY, y * FREQUENCY);
                    Point::new(x, y + jitter(n, AMPLITUDE))
                })
                .collect();
            PathSequence::new(points)
        })
        .collect()
}

/// One stroke per column.
pub fn vertical(spec: &PatternSpec, noise: &NoiseField) -> Vec<PathSequence> {
    let (w, h) = (spec.width as f64, spec.height as f64);
    steps(0.0, w, spec.spacing)
        .filter_map(|x| {
            let points = steps(0.0, h, spec.spacing)
                .map(|y| {
                    let n = noise.sample(x * FREQUENCY, y * FREQUENCY);
                    Point::new(x + jitter(n, AMPLITUDE), y)
                })
                .collect();
            PathSequence::new(points)
        })
        .collect()
}
