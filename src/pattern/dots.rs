//! Jittered dot grid.
//!
//! One point per grid cell, pushed around by two noise lookups offset
//! from each other so the axes move independently.

use super::{PatternSpec, steps};
use crate::path::Point;
use crate::shader::{NoiseField, jitter};

/// Maximum displacement in pixels.
pub const AMPLITUDE: f64 = 10.0;

const FREQUENCY: f64 = 0.04;
const AXIS_OFFSET: f64 = 1000.0;

/// Row-major point cloud over the canvas.
pub fn cloud(spec: &PatternSpec, noise: &NoiseField) -> Vec<Point> {
    let (w, h) = (spec.width as f64, spec.height as f64);
    steps(0.0, h, spec.spacing)
        .flat_map(|y| steps(0.0, w, spec.spacing).map(move |x| (x, y)))
        .map(|(x, y)| {
            let nx = noise.sample(x * FREQUENCY, y * FREQUENCY);
            let ny = noise.sample((x + AXIS_OFFSET) * FREQUENCY, (y + AXIS_OFFSET) * FREQUENCY);
            Point::new(x + jitter(nx, AMPLITUDE), y + jitter(ny, AMPLITUDE))
        })
        .collect()
}
