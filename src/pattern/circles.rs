//! Packed circles with noisy outlines.
//!
//! ## Packing
//!
//! Rejection sampling: up to [`MAX_ATTEMPTS`] candidates with a radius in
//! `[R_MIN, R_MAX)`, placed fully on the canvas. A candidate is kept when
//! it overlaps no kept circle and, with a mask, its center is inside the
//! mask. Packing stops at [`MAX_CIRCLES`].
//!
//! ## Outlines
//!
//! Each circle is walked in [`OUTLINE_STEPS`] angular steps (plus the
//! closing sample). The radius at each sample is perturbed by noise by up
//! to ±20%. With a mask, samples outside it are dropped, and circles left
//! with two or fewer samples are dropped entirely.

use std::f64::consts::TAU;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::PatternSpec;
use crate::mask::Mask;
use crate::path::{PathSequence, Point};
use crate::shader::{NoiseField, dist, jitter};

pub const MAX_ATTEMPTS: usize = 2000;
pub const MAX_CIRCLES: usize = 90;
pub const R_MIN: f64 = 12.0;
pub const R_MAX: f64 = 30.0;
pub const OUTLINE_STEPS: usize = 36;

/// Radius wobble as a fraction of the radius.
const WOBBLE: f64 = 0.2;
const FREQUENCY: f64 = 0.04;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub x: f64,
    pub y: f64,
    pub r: f64,
}

impl Circle {
    pub fn overlaps(&self, other: &Circle) -> bool {
        dist(self.x, self.y, other.x, other.y) < self.r + other.r
    }
}

/// Place non-overlapping circles on a `width` x `height` canvas.
pub fn pack_circles<R: Rng>(width: u32, height: u32, rng: &mut R, mask: Option<&Mask>) -> Vec<Circle> {
    let (w, h) = (width as f64, height as f64);
    let mut circles: Vec<Circle> = Vec::new();

    for _ in 0..MAX_ATTEMPTS {
        if circles.len() >= MAX_CIRCLES {
            break;
        }
        let r = rng.random_range(R_MIN..R_MAX);
        if w <= 2.0 * r || h <= 2.0 * r {
            continue;
        }
        let candidate = Circle {
            x: rng.random_range(r..w - r),
            y: rng.random_range(r..h - r),
            r,
        };

        if circles.iter().any(|c| c.overlaps(&candidate)) {
            continue;
        }
        if mask.is_some_and(|m| !m.is_inside(candidate.x, candidate.y)) {
            continue;
        }
        circles.push(candidate);
    }

    circles
}

/// Noisy outline of one circle, clipped to the mask.
pub fn outline(circle: &Circle, noise: &NoiseField, mask: Option<&Mask>) -> Option<PathSequence> {
    let points: Vec<Point> = (0..=OUTLINE_STEPS)
        .filter_map(|t| {
            let theta = TAU * t as f64 / OUTLINE_STEPS as f64;
            let (sin, cos) = theta.sin_cos();
            let n = noise.sample(circle.x * FREQUENCY + cos, circle.y * FREQUENCY + sin);
            let nr = circle.r + jitter(n, circle.r * WOBBLE);
            let p = Point::new(circle.x + nr * cos, circle.y + nr * sin);
            match mask {
                Some(m) if !m.is_inside(p.x, p.y) => None,
                _ => Some(p),
            }
        })
        .collect();

    if points.len() > 2 {
        PathSequence::new(points)
    } else {
        None
    }
}

/// The `noisy_circles` pattern.
pub fn noisy_circles(spec: &PatternSpec, noise: &NoiseField, mask: Option<&Mask>) -> Vec<PathSequence> {
    let mut rng = StdRng::seed_from_u64(spec.seed as u64);
    pack_circles(spec.width, spec.height, &mut rng, mask)
        .iter()
        .filter_map(|c| outline(c, noise, mask))
        .collect()
}
