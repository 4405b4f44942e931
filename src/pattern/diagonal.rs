//! Diagonal bands.
//!
//! Bands are laid out along `y = d + x` (falling, `diag1`) or `y = d - x`
//! (rising, `diag2`) with `d` stepping by the spacing. Only samples that
//! land on the canvas are kept, then each is jittered on both axes by two
//! independent noise lookups. Bands with fewer than two points are dropped.

use super::{PatternSpec, steps};
use crate::path::{PathSequence, Point};
use crate::shader::{NoiseField, jitter};

/// Maximum displacement in pixels.
pub const AMPLITUDE: f64 = 20.0;

const FREQUENCY: f64 = 0.012;

/// Noise offset separating the rising bands from the falling ones.
const RISING_OFFSET: f64 = 512.0;

/// `diag1`: `y = d + x`.
pub fn falling(spec: &PatternSpec, noise: &NoiseField) -> Vec<PathSequence> {
    let (w, h) = (spec.width as f64, spec.height as f64);
    let lookup = |x: f64, y: f64| {
        let nx = noise.sample(x * FREQUENCY, y * FREQUENCY);
        let ny = noise.sample(y * FREQUENCY, x * FREQUENCY);
        (nx, ny)
    };
    bands(spec, steps(-w, w + h, spec.spacing), |d, x| d + x, lookup)
}

/// `diag2`: `y = d - x`.
pub fn rising(spec: &PatternSpec, noise: &NoiseField) -> Vec<PathSequence> {
    let (w, h) = (spec.width as f64, spec.height as f64);
    let lookup = |x: f64, y: f64| {
        let nx = noise.sample(x * FREQUENCY, y * FREQUENCY + RISING_OFFSET);
        let ny = noise.sample(y * FREQUENCY + RISING_OFFSET, x * FREQUENCY);
        (nx, ny)
    };
    bands(spec, steps(0.0, w + h, spec.spacing), |d, x| d - x, lookup)
}

fn bands<D, Y, N>(spec: &PatternSpec, offsets: D, line: Y, lookup: N) -> Vec<PathSequence>
where
    D: Iterator<Item = f64>,
    Y: Fn(f64, f64) -> f64,
    N: Fn(f64, f64) -> (f64, f64),
{
    let (w, h) = (spec.width as f64, spec.height as f64);
    offsets
        .filter_map(|d| {
            let points: Vec<Point> = steps(0.0, w, spec.spacing)
                .filter_map(|x| {
                    let y = line(d, x);
                    if !(0.0..h).contains(&y) {
                        return None;
                    }
                    let (nx, ny) = lookup(x, y);
                    Some(Point::new(x + jitter(nx, AMPLITUDE), y + jitter(ny, AMPLITUDE)))
                })
                .collect();
            if points.len() > 1 {
                PathSequence::new(points)
            } else {
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec() -> PatternSpec {
        PatternSpec {
            width: 100,
            height: 60,
            ..Default::default()
        }
    }

    #[test]
    fn test_bands_have_two_or_more_points() {
        let noise = NoiseField::new(4);
        for paths in [falling(&spec(), &noise), rising(&spec(), &noise)] {
            assert!(!paths.is_empty());
            assert!(paths.iter().all(|p| p.len() > 1));
        }
    }

    #[test]
    fn test_samples_stay_near_canvas() {
        let noise = NoiseField::new(4);
        for paths in [falling(&spec(), &noise), rising(&spec(), &noise)] {
            for p in paths.iter().flat_map(|p| p.iter()) {
                assert!(p.x >= -AMPLITUDE && p.x <= 100.0 + AMPLITUDE);
                assert!(p.y >= -AMPLITUDE && p.y <= 60.0 + AMPLITUDE);
            }
        }
    }

    #[test]
    fn test_falling_band_count() {
        // d runs over [-100, 160) in steps of 10; bands whose on-canvas run
        // has fewer than two samples are dropped.
        let paths = falling(&spec(), &NoiseField::new(0));
        assert!(paths.len() <= 26);
        assert!(paths.len() >= 10);
    }

    #[test]
    fn test_directions_differ() {
        let noise = NoiseField::new(0);
        assert_ne!(falling(&spec(), &noise), rising(&spec(), &noise));
    }
}
