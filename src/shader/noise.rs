//! Hash and noise functions for procedural generation.
//!
//! Everything here is a pure function of its inputs and a seed, so the
//! same seed always reproduces the same field.

/// Octaves summed by [`NoiseField`].
pub const DEFAULT_OCTAVES: usize = 4;

/// Integer hash function using bit manipulation.
#[inline]
pub fn hash(mut x: u32) -> u32 {
    x = x.wrapping_mul(0x45d9f3b);
    x ^= x >> 16;
    x = x.wrapping_mul(0x45d9f3b);
    x ^= x >> 16;
    x
}

/// Convert a 2D lattice hash to a float in [0, 1].
#[inline]
pub fn hash2_f64(x: i32, y: i32, seed: u32) -> f64 {
    let n = hash(
        seed.wrapping_add((x as u32).wrapping_mul(374761393))
            .wrapping_add((y as u32).wrapping_mul(668265263)),
    );
    n as f64 / u32::MAX as f64
}

/// 2D value noise with smoothstep interpolation.
///
/// Returns a value in [0, 1] that varies smoothly across the plane.
pub fn noise2d(x: f64, y: f64, seed: u32) -> f64 {
    let xi = x.floor() as i32;
    let yi = y.floor() as i32;
    let xf = x - x.floor();
    let yf = y - y.floor();

    let u = xf * xf * (3.0 - 2.0 * xf);
    let v = yf * yf * (3.0 - 2.0 * yf);

    let n00 = hash2_f64(xi, yi, seed);
    let n10 = hash2_f64(xi.wrapping_add(1), yi, seed);
    let n01 = hash2_f64(xi, yi.wrapping_add(1), seed);
    let n11 = hash2_f64(xi.wrapping_add(1), yi.wrapping_add(1), seed);

    let nx0 = n00 * (1.0 - u) + n10 * u;
    let nx1 = n01 * (1.0 - u) + n11 * u;
    nx0 * (1.0 - v) + nx1 * v
}

/// Fractal Brownian Motion: octaves of value noise with halving amplitude
/// and doubling frequency, normalized back to [0, 1].
pub fn fbm(x: f64, y: f64, octaves: usize, seed: u32) -> f64 {
    let mut value = 0.0;
    let mut amplitude = 0.5;
    let mut frequency = 1.0;
    let mut max_value = 0.0;

    for i in 0..octaves.max(1) {
        value += amplitude
            * noise2d(
                x * frequency,
                y * frequency,
                seed.wrapping_add(i as u32 * 1000),
            );
        max_value += amplitude;
        amplitude *= 0.5;
        frequency *= 2.0;
    }

    value / max_value
}

/// A seeded coherent noise source.
///
/// Pattern generators take one of these instead of reaching for global
/// randomness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoiseField {
    seed: u32,
    octaves: usize,
}

impl NoiseField {
    pub fn new(seed: u32) -> Self {
        Self {
            seed,
            octaves: DEFAULT_OCTAVES,
        }
    }

    /// Sample the field. Always in [0, 1].
    #[inline]
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        fbm(x, y, self.octaves, self.seed)
    }
}
