//! # Shader Primitives
//!
//! Small numeric building blocks shared by the pattern generators.
//!
//! - [`noise`]: Hash functions, seeded value noise, fractal Brownian motion
//! - [`adjust`]: Range remapping and clamping
//! - [`distance`]: Euclidean distance
//!
//! ## Example
//!
//! ```rust
//! use plotline::shader::*;
//!
//! let field = NoiseField::new(7);
//! let n = field.sample(1.5, 2.5);
//! let offset = remap(n, 0.0, 1.0, -20.0, 20.0);
//! assert!((-20.0..=20.0).contains(&offset));
//! ```

pub mod adjust;
pub mod distance;
pub mod noise;

pub use adjust::*;
pub use distance::*;
pub use noise::*;
