//! Canvas to device coordinate conversion.
//!
//! | Transform | `dx` | `dy` | Rounding |
//! |-----------|------|------|----------|
//! | `PreviewRelative` | `x·scale + offset_x` | `(canvas_height − y)·scale + offset_y` | half-up |
//! | `AxisSwap` | `y·factor` | `x·factor` | truncate |
//! | `Scale` | `x·factor` | `y·factor` | half-up |
//!
//! Half-up rounding is `floor(v + 0.5)`, so `-0.5` rounds to `0`.

use serde::{Deserialize, Serialize};

/// Anything that maps canvas coordinates to integer device units.
///
/// Implemented for [`DeviceTransform`] and for plain closures:
///
/// ```
/// use plotline::plotter::ToDevice;
///
/// let double = |x: f64, y: f64| ((x * 2.0) as i32, (y * 2.0) as i32);
/// assert_eq!(double.to_device(1.5, 3.0), (3, 6));
/// ```
pub trait ToDevice {
    fn to_device(&self, x: f64, y: f64) -> (i32, i32);
}

impl<F> ToDevice for F
where
    F: Fn(f64, f64) -> (i32, i32),
{
    fn to_device(&self, x: f64, y: f64) -> (i32, i32) {
        self(x, y)
    }
}

/// Configurable device transform.
///
/// Serialized with a `type` tag:
///
/// ```json
/// { "type": "axis_swap", "factor": 2.0 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DeviceTransform {
    /// Y-up output for shapes drawn on a preview canvas, with a pen
    /// calibration offset.
    PreviewRelative {
        scale: f64,
        offset_x: f64,
        offset_y: f64,
        canvas_height: f64,
    },
    /// Swap axes and truncate. Used for artwork tracing.
    AxisSwap { factor: f64 },
    /// Uniform scale. Used for pattern output.
    Scale { factor: f64 },
}

impl DeviceTransform {
    /// `Scale { factor: 1.0 }`.
    pub const fn identity() -> Self {
        Self::Scale { factor: 1.0 }
    }
}

impl Default for DeviceTransform {
    fn default() -> Self {
        Self::Scale { factor: 2.0 }
    }
}

impl ToDevice for DeviceTransform {
    fn to_device(&self, x: f64, y: f64) -> (i32, i32) {
        match *self {
            Self::PreviewRelative {
                scale,
                offset_x,
                offset_y,
                canvas_height,
            } => (
                round_half_up(x * scale + offset_x),
                round_half_up((canvas_height - y) * scale + offset_y),
            ),
            Self::AxisSwap { factor } => ((y * factor).trunc() as i32, (x * factor).trunc() as i32),
            Self::Scale { factor } => (round_half_up(x * factor), round_half_up(y * factor)),
        }
    }
}

/// Round to the nearest integer, halves toward positive infinity.
#[inline]
pub fn round_half_up(v: f64) -> i32 {
    (v + 0.5).floor() as i32
}
