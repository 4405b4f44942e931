//! Primitive shapes drawn through an encoder, one stroke each.

use std::f64::consts::TAU;

use super::encoder::PlotterEncoder;
use super::transform::ToDevice;

/// Vertices around an ellipse unless told otherwise.
pub const DEFAULT_ELLIPSE_DETAIL: usize = 180;

pub fn line<T: ToDevice>(enc: &mut PlotterEncoder<'_, T>, x1: f64, y1: f64, x2: f64, y2: f64) {
    enc.begin();
    enc.vertex(x1, y1);
    enc.vertex(x2, y2);
    enc.end();
}

/// Closed rectangle from its top-left corner, five vertices.
pub fn rect<T: ToDevice>(enc: &mut PlotterEncoder<'_, T>, x: f64, y: f64, w: f64, h: f64) {
    enc.begin();
    enc.vertex(x, y);
    enc.vertex(x + w, y);
    enc.vertex(x + w, y + h);
    enc.vertex(x, y + h);
    enc.vertex(x, y);
    enc.end();
}

/// Ellipse centered on `(cx, cy)` with full width `w` and height `h`.
///
/// Samples `detail + 1` vertices over a full turn so the outline closes
/// on its starting point.
pub fn ellipse<T: ToDevice>(
    enc: &mut PlotterEncoder<'_, T>,
    cx: f64,
    cy: f64,
    w: f64,
    h: f64,
    detail: usize,
) {
    let detail = detail.max(1);
    enc.begin();
    for i in 0..=detail {
        let a = TAU * i as f64 / detail as f64;
        enc.vertex(cx + a.cos() * w / 2.0, cy + a.sin() * h / 2.0);
    }
    enc.end();
}
