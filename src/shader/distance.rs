//! Distance functions for spatial calculations.

/// Euclidean distance between two points.
#[inline]
pub fn dist(x: f64, y: f64, cx: f64, cy: f64) -> f64 {
    let dx = x - cx;
    let dy = y - cy;
    (dx * dx + dy * dy).sqrt()
}
