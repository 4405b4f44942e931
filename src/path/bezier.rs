//! Cubic Bézier flattening at a fixed number of steps.
//!
//! ```text
//! B(t) = (1-t)³·p0 + 3(1-t)²t·p1 + 3(1-t)t²·p2 + t³·p3,   t = i / segments
//! ```
//!
//! The parameter is derived from an integer step index so `t = 1` is
//! always sampled exactly once.

use super::Point;

/// Segments per curve used by the path parser.
pub const DEFAULT_SEGMENTS: usize = 50;

/// Sample a cubic Bézier into `segments + 1` points.
///
/// The first point is `p0` and the last is `p3` exactly. A `segments` of
/// zero is treated as one.
pub fn flatten(p0: Point, p1: Point, p2: Point, p3: Point, segments: usize) -> Vec<Point> {
    let segments = segments.max(1);
    let mut out = Vec::with_capacity(segments + 1);
    out.push(p0);
    for i in 1..segments {
        let t = i as f64 / segments as f64;
        out.push(eval(p0, p1, p2, p3, t));
    }
    out.push(p3);
    out
}

/// Evaluate the cubic at `t`.
#[inline]
pub fn eval(p0: Point, p1: Point, p2: Point, p3: Point, t: f64) -> Point {
    let mt = 1.0 - t;
    let a = mt * mt * mt;
    let b = 3.0 * mt * mt * t;
    let c = 3.0 * mt * t * t;
    let d = t * t * t;
    Point::new(
        a * p0.x + b * p1.x + c * p2.x + d * p3.x,
        a * p0.y + b * p1.y + c * p2.y + d * p3.y,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts() -> [Point; 4] {
        [
            Point::new(0.0, 0.0),
            Point::new(0.0, 10.0),
            Point::new(10.0, 10.0),
            Point::new(10.0, 0.0),
        ]
    }

    #[test]
    fn test_point_count() {
        let [p0, p1, p2, p3] = pts();
        for n in [1, 2, 3, 7, 50, 101] {
            assert_eq!(flatten(p0, p1, p2, p3, n).len(), n + 1);
        }
    }

    #[test]
    fn test_endpoints_exact() {
        let [p0, p1, p2, p3] = pts();
        let out = flatten(p0, p1, p2, p3, 3);
        assert_eq!(out[0], p0);
        assert_eq!(out[3], p3);
    }

    #[test]
    fn test_midpoint_matches_formula() {
        let [p0, p1, p2, p3] = pts();
        let out = flatten(p0, p1, p2, p3, 50);
        // t = 0.5: 0.125·p0 + 0.375·p1 + 0.375·p2 + 0.125·p3
        let mid = out[25];
        assert!((mid.x - 5.0).abs() < 1e-9);
        assert!((mid.y - 7.5).abs() < 1e-9);
    }

    #[test]
    fn test_zero_segments() {
        let [p0, p1, p2, p3] = pts();
        assert_eq!(flatten(p0, p1, p2, p3, 0), vec![p0, p3]);
    }

    #[test]
    fn test_degenerate_control_points() {
        let p = Point::new(3.0, 3.0);
        let out = flatten(p, p, p, p, 4);
        assert_eq!(out.len(), 5);
        assert!(out.iter().all(|q| (q.x - 3.0).abs() < 1e-9 && (q.y - 3.0).abs() < 1e-9));
    }
}
