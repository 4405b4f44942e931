//! Scanline polygon fill with the non-zero winding rule.
//!
//! Each pixel row is sampled at [`SUBSAMPLES`] sub-scanlines. On every
//! sub-scanline the covered spans are accumulated with exact horizontal
//! overlap, so edge pixels get fractional coverage and the output is a
//! 0-255 intensity per pixel.

use crate::path::Point;

/// Sub-scanlines per pixel row.
pub const SUBSAMPLES: usize = 4;

/// A non-horizontal polygon edge, stored top to bottom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
    winding: i32,
}

impl Edge {
    fn new(a: Point, b: Point) -> Option<Self> {
        if a.y == b.y {
            return None;
        }
        Some(if a.y < b.y {
            Self { x0: a.x, y0: a.y, x1: b.x, y1: b.y, winding: 1 }
        } else {
            Self { x0: b.x, y0: b.y, x1: a.x, y1: a.y, winding: -1 }
        })
    }

    /// X where the edge crosses `y`, if `y` lies in `[y0, y1)`.
    #[inline]
    fn crossing(&self, y: f64) -> Option<f64> {
        if y < self.y0 || y >= self.y1 {
            return None;
        }
        Some(self.x0 + (y - self.y0) * (self.x1 - self.x0) / (self.y1 - self.y0))
    }
}

/// Append the edges of a closed polygon through `points`.
///
/// The last point connects back to the first.
pub fn polygon_edges<I>(points: I, edges: &mut Vec<Edge>)
where
    I: IntoIterator<Item = Point>,
{
    let mut iter = points.into_iter();
    let Some(first) = iter.next() else {
        return;
    };
    let mut prev = first;
    for p in iter {
        edges.extend(Edge::new(prev, p));
        prev = p;
    }
    edges.extend(Edge::new(prev, first));
}

/// Rasterize edges into a `width * height` row-major coverage buffer.
pub fn rasterize(edges: &[Edge], width: u32, height: u32) -> Vec<u8> {
    let w = width as usize;
    let h = height as usize;
    let mut out = vec![0u8; w * h];
    if edges.is_empty() || w == 0 {
        return out;
    }

    let weight = 1.0 / SUBSAMPLES as f64;
    let mut acc = vec![0.0f64; w];
    let mut crossings: Vec<(f64, i32)> = Vec::new();

    for row in 0..h {
        let top = row as f64;
        let bottom = top + 1.0;
        let active: Vec<&Edge> = edges
            .iter()
            .filter(|e| e.y0 < bottom && e.y1 > top)
            .collect();
        if active.is_empty() {
            continue;
        }

        acc.iter_mut().for_each(|a| *a = 0.0);
        for s in 0..SUBSAMPLES {
            let sy = top + (s as f64 + 0.5) * weight;
            crossings.clear();
            crossings.extend(
                active
                    .iter()
                    .filter_map(|e| e.crossing(sy).map(|x| (x, e.winding))),
            );
            crossings.sort_by(|a, b| a.0.total_cmp(&b.0));

            let mut winding = 0;
            let mut span_start = 0.0;
            for &(x, dir) in &crossings {
                let was_inside = winding != 0;
                winding += dir;
                match (was_inside, winding != 0) {
                    (false, true) => span_start = x,
                    (true, false) => add_span(&mut acc, span_start, x, weight),
                    _ => {}
                }
            }
        }

        let base = row * w;
        for (px, a) in acc.iter().enumerate() {
            out[base + px] = (a * 255.0).round().clamp(0.0, 255.0) as u8;
        }
    }

    out
}

/// Add `weight` times the overlap of `[a, b)` with each pixel column.
fn add_span(acc: &mut [f64], a: f64, b: f64, weight: f64) {
    let w = acc.len() as f64;
    let a = a.clamp(0.0, w);
    let b = b.clamp(0.0, w);
    if b <= a {
        return;
    }
    let first = a.floor() as usize;
    let last = (b.ceil() as usize).min(acc.len());
    for (px, cell) in acc.iter_mut().enumerate().take(last).skip(first) {
        let left = a.max(px as f64);
        let right = b.min(px as f64 + 1.0);
        if right > left {
            *cell += (right - left) * weight;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x0: f64, y0: f64, x1: f64, y1: f64) -> Vec<Point> {
        vec![
            Point::new(x0, y0),
            Point::new(x1, y0),
            Point::new(x1, y1),
            Point::new(x0, y1),
        ]
    }

    #[test]
    fn test_pixel_aligned_square() {
        let mut edges = Vec::new();
        polygon_edges(square(2.0, 2.0, 6.0, 6.0), &mut edges);
        let cov = rasterize(&edges, 8, 8);
        assert_eq!(cov[3 * 8 + 3], 255);
        assert_eq!(cov[2 * 8 + 2], 255);
        assert_eq!(cov[5 * 8 + 5], 255);
        assert_eq!(cov[6 * 8 + 6], 0);
        assert_eq!(cov[8 + 1], 0);
        assert_eq!(cov.iter().filter(|&&c| c == 255).count(), 16);
    }

    #[test]
    fn test_half_covered_column() {
        let mut edges = Vec::new();
        polygon_edges(square(0.0, 0.0, 2.5, 4.0), &mut edges);
        let cov = rasterize(&edges, 4, 4);
        assert_eq!(cov[0], 255);
        assert_eq!(cov[1], 255);
        assert_eq!(cov[2], 128);
        assert_eq!(cov[3], 0);
    }

    #[test]
    fn test_winding_direction_irrelevant() {
        let mut cw = Vec::new();
        polygon_edges(square(1.0, 1.0, 3.0, 3.0), &mut cw);
        let mut ccw = Vec::new();
        polygon_edges(square(1.0, 1.0, 3.0, 3.0).into_iter().rev(), &mut ccw);
        assert_eq!(rasterize(&cw, 4, 4), rasterize(&ccw, 4, 4));
    }

    #[test]
    fn test_clipped_to_canvas() {
        let mut edges = Vec::new();
        polygon_edges(square(-5.0, -5.0, 10.0, 10.0), &mut edges);
        let cov = rasterize(&edges, 3, 3);
        assert!(cov.iter().all(|&c| c == 255));
    }

    #[test]
    fn test_degenerate_polygon_is_empty() {
        let mut edges = Vec::new();
        polygon_edges(vec![Point::new(0.0, 1.0), Point::new(4.0, 1.0)], &mut edges);
        assert!(edges.is_empty());
        assert!(rasterize(&edges, 4, 4).iter().all(|&c| c == 0));
    }
}
