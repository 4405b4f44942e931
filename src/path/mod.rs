//! # Path Geometry
//!
//! Points, polylines and the parsers that produce them.
//!
//! ## Modules
//!
//! - [`bezier`]: Fixed-step cubic Bézier flattening
//! - [`parser`]: The `d` attribute mini-language (`M L H V C S Z`)
//! - [`points`]: The `points` attribute of polygons and polylines
//!
//! ## Example
//!
//! ```
//! use plotline::path::{Point, parse_path};
//!
//! let square = parse_path("M0,0 L10,0 L10,10 Z")?;
//! assert_eq!(square.len(), 4);
//! assert!(square.is_closed());
//! assert_eq!(square.last(), Point::new(0.0, 0.0));
//! # Ok::<(), plotline::error::ParseError>(())
//! ```

pub mod bezier;
pub mod parser;
pub mod points;

use serde::{Deserialize, Serialize};
use std::ops::Deref;

pub use bezier::{DEFAULT_SEGMENTS, flatten};
pub use parser::{ParsedPath, PathParser, UnsupportedPolicy, parse_path};
pub use points::parse_points;

/// A 2D coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Reflect `self` through `center`.
    #[inline]
    pub fn reflect(self, center: Point) -> Point {
        Point::new(2.0 * center.x - self.x, 2.0 * center.y - self.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// A polyline with at least one point.
///
/// Closed sequences repeat their first point at the end; there is no
/// separate "closed" flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Point>", into = "Vec<Point>")]
pub struct PathSequence(Vec<Point>);

impl PathSequence {
    /// Wrap a list of points. Returns `None` for an empty list.
    pub fn new(points: Vec<Point>) -> Option<Self> {
        if points.is_empty() {
            None
        } else {
            Some(Self(points))
        }
    }

    pub fn points(&self) -> &[Point] {
        &self.0
    }

    pub fn first(&self) -> Point {
        self.0[0]
    }

    pub fn last(&self) -> Point {
        self.0[self.0.len() - 1]
    }

    /// True when the last point repeats the first and there is more than one point.
    pub fn is_closed(&self) -> bool {
        self.0.len() > 1 && self.first() == self.last()
    }
}

impl Deref for PathSequence {
    type Target = [Point];

    fn deref(&self) -> &[Point] {
        &self.0
    }
}

impl TryFrom<Vec<Point>> for PathSequence {
    type Error = &'static str;

    fn try_from(points: Vec<Point>) -> Result<Self, Self::Error> {
        Self::new(points).ok_or("path sequence needs at least one point")
    }
}

impl From<PathSequence> for Vec<Point> {
    fn from(path: PathSequence) -> Self {
        path.0
    }
}

/// Axis-aligned bounding box over every point of every path.
///
/// Returns `(min_x, min_y, max_x, max_y)`, or `None` when there are no points.
pub fn bounding_box(paths: &[PathSequence]) -> Option<(f64, f64, f64, f64)> {
    let mut points = paths.iter().flat_map(|p| p.iter());
    let first = points.next()?;
    let init = (first.x, first.y, first.x, first.y);
    Some(points.fold(init, |(min_x, min_y, max_x, max_y), p| {
        (min_x.min(p.x), min_y.min(p.y), max_x.max(p.x), max_y.max(p.y))
    }))
}
