//! # Silhouette Mask
//!
//! Fits the collected artwork into the canvas and rasterizes its outline
//! into a coverage bitmap the same size as the canvas. Pattern points are
//! then kept or dropped by asking [`Mask::is_inside`].
//!
//! ## Fit-to-Canvas
//!
//! ```text
//! scale    = min(width / bbox_w, height / bbox_h)
//! offset_x = (width  - bbox_w * scale) / 2
//! offset_y = (height - bbox_h * scale) / 2
//! canvas   = (p - bbox_min) * scale + offset
//! ```
//!
//! ## Modes
//!
//! - [`MaskMode::Fused`]: every point of every path is joined into one
//!   polygon. Disjoint shapes get bridged by the joining edges.
//! - [`MaskMode::PerPath`]: each path is filled as its own closed polygon
//!   and the results are unioned.
//!
//! ## Threshold
//!
//! Coverage is 0-255. A pixel is inside when its coverage is above
//! [`THRESHOLD`] (so 129 and up).

pub mod raster;

use std::path::Path;

use image::{GrayImage, ImageBuffer, Luma};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::PlotlineError;
use crate::path::{PathSequence, Point, bounding_box};

/// Coverage at or below this value is outside.
pub const THRESHOLD: u8 = 128;

/// How separate paths combine into the silhouette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaskMode {
    #[default]
    Fused,
    PerPath,
}

/// The bounding box to canvas mapping a mask was built with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitTransform {
    pub min_x: f64,
    pub min_y: f64,
    pub scale: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl FitTransform {
    /// Identity mapping.
    pub const IDENTITY: Self = Self {
        min_x: 0.0,
        min_y: 0.0,
        scale: 1.0,
        offset_x: 0.0,
        offset_y: 0.0,
    };

    /// Fit `paths` into a `width` x `height` canvas, centered.
    pub fn fit(paths: &[PathSequence], width: u32, height: u32) -> Result<Self, PlotlineError> {
        let (min_x, min_y, max_x, max_y) = bounding_box(paths).ok_or(PlotlineError::EmptyArtwork)?;
        let (bw, bh) = (max_x - min_x, max_y - min_y);
        let (w, h) = (width as f64, height as f64);

        // A flat box still fits along its other axis.
        let scale = match (bw > 0.0, bh > 0.0) {
            (true, true) => (w / bw).min(h / bh),
            (true, false) => w / bw,
            (false, true) => h / bh,
            (false, false) => return Err(PlotlineError::EmptyArtwork),
        };

        Ok(Self {
            min_x,
            min_y,
            scale,
            offset_x: (w - bw * scale) / 2.0,
            offset_y: (h - bh * scale) / 2.0,
        })
    }

    /// Map an artwork point onto the canvas.
    #[inline]
    pub fn apply(&self, p: Point) -> Point {
        Point::new(
            (p.x - self.min_x) * self.scale + self.offset_x,
            (p.y - self.min_y) * self.scale + self.offset_y,
        )
    }

    /// Map every point of every path onto the canvas.
    pub fn apply_all(&self, paths: &[PathSequence]) -> Vec<PathSequence> {
        paths
            .iter()
            .filter_map(|path| PathSequence::new(path.iter().map(|p| self.apply(*p)).collect()))
            .collect()
    }
}

/// A canvas-sized coverage bitmap.
#[derive(Debug, Clone)]
pub struct Mask {
    image: GrayImage,
    fit: FitTransform,
}

impl Mask {
    /// Build the silhouette of `paths` on a `width` x `height` canvas.
    ///
    /// ## Errors
    ///
    /// - [`PlotlineError::Config`] for a zero-sized canvas
    /// - [`PlotlineError::EmptyArtwork`] when the paths have no extent
    #[tracing::instrument(skip(paths), fields(paths = paths.len()))]
    pub fn build(
        paths: &[PathSequence],
        width: u32,
        height: u32,
        mode: MaskMode,
    ) -> Result<Self, PlotlineError> {
        if width == 0 || height == 0 {
            return Err(PlotlineError::Config(format!(
                "canvas must not be empty, got {}x{}",
                width, height
            )));
        }
        let fit = FitTransform::fit(paths, width, height)?;

        let coverage = match mode {
            MaskMode::Fused => {
                let mut edges = Vec::new();
                raster::polygon_edges(
                    paths.iter().flat_map(|path| path.iter()).map(|p| fit.apply(*p)),
                    &mut edges,
                );
                raster::rasterize(&edges, width, height)
            }
            MaskMode::PerPath => {
                let mut union = vec![0u8; width as usize * height as usize];
                for path in paths {
                    let mut edges = Vec::new();
                    raster::polygon_edges(path.iter().map(|p| fit.apply(*p)), &mut edges);
                    let cov = raster::rasterize(&edges, width, height);
                    for (u, c) in union.iter_mut().zip(cov) {
                        *u = (*u).max(c);
                    }
                }
                union
            }
        };

        let image = ImageBuffer::from_raw(width, height, coverage)
            .ok_or_else(|| PlotlineError::Image("coverage buffer size mismatch".to_string()))?;
        let mask = Self { image, fit };
        debug!(
            scale = fit.scale,
            offset_x = fit.offset_x,
            offset_y = fit.offset_y,
            inside = mask.inside_count(),
            "built mask"
        );
        Ok(mask)
    }

    /// Wrap an existing grayscale bitmap, already in canvas coordinates.
    pub fn from_image(image: GrayImage) -> Self {
        Self {
            image,
            fit: FitTransform::IDENTITY,
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn fit(&self) -> FitTransform {
        self.fit
    }

    /// Coverage of the pixel nearest `(x, y)`, `None` off the canvas.
    ///
    /// Coordinates round half-up, so a point past the middle of a pixel
    /// reads the next one.
    pub fn intensity(&self, x: f64, y: f64) -> Option<u8> {
        if !(x.is_finite() && y.is_finite()) {
            return None;
        }
        let (px, py) = ((x + 0.5).floor(), (y + 0.5).floor());
        if px < 0.0 || py < 0.0 || px >= self.width() as f64 || py >= self.height() as f64 {
            return None;
        }
        let Luma([v]) = *self.image.get_pixel(px as u32, py as u32);
        Some(v)
    }

    /// Whether `(x, y)` in canvas space is inside the silhouette.
    ///
    /// Anything off the canvas is outside.
    #[inline]
    pub fn is_inside(&self, x: f64, y: f64) -> bool {
        self.intensity(x, y).is_some_and(|v| v > THRESHOLD)
    }

    /// Number of inside pixels.
    pub fn inside_count(&self) -> usize {
        self.image.pixels().filter(|p| p.0[0] > THRESHOLD).count()
    }

    /// Save the coverage bitmap as a PNG.
    pub fn save_png(&self, path: &Path) -> Result<(), PlotlineError> {
        self.image
            .save(path)
            .map_err(|e| PlotlineError::Image(format!("Failed to save mask PNG: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::{parse_path, parse_points};

    #[test]
    fn test_square_fills_square_canvas() {
        let square = parse_path("M0,0 L10,0 L10,10 L0,10 Z").unwrap();
        let mask = Mask::build(&[square], 100, 100, MaskMode::Fused).unwrap();
        assert_eq!(mask.fit().scale, 10.0);
        assert!(mask.is_inside(50.0, 50.0));
        assert!(mask.is_inside(0.5, 0.5));
        assert_eq!(mask.inside_count(), 100 * 100);
    }

    #[test]
    fn test_square_centered_on_wide_canvas() {
        let square = parse_path("M0,0 L10,0 L10,10 L0,10 Z").unwrap();
        let mask = Mask::build(&[square], 200, 100, MaskMode::Fused).unwrap();
        let fit = mask.fit();
        assert_eq!(fit.scale, 10.0);
        assert_eq!(fit.offset_x, 50.0);
        assert_eq!(fit.offset_y, 0.0);
        assert!(mask.is_inside(100.0, 50.0));
        assert!(!mask.is_inside(10.0, 50.0));
        assert!(!mask.is_inside(190.0, 50.0));
        assert!(!mask.is_inside(0.0, 0.0));
        assert!(!mask.is_inside(199.0, 99.0));
    }

    #[test]
    fn test_triangle_corners_outside() {
        let triangle = parse_points("0,0 10,10 0,10", true).unwrap();
        let mask = Mask::build(&[triangle], 100, 100, MaskMode::Fused).unwrap();
        assert!(mask.is_inside(10.0, 90.0));
        assert!(!mask.is_inside(90.0, 10.0));
        assert!(mask.is_inside(30.0, 60.0));
    }

    #[test]
    fn test_out_of_bounds_is_outside() {
        let square = parse_path("M0,0 L10,0 L10,10 L0,10 Z").unwrap();
        let mask = Mask::build(&[square], 20, 20, MaskMode::Fused).unwrap();
        assert!(mask.is_inside(-0.5, 5.0));
        assert!(!mask.is_inside(-0.6, 5.0));
        assert!(!mask.is_inside(20.0, 5.0));
        assert!(!mask.is_inside(19.5, 5.0));
        assert!(!mask.is_inside(5.0, 1e9));
        assert!(!mask.is_inside(f64::NAN, 5.0));
        assert_eq!(mask.intensity(-1.0, 0.0), None);
        assert_eq!(mask.width(), 20);
        assert_eq!(mask.height(), 20);
    }

    #[test]
    fn test_fused_bridges_disjoint_shapes() {
        // A closed square and an open outline further along; the fused
        // polygon jumps between them and closes back to the very first point.
        let left = parse_path("M0,0 L10,0 L10,10 L0,10 Z").unwrap();
        let right = parse_path("M20,10 L30,10 L30,20 L20,20").unwrap();
        let paths = [left, right];

        let fused = Mask::build(&paths, 30, 20, MaskMode::Fused).unwrap();
        let separate = Mask::build(&paths, 30, 20, MaskMode::PerPath).unwrap();
        assert_eq!(fused.fit().scale, 1.0);

        assert!(separate.is_inside(5.0, 5.0));
        assert!(separate.is_inside(25.0, 15.0));
        assert!(!separate.is_inside(15.0, 11.0));
        assert!(fused.is_inside(15.0, 11.0));
        assert!(fused.inside_count() > separate.inside_count());
    }

    #[test]
    fn test_empty_artwork() {
        assert!(matches!(
            Mask::build(&[], 10, 10, MaskMode::Fused),
            Err(PlotlineError::EmptyArtwork)
        ));
        let dot = parse_path("M3,3").unwrap();
        assert!(matches!(
            Mask::build(&[dot], 10, 10, MaskMode::Fused),
            Err(PlotlineError::EmptyArtwork)
        ));
        let square = parse_path("M0,0 L1,1").unwrap();
        assert!(matches!(
            Mask::build(&[square], 0, 10, MaskMode::Fused),
            Err(PlotlineError::Config(_))
        ));
    }

    #[test]
    fn test_flat_artwork_fits_other_axis() {
        let line = parse_path("M0,5 L10,5").unwrap();
        let mask = Mask::build(&[line], 100, 50, MaskMode::Fused).unwrap();
        assert_eq!(mask.fit().scale, 10.0);
        assert_eq!(mask.inside_count(), 0);
    }

    #[test]
    fn test_from_image() {
        let mut img = GrayImage::new(4, 4);
        img.put_pixel(1, 2, Luma([200]));
        img.put_pixel(2, 2, Luma([128]));
        let mask = Mask::from_image(img);
        assert!(mask.is_inside(1.2, 2.1));
        assert!(mask.is_inside(0.5, 1.5));
        assert!(!mask.is_inside(1.5, 2.4));
        assert!(!mask.is_inside(1.2, 2.5));
    }
}
