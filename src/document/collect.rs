//! Depth-first shape collection.
//!
//! Walks a [`DocNode`] tree in document order and returns one polyline
//! per geometry element. An element whose data fails to parse is dropped
//! and reported as a [`Diagnostic`]; the walk continues.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{DocNode, ElementKind};
use crate::error::ParseError;
use crate::path::{DEFAULT_SEGMENTS, PathParser, PathSequence, UnsupportedPolicy, parse_points};

/// Collector settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectOptions {
    /// Append the first point to polylines as well as polygons.
    pub close_polylines: bool,
    /// Segments per cubic curve.
    pub curve_segments: usize,
    /// Handling of quadratic and arc path commands.
    pub unsupported: UnsupportedPolicy,
}

impl Default for CollectOptions {
    fn default() -> Self {
        Self {
            close_polylines: true,
            curve_segments: DEFAULT_SEGMENTS,
            unsupported: UnsupportedPolicy::Reject,
        }
    }
}

/// A problem with one element.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    /// Element label, e.g. `<path id="logo">`.
    pub element: String,
    pub error: ParseError,
    /// False when the element was dropped, true when a partial result was kept.
    pub kept: bool,
}

/// Output of [`collect`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Collected {
    pub paths: Vec<PathSequence>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Collect every path, polygon and polyline under `root`.
pub fn collect<N: DocNode>(root: &N, options: &CollectOptions) -> Collected {
    let parser = PathParser::new()
        .segments(options.curve_segments)
        .unsupported(options.unsupported);
    let mut out = Collected::default();
    walk(root, options, &parser, &mut out);
    debug!(
        paths = out.paths.len(),
        dropped = out.diagnostics.iter().filter(|d| !d.kept).count(),
        "collected shapes"
    );
    out
}

fn walk<N: DocNode>(node: &N, options: &CollectOptions, parser: &PathParser, out: &mut Collected) {
    match node.kind() {
        ElementKind::Path => {
            let Some(d) = geometry(node, "d") else {
                return;
            };
            match parser.parse(d) {
                Ok(parsed) => {
                    for command in parsed.skipped {
                        out.diagnostics.push(Diagnostic {
                            element: node.label(),
                            error: ParseError::UnsupportedCommand(command),
                            kept: true,
                        });
                    }
                    out.paths.push(parsed.points);
                }
                Err(error) => drop_element(node, error, out),
            }
        }
        ElementKind::Polygon | ElementKind::Polyline => {
            let Some(points) = geometry(node, "points") else {
                return;
            };
            let close = node.kind() == ElementKind::Polygon || options.close_polylines;
            match parse_points(points, close) {
                Ok(path) => out.paths.push(path),
                Err(error) => drop_element(node, error, out),
            }
        }
        ElementKind::Group => {
            for child in node.children() {
                walk(child, options, parser, out);
            }
        }
        ElementKind::Other => {}
    }
}

/// The geometry attribute, or `None` when missing or blank.
fn geometry<'a, N: DocNode>(node: &'a N, name: &str) -> Option<&'a str> {
    match node.attribute(name) {
        Some(value) if !value.trim().is_empty() => Some(value),
        _ => {
            debug!(element = %node.label(), attribute = name, "no geometry, skipping");
            None
        }
    }
}

fn drop_element<N: DocNode>(node: &N, error: ParseError, out: &mut Collected) {
    let element = node.label();
    warn!(element = %element, error = %error, "dropping element");
    out.diagnostics.push(Diagnostic {
        element,
        error,
        kept: false,
    });
}
