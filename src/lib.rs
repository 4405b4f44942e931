//! # Plotline - Pen Plotter Job Builder
//!
//! Plotline turns vector artwork and procedural noise patterns into HPGL
//! jobs for a pen plotter. It provides:
//!
//! - **Path parsing**: SVG path data and `points` lists, cubic curves flattened
//! - **Document collection**: Every shape in an SVG file, in document order
//! - **Silhouette masks**: The artwork outline rasterized onto the canvas
//! - **Noise patterns**: Seven seeded fill patterns
//! - **Encoding**: Pen-up/pen-down commands, clipped to the mask
//! - **Transport**: Chunked writes to the plotter device with retry
//!
//! ## Quick Start
//!
//! ```no_run
//! use plotline::{
//!     document::{CollectOptions, parse_document},
//!     job::{JobInput, encode_job},
//!     mask::{Mask, MaskMode},
//!     pattern::{self, PatternKind, PatternSpec},
//!     transport::{DeviceTransport, Transport},
//!     PlotterConfig,
//! };
//!
//! let config = PlotterConfig::DEFAULT;
//!
//! // Load the artwork and build its silhouette
//! let svg = std::fs::read_to_string("logo.svg")?;
//! let collected = parse_document(&svg, &CollectOptions::default())?;
//! let mask = Mask::build(
//!     &collected.paths,
//!     config.canvas_width,
//!     config.canvas_height,
//!     MaskMode::Fused,
//! )?;
//!
//! // Fill it with a pattern
//! let spec = PatternSpec { kind: PatternKind::Diag1, seed: 7, ..Default::default() };
//! let output = pattern::generate(&spec, Some(&mask))?;
//! let data = encode_job(&JobInput::from(&output), config.pattern_transform(), Some(&mask));
//!
//! // Send to the plotter
//! let mut transport = DeviceTransport::open_default()?;
//! transport.write_all(&data)?;
//!
//! # Ok::<(), plotline::PlotlineError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`path`] | Points, path sequences, path data and Bézier flattening |
//! | [`document`] | SVG loading and shape collection |
//! | [`mask`] | Fit-to-canvas transform and silhouette rasterization |
//! | [`shader`] | Noise and numeric helpers |
//! | [`pattern`] | Noise pattern generators |
//! | [`plotter`] | Presets, job config, device transforms, the encoder |
//! | [`protocol`] | HPGL commands and job framing |
//! | [`job`] | Geometry to finished job bytes |
//! | [`transport`] | Communication backends |
//! | [`error`] | Error types |

pub mod document;
pub mod error;
pub mod job;
pub mod mask;
pub mod path;
pub mod pattern;
pub mod plotter;
pub mod protocol;
pub mod shader;
pub mod transport;

// Re-exports for convenience
pub use error::{ParseError, PlotlineError};
pub use plotter::PlotterConfig;
pub use transport::DeviceTransport;
