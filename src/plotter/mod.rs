//! # Plotter Module
//!
//! Everything between canvas geometry and HPGL commands.
//!
//! ## Modules
//!
//! - [`config`]: Plotter presets and the JSON job file
//! - [`transform`]: Canvas to device coordinate conversion
//! - [`encoder`]: Begin/vertex/end state machine producing pen commands
//! - [`shapes`]: Line, rectangle and ellipse helpers

pub mod config;
pub mod encoder;
pub mod shapes;
pub mod transform;

pub use config::{DeviceConfig, JobConfig, MaskConfig, OutputConfig, PlotterConfig};
pub use encoder::PlotterEncoder;
pub use transform::{DeviceTransform, ToDevice, round_half_up};
