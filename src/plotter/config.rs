//! # Plotter Configuration
//!
//! Hardware presets and the JSON job file.
//!
//! ## Presets
//!
//! | Preset | Canvas | Output factor | Chunk size |
//! |--------|--------|---------------|------------|
//! | `DEFAULT` | 600 × 600 | 2.0 | 4096 bytes |
//!
//! ## Job File
//!
//! Every field is optional; missing fields take their defaults.
//!
//! ```json
//! {
//!   "pattern": { "kind": "diag1", "seed": 42, "spacing": 8 },
//!   "mask": { "enabled": true, "mode": "per_path" },
//!   "document": { "close_polylines": false },
//!   "output": { "transform": { "type": "scale", "factor": 2.0 } },
//!   "device": { "path": "/dev/usb/lp0", "retries": 5 }
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::document::CollectOptions;
use crate::error::PlotlineError;
use crate::mask::MaskMode;
use crate::pattern::PatternSpec;

use super::transform::DeviceTransform;

/// # Plotter Configuration
///
/// Physical characteristics of a plotter and the canvas it is driven
/// from.
///
/// ## Coordinates
///
/// ```text
/// device = canvas · output_factor
///
/// For DEFAULT:
///   600 px canvas · 2.0 = 1200 device units per side
/// ```
#[derive(Debug, Clone, Copy)]
pub struct PlotterConfig {
    /// Plotter model name
    pub name: &'static str,

    /// Canvas width in pixels
    pub canvas_width: u32,

    /// Canvas height in pixels
    pub canvas_height: u32,

    /// Device units per canvas pixel
    pub output_factor: f64,

    /// Pen calibration offset, device units
    pub pen_offset_x: f64,

    /// Pen calibration offset, device units
    pub pen_offset_y: f64,

    /// Maximum bytes per device write
    pub chunk_size: usize,
}

impl PlotterConfig {
    /// Desktop cutting plotter with an HPGL front end.
    pub const DEFAULT: Self = Self {
        name: "HPGL plotter",
        canvas_width: 600,
        canvas_height: 600,
        output_factor: 2.0,
        pen_offset_x: 0.0,
        pen_offset_y: 0.0,
        chunk_size: 4096,
    };

    /// Transform for generated patterns.
    pub fn pattern_transform(&self) -> DeviceTransform {
        DeviceTransform::Scale {
            factor: self.output_factor,
        }
    }

    /// Transform for traced artwork.
    pub fn trace_transform(&self) -> DeviceTransform {
        DeviceTransform::AxisSwap {
            factor: self.output_factor,
        }
    }

    /// Y-up transform for shapes laid out on the preview canvas.
    pub fn preview_transform(&self) -> DeviceTransform {
        DeviceTransform::PreviewRelative {
            scale: self.output_factor,
            offset_x: self.pen_offset_x,
            offset_y: self.pen_offset_y,
            canvas_height: self.canvas_height as f64,
        }
    }
}

impl Default for PlotterConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// A plotting job as read from JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobConfig {
    pub pattern: PatternSpec,
    pub mask: MaskConfig,
    pub document: CollectOptions,
    pub output: OutputConfig,
    pub device: DeviceConfig,
}

impl JobConfig {
    /// Read a job file.
    pub fn load(path: &Path) -> Result<Self, PlotlineError> {
        let text = fs::read_to_string(path).map_err(|e| {
            PlotlineError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, PlotlineError> {
        let config: Self = serde_json::from_str(text)?;
        config.pattern.validate()?;
        Ok(config)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaskConfig {
    /// Clip patterns to the artwork silhouette. Default: true
    pub enabled: bool,
    pub mode: MaskMode,
}

impl Default for MaskConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            mode: MaskMode::Fused,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Overrides the preset transform for pattern output.
    pub transform: Option<DeviceTransform>,
    pub dedupe_pen_down: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceConfig {
    /// Device file. Default: /dev/usb/lp0
    pub path: PathBuf,
    /// Total send attempts. Default: 3
    pub retries: u32,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(crate::transport::DEFAULT_DEVICE),
            retries: 3,
        }
    }
}
