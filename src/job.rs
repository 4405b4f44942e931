//! # Job Composition
//!
//! Glue between geometry and the wire: runs paths or a point cloud
//! through a [`PlotterEncoder`] and wraps the result in the HPGL job
//! header and footer.
//!
//! ```
//! use plotline::job::{JobInput, encode_job};
//! use plotline::path::parse_path;
//! use plotline::plotter::DeviceTransform;
//!
//! let paths = [parse_path("M0,0 L10,0")?];
//! let data = encode_job(&JobInput::Paths(&paths), DeviceTransform::identity(), None);
//! assert_eq!(data, b"IN;PA;!ST1,0;PU0,0;PD10,0;PU0,0;");
//! # Ok::<(), plotline::error::ParseError>(())
//! ```

use tracing::debug;

use crate::mask::Mask;
use crate::path::{PathSequence, Point};
use crate::pattern::PatternOutput;
use crate::plotter::{PlotterEncoder, ToDevice};
use crate::protocol::hpgl;

/// Geometry to plot.
#[derive(Debug, Clone, Copy)]
pub enum JobInput<'a> {
    /// One stroke per path.
    Paths(&'a [PathSequence]),
    /// One dot per point.
    Cloud(&'a [Point]),
}

impl<'a> From<&'a PatternOutput> for JobInput<'a> {
    fn from(output: &'a PatternOutput) -> Self {
        match output {
            PatternOutput::Strokes(paths) => Self::Paths(paths),
            PatternOutput::Cloud(points) => Self::Cloud(points),
        }
    }
}

/// Encode a complete job: header, commands, footer.
pub fn encode_job<T: ToDevice>(input: &JobInput<'_>, transform: T, mask: Option<&Mask>) -> Vec<u8> {
    let mut encoder = PlotterEncoder::new(transform);
    if let Some(mask) = mask {
        encoder = encoder.with_mask(mask);
    }
    encode_with(input, encoder)
}

/// Like [`encode_job`], with a preconfigured encoder.
pub fn encode_with<T: ToDevice>(input: &JobInput<'_>, mut encoder: PlotterEncoder<'_, T>) -> Vec<u8> {
    feed(input, &mut encoder);
    debug!(commands = encoder.commands().len(), "encoded job");
    hpgl::assemble(&encoder.extract_buffer())
}

/// Push `input` through `encoder` without finishing it.
pub fn feed<T: ToDevice>(input: &JobInput<'_>, encoder: &mut PlotterEncoder<'_, T>) {
    match *input {
        JobInput::Paths(paths) => {
            for path in paths {
                encoder.begin();
                for p in path.iter() {
                    encoder.vertex(p.x, p.y);
                }
                encoder.end();
            }
        }
        JobInput::Cloud(points) => {
            for p in points {
                encoder.dot(p.x, p.y);
            }
        }
    }
}
