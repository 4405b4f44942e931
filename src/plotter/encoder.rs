//! # Pen Command Encoder
//!
//! Turns begin/vertex/end events into pen-up and pen-down commands.
//!
//! ## State Machine
//!
//! ```text
//!          begin()               vertex(x, y)
//!  Idle ───────────► Active ◄──────────────┐
//!   ▲                  │ └─────────────────┘
//!   └──────────────────┘
//!          end()
//! ```
//!
//! A vertex outside a bracket is ignored. Inside a bracket the first
//! vertex travels with the pen up (`PU`) and the rest draw (`PD`).
//!
//! ## Masking
//!
//! With a [`Mask`], each vertex is tested at its canvas position before
//! the device transform. A vertex outside the mask emits nothing and
//! breaks the stroke; the next vertex inside travels with `PU` again, so
//! no line is drawn across the gap.

use crate::mask::Mask;
use crate::protocol::hpgl::{self, Command};

use super::transform::{DeviceTransform, ToDevice};

/// Per-job encoder state.
///
/// ## Example
///
/// ```
/// use plotline::plotter::{DeviceTransform, PlotterEncoder};
///
/// let mut enc = PlotterEncoder::new(DeviceTransform::identity());
/// enc.begin();
/// enc.vertex(0.0, 0.0);
/// enc.vertex(1.0, 1.0);
/// enc.end();
/// assert_eq!(enc.extract_buffer(), b"PU0,0;PD1,1;");
/// ```
#[derive(Debug, Clone)]
pub struct PlotterEncoder<'m, T = DeviceTransform> {
    transform: T,
    mask: Option<&'m Mask>,
    dedupe_pen_down: bool,
    active: bool,
    first_point: bool,
    gap: bool,
    last_pen: Option<(i32, i32)>,
    commands: Vec<Command>,
}

impl<'m, T: ToDevice> PlotterEncoder<'m, T> {
    pub fn new(transform: T) -> Self {
        Self {
            transform,
            mask: None,
            dedupe_pen_down: false,
            active: false,
            first_point: false,
            gap: false,
            last_pen: None,
            commands: Vec::new(),
        }
    }

    /// Gate vertices and dots by `mask`.
    pub fn with_mask(mut self, mask: &'m Mask) -> Self {
        self.mask = Some(mask);
        self
    }

    /// Drop a `PD` whose device position equals the current pen position.
    pub fn dedupe_pen_down(mut self, enabled: bool) -> Self {
        self.dedupe_pen_down = enabled;
        self
    }

    /// Open a stroke.
    pub fn begin(&mut self) {
        self.active = true;
        self.first_point = true;
        self.gap = false;
    }

    /// Add a vertex to the open stroke.
    pub fn vertex(&mut self, x: f64, y: f64) {
        if !self.active {
            return;
        }
        if self.mask.is_some_and(|m| !m.is_inside(x, y)) {
            self.gap = true;
            return;
        }

        let (dx, dy) = self.transform.to_device(x, y);
        if self.first_point || self.gap {
            self.commands.push(Command::PenUp(dx, dy));
            self.first_point = false;
            self.gap = false;
        } else {
            if self.dedupe_pen_down && self.last_pen == Some((dx, dy)) {
                return;
            }
            self.commands.push(Command::PenDown(dx, dy));
        }
        self.last_pen = Some((dx, dy));
    }

    /// Close the open stroke.
    pub fn end(&mut self) {
        self.active = false;
    }

    /// Mark a single point: travel there, then touch the pen down.
    ///
    /// Independent of any open stroke. Masked like a vertex.
    pub fn dot(&mut self, x: f64, y: f64) {
        if self.mask.is_some_and(|m| !m.is_inside(x, y)) {
            return;
        }
        let (dx, dy) = self.transform.to_device(x, y);
        self.commands.push(Command::PenUp(dx, dy));
        self.commands.push(Command::PenDown(dx, dy));
        self.last_pen = Some((dx, dy));
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<Command> {
        self.commands
    }

    /// Encoded command body, without job header or footer.
    pub fn extract_buffer(self) -> Vec<u8> {
        hpgl::encode(&self.commands)
    }
}
