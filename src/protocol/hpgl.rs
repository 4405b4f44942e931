//! # HPGL Pen Commands
//!
//! The plotter accepts a small ASCII subset of HPGL:
//!
//! | Text | Meaning |
//! |------|---------|
//! | `IN;` | Initialize |
//! | `PA;` | Absolute coordinates |
//! | `!ST1,0;` | Vendor setup (tool 1) |
//! | `PU<x>,<y>;` | Lift the pen and travel to `(x, y)` |
//! | `PD<x>,<y>;` | Lower the pen and draw to `(x, y)` |
//!
//! Coordinates are signed integers in device units, printed without
//! padding or a `+` sign.
//!
//! ## Job Layout
//!
//! ```text
//! IN;PA;!ST1,0;  PU..;PD..;PD..;PU..;...  PU0,0;
//! └── HEADER ──┘ └──────── body ────────┘ └FOOTER┘
//! ```
//!
//! The footer parks the pen at the origin.

use std::fmt;

/// Sent before every job.
pub const HEADER: &str = "IN;PA;!ST1,0;";

/// Sent after every job.
pub const FOOTER: &str = "PU0,0;";

/// One pen move in device units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// `PU x,y;`
    PenUp(i32, i32),
    /// `PD x,y;`
    PenDown(i32, i32),
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PenUp(x, y) => write!(f, "PU{},{};", x, y),
            Self::PenDown(x, y) => write!(f, "PD{},{};", x, y),
        }
    }
}

/// Encode commands as ASCII, back to back.
pub fn encode(commands: &[Command]) -> Vec<u8> {
    commands
        .iter()
        .map(Command::to_string)
        .collect::<String>()
        .into_bytes()
}

/// Wrap an encoded body in [`HEADER`] and [`FOOTER`].
pub fn assemble(body: &[u8]) -> Vec<u8> {
    let mut data = Vec::with_capacity(HEADER.len() + body.len() + FOOTER.len());
    data.extend_from_slice(HEADER.as_bytes());
    data.extend_from_slice(body);
    data.extend_from_slice(FOOTER.as_bytes());
    data
}
