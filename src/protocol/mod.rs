//! # Plotter Protocol
//!
//! Command builders for the HPGL dialect spoken by the plotter.
//!
//! - [`hpgl`]: Pen commands, their text encoding, job header and footer
//!
//! ## Usage Example
//!
//! ```
//! use plotline::protocol::hpgl::{self, Command};
//!
//! let body = hpgl::encode(&[Command::PenUp(0, 0), Command::PenDown(100, 0)]);
//! let job = hpgl::assemble(&body);
//! assert_eq!(job, b"IN;PA;!ST1,0;PU0,0;PD100,0;PU0,0;");
//! ```

pub mod hpgl;

pub use hpgl::Command;
