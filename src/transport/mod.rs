//! # Plotter Transport Layer
//!
//! Delivery of finished job bytes to the plotter.
//!
//! ## Available Transports
//!
//! - [`device`]: A device file such as `/dev/usb/lp0` or a serial TTY
//! - `Vec<u8>`: In-memory sink, useful for dry runs and tests
//!
//! Opening and retrying are the caller's business: [`send_with_retry`]
//! takes an `open` closure and calls it again after each failure.

pub mod device;

use std::thread;
use std::time::Duration;

use tracing::{info, warn};

use crate::error::PlotlineError;

pub use device::{DEFAULT_DEVICE, DeviceTransport};

/// A byte sink that accepts whole jobs.
pub trait Transport {
    fn write_all(&mut self, data: &[u8]) -> Result<(), PlotlineError>;
}

impl Transport for Vec<u8> {
    fn write_all(&mut self, data: &[u8]) -> Result<(), PlotlineError> {
        self.extend_from_slice(data);
        Ok(())
    }
}

/// Open a transport and send `data`, reopening up to `attempts` times.
///
/// Both open and write failures count as an attempt. The error from the
/// last attempt is returned.
pub fn send_with_retry<T, F>(
    mut open: F,
    data: &[u8],
    attempts: u32,
    delay: Duration,
) -> Result<(), PlotlineError>
where
    T: Transport,
    F: FnMut() -> Result<T, PlotlineError>,
{
    let attempts = attempts.max(1);
    let mut attempt = 1;
    loop {
        let result = open().and_then(|mut transport| transport.write_all(data));
        match result {
            Ok(()) => {
                info!(bytes = data.len(), attempt, "job sent");
                return Ok(());
            }
            Err(e) if attempt < attempts => {
                warn!(attempt, error = %e, "send failed, retrying");
                thread::sleep(delay);
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}
