//! # Device File Transport
//!
//! Writes job bytes to a plotter exposed as a device file: a USB printer
//! class node (`/dev/usb/lp0`) or a USB-serial TTY (`/dev/ttyUSB0`).
//!
//! ## TTY Configuration
//!
//! When the device is a terminal it is switched to raw mode so the ASCII
//! command stream reaches the plotter untouched:
//!
//! - **No input processing**: Disable IGNBRK, BRKINT, PARMRK, ISTRIP, etc.
//! - **No output processing**: Disable OPOST (no CR/LF translation)
//! - **8-bit characters**: CS8 (8 data bits, no parity)
//! - **No echo**: Disable ECHO, ECHONL
//! - **Non-canonical mode**: Disable ICANON (no line buffering)
//!
//! Plain device nodes are written as-is.
//!
//! ## Chunked Writes
//!
//! Large jobs are written in chunks with a short pause in between so the
//! plotter's input buffer keeps up. The default chunk size is 4096 bytes.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::thread;
use std::time::Duration;

use tracing::debug;

use super::Transport;
use crate::error::PlotlineError;

/// Default plotter device path
pub const DEFAULT_DEVICE: &str = "/dev/usb/lp0";

/// Default chunk size for writes (bytes)
const CHUNK_SIZE: usize = 4096;

/// Delay between chunks (milliseconds)
const CHUNK_DELAY_MS: u64 = 2;

/// # Device Transport
///
/// An open, writable plotter device.
///
/// ## Example
///
/// ```no_run
/// use plotline::protocol::hpgl;
/// use plotline::transport::{DeviceTransport, Transport};
///
/// let mut transport = DeviceTransport::open("/dev/usb/lp0")?;
/// transport.write_all(&hpgl::assemble(b"PU0,0;PD100,100;"))?;
///
/// # Ok::<(), plotline::PlotlineError>(())
/// ```
pub struct DeviceTransport {
    file: File,
    chunk_size: usize,
    chunk_delay: Duration,
}

impl DeviceTransport {
    /// Open a device for writing.
    ///
    /// ## Errors
    ///
    /// Returns an error if:
    /// - The device doesn't exist
    /// - Permission denied (may need the `lp` or `dialout` group)
    /// - TTY configuration fails
    pub fn open<P: AsRef<Path>>(device: P) -> Result<Self, PlotlineError> {
        let path = device.as_ref();

        let file = OpenOptions::new().write(true).open(path).map_err(|e| {
            PlotlineError::Transport(format!("Failed to open {}: {}", path.display(), e))
        })?;

        if is_tty(&file) {
            debug!(device = %path.display(), "configuring raw tty");
            configure_tty_raw(&file)?;
        }

        Ok(Self {
            file,
            chunk_size: CHUNK_SIZE,
            chunk_delay: Duration::from_millis(CHUNK_DELAY_MS),
        })
    }

    /// Open with default device path (/dev/usb/lp0)
    pub fn open_default() -> Result<Self, PlotlineError> {
        Self::open(DEFAULT_DEVICE)
    }

    /// Set the chunk size for large writes. Zero is treated as one.
    pub fn set_chunk_size(&mut self, size: usize) {
        self.chunk_size = size.max(1);
    }

    /// Set the delay between chunks. Default is 2ms.
    pub fn set_chunk_delay(&mut self, delay: Duration) {
        self.chunk_delay = delay;
    }
}

impl Transport for DeviceTransport {
    fn write_all(&mut self, data: &[u8]) -> Result<(), PlotlineError> {
        write_chunked(&mut self.file, data, self.chunk_size, self.chunk_delay)
    }
}

/// Write `data` in `chunk_size` pieces, pausing between pieces, then flush.
fn write_chunked<W: Write>(
    out: &mut W,
    data: &[u8],
    chunk_size: usize,
    delay: Duration,
) -> Result<(), PlotlineError> {
    let mut chunks = data.chunks(chunk_size.max(1)).peekable();
    while let Some(chunk) = chunks.next() {
        out.write_all(chunk)
            .map_err(|e| PlotlineError::Transport(format!("Write failed: {}", e)))?;

        if chunks.peek().is_some() && !delay.is_zero() {
            thread::sleep(delay);
        }
    }

    out.flush()
        .map_err(|e| PlotlineError::Transport(format!("Flush failed: {}", e)))
}

#[cfg(unix)]
fn is_tty(file: &File) -> bool {
    use std::os::unix::io::AsRawFd;

    unsafe { libc::isatty(file.as_raw_fd()) == 1 }
}

#[cfg(not(unix))]
fn is_tty(_file: &File) -> bool {
    false
}

/// Configure a terminal for raw binary I/O.
///
/// IXON/IXOFF/IXANY are cleared so XON/XOFF bytes are not swallowed.
#[cfg(unix)]
fn configure_tty_raw(file: &File) -> Result<(), PlotlineError> {
    use std::mem::MaybeUninit;
    use std::os::unix::io::AsRawFd;

    let fd = file.as_raw_fd();

    let mut termios = MaybeUninit::uninit();
    let result = unsafe { libc::tcgetattr(fd, termios.as_mut_ptr()) };
    if result != 0 {
        return Err(PlotlineError::Transport(format!(
            "tcgetattr failed: {}",
            io::Error::last_os_error()
        )));
    }
    let mut termios = unsafe { termios.assume_init() };

    termios.c_iflag &= !(libc::IGNBRK
        | libc::BRKINT
        | libc::PARMRK
        | libc::ISTRIP
        | libc::INLCR
        | libc::IGNCR
        | libc::ICRNL
        | libc::IXON
        | libc::IXOFF
        | libc::IXANY);

    termios.c_oflag &= !libc::OPOST;

    termios.c_lflag &= !(libc::ECHO | libc::ECHONL | libc::ICANON | libc::ISIG | libc::IEXTEN);

    termios.c_cflag &= !(libc::CSIZE | libc::PARENB);
    termios.c_cflag |= libc::CS8;

    let result = unsafe { libc::tcsetattr(fd, libc::TCSANOW, &termios) };
    if result != 0 {
        return Err(PlotlineError::Transport(format!(
            "tcsetattr failed: {}",
            io::Error::last_os_error()
        )));
    }

    Ok(())
}

#[cfg(not(unix))]
fn configure_tty_raw(_file: &File) -> Result<(), PlotlineError> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records each write call separately.
    #[derive(Default)]
    struct Recorder {
        writes: Vec<Vec<u8>>,
        flushed: bool,
    }

    impl Write for Recorder {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.writes.push(buf.to_vec());
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            self.flushed = true;
            Ok(())
        }
    }

    #[test]
    fn test_default_device_path() {
        assert_eq!(DEFAULT_DEVICE, "/dev/usb/lp0");
    }

    #[test]
    fn test_small_write_single_chunk() {
        let mut out = Recorder::default();
        write_chunked(&mut out, b"IN;PA;", 4096, Duration::ZERO).unwrap();
        assert_eq!(out.writes, vec![b"IN;PA;".to_vec()]);
        assert!(out.flushed);
    }

    #[test]
    fn test_large_write_chunked() {
        let mut out = Recorder::default();
        let data: Vec<u8> = (0..10u8).collect();
        write_chunked(&mut out, &data, 4, Duration::ZERO).unwrap();
        assert_eq!(out.writes, vec![vec![0, 1, 2, 3], vec![4, 5, 6, 7], vec![8, 9]]);
    }

    #[test]
    fn test_empty_write_flushes() {
        let mut out = Recorder::default();
        write_chunked(&mut out, b"", 4096, Duration::ZERO).unwrap();
        assert!(out.writes.is_empty());
        assert!(out.flushed);
    }

    #[test]
    fn test_open_missing_device() {
        let err = DeviceTransport::open("/nonexistent/plotter").err().unwrap();
        assert!(matches!(err, PlotlineError::Transport(_)));
    }

    #[test]
    fn test_write_to_regular_file() {
        let path = std::env::temp_dir().join(format!("plotline-device-{}", std::process::id()));
        File::create(&path).unwrap();
        let mut transport = DeviceTransport::open(&path).unwrap();
        transport.set_chunk_delay(Duration::ZERO);
        transport.write_all(b"IN;PA;!ST1,0;PU0,0;").unwrap();
        drop(transport);
        assert_eq!(std::fs::read(&path).unwrap(), b"IN;PA;!ST1,0;PU0,0;");
        std::fs::remove_file(&path).unwrap();
    }
}
