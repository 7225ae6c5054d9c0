//! Output sink for `print` and `println`.
//!
//! Oak strings are byte buffers, so handlers take `&[u8]` and never
//! re-validate UTF-8 on the way out.
//!
//! - Stdout: the `oak` binary
//! - Buffer: tests and embedders that capture output
//! - Silent: discards everything

use std::io::Write;

use parking_lot::Mutex;
use tracing::warn;

/// Writes straight to the process's stdout.
#[derive(Default)]
pub struct StdoutPrintHandler;

impl StdoutPrintHandler {
    fn write(&self, bytes: &[u8], newline: bool) {
        let mut out = std::io::stdout().lock();
        let result = out
            .write_all(bytes)
            .and_then(|()| if newline { out.write_all(b"\n") } else { Ok(()) })
            .and_then(|()| out.flush());
        if let Err(err) = result {
            warn!(%err, "failed to write program output");
        }
    }
}

/// Captures output in memory.
pub struct BufferPrintHandler {
    buffer: Mutex<Vec<u8>>,
}

impl BufferPrintHandler {
    pub fn new() -> Self {
        BufferPrintHandler {
            buffer: Mutex::new(Vec::new()),
        }
    }

    fn write(&self, bytes: &[u8], newline: bool) {
        let mut buf = self.buffer.lock();
        buf.extend_from_slice(bytes);
        if newline {
            buf.push(b'\n');
        }
    }

    /// Everything captured so far, with invalid UTF-8 replaced.
    pub fn output(&self) -> String {
        String::from_utf8_lossy(&self.buffer.lock()).into_owned()
    }

    pub fn clear(&self) {
        self.buffer.lock().clear();
    }
}

impl Default for BufferPrintHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Print handler, dispatched by enum rather than trait object.
pub enum PrintHandlerImpl {
    Stdout(StdoutPrintHandler),
    Buffer(BufferPrintHandler),
    Silent,
}

impl PrintHandlerImpl {
    /// Write `bytes` followed by a newline.
    pub fn println(&self, bytes: &[u8]) {
        match self {
            Self::Stdout(h) => h.write(bytes, true),
            Self::Buffer(h) => h.write(bytes, true),
            Self::Silent => {}
        }
    }

    /// Write `bytes` as-is.
    pub fn print(&self, bytes: &[u8]) {
        match self {
            Self::Stdout(h) => h.write(bytes, false),
            Self::Buffer(h) => h.write(bytes, false),
            Self::Silent => {}
        }
    }

    /// Captured output; empty for handlers that do not capture.
    pub fn output(&self) -> String {
        match self {
            Self::Buffer(h) => h.output(),
            Self::Stdout(_) | Self::Silent => String::new(),
        }
    }

    pub fn clear(&self) {
        if let Self::Buffer(h) = self {
            h.clear();
        }
    }
}

/// Print handler shared between the interpreter and whoever reads the output.
pub type SharedPrintHandler = std::sync::Arc<PrintHandlerImpl>;

pub fn stdout_handler() -> SharedPrintHandler {
    std::sync::Arc::new(PrintHandlerImpl::Stdout(StdoutPrintHandler))
}

pub fn buffer_handler() -> SharedPrintHandler {
    std::sync::Arc::new(PrintHandlerImpl::Buffer(BufferPrintHandler::new()))
}

pub fn silent_handler() -> SharedPrintHandler {
    std::sync::Arc::new(PrintHandlerImpl::Silent)
}

#[cfg(test)]
mod tests;
