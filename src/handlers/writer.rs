//! Shared output writer for sinks

use crate::core::{LoggerError, Result};
use parking_lot::Mutex;
use std::fmt;
use std::io::Write;
use std::sync::Arc;

/// Cloneable handle to one output stream
///
/// Every clone writes to the same underlying writer; each record is written
/// under the lock so concurrent records never interleave.
#[derive(Clone)]
pub struct SharedWriter {
    inner: Arc<Mutex<Box<dyn Write + Send>>>,
}

impl SharedWriter {
    pub fn new<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Box::new(writer))),
        }
    }

    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }

    /// Write one complete encoded record
    pub fn write_record(&self, bytes: &[u8]) -> Result<()> {
        let mut writer = self.inner.lock();
        writer
            .write_all(bytes)
            .map_err(|e| LoggerError::io_operation("writing log record", "write failed", e))
    }

    pub fn flush(&self) -> Result<()> {
        self.inner.lock().flush()?;
        Ok(())
    }
}

impl Default for SharedWriter {
    fn default() -> Self {
        Self::stdout()
    }
}

impl fmt::Debug for SharedWriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedWriter").finish_non_exhaustive()
    }
}
