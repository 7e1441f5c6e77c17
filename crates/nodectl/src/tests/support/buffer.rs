//! In-memory writer whose clones share one buffer.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

/// Cloneable sink used wherever production code writes to stdout.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    /// Everything written so far, decoded lossily.
    #[must_use]
    pub fn contents(&self) -> String {
        let bytes = self.bytes.lock().expect("buffer mutex poisoned");
        String::from_utf8_lossy(&bytes).into_owned()
    }

    /// Written lines, without terminators.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_owned).collect()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes
            .lock()
            .expect("buffer mutex poisoned")
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
