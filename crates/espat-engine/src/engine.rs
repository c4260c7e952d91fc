//! The engine itself: a borrowed transport plus a set of blocking,
//! deadline-bounded stream operations.

use std::time::{Duration, Instant};

use crate::Transport;

/// The streaming protocol engine.
///
/// An engine borrows one transport for its whole lifetime and owns it
/// exclusively while any operation runs: a single connection, a single
/// pending command, no interleaved access. All operations block the caller
/// in a poll loop until they complete or their deadline passes; the
/// deadline is computed once at entry and never extended on partial
/// progress.
pub struct Engine<'a, T: Transport> {
    link: &'a mut T,
}

impl<'a, T: Transport> Engine<'a, T> {
    /// Create an engine over a borrowed transport.
    pub fn new(link: &'a mut T) -> Self {
        Engine { link }
    }

    /// Write bytes to the link verbatim.
    pub fn send(&mut self, data: &[u8]) {
        self.link.write(data);
    }

    /// Direct access to the underlying transport, for callers that need to
    /// read or write around the engine between operations.
    pub fn link(&mut self) -> &mut T {
        self.link
    }

    /// Poll the link once for a byte.
    pub(crate) fn poll_byte(&mut self) -> Option<u8> {
        if self.link.byte_available() {
            Some(self.link.read_byte())
        } else {
            None
        }
    }

    /// Compute the absolute deadline for an operation starting now.
    pub(crate) fn deadline(timeout: Duration) -> Instant {
        Instant::now() + timeout
    }
}
