//! Bounded field copying and delimiter skipping.
//!
//! `copy_until` is the engine's only way of getting a small structured
//! field (an IP address, a version string, a decimal length) out of the
//! stream: the caller supplies a fixed-capacity buffer and the field is
//! copied byte by byte until the delimiter, the capacity, or the deadline
//! stops it. `skip_until` is the same consumption loop with the copy
//! removed.

use std::time::{Duration, Instant};

use crate::{Engine, Transport};

/// Outcome of [`Engine::copy_until`]. Each variant carries the number of
/// data bytes written; the buffer is NUL-terminated at that index on every
/// path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum CopyOutcome {
    /// The delimiter was seen; it was consumed but not stored.
    Success {
        /// Data bytes written before the delimiter.
        len: usize,
    },
    /// The buffer filled up before the delimiter appeared. The delimiter
    /// (and anything before it that did not fit) is still unread, so the
    /// caller may resume scanning.
    LengthExceeded {
        /// Data bytes written (always `capacity - 1`).
        len: usize,
    },
    /// The deadline passed. Whatever arrived in time is in the buffer.
    TimedOut {
        /// Data bytes written before the deadline.
        len: usize,
    },
}

/// Outcome of [`Engine::skip_until`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum SkipOutcome {
    /// The delimiter was seen and consumed.
    Success,
    /// The deadline passed first.
    TimedOut,
}

impl<'a, T: Transport> Engine<'a, T> {
    /// Copy stream bytes into `buf` until `delimiter` is seen.
    ///
    /// At most `buf.len() - 1` data bytes are stored; the final slot is
    /// reserved for the NUL terminator, which is written on every return
    /// path — even a timeout with zero bytes copied leaves `buf[0] == 0`.
    /// On [`CopyOutcome::Success`] the delimiter has been consumed from the
    /// stream but not stored.
    ///
    /// # Panics
    ///
    /// Panics if `buf` cannot hold at least one data byte plus the
    /// terminator (`buf.len() < 2`). Undersized buffers are a programming
    /// error, not a runtime condition.
    pub fn copy_until(&mut self, buf: &mut [u8], delimiter: u8, timeout: Duration) -> CopyOutcome {
        self.copy_until_deadline(buf, delimiter, Self::deadline(timeout))
    }

    pub(crate) fn copy_until_deadline(
        &mut self,
        buf: &mut [u8],
        delimiter: u8,
        deadline: Instant,
    ) -> CopyOutcome {
        assert!(buf.len() >= 2, "copy_until buffer must hold a byte and the terminator");

        let mut len = 0;
        while Instant::now() < deadline {
            let Some(byte) = self.poll_byte() else {
                continue;
            };
            if byte == delimiter {
                buf[len] = 0;
                return CopyOutcome::Success { len };
            }
            buf[len] = byte;
            len += 1;
            if len + 1 >= buf.len() {
                buf[len] = 0;
                return CopyOutcome::LengthExceeded { len };
            }
        }
        buf[len] = 0;
        log::trace!("copy_until: deadline after {len} bytes, no 0x{delimiter:02X}");
        CopyOutcome::TimedOut { len }
    }

    /// Consume and discard stream bytes until `delimiter` is seen; the
    /// delimiter itself is consumed too.
    pub fn skip_until(&mut self, delimiter: u8, timeout: Duration) -> SkipOutcome {
        self.skip_until_deadline(delimiter, Self::deadline(timeout))
    }

    pub(crate) fn skip_until_deadline(&mut self, delimiter: u8, deadline: Instant) -> SkipOutcome {
        while Instant::now() < deadline {
            if self.poll_byte() == Some(delimiter) {
                return SkipOutcome::Success;
            }
        }
        SkipOutcome::TimedOut
    }
}
