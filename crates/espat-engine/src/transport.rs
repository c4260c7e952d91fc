//! The byte-stream link the engine reads from and writes to.

use std::collections::VecDeque;

/// An ordered byte-stream source/sink, typically a serial port wired to the
/// radio module.
///
/// The engine performs no read-ahead and no pushback on top of this
/// contract: once [`read_byte`](Transport::read_byte) returns a byte, that
/// byte is consumed and will never be re-examined. Implementations only
/// need whatever buffering the underlying link already provides.
pub trait Transport {
    /// Whether at least one byte can be read without blocking.
    fn byte_available(&mut self) -> bool;

    /// Read the next byte.
    ///
    /// Only meaningful immediately after
    /// [`byte_available`](Transport::byte_available) returned `true`; the
    /// result is otherwise unspecified.
    fn read_byte(&mut self) -> u8;

    /// Write bytes to the link.
    fn write(&mut self, data: &[u8]);
}

/// An in-memory [`Transport`] backed by a scripted byte queue.
///
/// Bytes queued with [`feed`](ScriptedTransport::feed) are served to the
/// engine in order; bytes the engine writes are captured for inspection.
/// Used throughout this workspace's tests, and useful for replaying
/// captured radio exchanges offline.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    rx: VecDeque<u8>,
    tx: Vec<u8>,
}

impl ScriptedTransport {
    /// Create an empty transport.
    pub fn new() -> Self {
        ScriptedTransport::default()
    }

    /// Queue bytes for the engine to read.
    pub fn feed(&mut self, data: &[u8]) {
        self.rx.extend(data);
    }

    /// Bytes queued but not yet read by the engine.
    pub fn unread(&self) -> Vec<u8> {
        self.rx.iter().copied().collect()
    }

    /// Everything the engine has written so far.
    pub fn written(&self) -> &[u8] {
        &self.tx
    }

    /// Take and clear the captured writes.
    pub fn take_written(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.tx)
    }
}

impl Transport for ScriptedTransport {
    fn byte_available(&mut self) -> bool {
        !self.rx.is_empty()
    }

    fn read_byte(&mut self) -> u8 {
        self.rx.pop_front().unwrap_or(0)
    }

    fn write(&mut self, data: &[u8]) {
        self.tx.extend_from_slice(data);
    }
}
