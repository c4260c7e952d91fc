//! Owned payload buffers returned by the extractor.

/// A payload pulled out of the stream by [`read_packet`] or
/// [`read_http_content`].
///
/// Ownership moves to the caller on return; the engine keeps nothing.
/// Release is automatic on drop on every path — success, truncation, or a
/// caller bailing out early.
///
/// The buffer never holds more than the caller's allocation cap allowed,
/// so [`len`](Payload::len) can be smaller than
/// [`declared_len`](Payload::declared_len): either the cap was below the
/// declared length or the deadline cut the read short. The bytes present
/// are always valid; check [`is_truncated`](Payload::is_truncated) when the
/// difference matters.
///
/// [`read_packet`]: crate::Engine::read_packet
/// [`read_http_content`]: crate::Engine::read_http_content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload {
    data: Vec<u8>,
    declared_len: usize,
}

impl Payload {
    pub(crate) fn with_capacity(capacity: usize, declared_len: usize) -> Self {
        Payload {
            data: Vec::with_capacity(capacity),
            declared_len,
        }
    }

    pub(crate) fn push(&mut self, byte: u8) {
        self.data.push(byte);
    }

    /// The payload bytes received and stored.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Number of bytes stored.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether no bytes were stored.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The length the stream declared for this payload.
    pub fn declared_len(&self) -> usize {
        self.declared_len
    }

    /// Whether fewer bytes were stored than the stream declared.
    pub fn is_truncated(&self) -> bool {
        self.data.len() < self.declared_len
    }

    /// Take the bytes out of the payload.
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}

impl AsRef<[u8]> for Payload {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}
