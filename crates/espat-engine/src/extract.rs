//! Payload extraction: length-prefixed packets and HTTP-style bodies.
//!
//! Both read modes are compositions of the matcher and the bounded copier:
//! find the framing, read the declared length as ASCII decimal, then pull
//! exactly that many bytes into an owned buffer capped by the caller's
//! allocation limit. Bytes beyond the cap are read and dropped so the
//! stream still lands at the end of the declared payload.

use std::time::{Duration, Instant};

use thiserror::Error;

use crate::constants::*;
use crate::{CopyOutcome, Engine, MatchOutcome, Payload, Transport};

/// Errors from the payload extractor.
///
/// The failure taxonomy says which parsing phase gave out; in every case no
/// payload buffer was allocated.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractError {
    /// The packet marker never appeared before the deadline.
    #[error("packet marker not seen before the deadline")]
    MarkerNotFound,

    /// The content-length header never appeared before the deadline.
    #[error("content length header not seen before the deadline")]
    HeaderNotFound,

    /// The blank line ending the header section never appeared.
    #[error("header/body separator not seen before the deadline")]
    SeparatorNotFound,

    /// The length field did not terminate in time, overflowed its field
    /// buffer, or was not ASCII decimal.
    #[error("length field did not terminate or is not ASCII decimal")]
    BadLengthField,
}

impl<'a, T: Transport> Engine<'a, T> {
    /// Extract one length-prefixed data packet (`+IPD,<len>:<data>`).
    ///
    /// Waits for the packet marker, reads the declared length, then reads
    /// exactly that many data bytes — all against a single deadline fixed
    /// when the call starts. At most `max_alloc - 1` bytes are stored when
    /// the declared length exceeds `max_alloc`; the excess is read and
    /// discarded so trailing stream content is preserved for later calls.
    ///
    /// A deadline that expires mid-body returns the partial payload as a
    /// normal result; truncation is visible through
    /// [`Payload::is_truncated`], not an error.
    pub fn read_packet(
        &mut self,
        max_alloc: usize,
        timeout: Duration,
    ) -> Result<Payload, ExtractError> {
        let deadline = Self::deadline(timeout);

        if self.await_token_until(PACKET_MARKER, deadline) == MatchOutcome::TimedOut {
            return Err(ExtractError::MarkerNotFound);
        }

        let declared = self.copy_length_field(LENGTH_FIELD_SIZE, LENGTH_DELIMITER, deadline)?;
        log::debug!("packet declares {declared} bytes, cap {max_alloc}");
        Ok(self.read_body(declared, max_alloc, deadline))
    }

    /// Extract the body of an HTTP-style reply using its
    /// `Content-Length: ` header.
    ///
    /// Waits for the header token, reads the decimal value up to the end of
    /// its line, then waits for the blank line that closes the header
    /// section before reading the body exactly as
    /// [`read_packet`](Engine::read_packet) does.
    ///
    /// The CR ending the header line is consumed as the field delimiter, so
    /// the blank-line scan starts at the following LF; a reply where the
    /// length header is the final header line is therefore not recognized.
    pub fn read_http_content(
        &mut self,
        max_alloc: usize,
        timeout: Duration,
    ) -> Result<Payload, ExtractError> {
        let deadline = Self::deadline(timeout);

        if self.await_token_until(CONTENT_LENGTH_HEADER, deadline) == MatchOutcome::TimedOut {
            return Err(ExtractError::HeaderNotFound);
        }

        let declared = self.copy_length_field(CONTENT_LENGTH_FIELD_SIZE, b'\r', deadline)?;

        if self.await_token_until(HEADER_BODY_SEPARATOR, deadline) == MatchOutcome::TimedOut {
            return Err(ExtractError::SeparatorNotFound);
        }

        log::debug!("content length {declared} bytes, cap {max_alloc}");
        Ok(self.read_body(declared, max_alloc, deadline))
    }

    /// Copy and parse an ASCII decimal length field.
    fn copy_length_field(
        &mut self,
        field_size: usize,
        delimiter: u8,
        deadline: Instant,
    ) -> Result<usize, ExtractError> {
        let mut field = [0u8; CONTENT_LENGTH_FIELD_SIZE];
        let len = match self.copy_until_deadline(&mut field[..field_size], delimiter, deadline) {
            CopyOutcome::Success { len } => len,
            CopyOutcome::LengthExceeded { .. } | CopyOutcome::TimedOut { .. } => {
                return Err(ExtractError::BadLengthField)
            }
        };
        std::str::from_utf8(&field[..len])
            .ok()
            .and_then(|text| text.trim().parse().ok())
            .ok_or(ExtractError::BadLengthField)
    }

    /// Read exactly `declared` bytes against `deadline`, storing the first
    /// `min(declared, cap)` and draining the rest.
    ///
    /// `max_alloc` caps the allocation including the slot a terminator
    /// would occupy, so truncated reads store `max_alloc - 1` bytes.
    fn read_body(&mut self, declared: usize, max_alloc: usize, deadline: Instant) -> Payload {
        let usable = if max_alloc > declared {
            declared
        } else {
            max_alloc.saturating_sub(1)
        };
        let mut payload = Payload::with_capacity(usable, declared);

        for index in 0..declared {
            let byte = loop {
                if Instant::now() >= deadline {
                    log::trace!("payload read cut short at {index}/{declared} bytes");
                    return payload;
                }
                if let Some(byte) = self.poll_byte() {
                    break byte;
                }
            };
            if index < usable {
                payload.push(byte);
            }
            // Past the cap the byte is dropped; the loop still runs so the
            // stream position lands after the full declared payload.
        }
        payload
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ScriptedTransport;

    const SHORT: Duration = Duration::from_millis(10);
    const LONG: Duration = Duration::from_secs(1);

    #[test]
    fn test_read_packet_returns_declared_bytes() {
        let mut link = ScriptedTransport::new();
        link.feed(b"+IPD,5:helloTRAILING");

        let mut engine = Engine::new(&mut link);
        let payload = engine.read_packet(32, LONG).expect("packet");
        drop(engine);

        assert_eq!(payload.as_bytes(), b"hello");
        assert_eq!(payload.declared_len(), 5);
        assert!(!payload.is_truncated());
        // Trailing noise is untouched by this call.
        assert_eq!(link.unread(), b"TRAILING");
    }

    #[test]
    fn test_read_packet_truncates_to_cap_and_drains() {
        let mut link = ScriptedTransport::new();
        link.feed(b"+IPD,5:helloTRAILING");

        let mut engine = Engine::new(&mut link);
        let payload = engine.read_packet(3, LONG).expect("packet");
        drop(engine);

        // cap 3 leaves room for 2 data bytes; the other 3 declared bytes
        // are read and dropped.
        assert_eq!(payload.as_bytes(), b"he");
        assert!(payload.is_truncated());
        assert_eq!(link.unread(), b"TRAILING");
    }

    #[test]
    fn test_read_packet_zero_length() {
        let mut link = ScriptedTransport::new();
        link.feed(b"+IPD,0:rest");

        let mut engine = Engine::new(&mut link);
        let payload = engine.read_packet(32, LONG).expect("packet");
        drop(engine);

        assert!(payload.is_empty());
        assert!(!payload.is_truncated());
        assert_eq!(link.unread(), b"rest");
    }

    #[test]
    fn test_read_packet_without_marker_fails() {
        let mut link = ScriptedTransport::new();
        link.feed(b"nothing to see");

        let mut engine = Engine::new(&mut link);
        let err = engine.read_packet(32, SHORT).unwrap_err();
        assert_eq!(err, ExtractError::MarkerNotFound);
    }

    #[test]
    fn test_read_packet_rejects_non_decimal_length() {
        let mut link = ScriptedTransport::new();
        link.feed(b"+IPD,abc:data");

        let mut engine = Engine::new(&mut link);
        let err = engine.read_packet(32, SHORT).unwrap_err();
        assert_eq!(err, ExtractError::BadLengthField);
    }

    #[test]
    fn test_read_packet_deadline_mid_body_returns_partial() {
        let mut link = ScriptedTransport::new();
        // Declares 8 bytes but only 3 ever arrive.
        link.feed(b"+IPD,8:abc");

        let mut engine = Engine::new(&mut link);
        let payload = engine.read_packet(32, SHORT).expect("partial packet");

        assert_eq!(payload.as_bytes(), b"abc");
        assert_eq!(payload.declared_len(), 8);
        assert!(payload.is_truncated());
    }

    #[test]
    fn test_read_http_content_returns_body() {
        let mut link = ScriptedTransport::new();
        link.feed(
            b"HTTP/1.1 200 OK\r\n\
              Content-Length: 5\r\n\
              Connection: close\r\n\
              \r\n\
              helloEXTRA",
        );

        let mut engine = Engine::new(&mut link);
        let payload = engine.read_http_content(32, LONG).expect("body");
        drop(engine);

        assert_eq!(payload.as_bytes(), b"hello");
        assert_eq!(link.unread(), b"EXTRA");
    }

    #[test]
    fn test_read_http_content_truncates_to_cap() {
        let mut link = ScriptedTransport::new();
        link.feed(
            b"Content-Length: 6\r\n\
              Connection: close\r\n\
              \r\n\
              abcdefREST",
        );

        let mut engine = Engine::new(&mut link);
        let payload = engine.read_http_content(4, LONG).expect("body");
        drop(engine);

        assert_eq!(payload.as_bytes(), b"abc");
        assert!(payload.is_truncated());
        assert_eq!(link.unread(), b"REST");
    }

    #[test]
    fn test_read_http_content_without_header_fails() {
        let mut link = ScriptedTransport::new();
        link.feed(b"HTTP/1.1 204 No Content\r\n\r\n");

        let mut engine = Engine::new(&mut link);
        let err = engine.read_http_content(32, SHORT).unwrap_err();
        assert_eq!(err, ExtractError::HeaderNotFound);
    }

    #[test]
    fn test_read_http_content_without_separator_fails() {
        let mut link = ScriptedTransport::new();
        link.feed(b"Content-Length: 5\r\nConnection: close");

        let mut engine = Engine::new(&mut link);
        let err = engine.read_http_content(32, SHORT).unwrap_err();
        assert_eq!(err, ExtractError::SeparatorNotFound);
    }
}
