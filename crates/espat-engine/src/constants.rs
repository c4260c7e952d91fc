//! Wire-level constants
//!
//! The shapes the engine recognizes on the link: tokens are terminated by a
//! two-byte line terminator, data packets are announced by a framing marker
//! followed by an ASCII decimal length and a field delimiter, and HTTP-style
//! replies carry a declared content length followed by a blank line before
//! the body.

/// Line terminator used by the control protocol.
pub const CRLF: &[u8] = b"\r\n";

// ============================================================================
// Length-prefixed packet framing
// ============================================================================

/// Marker announcing an inbound data packet.
pub const PACKET_MARKER: &[u8] = b"+IPD,";
/// Delimiter between the ASCII decimal length and the packet data.
pub const LENGTH_DELIMITER: u8 = b':';
/// Maximum digits in a packet length field (packets top out near 2048).
pub const LENGTH_FIELD_SIZE: usize = 8;

// ============================================================================
// HTTP-style header-delimited framing
// ============================================================================

/// Header token announcing the declared body length.
pub const CONTENT_LENGTH_HEADER: &[u8] = b"Content-Length: ";
/// Blank line separating the header section from the body.
pub const HEADER_BODY_SEPARATOR: &[u8] = b"\r\n\r\n";
/// Maximum digits in a content-length field.
pub const CONTENT_LENGTH_FIELD_SIZE: usize = 16;
