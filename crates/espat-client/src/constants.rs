//! Protocol constants
//!
//! Response tokens, field size bounds, and per-operation timeouts for the
//! AT control protocol. If the radio is busy it simply does not answer, so
//! the slower operations get generous deadlines; waiting usually resolves
//! it.

use std::time::Duration;

// ============================================================================
// Response tokens (radio → host)
// ============================================================================

/// Command accepted.
pub const RESPONSE_OK: &[u8] = b"OK\r\n";
/// Command rejected.
pub const RESPONSE_ERROR: &[u8] = b"ERROR\r\n";
/// Operation attempted and failed (AP join).
pub const RESPONSE_FAIL: &[u8] = b"FAIL\r\n";
/// Data handed to the radio for transmission.
pub const RESPONSE_SEND_OK: &[u8] = b"SEND OK\r\n";
/// Prefix of a successful DNS lookup reply.
pub const DNS_RESULT_PREFIX: &[u8] = b"+CIPDOMAIN:";
/// Fragment preceding the quoted station IP in a `CIFSR` reply.
pub const STATION_IP_PREFIX: &[u8] = b":STAIP,";

// ============================================================================
// Field size bounds
// ============================================================================

/// Dotted-quad IPv4 plus terminator: `255.255.255.255\0`.
pub const IP_ADDRESS_SIZE: usize = 16;
/// Bound for each of the three `AT+GMR` version fields, with terminator.
pub const VERSION_STRING_SIZE: usize = 32;

// ============================================================================
// Timeouts
// ============================================================================

/// Per-operation deadlines.
pub mod timeouts {
    use super::Duration;

    /// Ordinary command/response exchange.
    pub const RESPONSE: Duration = Duration::from_secs(1);
    /// Liveness probe; a busy radio needs time to start answering again.
    pub const PROBE: Duration = Duration::from_secs(10);
    /// Radio reset round trip.
    pub const RESET: Duration = Duration::from_secs(5);
    /// TCP/UDP/SSL connection establishment, and packet reads.
    pub const CONNECT: Duration = Duration::from_secs(5);
    /// AP association and DNS resolution.
    pub const WIFI: Duration = Duration::from_secs(30);
}
