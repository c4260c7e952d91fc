//! Client-facing types.

use std::fmt;

/// Connection type for [`Connect`](crate::Command::Connect).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Protocol {
    /// Plain TCP.
    #[default]
    Tcp,
    /// Datagram UDP.
    Udp,
    /// TLS over TCP.
    Ssl,
}

impl Protocol {
    /// Wire name as it appears in `AT+CIPSTART`.
    pub fn wire_name(&self) -> &'static str {
        match self {
            Protocol::Tcp => "TCP",
            Protocol::Udp => "UDP",
            Protocol::Ssl => "SSL",
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Firmware identification parsed from an `AT+GMR` reply.
///
/// The radio reports something like:
///
/// ```text
/// AT version:1.3.0.0(Jul 14 2016 18:54:01)
/// SDK version:2.0.0(656edbf)
/// compile time:Jul 19 2016 18:43:55
/// OK
/// ```
///
/// Each field holds the text after the `:`, bounded by
/// [`VERSION_STRING_SIZE`](crate::VERSION_STRING_SIZE).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VersionInfo {
    /// AT firmware version string.
    pub at_version: String,
    /// SDK version string.
    pub sdk_version: String,
    /// Firmware build timestamp.
    pub compile_time: String,
}
