//! Commands that can be sent to the radio.

use espat_engine::CRLF;

use crate::types::Protocol;

/// Commands that can be sent to the radio.
///
/// [`encode`](Command::encode) produces the complete wire line, CRLF
/// terminator included. String parameters are inserted verbatim: AT syntax
/// requires the caller to escape special characters (`,`, `"`, `\`) in
/// SSIDs and passwords themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Liveness probe (`AT`). The radio answers `OK` iff it is accepting
    /// commands.
    Test,

    /// Disable command echo (`ATE0`); echoed bytes only waste buffer space.
    DisableEcho,

    /// Reset the radio, equivalent to a power cycle.
    Reset,

    /// Query firmware version strings.
    Version,

    /// Deep-sleep the radio. It will not wake unless XPD_DCDC is wired to
    /// EXT_RSTB.
    DeepSleep {
        /// Sleep duration in milliseconds.
        ms: u32,
    },

    /// Set and persist the link baud rate (8 data bits, 1 stop bit, no
    /// parity, no flow control). Takes effect after the `OK` comes back.
    SetBaud {
        /// New baud rate.
        baud: u32,
    },

    /// Set transmit RF power.
    SetRfPower {
        /// Power in 0.25 dBm increments, 0–82.
        quarter_dbm: u8,
    },

    /// Put the radio in station mode (joins an AP rather than being one).
    SetStationMode,

    /// Enable DHCP for station mode.
    EnableStationDhcp,

    /// Join an access point.
    JoinAp {
        /// AP SSID (pre-escaped).
        ssid: String,
        /// Preshared key; `None` for an open AP.
        password: Option<String>,
        /// AP MAC address, to pick one of several APs with the same SSID.
        bssid: Option<String>,
    },

    /// Disconnect from the current access point.
    QuitAp,

    /// Resolve a hostname to an IPv4 address.
    DnsLookup {
        /// Hostname to resolve.
        domain: String,
    },

    /// Query the station IP address.
    LocalIp,

    /// Open the (single) connection to a remote endpoint.
    Connect {
        /// Connection type.
        protocol: Protocol,
        /// Remote host, IP or DNS name.
        host: String,
        /// Remote port.
        port: u16,
    },

    /// Close the connection, if one is open.
    Close,

    /// Announce `length` bytes of data to send; the raw bytes follow after
    /// the radio accepts.
    Send {
        /// Number of data bytes that will follow.
        length: usize,
    },
}

impl Command {
    /// Encode the full command line, including the CRLF terminator.
    pub fn encode(&self) -> Vec<u8> {
        let line = match self {
            Command::Test => "AT".to_string(),
            Command::DisableEcho => "ATE0".to_string(),
            Command::Reset => "AT+RST".to_string(),
            Command::Version => "AT+GMR".to_string(),
            Command::DeepSleep { ms } => format!("AT+GSLP={ms}"),
            Command::SetBaud { baud } => format!("AT+UART_DEF={baud},8,1,0,0"),
            Command::SetRfPower { quarter_dbm } => format!("AT+RFPOWER={quarter_dbm}"),
            Command::SetStationMode => "AT+CWMODE_DEF=1".to_string(),
            Command::EnableStationDhcp => "AT+CWDHCP_DEF=1,1".to_string(),
            Command::JoinAp {
                ssid,
                password,
                bssid,
            } => {
                let mut line = format!("AT+CWJAP_DEF=\"{ssid}\"");
                if let Some(password) = password {
                    line.push_str(&format!(",\"{password}\""));
                }
                if let Some(bssid) = bssid {
                    line.push_str(&format!(",\"{bssid}\""));
                }
                line
            }
            Command::QuitAp => "AT+CWQAP".to_string(),
            Command::DnsLookup { domain } => format!("AT+CIPDOMAIN=\"{domain}\""),
            Command::LocalIp => "AT+CIFSR".to_string(),
            Command::Connect {
                protocol,
                host,
                port,
            } => format!("AT+CIPSTART=\"{protocol}\",\"{host}\",{port}"),
            Command::Close => "AT+CIPCLOSE".to_string(),
            Command::Send { length } => format!("AT+CIPSEND={length}"),
        };

        let mut wire = line.into_bytes();
        wire.extend_from_slice(CRLF);
        wire
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_bare_commands() {
        assert_eq!(Command::Test.encode(), b"AT\r\n");
        assert_eq!(Command::DisableEcho.encode(), b"ATE0\r\n");
        assert_eq!(Command::Reset.encode(), b"AT+RST\r\n");
        assert_eq!(Command::Version.encode(), b"AT+GMR\r\n");
        assert_eq!(Command::QuitAp.encode(), b"AT+CWQAP\r\n");
        assert_eq!(Command::Close.encode(), b"AT+CIPCLOSE\r\n");
    }

    #[test]
    fn test_encode_numeric_parameters() {
        assert_eq!(Command::DeepSleep { ms: 60000 }.encode(), b"AT+GSLP=60000\r\n");
        assert_eq!(
            Command::SetBaud { baud: 19200 }.encode(),
            b"AT+UART_DEF=19200,8,1,0,0\r\n"
        );
        assert_eq!(
            Command::SetRfPower { quarter_dbm: 82 }.encode(),
            b"AT+RFPOWER=82\r\n"
        );
        assert_eq!(Command::Send { length: 5 }.encode(), b"AT+CIPSEND=5\r\n");
    }

    #[test]
    fn test_encode_join_ap_quotes_each_field() {
        let open = Command::JoinAp {
            ssid: "net".to_string(),
            password: None,
            bssid: None,
        };
        assert_eq!(open.encode(), b"AT+CWJAP_DEF=\"net\"\r\n");

        let secured = Command::JoinAp {
            ssid: "net".to_string(),
            password: Some("hunter2".to_string()),
            bssid: Some("aa:bb:cc:dd:ee:ff".to_string()),
        };
        assert_eq!(
            secured.encode(),
            b"AT+CWJAP_DEF=\"net\",\"hunter2\",\"aa:bb:cc:dd:ee:ff\"\r\n"
        );
    }

    #[test]
    fn test_encode_connect() {
        let cmd = Command::Connect {
            protocol: Protocol::Tcp,
            host: "example.com".to_string(),
            port: 80,
        };
        assert_eq!(cmd.encode(), b"AT+CIPSTART=\"TCP\",\"example.com\",80\r\n");

        let cmd = Command::Connect {
            protocol: Protocol::Ssl,
            host: "10.0.0.2".to_string(),
            port: 443,
        };
        assert_eq!(cmd.encode(), b"AT+CIPSTART=\"SSL\",\"10.0.0.2\",443\r\n");
    }

    #[test]
    fn test_encode_dns_lookup() {
        let cmd = Command::DnsLookup {
            domain: "example.com".to_string(),
        };
        assert_eq!(cmd.encode(), b"AT+CIPDOMAIN=\"example.com\"\r\n");
    }
}
