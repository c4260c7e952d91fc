//! The client: command writes paired with streaming reply interpretation.

use std::time::Duration;

use espat_engine::{
    CopyOutcome, EitherOutcome, Engine, MatchOutcome, Payload, SkipOutcome, Transport,
};

use crate::constants::*;
use crate::{ClientError, Command, Protocol, VersionInfo};

/// A single-connection, station-mode client for the radio.
///
/// Holds the engine (and through it the borrowed transport) for its whole
/// lifetime. One command is in flight at a time; each operation blocks
/// until its reply is interpreted or its deadline passes. Callers must not
/// touch the transport directly while an operation runs.
pub struct Client<'a, T: Transport> {
    engine: Engine<'a, T>,
}

impl<'a, T: Transport> Client<'a, T> {
    /// Create a client over a borrowed transport.
    pub fn new(link: &'a mut T) -> Self {
        Client {
            engine: Engine::new(link),
        }
    }

    /// The underlying engine, for callers extending the command set or
    /// reading data the client has no operation for.
    pub fn engine(&mut self) -> &mut Engine<'a, T> {
        &mut self.engine
    }

    // ========================================================================
    // Radio management
    // ========================================================================

    /// Probe the radio with a bare `AT`.
    ///
    /// Success means the link and baud rate are right and the radio is
    /// accepting commands. A busy radio does not answer at all, hence the
    /// long deadline.
    pub fn probe(&mut self) -> Result<(), ClientError> {
        self.command(&Command::Test);
        self.expect_ok(timeouts::PROBE)
    }

    /// Probe the radio and disable command echo.
    ///
    /// Call after power-up, and again after any reset.
    pub fn init(&mut self) -> Result<(), ClientError> {
        self.probe()?;
        self.disable_echo()
    }

    /// Disable command echo.
    pub fn disable_echo(&mut self) -> Result<(), ClientError> {
        self.command(&Command::DisableEcho);
        self.expect_ok(timeouts::RESPONSE)
    }

    /// Reset the radio. Allow several seconds before it answers again.
    pub fn reset(&mut self) -> Result<(), ClientError> {
        self.command(&Command::Reset);
        self.expect_ok(timeouts::RESET)
    }

    /// Query the firmware version strings.
    pub fn version(&mut self) -> Result<VersionInfo, ClientError> {
        self.command(&Command::Version);

        // Each reply line is `<label>:<value>`; seek the colon, then copy
        // the value through the end of the line. The trailing LF is
        // swallowed by the next colon seek.
        let at_version = self.labelled_field::<VERSION_STRING_SIZE>()?;
        let sdk_version = self.labelled_field::<VERSION_STRING_SIZE>()?;
        let compile_time = self.labelled_field::<VERSION_STRING_SIZE>()?;
        self.expect_ok(timeouts::RESPONSE)?;

        Ok(VersionInfo {
            at_version,
            sdk_version,
            compile_time,
        })
    }

    /// Deep-sleep the radio for `ms` milliseconds. The `OK` arrives just
    /// before the radio powers down.
    pub fn deep_sleep(&mut self, ms: u32) -> Result<(), ClientError> {
        self.command(&Command::DeepSleep { ms });
        self.expect_ok(timeouts::RESPONSE)
    }

    /// Set and persist the link baud rate. After `Ok` the radio speaks the
    /// new rate; reconfigure the local side accordingly.
    pub fn set_baud(&mut self, baud: u32) -> Result<(), ClientError> {
        self.command(&Command::SetBaud { baud });
        self.expect_ok(timeouts::RESPONSE)
    }

    /// Set transmit RF power in 0.25 dBm steps (0–82).
    pub fn set_rf_power(&mut self, quarter_dbm: u8) -> Result<(), ClientError> {
        self.command(&Command::SetRfPower { quarter_dbm });
        self.expect_ok(timeouts::RESPONSE)
    }

    // ========================================================================
    // Access point management
    // ========================================================================

    /// Put the radio in station mode with DHCP enabled.
    pub fn set_station_mode(&mut self) -> Result<(), ClientError> {
        self.command(&Command::SetStationMode);
        self.expect_ok(timeouts::RESPONSE)?;
        self.command(&Command::EnableStationDhcp);
        self.expect_ok(timeouts::RESPONSE)
    }

    /// Join an access point. The radio ends the attempt with `OK` or
    /// `FAIL`; no further diagnostics are reported.
    pub fn join_ap(
        &mut self,
        ssid: &str,
        password: Option<&str>,
        bssid: Option<&str>,
    ) -> Result<(), ClientError> {
        log::debug!("joining AP {ssid:?}");
        self.command(&Command::JoinAp {
            ssid: ssid.to_string(),
            password: password.map(str::to_string),
            bssid: bssid.map(str::to_string),
        });
        self.expect_ok_or(RESPONSE_FAIL, timeouts::WIFI)
    }

    /// Tell the AP we are leaving before going quiet.
    pub fn quit_ap(&mut self) -> Result<(), ClientError> {
        self.command(&Command::QuitAp);
        self.expect_ok(timeouts::RESPONSE)
    }

    // ========================================================================
    // IP status and DNS
    // ========================================================================

    /// Resolve `domain` to a dotted-quad IPv4 address.
    ///
    /// A hit answers `+CIPDOMAIN:<ip>`, a miss answers `ERROR`.
    pub fn dns_lookup(&mut self, domain: &str) -> Result<String, ClientError> {
        self.command(&Command::DnsLookup {
            domain: domain.to_string(),
        });

        match self
            .engine
            .await_either(DNS_RESULT_PREFIX, RESPONSE_ERROR, timeouts::WIFI)
        {
            EitherOutcome::Pass => {}
            EitherOutcome::Fail => return Err(ClientError::Rejected),
            EitherOutcome::TimedOut => return Err(ClientError::Timeout),
        }

        let ip = self.copy_field::<IP_ADDRESS_SIZE>(b'\r', timeouts::RESPONSE)?;
        log::debug!("resolved {domain:?} to {ip}");

        // Swallow the trailing OK; the address is already in hand.
        let _ = self.engine.await_token(RESPONSE_OK, timeouts::RESPONSE);
        Ok(ip)
    }

    /// Query the station IP address. `0.0.0.0` means none is assigned.
    pub fn local_ip(&mut self) -> Result<String, ClientError> {
        self.command(&Command::LocalIp);

        if self.engine.await_token(STATION_IP_PREFIX, timeouts::RESPONSE)
            == MatchOutcome::TimedOut
        {
            return Err(ClientError::Timeout);
        }
        if self.engine.skip_until(b'"', timeouts::RESPONSE) == SkipOutcome::TimedOut {
            return Err(ClientError::Timeout);
        }
        let ip = self.copy_field::<IP_ADDRESS_SIZE>(b'"', timeouts::RESPONSE)?;

        // The MAC line and final OK follow; consume through the OK.
        self.expect_ok(timeouts::RESPONSE)?;
        Ok(ip)
    }

    // ========================================================================
    // Connection management and data transfer
    // ========================================================================

    /// Open the connection to a remote endpoint.
    pub fn connect(
        &mut self,
        protocol: Protocol,
        host: &str,
        port: u16,
    ) -> Result<(), ClientError> {
        log::debug!("connecting {protocol} to {host}:{port}");
        self.command(&Command::Connect {
            protocol,
            host: host.to_string(),
            port,
        });
        self.expect_ok_or(RESPONSE_ERROR, timeouts::CONNECT)
    }

    /// Close the connection, if one is open.
    pub fn close(&mut self) -> Result<(), ClientError> {
        self.command(&Command::Close);
        self.expect_ok_or(RESPONSE_ERROR, timeouts::RESPONSE)
    }

    /// Send `data` through the open connection.
    ///
    /// Announces the length, waits for the radio to accept, writes the raw
    /// bytes, then waits for `SEND OK`.
    pub fn send(&mut self, data: &[u8]) -> Result<(), ClientError> {
        self.command(&Command::Send { length: data.len() });
        self.expect_ok_or(RESPONSE_ERROR, timeouts::RESPONSE)?;

        self.engine.send(data);
        match self.engine.await_token(RESPONSE_SEND_OK, timeouts::RESPONSE) {
            MatchOutcome::Matched => Ok(()),
            MatchOutcome::TimedOut => Err(ClientError::Timeout),
        }
    }

    /// Read one inbound `+IPD` data packet into an owned buffer of at most
    /// `max_alloc` bytes. See [`Engine::read_packet`] for the truncation
    /// contract.
    pub fn response_packet(
        &mut self,
        max_alloc: usize,
        timeout: Duration,
    ) -> Result<Payload, ClientError> {
        Ok(self.engine.read_packet(max_alloc, timeout)?)
    }

    /// Read the body of an HTTP reply, skipping its headers, into an owned
    /// buffer of at most `max_alloc` bytes. Requires a `Content-Length`
    /// header. See [`Engine::read_http_content`].
    pub fn http_content(
        &mut self,
        max_alloc: usize,
        timeout: Duration,
    ) -> Result<Payload, ClientError> {
        Ok(self.engine.read_http_content(max_alloc, timeout)?)
    }

    // ========================================================================
    // Exchange helpers
    // ========================================================================

    /// Write one encoded command line.
    fn command(&mut self, command: &Command) {
        self.engine.send(&command.encode());
    }

    /// Wait for `OK`.
    fn expect_ok(&mut self, timeout: Duration) -> Result<(), ClientError> {
        match self.engine.await_token(RESPONSE_OK, timeout) {
            MatchOutcome::Matched => Ok(()),
            MatchOutcome::TimedOut => Err(ClientError::Timeout),
        }
    }

    /// Wait for `OK` or a failure token, whichever comes first.
    fn expect_ok_or(&mut self, fail: &[u8], timeout: Duration) -> Result<(), ClientError> {
        match self.engine.await_either(RESPONSE_OK, fail, timeout) {
            EitherOutcome::Pass => Ok(()),
            EitherOutcome::Fail => Err(ClientError::Rejected),
            EitherOutcome::TimedOut => Err(ClientError::Timeout),
        }
    }

    /// Copy a delimited textual field into an owned string, bounded by `N`.
    fn copy_field<const N: usize>(
        &mut self,
        delimiter: u8,
        timeout: Duration,
    ) -> Result<String, ClientError> {
        let mut buf = [0u8; N];
        let len = match self.engine.copy_until(&mut buf, delimiter, timeout) {
            CopyOutcome::Success { len } => len,
            CopyOutcome::LengthExceeded { .. } => return Err(ClientError::FieldTooLong),
            CopyOutcome::TimedOut { .. } => return Err(ClientError::Timeout),
        };
        String::from_utf8(buf[..len].to_vec()).map_err(|_| ClientError::InvalidUtf8)
    }

    /// Seek past the next `:` and copy the rest of the line.
    fn labelled_field<const N: usize>(&mut self) -> Result<String, ClientError> {
        if self.engine.skip_until(b':', timeouts::RESPONSE) == SkipOutcome::TimedOut {
            return Err(ClientError::Timeout);
        }
        self.copy_field::<N>(b'\r', timeouts::RESPONSE)
    }
}
