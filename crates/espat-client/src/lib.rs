//! ESP8266-style AT client
//!
//! A single-connection, station-mode client for a WiFi co-processor radio
//! spoken to over a serial-style link. Every operation is a command write
//! followed by streaming interpretation of the reply through
//! [`espat_engine`]; this crate adds no parsing machinery of its own, only
//! command assembly and the response shapes each command expects.
//!
//! # Protocol Overview
//!
//! Commands are ASCII lines terminated with CRLF:
//!
//! - **Bare commands** (`AT`, `ATE0`): liveness and echo control
//! - **Prefixed commands** (`AT+<NAME>[=<params>]`): everything else
//! - **Replies**: free-form lines ending in `OK\r\n`, `ERROR\r\n`, or
//!   `FAIL\r\n`, plus unsolicited `+IPD,<len>:<data>` packets
//!
//! # Example
//!
//! ```rust,ignore
//! use espat_client::{Client, Protocol};
//!
//! let mut client = Client::new(&mut serial);
//! client.init()?;
//! client.join_ap("MySSID", Some("hunter2"), None)?;
//! client.connect(Protocol::Tcp, "example.com", 80)?;
//! client.send(b"GET / HTTP/1.0\r\n\r\n")?;
//! let body = client.http_content(512, timeouts::CONNECT)?;
//! ```

mod client;
mod commands;
mod constants;
mod error;
mod types;

pub use client::*;
pub use commands::*;
pub use constants::*;
pub use error::*;
pub use types::*;
