//! Streaming command/response engine for a serial AT-style control link.
//!
//! This crate is the memory-frugal half of a host ↔ radio-module pairing:
//! the host writes an ASCII command over a byte-stream link and then
//! interprets the reply one byte at a time, without ever accumulating the
//! response in a receive buffer. Everything is built from four primitives:
//!
//! - **Token matching**: scan the stream for an expected byte sequence
//!   ([`Engine::await_token`], [`Engine::await_either`]).
//! - **Bounded field copying**: copy a delimited field into a fixed-size
//!   buffer ([`Engine::copy_until`]).
//! - **Delimiter skipping**: discard bytes through a separator
//!   ([`Engine::skip_until`]).
//! - **Payload extraction**: pull a length-prefixed packet or an HTTP-style
//!   body out of the stream into a right-sized owned buffer
//!   ([`Engine::read_packet`], [`Engine::read_http_content`]).
//!
//! Every operation is a blocking poll loop bounded by a deadline computed
//! once at entry. Bytes read from the link are consumed for good: there is
//! no read-ahead and no pushback, which is what keeps the memory footprint
//! flat but also shapes the matcher's documented restart limitation (see
//! [`Engine::await_token`]).
//!
//! # Example
//!
//! ```rust
//! use espat_engine::{Engine, MatchOutcome, ScriptedTransport};
//! use std::time::Duration;
//!
//! let mut link = ScriptedTransport::new();
//! link.feed(b"OK\r\n");
//!
//! let mut engine = Engine::new(&mut link);
//! engine.send(b"AT\r\n");
//! let outcome = engine.await_token(b"OK\r\n", Duration::from_secs(1));
//! assert_eq!(outcome, MatchOutcome::Matched);
//! ```

mod constants;
mod copy;
mod engine;
mod extract;
mod matcher;
mod payload;
mod transport;

pub use constants::*;
pub use copy::*;
pub use engine::*;
pub use extract::*;
pub use matcher::*;
pub use payload::*;
pub use transport::*;
