//! Client error types.

use espat_engine::ExtractError;
use thiserror::Error;

/// Errors that can occur during a command/response exchange.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientError {
    /// The radio did not produce the expected response before the deadline.
    #[error("radio did not answer before the deadline")]
    Timeout,

    /// The radio answered `ERROR` or `FAIL`.
    #[error("radio rejected the command")]
    Rejected,

    /// A response field overran its fixed buffer.
    #[error("response field exceeded its buffer")]
    FieldTooLong,

    /// A textual response field was not valid UTF-8.
    #[error("invalid UTF-8 in response field")]
    InvalidUtf8,

    /// Payload extraction failed before any data was read.
    #[error(transparent)]
    Extract(#[from] ExtractError),
}
