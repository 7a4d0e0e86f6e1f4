use thiserror::Error;

/// Errors returned by CayenneLPP decoding.
///
/// Both variants are non-fatal to a forwarding pipeline: the payload will
/// never become well-formed on retry, so callers log and drop the message.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LppError {
    #[error("payload too short: need {needed} bytes, got {actual}")]
    TooShort { needed: usize, actual: usize },
    #[error("unknown data type: 0x{type_id:02x}")]
    UnknownType { type_id: u8 },
}
