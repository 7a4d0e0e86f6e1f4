use thiserror::Error;

/// Errors returned by telemetry line parsing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LineError {
    #[error("expected {expected} comma-separated fields, got {actual}")]
    FieldCount { expected: usize, actual: usize },
    #[error("empty uid field")]
    EmptyUid,
    #[error("invalid datarate: {value}")]
    InvalidDatarate { value: String },
    #[error("invalid rssi: {value}")]
    InvalidRssi { value: String },
    #[error("invalid payload hex: {value}")]
    InvalidHex { value: String },
}
