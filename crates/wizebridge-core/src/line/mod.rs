//! Telemetry line parsing.
//!
//! The Wize bridge firmware prints one ASCII CSV line per received radio
//! message: `<uid>,<datarate>,<rssi>,<payload-hex>`. Lines starting with
//! `#` are firmware chatter and are skipped, not errors.
//!
pub mod error;
pub mod parser;

pub use error::LineError;
pub use parser::{TelemetryLine, decode_hex, encode_hex, parse_line};
