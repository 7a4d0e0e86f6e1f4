use serde::Serialize;

use super::error::LineError;

/// Fields per telemetry line: uid, datarate, rssi, payload.
pub const FIELD_COUNT: usize = 4;

/// One parsed telemetry line from the serial bridge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TelemetryLine {
    /// Device identifier reported by the bridge.
    pub uid: String,
    /// Radio data rate index.
    pub datarate: u32,
    /// Received signal strength in dBm.
    pub rssi: i32,
    /// Raw payload bytes, hex-decoded.
    pub payload: Vec<u8>,
}

/// Parse one serial line.
///
/// Returns `Ok(None)` for blank lines and `#`-prefixed firmware chatter;
/// both are expected in the stream and are not errors.
///
/// # Examples
/// ```
/// use wizebridge_core::parse_line;
///
/// let line = parse_line("CAFE0001,2,-87,01670110")?.expect("data line");
/// assert_eq!(line.uid, "CAFE0001");
/// assert_eq!(line.rssi, -87);
/// assert_eq!(line.payload, vec![0x01, 0x67, 0x01, 0x10]);
///
/// assert!(parse_line("# radio ready")?.is_none());
/// # Ok::<(), wizebridge_core::LineError>(())
/// ```
pub fn parse_line(line: &str) -> Result<Option<TelemetryLine>, LineError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let parts: Vec<&str> = line.split(',').collect();
    if parts.len() != FIELD_COUNT {
        return Err(LineError::FieldCount {
            expected: FIELD_COUNT,
            actual: parts.len(),
        });
    }

    let uid = parts[0].trim();
    if uid.is_empty() {
        return Err(LineError::EmptyUid);
    }

    let datarate = parts[1].trim();
    let datarate = datarate.parse().map_err(|_| LineError::InvalidDatarate {
        value: datarate.to_string(),
    })?;

    let rssi = parts[2].trim();
    let rssi = rssi.parse().map_err(|_| LineError::InvalidRssi {
        value: rssi.to_string(),
    })?;

    let payload = decode_hex(parts[3].trim())?;

    Ok(Some(TelemetryLine {
        uid: uid.to_string(),
        datarate,
        rssi,
        payload,
    }))
}

/// Decode an even-length hex string into bytes.
pub fn decode_hex(hex: &str) -> Result<Vec<u8>, LineError> {
    if hex.len() % 2 != 0 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(LineError::InvalidHex {
            value: hex.to_string(),
        });
    }
    (0..hex.len())
        .step_by(2)
        .map(|i| {
            u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| LineError::InvalidHex {
                value: hex.to_string(),
            })
        })
        .collect()
}

/// Encode bytes as a lower-case hex string.
pub fn encode_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}
