use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::line::{TelemetryLine, encode_hex};

/// Column header printed once before the first row.
pub const HEADER: &str = "time,uid,datarate,rssi,payload";

/// Timestamp used when RFC3339 formatting is not possible.
const FALLBACK_TIME: &str = "1970-01-01T00:00:00Z";

/// Render one CSV row for a telemetry line received at `ts`.
pub fn render_row(ts: OffsetDateTime, line: &TelemetryLine) -> String {
    let time = ts
        .format(&Rfc3339)
        .unwrap_or_else(|_| FALLBACK_TIME.to_string());
    format!(
        "{},{},{},{},{}",
        time,
        line.uid,
        line.datarate,
        line.rssi,
        encode_hex(&line.payload)
    )
}
