use crate::Measurement;
use crate::line::{TelemetryLine, encode_hex};

/// Render a line-protocol record carrying the raw payload hex.
///
/// Shape: `<measurement>,uid=<uid> rssi=<rssi>i,datarate=<dr>i,payload="<hex>"`.
pub fn render_raw(measurement: &str, line: &TelemetryLine) -> String {
    let mut out = prefix(measurement, line);
    out.push_str(",payload=\"");
    out.push_str(&escape_string_field(&encode_hex(&line.payload)));
    out.push('"');
    out
}

/// Render a line-protocol record with one field per decoded measurement.
///
/// Fields are named `<name>_<channel>` (composites `<name>_<channel>_<axis>`)
/// and keep decode order.
pub fn render_decoded(
    measurement: &str,
    line: &TelemetryLine,
    measurements: &[Measurement],
) -> String {
    let mut out = prefix(measurement, line);
    for m in measurements {
        for (field, value) in m.fields() {
            out.push(',');
            out.push_str(&escape_key(&field));
            out.push('=');
            out.push_str(&value.to_string());
        }
    }
    out
}

fn prefix(measurement: &str, line: &TelemetryLine) -> String {
    format!(
        "{},uid={} rssi={}i,datarate={}i",
        escape_measurement(measurement),
        escape_key(&line.uid),
        line.rssi,
        line.datarate
    )
}

// Line-protocol escaping: measurements escape commas and spaces; tag keys,
// tag values, and field keys additionally escape equals signs; string field
// values escape backslashes and double quotes.

fn escape_measurement(s: &str) -> String {
    escape(s, &[',', ' '])
}

fn escape_key(s: &str) -> String {
    escape(s, &[',', ' ', '='])
}

fn escape_string_field(s: &str) -> String {
    escape(s, &['\\', '"'])
}

fn escape(s: &str, specials: &[char]) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if specials.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
