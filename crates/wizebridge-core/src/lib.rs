//! Wizebridge core library for Wize serial telemetry forwarding.
//!
//! This crate implements the pure part of the bridge pipeline used by the
//! CLI: the telemetry line parser turns one serial line into a
//! [`TelemetryLine`], the CayenneLPP decoder (`lpp`) turns its binary
//! payload into ordered [`Measurement`]s, and the sink renderers (`output`)
//! turn both into CSV rows, InfluxDB line protocol, or MQTT messages.
//! Everything here is byte/string-oriented and side-effect free; serial,
//! HTTP, and MQTT I/O live in the CLI crate.
//!
//! Invariants:
//! - Measurements are produced in the order their entries appear in the
//!   payload, and renderers preserve that order.
//! - A malformed payload yields an error, never partial output.
//! - Composite values keep their axis declaration order (x, y, z).
//!
//! # Examples
//! ```
//! use wizebridge_core::lpp;
//!
//! // Channel 1, temperature type, raw int16 272 -> 27.2 degrees.
//! let measurements = lpp::decode(&[0x01, 0x67, 0x01, 0x10])?;
//! assert_eq!(measurements.len(), 1);
//! assert_eq!(measurements[0].name, "temperature");
//! # Ok::<(), wizebridge_core::LppError>(())
//! ```

use indexmap::IndexMap;
use serde::Serialize;

pub mod line;
pub mod lpp;
pub mod output;

pub use line::{LineError, TelemetryLine, parse_line};
pub use lpp::{LppError, LppWriter, decode};

/// One decoded reading extracted from a CayenneLPP payload.
///
/// Produced transiently per decode call and consumed immediately by the
/// caller; the decoder keeps no state between calls.
///
/// # Examples
/// ```
/// use wizebridge_core::{Measurement, Value};
///
/// let m = Measurement {
///     channel: 3,
///     name: "temperature",
///     unit: Some("°C"),
///     value: Value::Scalar(27.2),
/// };
/// assert_eq!(m.fields(), vec![("temperature_3".to_string(), 27.2)]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Measurement {
    /// Channel byte from the entry header (opaque, carried through).
    pub channel: u8,
    /// Canonical type name from the registry (e.g. "temperature").
    pub name: &'static str,
    /// Unit label from the registry, when the type has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<&'static str>,
    /// Scaled value, scalar or ordered multi-axis.
    pub value: Value,
}

/// Decoded value of a measurement.
///
/// Composite types (accelerometer, gyrometer, gps) decode into an ordered
/// mapping of axis name to value; everything else is a single scalar.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Scalar(f64),
    Vector(IndexMap<&'static str, f64>),
}

impl Measurement {
    /// Flatten this measurement into `(metric name, value)` pairs for the
    /// sink renderers.
    ///
    /// Scalar values become one `<name>_<channel>` pair; composite values
    /// become one `<name>_<channel>_<axis>` pair per axis, in axis order.
    pub fn fields(&self) -> Vec<(String, f64)> {
        match &self.value {
            Value::Scalar(v) => vec![(format!("{}_{}", self.name, self.channel), *v)],
            Value::Vector(parts) => parts
                .iter()
                .map(|(axis, v)| (format!("{}_{}_{}", self.name, self.channel, axis), *v))
                .collect(),
        }
    }
}

impl Value {
    /// Return the scalar value, or `None` for composite values.
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Value::Scalar(v) => Some(*v),
            Value::Vector(_) => None,
        }
    }
}
