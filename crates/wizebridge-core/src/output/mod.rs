//! Pure sink renderers.
//!
//! Each submodule turns a parsed telemetry line (and optionally its decoded
//! measurements) into the textual form one sink consumes: a CSV row, an
//! InfluxDB line-protocol record, or a batch of MQTT topic/payload pairs.
//! No renderer performs I/O; the CLI owns the sockets.
//!
pub mod csv;
pub mod influxdb;
pub mod mqtt;
