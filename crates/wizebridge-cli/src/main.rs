use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use time::OffsetDateTime;

use wizebridge_core::line::{TelemetryLine, decode_hex};
use wizebridge_core::output;
use wizebridge_core::{lpp, parse_line};

mod influx;
mod input;
mod mqtt;

#[derive(Parser, Debug)]
#[command(name = "wizebridge")]
#[command(version)]
#[command(
    about = "Serial-to-sink bridge for Wize telemetry with CayenneLPP decoding.",
    long_about = None,
    after_help = "Examples:\n  wizebridge decode 01670110056864 --pretty\n  wizebridge csv --port /dev/ttyACM0\n  wizebridge influx --input capture.txt --db bridge\n  wizebridge mqtt --port /dev/ttyACM0 --topic 'wize/{uid}/{field}'"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Decode one CayenneLPP payload (hex, or "-" for stdin) to JSON.
    Decode {
        /// Payload as an even-length hex string
        payload: String,

        /// Pretty-print JSON output
        #[arg(long, conflicts_with = "compact")]
        pretty: bool,

        /// Compact JSON output (default)
        #[arg(long)]
        compact: bool,
    },
    /// Print telemetry lines as CSV rows on stdout.
    Csv {
        #[command(flatten)]
        source: SourceArgs,

        /// Suppress non-error output
        #[arg(long)]
        quiet: bool,
    },
    /// Forward telemetry lines to an InfluxDB write endpoint.
    Influx {
        #[command(flatten)]
        source: SourceArgs,

        /// Base URL of the InfluxDB server
        #[arg(long, default_value = "http://localhost:8086")]
        url: String,

        /// Target database name
        #[arg(long, default_value = "bridge")]
        db: String,

        /// Line-protocol measurement name
        #[arg(long, default_value = "data")]
        measurement: String,

        /// Forward the payload hex untouched instead of decoding CayenneLPP
        #[arg(long)]
        raw: bool,

        /// Suppress non-error output
        #[arg(long)]
        quiet: bool,
    },
    /// Publish telemetry fields to an MQTT broker.
    Mqtt {
        #[command(flatten)]
        source: SourceArgs,

        /// Broker hostname
        #[arg(long, default_value = "localhost")]
        host: String,

        /// Broker port
        #[arg(long, default_value_t = 1883)]
        broker_port: u16,

        /// Topic template; {uid} and {field} are substituted per message
        #[arg(long, default_value = output::mqtt::DEFAULT_TOPIC)]
        topic: String,

        /// Quality of service (0, 1 or 2)
        #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=2))]
        qos: u8,

        /// Publish with the retain flag set
        #[arg(long)]
        retain: bool,

        /// Forward the payload hex untouched instead of decoding CayenneLPP
        #[arg(long)]
        raw: bool,

        /// Suppress non-error output
        #[arg(long)]
        quiet: bool,
    },
}

#[derive(Args, Debug)]
struct SourceArgs {
    /// Serial device to read from (e.g. /dev/ttyACM0)
    #[arg(long, conflicts_with = "input")]
    port: Option<String>,

    /// Baud rate for the serial device
    #[arg(long, default_value_t = 115_200)]
    baud: u32,

    /// Read lines from a file instead of a serial device ("-" for stdin)
    #[arg(long)]
    input: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Decode {
            payload,
            pretty,
            compact: _,
        } => cmd_decode(payload, pretty),
        Commands::Csv { source, quiet } => cmd_csv(source, quiet),
        Commands::Influx {
            source,
            url,
            db,
            measurement,
            raw,
            quiet,
        } => cmd_influx(source, url, db, measurement, raw, quiet),
        Commands::Mqtt {
            source,
            host,
            broker_port,
            topic,
            qos,
            retain,
            raw,
            quiet,
        } => cmd_mqtt(source, host, broker_port, topic, qos, retain, raw, quiet),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(2)
        }
    }
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(err.to_string(), None)
    }
}

fn cmd_decode(payload: String, pretty: bool) -> Result<(), CliError> {
    let hex = if payload == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read payload from stdin")?;
        buf.trim().to_string()
    } else {
        payload
    };

    let bytes = decode_hex(&hex).map_err(|err| {
        CliError::new(
            format!("invalid payload: {err}"),
            Some("pass the payload as an even-length hex string".to_string()),
        )
    })?;
    let measurements = lpp::decode(&bytes).map_err(|err| {
        CliError::new(
            format!("decode failed: {err}"),
            Some("the payload is not well-formed CayenneLPP".to_string()),
        )
    })?;

    let json = if pretty {
        serde_json::to_string_pretty(&measurements)
    } else {
        serde_json::to_string(&measurements)
    }
    .context("JSON serialization failed")
    .map_err(CliError::from)?;

    println!("{json}");
    Ok(())
}

fn cmd_csv(source: SourceArgs, quiet: bool) -> Result<(), CliError> {
    println!("{}", output::csv::HEADER);
    run_pipeline(&source, quiet, |line| {
        println!("{}", output::csv::render_row(OffsetDateTime::now_utc(), line));
        Ok(())
    })
}

fn cmd_influx(
    source: SourceArgs,
    url: String,
    db: String,
    measurement: String,
    raw: bool,
    quiet: bool,
) -> Result<(), CliError> {
    let sink = influx::InfluxSink::new(influx::InfluxConfig { url, database: db });
    run_pipeline(&source, quiet, |line| {
        let body = if raw {
            output::influxdb::render_raw(&measurement, line)
        } else {
            let measurements = lpp::decode(&line.payload).context("payload decode failed")?;
            output::influxdb::render_decoded(&measurement, line, &measurements)
        };
        if !quiet {
            eprintln!("[influx] {body}");
        }
        sink.write(&body)
    })
}

fn cmd_mqtt(
    source: SourceArgs,
    host: String,
    port: u16,
    topic: String,
    qos: u8,
    retain: bool,
    raw: bool,
    quiet: bool,
) -> Result<(), CliError> {
    let config = mqtt::MqttConfig {
        host,
        port,
        qos,
        retain,
    };
    let mut sink = mqtt::MqttSink::connect(&config, quiet).map_err(|err| {
        CliError::new(
            err.to_string(),
            Some("check the broker host and port".to_string()),
        )
    })?;

    run_pipeline(&source, quiet, |line| {
        let messages = if raw {
            output::mqtt::render_raw(&topic, line)
        } else {
            let measurements = lpp::decode(&line.payload).context("payload decode failed")?;
            output::mqtt::render_decoded(&topic, line, &measurements)
        };
        for (topic, payload) in messages {
            if !quiet {
                eprintln!("[mqtt] {topic} <- {payload}");
            }
            sink.publish(&topic, &payload)?;
        }
        Ok(())
    })
}

/// Read lines from the configured source, parse each, and hand data lines
/// to `forward`. Malformed lines and failed forwards are logged and
/// dropped; the loop continues until the source ends.
fn run_pipeline<F>(source: &SourceArgs, quiet: bool, mut forward: F) -> Result<(), CliError>
where
    F: FnMut(&TelemetryLine) -> Result<()>,
{
    let mut lines = open_source(source)?;
    loop {
        let line = match lines.next_line() {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(err) => {
                return Err(CliError::new(
                    format!("line source failed: {err}"),
                    Some("check the serial connection".to_string()),
                ));
            }
        };
        match parse_line(&line) {
            Ok(Some(telemetry)) => {
                if let Err(err) = forward(&telemetry) {
                    if !quiet {
                        eprintln!("[sink] dropping message: {err:#}");
                    }
                }
            }
            Ok(None) => {}
            Err(err) => {
                if !quiet {
                    eprintln!("[parser] skipping line: {err}");
                }
            }
        }
    }
    Ok(())
}

fn open_source(source: &SourceArgs) -> Result<input::LineSource, CliError> {
    if source.port.is_none() && source.input.is_none() {
        return Err(CliError::new(
            "missing line source",
            Some("use --port <device> or --input <file> (\"-\" for stdin)".to_string()),
        ));
    }
    input::LineSource::open(
        source.port.as_deref(),
        source.baud,
        source.input.as_deref(),
    )
    .map_err(|err| {
        CliError::new(
            err.to_string(),
            Some("check the device path and permissions".to_string()),
        )
    })
}
