use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};

/// Serial read timeout; also the poll interval while the line is idle.
const SERIAL_TIMEOUT: Duration = Duration::from_millis(500);

/// Line-oriented reader over a serial device, a file, or stdin.
///
/// Serial reads are chunked and may time out mid-line; bytes are
/// accumulated until a newline arrives, so a timeout is an idle poll
/// rather than an error or a truncated line.
pub struct LineSource {
    reader: Box<dyn Read>,
    pending: Vec<u8>,
}

impl LineSource {
    pub fn open(port: Option<&str>, baud: u32, input: Option<&Path>) -> Result<Self> {
        let reader: Box<dyn Read> = if let Some(path) = port {
            let port = serialport::new(path, baud)
                .timeout(SERIAL_TIMEOUT)
                .open()
                .with_context(|| format!("failed to open serial port {path} @ {baud}"))?;
            Box::new(port)
        } else if let Some(path) = input {
            if path.as_os_str() == "-" {
                Box::new(io::stdin())
            } else {
                let file = File::open(path)
                    .with_context(|| format!("failed to open input file: {}", path.display()))?;
                Box::new(file)
            }
        } else {
            anyhow::bail!("no line source configured");
        };
        Ok(Self::from_reader(reader))
    }

    pub fn from_reader(reader: Box<dyn Read>) -> Self {
        Self {
            reader,
            pending: Vec::new(),
        }
    }

    /// Block until one full line is available, the stream ends (`None`),
    /// or a fatal I/O error occurs.
    pub fn next_line(&mut self) -> io::Result<Option<String>> {
        let mut chunk = [0u8; 256];
        loop {
            if let Some(pos) = self.pending.iter().position(|&b| b == b'\n') {
                let line: Vec<u8> = self.pending.drain(..=pos).collect();
                return Ok(Some(to_line(&line)));
            }
            match self.reader.read(&mut chunk) {
                Ok(0) => {
                    if self.pending.is_empty() {
                        return Ok(None);
                    }
                    let line = std::mem::take(&mut self.pending);
                    return Ok(Some(to_line(&line)));
                }
                Ok(n) => self.pending.extend_from_slice(&chunk[..n]),
                Err(err)
                    if matches!(
                        err.kind(),
                        io::ErrorKind::TimedOut
                            | io::ErrorKind::WouldBlock
                            | io::ErrorKind::Interrupted
                    ) =>
                {
                    continue;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

fn to_line(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).trim_end().to_string()
}
