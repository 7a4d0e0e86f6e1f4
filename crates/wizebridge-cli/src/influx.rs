use std::time::Duration;

use anyhow::{Context, Result};

const HTTP_TIMEOUT: Duration = Duration::from_secs(5);

/// Connection settings for the InfluxDB write endpoint.
#[derive(Debug, Clone)]
pub struct InfluxConfig {
    /// Base URL of the InfluxDB server (e.g. `http://localhost:8086`).
    pub url: String,
    /// Target database name.
    pub database: String,
}

/// Posts line-protocol records to `<url>/write?db=<database>`.
pub struct InfluxSink {
    agent: ureq::Agent,
    write_url: String,
}

impl InfluxSink {
    pub fn new(config: InfluxConfig) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(HTTP_TIMEOUT).build();
        let write_url = format!(
            "{}/write?db={}",
            config.url.trim_end_matches('/'),
            config.database
        );
        Self { agent, write_url }
    }

    pub fn write(&self, body: &str) -> Result<()> {
        self.agent
            .post(&self.write_url)
            .set("Content-Type", "text/plain; charset=utf-8")
            .send_string(body)
            .with_context(|| format!("InfluxDB write failed: {}", self.write_url))?;
        Ok(())
    }
}
