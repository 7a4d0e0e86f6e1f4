use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use rumqttc::{Client, MqttOptions, QoS};

const KEEP_ALIVE: Duration = Duration::from_secs(60);
const RECONNECT_DELAY: Duration = Duration::from_secs(1);

/// Connection settings for the MQTT broker.
#[derive(Debug, Clone)]
pub struct MqttConfig {
    pub host: String,
    pub port: u16,
    pub qos: u8,
    pub retain: bool,
}

/// Publishes messages over one broker connection.
///
/// The connection event loop runs on a background thread for the lifetime
/// of the process; it handles keep-alives, acks, and reconnects.
pub struct MqttSink {
    client: Client,
    qos: QoS,
    retain: bool,
}

impl MqttSink {
    pub fn connect(config: &MqttConfig, quiet: bool) -> Result<Self> {
        let client_id = format!("wizebridge-{}", std::process::id());
        let mut options = MqttOptions::new(client_id, &config.host, config.port);
        options.set_keep_alive(KEEP_ALIVE);

        let (client, mut connection) = Client::new(options, 10);

        // Wait for the first event so a refused connection fails at startup
        // instead of silently dropping every publish.
        if let Some(event) = connection.iter().next() {
            event.with_context(|| {
                format!("MQTT connect to {}:{} failed", config.host, config.port)
            })?;
        }

        thread::spawn(move || {
            for event in connection.iter() {
                if let Err(err) = event {
                    if !quiet {
                        eprintln!("[mqtt] connection error: {err}");
                    }
                    thread::sleep(RECONNECT_DELAY);
                }
            }
        });

        let qos = match config.qos {
            0 => QoS::AtMostOnce,
            1 => QoS::AtLeastOnce,
            _ => QoS::ExactlyOnce,
        };

        Ok(Self {
            client,
            qos,
            retain: config.retain,
        })
    }

    pub fn publish(&mut self, topic: &str, payload: &str) -> Result<()> {
        self.client
            .publish(topic, self.qos, self.retain, payload.as_bytes())
            .with_context(|| format!("MQTT publish to {topic} failed"))?;
        Ok(())
    }
}
