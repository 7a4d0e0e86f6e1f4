use crate::Measurement;
use crate::line::{TelemetryLine, encode_hex};

/// Default topic template; `{uid}` and `{field}` are substituted per message.
pub const DEFAULT_TOPIC: &str = "wize/{uid}/{field}";

/// Map a telemetry line to one message carrying the raw payload hex.
pub fn render_raw(template: &str, line: &TelemetryLine) -> Vec<(String, String)> {
    vec![(
        expand(template, &line.uid, "payload"),
        encode_hex(&line.payload),
    )]
}

/// Map decoded measurements to one message per field, in decode order.
pub fn render_decoded(
    template: &str,
    line: &TelemetryLine,
    measurements: &[Measurement],
) -> Vec<(String, String)> {
    measurements
        .iter()
        .flat_map(|m| m.fields())
        .map(|(field, value)| (expand(template, &line.uid, &field), value.to_string()))
        .collect()
}

fn expand(template: &str, uid: &str, field: &str) -> String {
    template.replace("{uid}", uid).replace("{field}", field)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lpp::decode;

    fn sample_line(payload: Vec<u8>) -> TelemetryLine {
        TelemetryLine {
            uid: "CAFE0001".to_string(),
            datarate: 2,
            rssi: -87,
            payload,
        }
    }

    #[test]
    fn raw_mapping_publishes_payload_hex() {
        let line = sample_line(vec![0x01, 0x67, 0x01, 0x10]);
        let messages = render_raw(DEFAULT_TOPIC, &line);
        assert_eq!(
            messages,
            vec![(
                "wize/CAFE0001/payload".to_string(),
                "01670110".to_string()
            )]
        );
    }

    #[test]
    fn decoded_mapping_keeps_order() {
        let payload = vec![0x01, 0x67, 0x01, 0x10, 0x05, 0x68, 0x64];
        let measurements = decode(&payload).unwrap();
        let line = sample_line(payload);
        let messages = render_decoded(DEFAULT_TOPIC, &line, &measurements);
        assert_eq!(
            messages,
            vec![
                ("wize/CAFE0001/temperature_1".to_string(), "27.2".to_string()),
                ("wize/CAFE0001/humidity_5".to_string(), "50".to_string()),
            ]
        );
    }

    #[test]
    fn composite_fields_publish_per_axis() {
        let payload = vec![0x02, 0x88, 0xFE, 0x79, 0x60, 0x03, 0x20, 0xC8, 0xFF, 0xFA, 0x0B];
        let measurements = decode(&payload).unwrap();
        let line = sample_line(payload);
        let messages = render_decoded("team/{uid}/{field}", &line, &measurements);
        let topics: Vec<_> = messages.iter().map(|(t, _)| t.as_str()).collect();
        assert_eq!(
            topics,
            vec![
                "team/CAFE0001/gps_2_latitude",
                "team/CAFE0001/gps_2_longitude",
                "team/CAFE0001/gps_2_altitude",
            ]
        );
    }

    #[test]
    fn template_without_placeholders_is_left_alone() {
        let line = sample_line(Vec::new());
        let messages = render_raw("fixed/topic", &line);
        assert_eq!(messages[0].0, "fixed/topic");
    }
}
