use indexmap::IndexMap;

use crate::{Measurement, Value};

use super::error::LppError;
use super::layout::{self, Rule};
use super::reader::LppReader;

/// Decode one CayenneLPP payload into measurements, in entry order.
///
/// An empty payload decodes to an empty vector. Any malformed entry
/// (unknown type identifier, or fewer value bytes than the type declares)
/// fails the whole call; no partial result is returned.
pub fn decode(payload: &[u8]) -> Result<Vec<Measurement>, LppError> {
    let mut reader = LppReader::new(payload);
    let mut measurements = Vec::new();

    while !reader.is_empty() {
        let channel = reader.read_u8()?;
        let type_id = reader.read_u8()?;
        let desc = layout::descriptor(type_id).ok_or(LppError::UnknownType { type_id })?;
        reader.require(desc.data_size())?;

        let value = match desc.rule {
            Rule::U8 { scale } => Value::Scalar(f64::from(reader.read_u8()?) / scale),
            Rule::U16 { scale } => Value::Scalar(f64::from(reader.read_u16_be()?) / scale),
            Rule::I16 { scale } => Value::Scalar(f64::from(reader.read_i16_be()?) / scale),
            Rule::Axes(axes) => {
                let mut parts = IndexMap::with_capacity(axes.len());
                for axis in axes {
                    let raw = match axis.bytes {
                        3 => f64::from(reader.read_i24_be()?),
                        _ => f64::from(reader.read_i16_be()?),
                    };
                    parts.insert(axis.name, raw / axis.scale);
                }
                Value::Vector(parts)
            }
        };

        measurements.push(Measurement {
            channel,
            name: desc.name,
            unit: desc.unit,
            value,
        });
    }

    Ok(measurements)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scalar(m: &Measurement) -> f64 {
        m.value.as_scalar().expect("scalar value")
    }

    #[test]
    fn empty_payload_decodes_to_nothing() {
        let measurements = decode(&[]).unwrap();
        assert!(measurements.is_empty());
    }

    #[test]
    fn temperature_entry() {
        // Channel 1, temperature, raw int16 0x0110 = 272 -> 27.2
        let measurements = decode(&[0x01, 0x67, 0x01, 0x10]).unwrap();
        assert_eq!(measurements.len(), 1);
        assert_eq!(measurements[0].channel, 1);
        assert_eq!(measurements[0].name, "temperature");
        assert_eq!(measurements[0].unit, Some("°C"));
        assert_eq!(scalar(&measurements[0]), 27.2);
    }

    #[test]
    fn negative_temperature() {
        let measurements = decode(&[0x05, 0x67, 0xFF, 0xFF]).unwrap();
        assert_eq!(scalar(&measurements[0]), -0.1);
    }

    #[test]
    fn digital_input() {
        let measurements = decode(&[0x03, 0x00, 0x64]).unwrap();
        assert_eq!(measurements[0].name, "digital_input");
        assert_eq!(scalar(&measurements[0]), 100.0);
    }

    #[test]
    fn analog_input_negative() {
        // Raw int16 -275 -> -2.75
        let measurements = decode(&[0x01, 0x02, 0xFE, 0xED]).unwrap();
        assert_eq!(measurements[0].name, "analog_input");
        assert_eq!(scalar(&measurements[0]), -2.75);
    }

    #[test]
    fn illuminance() {
        let measurements = decode(&[0x02, 0x65, 0x03, 0xE8]).unwrap();
        assert_eq!(measurements[0].name, "illuminance");
        assert_eq!(measurements[0].unit, Some("lux"));
        assert_eq!(scalar(&measurements[0]), 1000.0);
    }

    #[test]
    fn presence() {
        let measurements = decode(&[0x05, 0x66, 0x01]).unwrap();
        assert_eq!(measurements[0].name, "presence");
        assert_eq!(scalar(&measurements[0]), 1.0);
    }

    #[test]
    fn humidity_half_percent_steps() {
        let measurements = decode(&[0x05, 0x68, 0x64]).unwrap();
        assert_eq!(scalar(&measurements[0]), 50.0);
        let measurements = decode(&[0x01, 0x68, 0xC8]).unwrap();
        assert_eq!(scalar(&measurements[0]), 100.0);
    }

    #[test]
    fn barometer() {
        let measurements = decode(&[0x03, 0x73, 0x27, 0x94]).unwrap();
        assert_eq!(measurements[0].name, "barometer");
        assert_eq!(scalar(&measurements[0]), 1013.2);
    }

    #[test]
    fn accelerometer_axes_in_order() {
        let measurements = decode(&[0x03, 0x71, 0x00, 0x01, 0x00, 0x02, 0x00, 0x03]).unwrap();
        assert_eq!(measurements[0].name, "accelerometer");
        match &measurements[0].value {
            Value::Vector(parts) => {
                let axes: Vec<_> = parts.iter().map(|(name, v)| (*name, *v)).collect();
                assert_eq!(axes, vec![("x", 0.001), ("y", 0.002), ("z", 0.003)]);
            }
            Value::Scalar(_) => panic!("expected composite value"),
        }
    }

    #[test]
    fn gyrometer_negative_axes() {
        // X = -10.5, Y = 5.25, Z = 0.0
        let measurements = decode(&[0x04, 0x86, 0xFB, 0xE6, 0x02, 0x0D, 0x00, 0x00]).unwrap();
        match &measurements[0].value {
            Value::Vector(parts) => {
                assert_eq!(parts["x"], -10.5);
                assert_eq!(parts["y"], 5.25);
                assert_eq!(parts["z"], 0.0);
            }
            Value::Scalar(_) => panic!("expected composite value"),
        }
    }

    #[test]
    fn gps_negative_coordinates() {
        // Lat -10.0, Lon 20.5, Alt -15.25
        let payload = [
            0x02, 0x88, 0xFE, 0x79, 0x60, 0x03, 0x20, 0xC8, 0xFF, 0xFA, 0x0B,
        ];
        let measurements = decode(&payload).unwrap();
        match &measurements[0].value {
            Value::Vector(parts) => {
                assert_eq!(parts["latitude"], -10.0);
                assert_eq!(parts["longitude"], 20.5);
                assert_eq!(parts["altitude"], -15.25);
            }
            Value::Scalar(_) => panic!("expected composite value"),
        }
    }

    #[test]
    fn entries_decode_in_input_order() {
        let payload = [
            0x00, 0x67, 0x00, 0xE6, // temperature 23.0
            0x01, 0x68, 0xC8, // humidity 100.0
            0x02, 0x65, 0x03, 0xE8, // illuminance 1000
            0x03, 0x73, 0x27, 0xC4, // barometer 1018.0
        ];
        let measurements = decode(&payload).unwrap();
        let names: Vec<_> = measurements.iter().map(|m| m.name).collect();
        assert_eq!(
            names,
            vec!["temperature", "humidity", "illuminance", "barometer"]
        );
        assert_eq!(scalar(&measurements[0]), 23.0);
        assert_eq!(scalar(&measurements[3]), 1018.0);
    }

    #[test]
    fn same_type_on_two_channels() {
        let payload = [0x03, 0x67, 0x01, 0x10, 0x05, 0x67, 0xFF, 0xFF];
        let measurements = decode(&payload).unwrap();
        assert_eq!(measurements[0].channel, 3);
        assert_eq!(scalar(&measurements[0]), 27.2);
        assert_eq!(measurements[1].channel, 5);
        assert_eq!(scalar(&measurements[1]), -0.1);
    }

    #[test]
    fn truncated_header_fails() {
        // Channel byte with no type byte.
        let err = decode(&[0x03]).unwrap_err();
        assert!(matches!(err, LppError::TooShort { .. }));
    }

    #[test]
    fn truncated_value_fails_without_partial_output() {
        // Temperature declares 2 value bytes, only 1 present.
        let err = decode(&[0x03, 0x67, 0x01]).unwrap_err();
        assert_eq!(err, LppError::TooShort { needed: 4, actual: 3 });
    }

    #[test]
    fn truncated_second_entry_discards_the_first() {
        let payload = [0x01, 0x67, 0x01, 0x10, 0x02, 0x71, 0x00];
        let err = decode(&payload).unwrap_err();
        assert!(matches!(err, LppError::TooShort { .. }));
    }

    #[test]
    fn unknown_type_fails() {
        let err = decode(&[0x03, 0x63, 0x01, 0x02]).unwrap_err();
        assert_eq!(err, LppError::UnknownType { type_id: 0x63 });
    }
}
