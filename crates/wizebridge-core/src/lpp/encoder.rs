use super::layout;

/// Builds CayenneLPP payloads entry by entry.
///
/// Values are scaled and clamped to the wire representation of each type,
/// so a decode of the result reproduces the inputs within scale rounding.
///
/// # Examples
/// ```
/// use wizebridge_core::LppWriter;
///
/// let mut writer = LppWriter::new();
/// writer.add_temperature(1, 27.2);
/// assert_eq!(writer.into_bytes(), vec![0x01, 0x67, 0x01, 0x10]);
/// ```
#[derive(Debug, Default)]
pub struct LppWriter {
    buf: Vec<u8>,
}

impl LppWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    pub fn add_digital_input(&mut self, channel: u8, value: u8) -> &mut Self {
        self.push_header(channel, layout::TYPE_DIGITAL_INPUT);
        self.buf.push(value);
        self
    }

    pub fn add_digital_output(&mut self, channel: u8, value: u8) -> &mut Self {
        self.push_header(channel, layout::TYPE_DIGITAL_OUTPUT);
        self.buf.push(value);
        self
    }

    pub fn add_analog_input(&mut self, channel: u8, value: f64) -> &mut Self {
        self.push_header(channel, layout::TYPE_ANALOG_INPUT);
        self.push_i16(scaled(value, 100.0));
        self
    }

    pub fn add_analog_output(&mut self, channel: u8, value: f64) -> &mut Self {
        self.push_header(channel, layout::TYPE_ANALOG_OUTPUT);
        self.push_i16(scaled(value, 100.0));
        self
    }

    pub fn add_illuminance(&mut self, channel: u8, lux: u16) -> &mut Self {
        self.push_header(channel, layout::TYPE_ILLUMINANCE);
        self.push_u16(lux);
        self
    }

    pub fn add_presence(&mut self, channel: u8, value: u8) -> &mut Self {
        self.push_header(channel, layout::TYPE_PRESENCE);
        self.buf.push(value);
        self
    }

    pub fn add_temperature(&mut self, channel: u8, celsius: f64) -> &mut Self {
        self.push_header(channel, layout::TYPE_TEMPERATURE);
        self.push_i16(scaled(celsius, 10.0));
        self
    }

    pub fn add_humidity(&mut self, channel: u8, percent: f64) -> &mut Self {
        self.push_header(channel, layout::TYPE_HUMIDITY);
        self.buf.push((percent * 2.0).round().clamp(0.0, 255.0) as u8);
        self
    }

    pub fn add_accelerometer(&mut self, channel: u8, x: f64, y: f64, z: f64) -> &mut Self {
        self.push_header(channel, layout::TYPE_ACCELEROMETER);
        self.push_i16(scaled(x, 1000.0));
        self.push_i16(scaled(y, 1000.0));
        self.push_i16(scaled(z, 1000.0));
        self
    }

    pub fn add_barometer(&mut self, channel: u8, hpa: f64) -> &mut Self {
        self.push_header(channel, layout::TYPE_BAROMETER);
        self.push_u16((hpa * 10.0).round().clamp(0.0, 65535.0) as u16);
        self
    }

    pub fn add_gyrometer(&mut self, channel: u8, x: f64, y: f64, z: f64) -> &mut Self {
        self.push_header(channel, layout::TYPE_GYROMETER);
        self.push_i16(scaled(x, 100.0));
        self.push_i16(scaled(y, 100.0));
        self.push_i16(scaled(z, 100.0));
        self
    }

    pub fn add_gps(&mut self, channel: u8, latitude: f64, longitude: f64, altitude: f64) -> &mut Self {
        self.push_header(channel, layout::TYPE_GPS);
        self.push_i24(scaled_i24(latitude, 10000.0));
        self.push_i24(scaled_i24(longitude, 10000.0));
        self.push_i24(scaled_i24(altitude, 100.0));
        self
    }

    fn push_header(&mut self, channel: u8, type_id: u8) {
        self.buf.push(channel);
        self.buf.push(type_id);
    }

    fn push_u16(&mut self, value: u16) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    fn push_i16(&mut self, value: i16) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    fn push_i24(&mut self, value: i32) {
        self.buf.push((value >> 16) as u8);
        self.buf.push((value >> 8) as u8);
        self.buf.push(value as u8);
    }
}

fn scaled(value: f64, scale: f64) -> i16 {
    (value * scale)
        .round()
        .clamp(f64::from(i16::MIN), f64::from(i16::MAX)) as i16
}

const I24_MIN: f64 = -8_388_608.0;
const I24_MAX: f64 = 8_388_607.0;

fn scaled_i24(value: f64, scale: f64) -> i32 {
    (value * scale).round().clamp(I24_MIN, I24_MAX) as i32
}
