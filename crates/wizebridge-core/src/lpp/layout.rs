pub const TYPE_DIGITAL_INPUT: u8 = 0x00;
pub const TYPE_DIGITAL_OUTPUT: u8 = 0x01;
pub const TYPE_ANALOG_INPUT: u8 = 0x02;
pub const TYPE_ANALOG_OUTPUT: u8 = 0x03;
pub const TYPE_ILLUMINANCE: u8 = 0x65;
pub const TYPE_PRESENCE: u8 = 0x66;
pub const TYPE_TEMPERATURE: u8 = 0x67;
pub const TYPE_HUMIDITY: u8 = 0x68;
pub const TYPE_ACCELEROMETER: u8 = 0x71;
pub const TYPE_BAROMETER: u8 = 0x73;
pub const TYPE_GYROMETER: u8 = 0x86;
pub const TYPE_GPS: u8 = 0x88;

/// One sub-field of a composite type. Axis values are big-endian
/// two's-complement, `bytes` wide, divided by `scale`.
#[derive(Debug, Clone, Copy)]
pub struct Axis {
    pub name: &'static str,
    pub bytes: usize,
    pub scale: f64,
}

/// Decoding rule for a registry entry. `scale` is the fixed-point divisor.
#[derive(Debug, Clone, Copy)]
pub enum Rule {
    U8 { scale: f64 },
    U16 { scale: f64 },
    I16 { scale: f64 },
    Axes(&'static [Axis]),
}

/// Registry entry mapping a type identifier to its name, decoding rule,
/// and unit metadata.
#[derive(Debug, Clone, Copy)]
pub struct TypeDescriptor {
    pub id: u8,
    pub name: &'static str,
    pub unit: Option<&'static str>,
    pub rule: Rule,
}

impl TypeDescriptor {
    /// Number of value bytes one entry of this type consumes.
    pub fn data_size(&self) -> usize {
        match self.rule {
            Rule::U8 { .. } => 1,
            Rule::U16 { .. } | Rule::I16 { .. } => 2,
            Rule::Axes(axes) => axes.iter().map(|axis| axis.bytes).sum(),
        }
    }
}

const ACCELEROMETER_AXES: &[Axis] = &[
    Axis { name: "x", bytes: 2, scale: 1000.0 },
    Axis { name: "y", bytes: 2, scale: 1000.0 },
    Axis { name: "z", bytes: 2, scale: 1000.0 },
];

const GYROMETER_AXES: &[Axis] = &[
    Axis { name: "x", bytes: 2, scale: 100.0 },
    Axis { name: "y", bytes: 2, scale: 100.0 },
    Axis { name: "z", bytes: 2, scale: 100.0 },
];

const GPS_AXES: &[Axis] = &[
    Axis { name: "latitude", bytes: 3, scale: 10000.0 },
    Axis { name: "longitude", bytes: 3, scale: 10000.0 },
    Axis { name: "altitude", bytes: 3, scale: 100.0 },
];

pub static REGISTRY: &[TypeDescriptor] = &[
    TypeDescriptor {
        id: TYPE_DIGITAL_INPUT,
        name: "digital_input",
        unit: None,
        rule: Rule::U8 { scale: 1.0 },
    },
    TypeDescriptor {
        id: TYPE_DIGITAL_OUTPUT,
        name: "digital_output",
        unit: None,
        rule: Rule::U8 { scale: 1.0 },
    },
    TypeDescriptor {
        id: TYPE_ANALOG_INPUT,
        name: "analog_input",
        unit: None,
        rule: Rule::I16 { scale: 100.0 },
    },
    TypeDescriptor {
        id: TYPE_ANALOG_OUTPUT,
        name: "analog_output",
        unit: None,
        rule: Rule::I16 { scale: 100.0 },
    },
    TypeDescriptor {
        id: TYPE_ILLUMINANCE,
        name: "illuminance",
        unit: Some("lux"),
        rule: Rule::U16 { scale: 1.0 },
    },
    TypeDescriptor {
        id: TYPE_PRESENCE,
        name: "presence",
        unit: None,
        rule: Rule::U8 { scale: 1.0 },
    },
    TypeDescriptor {
        id: TYPE_TEMPERATURE,
        name: "temperature",
        unit: Some("°C"),
        rule: Rule::I16 { scale: 10.0 },
    },
    TypeDescriptor {
        id: TYPE_HUMIDITY,
        name: "humidity",
        unit: Some("%"),
        rule: Rule::U8 { scale: 2.0 },
    },
    TypeDescriptor {
        id: TYPE_ACCELEROMETER,
        name: "accelerometer",
        unit: Some("g"),
        rule: Rule::Axes(ACCELEROMETER_AXES),
    },
    TypeDescriptor {
        id: TYPE_BAROMETER,
        name: "barometer",
        unit: Some("hPa"),
        rule: Rule::U16 { scale: 10.0 },
    },
    TypeDescriptor {
        id: TYPE_GYROMETER,
        name: "gyrometer",
        unit: Some("°/s"),
        rule: Rule::Axes(GYROMETER_AXES),
    },
    TypeDescriptor {
        id: TYPE_GPS,
        name: "gps",
        unit: None,
        rule: Rule::Axes(GPS_AXES),
    },
];

/// Look up the descriptor for a type identifier.
pub fn descriptor(type_id: u8) -> Option<&'static TypeDescriptor> {
    REGISTRY.iter().find(|desc| desc.id == type_id)
}
