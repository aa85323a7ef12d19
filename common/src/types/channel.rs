use crate::types::XYZ;

const X_BIT: u8 = 0b0001;
const Y_BIT: u8 = 0b0010;
const Z_BIT: u8 = 0b0100;
const TIME_BIT: u8 = 0b1000;
const ALL_BITS: u8 = X_BIT | Y_BIT | Z_BIT | TIME_BIT;

/// Records which fields of a [`ChannelReading`] were actually reported by the device.
///
/// Missing fields still read as `0.0` in the reading itself, so this mask is the
/// only way to tell a reported zero apart from an absent value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Presence(u8);

impl Presence {
    pub fn all() -> Self {
        Self(ALL_BITS)
    }

    pub fn from_flags(x: bool, y: bool, z: bool, time: bool) -> Self {
        let mut bits = 0;
        for (present, bit) in [(x, X_BIT), (y, Y_BIT), (z, Z_BIT), (time, TIME_BIT)] {
            if present {
                bits |= bit;
            }
        }
        Self(bits)
    }

    pub fn x(&self) -> bool {
        self.0 & X_BIT != 0
    }

    pub fn y(&self) -> bool {
        self.0 & Y_BIT != 0
    }

    pub fn z(&self) -> bool {
        self.0 & Z_BIT != 0
    }

    pub fn time(&self) -> bool {
        self.0 & TIME_BIT != 0
    }

    pub fn is_complete(&self) -> bool {
        self.0 == ALL_BITS
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

/// One channel group of a snapshot: a 3-axis vector plus the device-side timestamp.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct ChannelReading {
    vector: XYZ,
    device_time: f64,
    presence: Presence,
}

impl ChannelReading {
    /// Creates a fully reported reading.
    pub fn new(vector: XYZ, device_time: f64) -> Self {
        Self {
            vector,
            device_time,
            presence: Presence::all(),
        }
    }

    pub fn with_presence(vector: XYZ, device_time: f64, presence: Presence) -> Self {
        Self {
            vector,
            device_time,
            presence,
        }
    }

    pub fn vector(&self) -> XYZ {
        self.vector
    }

    pub fn device_time(&self) -> f64 {
        self.device_time
    }

    pub fn presence(&self) -> Presence {
        self.presence
    }
}
