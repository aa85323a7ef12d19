use std::fmt;

use crate::constants::N_SENSOR_GROUPS;

/// Channel groups exported by the phone, in snapshot order.
///
/// # Examples
///
/// ```
/// use common::SensorGroup;
///
/// let group = SensorGroup::Gyroscope;
/// assert_eq!(usize::from(group), 3);
/// assert_eq!(SensorGroup::try_from(0), Ok(SensorGroup::Gravity));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(usize)]
pub enum SensorGroup {
    Gravity = 0,
    LinearAcceleration,
    Acceleration,
    Gyroscope,
}

impl SensorGroup {
    pub const ALL: [SensorGroup; N_SENSOR_GROUPS] = [
        SensorGroup::Gravity,
        SensorGroup::LinearAcceleration,
        SensorGroup::Acceleration,
        SensorGroup::Gyroscope,
    ];

    /// Plot title, including the measurement unit.
    pub fn title(&self) -> &'static str {
        match self {
            SensorGroup::Gravity => "Gravity (m/s²)",
            SensorGroup::LinearAcceleration => "Linear Acceleration (m/s²)",
            SensorGroup::Acceleration => "Total Acceleration (m/s²)",
            SensorGroup::Gyroscope => "Gyroscope (rad/s)",
        }
    }

    /// Short label used in one-line summaries.
    pub fn short_name(&self) -> &'static str {
        match self {
            SensorGroup::Gravity => "Grav",
            SensorGroup::LinearAcceleration => "LinAcc",
            SensorGroup::Acceleration => "Acc",
            SensorGroup::Gyroscope => "Gyro",
        }
    }
}

impl From<SensorGroup> for usize {
    fn from(value: SensorGroup) -> Self {
        value as usize
    }
}

impl TryFrom<usize> for SensorGroup {
    type Error = String;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        SensorGroup::ALL
            .get(value)
            .copied()
            .ok_or_else(|| format!("Sensor group {} doesnt exist", value))
    }
}

impl fmt::Display for SensorGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}
