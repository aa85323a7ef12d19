use chrono::{DateTime, Local};
use std::fmt;

use crate::constants::N_SENSOR_GROUPS;
use crate::types::{ChannelReading, SensorGroup};

/// One normalized reading of every channel group, captured at one poll.
///
/// Every group always holds a value. Fields the device did not report read as
/// `0.0`; use [`ChannelReading::presence`] to tell them apart from real zeros.
#[derive(Clone, Debug, PartialEq)]
pub struct SensorSnapshot {
    captured_at: DateTime<Local>,
    readings: [ChannelReading; N_SENSOR_GROUPS],
}

impl SensorSnapshot {
    /// Builds a snapshot from readings ordered as [`SensorGroup::ALL`].
    pub fn new(captured_at: DateTime<Local>, readings: [ChannelReading; N_SENSOR_GROUPS]) -> Self {
        Self {
            captured_at,
            readings,
        }
    }

    pub fn captured_at(&self) -> DateTime<Local> {
        self.captured_at
    }

    pub fn reading(&self, group: SensorGroup) -> &ChannelReading {
        &self.readings[usize::from(group)]
    }

    pub fn readings(&self) -> &[ChannelReading; N_SENSOR_GROUPS] {
        &self.readings
    }

    pub fn gravity(&self) -> &ChannelReading {
        self.reading(SensorGroup::Gravity)
    }

    pub fn linear_acceleration(&self) -> &ChannelReading {
        self.reading(SensorGroup::LinearAcceleration)
    }

    pub fn acceleration(&self) -> &ChannelReading {
        self.reading(SensorGroup::Acceleration)
    }

    pub fn gyroscope(&self) -> &ChannelReading {
        self.reading(SensorGroup::Gyroscope)
    }

    /// True when every axis and timestamp of every group was reported.
    pub fn is_complete(&self) -> bool {
        self.readings.iter().all(|r| r.presence().is_complete())
    }
}

/// One-line console summary, e.g. `Grav: [  0.00,   0.00,   9.81] | LinAcc: [...] | ...`
impl fmt::Display for SensorSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, group) in SensorGroup::ALL.iter().enumerate() {
            if idx > 0 {
                f.write_str(" | ")?;
            }
            let [x, y, z] = self.reading(*group).vector().inner();
            write!(f, "{}: [{:6.2}, {:6.2}, {:6.2}]", group.short_name(), x, y, z)?;
        }
        Ok(())
    }
}
