use common::buffers::CircularBuffer;
use common::constants::N_SENSOR_GROUPS;
use common::{ChannelReading, SensorGroup, SensorSnapshot};

/// Sliding window of the x, y and z values of one channel group.
#[derive(Clone, Debug)]
pub struct GroupSeries {
    x: CircularBuffer<f64>,
    y: CircularBuffer<f64>,
    z: CircularBuffer<f64>,
}

impl GroupSeries {
    fn new(window_size: usize) -> Self {
        Self {
            x: CircularBuffer::new(window_size),
            y: CircularBuffer::new(window_size),
            z: CircularBuffer::new(window_size),
        }
    }

    fn push(&mut self, reading: &ChannelReading) {
        let vector = reading.vector();
        self.x.push(vector.x());
        self.y.push(vector.y());
        self.z.push(vector.z());
    }

    pub fn x(&self) -> &CircularBuffer<f64> {
        &self.x
    }

    pub fn y(&self) -> &CircularBuffer<f64> {
        &self.y
    }

    pub fn z(&self) -> &CircularBuffer<f64> {
        &self.z
    }

    /// Number of points in the window. All three axes always have the same length.
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Most recent `[x, y, z]`.
    pub fn latest(&self) -> Option<[f64; 3]> {
        match (self.x.latest(), self.y.latest(), self.z.latest()) {
            (Some(x), Some(y), Some(z)) => Some([*x, *y, *z]),
            _ => None,
        }
    }
}

/// Last `window_size` values of every axis of every channel group.
#[derive(Clone, Debug)]
pub struct WindowedSeries {
    groups: [GroupSeries; N_SENSOR_GROUPS],
    window_size: usize,
}

impl WindowedSeries {
    pub fn new(window_size: usize) -> Self {
        Self {
            groups: std::array::from_fn(|_| GroupSeries::new(window_size)),
            window_size: window_size.max(1),
        }
    }

    /// Appends every group of `snapshot`, evicting the oldest point once the window is full.
    pub fn push(&mut self, snapshot: &SensorSnapshot) {
        for group in SensorGroup::ALL {
            self.groups[usize::from(group)].push(snapshot.reading(group));
        }
    }

    pub fn group(&self, group: SensorGroup) -> &GroupSeries {
        &self.groups[usize::from(group)]
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    pub fn len(&self) -> usize {
        self.groups[0].len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups[0].is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;
    use common::XYZ;

    fn snapshot(value: f64) -> SensorSnapshot {
        let reading = ChannelReading::new(XYZ::new([value, value * 2.0, value * 3.0]), value);
        SensorSnapshot::new(Local::now(), [reading; N_SENSOR_GROUPS])
    }

    #[test]
    fn test_push_fills_every_group() {
        let mut series = WindowedSeries::new(5);
        series.push(&snapshot(1.0));

        for group in SensorGroup::ALL {
            assert_eq!(series.group(group).latest(), Some([1.0, 2.0, 3.0]));
        }
        assert_eq!(series.len(), 1);
    }

    #[test]
    fn test_window_keeps_last_values() {
        let mut series = WindowedSeries::new(3);
        for i in 0..10 {
            series.push(&snapshot(i as f64));
        }

        let gyro = series.group(SensorGroup::Gyroscope);
        assert_eq!(gyro.len(), 3);
        assert_eq!(gyro.x().to_vec(), vec![7.0, 8.0, 9.0]);
        assert_eq!(gyro.z().to_vec(), vec![21.0, 24.0, 27.0]);
    }

    #[test]
    fn test_empty_series() {
        let series = WindowedSeries::new(0);
        assert!(series.is_empty());
        assert_eq!(series.window_size(), 1);
        assert_eq!(series.group(SensorGroup::Gravity).latest(), None);
    }
}
