//! Emulates a phone running phyphox, for running without a device.

mod gaussian;
mod scripted;

use async_trait::async_trait;
use rand::{rngs::StdRng, SeedableRng};
use serde_json::{json, Map, Value};
use std::f64::consts::TAU;
use std::sync::{Mutex, PoisonError};

use crate::constants::group_channels;
use crate::errors::PhyphoxError;
use crate::ports::PhyphoxPort;
use common::{SensorGroup, XYZ};
use gaussian::GaussianNoise;

pub use scripted::ScriptedPhyphox;

const STANDARD_GRAVITY: f64 = 9.81;
const GAUSSIAN_SENSOR_MEAN: f64 = 0f64;
const GAUSSIAN_SENSOR_STDEV: f64 = 0.05;
const MOTION_PERIOD_SECS: f64 = 2.0;
const LIN_ACC_AMPLITUDE: f64 = 0.5;
const GYRO_AMPLITUDE: f64 = 0.3;

struct MockState {
    device_time: f64,
    rng: StdRng,
}

/// Synthetic device: phone lying still on a table and being gently rocked.
pub struct PhyphoxMock {
    state: Mutex<MockState>,
    capture_sampling_period_secs: f64,
    sensor_noise: Option<GaussianNoise>,
}

impl PhyphoxMock {
    /// Creates a new mock whose device clock advances `capture_sampling_period_millis` per request.
    /// Returns a ClientBuild error if the noise generator can't be configured.
    pub fn new(capture_sampling_period_millis: u64, add_sensor_noise: bool) -> Result<Self, PhyphoxError> {
        let sensor_noise = if add_sensor_noise {
            Some(GaussianNoise::new(GAUSSIAN_SENSOR_MEAN, GAUSSIAN_SENSOR_STDEV)?)
        } else {
            None
        };
        Ok(Self {
            state: Mutex::new(MockState {
                device_time: 0.0,
                rng: StdRng::from_entropy(),
            }),
            capture_sampling_period_secs: capture_sampling_period_millis as f64 / 1000.0,
            sensor_noise,
        })
    }

    fn noiseless_reading(group: SensorGroup, t: f64) -> XYZ {
        let phase = TAU * t / MOTION_PERIOD_SECS;
        let linear = XYZ::new([LIN_ACC_AMPLITUDE * phase.sin(), LIN_ACC_AMPLITUDE * phase.cos(), 0.0]);
        match group {
            SensorGroup::Gravity => XYZ::new([0.0, 0.0, STANDARD_GRAVITY]),
            SensorGroup::LinearAcceleration => linear,
            SensorGroup::Acceleration => {
                XYZ::new([linear.x(), linear.y(), linear.z() + STANDARD_GRAVITY])
            }
            SensorGroup::Gyroscope => XYZ::new([0.0, 0.0, GYRO_AMPLITUDE * phase.cos()]),
        }
    }

    /// Builds a phyphox-like response holding one sample per requested channel.
    fn build_response(&self, channels: &[&str]) -> Value {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.device_time += self.capture_sampling_period_secs;
        let t = state.device_time;

        let mut buffers = Map::new();
        for group in SensorGroup::ALL {
            let (time_var, variables) = group_channels(group);
            let reading = Self::noiseless_reading(group, t);
            for (var, value) in variables.iter().zip(reading.inner()) {
                let value = match self.sensor_noise.as_ref() {
                    Some(noise) => noise.add_noise(&mut state.rng, value),
                    None => value,
                };
                if channels.contains(var) {
                    buffers.insert(var.to_string(), channel_entry(value));
                }
            }
            if channels.contains(&time_var) {
                buffers.insert(time_var.to_string(), channel_entry(t));
            }
        }

        json!({
            "buffer": buffers,
            "status": { "countDown": 0, "measuring": true, "session": "mock", "timedRun": false }
        })
    }
}

fn channel_entry(value: f64) -> Value {
    json!({ "buffer": [value], "size": 0, "updateMode": "single" })
}

#[async_trait]
impl PhyphoxPort for PhyphoxMock {
    async fn fetch(&self, channels: &[&str]) -> Result<Value, PhyphoxError> {
        Ok(self.build_response(channels))
    }

    fn describe(&self) -> String {
        "mock phyphox".to_string()
    }
}
