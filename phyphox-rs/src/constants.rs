use common::constants::{N_SENSOR_GROUPS, N_XYZ_COORDINATES};
use common::SensorGroup;

pub const GRAVITY_VARIABLES: [&str; N_XYZ_COORDINATES] = ["graX", "graY", "graZ"];
pub const GRAVITY_TIME: &str = "graT";
pub const LIN_ACC_VARIABLES: [&str; N_XYZ_COORDINATES] = ["lin_accX", "lin_accY", "lin_accZ"];
pub const LIN_ACC_TIME: &str = "lin_acc_time";
pub const ACC_VARIABLES: [&str; N_XYZ_COORDINATES] = ["accX", "accY", "accZ"];
pub const ACC_TIME: &str = "acc_time";
pub const GYRO_VARIABLES: [&str; N_XYZ_COORDINATES] = ["gyroX", "gyroY", "gyroZ"];
pub const GYRO_TIME: &str = "gyro_time";

pub const N_CHANNELS: usize = N_SENSOR_GROUPS * (N_XYZ_COORDINATES + 1);

/// Every channel polled from the phone, in request order.
pub const SENSOR_CHANNELS: [&str; N_CHANNELS] = [
    "gyroX",
    "gyroY",
    "gyroZ",
    "gyro_time",
    "accX",
    "accY",
    "accZ",
    "acc_time",
    "graX",
    "graY",
    "graZ",
    "graT",
    "lin_accX",
    "lin_accY",
    "lin_accZ",
    "lin_acc_time",
];

/// Returns the time channel and axis channels exported for `group`.
pub fn group_channels(group: SensorGroup) -> (&'static str, [&'static str; N_XYZ_COORDINATES]) {
    match group {
        SensorGroup::Gravity => (GRAVITY_TIME, GRAVITY_VARIABLES),
        SensorGroup::LinearAcceleration => (LIN_ACC_TIME, LIN_ACC_VARIABLES),
        SensorGroup::Acceleration => (ACC_TIME, ACC_VARIABLES),
        SensorGroup::Gyroscope => (GYRO_TIME, GYRO_VARIABLES),
    }
}
