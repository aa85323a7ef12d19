pub const N_XYZ_COORDINATES: usize = 3;
pub const N_SENSOR_GROUPS: usize = 4;

/// Default number of snapshots retained by the rolling history.
pub const DEFAULT_BUFFER_CAPACITY: usize = 1000;
/// Default number of points kept per plotted series.
pub const DEFAULT_WINDOW_SIZE: usize = 100;
