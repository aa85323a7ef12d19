//! General functionality shared by the `phyphox` collector crates
//!
//! Holds the normalized [`SensorSnapshot`] record produced on every poll and the
//! bounded buffers used to retain snapshots and plotted series.

pub mod constants;

#[doc(hidden)]
pub mod types;

// Re-export types
#[doc(inline)]
pub use types::{buffers, ChannelReading, Presence, SensorGroup, SensorSnapshot, XYZ};
