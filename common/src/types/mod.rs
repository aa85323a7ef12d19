pub mod buffers;
pub mod channel;
pub mod sensor_group;
pub mod snapshot;
pub mod xyz;

pub use channel::*;
pub use sensor_group::*;
pub use snapshot::*;
pub use xyz::*;
