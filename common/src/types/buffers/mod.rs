pub mod circular_buffer;
pub mod rolling_buffer;

pub use crate::types::buffers::circular_buffer::CircularBuffer;
pub use crate::types::buffers::rolling_buffer::RollingBuffer;
