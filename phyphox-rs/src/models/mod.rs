pub mod acquisition;
pub mod shutdown;
