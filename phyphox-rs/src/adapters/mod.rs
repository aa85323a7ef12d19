pub mod mock;
pub mod production;

pub use mock::{PhyphoxMock, ScriptedPhyphox};
pub use production::Phyphox;
