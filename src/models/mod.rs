pub mod event;

pub use event::{Event, EventDetails, EventMode, NewEvent};
