//! Topic-based event bus for reconciliation events.
//!
//! Host change notifications flow in through [`HostEvent`]; derived-state
//! updates flow out on per-topic broadcast channels so consumers subscribe
//! only to what they render.

mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::{CellEvent, CounterEvent, HostEvent};
