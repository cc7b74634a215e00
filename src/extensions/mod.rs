//! Host-facing event types and the listener hook.

mod events;

pub use events::{BarRect, BarValue, GraphContext, GraphEvent, GraphListener, LineValue};
