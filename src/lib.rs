//! chart-graph: embeddable 2D line/bar graph engine.
//!
//! The engine owns data, settings, pan/zoom state and scales, and drives a
//! retained-mode [`render::Scene`] with keyed element batches. Hosts forward
//! pointer, wheel and resize input and receive hover/click events through
//! [`extensions::GraphListener`].

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{GraphEngine, GraphSettings, GraphSettingsPatch};
pub use error::{ChartError, ChartResult};
