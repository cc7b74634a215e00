use serde::{Deserialize, Serialize};

use crate::core::{DataSet, GraphType, Margin, PlotSize, Point, Viewport};
use crate::interaction::ZoomTransform;

/// Nearest sample of one series, positioned in host pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineValue {
    pub series_id: String,
    pub index: usize,
    pub point: Point,
    pub x_pos: f64,
    pub y_pos: f64,
}

/// On-screen rectangle of a bar, in host pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarRect {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarValue {
    pub series_id: String,
    pub index: usize,
    pub point: Point,
    pub rect: BarRect,
}

/// Notifications emitted from the engine's pointer handlers.
///
/// Hover events carry `None` when the pointer leaves the plot area or a bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GraphEvent {
    LineHover(Option<Vec<LineValue>>),
    LineClick(Option<Vec<LineValue>>),
    BarHover(Option<BarValue>),
    BarClick(BarValue),
}

/// Read-only view of engine state handed to listeners with each event.
#[derive(Debug, Clone, Copy)]
pub struct GraphContext<'a> {
    pub graph_type: Option<GraphType>,
    pub transform: ZoomTransform,
    pub viewport: Viewport,
    pub margin: Margin,
    pub plot: PlotSize,
    pub data: &'a DataSet,
}

/// Receiver for graph events.
///
/// Listeners observe events and read engine context without holding on to
/// engine internals between calls.
pub trait GraphListener {
    fn id(&self) -> &str;
    fn on_event(&mut self, event: &GraphEvent, context: &GraphContext<'_>);
}
