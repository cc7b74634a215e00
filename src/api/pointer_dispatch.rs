use tracing::trace;

use crate::core::{GraphType, PlotSize};
use crate::extensions::{GraphContext, GraphEvent};
use crate::interaction::{BarPointerEvent, TouchPoint};
use crate::render::Scene;

use super::GraphEngine;

impl<S: Scene> GraphEngine<S> {
    /// Pointer moved over the host; emits a line hover with the nearest
    /// samples, or `None` when outside the plot.
    pub fn on_pointer_move(&mut self, x: f64) {
        if !self.is_line_graph() {
            return;
        }
        let values = self.get_value_at_position(x);
        self.emit_graph_event(GraphEvent::LineHover(values));
    }

    pub fn on_pointer_click(&mut self, x: f64) {
        if !self.is_line_graph() {
            return;
        }
        let values = self.get_value_at_position(x);
        self.emit_graph_event(GraphEvent::LineClick(values));
    }

    /// Single-finger touch drags behave like pointer moves; multi-touch is
    /// left to the gesture handler.
    pub fn on_touch_move(&mut self, touches: &[TouchPoint]) {
        match touches {
            [touch] => self.on_pointer_move(touch.x),
            _ => trace!(touches = touches.len(), "ignore multi-touch move"),
        }
    }

    /// Host reported pointer activity on the bar keyed `series_id`.
    pub fn on_bar_pointer(&mut self, series_id: &str, event: BarPointerEvent) {
        if self.graph_type != Some(GraphType::Bar) {
            return;
        }
        if event == BarPointerEvent::Out {
            self.emit_graph_event(GraphEvent::BarHover(None));
            return;
        }

        let target = self
            .data
            .iter()
            .filter(|series| self.bars.rect(&series.id).is_some())
            .filter_map(|series| Some((series, series.data.first()?)))
            .enumerate()
            .find(|(_, (series, _))| series.id == series_id);
        let Some((index, (series, point))) = target else {
            trace!(series_id, "pointer event for unknown bar");
            return;
        };
        let Some(value) = self.bar_value(index, series, point) else {
            return;
        };
        match event {
            BarPointerEvent::Click => self.emit_graph_event(GraphEvent::BarClick(value)),
            BarPointerEvent::Over | BarPointerEvent::Out => {
                self.emit_graph_event(GraphEvent::BarHover(Some(value)));
            }
        }
    }

    pub(super) fn emit_graph_event(&mut self, event: GraphEvent) {
        let context = GraphContext {
            graph_type: self.graph_type,
            transform: self.zoom.transform(),
            viewport: self.host,
            margin: self.settings.margin,
            plot: PlotSize::from_viewport(self.host, self.settings.margin),
            data: &self.data,
        };
        for listener in &mut self.listeners {
            listener.on_event(&event, &context);
        }
    }
}
