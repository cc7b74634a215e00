use tracing::{debug, trace};

use crate::core::GraphType;
use crate::error::ChartResult;
use crate::interaction::ZoomTransform;
use crate::render::Scene;

use super::GraphEngine;
use super::render_coordinator::ViewReason;

/// Pixel spans below this are treated as a zero-width visible range.
const MIN_RANGE_SPAN_PX: f64 = 1e-9;

impl<S: Scene> GraphEngine<S> {
    /// Applies a raw pan/zoom transform from the host's gesture capture.
    ///
    /// Returns `false` (and changes nothing) when zoom is disabled or the
    /// scale factor is outside the configured bounds. Accepted transforms
    /// are constrained so content cannot be dragged past the plot edges and
    /// render without transitions.
    pub fn on_gesture(&mut self, transform: ZoomTransform) -> ChartResult<bool> {
        if !self.zoom.is_enabled() || !self.zoom.accepts(transform) {
            trace!(
                k = transform.k,
                x = transform.x,
                enabled = self.zoom.is_enabled(),
                "reject gesture transform"
            );
            return Ok(false);
        }
        let constrained = self.zoom.constrain(transform);
        self.transact(|engine| {
            engine.zoom.set_transform(constrained);
            engine.update_view(ViewReason::Gesture)
        })?;
        Ok(true)
    }

    /// Wheel zoom anchored at a host x coordinate.
    pub fn on_wheel(&mut self, delta_y: f64, anchor_x: f64) -> ChartResult<bool> {
        if !delta_y.is_finite() || !anchor_x.is_finite() {
            return Ok(false);
        }
        let anchor = anchor_x - self.settings.margin.left;
        let target = self.zoom.wheel_target(delta_y, anchor);
        self.on_gesture(target)
    }

    /// Horizontal drag by `dx` host pixels.
    pub fn on_drag(&mut self, dx: f64) -> ChartResult<bool> {
        if !dx.is_finite() {
            return Ok(false);
        }
        let target = self.zoom.drag_target(dx);
        self.on_gesture(target)
    }

    /// Animates the view so the domain span `[x1, x2]` fills the plot width,
    /// centered, with the scale factor capped at the zoom maximum.
    ///
    /// Only line graphs are continuously zoomable: bar mode and non-finite
    /// input return `Ok(None)` and leave the transform untouched.
    pub fn set_visible_range(&mut self, x1: f64, x2: f64) -> ChartResult<Option<ZoomTransform>> {
        if self.graph_type != Some(GraphType::Line) || !x1.is_finite() || !x2.is_finite() {
            return Ok(None);
        }
        let Some(x_scale) = self.scales.x.as_linear() else {
            return Ok(None);
        };

        let width = self.plot_size().width;
        let (px1, px2) = (x_scale.map(x1), x_scale.map(x2));
        let span = (px1 - px2).abs();
        let (min_k, max_k) = self.zoom.scale_bounds();
        let k = if span.is_finite() && span >= MIN_RANGE_SPAN_PX {
            (width / span).min(max_k)
        } else {
            max_k
        }
        .max(min_k);
        let transform = ZoomTransform::new(k, -k * px1.min(px2) + (width - span * k) / 2.0);
        if !transform.is_finite() {
            return Ok(None);
        }

        debug!(x1, x2, k = transform.k, tx = transform.x, "set visible range");
        self.transact(|engine| {
            engine.zoom.set_transform(transform);
            engine.update_view(ViewReason::Navigation)
        })?;
        Ok(Some(transform))
    }

    /// Animates back to the identity transform.
    pub fn reset_zoom(&mut self) -> ChartResult<()> {
        debug!("reset zoom");
        self.transact(|engine| {
            engine.zoom.reset();
            engine.update_view(ViewReason::Navigation)
        })
    }
}
