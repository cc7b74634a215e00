use tracing::debug;

use crate::core::{Margin, Viewport};
use crate::error::ChartResult;
use crate::interaction::ZoomTransform;
use crate::render::{LayoutFrame, Scene, SceneBatch, SceneOp};

use super::GraphEngine;
use super::graph_settings::GraphSettingsPatch;
use super::render_coordinator::ViewReason;
use super::validation::{validate_margin, validate_settings, validate_viewport};

impl<S: Scene> GraphEngine<S> {
    /// Recomputes plot size from the host and margins, then re-renders
    /// without transitions.
    pub fn set_dimensions(&mut self, margin: Option<Margin>) -> ChartResult<()> {
        let margin = margin.map(validate_margin).transpose()?;
        self.transact(|engine| {
            if let Some(margin) = margin {
                engine.settings.margin = margin;
            }
            engine.apply_layout()?;
            engine.update_view(ViewReason::Resize)
        })
    }

    /// Host element was resized.
    pub fn on_resize(&mut self, host: Viewport) -> ChartResult<()> {
        let host = validate_viewport(host)?;
        self.transact(|engine| {
            engine.host = host;
            engine.set_dimensions(None)
        })
    }

    /// Deep-merges `patch` over the current settings and re-renders.
    ///
    /// The merged result is validated first. If validation fails or the scene
    /// rejects the pass, the previous settings stay in place.
    pub fn update_settings(&mut self, patch: &GraphSettingsPatch) -> ChartResult<()> {
        let candidate = self.settings.merged(patch);
        validate_settings(&candidate)?;

        self.transact(|engine| {
            engine.settings = candidate;
            let zoom = engine.settings.zoom;
            engine.zoom.configure(zoom.enabled, zoom.min, zoom.max);
            let current = engine.zoom.transform();
            if !engine.zoom.accepts(current) {
                let clamped = engine.zoom.clamp_scale(current.k);
                let rescaled = engine
                    .zoom
                    .constrain(ZoomTransform::new(clamped, current.x));
                engine.zoom.set_transform(rescaled);
            }

            debug!(
                zoom_enabled = zoom.enabled,
                debug = engine.settings.debug,
                "update graph settings"
            );
            engine.apply_layout()?;
            engine.update_view(ViewReason::Settings)
        })
    }

    /// Emits the outer layout and resizes the gesture area to the plot.
    pub(super) fn apply_layout(&mut self) -> ChartResult<()> {
        let layout = LayoutFrame::new(self.host, self.settings.margin);
        self.zoom.set_extent(layout.plot.width, layout.plot.height);
        debug!(
            width = layout.viewport.width,
            height = layout.viewport.height,
            plot_width = layout.plot.width,
            plot_height = layout.plot.height,
            "apply graph layout"
        );
        self.scene
            .apply(&SceneBatch::new().with_op(SceneOp::Layout(layout)))
    }
}
