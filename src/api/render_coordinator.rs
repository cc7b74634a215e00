use tracing::{debug, trace};

use crate::core::{GraphType, compute_extent};
use crate::error::ChartResult;
use crate::interaction::RenderMode;
use crate::render::{Scene, SceneBatch, SceneOp, Transition};

use super::GraphEngine;
use super::axis_renderer::AxisPass;
use super::scale_coordinator::ScaleCoordinator;
use super::series_reconciler::{ReconcileContext, SeriesReconciler};

/// What triggered a view pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum ViewReason {
    Data,
    Settings,
    /// Programmatic zoom change (visible range, reset).
    Navigation,
    Gesture,
    Resize,
}

impl ViewReason {
    pub(super) fn render_mode(self) -> RenderMode {
        match self {
            Self::Data | Self::Settings | Self::Navigation => RenderMode::Animated,
            Self::Gesture | Self::Resize => RenderMode::Immediate,
        }
    }

    /// Zoom and resize passes reuse the last extent.
    fn recomputes_extent(self) -> bool {
        matches!(self, Self::Data | Self::Settings)
    }
}

pub(super) struct RenderCoordinator;

impl RenderCoordinator {
    /// Full view update: extent (when data-driven), scales, both axes and the
    /// active mode's elements, applied to the scene as one batch.
    ///
    /// Element registries only advance when the scene accepts the batch.
    pub(super) fn update_view<S: Scene>(
        engine: &mut GraphEngine<S>,
        reason: ViewReason,
    ) -> ChartResult<()> {
        let Some(graph_type) = engine.graph_type else {
            trace!(?reason, "skip view update before first data update");
            return Ok(());
        };

        if reason.recomputes_extent() {
            engine.extent = compute_extent(&engine.data, engine.extent_policy());
        }
        engine.scales = ScaleCoordinator::build(engine, graph_type);

        let transition = match reason.render_mode() {
            RenderMode::Animated => engine.settings.transition.animated(),
            RenderMode::Immediate => Transition::Immediate,
        };
        let transform = engine.zoom.transform();
        let plot = engine.plot_size();

        let mut batch = SceneBatch::new();
        batch.push(SceneOp::Mode(graph_type));
        let pass = AxisPass {
            scales: &engine.scales,
            graph_type,
            transform,
            plot,
            margin: engine.settings.margin,
        };
        batch.extend(engine.axes.render(&engine.settings.axis, &pass, transition)?);

        let context = ReconcileContext {
            data: &engine.data,
            props: &engine.settings.props,
            scales: &engine.scales,
            extent: engine.extent,
            transform,
            plot,
            transition,
        };
        let diff = match graph_type {
            GraphType::Line => engine.lines.reconcile(&context),
            GraphType::Bar => engine.bars.reconcile(&context),
        };

        if engine.settings.debug {
            debug!(
                ?reason,
                ?graph_type,
                x_extent = ?engine.extent.x,
                y_extent = ?engine.extent.y,
                k = transform.k,
                tx = transform.x,
                entered = diff.entered.len(),
                updated = diff.updated.len(),
                exited = diff.exited.len(),
                "graph view updated"
            );
        } else {
            trace!(?reason, ops = diff.ops.len(), "graph view updated");
        }

        batch.extend(diff.ops);
        let applied = engine.scene.apply(&batch);
        Self::settle(engine, applied.is_ok());
        applied
    }

    /// Promotes or drops every staged registry after a scene apply.
    pub(super) fn settle<S: Scene>(engine: &mut GraphEngine<S>, accepted: bool) {
        if accepted {
            engine.axes.commit();
            engine.lines.commit();
            engine.bars.commit();
        } else {
            engine.axes.discard();
            engine.lines.discard();
            engine.bars.discard();
        }
    }
}
