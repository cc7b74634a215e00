use tracing::debug;

use crate::core::{DataSet, GraphType, detect_type};
use crate::error::ChartResult;
use crate::render::{Scene, SceneBatch};

use super::GraphEngine;
use super::render_coordinator::{RenderCoordinator, ViewReason};
use super::series_reconciler::{ReconcileContext, SeriesReconciler};

impl<S: Scene> GraphEngine<S> {
    /// Replaces the data and re-renders with animated transitions.
    ///
    /// The mode is `graph_type` when given, otherwise inferred from the data
    /// shape. Switching modes first exits every element of the previous mode.
    /// If the scene rejects the pass, the previous data and mode are kept.
    pub fn update(&mut self, data: DataSet, graph_type: Option<GraphType>) -> ChartResult<()> {
        let resolved = graph_type.unwrap_or_else(|| detect_type(&data));
        debug!(
            series = data.len(),
            graph_type = ?resolved,
            overridden = graph_type.is_some(),
            "update graph data"
        );

        let previous_data = std::mem::replace(&mut self.data, data);
        let result = self.transact(|engine| {
            if let Some(previous) = engine.graph_type {
                if previous != resolved {
                    engine.tear_down(previous)?;
                }
            }
            engine.graph_type = Some(resolved);
            engine.update_view(ViewReason::Data)
        });
        if result.is_err() {
            self.data = previous_data;
        }
        result
    }

    pub(super) fn update_view(&mut self, reason: ViewReason) -> ChartResult<()> {
        RenderCoordinator::update_view(self, reason)
    }

    /// Runs `previous`'s reconciler against an empty data set so none of its
    /// elements outlive the mode switch.
    fn tear_down(&mut self, previous: GraphType) -> ChartResult<()> {
        let empty = DataSet::empty();
        let context = ReconcileContext {
            data: &empty,
            props: &self.settings.props,
            scales: &self.scales,
            extent: self.extent,
            transform: self.zoom.transform(),
            plot: self.plot_size(),
            transition: self.settings.transition.animated(),
        };
        let diff = match previous {
            GraphType::Line => self.lines.reconcile(&context),
            GraphType::Bar => self.bars.reconcile(&context),
        };
        debug!(
            previous = ?previous,
            exited = diff.exited.len(),
            "tear down previous graph mode"
        );
        if diff.is_empty() {
            RenderCoordinator::settle(self, true);
            return Ok(());
        }
        let applied = self.scene.apply(&SceneBatch { ops: diff.ops });
        RenderCoordinator::settle(self, applied.is_ok());
        applied
    }
}
