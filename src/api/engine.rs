use tracing::warn;

use crate::core::{
    DataSet, Extent, ExtentPolicy, GraphType, Margin, PlotSize, ScaleSet, Viewport,
};
use crate::error::ChartResult;
use crate::extensions::GraphListener;
use crate::interaction::{ZoomState, ZoomTransform};
use crate::render::{AxisElement, Scene};

use super::axis_renderer::{AxisRenderer, AxisSlot};
use super::bar_reconciler::BarReconciler;
use super::graph_settings::{GraphSettings, GraphSettingsPatch};
use super::line_reconciler::LineReconciler;
use super::render_coordinator::RenderCoordinator;
use super::series_reconciler::SeriesReconciler;
use super::validation::{validate_settings, validate_viewport};

/// Main facade consumed by host applications.
///
/// `GraphEngine` owns the data, settings, zoom state and computed scales of
/// one graph and drives a [`Scene`] with keyed element batches.
pub struct GraphEngine<S: Scene> {
    pub(super) scene: S,
    pub(super) host: Viewport,
    pub(super) settings: GraphSettings,
    pub(super) data: DataSet,
    pub(super) graph_type: Option<GraphType>,
    pub(super) zoom: ZoomState,
    pub(super) extent: Extent,
    pub(super) scales: ScaleSet,
    pub(super) axes: AxisRenderer,
    pub(super) lines: LineReconciler,
    pub(super) bars: BarReconciler,
    pub(super) listeners: Vec<Box<dyn GraphListener>>,
}

/// Engine state a failed pass rolls back to.
struct Checkpoint {
    host: Viewport,
    settings: GraphSettings,
    graph_type: Option<GraphType>,
    zoom: ZoomState,
    extent: Extent,
    scales: ScaleSet,
}

impl<S: Scene> GraphEngine<S> {
    /// Mounts a graph into a host of the given size.
    ///
    /// `settings` is merged over the defaults. When `data` is given the first
    /// render pass runs immediately; otherwise only the layout is emitted.
    pub fn create(
        scene: S,
        host: Viewport,
        data: Option<DataSet>,
        settings: GraphSettingsPatch,
    ) -> ChartResult<Self> {
        validate_viewport(host)?;
        let settings = GraphSettings::default().merged(&settings);
        validate_settings(&settings)?;

        let zoom = ZoomState::new(settings.zoom.enabled, settings.zoom.min, settings.zoom.max);
        let mut engine = Self {
            scene,
            host,
            settings,
            data: DataSet::empty(),
            graph_type: None,
            zoom,
            extent: Extent::unit(),
            scales: ScaleSet::default(),
            axes: AxisRenderer::default(),
            lines: LineReconciler::new(),
            bars: BarReconciler::new(),
            listeners: Vec::new(),
        };
        engine.apply_layout()?;
        if let Some(data) = data {
            engine.update(data, None)?;
        }
        Ok(engine)
    }

    #[must_use]
    pub fn settings(&self) -> &GraphSettings {
        &self.settings
    }

    #[must_use]
    pub fn data(&self) -> &DataSet {
        &self.data
    }

    /// Current rendering mode; `None` until the first `update`.
    #[must_use]
    pub fn graph_type(&self) -> Option<GraphType> {
        self.graph_type
    }

    #[must_use]
    pub fn is_line_graph(&self) -> bool {
        self.graph_type == Some(GraphType::Line)
    }

    #[must_use]
    pub fn transform(&self) -> ZoomTransform {
        self.zoom.transform()
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.host
    }

    #[must_use]
    pub fn margin(&self) -> Margin {
        self.settings.margin
    }

    #[must_use]
    pub fn plot_size(&self) -> PlotSize {
        PlotSize::from_viewport(self.host, self.settings.margin)
    }

    /// Extent used by the last render pass.
    #[must_use]
    pub fn extent(&self) -> Extent {
        self.extent
    }

    /// Scales computed by the last render pass.
    #[must_use]
    pub fn scales(&self) -> &ScaleSet {
        &self.scales
    }

    #[must_use]
    pub fn axis(&self, slot: AxisSlot) -> Option<&AxisElement> {
        self.axes.element(slot)
    }

    #[must_use]
    pub fn live_line_ids(&self) -> Vec<&str> {
        self.lines.live_ids()
    }

    #[must_use]
    pub fn live_bar_ids(&self) -> Vec<&str> {
        self.bars.live_ids()
    }

    #[must_use]
    pub fn scene(&self) -> &S {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut S {
        &mut self.scene
    }

    #[must_use]
    pub fn into_scene(self) -> S {
        self.scene
    }

    pub(super) fn extent_policy(&self) -> ExtentPolicy<'_> {
        ExtentPolicy {
            props: &self.settings.props,
            x_override: self.settings.axis.x.extent,
            y_override: self.settings.axis.y.extent,
            y_padding: self.settings.y_padding,
        }
    }

    /// Runs `change` and restores host, settings, mode, zoom, extent and
    /// scales if it fails. Staged element registries are dropped, so live
    /// ids keep matching what the scene last accepted.
    pub(super) fn transact<T>(
        &mut self,
        change: impl FnOnce(&mut Self) -> ChartResult<T>,
    ) -> ChartResult<T> {
        let checkpoint = Checkpoint {
            host: self.host,
            settings: self.settings.clone(),
            graph_type: self.graph_type,
            zoom: self.zoom,
            extent: self.extent,
            scales: self.scales.clone(),
        };
        let result = change(self);
        if let Err(error) = &result {
            warn!(%error, "graph update failed; restoring previous state");
            RenderCoordinator::settle(self, false);
            let relayout =
                self.host != checkpoint.host || self.settings.margin != checkpoint.settings.margin;
            self.host = checkpoint.host;
            self.settings = checkpoint.settings;
            self.graph_type = checkpoint.graph_type;
            self.zoom = checkpoint.zoom;
            self.extent = checkpoint.extent;
            self.scales = checkpoint.scales;
            if relayout {
                if let Err(layout_error) = self.apply_layout() {
                    warn!(%layout_error, "could not restore previous layout");
                }
            }
        }
        result
    }
}
