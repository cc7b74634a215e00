mod axis_renderer;
mod bar_reconciler;
mod data_controller;
mod engine;
mod graph_settings;
mod layout_controller;
mod line_reconciler;
mod listener_registry;
mod pointer_dispatch;
mod render_coordinator;
mod scale_coordinator;
mod series_reconciler;
mod tick_format;
mod validation;
mod zoom_controller;

pub use axis_renderer::{AxisRenderer, AxisSlot};
pub use bar_reconciler::BarReconciler;
pub use engine::GraphEngine;
pub use graph_settings::{
    AxesSettings, AxesSettingsPatch, AxisSettings, AxisSettingsPatch, FieldMappingPatch,
    GraphSettings, GraphSettingsPatch, MarginPatch, TickSize, TransitionSettings,
    TransitionSettingsPatch, ZoomSettings, ZoomSettingsPatch,
};
pub use line_reconciler::LineReconciler;
pub use series_reconciler::{ReconcileContext, SeriesReconciler, VisualDiff};
pub use tick_format::TickFormat;
