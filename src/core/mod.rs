pub mod band_scale;
pub mod extent;
pub mod graph_type;
pub mod primitives;
pub mod scale;
pub mod scale_set;
pub mod ticks;
pub mod types;

pub use band_scale::BandScale;
pub use extent::{Extent, ExtentPolicy, compute_extent};
pub use graph_type::{GraphType, detect_type};
pub use scale::LinearScale;
pub use scale_set::{ScaleSet, XScale};
pub use ticks::{MAX_TICK_COUNT, linear_ticks};
pub use types::{DataSet, FieldMapping, Margin, PlotSize, Point, Series, Viewport};
