use crate::core::{BandScale, Extent, GraphType, LinearScale, ScaleSet, XScale};
use crate::render::Scene;

use super::GraphEngine;

pub(super) struct ScaleCoordinator;

impl ScaleCoordinator {
    /// Builds the scales for `graph_type` from the engine's current extent,
    /// data and plot size.
    ///
    /// Line graphs map both axes linearly over the extent. Bar graphs use a
    /// band scale over the first-point category keys and a rounded y scale
    /// starting at zero.
    pub(super) fn build<S: Scene>(engine: &GraphEngine<S>, graph_type: GraphType) -> ScaleSet {
        let plot = engine.plot_size();
        let settings = &engine.settings;
        let x_range = if settings.axis.x.invert {
            (plot.width, 0.0)
        } else {
            (0.0, plot.width)
        };
        let y_range = if settings.axis.y.invert {
            (0.0, plot.height)
        } else {
            (plot.height, 0.0)
        };

        match graph_type {
            GraphType::Line => ScaleSet {
                x: XScale::Linear(LinearScale::new(engine.extent.x, x_range)),
                y: LinearScale::new(engine.extent.y, y_range),
            },
            GraphType::Bar => {
                let keys = engine
                    .data
                    .iter()
                    .filter_map(|series| series.data.first())
                    .map(|point| point.category(&settings.props.x));
                ScaleSet {
                    x: XScale::Band(BandScale::new(keys, x_range)),
                    y: LinearScale::new(bar_domain(engine.extent, settings.axis.y.extent), y_range)
                        .rounded(),
                }
            }
        }
    }
}

/// Bars grow from zero; a fixed y extent is used verbatim.
fn bar_domain(extent: Extent, y_override: Option<(f64, f64)>) -> (f64, f64) {
    y_override.unwrap_or((0.0, extent.y.1))
}
