use indexmap::IndexMap;

use crate::core::{GraphType, LinearScale, Margin, PlotSize, ScaleSet, XScale};
use crate::error::ChartResult;
use crate::interaction::ZoomTransform;
use crate::render::{
    AxisElement, AxisLabel, AxisPosition, AxisTick, Element, ElementKey, SceneOp, Transition,
};

use super::graph_settings::{AxesSettings, AxisSettings};
use super::series_reconciler::Registry;
use super::tick_format::TickFormat;

const X_LABEL_DY: f64 = -10.0;
const Y_LABEL_DY: f64 = 10.0;

/// Which settings slot an axis is configured from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AxisSlot {
    X,
    Y,
}

impl AxisSlot {
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Self::X => "x",
            Self::Y => "y",
        }
    }
}

/// Inputs shared by both axes in one pass.
#[derive(Debug, Clone, Copy)]
pub(super) struct AxisPass<'a> {
    pub scales: &'a ScaleSet,
    pub graph_type: GraphType,
    pub transform: ZoomTransform,
    pub plot: PlotSize,
    pub margin: Margin,
}

/// Group offset of an axis inside the plot container.
pub(super) fn axis_translate(position: AxisPosition, plot: PlotSize) -> (f64, f64) {
    match position {
        AxisPosition::Top | AxisPosition::Left => (0.0, 0.0),
        AxisPosition::Bottom => (0.0, plot.height),
        AxisPosition::Right => (plot.width, 0.0),
    }
}

fn axis_label(slot: AxisSlot, text: &str, plot: PlotSize, margin: Margin) -> AxisLabel {
    match slot {
        AxisSlot::X => AxisLabel {
            text: text.to_owned(),
            x: plot.width / 2.0,
            y: margin.bottom,
            rotation_deg: 0.0,
            dy: X_LABEL_DY,
        },
        AxisSlot::Y => AxisLabel {
            text: text.to_owned(),
            x: -plot.height / 2.0,
            y: -margin.left,
            rotation_deg: -90.0,
            dy: Y_LABEL_DY,
        },
    }
}

/// Builds the tick set and placement of one axis.
///
/// Horizontal positions draw the x scale (rescaled by the zoom transform in
/// line mode), vertical positions draw the y scale. Band scales put one tick
/// at the center of each band labelled with its key.
pub(super) fn build_axis(
    slot: AxisSlot,
    settings: &AxisSettings,
    pass: &AxisPass<'_>,
) -> ChartResult<AxisElement> {
    let format = TickFormat::parse(&settings.tick_format)?;
    let horizontal = settings.position.is_horizontal();

    let x_scale = match pass.graph_type {
        GraphType::Line => pass.scales.x.rescaled(pass.transform),
        GraphType::Bar => pass.scales.x.clone(),
    };
    let (ticks, range) = if horizontal {
        match &x_scale {
            XScale::Linear(scale) => (numeric_ticks(*scale, settings.ticks, &format), scale.range()),
            XScale::Band(band) => {
                let half = band.bandwidth() / 2.0;
                let ticks = band
                    .keys()
                    .filter_map(|key| {
                        band.position(key).map(|left| AxisTick {
                            offset: left + half,
                            label: key.to_owned(),
                        })
                    })
                    .collect();
                (ticks, band.range())
            }
        }
    } else {
        (
            numeric_ticks(pass.scales.y, settings.ticks, &format),
            pass.scales.y.range(),
        )
    };

    let opposite = if horizontal {
        pass.plot.height
    } else {
        pass.plot.width
    };
    Ok(AxisElement {
        position: settings.position,
        translate: axis_translate(settings.position, pass.plot),
        range,
        tick_size: settings.tick_size.resolve(opposite),
        ticks,
        label: settings
            .label
            .as_deref()
            .map(|text| axis_label(slot, text, pass.plot, pass.margin)),
    })
}

fn numeric_ticks(scale: LinearScale, count: usize, format: &TickFormat) -> Vec<AxisTick> {
    scale
        .ticks(count)
        .into_iter()
        .map(|value| AxisTick {
            offset: scale.map(value),
            label: format.format(value),
        })
        .filter(|tick| tick.offset.is_finite())
        .collect()
}

/// Keeps the two axis elements alive across passes.
#[derive(Debug, Default)]
pub struct AxisRenderer {
    live: Registry<AxisSlot, AxisElement>,
}

impl AxisRenderer {
    #[must_use]
    pub fn element(&self, slot: AxisSlot) -> Option<&AxisElement> {
        self.live.live().get(&slot)
    }

    pub(super) fn commit(&mut self) {
        self.live.commit();
    }

    pub(super) fn discard(&mut self) {
        self.live.discard();
    }

    /// Enter ops for first-time axes, update ops afterwards. The built axes
    /// are staged until [`AxisRenderer::commit`].
    pub(super) fn render(
        &mut self,
        axes: &AxesSettings,
        pass: &AxisPass<'_>,
        transition: Transition,
    ) -> ChartResult<Vec<SceneOp>> {
        let mut ops = Vec::with_capacity(2);
        let mut next = IndexMap::with_capacity(2);
        for (slot, settings) in [(AxisSlot::X, &axes.x), (AxisSlot::Y, &axes.y)] {
            let element = build_axis(slot, settings, pass)?;
            let key = ElementKey::axis(slot.id());
            let op = if self.live.live().contains_key(&slot) {
                SceneOp::Update {
                    key,
                    target: Element::Axis(element.clone()),
                    transition,
                }
            } else {
                SceneOp::Enter {
                    key,
                    initial: Element::Axis(element.clone()),
                    target: Element::Axis(element.clone()),
                    transition,
                }
            };
            next.insert(slot, element);
            ops.push(op);
        }
        self.live.stage(next);
        Ok(ops)
    }
}
