use tracing::warn;

use crate::render::{Element, ElementKind, RectGeometry};

use super::series_reconciler::{
    ExitBaseline, KeyedDiff, ReconcileContext, Registry, SeriesReconciler, VisualDiff,
};

/// One bar per series (its first point), keyed by series id.
#[derive(Debug, Default)]
pub struct BarReconciler {
    live: Registry<String, RectGeometry>,
}

impl BarReconciler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Target rectangle of a live bar, in plot pixels.
    #[must_use]
    pub fn rect(&self, id: &str) -> Option<RectGeometry> {
        self.live.live().get(id).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.live.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }
}

/// Top edge of a bar for a mapped value: kept inside the plot so height is
/// never negative; NaN collapses the bar onto the baseline.
fn bar_top(mapped: f64, plot_height: f64) -> f64 {
    if mapped.is_nan() {
        plot_height
    } else {
        mapped.clamp(0.0, plot_height)
    }
}

impl SeriesReconciler for BarReconciler {
    fn kind(&self) -> ElementKind {
        ElementKind::Bar
    }

    fn reconcile(&mut self, context: &ReconcileContext<'_>) -> VisualDiff {
        let height = context.plot.height;
        let targets = match context.scales.x.as_band() {
            Some(band) => context
                .data
                .iter()
                .filter_map(|series| {
                    let point = series.data.first()?;
                    let x = band.position(&point.category(&context.props.x))?;
                    let y = bar_top(context.scales.y.map(point.number(&context.props.y)), height);
                    let rect = RectGeometry {
                        x,
                        y,
                        width: band.bandwidth(),
                        height: height - y,
                    };
                    Some((series.id.clone(), rect))
                })
                .collect(),
            None => {
                if !context.data.is_empty() {
                    warn!(
                        series = context.data.len(),
                        "bar reconciler needs a band x scale; rendering no bars"
                    );
                }
                Vec::new()
            }
        };

        let baseline = ExitBaseline {
            y: height,
            plot_height: height,
            x_scale: None,
        };
        KeyedDiff::<RectGeometry> {
            kind: ElementKind::Bar,
            transition: context.transition,
            entering: |target: &RectGeometry, baseline: &ExitBaseline| RectGeometry {
                y: baseline.plot_height,
                height: 0.0,
                ..*target
            },
            exiting: |last: &RectGeometry, baseline: &ExitBaseline| RectGeometry {
                y: baseline.plot_height,
                height: 0.0,
                ..*last
            },
            into_element: |geometry: &RectGeometry| Element::Bar(*geometry),
        }
        .run(&mut self.live, targets, baseline)
    }

    fn commit(&mut self) {
        self.live.commit();
    }

    fn discard(&mut self) {
        self.live.discard();
    }

    fn live_ids(&self) -> Vec<&str> {
        self.live.keys().map(String::as_str).collect()
    }
}
