use tracing::warn;

use crate::core::{FieldMapping, LinearScale, Series};
use crate::render::{Element, ElementKind, LineElement, LinePath, PathTransform};

use super::series_reconciler::{
    ExitBaseline, KeyedDiff, ReconcileContext, Registry, SeriesReconciler, VisualDiff,
};

/// A live path plus the domain x of every vertex, so a removed series can be
/// laid out again on whatever x scale is current when it leaves.
#[derive(Debug, Clone)]
struct LiveLine {
    element: LineElement,
    domain_x: Vec<Vec<f64>>,
}

/// One path per series, keyed by series id.
#[derive(Debug, Default)]
pub struct LineReconciler {
    live: Registry<String, LiveLine>,
}

impl LineReconciler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn element(&self, id: &str) -> Option<&LineElement> {
        self.live.live().get(id).map(|line| &line.element)
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

impl SeriesReconciler for LineReconciler {
    fn kind(&self) -> ElementKind {
        ElementKind::Line
    }

    fn reconcile(&mut self, context: &ReconcileContext<'_>) -> VisualDiff {
        let transform = PathTransform {
            translate_x: context.transform.x,
            scale_x: context.transform.k,
            non_scaling_stroke: true,
        };
        let x_scale = context.scales.x.as_linear();
        let targets = match x_scale {
            Some(x_scale) => context
                .data
                .iter()
                .map(|series| {
                    let (path, domain_x) =
                        series_path(series, context.props, x_scale, context.scales.y);
                    let line = LiveLine {
                        element: LineElement { path, transform },
                        domain_x,
                    };
                    (series.id.clone(), line)
                })
                .collect(),
            None => {
                if !context.data.is_empty() {
                    warn!(
                        series = context.data.len(),
                        "line reconciler needs a continuous x scale; rendering no lines"
                    );
                }
                Vec::new()
            }
        };

        let baseline_y = context.scales.y.map(context.extent.y.0);
        let baseline = ExitBaseline {
            y: if baseline_y.is_finite() {
                baseline_y
            } else {
                context.plot.height
            },
            plot_height: context.plot.height,
            x_scale,
        };
        KeyedDiff::<LiveLine> {
            kind: ElementKind::Line,
            transition: context.transition,
            entering: |target: &LiveLine, baseline: &ExitBaseline| LiveLine {
                element: LineElement {
                    path: flatten(&target.element.path, baseline.y),
                    transform: target.element.transform,
                },
                domain_x: target.domain_x.clone(),
            },
            exiting: |last: &LiveLine, baseline: &ExitBaseline| {
                let path = match baseline.x_scale {
                    Some(x_scale) => flat_at(&last.domain_x, x_scale, baseline.y),
                    None => flatten(&last.element.path, baseline.y),
                };
                LiveLine {
                    element: LineElement {
                        path,
                        transform: last.element.transform,
                    },
                    domain_x: last.domain_x.clone(),
                }
            },
            into_element: |line: &LiveLine| Element::Line(line.element.clone()),
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

/// Un-zoomed path of `series` with the domain x of each vertex. Samples with
/// a non-numeric y (or coordinates that do not map to finite pixels) break
/// the line into separate runs.
fn series_path(
    series: &Series,
    props: &FieldMapping,
    x_scale: LinearScale,
    y_scale: LinearScale,
) -> (LinePath, Vec<Vec<f64>>) {
    let mut subpaths = Vec::new();
    let mut domain_x = Vec::new();
    let mut current: Vec<(f64, f64)> = Vec::new();
    let mut current_x: Vec<f64> = Vec::new();
    for point in &series.data {
        let x = point.number(&props.x);
        let y = point.number(&props.y);
        let px = x_scale.map(x);
        let py = y_scale.map(y);
        if y.is_nan() || !px.is_finite() || !py.is_finite() {
            if !current.is_empty() {
                subpaths.push(std::mem::take(&mut current));
                domain_x.push(std::mem::take(&mut current_x));
            }
            continue;
        }
        current.push((px, py));
        current_x.push(x);
    }
    if !current.is_empty() {
        subpaths.push(current);
        domain_x.push(current_x);
    }
    (LinePath { subpaths }, domain_x)
}

fn flatten(path: &LinePath, baseline_y: f64) -> LinePath {
    LinePath {
        subpaths: path
            .subpaths
            .iter()
            .map(|run| run.iter().map(|&(x, _)| (x, baseline_y)).collect())
            .collect(),
    }
}

/// Flat path on `baseline_y` with vertices placed by `x_scale`.
fn flat_at(domain_x: &[Vec<f64>], x_scale: LinearScale, baseline_y: f64) -> LinePath {
    LinePath {
        subpaths: domain_x
            .iter()
            .map(|run| {
                run.iter()
                    .map(|&x| x_scale.map(x))
                    .filter(|px| px.is_finite())
                    .map(|px| (px, baseline_y))
                    .collect::<Vec<_>>()
            })
            .filter(|run| !run.is_empty())
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::{LineReconciler, series_path};
    use crate::api::series_reconciler::{ReconcileContext, SeriesReconciler};
    use crate::core::{
        DataSet, Extent, FieldMapping, LinearScale, PlotSize, Point, ScaleSet, Series, XScale,
    };
    use crate::interaction::ZoomTransform;
    use crate::render::{Element, SceneOp, Transition};

    fn scales() -> ScaleSet {
        ScaleSet {
            x: XScale::Linear(LinearScale::new((0.0, 10.0), (0.0, 100.0))),
            y: LinearScale::new((0.0, 10.0), (50.0, 0.0)),
        }
    }

    #[test]
    fn missing_y_values_split_the_path() {
        let series = Series::new(
            "a",
            vec![
                Point::xy(0, 1),
                Point::xy(1, "n/a"),
                Point::xy(2, 3),
                Point::xy(3, 4),
            ],
        );
        let scales = scales();
        let (path, domain_x) = series_path(
            &series,
            &FieldMapping::default(),
            scales.x.as_linear().expect("linear"),
            scales.y,
        );
        assert_eq!(path.subpaths.len(), 2);
        assert_eq!(path.point_count(), 3);
        assert_eq!(domain_x, vec![vec![0.0], vec![2.0, 3.0]]);
    }

    #[test]
    fn entering_lines_start_flat_on_the_baseline() {
        let data =
            DataSet::new(vec![Series::new("a", vec![Point::xy(0, 2), Point::xy(10, 8)])])
                .expect("data");
        let props = FieldMapping::default();
        let scales = scales();
        let context = ReconcileContext {
            data: &data,
            props: &props,
            scales: &scales,
            extent: Extent {
                x: (0.0, 10.0),
                y: (2.0, 8.6),
            },
            transform: ZoomTransform::IDENTITY,
            plot: PlotSize {
                width: 100.0,
                height: 50.0,
            },
            transition: Transition::Immediate,
        };

        let mut reconciler = LineReconciler::new();
        let diff = reconciler.reconcile(&context);
        assert_eq!(diff.entered, vec!["a".to_owned()]);
        let SceneOp::Enter {
            initial: Element::Line(initial),
            ..
        } = &diff.ops[0]
        else {
            panic!("expected line enter op");
        };
        assert!(initial.path.subpaths[0].iter().all(|&(_, y)| y == 40.0));
        assert!(initial.transform.non_scaling_stroke);

        reconciler.commit();
        let again = reconciler.reconcile(&context);
        assert_eq!(again.updated, vec!["a".to_owned()]);
        assert!(again.entered.is_empty());
    }

    fn unit_context<'a>(
        data: &'a DataSet,
        props: &'a FieldMapping,
        scales: &'a ScaleSet,
    ) -> ReconcileContext<'a> {
        ReconcileContext {
            data,
            props,
            scales,
            extent: Extent {
                x: (0.0, 10.0),
                y: (0.0, 10.0),
            },
            transform: ZoomTransform::IDENTITY,
            plot: PlotSize {
                width: 100.0,
                height: 50.0,
            },
            transition: Transition::Immediate,
        }
    }

    #[test]
    fn exiting_lines_follow_the_current_x_scale() {
        let props = FieldMapping::default();
        let both = DataSet::new(vec![
            Series::new("a", vec![Point::xy(0, 2), Point::xy(10, 8)]),
            Series::new("b", vec![Point::xy(5, 4), Point::xy(15, 6)]),
        ])
        .expect("data");
        let narrow = scales();
        let mut reconciler = LineReconciler::new();
        reconciler.reconcile(&unit_context(&both, &props, &narrow));
        reconciler.commit();

        // `b` leaves while the x domain widens to [0, 20].
        let only_a =
            DataSet::new(vec![Series::new("a", vec![Point::xy(0, 2), Point::xy(20, 8)])])
                .expect("data");
        let wider = ScaleSet {
            x: XScale::Linear(LinearScale::new((0.0, 20.0), (0.0, 100.0))),
            y: LinearScale::new((0.0, 10.0), (50.0, 0.0)),
        };
        let diff = reconciler.reconcile(&unit_context(&only_a, &props, &wider));
        assert_eq!(diff.exited, vec!["b".to_owned()]);
        let exit = diff
            .ops
            .iter()
            .find_map(|op| match op {
                SceneOp::Exit {
                    target: Element::Line(line),
                    ..
                } => Some(line.clone()),
                _ => None,
            })
            .expect("exit op");
        assert_eq!(exit.path.subpaths, vec![vec![(25.0, 50.0), (75.0, 50.0)]]);
    }

    #[test]
    fn uncommitted_pass_leaves_live_lines_alone() {
        let data =
            DataSet::new(vec![Series::new("a", vec![Point::xy(0, 2), Point::xy(10, 8)])])
                .expect("data");
        let props = FieldMapping::default();
        let scales = scales();
        let context = unit_context(&data, &props, &scales);

        let mut reconciler = LineReconciler::new();
        reconciler.reconcile(&context);
        assert!(reconciler.is_empty());
        reconciler.discard();
        reconciler.commit();
        assert!(reconciler.element("a").is_none());

        let diff = reconciler.reconcile(&context);
        assert_eq!(diff.entered, vec!["a".to_owned()]);
    }
}
