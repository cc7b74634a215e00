use chart_graph::api::{AxisSettingsPatch, AxisSlot, GraphEngine, GraphSettingsPatch, TickSize};
use chart_graph::core::{DataSet, GraphType, Margin, Point, Series, Viewport};
use chart_graph::interaction::ZoomTransform;
use chart_graph::render::{
    Element, ElementKey, ElementKind, RecordingScene, Scene, SceneBatch, SceneOp,
};
use chart_graph::{ChartError, ChartResult};

/// Recording scene whose backend can be switched into refusing batches.
#[derive(Debug, Default)]
struct FlakyScene {
    inner: RecordingScene,
    reject: bool,
}

impl Scene for FlakyScene {
    fn apply(&mut self, batch: &SceneBatch) -> ChartResult<()> {
        if self.reject {
            return Err(ChartError::Scene("backend unavailable".to_owned()));
        }
        self.inner.apply(batch)
    }
}

fn line_data(ids: &[&str]) -> DataSet {
    let series = ids
        .iter()
        .enumerate()
        .map(|(offset, id)| {
            let base = offset as f64 * 5.0;
            Series::new(
                *id,
                vec![
                    Point::xy(0.0, base),
                    Point::xy(5.0, base + 2.0),
                    Point::xy(10.0, base + 10.0),
                ],
            )
        })
        .collect();
    DataSet::new(series).expect("unique ids")
}

fn bar_data() -> DataSet {
    DataSet::new(vec![
        Series::new("a", vec![Point::xy("A", 10.0)]),
        Series::new("b", vec![Point::xy("B", 5.0)]),
    ])
    .expect("unique ids")
}

fn build_engine(data: Option<DataSet>) -> GraphEngine<RecordingScene> {
    GraphEngine::create(
        RecordingScene::new(),
        Viewport::new(300, 200),
        data,
        GraphSettingsPatch::new(),
    )
    .expect("engine init")
}

fn ids_by_op(batch: &SceneBatch, kind: ElementKind) -> (Vec<String>, Vec<String>, Vec<String>) {
    let mut entered = Vec::new();
    let mut updated = Vec::new();
    let mut exited = Vec::new();
    for op in &batch.ops {
        match op {
            SceneOp::Enter { key, .. } if key.kind == kind => entered.push(key.id.clone()),
            SceneOp::Update { key, .. } if key.kind == kind => updated.push(key.id.clone()),
            SceneOp::Exit { key, .. } if key.kind == kind => exited.push(key.id.clone()),
            _ => {}
        }
    }
    (entered, updated, exited)
}

#[test]
fn create_without_data_only_emits_layout() {
    let engine = build_engine(None);

    assert_eq!(engine.graph_type(), None);
    assert_eq!(engine.scene().batches().len(), 1);
    let layout = engine.scene().layout().expect("layout emitted");
    assert_eq!(layout.plot.width, 250.0);
    assert_eq!(layout.plot.height, 150.0);
    assert_eq!(layout.container_offset(), (40.0, 10.0));
    assert_eq!(engine.scene().count(ElementKind::Line), 0);
    assert_eq!(engine.scene().count(ElementKind::Axis), 0);
}

#[test]
fn create_with_line_data_renders_axes_and_lines() {
    let engine = build_engine(Some(line_data(&["s1", "s2"])));

    assert_eq!(engine.graph_type(), Some(GraphType::Line));
    assert_eq!(engine.scene().mode(), Some(GraphType::Line));
    assert_eq!(engine.scene().count(ElementKind::Line), 2);
    assert_eq!(engine.scene().count(ElementKind::Axis), 2);
    assert_eq!(engine.live_line_ids(), vec!["s1", "s2"]);

    let x_axis = engine.axis(AxisSlot::X).expect("x axis");
    assert_eq!(x_axis.translate, (0.0, 150.0));
    assert!(!x_axis.ticks.is_empty());
}

#[test]
fn reconciliation_is_keyed_by_series_id() {
    let mut engine = build_engine(Some(line_data(&["s1", "s2"])));

    engine
        .update(line_data(&["s3", "s2"]), None)
        .expect("update");

    let batch = engine.scene().last_batch().expect("batch");
    let (entered, updated, exited) = ids_by_op(batch, ElementKind::Line);
    assert_eq!(entered, vec!["s3"]);
    assert_eq!(updated, vec!["s2"]);
    assert_eq!(exited, vec!["s1"]);
    assert_eq!(engine.live_line_ids(), vec!["s3", "s2"]);
    assert!(engine.scene().element(&ElementKey::line("s1")).is_none());
}

#[test]
fn entering_lines_start_flat_and_animate() {
    let engine = build_engine(Some(line_data(&["s1"])));
    let batch = engine.scene().last_batch().expect("batch");

    let enter = batch
        .ops
        .iter()
        .find_map(|op| match op {
            SceneOp::Enter {
                key,
                initial: Element::Line(initial),
                target: Element::Line(target),
                transition,
            } if key.id == "s1" => Some((initial.clone(), target.clone(), *transition)),
            _ => None,
        })
        .expect("line enter op");
    let (initial, target, transition) = enter;

    assert!(transition.is_animated());
    assert_eq!(initial.path.point_count(), target.path.point_count());
    let first_y = initial.path.subpaths[0][0].1;
    assert!(initial.path.subpaths.iter().flatten().all(|&(_, y)| y == first_y));
}

#[test]
fn switching_modes_tears_down_previous_elements() {
    let mut engine = build_engine(Some(line_data(&["s1", "s2"])));

    engine.update(bar_data(), None).expect("bar update");

    assert_eq!(engine.graph_type(), Some(GraphType::Bar));
    assert_eq!(engine.scene().mode(), Some(GraphType::Bar));
    assert_eq!(engine.scene().count(ElementKind::Line), 0);
    assert_eq!(engine.scene().count(ElementKind::Bar), 2);
    assert!(engine.live_line_ids().is_empty());

    let batches = engine.scene().batches();
    let teardown = &batches[batches.len() - 2];
    let (_, _, exited) = ids_by_op(teardown, ElementKind::Line);
    assert_eq!(exited, vec!["s1", "s2"]);
}

#[test]
fn explicit_type_override_wins_over_detection() {
    let mut engine = build_engine(None);

    engine
        .update(line_data(&["s1"]), Some(GraphType::Bar))
        .expect("override");

    assert_eq!(engine.graph_type(), Some(GraphType::Bar));
    assert_eq!(engine.scene().count(ElementKind::Bar), 1);
}

#[test]
fn bar_heights_follow_values() {
    let mut engine = GraphEngine::create(
        RecordingScene::new(),
        Viewport::new(200, 100),
        None,
        GraphSettingsPatch::new().with_margin(Margin::zero()),
    )
    .expect("engine init");
    engine.update(bar_data(), None).expect("update");

    let rect = |id: &str| match engine.scene().element(&ElementKey::bar(id)) {
        Some(Element::Bar(rect)) => *rect,
        other => panic!("expected bar for {id}, got {other:?}"),
    };
    let (a, b) = (rect("a"), rect("b"));

    assert_eq!(a.y, 5.0);
    assert_eq!(a.height, 95.0);
    assert_eq!(b.y, 52.0);
    assert_eq!(b.height, 48.0);
    assert!(a.x < b.x);
    assert_eq!(a.width, b.width);
}

#[test]
fn y_extent_override_clamps_tall_bars_to_the_plot() {
    let mut engine = GraphEngine::create(
        RecordingScene::new(),
        Viewport::new(200, 100),
        None,
        GraphSettingsPatch::new()
            .with_margin(Margin::zero())
            .with_y_axis(AxisSettingsPatch {
                extent: Some((0.0, 8.0)),
                ..AxisSettingsPatch::default()
            }),
    )
    .expect("engine init");
    engine.update(bar_data(), None).expect("update");

    assert_eq!(engine.extent().y, (0.0, 8.0));
    assert_eq!(engine.scales().y.domain(), (0.0, 8.0));

    let rect = |id: &str| match engine.scene().element(&ElementKey::bar(id)) {
        Some(Element::Bar(rect)) => *rect,
        other => panic!("expected bar for {id}, got {other:?}"),
    };
    let (a, b) = (rect("a"), rect("b"));
    assert_eq!(a.y, 0.0);
    assert_eq!(a.height, 100.0);
    assert_eq!(b.y, 38.0);
    assert_eq!(b.height, 62.0);
}

#[test]
fn update_settings_merges_and_rerenders() {
    let mut engine = build_engine(Some(line_data(&["s1"])));
    let batches_before = engine.scene().batches().len();

    engine
        .update_settings(&GraphSettingsPatch::new().with_x_axis(AxisSettingsPatch {
            label: Some("Time".to_owned()),
            ..AxisSettingsPatch::default()
        }))
        .expect("settings update");

    assert!(engine.scene().batches().len() > batches_before);
    let label = engine
        .axis(AxisSlot::X)
        .and_then(|axis| axis.label.clone())
        .expect("x label");
    assert_eq!(label.text, "Time");
    assert_eq!(label.x, 125.0);
    assert_eq!(label.y, 40.0);
    assert_eq!(engine.settings().margin.left, 40.0);
}

#[test]
fn invalid_settings_patch_leaves_engine_untouched() {
    let mut engine = build_engine(Some(line_data(&["s1"])));
    let before = engine.settings().clone();

    let err = engine
        .update_settings(&GraphSettingsPatch::new().with_zoom(true, 5.0, 2.0))
        .expect_err("min > max must fail");

    assert!(matches!(err, ChartError::InvalidSettings(_)));
    assert_eq!(engine.settings(), &before);
}

#[test]
fn resize_recomputes_plot_and_axes() {
    let mut engine = build_engine(Some(line_data(&["s1"])));

    engine.on_resize(Viewport::new(500, 300)).expect("resize");

    assert_eq!(engine.plot_size().width, 450.0);
    assert_eq!(engine.plot_size().height, 250.0);
    let x_axis = engine.axis(AxisSlot::X).expect("x axis");
    assert_eq!(x_axis.translate, (0.0, 250.0));
    assert_eq!(engine.scene().layout().expect("layout").plot.width, 450.0);

    let err = engine.on_resize(Viewport::new(0, 300)).expect_err("zero width");
    assert!(matches!(err, ChartError::InvalidViewport { .. }));
}

#[test]
fn set_dimensions_applies_new_margin() {
    let mut engine = build_engine(Some(line_data(&["s1"])));

    engine
        .set_dimensions(Some(Margin::new(60.0, 20.0, 10.0, 30.0)))
        .expect("set dimensions");

    assert_eq!(engine.plot_size().width, 220.0);
    assert_eq!(engine.plot_size().height, 160.0);
    assert_eq!(engine.scene().layout().expect("layout").container_offset(), (60.0, 10.0));

    let err = engine
        .set_dimensions(Some(Margin::new(-1.0, 0.0, 0.0, 0.0)))
        .expect_err("negative margin");
    assert!(matches!(err, ChartError::InvalidSettings(_)));
}

#[test]
fn empty_data_set_renders_nothing() {
    let mut engine = build_engine(Some(line_data(&["s1"])));

    engine.update(DataSet::empty(), Some(GraphType::Line)).expect("empty update");

    assert_eq!(engine.scene().count(ElementKind::Line), 0);
    assert_eq!(engine.extent().x, (0.0, 1.0));
}

#[test]
fn oversized_tick_settings_are_rejected_without_side_effects() {
    let mut engine = build_engine(Some(line_data(&["s1"])));
    let before = engine.settings().clone();

    let patches = [
        AxisSettingsPatch {
            ticks: Some(usize::MAX),
            ..AxisSettingsPatch::default()
        },
        AxisSettingsPatch {
            tick_size: Some(TickSize::Percent(1e308)),
            ..AxisSettingsPatch::default()
        },
    ];
    for patch in patches {
        let err = engine
            .update_settings(&GraphSettingsPatch::new().with_y_axis(patch))
            .expect_err("oversized tick settings");
        assert!(matches!(err, ChartError::InvalidSettings(_)));
        assert_eq!(engine.settings(), &before);
    }

    engine
        .update(line_data(&["s1", "s2"]), None)
        .expect("data update after rejected settings");
    engine
        .update_settings(&GraphSettingsPatch::new().with_y_axis(AxisSettingsPatch {
            tick_size: Some(TickSize::Pixels(5.0)),
            ..AxisSettingsPatch::default()
        }))
        .expect("valid tick size");
    assert_eq!(engine.live_line_ids(), vec!["s1", "s2"]);
    assert_eq!(engine.scene().count(ElementKind::Line), 2);
}

#[test]
fn rejected_batches_leave_engine_state_in_sync_with_the_scene() {
    let mut engine = GraphEngine::create(
        FlakyScene::default(),
        Viewport::new(300, 200),
        Some(line_data(&["s1"])),
        GraphSettingsPatch::new().with_zoom(true, 1.0, 10.0),
    )
    .expect("engine init");
    let settings_before = engine.settings().clone();
    let extent_before = engine.extent();
    engine.scene_mut().reject = true;

    let err = engine
        .update_settings(&GraphSettingsPatch::new().with_x_axis(AxisSettingsPatch {
            label: Some("Time".to_owned()),
            ..AxisSettingsPatch::default()
        }))
        .expect_err("scene refuses settings pass");
    assert!(matches!(err, ChartError::Scene(_)));
    assert_eq!(engine.settings(), &settings_before);
    assert!(engine.axis(AxisSlot::X).expect("x axis").label.is_none());

    engine
        .update(line_data(&["s1", "s2"]), None)
        .expect_err("scene refuses data pass");
    assert_eq!(engine.data().len(), 1);
    assert_eq!(engine.live_line_ids(), vec!["s1"]);
    assert_eq!(engine.extent(), extent_before);

    engine
        .on_gesture(ZoomTransform::new(2.0, -50.0))
        .expect_err("scene refuses gesture pass");
    assert_eq!(engine.transform(), ZoomTransform::IDENTITY);

    engine
        .on_resize(Viewport::new(500, 300))
        .expect_err("scene refuses resize");
    assert_eq!(engine.viewport(), Viewport::new(300, 200));

    engine.scene_mut().reject = false;
    engine
        .update(line_data(&["s1", "s2"]), None)
        .expect("data pass after recovery");
    engine
        .update_settings(&GraphSettingsPatch::new().with_y_axis(AxisSettingsPatch {
            tick_size: Some(TickSize::Pixels(5.0)),
            ..AxisSettingsPatch::default()
        }))
        .expect("settings pass after recovery");
    assert_eq!(engine.live_line_ids(), vec!["s1", "s2"]);
    assert_eq!(engine.scene().inner.count(ElementKind::Line), 2);
}
