use approx::assert_abs_diff_eq;
use chart_graph::api::{GraphEngine, GraphSettingsPatch};
use chart_graph::core::{DataSet, GraphType, Margin, Point, Series, Viewport};
use chart_graph::interaction::ZoomTransform;
use chart_graph::render::{ElementKind, RecordingScene, SceneOp, Transition};

fn build_engine(zoom_enabled: bool) -> GraphEngine<RecordingScene> {
    let data = DataSet::new(vec![Series::new(
        "s1",
        (0..=10).map(|x| Point::xy(f64::from(x), f64::from(x))).collect(),
    )])
    .expect("unique ids");
    GraphEngine::create(
        RecordingScene::new(),
        Viewport::new(100, 100),
        Some(data),
        GraphSettingsPatch::new()
            .with_margin(Margin::zero())
            .with_zoom(zoom_enabled, 1.0, 10.0),
    )
    .expect("engine init")
}

fn last_line_transition(engine: &GraphEngine<RecordingScene>) -> Transition {
    engine
        .scene()
        .last_batch()
        .expect("batch")
        .ops
        .iter()
        .find_map(|op| match op {
            SceneOp::Update { key, transition, .. } if key.kind == ElementKind::Line => {
                Some(*transition)
            }
            _ => None,
        })
        .expect("line update")
}

#[test]
fn visible_range_centers_the_span() {
    let mut engine = build_engine(true);

    let transform = engine
        .set_visible_range(2.0, 4.0)
        .expect("visible range")
        .expect("line mode");

    assert_abs_diff_eq!(transform.k, 5.0, epsilon = 1e-9);
    assert_abs_diff_eq!(transform.x, -100.0, epsilon = 1e-9);
    assert_eq!(engine.transform(), transform);
    assert!(last_line_transition(&engine).is_animated());
}

#[test]
fn visible_range_is_order_insensitive_and_capped() {
    let mut engine = build_engine(true);

    let reversed = engine
        .set_visible_range(4.0, 2.0)
        .expect("visible range")
        .expect("line mode");
    assert_abs_diff_eq!(reversed.k, 5.0, epsilon = 1e-9);

    let degenerate = engine
        .set_visible_range(2.0, 2.0)
        .expect("visible range")
        .expect("line mode");
    assert_abs_diff_eq!(degenerate.k, 10.0, epsilon = 1e-9);
    assert_abs_diff_eq!(degenerate.x, -150.0, epsilon = 1e-9);

    assert_eq!(engine.set_visible_range(f64::NAN, 2.0).expect("no-op"), None);
}

#[test]
fn reset_returns_to_identity() {
    let mut engine = build_engine(true);
    engine.set_visible_range(1.0, 3.0).expect("visible range");
    engine.set_visible_range(6.0, 7.0).expect("visible range");

    engine.reset_zoom().expect("reset");

    assert_eq!(engine.transform(), ZoomTransform::IDENTITY);
    assert!(last_line_transition(&engine).is_animated());
}

#[test]
fn visible_range_is_ignored_in_bar_mode() {
    let mut engine = build_engine(true);
    engine
        .update(
            DataSet::new(vec![Series::new("a", vec![Point::xy("A", 1.0)])]).expect("ids"),
            None,
        )
        .expect("bar update");
    assert_eq!(engine.graph_type(), Some(GraphType::Bar));

    assert_eq!(engine.set_visible_range(0.0, 1.0).expect("no-op"), None);
    assert_eq!(engine.transform(), ZoomTransform::IDENTITY);
}

#[test]
fn gestures_are_applied_immediately_within_bounds() {
    let mut engine = build_engine(true);

    assert!(engine.on_gesture(ZoomTransform::new(2.0, -50.0)).expect("gesture"));
    assert_eq!(engine.transform(), ZoomTransform::new(2.0, -50.0));
    assert_eq!(last_line_transition(&engine), Transition::Immediate);

    assert!(!engine.on_gesture(ZoomTransform::new(20.0, 0.0)).expect("gesture"));
    assert!(!engine.on_gesture(ZoomTransform::new(0.5, 0.0)).expect("gesture"));
    assert_eq!(engine.transform(), ZoomTransform::new(2.0, -50.0));
}

#[test]
fn gestures_are_rejected_when_zoom_is_disabled() {
    let mut engine = build_engine(false);

    assert!(!engine.on_gesture(ZoomTransform::new(2.0, 0.0)).expect("gesture"));
    assert!(!engine.on_wheel(-500.0, 50.0).expect("wheel"));
    assert_eq!(engine.transform(), ZoomTransform::IDENTITY);
}

#[test]
fn wheel_zoom_keeps_anchor_fixed() {
    let mut engine = build_engine(true);

    assert!(engine.on_wheel(-500.0, 50.0).expect("wheel"));

    let transform = engine.transform();
    assert_abs_diff_eq!(transform.k, 2.0, epsilon = 1e-9);
    assert_abs_diff_eq!(transform.apply_x(50.0), 50.0, epsilon = 1e-9);
}

#[test]
fn drag_cannot_pull_content_past_the_left_edge() {
    let mut engine = build_engine(true);
    engine
        .on_gesture(ZoomTransform::new(2.0, -50.0))
        .expect("gesture");

    assert!(engine.on_drag(100.0).expect("drag"));

    assert_eq!(engine.transform(), ZoomTransform::new(2.0, 0.0));
}

#[test]
fn narrowing_zoom_bounds_clamps_current_scale() {
    let mut engine = build_engine(true);
    engine.set_visible_range(2.0, 3.0).expect("visible range");
    assert_abs_diff_eq!(engine.transform().k, 10.0, epsilon = 1e-9);

    engine
        .update_settings(&GraphSettingsPatch::new().with_zoom(true, 1.0, 4.0))
        .expect("settings");

    assert_abs_diff_eq!(engine.transform().k, 4.0, epsilon = 1e-9);
}
