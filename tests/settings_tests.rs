use chart_graph::api::{
    AxisSettingsPatch, AxisSlot, GraphEngine, GraphSettings, GraphSettingsPatch, TickSize,
};
use chart_graph::core::{DataSet, Margin, Point, Series, Viewport};
use chart_graph::render::{AxisPosition, Easing, NullScene, Transition};
use chart_graph::ChartError;

fn bar_engine(patch: GraphSettingsPatch) -> GraphEngine<NullScene> {
    let data = DataSet::new(vec![
        Series::new("a", vec![Point::xy("A", 1_500.0)]),
        Series::new("b", vec![Point::xy("B", 3_000.0)]),
    ])
    .expect("unique ids");
    GraphEngine::create(NullScene::default(), Viewport::new(200, 100), Some(data), patch)
        .expect("engine init")
}

#[test]
fn settings_round_trip_through_json() {
    let settings = GraphSettings::default().merged(
        &GraphSettingsPatch::new()
            .with_margin(Margin::new(50.0, 5.0, 5.0, 30.0))
            .with_transition(Easing::SinInOut, 250)
            .with_y_axis(AxisSettingsPatch {
                tick_size: Some(TickSize::Percent(-100.0)),
                extent: Some((0.0, 50.0)),
                ..AxisSettingsPatch::default()
            })
            .with_debug(true),
    );

    let json = settings.to_json_pretty().expect("serialize");
    let restored = GraphSettings::from_json_str(&json).expect("parse");

    assert_eq!(restored, settings);
    assert!(json.contains("\"-100%\""));
}

#[test]
fn patch_json_accepts_partial_documents() {
    let patch = GraphSettingsPatch::from_json_str(
        r#"{"zoom":{"enabled":true},"axis":{"x":{"label":"Day","ticks":3}}}"#,
    )
    .expect("patch");
    let merged = GraphSettings::default().merged(&patch);

    assert!(merged.zoom.enabled);
    assert_eq!(merged.zoom.max, 10.0);
    assert_eq!(merged.axis.x.label.as_deref(), Some("Day"));
    assert_eq!(merged.axis.x.ticks, 3);
    assert_eq!(merged.axis.x.tick_format, ",.0f");
    assert!(matches!(
        GraphSettingsPatch::from_json_str("{\"zoom\":"),
        Err(ChartError::InvalidSettings(_))
    ));
}

#[test]
fn animated_transition_uses_configured_easing() {
    let settings = GraphSettings::default().merged(
        &GraphSettingsPatch::new().with_transition(Easing::Linear, 400),
    );

    let transition = settings.transition.animated();
    assert_eq!(
        transition,
        Transition::Animated {
            easing: Easing::Linear,
            duration_ms: 400,
        }
    );
    assert_eq!(transition.duration().as_millis(), 400);
}

#[test]
fn invalid_tick_format_is_rejected_at_create() {
    let data = DataSet::new(vec![Series::new("a", vec![Point::xy("A", 1.0)])]).expect("ids");
    let result = GraphEngine::create(
        NullScene::default(),
        Viewport::new(200, 100),
        Some(data),
        GraphSettingsPatch::new().with_y_axis(AxisSettingsPatch {
            tick_format: Some(",.2q".to_owned()),
            ..AxisSettingsPatch::default()
        }),
    );

    assert!(matches!(result, Err(ChartError::InvalidSettings(_))));
}

#[test]
fn bar_axes_label_bands_and_format_values() {
    let engine = bar_engine(GraphSettingsPatch::new().with_margin(Margin::zero()));

    let x_axis = engine.axis(AxisSlot::X).expect("x axis");
    let labels: Vec<&str> = x_axis.ticks.iter().map(|tick| tick.label.as_str()).collect();
    assert_eq!(labels, vec!["A", "B"]);

    let y_axis = engine.axis(AxisSlot::Y).expect("y axis");
    assert!(y_axis.ticks.iter().any(|tick| tick.label == "1,000"));
}

#[test]
fn percent_tick_size_spans_the_plot() {
    let engine = bar_engine(
        GraphSettingsPatch::new()
            .with_margin(Margin::zero())
            .with_y_axis(AxisSettingsPatch {
                position: Some(AxisPosition::Right),
                tick_size: Some(TickSize::Percent(-100.0)),
                ..AxisSettingsPatch::default()
            }),
    );

    let y_axis = engine.axis(AxisSlot::Y).expect("y axis");
    assert_eq!(y_axis.position, AxisPosition::Right);
    assert_eq!(y_axis.translate, (200.0, 0.0));
    assert_eq!(y_axis.tick_size, -200.0);
}
