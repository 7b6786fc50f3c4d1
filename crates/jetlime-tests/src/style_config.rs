//! Integration tests for JSON style configuration.

use jetlime::{
    Brush, Color, EventPointType, EventPosition, EventStyle, FixedContent, JetLimeColumn, JetLimeError,
    JetLimeStyle, LayoutDirection, PointPlacement, RepeatMode, Size, TimelineNode, VerticalAlignment,
};

#[test]
fn missing_fields_take_defaults() {
    let style = JetLimeStyle::from_json(r#"{ "line_thickness": 2.0, "vertical_alignment": "Right" }"#).unwrap();
    assert_eq!(style.line_thickness(), 2.0);
    assert_eq!(style.vertical_alignment(), VerticalAlignment::Right);
    assert_eq!(style.content_distance(), JetLimeStyle::column().content_distance());
    assert_eq!(style.item_spacing(), JetLimeStyle::column().item_spacing());
}

#[test]
fn saved_style_loads_back() {
    let style = JetLimeStyle::builder()
        .line_brush(Brush::vertical_gradient([Color::RED, Color::BLUE], 0.0, 60.0))
        .item_spacing(12.0)
        .build()
        .unwrap();
    let json = style.to_json().unwrap();
    assert_eq!(JetLimeStyle::from_json(&json).unwrap(), style);
}

#[test]
fn invalid_values_are_configuration_errors() {
    let err = JetLimeStyle::from_json(r#"{ "line_thickness": -1.0 }"#).unwrap_err();
    assert!(err.is_configuration());

    let err = EventStyle::from_json(r#"{ "point_type": { "Filled": { "fill_percent": 1.5 } } }"#).unwrap_err();
    assert!(err.is_configuration());

    let err = EventStyle::from_json(r#"{ "point_animation": { "duration_ms": 0 } }"#).unwrap_err();
    assert!(err.is_configuration());
}

#[test]
fn malformed_json_is_a_serialization_error() {
    let err = JetLimeStyle::from_json("{ line_thickness: ").unwrap_err();
    assert!(matches!(err, JetLimeError::Serialization(_)));

    let err = EventStyle::from_json(r#"{ "point_placement": "Sideways" }"#).unwrap_err();
    assert!(matches!(err, JetLimeError::Serialization(_)));
}

#[test]
fn event_style_from_json() {
    let style = EventStyle::from_json(
        r#"{
            "point_type": "Empty",
            "point_radius": 8.0,
            "point_placement": "Start",
            "point_animation": { "target_value": 1.5, "repeat": "Restart" }
        }"#,
    )
    .unwrap();
    assert_eq!(style.point_type(), EventPointType::EMPTY);
    assert_eq!(style.point_radius(), 8.0);
    assert_eq!(style.point_placement(), PointPlacement::Start);
    let animation = style.point_animation().unwrap();
    assert_eq!(animation.initial_value, 1.0);
    assert_eq!(animation.target_value, 1.5);
    assert_eq!(animation.duration_ms, 1000);
    assert_eq!(animation.repeat, RepeatMode::Restart);
}

#[test]
fn loaded_style_drives_layout() {
    let style = JetLimeStyle::from_json(r#"{ "vertical_alignment": "Right" }"#).unwrap();
    let template = EventStyle::from_json(r#"{ "point_radius": 10.0 }"#).unwrap();
    let mut list = JetLimeColumn::new(
        vec![1u32, 2, 3],
        style,
        |v: &u32| *v,
        move |_, _, position| TimelineNode::event(template.clone().with_position(position), FixedContent::new(120.0, 30.0)),
    );
    let layout = list.layout(Size::new(300.0, 500.0), LayoutDirection::Ltr).unwrap();
    for placed in &layout.events {
        assert_eq!(placed.geometry.anchor.x, 300.0 - 10.0);
        assert_eq!(placed.geometry.content.x, 0.0);
    }
    assert_eq!(list.position_of(2), Some(EventPosition::End));
}
