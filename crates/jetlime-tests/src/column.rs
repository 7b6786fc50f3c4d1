//! Integration tests for vertical timelines.
//!
//! Exercises the container, extended events and the draw pipeline together.

use jetlime::{
    CanvasCall, DashPattern, EventPointType, EventPosition, EventStyle, ExtendedEventNode, FixedContent, IconRef,
    JetLimeColumn, JetLimeStyle, LayoutDirection, RecordingCanvas, SegmentKind, Size, TimelineLayout, TimelineNode,
    Vec2,
};

use crate::init_tracing;

// ── Helpers ────────────────────────────────────────────────────

fn alternating(style: JetLimeStyle, count: u32) -> JetLimeColumn<u32, u32> {
    JetLimeColumn::new(
        (0..count).collect::<Vec<_>>(),
        style,
        |item: &u32| *item,
        |index, _, position| {
            let point_type = if index % 2 == 0 {
                EventPointType::EMPTY
            } else {
                EventPointType::filled(0.5)
            };
            let style = EventStyle::builder(position).point_type(point_type).build().unwrap();
            TimelineNode::event(style, FixedContent::new(200.0, 40.0))
        },
    )
}

fn paint(list: &JetLimeColumn<u32, u32>, layout: &TimelineLayout) -> RecordingCanvas {
    let mut canvas = RecordingCanvas::default();
    list.paint(layout, &mut canvas).unwrap();
    canvas
}

fn count(canvas: &RecordingCanvas, pred: impl Fn(&CanvasCall) -> bool) -> usize {
    canvas.calls.iter().filter(|c| pred(*c)).count()
}

// ── Five-item list ─────────────────────────────────────────────

#[test]
fn five_items_connect_with_four_joins() {
    init_tracing();
    let mut list = alternating(JetLimeStyle::column(), 5);
    let layout = list.layout(Size::new(320.0, 1000.0), LayoutDirection::Ltr).unwrap();
    let canvas = paint(&list, &layout);

    // Items 1..3 draw both halves, the ends one each.
    assert_eq!(count(&canvas, |c| matches!(c, CanvasCall::Line { .. })), 8);
    assert_eq!(count(&canvas, |c| matches!(c, CanvasCall::Ring { .. })), 5);
    // Five base discs plus the inner discs of the two filled points.
    assert_eq!(count(&canvas, |c| matches!(c, CanvasCall::Disc { .. })), 7);

    let first = &layout.events[0].geometry;
    let last = &layout.events[4].geometry;
    assert!(!first.has_incoming() && first.has_outgoing());
    assert!(last.has_incoming() && !last.has_outgoing());

    for pair in layout.events.windows(2) {
        let out = pair[0].geometry.segment(SegmentKind::Outgoing).unwrap();
        let inc = pair[1].geometry.segment(SegmentKind::Incoming).unwrap();
        assert_eq!(pair[0].offset + out.end, pair[1].offset + inc.start);
    }
}

#[test]
fn positions_resolve_from_list_order() {
    let mut list = alternating(JetLimeStyle::column(), 5);
    list.layout(Size::new(320.0, 1000.0), LayoutDirection::Ltr).unwrap();
    let positions: Vec<_> = (0..5).map(|i| list.position_of(i).unwrap()).collect();
    assert_eq!(
        positions,
        [
            EventPosition::Start,
            EventPosition::Middle,
            EventPosition::Middle,
            EventPosition::Middle,
            EventPosition::End,
        ]
    );
}

#[test]
fn single_item_resolves_to_end() {
    let mut list = alternating(JetLimeStyle::column(), 1);
    let layout = list.layout(Size::new(320.0, 400.0), LayoutDirection::Ltr).unwrap();
    assert_eq!(list.position_of(0), Some(EventPosition::End));
    // An end keeps its incoming half and nothing after it.
    let geometry = &layout.events[0].geometry;
    assert!(geometry.has_incoming());
    assert!(!geometry.has_outgoing());
    let canvas = paint(&list, &layout);
    assert_eq!(count(&canvas, |c| matches!(c, CanvasCall::Line { .. })), 1);
}

#[test]
fn direction_does_not_move_vertical_events() {
    let mut list = alternating(JetLimeStyle::column(), 3);
    let ltr = list.layout(Size::new(320.0, 400.0), LayoutDirection::Ltr).unwrap();
    let rtl = list.layout(Size::new(320.0, 400.0), LayoutDirection::Rtl).unwrap();
    for (a, b) in ltr.events.iter().zip(&rtl.events) {
        assert_eq!(a.anchor(), b.anchor());
    }
}

// ── Incremental updates ────────────────────────────────────────

#[test]
fn insert_at_front_rebuilds_shifted_items() {
    let mut list = alternating(JetLimeStyle::column(), 4);
    list.layout(Size::new(320.0, 400.0), LayoutDirection::Ltr).unwrap();

    list.insert(0, 99);
    list.layout(Size::new(320.0, 400.0), LayoutDirection::Ltr).unwrap();
    // Every old item moved to a new index, so every builder call reruns.
    assert_eq!(list.last_sync().built, 5);
    assert_eq!(list.last_sync().reused, 0);
    assert_eq!(list.position_of(1), Some(EventPosition::Middle));

    let filled: Vec<bool> = (0..5)
        .map(|i| list.node(i).unwrap().style().point_type().is_filled())
        .collect();
    assert_eq!(filled, [false, true, false, true, false]);
}

#[test]
fn append_reuses_items_that_kept_their_index() {
    let mut list = alternating(JetLimeStyle::column(), 3);
    list.layout(Size::new(320.0, 400.0), LayoutDirection::Ltr).unwrap();

    list.push(3);
    list.layout(Size::new(320.0, 400.0), LayoutDirection::Ltr).unwrap();
    // The new item plus the old end, which became a middle.
    assert_eq!(list.last_sync().built, 2);
    assert_eq!(list.last_sync().reused, 2);
}

#[test]
fn scroll_translates_painted_events() {
    let mut list = alternating(JetLimeStyle::column(), 10);
    let layout = list.layout(Size::new(320.0, 200.0), LayoutDirection::Ltr).unwrap();
    let before = paint(&list, &layout);
    list.scroll_by(48.0);
    let after = paint(&list, &layout);

    let first_disc = |canvas: &RecordingCanvas| {
        canvas.calls.iter().find_map(|c| match c {
            CanvasCall::Disc { center, .. } => Some(*center),
            _ => None,
        })
    };
    // Event 0 leaves the viewport only partly, so it is still painted first.
    assert_eq!(first_disc(&after).unwrap(), first_disc(&before).unwrap() - Vec2::new(0.0, 48.0));
}

// ── Styling ────────────────────────────────────────────────────

#[test]
fn dashed_lines_are_split() {
    let style = JetLimeStyle::builder().dash(DashPattern::new(4.0, 4.0)).build().unwrap();
    let mut list = alternating(style, 3);
    let layout = list.layout(Size::new(320.0, 400.0), LayoutDirection::Ltr).unwrap();
    let canvas = paint(&list, &layout);

    let lines: Vec<f32> = canvas
        .calls
        .iter()
        .filter_map(|c| match c {
            CanvasCall::Line { start, end, .. } => Some(start.distance(*end)),
            _ => None,
        })
        .collect();
    assert!(lines.len() > 4);
    assert!(lines.iter().all(|len| *len <= 4.0 + 1e-4));
}

#[test]
fn custom_icon_is_centered_on_anchor() {
    let mut list = JetLimeColumn::new(
        vec![1u8],
        JetLimeStyle::column(),
        |v: &u8| *v,
        |_, _, position| {
            let style = EventStyle::builder(position)
                .point_type(EventPointType::custom(IconRef::new(42), None))
                .build()
                .unwrap();
            TimelineNode::event(style, FixedContent::new(100.0, 60.0))
        },
    );
    let layout = list.layout(Size::new(320.0, 400.0), LayoutDirection::Ltr).unwrap();
    let mut canvas = RecordingCanvas::default();
    list.paint(&layout, &mut canvas).unwrap();

    let rect = canvas
        .calls
        .iter()
        .find_map(|c| match c {
            CanvasCall::Icon { icon, rect, .. } if icon.id == 42 => Some(*rect),
            _ => None,
        })
        .unwrap();
    assert!((rect.width - 12.0 * 2.4).abs() < 1e-4);
    assert!((rect.center() - layout.events[0].anchor()).length() < 1e-4);
}

// ── Extended events ────────────────────────────────────────────

#[test]
fn extended_events_share_one_line_column() {
    init_tracing();
    let mut list = JetLimeColumn::new(
        vec!["a", "b", "c"],
        JetLimeStyle::column(),
        |s: &&str| s.to_string(),
        |_, _, position| {
            ExtendedEventNode::new(EventStyle::new(position))
                .primary(FixedContent::new(150.0, 40.0))
                .additional(|_: Size| Size::new(500.0, 24.0))
                .max_additional_width(80.0)
                .into()
        },
    );
    let layout = list.layout(Size::new(400.0, 600.0), LayoutDirection::Ltr).unwrap();

    for placed in &layout.events {
        assert_eq!(placed.additional.map(|r| r.width), Some(80.0));
        // 80 + 16 + 4 / 2
        assert_eq!(placed.geometry.anchor.x, 98.0);
        for segment in &placed.geometry.segments {
            assert_eq!(segment.start.x, 98.0);
        }
    }
    let canvas = {
        let mut canvas = RecordingCanvas::default();
        list.paint(&layout, &mut canvas).unwrap();
        canvas
    };
    assert_eq!(count(&canvas, |c| matches!(c, CanvasCall::Line { .. })), 4);
}

#[test]
fn extended_event_without_primary_fails_layout() {
    let mut list = JetLimeColumn::new(
        vec![1u8],
        JetLimeStyle::column(),
        |v: &u8| *v,
        |_, _, position| {
            ExtendedEventNode::new(EventStyle::new(position))
                .additional(FixedContent::new(20.0, 20.0))
                .into()
        },
    );
    let err = list.layout(Size::new(400.0, 600.0), LayoutDirection::Ltr).unwrap_err();
    assert!(err.is_configuration());
}
