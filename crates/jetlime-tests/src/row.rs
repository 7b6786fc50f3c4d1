//! Integration tests for horizontal timelines and right-to-left layout.

use jetlime::{
    CanvasCall, EventStyle, ExtendedEventNode, FixedContent, HorizontalAlignment, JetLimeRow, JetLimeStyle,
    LayoutDirection, RecordingCanvas, SegmentKind, Size, TimelineNode,
};

use crate::init_tracing;

fn row(style: JetLimeStyle, count: u32) -> JetLimeRow<u32, u32> {
    JetLimeRow::new(
        (0..count).collect::<Vec<_>>(),
        style,
        |item: &u32| *item,
        |_, _, position| TimelineNode::event(EventStyle::new(position), FixedContent::new(100.0, 30.0)),
    )
}

#[test]
fn rtl_mirrors_every_anchor_across_the_content_span() {
    init_tracing();
    let mut timeline = row(JetLimeStyle::row(), 4);
    let viewport = Size::new(300.0, 80.0);
    let ltr = timeline.layout(viewport, LayoutDirection::Ltr).unwrap();
    let rtl = timeline.layout(viewport, LayoutDirection::Rtl).unwrap();

    // 3 * (100 + 8) + 100
    assert_eq!(ltr.content_extent, 424.0);
    let span = ltr.content_extent.max(viewport.width);
    for (a, b) in ltr.events.iter().zip(&rtl.events) {
        assert!((b.anchor().x - (span - a.anchor().x)).abs() < 1e-4);
        assert_eq!(b.anchor().y, a.anchor().y);
    }
}

#[test]
fn rtl_lines_run_towards_the_left() {
    let mut timeline = row(JetLimeStyle::row(), 3);
    let layout = timeline.layout(Size::new(500.0, 80.0), LayoutDirection::Rtl).unwrap();
    for placed in &layout.events {
        if let Some(out) = placed.geometry.segment(SegmentKind::Outgoing) {
            assert!(out.end.x < out.start.x);
        }
        if let Some(inc) = placed.geometry.segment(SegmentKind::Incoming) {
            assert!(inc.end.x < inc.start.x);
        }
    }
    // Joins still meet.
    for pair in layout.events.windows(2) {
        let out = pair[0].geometry.segment(SegmentKind::Outgoing).unwrap();
        let inc = pair[1].geometry.segment(SegmentKind::Incoming).unwrap();
        assert!((pair[0].offset + out.end - (pair[1].offset + inc.start)).length() < 1e-4);
    }
}

#[test]
fn rtl_first_item_is_painted_at_the_right_edge() {
    let mut timeline = row(JetLimeStyle::row(), 4);
    let layout = timeline.layout(Size::new(300.0, 80.0), LayoutDirection::Rtl).unwrap();
    let mut canvas = RecordingCanvas::default();
    timeline.paint(&layout, &mut canvas).unwrap();

    // Box [192, 300]; anchor mirrored to 108 - 50.
    let first = canvas
        .calls
        .iter()
        .find_map(|c| match c {
            CanvasCall::Disc { center, .. } => Some(center.x),
            _ => None,
        })
        .unwrap();
    assert!((first - 250.0).abs() < 1e-4);

    // Scrolling an RTL row reveals the later items on the left.
    assert_eq!(timeline.scroll_by(124.0), 124.0);
    assert_eq!(layout.scroll_translation(124.0).x, 0.0);
}

#[test]
fn bottom_alignment_puts_line_under_content() {
    let style = JetLimeStyle::builder()
        .horizontal_alignment(HorizontalAlignment::Bottom)
        .build()
        .unwrap();
    let mut timeline = row(style, 2);
    let layout = timeline.layout(Size::new(500.0, 90.0), LayoutDirection::Ltr).unwrap();
    let placed = &layout.events[0];
    assert_eq!(placed.geometry.size.height, 90.0);
    assert_eq!(placed.geometry.anchor.y, 90.0 - 12.0);
    assert_eq!(placed.geometry.content.y, 0.0);
}

#[test]
fn row_rejects_extended_events() {
    let mut timeline = JetLimeRow::new(
        vec![1u8, 2],
        JetLimeStyle::row(),
        |v: &u8| *v,
        |_, _, position| {
            ExtendedEventNode::new(EventStyle::new(position))
                .primary(FixedContent::new(50.0, 20.0))
                .into()
        },
    );
    assert!(timeline
        .layout(Size::new(500.0, 90.0), LayoutDirection::Ltr)
        .unwrap_err()
        .is_configuration());
}
