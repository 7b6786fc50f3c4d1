//! Per-event geometry: anchor, line segments and content placement.
//!
//! All coordinates are local to the event box, with the origin at its
//! top-left corner. The main axis is the line direction (y for columns, x for
//! rows); the cross axis carries the point column and the content.

use jetlime_core::{Rect, Size, Vec2};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::trace;

use crate::position::{EventPosition, PointPlacement};
use crate::style::{Arrangement, EventStyle, HorizontalAlignment, JetLimeStyle, VerticalAlignment};

/// Reading direction of the host layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LayoutDirection {
    #[default]
    Ltr,
    Rtl,
}

/// Which side of the anchor a segment covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentKind {
    /// From the leading edge (towards the previous event) to the anchor.
    Incoming,
    /// From the anchor towards the next event.
    Outgoing,
}

/// One straight piece of the timeline line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    pub kind: SegmentKind,
    pub start: Vec2,
    pub end: Vec2,
}

impl LineSegment {
    pub fn length(&self) -> f32 {
        self.start.distance(self.end)
    }
}

/// Main-axis layout of a single event, before it is mapped onto x or y.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct MainAxis {
    pub anchor: f32,
    pub spans: SmallVec<[(SegmentKind, f32, f32); 2]>,
}

/// Anchor and line spans along the main axis.
///
/// `extent` is the full main-axis length of the event box including the
/// trailing `spacing`.
pub(crate) fn main_axis(
    extent: f32,
    spacing: f32,
    radius: f32,
    start_factor: f32,
    placement: PointPlacement,
    position: EventPosition,
) -> MainAxis {
    let effective = extent - spacing;
    let anchor = match placement {
        PointPlacement::Start => radius * start_factor,
        PointPlacement::Center => effective / 2.0,
        PointPlacement::End => effective - radius * start_factor,
    };

    let mut spans = SmallVec::new();
    match placement {
        PointPlacement::Start => {
            if position.is_not_end() {
                // Stretch past the box so the line reaches the next anchor,
                // which sits `radius * start_factor` into the next event.
                spans.push((
                    SegmentKind::Outgoing,
                    anchor,
                    extent + anchor * (start_factor - 1.0),
                ));
            }
        }
        PointPlacement::Center | PointPlacement::End => {
            if position.is_not_start() {
                spans.push((SegmentKind::Incoming, 0.0, anchor));
            }
            if position.is_not_end() {
                spans.push((SegmentKind::Outgoing, anchor, extent));
            }
        }
    }

    MainAxis { anchor, spans }
}

/// Resolved geometry of one event box.
#[derive(Debug, Clone, PartialEq)]
pub struct EventGeometry {
    /// Size of the whole event box, point column and spacing included.
    pub size: Size,
    /// Region the caller's content is placed into.
    pub content: Rect,
    /// Center of the point; both line segments end here.
    pub anchor: Vec2,
    pub segments: SmallVec<[LineSegment; 2]>,
    pub position: EventPosition,
}

impl EventGeometry {
    /// Largest size the content may take inside `available`.
    pub fn content_max_size(available: Size, style: &JetLimeStyle, event: &EventStyle) -> Size {
        let inset = cross_inset(style, event);
        let spacing = trailing_spacing(style, event);
        let shrink = |v: f32, by: f32| if v.is_finite() { (v - by).max(0.0) } else { v };
        match style.arrangement() {
            Arrangement::Vertical => Size::new(shrink(available.width, inset), shrink(available.height, spacing)),
            Arrangement::Horizontal => Size::new(shrink(available.width, spacing), shrink(available.height, inset)),
        }
    }

    /// Compute the geometry for content measured at `content`.
    ///
    /// `min_cross` widens the box along the cross axis (a column filling its
    /// width passes the viewport width); pass 0 to wrap the content.
    pub fn compute(
        content: Size,
        min_cross: f32,
        style: &JetLimeStyle,
        event: &EventStyle,
        direction: LayoutDirection,
    ) -> Self {
        let content = Size::new(content.width.max(0.0), content.height.max(0.0));
        let min_cross = if min_cross.is_finite() { min_cross.max(0.0) } else { 0.0 };
        let radius = event.point_radius();
        let inset = cross_inset(style, event);
        let spacing = trailing_spacing(style, event);
        let position = event.position();

        let geometry = match style.arrangement() {
            Arrangement::Vertical => {
                let size = Size::new((content.width + inset).max(min_cross), content.height + spacing);
                let (x, content_x) = match style.vertical_alignment() {
                    VerticalAlignment::Left => (radius, inset),
                    VerticalAlignment::Right => (size.width - radius, 0.0),
                };
                let main = main_axis(
                    size.height,
                    spacing,
                    radius,
                    style.point_start_factor(),
                    event.point_placement(),
                    position,
                );
                Self {
                    size,
                    content: Rect::new(content_x, 0.0, size.width - inset, content.height),
                    anchor: Vec2::new(x, main.anchor),
                    segments: main
                        .spans
                        .iter()
                        .map(|&(kind, a, b)| LineSegment {
                            kind,
                            start: Vec2::new(x, a),
                            end: Vec2::new(x, b),
                        })
                        .collect(),
                    position,
                }
            }
            Arrangement::Horizontal => {
                let size = Size::new(content.width + spacing, (content.height + inset).max(min_cross));
                let (y, content_y) = match style.horizontal_alignment() {
                    HorizontalAlignment::Top => (radius, inset),
                    HorizontalAlignment::Bottom => (size.height - radius, 0.0),
                };
                let main = main_axis(
                    size.width,
                    spacing,
                    radius,
                    style.point_start_factor(),
                    event.point_placement(),
                    position,
                );
                // Mirror every main-axis value for right-to-left reading.
                let mirror = |v: f32| match direction {
                    LayoutDirection::Ltr => v,
                    LayoutDirection::Rtl => size.width - v,
                };
                let content_x = match direction {
                    LayoutDirection::Ltr => 0.0,
                    LayoutDirection::Rtl => spacing,
                };
                Self {
                    size,
                    content: Rect::new(content_x, content_y, content.width, size.height - inset),
                    anchor: Vec2::new(mirror(main.anchor), y),
                    segments: main
                        .spans
                        .iter()
                        .map(|&(kind, a, b)| LineSegment {
                            kind,
                            start: Vec2::new(mirror(a), y),
                            end: Vec2::new(mirror(b), y),
                        })
                        .collect(),
                    position,
                }
            }
        };

        trace!(
            position = %position,
            anchor_x = geometry.anchor.x,
            anchor_y = geometry.anchor.y,
            segments = geometry.segments.len(),
            "event geometry"
        );
        geometry
    }

    /// Segment of the given kind, if drawn.
    pub fn segment(&self, kind: SegmentKind) -> Option<&LineSegment> {
        self.segments.iter().find(|s| s.kind == kind)
    }

    pub fn has_incoming(&self) -> bool {
        self.segment(SegmentKind::Incoming).is_some()
    }

    pub fn has_outgoing(&self) -> bool {
        self.segment(SegmentKind::Outgoing).is_some()
    }
}

/// Cross-axis room taken by the point column and the content gap.
fn cross_inset(style: &JetLimeStyle, event: &EventStyle) -> f32 {
    event.point_radius() * 2.0 + style.content_distance()
}

fn trailing_spacing(style: &JetLimeStyle, event: &EventStyle) -> f32 {
    if event.position().is_not_end() {
        style.item_spacing()
    } else {
        0.0
    }
}
