//! Extended event: secondary content on one side of the line, primary
//! content on the other.
//!
//! Measurement runs in two passes. The additional block is measured first so
//! its width fixes where the line sits; the primary block then gets whatever
//! width is left.

use jetlime_core::{JetLimeError, Rect, Result, Size, Vec2};
use tracing::{trace, warn};

use crate::content::EventContent;
use crate::layout::{main_axis, EventGeometry, LineSegment};
use crate::style::{Arrangement, EventStyle, JetLimeStyle};

/// Default cap on the additional content width.
pub const DEFAULT_ADDITIONAL_MAX_WIDTH: f32 = 72.0;

/// Geometry of an extended event box.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtendedEventGeometry {
    /// Lines, anchor and primary content rect. `event.content` is the
    /// primary block.
    pub event: EventGeometry,
    /// Region of the additional block, when one was supplied.
    pub additional: Option<Rect>,
    /// Measured additional width after clamping.
    pub additional_width: f32,
    /// Start of the line column: `additional_width + content_distance`.
    pub timeline_offset: f32,
}

/// Lay out an extended event.
///
/// `total_width` may be infinite, in which case the box wraps the primary
/// content.
pub fn layout_extended(
    primary: Option<&dyn EventContent>,
    additional: Option<&dyn EventContent>,
    total_width: f32,
    max_additional_width: f32,
    style: &JetLimeStyle,
    event: &EventStyle,
) -> Result<ExtendedEventGeometry> {
    let Some(primary) = primary else {
        warn!("extended event has no primary content");
        return Err(JetLimeError::config(
            "extended event needs primary content",
        ));
    };
    if style.arrangement() != Arrangement::Vertical {
        return Err(JetLimeError::config(
            "extended events are only supported in vertical timelines",
        ));
    }
    if !(max_additional_width.is_finite() && max_additional_width >= 0.0) {
        return Err(JetLimeError::config(format!(
            "additional content max width must be a finite non-negative number, got {max_additional_width}"
        )));
    }

    let distance = style.content_distance();
    let thickness = style.line_thickness();
    let spacing = if event.position().is_not_end() {
        style.item_spacing()
    } else {
        0.0
    };

    // Pass 1: additional content, clamped to its cap.
    let additional_size = additional
        .map(|c| c.measure(Size::new(max_additional_width, f32::INFINITY)))
        .map(|s| Size::new(s.width.clamp(0.0, max_additional_width), s.height.max(0.0)));
    let additional_width = additional_size.map_or(0.0, |s| s.width);
    let timeline_offset = additional_width + distance;

    // Pass 2: primary content in the remaining width.
    let primary_x = timeline_offset + thickness + distance;
    let primary_max = if total_width.is_finite() {
        (total_width - timeline_offset - thickness - distance).max(0.0)
    } else {
        f32::INFINITY
    };
    let primary_size = primary.measure(Size::new(primary_max, f32::INFINITY));
    let primary_size = Size::new(primary_size.width.max(0.0), primary_size.height.max(0.0));

    let content_height = primary_size.height.max(additional_size.map_or(0.0, |s| s.height));
    let width = if total_width.is_finite() {
        total_width.max(primary_x)
    } else {
        primary_x + primary_size.width
    };
    let size = Size::new(width, content_height + spacing);

    let x = timeline_offset + thickness / 2.0;
    let main = main_axis(
        size.height,
        spacing,
        event.point_radius(),
        style.point_start_factor(),
        event.point_placement(),
        event.position(),
    );

    let geometry = ExtendedEventGeometry {
        event: EventGeometry {
            size,
            content: Rect::new(primary_x, 0.0, (width - primary_x).max(0.0), primary_size.height),
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
            position: event.position(),
        },
        additional: additional_size.map(|s| Rect::new(0.0, 0.0, s.width, s.height)),
        additional_width,
        timeline_offset,
    };
    trace!(
        additional_width,
        timeline_offset,
        height = size.height,
        "extended event geometry"
    );
    Ok(geometry)
}
