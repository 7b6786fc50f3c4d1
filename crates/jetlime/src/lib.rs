//! JetLime - timeline layout and drawing engine
//!
//! Turns a list of items into a vertical or horizontal timeline:
//! - Position resolution (start, middle, end of the list)
//! - Style model with validated builders and JSON config
//! - Per-event geometry (anchor, connecting lines, content rect, RTL mirroring)
//! - Extended events with content on both sides of the line
//! - Column and row containers with keyed reconciliation and scrolling
//! - Frame-driven point pulse animation
//!
//! Drawing goes through the [`Canvas`] trait, so any renderer can host the
//! engine. `jetlime-egui` provides one for egui.

pub mod animation;
pub mod brush;
pub mod container;
pub mod content;
pub mod draw;
pub mod extended;
pub mod layout;
pub mod position;
pub mod style;

pub use animation::{radius_factor, PulseDirection, PulseDriver, PulsePhase};
pub use brush::{Brush, DashPattern};
pub use container::{
    ColumnAxis, ContainerAxis, EventNode, ExtendedEventNode, ItemsList, JetLimeColumn, JetLimeContainer,
    JetLimeRow, PlacedEvent, RowAxis, SyncStats, TimelineLayout, TimelineNode,
};
pub use content::{EventContent, FixedContent};
pub use draw::{paint_event, Canvas, CanvasCall, DrawCommand, DrawList, RecordingCanvas};
pub use extended::{layout_extended, ExtendedEventGeometry, DEFAULT_ADDITIONAL_MAX_WIDTH};
pub use layout::{EventGeometry, LayoutDirection, LineSegment, SegmentKind};
pub use position::{EventPosition, PointPlacement};
pub use style::{
    Arrangement, EventPointType, EventStyle, EventStyleBuilder, HorizontalAlignment, IconRef, JetLimeStyle,
    JetLimeStyleBuilder, PointAnimation, RepeatMode, VerticalAlignment,
};

pub use jetlime_core::{Color, Easing, JetLimeError, Rect, Result, Size, Vec2};
