//! Caller-supplied content blocks.

use jetlime_core::{Rect, Size};

use crate::draw::DrawList;

/// A block of content placed next to the timeline.
///
/// The engine measures content once per layout pass with the largest size it
/// may take, and never draws it unless `paint` records something.
pub trait EventContent {
    /// Size the content wants within `max`.
    fn measure(&self, max: Size) -> Size;

    /// Record draw commands for the content placed at `rect`.
    fn paint(&self, _rect: Rect, _out: &mut DrawList) {}
}

/// Content with a fixed intrinsic size, shrunk to fit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedContent {
    pub size: Size,
}

impl FixedContent {
    pub const fn new(width: f32, height: f32) -> Self {
        Self {
            size: Size::new(width, height),
        }
    }
}

impl EventContent for FixedContent {
    fn measure(&self, max: Size) -> Size {
        self.size.constrain(max)
    }
}

/// Any `Fn(Size) -> Size` measures content.
impl<F> EventContent for F
where
    F: Fn(Size) -> Size,
{
    fn measure(&self, max: Size) -> Size {
        self(max)
    }
}
