//! Hosts a retained [`JetLimeContainer`] inside an egui layout.

use std::fmt::Debug;
use std::hash::Hash;

use egui::{Response, Sense, Ui};
use jetlime::{Arrangement, ContainerAxis, JetLimeContainer, LayoutDirection, TimelineLayout};
use jetlime_core::{Result, Size};
use tracing::warn;

use crate::canvas::{EguiCanvas, IconResolver};

/// Output of one [`TimelineView::show`] call.
pub struct TimelineResponse {
    pub response: Response,
    pub layout: TimelineLayout,
    /// Events that intersected the viewport this frame.
    pub painted: usize,
    /// Whether a pulse is still running and another frame was requested.
    pub animating: bool,
}

/// Widget that lays out, scrolls, animates and paints a container.
pub struct TimelineView<'a> {
    direction: LayoutDirection,
    size: Option<egui::Vec2>,
    icons: Option<&'a IconResolver<'a>>,
}

impl Default for TimelineView<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> TimelineView<'a> {
    pub fn new() -> Self {
        Self {
            direction: LayoutDirection::Ltr,
            size: None,
            icons: None,
        }
    }

    pub fn direction(mut self, direction: LayoutDirection) -> Self {
        self.direction = direction;
        self
    }

    /// Fixed widget size; defaults to all available space.
    pub fn size(mut self, size: egui::Vec2) -> Self {
        self.size = Some(size);
        self
    }

    pub fn icons(mut self, resolver: &'a IconResolver<'a>) -> Self {
        self.icons = Some(resolver);
        self
    }

    pub fn show<T, K, A>(self, ui: &mut Ui, container: &mut JetLimeContainer<T, K, A>) -> Result<TimelineResponse>
    where
        T: Clone + PartialEq,
        K: Eq + Hash + Clone + Debug,
        A: ContainerAxis,
    {
        let size = self.size.unwrap_or_else(|| ui.available_size());
        let (rect, response) = ui.allocate_exact_size(size, Sense::hover());

        let layout = container
            .layout(Size::new(rect.width(), rect.height()), self.direction)
            .map_err(|e| {
                warn!(error = %e, "timeline layout failed");
                e
            })?;

        if response.hovered() {
            let delta = ui.input(|i| i.smooth_scroll_delta);
            let step = match (A::ARRANGEMENT, self.direction) {
                (Arrangement::Vertical, _) => -delta.y,
                (Arrangement::Horizontal, LayoutDirection::Ltr) => -(delta.x + delta.y),
                (Arrangement::Horizontal, LayoutDirection::Rtl) => delta.x + delta.y,
            };
            if step != 0.0 {
                container.scroll_by(step);
            }
        }

        let animating = container.advance(ui.input(|i| i.stable_dt));
        if animating {
            ui.ctx().request_repaint();
        }

        let mut canvas = EguiCanvas::new(rect.min);
        if let Some(icons) = self.icons {
            canvas = canvas.with_icons(icons);
        }
        let painted = container.paint(&layout, &mut canvas)?;
        ui.painter_at(rect).extend(canvas.into_shapes());

        Ok(TimelineResponse {
            response,
            layout,
            painted,
            animating,
        })
    }
}
