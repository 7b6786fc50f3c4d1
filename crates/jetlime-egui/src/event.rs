//! Immediate-mode timeline widgets.
//!
//! These lay out one event per call around arbitrary egui content: the
//! content is shown first, then the point and lines are computed from its
//! measured size and painted underneath it.

use egui::{Align, InnerResponse, Layout, ScrollArea, Sense, Shape, Ui, UiBuilder};
use jetlime::{
    paint_event, Arrangement, DrawList, EventGeometry, EventPosition, EventStyle, JetLimeStyle,
    LayoutDirection,
};
use jetlime_core::Size;
use tracing::trace;

use crate::canvas::{EguiCanvas, IconResolver};

/// Radius factor of `event` at the current frame. Requests another frame
/// while the point is animated.
pub fn point_radius_factor(ui: &Ui, event: &EventStyle) -> f32 {
    match event.point_animation() {
        Some(animation) => {
            ui.ctx().request_repaint();
            animation.factor_at(ui.input(|i| i.time))
        }
        None => 1.0,
    }
}

/// One timeline event wrapped around caller content.
pub struct EventWidget<'a> {
    timeline: &'a JetLimeStyle,
    event: &'a EventStyle,
    direction: LayoutDirection,
    min_cross: f32,
    icons: Option<&'a IconResolver<'a>>,
}

impl<'a> EventWidget<'a> {
    pub fn new(timeline: &'a JetLimeStyle, event: &'a EventStyle) -> Self {
        Self {
            timeline,
            event,
            direction: LayoutDirection::Ltr,
            min_cross: 0.0,
            icons: None,
        }
    }

    pub fn direction(mut self, direction: LayoutDirection) -> Self {
        self.direction = direction;
        self
    }

    /// Minimum cross-axis extent of the event box.
    pub fn min_cross(mut self, min_cross: f32) -> Self {
        self.min_cross = min_cross;
        self
    }

    pub fn icons(mut self, resolver: &'a IconResolver<'a>) -> Self {
        self.icons = Some(resolver);
        self
    }

    pub fn show<R>(self, ui: &mut Ui, add_contents: impl FnOnce(&mut Ui) -> R) -> InnerResponse<R> {
        let Self {
            timeline,
            event,
            direction,
            min_cross,
            icons,
        } = self;
        let horizontal = timeline.arrangement() == Arrangement::Horizontal;
        let rtl_row = horizontal && direction == LayoutDirection::Rtl;

        // Reserve a slot behind the content for the point and lines.
        let background = ui.painter().add(Shape::Noop);

        let available = ui.available_rect_before_wrap();
        let limits = match timeline.arrangement() {
            Arrangement::Vertical => Size::new(available.width(), f32::INFINITY),
            Arrangement::Horizontal => Size::new(f32::INFINITY, available.height()),
        };
        let max = EventGeometry::content_max_size(limits, timeline, event);
        // Content placement depends only on alignment and direction.
        let probe = EventGeometry::compute(Size::ZERO, 0.0, timeline, event, direction);

        let content_rect = if rtl_row {
            egui::Rect::from_min_max(
                egui::pos2(available.left(), available.top() + probe.content.y),
                egui::pos2(available.right(), available.top() + probe.content.y + max.height),
            )
        } else {
            egui::Rect::from_min_size(
                available.min + egui::vec2(probe.content.x, probe.content.y),
                egui::vec2(max.width, max.height),
            )
        };
        let layout = if rtl_row {
            Layout::right_to_left(Align::Min)
        } else {
            Layout::top_down(Align::Min)
        };
        let mut content_ui = ui.new_child(UiBuilder::new().max_rect(content_rect).layout(layout));
        let inner = add_contents(&mut content_ui);
        let measured = content_ui.min_rect().size();

        let geometry = EventGeometry::compute(
            Size::new(measured.x, measured.y),
            min_cross,
            timeline,
            event,
            direction,
        );
        let origin = if rtl_row {
            egui::pos2(available.right() - geometry.size.width, available.top())
        } else {
            available.min
        };
        let rect = egui::Rect::from_min_size(origin, egui::vec2(geometry.size.width, geometry.size.height));
        let response = ui.allocate_rect(rect, Sense::hover());

        let mut list = DrawList::new();
        paint_event(&geometry, timeline, event, point_radius_factor(ui, event), &mut list);
        let mut canvas = EguiCanvas::new(origin);
        if let Some(icons) = icons {
            canvas = canvas.with_icons(icons);
        }
        list.replay(&mut canvas, jetlime_core::Vec2::ZERO);
        ui.painter().set(background, Shape::Vec(canvas.into_shapes()));

        trace!(position = %event.position(), width = rect.width(), height = rect.height(), "event shown");
        InnerResponse::new(inner, response)
    }
}

/// Show `items` as an immediate-mode vertical timeline inside a scroll area.
///
/// `event_style` builds each event's style from its resolved position and
/// `add_contents` fills in the content.
pub fn timeline_column<T>(
    ui: &mut Ui,
    style: &JetLimeStyle,
    items: &[T],
    event_style: impl Fn(usize, &T, EventPosition) -> EventStyle,
    mut add_contents: impl FnMut(&mut Ui, usize, &T),
) {
    let style = style.clone().with_arrangement(Arrangement::Vertical);
    ScrollArea::vertical().auto_shrink([false, true]).show(ui, |ui| {
        ui.spacing_mut().item_spacing.y = 0.0;
        let width = ui.available_width();
        for (index, item) in items.iter().enumerate() {
            let position = EventPosition::dynamic(index, items.len());
            let event = event_style(index, item, position).with_position(position);
            EventWidget::new(&style, &event)
                .min_cross(width)
                .show(ui, |ui| add_contents(ui, index, item));
        }
    });
}

/// Horizontal counterpart of [`timeline_column`]. In `Rtl` the first item is
/// at the right edge.
pub fn timeline_row<T>(
    ui: &mut Ui,
    style: &JetLimeStyle,
    items: &[T],
    direction: LayoutDirection,
    event_style: impl Fn(usize, &T, EventPosition) -> EventStyle,
    mut add_contents: impl FnMut(&mut Ui, usize, &T),
) {
    let style = style.clone().with_arrangement(Arrangement::Horizontal);
    let layout = match direction {
        LayoutDirection::Ltr => Layout::left_to_right(Align::Min),
        LayoutDirection::Rtl => Layout::right_to_left(Align::Min),
    };
    ScrollArea::horizontal().auto_shrink([true, false]).show(ui, |ui| {
        ui.with_layout(layout, |ui| {
            ui.spacing_mut().item_spacing.x = 0.0;
            // One shared height keeps bottom-aligned anchors on one line.
            let height = ui.available_height();
            for (index, item) in items.iter().enumerate() {
                let position = EventPosition::dynamic(index, items.len());
                let event = event_style(index, item, position).with_position(position);
                EventWidget::new(&style, &event)
                    .direction(direction)
                    .min_cross(height)
                    .show(ui, |ui| add_contents(ui, index, item));
            }
        });
    });
}
