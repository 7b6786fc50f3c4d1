//! Draw commands for an event and the canvas they are replayed onto.

use jetlime_core::{Color, Rect, Vec2};

use crate::brush::{Brush, DashPattern};
use crate::layout::EventGeometry;
use crate::style::{EventPointType, EventStyle, IconRef, JetLimeStyle};

/// Rendering backend the engine paints through.
///
/// Implementations only need straight lines, filled circles, circle outlines
/// and images; dash patterns are resolved before `line` is called.
pub trait Canvas {
    fn line(&mut self, start: Vec2, end: Vec2, brush: &Brush, thickness: f32);
    fn disc(&mut self, center: Vec2, radius: f32, color: Color);
    fn ring(&mut self, center: Vec2, radius: f32, width: f32, color: Color);
    fn icon(&mut self, icon: IconRef, rect: Rect, tint: Option<Color>);
}

/// A single recorded paint operation, in event-local coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Line {
        start: Vec2,
        end: Vec2,
        brush: Brush,
        thickness: f32,
        dash: Option<DashPattern>,
    },
    /// Base disc of a point.
    Point { center: Vec2, radius: f32, color: Color },
    /// Inner disc of a filled point.
    Fill { center: Vec2, radius: f32, color: Color },
    Icon {
        icon: IconRef,
        rect: Rect,
        tint: Option<Color>,
    },
    Stroke {
        center: Vec2,
        radius: f32,
        width: f32,
        color: Color,
    },
}

/// Ordered list of draw commands.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Number of line commands.
    pub fn line_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
            .count()
    }

    /// Number of points (base discs).
    pub fn point_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Point { .. }))
            .count()
    }

    /// Replay every command onto `canvas`, shifted by `offset`.
    pub fn replay(&self, canvas: &mut dyn Canvas, offset: Vec2) {
        for command in &self.commands {
            match command {
                DrawCommand::Line {
                    start,
                    end,
                    brush,
                    thickness,
                    dash,
                } => {
                    let brush = if offset == Vec2::ZERO || brush.is_solid() {
                        brush.clone()
                    } else {
                        brush.translated(offset)
                    };
                    let (start, end) = (*start + offset, *end + offset);
                    match dash {
                        Some(dash) => {
                            for (a, b) in dash.split(start, end) {
                                canvas.line(a, b, &brush, *thickness);
                            }
                        }
                        None => canvas.line(start, end, &brush, *thickness),
                    }
                }
                DrawCommand::Point {
                    center,
                    radius,
                    color,
                }
                | DrawCommand::Fill {
                    center,
                    radius,
                    color,
                } => canvas.disc(*center + offset, *radius, *color),
                DrawCommand::Icon { icon, rect, tint } => {
                    canvas.icon(*icon, rect.translate(offset), *tint);
                }
                DrawCommand::Stroke {
                    center,
                    radius,
                    width,
                    color,
                } => canvas.ring(*center + offset, *radius, *width, *color),
            }
        }
    }
}

/// Record the lines and the point of one event.
///
/// Lines are recorded first so the point covers their ends. The anchor does
/// not move with the animation; only the radius scales by `radius_factor`.
pub fn paint_event(
    geometry: &EventGeometry,
    style: &JetLimeStyle,
    event: &EventStyle,
    radius_factor: f32,
    out: &mut DrawList,
) {
    let brush = event.resolve_line_brush(style);
    for segment in &geometry.segments {
        out.push(DrawCommand::Line {
            start: segment.start,
            end: segment.end,
            brush: brush.clone(),
            thickness: style.line_thickness(),
            dash: style.dash(),
        });
    }

    let center = geometry.anchor;
    let radius = event.animated_radius(radius_factor);
    out.push(DrawCommand::Point {
        center,
        radius,
        color: event.point_color(),
    });

    match event.point_type() {
        EventPointType::Empty => {}
        EventPointType::Filled { fill_percent } => {
            out.push(DrawCommand::Fill {
                center,
                radius: radius - radius * (1.0 - fill_percent),
                color: event.point_fill_color(),
            });
        }
        EventPointType::Custom { icon, tint } => {
            out.push(DrawCommand::Icon {
                icon,
                rect: Rect::from_center_size(center, event.icon_extent(radius_factor)),
                tint,
            });
        }
    }

    let stroke = event.point_stroke_width();
    if stroke > 0.0 {
        out.push(DrawCommand::Stroke {
            center,
            radius: (radius - stroke / 2.0).max(0.0),
            width: stroke,
            color: event.point_stroke_color(),
        });
    }
}

/// Canvas that records calls, for tests and headless hosts.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    pub calls: Vec<CanvasCall>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CanvasCall {
    Line { start: Vec2, end: Vec2, color: Color, thickness: f32 },
    Disc { center: Vec2, radius: f32, color: Color },
    Ring { center: Vec2, radius: f32, width: f32, color: Color },
    Icon { icon: IconRef, rect: Rect, tint: Option<Color> },
}

impl Canvas for RecordingCanvas {
    fn line(&mut self, start: Vec2, end: Vec2, brush: &Brush, thickness: f32) {
        self.calls.push(CanvasCall::Line {
            start,
            end,
            color: brush.color_at(start),
            thickness,
        });
    }

    fn disc(&mut self, center: Vec2, radius: f32, color: Color) {
        self.calls.push(CanvasCall::Disc { center, radius, color });
    }

    fn ring(&mut self, center: Vec2, radius: f32, width: f32, color: Color) {
        self.calls.push(CanvasCall::Ring {
            center,
            radius,
            width,
            color,
        });
    }

    fn icon(&mut self, icon: IconRef, rect: Rect, tint: Option<Color>) {
        self.calls.push(CanvasCall::Icon { icon, rect, tint });
    }
}
