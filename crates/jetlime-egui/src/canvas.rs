//! `Canvas` implementation that turns engine draw calls into egui shapes.

use egui::{pos2, Color32, Mesh, Pos2, Shape, Stroke, TextureId};
use jetlime::{Brush, Canvas, IconRef};
use jetlime_core::{Color, Rect, Vec2};
use tracing::trace;

/// Pieces a gradient line is cut into; each piece gets its own vertex colors.
const GRADIENT_STEPS: usize = 16;

/// Maps an [`IconRef`] to a texture the host has loaded.
pub type IconResolver<'a> = dyn Fn(IconRef) -> Option<TextureId> + 'a;

pub fn to_color32(color: Color) -> Color32 {
    let [r, g, b, a] = color.to_rgba8();
    Color32::from_rgba_unmultiplied(r, g, b, a)
}

pub fn to_pos2(v: Vec2) -> Pos2 {
    pos2(v.x, v.y)
}

pub fn to_egui_rect(rect: Rect) -> egui::Rect {
    egui::Rect::from_min_size(pos2(rect.x, rect.y), egui::vec2(rect.width, rect.height))
}

/// Collects egui shapes for one paint pass.
///
/// Engine coordinates are shifted by `origin`, normally the top-left corner
/// of the widget rect. Hand the result to a painter with
/// [`into_shapes`](Self::into_shapes).
pub struct EguiCanvas<'a> {
    origin: egui::Vec2,
    icons: Option<&'a IconResolver<'a>>,
    shapes: Vec<Shape>,
}

impl<'a> EguiCanvas<'a> {
    pub fn new(origin: Pos2) -> Self {
        Self {
            origin: origin.to_vec2(),
            icons: None,
            shapes: Vec::new(),
        }
    }

    /// Use `resolver` to find textures for custom point icons. Without one,
    /// icon points draw nothing over their base disc.
    pub fn with_icons(mut self, resolver: &'a IconResolver<'a>) -> Self {
        self.icons = Some(resolver);
        self
    }

    fn at(&self, v: Vec2) -> Pos2 {
        to_pos2(v) + self.origin
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn into_shapes(self) -> Vec<Shape> {
        self.shapes
    }
}

impl Canvas for EguiCanvas<'_> {
    fn line(&mut self, start: Vec2, end: Vec2, brush: &Brush, thickness: f32) {
        if thickness <= 0.0 || start == end {
            return;
        }
        match brush {
            Brush::Solid(color) => {
                let shape = Shape::line_segment([self.at(start), self.at(end)], Stroke::new(thickness, to_color32(*color)));
                self.shapes.push(shape);
            }
            Brush::LinearGradient { .. } => {
                let mesh = gradient_line_mesh(start, end, brush, thickness, self.origin);
                self.shapes.push(Shape::mesh(mesh));
            }
        }
    }

    fn disc(&mut self, center: Vec2, radius: f32, color: Color) {
        if radius > 0.0 {
            self.shapes.push(Shape::circle_filled(self.at(center), radius, to_color32(color)));
        }
    }

    fn ring(&mut self, center: Vec2, radius: f32, width: f32, color: Color) {
        if width > 0.0 {
            self.shapes.push(Shape::circle_stroke(
                self.at(center),
                radius,
                Stroke::new(width, to_color32(color)),
            ));
        }
    }

    fn icon(&mut self, icon: IconRef, rect: Rect, tint: Option<Color>) {
        let Some(texture) = self.icons.and_then(|resolve| resolve(icon)) else {
            trace!(icon = icon.id, "no texture for point icon");
            return;
        };
        let rect = to_egui_rect(rect).translate(self.origin);
        let uv = egui::Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0));
        let tint = tint.map_or(Color32::WHITE, to_color32);
        self.shapes.push(Shape::image(texture, rect, uv, tint));
    }
}

/// Quad strip along `start..end` colored by sampling `brush` in engine
/// coordinates, then shifted by `origin`.
pub fn gradient_line_mesh(start: Vec2, end: Vec2, brush: &Brush, thickness: f32, origin: egui::Vec2) -> Mesh {
    let mut mesh = Mesh::default();
    let dir = (end - start).normalize_or_zero();
    let normal = Vec2::new(-dir.y, dir.x) * (thickness / 2.0);

    for step in 0..=GRADIENT_STEPS {
        let t = step as f32 / GRADIENT_STEPS as f32;
        let point = start.lerp(end, t);
        let color = to_color32(brush.color_at(point));
        mesh.colored_vertex(to_pos2(point + normal) + origin, color);
        mesh.colored_vertex(to_pos2(point - normal) + origin, color);
        if step > 0 {
            let i = (step as u32) * 2;
            mesh.add_triangle(i - 2, i - 1, i);
            mesh.add_triangle(i - 1, i + 1, i);
        }
    }
    mesh
}
