//! Line paint: solid or gradient brushes and dash patterns.

use jetlime_core::{Color, JetLimeError, Result, Vec2};
use serde::{Deserialize, Serialize};
use smallvec::{smallvec, SmallVec};

use crate::style::DEFAULT_POINT_COLOR;

/// How a timeline line is colored.
///
/// Gradient endpoints are in event-local coordinates, so the same brush
/// repeats its gradient on every event it is applied to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Brush {
    Solid(Color),
    LinearGradient {
        colors: SmallVec<[Color; 4]>,
        start: Vec2,
        end: Vec2,
    },
}

impl Brush {
    pub fn solid(color: Color) -> Self {
        Brush::Solid(color)
    }

    pub fn linear_gradient(colors: impl IntoIterator<Item = Color>, start: Vec2, end: Vec2) -> Self {
        Brush::LinearGradient {
            colors: colors.into_iter().collect(),
            start,
            end,
        }
    }

    /// Gradient running top to bottom between `start_y` and `end_y`.
    pub fn vertical_gradient(colors: impl IntoIterator<Item = Color>, start_y: f32, end_y: f32) -> Self {
        Self::linear_gradient(colors, Vec2::new(0.0, start_y), Vec2::new(0.0, end_y))
    }

    /// Gradient running left to right between `start_x` and `end_x`.
    pub fn horizontal_gradient(colors: impl IntoIterator<Item = Color>, start_x: f32, end_x: f32) -> Self {
        Self::linear_gradient(colors, Vec2::new(start_x, 0.0), Vec2::new(end_x, 0.0))
    }

    /// Color of the brush at `point`.
    ///
    /// Points are projected onto the gradient axis; positions before the
    /// start or after the end take the first or last color.
    pub fn color_at(&self, point: Vec2) -> Color {
        match self {
            Brush::Solid(color) => *color,
            Brush::LinearGradient { colors, start, end } => {
                let Some(first) = colors.first().copied() else {
                    return Color::TRANSPARENT;
                };
                let axis = *end - *start;
                let len_sq = axis.length_squared();
                if colors.len() == 1 || len_sq <= f32::EPSILON {
                    return first;
                }
                let t = ((point - *start).dot(axis) / len_sq).clamp(0.0, 1.0);
                let scaled = t * (colors.len() - 1) as f32;
                let i = (scaled.floor() as usize).min(colors.len() - 2);
                colors[i].lerp(colors[i + 1], scaled - i as f32)
            }
        }
    }

    /// Whether the brush paints a single flat color.
    pub fn is_solid(&self) -> bool {
        match self {
            Brush::Solid(_) => true,
            Brush::LinearGradient { colors, .. } => colors.len() <= 1,
        }
    }

    /// The brush moved by `offset`, for painting in a parent's coordinates.
    pub fn translated(&self, offset: Vec2) -> Self {
        match self {
            Brush::Solid(color) => Brush::Solid(*color),
            Brush::LinearGradient { colors, start, end } => Brush::LinearGradient {
                colors: colors.clone(),
                start: *start + offset,
                end: *end + offset,
            },
        }
    }

    pub(crate) fn validate(&self, field: &str) -> Result<()> {
        match self {
            Brush::Solid(_) => Ok(()),
            Brush::LinearGradient { colors, start, end } => {
                if colors.is_empty() {
                    return Err(JetLimeError::config(format!(
                        "{field}: gradient needs at least one color"
                    )));
                }
                if !start.is_finite() || !end.is_finite() {
                    return Err(JetLimeError::config(format!(
                        "{field}: gradient endpoints must be finite"
                    )));
                }
                Ok(())
            }
        }
    }
}

impl Default for Brush {
    fn default() -> Self {
        Brush::Solid(DEFAULT_POINT_COLOR)
    }
}

impl From<Color> for Brush {
    fn from(color: Color) -> Self {
        Brush::Solid(color)
    }
}

/// Dash pattern for lines: `on` painted length, `off` gap, `phase` shift.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DashPattern {
    pub on: f32,
    pub off: f32,
    #[serde(default)]
    pub phase: f32,
}

impl DashPattern {
    pub const fn new(on: f32, off: f32) -> Self {
        Self { on, off, phase: 0.0 }
    }

    pub const fn with_phase(self, phase: f32) -> Self {
        Self { phase, ..self }
    }

    /// Split the segment `from..to` into painted dash pieces.
    pub fn split(&self, from: Vec2, to: Vec2) -> SmallVec<[(Vec2, Vec2); 8]> {
        let len = from.distance(to);
        let period = self.on + self.off;
        if len <= 0.0 || self.on <= 0.0 || period <= 0.0 {
            return SmallVec::new();
        }
        if self.off <= 0.0 {
            return smallvec![(from, to)];
        }

        let dir = (to - from) / len;
        let mut pieces = SmallVec::new();
        let mut pos = -self.phase.rem_euclid(period);
        while pos < len {
            let a = pos.max(0.0);
            let b = (pos + self.on).min(len);
            if b > a {
                pieces.push((from + dir * a, from + dir * b));
            }
            pos += period;
        }
        pieces
    }

    pub(crate) fn validate(&self) -> Result<()> {
        let valid = self.on.is_finite()
            && self.off.is_finite()
            && self.phase.is_finite()
            && self.on >= 0.0
            && self.off >= 0.0
            && self.on + self.off > 0.0;
        if valid {
            Ok(())
        } else {
            Err(JetLimeError::config(format!(
                "dash pattern needs non-negative finite lengths with a positive period, got on={} off={}",
                self.on, self.off
            )))
        }
    }
}
