//! Timeline-wide and per-event style, with validated builders.
//!
//! Styles are immutable once built. Every numeric field is checked by
//! `build()` (or `from_json`), so the layout engine never sees a negative
//! distance or radius.

use jetlime_core::{Color, Easing, JetLimeError, Result, Size};
use serde::{Deserialize, Serialize};

use crate::brush::{Brush, DashPattern};
use crate::position::{EventPosition, PointPlacement};

// ── Defaults ────────────────────────────────────────────────────

pub const DEFAULT_CONTENT_DISTANCE: f32 = 16.0;
pub const DEFAULT_ITEM_SPACING: f32 = 8.0;
pub const DEFAULT_LINE_THICKNESS: f32 = 4.0;
pub const DEFAULT_POINT_RADIUS: f32 = 12.0;
pub const DEFAULT_POINT_STROKE_WIDTH: f32 = 2.0;
pub const DEFAULT_POINT_START_FACTOR: f32 = 1.1;
pub const DEFAULT_FILL_PERCENT: f32 = 0.5;

/// Default point and line color.
pub const DEFAULT_POINT_COLOR: Color = Color::new(0.129, 0.588, 0.953, 1.0);

// ── Enumerations ────────────────────────────────────────────────

/// Main-axis direction of a timeline. Set by the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Arrangement {
    #[default]
    Vertical,
    Horizontal,
}

/// Side of a vertical timeline the line runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum VerticalAlignment {
    #[default]
    Left,
    Right,
}

/// Side of a horizontal timeline the line runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum HorizontalAlignment {
    #[default]
    Top,
    Bottom,
}

/// Opaque handle to an externally rendered image.
///
/// The engine never decodes icons; it forwards the handle and the target
/// rectangle to the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IconRef {
    pub id: u64,
}

impl IconRef {
    pub const fn new(id: u64) -> Self {
        Self { id }
    }
}

/// How the interior of a point is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EventPointType {
    Empty,
    Filled { fill_percent: f32 },
    Custom { icon: IconRef, tint: Option<Color> },
}

impl EventPointType {
    pub const EMPTY: Self = EventPointType::Empty;

    /// Filled point; `fill_percent` is clamped to `0..=1`.
    pub fn filled(fill_percent: f32) -> Self {
        let fill_percent = if fill_percent.is_nan() {
            0.0
        } else {
            fill_percent.clamp(0.0, 1.0)
        };
        EventPointType::Filled { fill_percent }
    }

    pub fn custom(icon: IconRef, tint: Option<Color>) -> Self {
        EventPointType::Custom { icon, tint }
    }

    pub fn is_filled(&self) -> bool {
        matches!(self, EventPointType::Filled { .. })
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, EventPointType::Custom { .. })
    }
}

impl Default for EventPointType {
    fn default() -> Self {
        EventPointType::Filled {
            fill_percent: DEFAULT_FILL_PERCENT,
        }
    }
}

/// What happens when a pulse reaches its target value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RepeatMode {
    /// Jump back to the initial value.
    Restart,
    /// Run back towards the initial value.
    #[default]
    Reverse,
}

/// Infinite point-radius pulse: the radius factor runs between
/// `initial_value` and `target_value`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointAnimation {
    pub initial_value: f32,
    pub target_value: f32,
    pub duration_ms: u32,
    pub easing: Easing,
    pub repeat: RepeatMode,
}

impl PointAnimation {
    pub fn new(initial_value: f32, target_value: f32) -> Self {
        Self {
            initial_value,
            target_value,
            ..Self::default()
        }
    }

    pub fn with_duration_ms(self, duration_ms: u32) -> Self {
        Self { duration_ms, ..self }
    }

    pub fn with_easing(self, easing: Easing) -> Self {
        Self { easing, ..self }
    }

    pub fn with_repeat(self, repeat: RepeatMode) -> Self {
        Self { repeat, ..self }
    }

    /// Radius factor `elapsed` seconds after the animation started.
    pub fn factor_at(&self, elapsed: f64) -> f32 {
        if self.duration_ms == 0 {
            return self.target_value.max(0.0);
        }
        let period = self.duration_ms as f64 / 1000.0;
        let cycles = elapsed.max(0.0) / period;
        let mut fraction = cycles.fract() as f32;
        if self.repeat == RepeatMode::Reverse && (cycles as u64) % 2 == 1 {
            fraction = 1.0 - fraction;
        }
        self.value_at_fraction(fraction)
    }

    pub(crate) fn value_at_fraction(&self, fraction: f32) -> f32 {
        let t = self.easing.transform(fraction);
        (self.initial_value + (self.target_value - self.initial_value) * t).max(0.0)
    }

    fn validate(&self) -> Result<()> {
        check_non_negative("point_animation.initial_value", self.initial_value)?;
        check_non_negative("point_animation.target_value", self.target_value)?;
        if self.duration_ms == 0 {
            return Err(JetLimeError::config(
                "point_animation.duration_ms must be greater than zero",
            ));
        }
        Ok(())
    }
}

impl Default for PointAnimation {
    fn default() -> Self {
        Self {
            initial_value: 1.0,
            target_value: 1.2,
            duration_ms: 1000,
            easing: Easing::Linear,
            repeat: RepeatMode::Reverse,
        }
    }
}

fn check_non_negative(field: &str, value: f32) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(JetLimeError::config(format!(
            "{field} must be a finite non-negative number, got {value}"
        )))
    }
}

fn parse_json<T: for<'de> Deserialize<'de>>(json: &str) -> Result<T> {
    serde_json::from_str(json).map_err(|e| JetLimeError::Serialization(e.to_string()))
}

// ── JetLimeStyle ────────────────────────────────────────────────

/// Container-level style shared by every event of a timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JetLimeStyle {
    content_distance: f32,
    item_spacing: f32,
    line_thickness: f32,
    line_brush: Brush,
    dash: Option<DashPattern>,
    vertical_alignment: VerticalAlignment,
    horizontal_alignment: HorizontalAlignment,
    point_start_factor: f32,
    #[serde(skip)]
    arrangement: Arrangement,
}

impl Default for JetLimeStyle {
    fn default() -> Self {
        Self {
            content_distance: DEFAULT_CONTENT_DISTANCE,
            item_spacing: DEFAULT_ITEM_SPACING,
            line_thickness: DEFAULT_LINE_THICKNESS,
            line_brush: Brush::Solid(DEFAULT_POINT_COLOR),
            dash: None,
            vertical_alignment: VerticalAlignment::Left,
            horizontal_alignment: HorizontalAlignment::Top,
            point_start_factor: DEFAULT_POINT_START_FACTOR,
            arrangement: Arrangement::Vertical,
        }
    }
}

impl JetLimeStyle {
    /// Default style for a column.
    pub fn column() -> Self {
        Self::default()
    }

    /// Default style for a row.
    pub fn row() -> Self {
        Self::default().with_arrangement(Arrangement::Horizontal)
    }

    pub fn builder() -> JetLimeStyleBuilder {
        JetLimeStyleBuilder {
            style: Self::default(),
        }
    }

    /// Load and validate a style from JSON. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let style: Self = parse_json(json)?;
        style.validate()?;
        Ok(style)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| JetLimeError::Serialization(e.to_string()))
    }

    pub fn validate(&self) -> Result<()> {
        check_non_negative("content_distance", self.content_distance)?;
        check_non_negative("item_spacing", self.item_spacing)?;
        check_non_negative("line_thickness", self.line_thickness)?;
        if !(self.point_start_factor.is_finite() && self.point_start_factor > 0.0) {
            return Err(JetLimeError::config(format!(
                "point_start_factor must be a finite positive number, got {}",
                self.point_start_factor
            )));
        }
        self.line_brush.validate("line_brush")?;
        if let Some(dash) = &self.dash {
            dash.validate()?;
        }
        Ok(())
    }

    /// Same style laid out along `arrangement`. Containers call this with
    /// their own axis.
    pub fn with_arrangement(mut self, arrangement: Arrangement) -> Self {
        self.arrangement = arrangement;
        self
    }

    pub fn content_distance(&self) -> f32 {
        self.content_distance
    }
    pub fn item_spacing(&self) -> f32 {
        self.item_spacing
    }
    pub fn line_thickness(&self) -> f32 {
        self.line_thickness
    }
    pub fn line_brush(&self) -> &Brush {
        &self.line_brush
    }
    pub fn dash(&self) -> Option<DashPattern> {
        self.dash
    }
    pub fn vertical_alignment(&self) -> VerticalAlignment {
        self.vertical_alignment
    }
    pub fn horizontal_alignment(&self) -> HorizontalAlignment {
        self.horizontal_alignment
    }
    pub fn point_start_factor(&self) -> f32 {
        self.point_start_factor
    }
    pub fn arrangement(&self) -> Arrangement {
        self.arrangement
    }
}

/// Builder for [`JetLimeStyle`].
#[derive(Debug, Clone)]
#[must_use]
pub struct JetLimeStyleBuilder {
    style: JetLimeStyle,
}

impl JetLimeStyleBuilder {
    pub fn content_distance(mut self, value: f32) -> Self {
        self.style.content_distance = value;
        self
    }

    pub fn item_spacing(mut self, value: f32) -> Self {
        self.style.item_spacing = value;
        self
    }

    pub fn line_thickness(mut self, value: f32) -> Self {
        self.style.line_thickness = value;
        self
    }

    pub fn line_brush(mut self, brush: impl Into<Brush>) -> Self {
        self.style.line_brush = brush.into();
        self
    }

    pub fn dash(mut self, dash: DashPattern) -> Self {
        self.style.dash = Some(dash);
        self
    }

    pub fn vertical_alignment(mut self, alignment: VerticalAlignment) -> Self {
        self.style.vertical_alignment = alignment;
        self
    }

    pub fn horizontal_alignment(mut self, alignment: HorizontalAlignment) -> Self {
        self.style.horizontal_alignment = alignment;
        self
    }

    pub fn point_start_factor(mut self, factor: f32) -> Self {
        self.style.point_start_factor = factor;
        self
    }

    pub fn build(self) -> Result<JetLimeStyle> {
        self.style.validate()?;
        Ok(self.style)
    }
}

// ── EventStyle ──────────────────────────────────────────────────

/// Per-event point style plus the event's computed position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventStyle {
    point_type: EventPointType,
    point_color: Color,
    point_fill_color: Color,
    point_radius: f32,
    point_animation: Option<PointAnimation>,
    point_stroke_width: f32,
    point_stroke_color: Color,
    point_placement: PointPlacement,
    line_brush: Option<Brush>,
    position: EventPosition,
}

impl Default for EventStyle {
    fn default() -> Self {
        Self {
            point_type: EventPointType::default(),
            point_color: DEFAULT_POINT_COLOR,
            point_fill_color: Color::WHITE,
            point_radius: DEFAULT_POINT_RADIUS,
            point_animation: None,
            point_stroke_width: DEFAULT_POINT_STROKE_WIDTH,
            point_stroke_color: DEFAULT_POINT_COLOR,
            point_placement: PointPlacement::Center,
            line_brush: None,
            position: EventPosition::dynamic(0, 0),
        }
    }
}

impl EventStyle {
    /// Default style for an event at `position`.
    pub fn new(position: EventPosition) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    pub fn builder(position: EventPosition) -> EventStyleBuilder {
        EventStyleBuilder {
            style: Self::new(position),
        }
    }

    /// Load and validate an event style from JSON. Missing fields take
    /// defaults; the position is normally overwritten by the container.
    pub fn from_json(json: &str) -> Result<Self> {
        let style: Self = parse_json(json)?;
        style.validate()?;
        Ok(style)
    }

    pub fn validate(&self) -> Result<()> {
        check_non_negative("point_radius", self.point_radius)?;
        check_non_negative("point_stroke_width", self.point_stroke_width)?;
        if let EventPointType::Filled { fill_percent } = self.point_type {
            if !(0.0..=1.0).contains(&fill_percent) {
                return Err(JetLimeError::config(format!(
                    "fill_percent must be within 0..=1, got {fill_percent}"
                )));
            }
        }
        if let Some(animation) = &self.point_animation {
            animation.validate()?;
        }
        if let Some(brush) = &self.line_brush {
            brush.validate("event line_brush")?;
        }
        Ok(())
    }

    /// Same style at a different position.
    pub fn with_position(mut self, position: EventPosition) -> Self {
        self.position = position;
        self
    }

    /// Brush for this event's line: its own override, else the container's.
    pub fn resolve_line_brush<'a>(&'a self, container: &'a JetLimeStyle) -> &'a Brush {
        self.line_brush.as_ref().unwrap_or(container.line_brush())
    }

    /// Radius of the rendered point for an animation `factor`.
    pub fn animated_radius(&self, factor: f32) -> f32 {
        self.point_radius * factor.max(0.0)
    }

    /// Side of the square an icon is drawn into.
    pub fn icon_extent(&self, factor: f32) -> Size {
        let side = self.animated_radius(factor) * 2.4;
        Size::new(side, side)
    }

    pub fn point_type(&self) -> EventPointType {
        self.point_type
    }
    pub fn point_color(&self) -> Color {
        self.point_color
    }
    pub fn point_fill_color(&self) -> Color {
        self.point_fill_color
    }
    pub fn point_radius(&self) -> f32 {
        self.point_radius
    }
    pub fn point_animation(&self) -> Option<&PointAnimation> {
        self.point_animation.as_ref()
    }
    pub fn point_stroke_width(&self) -> f32 {
        self.point_stroke_width
    }
    pub fn point_stroke_color(&self) -> Color {
        self.point_stroke_color
    }
    pub fn point_placement(&self) -> PointPlacement {
        self.point_placement
    }
    pub fn line_brush(&self) -> Option<&Brush> {
        self.line_brush.as_ref()
    }
    pub fn position(&self) -> EventPosition {
        self.position
    }
}

/// Builder for [`EventStyle`].
#[derive(Debug, Clone)]
#[must_use]
pub struct EventStyleBuilder {
    style: EventStyle,
}

impl EventStyleBuilder {
    pub fn point_type(mut self, point_type: EventPointType) -> Self {
        self.style.point_type = point_type;
        self
    }

    pub fn point_color(mut self, color: Color) -> Self {
        self.style.point_color = color;
        self
    }

    pub fn point_fill_color(mut self, color: Color) -> Self {
        self.style.point_fill_color = color;
        self
    }

    pub fn point_radius(mut self, radius: f32) -> Self {
        self.style.point_radius = radius;
        self
    }

    pub fn point_animation(mut self, animation: PointAnimation) -> Self {
        self.style.point_animation = Some(animation);
        self
    }

    pub fn point_stroke_width(mut self, width: f32) -> Self {
        self.style.point_stroke_width = width;
        self
    }

    pub fn point_stroke_color(mut self, color: Color) -> Self {
        self.style.point_stroke_color = color;
        self
    }

    pub fn point_placement(mut self, placement: PointPlacement) -> Self {
        self.style.point_placement = placement;
        self
    }

    pub fn line_brush(mut self, brush: impl Into<Brush>) -> Self {
        self.style.line_brush = Some(brush.into());
        self
    }

    pub fn build(self) -> Result<EventStyle> {
        self.style.validate()?;
        Ok(self.style)
    }
}
