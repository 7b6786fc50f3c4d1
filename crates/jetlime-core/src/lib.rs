//! JetLime Core - Foundation types for the timeline engine
//!
//! This crate provides the value types shared by the engine and its frontends:
//! - Colors (RGBA, interpolation)
//! - Geometric primitives (points, sizes, rectangles)
//! - Easing curves for point animations
//! - The error type

pub mod color;
pub mod easing;
pub mod error;
pub mod geometry;

pub use color::Color;
pub use easing::{CubicBezier, Easing};
pub use error::{JetLimeError, Result};
pub use geometry::{Rect, Size, Vec2};
