//! Easing curves for point animations.
//!
//! Supports easing via cubic Bézier curves with Newton-Raphson evaluation
//! for converting the linear fraction of elapsed time to an eased fraction.

use serde::{Deserialize, Serialize};

// ── Cubic Bézier ────────────────────────────────────────────────

/// Cubic Bézier control points for easing (x1, y1, x2, y2).
/// The curve goes from (0,0) to (1,1).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CubicBezier {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl CubicBezier {
    pub const fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    fn sample_x(&self, t: f32) -> f32 {
        let mt = 1.0 - t;
        3.0 * mt * mt * t * self.x1 + 3.0 * mt * t * t * self.x2 + t * t * t
    }

    fn sample_y(&self, t: f32) -> f32 {
        let mt = 1.0 - t;
        3.0 * mt * mt * t * self.y1 + 3.0 * mt * t * t * self.y2 + t * t * t
    }

    /// Derivative of X with respect to t.
    fn sample_dx(&self, t: f32) -> f32 {
        let mt = 1.0 - t;
        3.0 * mt * mt * self.x1 + 6.0 * mt * t * (self.x2 - self.x1) + 3.0 * t * t * (1.0 - self.x2)
    }

    /// Solve for the parameter t given an x value using Newton-Raphson.
    /// Returns the y value at that x.
    pub fn evaluate(&self, x: f32) -> f32 {
        if x <= 0.0 {
            return 0.0;
        }
        if x >= 1.0 {
            return 1.0;
        }

        let mut t = x;
        for _ in 0..8 {
            let x_est = self.sample_x(t) - x;
            if x_est.abs() < 1e-6 {
                break;
            }
            let dx = self.sample_dx(t);
            if dx.abs() < 1e-9 {
                break;
            }
            t = (t - x_est / dx).clamp(0.0, 1.0);
        }

        self.sample_y(t)
    }

    // Common easing presets
    pub const LINEAR: Self = Self::new(0.0, 0.0, 1.0, 1.0);
    pub const EASE_IN_OUT: Self = Self::new(0.42, 0.0, 0.58, 1.0);
    /// Material "standard" curve.
    pub const FAST_OUT_SLOW_IN: Self = Self::new(0.4, 0.0, 0.2, 1.0);
    pub const LINEAR_OUT_SLOW_IN: Self = Self::new(0.0, 0.0, 0.2, 1.0);
    pub const FAST_OUT_LINEAR_IN: Self = Self::new(0.4, 0.0, 1.0, 1.0);
}

// ── Easing ──────────────────────────────────────────────────────

/// How an animation maps elapsed fraction to progress.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum Easing {
    #[default]
    Linear,
    Bezier(CubicBezier),
}

impl Easing {
    pub const FAST_OUT_SLOW_IN: Self = Self::Bezier(CubicBezier::FAST_OUT_SLOW_IN);
    pub const EASE_IN_OUT: Self = Self::Bezier(CubicBezier::EASE_IN_OUT);

    /// Map a fraction in `0..=1` to eased progress. Input is clamped.
    pub fn transform(self, fraction: f32) -> f32 {
        let t = fraction.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::Bezier(curve) => curve.evaluate(t),
        }
    }
}
