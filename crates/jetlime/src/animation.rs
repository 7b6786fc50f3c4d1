//! Frame-clock driven point pulse.

use crate::style::{PointAnimation, RepeatMode};

/// Whether a pulse is still advancing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PulsePhase {
    Running,
    Stopped,
}

/// Leg of the current cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PulseDirection {
    /// Initial value towards target value.
    Forward,
    /// Target value back towards initial value.
    Backward,
}

/// Infinite radius-factor animation advanced by an external frame clock.
///
/// The driver never schedules itself; the owner calls [`tick`](Self::tick)
/// once per frame and [`stop`](Self::stop) when the event is unmounted.
#[derive(Debug, Clone, PartialEq)]
pub struct PulseDriver {
    spec: PointAnimation,
    phase: PulsePhase,
    direction: PulseDirection,
    /// Seconds into the current leg.
    elapsed: f32,
    value: f32,
}

impl PulseDriver {
    pub fn new(spec: PointAnimation) -> Self {
        Self {
            value: spec.value_at_fraction(0.0),
            spec,
            phase: PulsePhase::Running,
            direction: PulseDirection::Forward,
            elapsed: 0.0,
        }
    }

    /// Advance by `dt` seconds and return the new factor.
    pub fn tick(&mut self, dt: f32) -> f32 {
        if self.phase == PulsePhase::Stopped || !dt.is_finite() || dt <= 0.0 {
            return self.value;
        }
        let duration = self.spec.duration_ms as f32 / 1000.0;
        if duration <= 0.0 {
            self.value = self.spec.value_at_fraction(1.0);
            return self.value;
        }

        self.elapsed += dt;
        if self.elapsed >= duration {
            let legs = (self.elapsed / duration).floor();
            self.elapsed -= legs * duration;
            if self.spec.repeat == RepeatMode::Reverse && (legs as u64) % 2 == 1 {
                self.direction = match self.direction {
                    PulseDirection::Forward => PulseDirection::Backward,
                    PulseDirection::Backward => PulseDirection::Forward,
                };
            }
        }

        let fraction = self.elapsed / duration;
        self.value = match self.direction {
            PulseDirection::Forward => self.spec.value_at_fraction(fraction),
            PulseDirection::Backward => self.spec.value_at_fraction(1.0 - fraction),
        };
        self.value
    }

    /// Freeze the driver; later ticks leave the factor unchanged.
    pub fn stop(&mut self) {
        self.phase = PulsePhase::Stopped;
    }

    pub fn factor(&self) -> f32 {
        self.value
    }

    pub fn phase(&self) -> PulsePhase {
        self.phase
    }

    pub fn direction(&self) -> PulseDirection {
        self.direction
    }

    pub fn is_running(&self) -> bool {
        self.phase == PulsePhase::Running
    }

    pub fn spec(&self) -> &PointAnimation {
        &self.spec
    }
}

/// Radius factor for an event: the driver's value, or exactly 1.0 when the
/// event has no animation.
pub fn radius_factor(driver: Option<&PulseDriver>) -> f32 {
    driver.map_or(1.0, PulseDriver::factor)
}
