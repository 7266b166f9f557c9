//! Drag velocity tracking and post-release frictional decay.

use glam::Vec2;

use crate::options::GestureOptions;

/// Scale `v` down uniformly so its length is at most `max`.
#[must_use]
pub fn clamp_magnitude(v: Vec2, max: f32) -> Vec2 {
    let len = v.length();
    if len > max && len > 0.0 {
        v * (max / len)
    } else {
        v
    }
}

/// Velocity estimate fed by drag samples and decayed once per frame after
/// release.
#[derive(Debug, Clone, PartialEq)]
pub struct Momentum {
    velocity: Vec2,
    friction: f32,
    snap_threshold: f32,
    max_velocity: f32,
    frame_ms: f32,
}

impl Momentum {
    /// Integrator configured from gesture options.
    #[must_use]
    pub fn from_options(options: &GestureOptions) -> Self {
        Self {
            velocity: Vec2::ZERO,
            friction: options.friction.clamp(0.0, 1.0),
            snap_threshold: options.snap_threshold.max(0.0),
            max_velocity: options.max_velocity.max(0.0),
            frame_ms: options.frame_ms,
        }
    }

    /// Current velocity in pixels per frame.
    #[must_use]
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Whether the velocity is exactly zero.
    #[must_use]
    pub fn is_at_rest(&self) -> bool {
        self.velocity == Vec2::ZERO
    }

    /// Update the estimate from a drag sample: `delta / dt`, expressed per
    /// frame and capped at the maximum speed. A non-positive `dt_ms` keeps
    /// the previous estimate.
    pub fn track(&mut self, delta: Vec2, dt_ms: f64) -> Vec2 {
        if dt_ms > 0.0 {
            let per_frame = delta / dt_ms as f32 * self.frame_ms;
            self.velocity = clamp_magnitude(per_frame, self.max_velocity);
        }
        self.velocity
    }

    /// One frame of friction. Returns the decayed velocity, or `None` once
    /// it falls below the snap threshold (the velocity is then exactly
    /// zero).
    pub fn step(&mut self) -> Option<Vec2> {
        if self.is_at_rest() {
            return None;
        }
        self.velocity *= self.friction;
        if self.velocity.length() < self.snap_threshold {
            self.velocity = Vec2::ZERO;
            return None;
        }
        Some(self.velocity)
    }

    /// Zero the velocity.
    pub fn stop(&mut self) {
        self.velocity = Vec2::ZERO;
    }
}
