//! Easing functions for camera transitions.
//!
//! Each curve maps normalized progress `t ∈ [0, 1]` to eased progress with
//! `f(0) = 0` and `f(1) = 1`. The free functions do no clamping; the
//! [`EasingFunction`] enum clamps its input so presets can be evaluated with
//! raw elapsed/duration ratios.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Identity curve.
#[inline]
#[must_use]
pub fn linear(t: f32) -> f32 {
    t
}

/// Cubic ease-out: `1 - (1 - t)³`.
#[inline]
#[must_use]
pub fn ease_out_cubic(t: f32) -> f32 {
    let omt = 1.0 - t;
    1.0 - omt * omt * omt
}

/// Cubic ease-in-out, piecewise at `t = 0.5`.
#[inline]
#[must_use]
pub fn ease_in_out_cubic(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        let u = -2.0 * t + 2.0;
        1.0 - u * u * u / 2.0
    }
}

/// Quartic ease-out: `1 - (1 - t)⁴`.
#[inline]
#[must_use]
pub fn ease_out_quart(t: f32) -> f32 {
    let omt = 1.0 - t;
    let sq = omt * omt;
    1.0 - sq * sq
}

/// Quartic ease-in-out, piecewise at `t = 0.5`.
#[inline]
#[must_use]
pub fn ease_in_out_quart(t: f32) -> f32 {
    if t < 0.5 {
        let sq = t * t;
        8.0 * sq * sq
    } else {
        let u = -2.0 * t + 2.0;
        let sq = u * u;
        1.0 - sq * sq / 2.0
    }
}

/// Easing curve variants usable in transition presets.
///
/// Serializes as `snake_case` so TOML presets stay readable:
/// ```toml
/// [transitions.ring_to_contact]
/// duration_ms = 500.0
/// easing = "ease_in_out_cubic"
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum EasingFunction {
    /// No easing.
    Linear,
    /// Fast start, gradual stop.
    EaseOutCubic,
    /// Slow start and stop, cubic.
    EaseInOutCubic,
    /// Fast start, long tail.
    EaseOutQuart,
    /// Slow start and stop, quartic.
    EaseInOutQuart,
}

impl EasingFunction {
    /// Default curve for camera moves.
    pub const DEFAULT: EasingFunction = EasingFunction::EaseOutCubic;

    /// Evaluate the curve at `t`, clamped to `[0.0, 1.0]`.
    #[inline]
    #[must_use]
    pub fn evaluate(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match self {
            EasingFunction::Linear => linear(t),
            EasingFunction::EaseOutCubic => ease_out_cubic(t),
            EasingFunction::EaseInOutCubic => ease_in_out_cubic(t),
            EasingFunction::EaseOutQuart => ease_out_quart(t),
            EasingFunction::EaseInOutQuart => ease_in_out_quart(t),
        }
    }
}

impl Default for EasingFunction {
    #[inline]
    fn default() -> Self {
        Self::DEFAULT
    }
}
