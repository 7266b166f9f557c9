//! Shared utilities: easing curves and frame pacing.

pub mod easing;
pub mod frame_timing;
