//! Camera system for orbit navigation.
//!
//! Provides camera poses, spherical orbit mapping, timed transitions with
//! named view presets, and the animator that owns the pose.

/// Timed transitions and manual orbit/distance updates.
pub mod animator;
/// Drag deltas to spherical coordinates.
pub mod orbit;
/// Camera pose and distance limits.
pub mod pose;
/// Named views, presets, and pose interpolation.
pub mod transition;

pub use animator::CameraAnimator;
pub use orbit::{OrbitMapper, SphericalCoords};
pub use pose::{CameraPose, DistanceLimits};
pub use transition::{
    AnimateOptions, AnimationId, AnimationTick, TransitionPreset,
    TransitionSpec, ViewState,
};
