//! Transition descriptions: named views, presets, and the interpolation
//! between two camera poses.

use std::fmt;

use glam::Quat;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::pose::CameraPose;
use crate::util::easing::EasingFunction;

/// Semantic camera views the host navigates between.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum ViewState {
    /// Whole point cloud in view.
    #[default]
    Overview,
    /// Orbiting one ring of nodes.
    Ring,
    /// Close-up on a single node.
    Contact,
}

/// Duration and easing of one kind of camera move.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TransitionPreset {
    /// Transition length in milliseconds.
    pub duration_ms: f64,
    /// Progress curve.
    pub easing: EasingFunction,
}

impl TransitionPreset {
    /// Preset from a duration and easing curve.
    #[must_use]
    pub fn new(duration_ms: f64, easing: EasingFunction) -> Self {
        Self {
            duration_ms,
            easing,
        }
    }
}

/// Identifies one `animate_to` request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnimationId(pub(crate) u64);

/// A transition between two captured poses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionSpec {
    /// Transition length in milliseconds.
    pub duration_ms: f64,
    /// Progress curve.
    pub easing: EasingFunction,
    /// Pose at progress 0.
    pub start: CameraPose,
    /// Pose at progress 1.
    pub end: CameraPose,
}

impl TransitionSpec {
    /// Pose at eased progress `t`.
    ///
    /// The eye moves on a straight line. The view direction rotates along
    /// the shortest arc while its length is lerped, so the look-at target
    /// sweeps instead of cutting across the scene. Degenerate directions
    /// fall back to a straight lerp of the target.
    #[must_use]
    pub fn sample(&self, t: f32) -> CameraPose {
        let position = self.start.position.lerp(self.end.position, t);

        let from = self.start.look_at - self.start.position;
        let to = self.end.look_at - self.end.position;
        let (Some(from_dir), Some(to_dir)) =
            (from.try_normalize(), to.try_normalize())
        else {
            return CameraPose::new(
                position,
                self.start.look_at.lerp(self.end.look_at, t),
            );
        };

        let arc = Quat::from_rotation_arc(from_dir, to_dir);
        let dir = Quat::IDENTITY.slerp(arc, t) * from_dir;
        let length = from.length() + (to.length() - from.length()) * t;
        CameraPose::new(position, position + dir * length)
    }
}

/// Parameters of one `animate_to` call.
pub struct AnimateOptions {
    /// Transition length in milliseconds.
    pub duration_ms: f64,
    /// Progress curve.
    pub easing: EasingFunction,
    /// Runs once after the pose lands exactly on the target. Dropped
    /// unrun if the transition is cancelled or superseded.
    pub on_complete: Option<Box<dyn FnOnce()>>,
}

impl AnimateOptions {
    /// Options with no completion callback.
    #[must_use]
    pub fn new(duration_ms: f64, easing: EasingFunction) -> Self {
        Self {
            duration_ms,
            easing,
            on_complete: None,
        }
    }

    /// Attach a completion callback.
    #[must_use]
    pub fn on_complete(mut self, callback: impl FnOnce() + 'static) -> Self {
        self.on_complete = Some(Box::new(callback));
        self
    }
}

impl From<TransitionPreset> for AnimateOptions {
    fn from(preset: TransitionPreset) -> Self {
        Self::new(preset.duration_ms, preset.easing)
    }
}

impl fmt::Debug for AnimateOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimateOptions")
            .field("duration_ms", &self.duration_ms)
            .field("easing", &self.easing)
            .field("on_complete", &self.on_complete.is_some())
            .finish()
    }
}

/// Result of advancing an animation by one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationTick {
    /// Which transition advanced.
    pub id: AnimationId,
    /// Linear progress, exactly `1.0` on the final step.
    pub progress: f32,
    /// Eased progress applied to the pose this step.
    pub eased: f32,
    /// True exactly once, on the step that landed on the target.
    pub completed: bool,
}
