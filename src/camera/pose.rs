//! Camera pose and the distance clamp applied to it.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Camera placement: eye position and the point it looks at.
///
/// The renderer only reads poses; the animator or the manual orbit path
/// writes them, never both in the same frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    /// Eye position in world space.
    pub position: Vec3,
    /// Look-at target in world space.
    pub look_at: Vec3,
}

impl CameraPose {
    /// Pose from eye position and look-at target.
    #[must_use]
    pub fn new(position: Vec3, look_at: Vec3) -> Self {
        Self { position, look_at }
    }

    /// Eye placed `distance` along +Z from `target`, looking at it.
    #[must_use]
    pub fn facing(target: Vec3, distance: f32) -> Self {
        Self::new(target + Vec3::Z * distance, target)
    }

    /// Euclidean distance from the eye to the look-at target.
    #[must_use]
    pub fn distance(&self) -> f32 {
        self.position.distance(self.look_at)
    }

    /// Eye position relative to the look-at target.
    #[must_use]
    pub fn offset(&self) -> Vec3 {
        self.position - self.look_at
    }
}

impl Default for CameraPose {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 60.0),
            look_at: Vec3::ZERO,
        }
    }
}

/// Inclusive clamp range for the camera-to-target distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceLimits {
    /// Closest allowed distance.
    pub min: f32,
    /// Farthest allowed distance.
    pub max: f32,
}

impl DistanceLimits {
    /// Limits from a min/max pair; swapped bounds are reordered. A NaN
    /// bound leaves that side open.
    #[must_use]
    pub fn new(min: f32, max: f32) -> Self {
        let min = if min.is_nan() { 0.0 } else { min };
        let max = if max.is_nan() { f32::INFINITY } else { max };
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    /// Clamp `distance` into the range. NaN maps to `min`.
    #[must_use]
    pub fn clamp(&self, distance: f32) -> f32 {
        if distance.is_nan() {
            return self.min;
        }
        distance.clamp(self.min, self.max)
    }
}
