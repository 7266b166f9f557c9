use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::camera::{CameraPose, DistanceLimits};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Camera", inline)]
#[serde(default)]
/// Orbit camera control parameters.
pub struct CameraOptions {
    /// Orbit rotation per dragged pixel (radians).
    #[schemars(title = "Rotate Speed", range(min = 0.001, max = 0.02), extend("step" = 0.001))]
    pub rotate_sensitivity: f32,
    /// Keep-out margin (radians) from both poles.
    #[schemars(skip)]
    pub polar_margin: f32,
    /// Closest allowed camera distance to the look-at target.
    #[schemars(title = "Min Distance", range(min = 1.0, max = 100.0), extend("step" = 1.0))]
    pub min_distance: f32,
    /// Farthest allowed camera distance to the look-at target.
    #[schemars(title = "Max Distance", range(min = 50.0, max = 1000.0), extend("step" = 10.0))]
    pub max_distance: f32,
    /// Pose the camera starts in.
    #[schemars(skip)]
    pub initial_pose: CameraPose,
}

impl CameraOptions {
    /// Distance clamp derived from `min_distance`/`max_distance`.
    #[must_use]
    pub fn distance_limits(&self) -> DistanceLimits {
        DistanceLimits::new(self.min_distance, self.max_distance)
    }
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            rotate_sensitivity: 0.005,
            polar_margin: 0.1,
            min_distance: 5.0,
            max_distance: 200.0,
            initial_pose: CameraPose::default(),
        }
    }
}
