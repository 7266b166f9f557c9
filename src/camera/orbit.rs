//! Screen-space drag deltas to spherical orbit coordinates.
//!
//! Y-up convention: azimuth is measured around +Y starting at +Z, polar is
//! the angle from +Y. The polar angle is kept away from both poles so the
//! view never flips its up vector.

use std::f32::consts::PI;

use glam::{Vec2, Vec3};

use super::pose::CameraPose;
use crate::options::CameraOptions;

/// Camera position around an implicit look-at target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphericalCoords {
    /// Angle around the vertical axis, radians.
    pub azimuth: f32,
    /// Angle from the +Y axis, radians.
    pub polar: f32,
    /// Distance from the target.
    pub radius: f32,
}

impl SphericalCoords {
    /// Coordinates from explicit angles and radius.
    #[must_use]
    pub fn new(azimuth: f32, polar: f32, radius: f32) -> Self {
        Self {
            azimuth,
            polar,
            radius,
        }
    }

    /// Decompose a target-relative offset. A zero offset maps to radius 0
    /// with both angles 0.
    #[must_use]
    pub fn from_offset(offset: Vec3) -> Self {
        let radius = offset.length();
        if radius == 0.0 {
            return Self::new(0.0, 0.0, 0.0);
        }
        Self {
            azimuth: offset.x.atan2(offset.z),
            polar: (offset.y / radius).clamp(-1.0, 1.0).acos(),
            radius,
        }
    }

    /// Target-relative Cartesian offset.
    #[must_use]
    pub fn to_offset(&self) -> Vec3 {
        let sin_polar = self.polar.sin();
        Vec3::new(
            self.radius * sin_polar * self.azimuth.sin(),
            self.radius * self.polar.cos(),
            self.radius * sin_polar * self.azimuth.cos(),
        )
    }
}

/// Maps drag deltas onto orbit rotations with pole clamping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitMapper {
    /// Radians of rotation per dragged pixel.
    sensitivity: f32,
    /// Minimum angular distance from either pole.
    polar_margin: f32,
}

impl OrbitMapper {
    /// Default radians per pixel.
    pub const DEFAULT_SENSITIVITY: f32 = 0.005;
    /// Default pole keep-out margin.
    pub const DEFAULT_POLAR_MARGIN: f32 = 0.1;

    /// Mapper with explicit sensitivity and pole margin. Non-finite
    /// values fall back to the defaults.
    #[must_use]
    pub fn new(sensitivity: f32, polar_margin: f32) -> Self {
        let sensitivity = if sensitivity.is_finite() {
            sensitivity
        } else {
            Self::DEFAULT_SENSITIVITY
        };
        let polar_margin = if polar_margin.is_finite() {
            polar_margin.clamp(0.0, PI / 2.0)
        } else {
            Self::DEFAULT_POLAR_MARGIN
        };
        Self {
            sensitivity,
            polar_margin,
        }
    }

    /// Mapper configured from camera options.
    #[must_use]
    pub fn from_options(options: &CameraOptions) -> Self {
        Self::new(options.rotate_sensitivity, options.polar_margin)
    }

    /// Radians of rotation per dragged pixel.
    #[must_use]
    pub fn sensitivity(&self) -> f32 {
        self.sensitivity
    }

    /// Clamp a polar angle to `[margin, π − margin]`.
    #[must_use]
    pub fn clamp_polar(&self, polar: f32) -> f32 {
        polar.clamp(self.polar_margin, PI - self.polar_margin)
    }

    /// Apply a drag delta: positive `x` decreases azimuth, positive `y`
    /// decreases the polar angle.
    #[must_use]
    pub fn rotate(&self, coords: SphericalCoords, delta: Vec2) -> SphericalCoords {
        SphericalCoords {
            azimuth: coords.azimuth - delta.x * self.sensitivity,
            polar: self.clamp_polar(coords.polar - delta.y * self.sensitivity),
            radius: coords.radius,
        }
    }

    /// Orbit `pose` around its look-at target by `delta` pixels, placing the
    /// eye at `radius`. The radius is taken as given; callers clamp it.
    #[must_use]
    pub fn orbit(&self, pose: &CameraPose, delta: Vec2, radius: f32) -> CameraPose {
        let mut coords = self.rotate(SphericalCoords::from_offset(pose.offset()), delta);
        coords.radius = radius;
        CameraPose::new(pose.look_at + coords.to_offset(), pose.look_at)
    }
}

impl Default for OrbitMapper {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SENSITIVITY, Self::DEFAULT_POLAR_MARGIN)
    }
}
