//! Camera animator: timed pose transitions plus immediate-mode orbit
//! updates.
//!
//! The animator never schedules frames itself. The host calls
//! [`CameraAnimator::tick`] once per rendered frame with the elapsed time;
//! while a transition is active, manual rotation and distance updates are
//! ignored so exactly one writer owns the pose.

use std::fmt;

use glam::{Vec2, Vec3};

use super::orbit::OrbitMapper;
use super::pose::{CameraPose, DistanceLimits};
use super::transition::{
    AnimateOptions, AnimationId, AnimationTick, TransitionSpec,
};

/// Sub-microsecond slack so accumulated frame deltas that sum to the
/// duration land on exactly 1.0.
const COMPLETION_EPSILON_MS: f64 = 1e-6;

/// The single in-flight transition.
struct ActiveTransition {
    id: AnimationId,
    spec: TransitionSpec,
    elapsed_ms: f64,
    on_complete: Option<Box<dyn FnOnce()>>,
}

impl ActiveTransition {
    /// Linear progress in `[0, 1]`.
    fn progress(&self) -> f32 {
        let duration = self.spec.duration_ms;
        if duration <= 0.0
            || self.elapsed_ms + COMPLETION_EPSILON_MS >= duration
        {
            1.0
        } else {
            (self.elapsed_ms / duration) as f32
        }
    }
}

/// Owns the camera pose and drives it either through timed transitions or
/// through direct orbit/distance updates.
pub struct CameraAnimator {
    pose: CameraPose,
    home: Option<CameraPose>,
    mapper: OrbitMapper,
    active: Option<ActiveTransition>,
    next_id: u64,
}

impl CameraAnimator {
    /// Animator resting at `pose`. No home pose is recorded until
    /// [`set_home_position`](Self::set_home_position) is called.
    #[must_use]
    pub fn new(pose: CameraPose, mapper: OrbitMapper) -> Self {
        Self {
            pose,
            home: None,
            mapper,
            active: None,
            next_id: 0,
        }
    }

    /// Pose the renderer should draw this frame.
    #[must_use]
    pub fn current_pose(&self) -> CameraPose {
        self.pose
    }

    /// Jump to `pose`, dropping any in-flight transition.
    pub fn set_pose(&mut self, pose: CameraPose) {
        let _ = self.cancel_animation();
        self.pose = pose;
    }

    /// Record the pose [`reset`](Self::reset) returns to.
    pub fn set_home_position(&mut self, pose: CameraPose) {
        self.home = Some(pose);
    }

    /// The recorded home pose, if any.
    #[must_use]
    pub fn home_position(&self) -> Option<CameraPose> {
        self.home
    }

    /// Orbit mapper used for manual rotation.
    #[must_use]
    pub fn mapper(&self) -> &OrbitMapper {
        &self.mapper
    }

    /// Replace the orbit mapper, e.g. after a sensitivity change.
    pub fn set_mapper(&mut self, mapper: OrbitMapper) {
        self.mapper = mapper;
    }

    /// Whether a timed transition is in flight.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.active.is_some()
    }

    /// The in-flight transition, if any.
    #[must_use]
    pub fn active_transition(&self) -> Option<&TransitionSpec> {
        self.active.as_ref().map(|a| &a.spec)
    }

    /// Start a transition from the current pose to `target`.
    ///
    /// Any in-flight transition is discarded without running its completion
    /// callback, and the new one starts from wherever the camera is now.
    pub fn animate_to(
        &mut self,
        target: CameraPose,
        options: AnimateOptions,
    ) -> AnimationId {
        if let Some(prev) = self.active.take() {
            log::debug!(
                "camera transition {:?} superseded at {:.0}ms",
                prev.id,
                prev.elapsed_ms
            );
        }

        let id = AnimationId(self.next_id);
        self.next_id += 1;
        self.active = Some(ActiveTransition {
            id,
            spec: TransitionSpec {
                duration_ms: options.duration_ms.max(0.0),
                easing: options.easing,
                start: self.pose,
                end: target,
            },
            elapsed_ms: 0.0,
            on_complete: options.on_complete,
        });
        id
    }

    /// Advance the in-flight transition by `delta_ms`.
    ///
    /// Returns `None` when idle. On the final step the pose is set to the
    /// exact target, progress reports exactly `1.0`, and the completion
    /// callback runs.
    pub fn tick(&mut self, delta_ms: f64) -> Option<AnimationTick> {
        let (id, progress) = {
            let active = self.active.as_mut()?;
            active.elapsed_ms += delta_ms.max(0.0);
            (active.id, active.progress())
        };

        if progress >= 1.0 {
            return self.finish();
        }

        let active = self.active.as_ref()?;
        let eased = active.spec.easing.evaluate(progress);
        self.pose = active.spec.sample(eased);
        Some(AnimationTick {
            id,
            progress,
            eased,
            completed: false,
        })
    }

    /// Land the in-flight transition on its target.
    fn finish(&mut self) -> Option<AnimationTick> {
        let mut done = self.active.take()?;
        self.pose = done.spec.end;
        if let Some(callback) = done.on_complete.take() {
            callback();
        }
        Some(AnimationTick {
            id: done.id,
            progress: 1.0,
            eased: 1.0,
            completed: true,
        })
    }

    /// Stop the in-flight transition where it is. Returns whether one was
    /// running.
    pub fn cancel_animation(&mut self) -> bool {
        match self.active.take() {
            Some(cancelled) => {
                log::debug!(
                    "camera transition {:?} cancelled at {:.0}ms",
                    cancelled.id,
                    cancelled.elapsed_ms
                );
                true
            }
            None => false,
        }
    }

    /// Orbit by a drag delta at `distance` from the target.
    ///
    /// Ignored (returns `false`) while a transition is in flight.
    pub fn update_rotation(&mut self, delta: Vec2, distance: f32) -> bool {
        if self.is_animating() {
            return false;
        }
        self.pose = self.mapper.orbit(&self.pose, delta, distance);
        true
    }

    /// Move the eye along its current direction to `distance` from the
    /// target, clamped to `limits`. Azimuth and polar angle are preserved.
    ///
    /// Ignored (returns `false`) while a transition is in flight.
    pub fn update_distance(
        &mut self,
        distance: f32,
        limits: DistanceLimits,
    ) -> bool {
        if self.is_animating() {
            return false;
        }
        let radius = limits.clamp(distance);
        let dir = self.pose.offset().try_normalize().unwrap_or(Vec3::Z);
        self.pose.position = self.pose.look_at + dir * radius;
        true
    }

    /// Distance from the eye to the look-at target.
    #[must_use]
    pub fn distance(&self) -> f32 {
        self.pose.distance()
    }

    /// Cancel any transition and return to the home pose, if one was
    /// recorded.
    pub fn reset(&mut self) {
        let _ = self.cancel_animation();
        if let Some(home) = self.home {
            self.pose = home;
        }
    }
}

impl fmt::Debug for CameraAnimator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CameraAnimator")
            .field("pose", &self.pose)
            .field("home", &self.home)
            .field("mapper", &self.mapper)
            .field("active", &self.active.as_ref().map(|a| (a.id, a.spec)))
            .finish_non_exhaustive()
    }
}
