//! Per-frame stepping for NavigationController

use glam::Vec2;

use super::NavigationController;
use crate::camera::{AnimationTick, CameraPose};
use crate::input::{GestureEvent, GesturePhase};

/// Everything the host needs after one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameOutput {
    /// Pose to render.
    pub pose: CameraPose,
    /// Transition step taken this frame, if one is playing.
    pub animation: Option<AnimationTick>,
    /// Gestures fired by timers that came due this frame.
    pub gestures: Vec<GestureEvent>,
    /// Momentum velocity applied this frame (px per frame).
    pub momentum: Option<Vec2>,
    /// Whether the host should schedule another frame.
    pub needs_redraw: bool,
}

impl NavigationController {
    /// Advance to host time `now_ms`: fire due gesture timers, then step
    /// the transition if one is playing, otherwise coast on momentum.
    ///
    /// The first call after construction, [`dispose`](Self::dispose) or the
    /// start of a new transition measures no elapsed time.
    pub fn frame(&mut self, now_ms: f64) -> FrameOutput {
        let delta_ms = self
            .last_frame_ms
            .map_or(0.0, |last| (now_ms - last).max(0.0));
        self.last_frame_ms = Some(now_ms);

        let gestures = self.recognizer.advance(now_ms);
        self.apply_gestures(&gestures);

        let was_animating = self.camera.is_animating();
        let animation = self.camera.tick(delta_ms);

        // Momentum keeps decaying under a transition but is only applied
        // when nothing else owns the camera.
        let mut momentum = self.recognizer.update();
        if was_animating {
            momentum = None;
        } else if let Some(velocity) = momentum {
            let _ = self.rotate(velocity);
        }

        FrameOutput {
            pose: self.camera.current_pose(),
            animation,
            gestures,
            momentum,
            needs_redraw: self.needs_frame(),
        }
    }

    /// Whether anything will change the pose or fire an event without
    /// further input.
    fn needs_frame(&self) -> bool {
        let coasting = self.recognizer.phase() == GesturePhase::Idle
            && self.recognizer.velocity() != Vec2::ZERO;
        self.camera.is_animating()
            || coasting
            || self.recognizer.next_deadline().is_some()
    }
}
