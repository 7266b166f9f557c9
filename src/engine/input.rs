//! Touch input methods for NavigationController

use glam::Vec2;

use super::NavigationController;
use crate::input::{GestureEvent, TouchEvent, TouchPoint};

// ── Touch entry points ──

impl NavigationController {
    /// Process a platform-agnostic touch event and apply the resulting
    /// gestures to the camera.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let _ = nav.handle_event(TouchEvent::Move(touches, now_ms));
    /// ```
    pub fn handle_event(&mut self, event: TouchEvent) -> Vec<GestureEvent> {
        let events = self.recognizer.handle_event(event);
        self.apply_gestures(&events);
        events
    }

    /// Fingers landed.
    pub fn touch_start(&mut self, touches: &[TouchPoint]) -> Vec<GestureEvent> {
        let events = self.recognizer.touch_start(touches);
        self.apply_gestures(&events);
        events
    }

    /// Fingers moved at `timestamp_ms`.
    pub fn touch_move(
        &mut self,
        touches: &[TouchPoint],
        timestamp_ms: f64,
    ) -> Vec<GestureEvent> {
        let events = self.recognizer.touch_move(touches, timestamp_ms);
        self.apply_gestures(&events);
        events
    }

    /// Fingers lifted.
    pub fn touch_end(&mut self, touches: &[TouchPoint]) -> Vec<GestureEvent> {
        let events = self.recognizer.touch_end(touches);
        self.apply_gestures(&events);
        events
    }

    /// Platform interruption. Abandons the gesture without emitting.
    pub fn touch_cancel(&mut self) {
        self.recognizer.touch_cancel();
        self.pinch_base_distance = None;
    }

    /// Drags orbit, pinches zoom relative to the distance at pinch start.
    /// Everything else is left to subscribers.
    pub(super) fn apply_gestures(&mut self, events: &[GestureEvent]) {
        for event in events {
            match *event {
                GestureEvent::Drag { dx, dy, .. } => {
                    let _ = self.rotate(Vec2::new(dx, dy));
                }
                GestureEvent::PinchStart { .. } => {
                    self.pinch_base_distance = Some(self.camera.distance());
                }
                GestureEvent::Pinch { scale, .. } => {
                    if let Some(base) = self.pinch_base_distance {
                        if scale > f32::EPSILON {
                            let _ = self.set_distance(base / scale);
                        }
                    }
                }
                GestureEvent::PinchEnd => self.pinch_base_distance = None,
                _ => {}
            }
        }
    }
}
