//! Navigation controller tying gestures to the orbit camera.

mod frame;
mod input;
mod options;

use glam::Vec2;

pub use self::frame::FrameOutput;
use crate::camera::{
    AnimateOptions, AnimationId, CameraAnimator, CameraPose, OrbitMapper,
    ViewState,
};
use crate::input::{GestureListener, GestureRecognizer, ListenerId};
use crate::options::Options;

/// Camera-owning navigation controller.
///
/// Wires the [`GestureRecognizer`] to the [`CameraAnimator`]: drags orbit
/// the camera, pinches change its distance, released drags coast with
/// momentum, and view changes play the configured transition presets. The
/// host forwards touch input and calls [`frame`](Self::frame) once per
/// rendered frame.
///
/// # Example
///
/// ```ignore
/// let mut nav = NavigationController::new(Options::default());
/// nav.set_home_position(nav.current_pose());
///
/// // Platform touch handlers:
/// let _ = nav.touch_start(&touches);
///
/// // Render loop:
/// let out = nav.frame(now_ms);
/// renderer.set_camera(out.pose);
/// if out.needs_redraw {
///     window.request_redraw();
/// }
/// ```
pub struct NavigationController {
    options: Options,
    recognizer: GestureRecognizer,
    camera: CameraAnimator,
    view: ViewState,
    /// Camera distance when the current pinch began.
    pinch_base_distance: Option<f32>,
    /// Host time of the previous [`frame`](Self::frame) call.
    last_frame_ms: Option<f64>,
    /// Name of the options preset last loaded or saved.
    active_preset: Option<String>,
}

impl NavigationController {
    /// Controller resting at `options.camera.initial_pose` in the
    /// overview. No home pose is recorded.
    #[must_use]
    pub fn new(options: Options) -> Self {
        let recognizer = GestureRecognizer::new(options.gesture.clone());
        let camera = CameraAnimator::new(
            options.camera.initial_pose,
            OrbitMapper::from_options(&options.camera),
        );
        Self {
            options,
            recognizer,
            camera,
            view: ViewState::default(),
            pinch_base_distance: None,
            last_frame_ms: None,
            active_preset: None,
        }
    }

    /// Options the controller was built with.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Pose the renderer should draw.
    #[must_use]
    pub fn current_pose(&self) -> CameraPose {
        self.camera.current_pose()
    }

    /// Current named view.
    #[must_use]
    pub fn view(&self) -> ViewState {
        self.view
    }

    /// Gesture recognizer.
    #[must_use]
    pub fn recognizer(&self) -> &GestureRecognizer {
        &self.recognizer
    }

    /// Camera animator.
    #[must_use]
    pub fn camera(&self) -> &CameraAnimator {
        &self.camera
    }

    /// Whether a view transition is playing.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.camera.is_animating()
    }

    /// Observe the gestures recognized by this controller.
    pub fn subscribe(
        &mut self,
        listener: impl GestureListener + 'static,
    ) -> ListenerId {
        self.recognizer.subscribe(listener)
    }

    /// Stop observing. Returns whether `id` was subscribed.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.recognizer.unsubscribe(id)
    }

    /// Record the pose [`reset`](Self::reset) returns to.
    pub fn set_home_position(&mut self, pose: CameraPose) {
        self.camera.set_home_position(pose);
    }

    /// Transition to `view`, landing on `target`, with the preset
    /// configured for the current view to `view`. The next
    /// [`frame`](Self::frame) call is the transition's first frame.
    pub fn go_to_view(
        &mut self,
        view: ViewState,
        target: CameraPose,
    ) -> AnimationId {
        let preset = self.options.transitions.preset(self.view, view);
        log::debug!(
            "view {:?} -> {view:?} over {:.0}ms",
            self.view,
            preset.duration_ms
        );
        self.view = view;
        self.last_frame_ms = None;
        self.camera.animate_to(target, preset.into())
    }

    /// Transition to an arbitrary pose without changing the named view.
    pub fn animate_to(
        &mut self,
        target: CameraPose,
        options: AnimateOptions,
    ) -> AnimationId {
        self.last_frame_ms = None;
        self.camera.animate_to(target, options)
    }

    /// Orbit by a drag delta at the current distance. Ignored while a
    /// transition plays.
    pub fn rotate(&mut self, delta: Vec2) -> bool {
        let distance = self.camera.distance();
        self.camera.update_rotation(delta, distance)
    }

    /// Move the camera to `distance` from its target, clamped to the
    /// configured limits. Ignored while a transition plays.
    pub fn set_distance(&mut self, distance: f32) -> bool {
        self.camera
            .update_distance(distance, self.options.camera.distance_limits())
    }

    /// Drop gestures and momentum, cancel any transition and return to the
    /// home pose (if recorded) in the overview.
    pub fn reset(&mut self) {
        self.recognizer.reset();
        self.camera.reset();
        self.view = ViewState::default();
        self.pinch_base_distance = None;
    }

    /// Release timers, momentum and the in-flight transition. The pose is
    /// left where it is. Safe to call repeatedly.
    pub fn dispose(&mut self) {
        self.recognizer.reset();
        let _ = self.camera.cancel_animation();
        self.pinch_base_distance = None;
        self.last_frame_ms = None;
    }
}

impl Default for NavigationController {
    fn default() -> Self {
        Self::new(Options::default())
    }
}

impl std::fmt::Debug for NavigationController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavigationController")
            .field("view", &self.view)
            .field("camera", &self.camera)
            .field("recognizer", &self.recognizer)
            .field("pinch_base_distance", &self.pinch_base_distance)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use glam::Vec3;

    use super::*;
    use crate::camera::SphericalCoords;
    use crate::input::{GestureEvent, GesturePhase, TouchPoint};

    fn controller() -> NavigationController {
        let mut options = Options::default();
        options.camera.initial_pose = CameraPose::facing(Vec3::ZERO, 100.0);
        NavigationController::new(options)
    }

    fn ring_pose() -> CameraPose {
        CameraPose::new(Vec3::new(0.0, 30.0, 40.0), Vec3::new(0.0, 5.0, 0.0))
    }

    fn touch(id: u64, x: f32, y: f32, t: f64) -> [TouchPoint; 1] {
        [TouchPoint::new(id, x, y, t)]
    }

    /// Drive frames every 16 ms from `start` through `end` inclusive.
    fn run_frames(
        nav: &mut NavigationController,
        start: f64,
        end: f64,
    ) -> Vec<FrameOutput> {
        let mut out = Vec::new();
        let mut t = start;
        while t <= end {
            out.push(nav.frame(t));
            t += 16.0;
        }
        out
    }

    #[test]
    fn drag_orbits_at_constant_distance() {
        let mut nav = controller();
        let before = SphericalCoords::from_offset(nav.current_pose().offset());

        let _ = nav.touch_start(&touch(0, 100.0, 100.0, 0.0));
        let _ = nav.touch_move(&touch(0, 140.0, 100.0, 16.0), 16.0);
        let pose = nav.current_pose();
        let after = SphericalCoords::from_offset(pose.offset());

        // Whole 40 px delta applied once the drag is recognized
        assert!((after.azimuth - (before.azimuth - 40.0 * 0.005)).abs() < 1e-4);
        assert!((after.polar - before.polar).abs() < 1e-4);
        assert!((pose.distance() - 100.0).abs() < 1e-3);
        assert_eq!(pose.look_at, Vec3::ZERO);
    }

    #[test]
    fn pinch_divides_distance_by_scale() {
        let mut nav = controller();
        let _ = nav.touch_start(&touch(0, 100.0, 100.0, 0.0));
        let _ = nav.touch_start(&touch(1, 200.0, 100.0, 10.0));
        let spread = [
            TouchPoint::new(0, 50.0, 100.0, 0.0),
            TouchPoint::new(1, 250.0, 100.0, 0.0),
        ];
        let _ = nav.touch_move(&spread, 30.0);
        assert!((nav.current_pose().distance() - 50.0).abs() < 1e-3);

        // Relative to the distance at pinch start, not cumulative
        let wider = [
            TouchPoint::new(0, 0.0, 100.0, 0.0),
            TouchPoint::new(1, 400.0, 100.0, 0.0),
        ];
        let _ = nav.touch_move(&wider, 50.0);
        assert!((nav.current_pose().distance() - 25.0).abs() < 1e-3);
    }

    #[test]
    fn pinch_distance_is_clamped() {
        let mut nav = controller();
        let _ = nav.touch_start(&[
            TouchPoint::new(0, 0.0, 0.0, 0.0),
            TouchPoint::new(1, 10.0, 0.0, 0.0),
        ]);
        let spread = [
            TouchPoint::new(0, 0.0, 0.0, 0.0),
            TouchPoint::new(1, 1000.0, 0.0, 0.0),
        ];
        let _ = nav.touch_move(&spread, 16.0);
        assert!((nav.current_pose().distance() - 5.0).abs() < 1e-3);

        let pinched = [
            TouchPoint::new(0, 0.0, 0.0, 0.0),
            TouchPoint::new(1, 1.0, 0.0, 0.0),
        ];
        let _ = nav.touch_move(&pinched, 32.0);
        assert!((nav.current_pose().distance() - 200.0).abs() < 1e-3);
    }

    #[test]
    fn view_transition_lands_exactly_at_preset_duration() {
        let mut nav = controller();
        let done = Rc::new(Cell::new(false));
        let _ = nav.frame(0.0);
        let _ = nav.go_to_view(ViewState::Ring, ring_pose());
        assert_eq!(nav.view(), ViewState::Ring);

        let frames = run_frames(&mut nav, 16.0, 416.0);
        let last = frames.last().and_then(|f| f.animation).unwrap();
        assert!(last.completed);
        assert_eq!(last.progress, 1.0);
        assert_eq!(nav.current_pose(), ring_pose());
        assert!(!frames.last().unwrap().needs_redraw);
        // Every earlier frame was mid-flight
        assert!(frames[..frames.len() - 1]
            .iter()
            .all(|f| f.needs_redraw && f.animation.is_some_and(|a| !a.completed)));

        let flag = Rc::clone(&done);
        let _ = nav.animate_to(
            CameraPose::facing(Vec3::ZERO, 80.0),
            AnimateOptions::new(32.0, crate::util::easing::EasingFunction::Linear)
                .on_complete(move || flag.set(true)),
        );
        let _ = run_frames(&mut nav, 432.0, 464.0);
        assert!(done.get());
        assert_eq!(nav.view(), ViewState::Ring);
    }

    #[test]
    fn transition_after_idle_gap_starts_from_its_first_frame() {
        let mut nav = controller();
        assert!(!nav.frame(0.0).needs_redraw);

        let _ = nav.go_to_view(ViewState::Ring, ring_pose());
        let first = nav.frame(10_000.0).animation.unwrap();
        assert!(!first.completed);
        assert_eq!(first.progress, 0.0);

        let second = nav.frame(10_016.0).animation.unwrap();
        assert!(!second.completed);
        assert!((second.progress - 16.0 / 400.0).abs() < 1e-6);

        let frames = run_frames(&mut nav, 10_032.0, 10_400.0);
        assert!(frames.last().and_then(|f| f.animation).unwrap().completed);
        assert_eq!(nav.current_pose(), ring_pose());
    }

    #[test]
    fn gestures_are_ignored_while_animating() {
        let mut nav = controller();
        let _ = nav.frame(0.0);
        let _ = nav.go_to_view(ViewState::Ring, ring_pose());
        let _ = nav.frame(16.0);
        let mid = nav.current_pose();

        let _ = nav.touch_start(&touch(0, 0.0, 0.0, 20.0));
        let _ = nav.touch_move(&touch(0, 80.0, 0.0, 30.0), 30.0);
        assert_eq!(nav.current_pose(), mid);
        assert!(!nav.rotate(Vec2::new(10.0, 0.0)));
        assert!(!nav.set_distance(10.0));
    }

    #[test]
    fn momentum_coasts_after_release_until_rest() {
        let mut nav = controller();
        let _ = nav.frame(0.0);
        let _ = nav.touch_start(&touch(0, 0.0, 0.0, 0.0));
        let _ = nav.touch_move(&touch(0, 30.0, 0.0, 16.0), 16.0);
        let _ = nav.touch_end(&touch(0, 30.0, 0.0, 20.0));
        let released = nav.current_pose();

        let first = nav.frame(32.0);
        assert!(first.momentum.is_some());
        assert!(first.needs_redraw);
        assert_ne!(first.pose, released);

        let frames = run_frames(&mut nav, 48.0, 5000.0);
        let rest = frames.iter().position(|f| f.momentum.is_none()).unwrap();
        assert!(!frames[rest].needs_redraw);
        let settled = frames[rest].pose;
        assert!(frames[rest..].iter().all(|f| f.pose == settled));
        assert!((settled.distance() - 100.0).abs() < 1e-3);
    }

    #[test]
    fn frame_fires_long_press() {
        let mut nav = controller();
        let presses = Rc::new(Cell::new(0));
        let sink = Rc::clone(&presses);
        let _ = nav.subscribe(crate::input::EventFn(move |e: &GestureEvent| {
            if matches!(e, GestureEvent::LongPress { .. }) {
                sink.set(sink.get() + 1);
            }
        }));

        let _ = nav.touch_start(&touch(0, 100.0, 100.0, 0.0));
        let _ = nav.touch_move(&touch(0, 100.0, 100.0, 100.0), 100.0);
        assert!(nav.frame(400.0).needs_redraw);
        let out = nav.frame(500.0);
        assert_eq!(out.gestures, vec![GestureEvent::LongPress { x: 100.0, y: 100.0 }]);
        assert_eq!(presses.get(), 1);

        let _ = nav.touch_end(&touch(0, 100.0, 100.0, 600.0));
        let _ = nav.frame(2000.0);
        assert_eq!(presses.get(), 1);
    }

    #[test]
    fn reset_returns_home_and_dispose_is_idempotent() {
        let mut nav = controller();
        let home = nav.current_pose();
        nav.set_home_position(home);
        let _ = nav.go_to_view(ViewState::Contact, ring_pose());
        let _ = nav.touch_start(&touch(0, 0.0, 0.0, 0.0));

        nav.reset();
        assert_eq!(nav.current_pose(), home);
        assert_eq!(nav.view(), ViewState::Overview);
        assert!(!nav.is_animating());
        assert_eq!(nav.recognizer().phase(), GesturePhase::Idle);

        let _ = nav.go_to_view(ViewState::Ring, ring_pose());
        nav.dispose();
        nav.dispose();
        assert!(!nav.is_animating());
        assert!(nav.recognizer().next_deadline().is_none());
        assert!(!nav.frame(100.0).needs_redraw);
    }

    #[test]
    fn reset_without_home_keeps_pose() {
        let mut nav = controller();
        assert!(nav.rotate(Vec2::new(100.0, 0.0)));
        let moved = nav.current_pose();
        nav.reset();
        assert_eq!(nav.current_pose(), moved);
    }
}
