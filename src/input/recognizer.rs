//! Converts raw touch samples into gestures.
//!
//! The `GestureRecognizer` owns all transient touch state (active fingers,
//! the [`GestureState`], timers, momentum and double-tap memory) and the
//! listener list. Every entry point first fires timers that came due at or
//! before the sample's timestamp, so a host that forgets to call
//! [`advance`](GestureRecognizer::advance) still sees long presses and
//! confirmed taps in the right order.

use glam::Vec2;
use rustc_hash::FxHashMap;

use super::event::{TouchEvent, TouchId, TouchPoint};
use super::gesture::GestureEvent;
use super::listener::{GestureCallbacks, GestureListener, ListenerId, Listeners};
use super::momentum::Momentum;
use super::state::{
    transition, GesturePhase, GestureState, Signal, StepContext, TapMemory,
};
use super::timer::{ScheduledTimer, TimerQueue};
use crate::options::GestureOptions;

/// Touch gesture recognizer.
///
/// # Usage
///
/// ```ignore
/// let mut recognizer = GestureRecognizer::new(GestureOptions::default());
/// let _ = recognizer.subscribe(EventFn(|e: &GestureEvent| log::info!("{e:?}")));
///
/// // From the platform's touch handlers:
/// let _ = recognizer.touch_start(&[TouchPoint::new(0, 10.0, 10.0, now)]);
///
/// // Once per frame:
/// let _ = recognizer.advance(now);
/// if let Some(velocity) = recognizer.update() {
///     camera.rotate(velocity);
/// }
/// ```
pub struct GestureRecognizer {
    options: GestureOptions,
    state: GestureState,
    /// Fingers currently on the surface, by id.
    active: FxHashMap<TouchId, TouchPoint>,
    timers: TimerQueue,
    momentum: Momentum,
    memory: TapMemory,
    listeners: Listeners,
}

impl GestureRecognizer {
    /// Create a recognizer with no listeners.
    #[must_use]
    pub fn new(options: GestureOptions) -> Self {
        let momentum = Momentum::from_options(&options);
        Self {
            options,
            state: GestureState::Idle,
            active: FxHashMap::default(),
            timers: TimerQueue::new(),
            momentum,
            memory: TapMemory::default(),
            listeners: Listeners::default(),
        }
    }

    /// Create a recognizer with one closure-based listener.
    #[must_use]
    pub fn with_callbacks(
        options: GestureOptions,
        callbacks: GestureCallbacks,
    ) -> Self {
        let mut recognizer = Self::new(options);
        let _ = recognizer.subscribe(callbacks);
        recognizer
    }

    /// Add a listener.
    pub fn subscribe(
        &mut self,
        listener: impl GestureListener + 'static,
    ) -> ListenerId {
        self.listeners.subscribe(listener)
    }

    /// Remove a listener. Returns whether it was subscribed.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    /// Thresholds in use.
    #[must_use]
    pub fn options(&self) -> &GestureOptions {
        &self.options
    }

    /// Replace thresholds. Any gesture in progress is abandoned.
    pub fn set_options(&mut self, options: GestureOptions) {
        self.momentum = Momentum::from_options(&options);
        self.options = options;
        self.reset();
    }

    /// Current state, with its tracking data.
    #[must_use]
    pub fn state(&self) -> &GestureState {
        &self.state
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> GesturePhase {
        self.state.phase()
    }

    /// Latest drag velocity estimate, or the decaying momentum after
    /// release.
    #[must_use]
    pub fn velocity(&self) -> Vec2 {
        self.momentum.velocity()
    }

    /// Number of fingers on the surface.
    #[must_use]
    pub fn active_touches(&self) -> usize {
        self.active.len()
    }

    /// Timers waiting to fire.
    pub fn pending_timers(&self) -> impl Iterator<Item = &ScheduledTimer> {
        self.timers.iter()
    }

    /// Earliest pending timer deadline, for hosts that sleep between
    /// frames.
    #[must_use]
    pub fn next_deadline(&self) -> Option<f64> {
        self.timers.next_deadline()
    }

    // ─────────────────────────────────────────────────────────────────────
    // Touch entry points
    // ─────────────────────────────────────────────────────────────────────

    /// Process a platform-agnostic touch event.
    pub fn handle_event(&mut self, event: TouchEvent) -> Vec<GestureEvent> {
        match event {
            TouchEvent::Start(touches) => self.touch_start(&touches),
            TouchEvent::Move(touches, timestamp_ms) => {
                self.touch_move(&touches, timestamp_ms)
            }
            TouchEvent::End(touches) => self.touch_end(&touches),
            TouchEvent::Cancel => {
                self.touch_cancel();
                Vec::new()
            }
        }
    }

    /// Fingers landed.
    pub fn touch_start(&mut self, touches: &[TouchPoint]) -> Vec<GestureEvent> {
        let Some(now) = latest_timestamp(touches) else {
            log::trace!("touch_start with no touches");
            return Vec::new();
        };
        let mut events = Vec::new();
        self.fire_due(now, &mut events);

        for touch in touches {
            let _ = self.active.insert(touch.id, *touch);
        }

        if self.active.len() == 1 {
            if let Some(first) = touches.first() {
                self.apply(Signal::Down(*first), &mut events);
            }
        } else if self.phase() != GesturePhase::Pinching {
            if let Some((first, second)) = self.pinch_pair(touches) {
                self.apply(Signal::SecondDown { first, second }, &mut events);
            }
        }

        self.emit(events)
    }

    /// Fingers moved. `timestamp_ms` applies to every sample in `touches`.
    pub fn touch_move(
        &mut self,
        touches: &[TouchPoint],
        timestamp_ms: f64,
    ) -> Vec<GestureEvent> {
        if touches.is_empty() {
            log::trace!("touch_move with no touches");
            return Vec::new();
        }
        let mut events = Vec::new();
        self.fire_due(timestamp_ms, &mut events);

        for touch in touches {
            if let Some(slot) = self.active.get_mut(&touch.id) {
                *slot = TouchPoint {
                    timestamp_ms,
                    ..*touch
                };
            }
        }

        if let Some(id) = self.state.single_touch() {
            if let Some(touch) = self.active.get(&id).copied() {
                if touches.iter().any(|t| t.id == id) {
                    self.apply(Signal::Move(touch), &mut events);
                }
            }
        } else if let Some([a, b]) = self.state.pinch_touches() {
            let moved = touches.iter().any(|t| t.id == a || t.id == b);
            if let (true, Some(first), Some(second)) =
                (moved, self.active.get(&a), self.active.get(&b))
            {
                let signal = Signal::PinchMove {
                    first: first.position(),
                    second: second.position(),
                };
                self.apply(signal, &mut events);
            }
        }

        self.emit(events)
    }

    /// Fingers lifted. Each sample carries its own lift-off position.
    pub fn touch_end(&mut self, touches: &[TouchPoint]) -> Vec<GestureEvent> {
        let Some(now) = latest_timestamp(touches) else {
            log::trace!("touch_end with no touches");
            return Vec::new();
        };
        let mut events = Vec::new();
        self.fire_due(now, &mut events);

        for touch in touches {
            if self.active.remove(&touch.id).is_none() {
                log::trace!("lift of unknown touch {}", touch.id);
                continue;
            }
            if self.state.tracks(touch.id) {
                self.apply(Signal::Up(*touch), &mut events);
            }
        }

        self.emit(events)
    }

    /// Platform interruption. Abandons everything without emitting.
    pub fn touch_cancel(&mut self) {
        let mut events = Vec::new();
        self.apply(Signal::Cancel, &mut events);
        self.active.clear();
        debug_assert!(events.is_empty());
    }

    // ─────────────────────────────────────────────────────────────────────
    // Per-frame
    // ─────────────────────────────────────────────────────────────────────

    /// Fire every timer due at or before `now_ms`.
    pub fn advance(&mut self, now_ms: f64) -> Vec<GestureEvent> {
        let mut events = Vec::new();
        self.fire_due(now_ms, &mut events);
        self.emit(events)
    }

    /// One frame of momentum decay. Only runs while no gesture is in
    /// progress; returns the decayed velocity, or `None` at rest.
    pub fn update(&mut self) -> Option<Vec2> {
        if self.phase() != GesturePhase::Idle {
            return None;
        }
        self.momentum.step()
    }

    /// Drop all gesture state, timers and momentum. Listeners stay
    /// subscribed. Safe to call repeatedly.
    pub fn reset(&mut self) {
        self.state = GestureState::Idle;
        self.active.clear();
        self.timers.cancel_all();
        self.momentum.stop();
        self.memory = TapMemory::default();
    }

    // ─────────────────────────────────────────────────────────────────────
    // Internals
    // ─────────────────────────────────────────────────────────────────────

    fn apply(&mut self, signal: Signal, events: &mut Vec<GestureEvent>) {
        let state = std::mem::take(&mut self.state);
        let before = state.phase();
        let mut ctx = StepContext {
            options: &self.options,
            timers: &mut self.timers,
            momentum: &mut self.momentum,
            memory: &mut self.memory,
        };
        let (next, emitted) = transition(state, signal, &mut ctx);
        if next.phase() != before {
            log::debug!("gesture {before:?} -> {:?}", next.phase());
        }
        self.state = next;
        events.extend(emitted);
    }

    fn fire_due(&mut self, now_ms: f64, events: &mut Vec<GestureEvent>) {
        while let Some(timer) = self.timers.pop_due(now_ms) {
            self.apply(Signal::Timer(timer), events);
        }
    }

    fn emit(&mut self, events: Vec<GestureEvent>) -> Vec<GestureEvent> {
        if !events.is_empty() {
            self.listeners.dispatch(&events);
        }
        events
    }

    /// The finger already down plus the newly landed one. Falls back to
    /// the lowest ids so the pairing is deterministic.
    fn pinch_pair(
        &self,
        landed: &[TouchPoint],
    ) -> Option<(TouchPoint, TouchPoint)> {
        let first_id = self
            .state
            .single_touch()
            .filter(|id| self.active.contains_key(id))
            .or_else(|| self.active.keys().min().copied())?;
        let second_id = landed
            .iter()
            .map(|t| t.id)
            .find(|id| *id != first_id && self.active.contains_key(id))
            .or_else(|| {
                self.active.keys().filter(|id| **id != first_id).min().copied()
            })?;
        Some((
            *self.active.get(&first_id)?,
            *self.active.get(&second_id)?,
        ))
    }
}

impl Default for GestureRecognizer {
    fn default() -> Self {
        Self::new(GestureOptions::default())
    }
}

impl std::fmt::Debug for GestureRecognizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GestureRecognizer")
            .field("state", &self.state)
            .field("active", &self.active.len())
            .field("timers", &self.timers.len())
            .field("velocity", &self.momentum.velocity())
            .field("listeners", &self.listeners)
            .finish_non_exhaustive()
    }
}

fn latest_timestamp(touches: &[TouchPoint]) -> Option<f64> {
    touches
        .iter()
        .map(|t| t.timestamp_ms)
        .max_by(f64::total_cmp)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;
    use crate::input::listener::EventFn;

    /// Drives a recognizer and records every event it returns.
    struct Session {
        rec: GestureRecognizer,
        events: Vec<GestureEvent>,
    }

    impl Session {
        fn new() -> Self {
            Self::with_options(GestureOptions::default())
        }

        fn with_options(options: GestureOptions) -> Self {
            Self {
                rec: GestureRecognizer::new(options),
                events: Vec::new(),
            }
        }

        fn down(&mut self, id: TouchId, x: f32, y: f32, t: f64) -> &mut Self {
            let out = self.rec.touch_start(&[TouchPoint::new(id, x, y, t)]);
            self.events.extend(out);
            self
        }

        fn drag(&mut self, id: TouchId, x: f32, y: f32, t: f64) -> &mut Self {
            let out = self.rec.touch_move(&[TouchPoint::new(id, x, y, t)], t);
            self.events.extend(out);
            self
        }

        fn up(&mut self, id: TouchId, x: f32, y: f32, t: f64) -> &mut Self {
            let out = self.rec.touch_end(&[TouchPoint::new(id, x, y, t)]);
            self.events.extend(out);
            self
        }

        fn wait(&mut self, t: f64) -> &mut Self {
            let out = self.rec.advance(t);
            self.events.extend(out);
            self
        }

        fn tap(&mut self, x: f32, y: f32, t: f64) -> &mut Self {
            self.down(0, x, y, t).up(0, x, y, t + 80.0)
        }

        fn count(&self, name: &str) -> usize {
            self.events.iter().filter(|e| e.name() == name).count()
        }

        fn names(&self) -> Vec<&'static str> {
            self.events.iter().map(GestureEvent::name).collect()
        }
    }

    #[test]
    fn short_touch_is_one_tap_after_window() {
        let mut s = Session::new();
        let _ = s.down(0, 100.0, 100.0, 0.0).up(0, 103.0, 102.0, 120.0);
        // Deferred until the double-tap window closes
        assert!(s.events.is_empty());
        let _ = s.wait(419.0);
        assert!(s.events.is_empty());
        let _ = s.wait(420.0);
        assert_eq!(s.events, vec![GestureEvent::Tap { x: 103.0, y: 102.0 }]);
        assert_eq!(s.rec.pending_timers().count(), 0);
    }

    #[test]
    fn immediate_tap_without_deferral() {
        let options = GestureOptions {
            defer_single_tap: false,
            ..GestureOptions::default()
        };
        let mut s = Session::with_options(options);
        let _ = s.tap(50.0, 50.0, 0.0);
        assert_eq!(s.names(), vec!["tap"]);
    }

    #[test]
    fn drag_sequence_has_no_tap() {
        let mut s = Session::new();
        let _ = s.down(0, 0.0, 0.0, 0.0);
        for i in 1..=10 {
            let _ = s.drag(0, i as f32 * 4.0, 0.0, f64::from(i) * 16.0);
        }
        let _ = s.up(0, 40.0, 0.0, 176.0).wait(2000.0);

        assert_eq!(s.count("drag_start"), 1);
        assert_eq!(s.count("drag_end"), 1);
        assert_eq!(s.count("tap"), 0);
        assert_eq!(s.count("long_press"), 0);
        // Start emitted before the first drag at the point where the
        // threshold was crossed (4 + 4 + 4 = 12 px)
        assert_eq!(s.events[0], GestureEvent::DragStart { x: 12.0, y: 0.0 });
        assert_eq!(s.names()[1], "drag");
        assert_eq!(s.names().last(), Some(&"drag_end"));
    }

    #[test]
    fn drag_deltas_sum_to_displacement_after_start() {
        let mut s = Session::new();
        let _ = s
            .down(0, 0.0, 0.0, 0.0)
            .drag(0, 20.0, 0.0, 16.0)
            .drag(0, 25.0, 5.0, 32.0)
            .drag(0, 25.0, 15.0, 48.0);
        let (dx, dy) = s.events.iter().fold((0.0, 0.0), |acc, e| match e {
            GestureEvent::Drag { dx, dy, .. } => (acc.0 + dx, acc.1 + dy),
            _ => acc,
        });
        assert_eq!((dx, dy), (25.0, 15.0));
    }

    #[test]
    fn two_quick_taps_are_one_double_tap() {
        let mut s = Session::new();
        let _ = s.tap(100.0, 100.0, 0.0).tap(105.0, 98.0, 200.0).wait(2000.0);
        assert_eq!(s.events, vec![GestureEvent::DoubleTap { x: 105.0, y: 98.0 }]);
    }

    #[test]
    fn third_tap_starts_a_new_sequence() {
        let mut s = Session::new();
        let _ = s
            .tap(10.0, 10.0, 0.0)
            .tap(10.0, 10.0, 150.0)
            .tap(10.0, 10.0, 300.0)
            .wait(2000.0);
        assert_eq!(s.names(), vec!["double_tap", "tap"]);
    }

    #[test]
    fn distant_or_slow_taps_stay_single() {
        let mut far = Session::new();
        let _ = far.tap(0.0, 0.0, 0.0).tap(100.0, 0.0, 150.0).wait(2000.0);
        assert_eq!(far.names(), vec!["tap", "tap"]);
        // First tap reported as soon as the second rules out a pair
        assert_eq!(far.events[0], GestureEvent::Tap { x: 0.0, y: 0.0 });

        let mut slow = Session::new();
        let _ = slow.tap(0.0, 0.0, 0.0).tap(0.0, 0.0, 500.0).wait(2000.0);
        assert_eq!(slow.names(), vec!["tap", "tap"]);
    }

    #[test]
    fn long_press_then_lift_has_no_tap() {
        let mut s = Session::new();
        let _ = s.down(0, 100.0, 100.0, 0.0).drag(0, 100.0, 100.0, 100.0);
        assert!(s.events.is_empty());

        let _ = s.wait(500.0);
        assert_eq!(
            s.events,
            vec![GestureEvent::LongPress { x: 100.0, y: 100.0 }]
        );

        let _ = s.up(0, 100.0, 100.0, 600.0).wait(2000.0);
        assert_eq!(s.names(), vec!["long_press"]);
    }

    #[test]
    fn late_lift_fires_overdue_long_press_first() {
        let mut s = Session::new();
        let _ = s.down(0, 20.0, 20.0, 0.0).up(0, 20.0, 20.0, 700.0);
        assert_eq!(s.names(), vec!["long_press"]);
    }

    #[test]
    fn drag_cancels_long_press() {
        let mut s = Session::new();
        let _ = s.down(0, 0.0, 0.0, 0.0).drag(0, 30.0, 0.0, 100.0).wait(1000.0);
        assert_eq!(s.count("long_press"), 0);
        assert_eq!(s.rec.phase(), GesturePhase::Dragging);
    }

    #[test]
    fn fast_drag_velocity_is_capped() {
        let mut s = Session::new();
        let _ = s.down(0, 0.0, 0.0, 0.0);
        for i in 1..=5 {
            let _ = s.drag(0, i as f32 * 900.0, i as f32 * 700.0, f64::from(i));
        }
        let _ = s.up(0, 4500.0, 3500.0, 6.0);
        for event in &s.events {
            match event {
                GestureEvent::Drag { velocity, .. }
                | GestureEvent::DragEnd { velocity } => {
                    assert!(velocity.length() <= 180.0 + 1e-3);
                }
                _ => {}
            }
        }
        assert!((s.rec.velocity().length() - 180.0).abs() < 1e-3);
    }

    #[test]
    fn momentum_decays_only_when_idle() {
        let mut s = Session::new();
        let _ = s
            .down(0, 0.0, 0.0, 0.0)
            .drag(0, 40.0, 0.0, 16.0)
            .drag(0, 80.0, 0.0, 32.0);
        assert!(s.rec.update().is_none());
        assert_eq!(s.rec.velocity(), Vec2::new(40.0, 0.0));

        let _ = s.up(0, 80.0, 0.0, 40.0);
        let mut speed = s.rec.velocity().length();
        let mut frames = 0;
        while let Some(v) = s.rec.update() {
            assert!(v.length() < speed);
            speed = v.length();
            frames += 1;
        }
        assert!(frames > 0);
        assert_eq!(s.rec.velocity(), Vec2::ZERO);
    }

    #[test]
    fn new_touch_stops_momentum() {
        let mut s = Session::new();
        let _ = s
            .down(0, 0.0, 0.0, 0.0)
            .drag(0, 50.0, 0.0, 16.0)
            .up(0, 50.0, 0.0, 20.0);
        assert_ne!(s.rec.velocity(), Vec2::ZERO);
        let _ = s.down(1, 200.0, 200.0, 100.0);
        assert_eq!(s.rec.velocity(), Vec2::ZERO);
    }

    #[test]
    fn pinch_lifecycle() {
        let mut s = Session::new();
        let _ = s.down(0, 100.0, 100.0, 0.0).down(1, 200.0, 100.0, 50.0);
        assert_eq!(s.rec.phase(), GesturePhase::Pinching);
        assert_eq!(
            s.events,
            vec![GestureEvent::PinchStart {
                center: Vec2::new(150.0, 100.0),
                distance: 100.0,
            }]
        );

        let moved = [
            TouchPoint::new(0, 50.0, 100.0, 0.0),
            TouchPoint::new(1, 250.0, 100.0, 0.0),
        ];
        let out = s.rec.touch_move(&moved, 80.0);
        assert_eq!(
            out,
            vec![GestureEvent::Pinch {
                center: Vec2::new(150.0, 100.0),
                distance: 200.0,
                scale: 2.0,
            }]
        );
        s.events.extend(out);

        let _ = s.up(1, 250.0, 100.0, 120.0);
        assert_eq!(s.names().last(), Some(&"pinch_end"));
        assert_eq!(s.rec.phase(), GesturePhase::Idle);

        // Remaining finger neither drags nor taps, and no long press fires
        let _ = s.drag(0, 0.0, 100.0, 140.0).up(0, 0.0, 100.0, 160.0);
        let _ = s.wait(5000.0);
        assert_eq!(s.names(), vec!["pinch_start", "pinch", "pinch_end"]);
    }

    #[test]
    fn second_finger_during_drag_switches_to_pinch() {
        let mut s = Session::new();
        let _ = s
            .down(0, 0.0, 0.0, 0.0)
            .drag(0, 30.0, 0.0, 16.0)
            .down(1, 130.0, 0.0, 32.0);
        assert_eq!(s.names(), vec!["drag_start", "drag", "pinch_start"]);
        assert_eq!(s.rec.velocity(), Vec2::ZERO);
    }

    #[test]
    fn simultaneous_fingers_start_a_pinch() {
        let mut s = Session::new();
        let out = s.rec.touch_start(&[
            TouchPoint::new(3, 0.0, 0.0, 0.0),
            TouchPoint::new(4, 0.0, 40.0, 0.0),
        ]);
        assert_eq!(out.len(), 1);
        assert!(matches!(out[0], GestureEvent::PinchStart { distance, .. } if distance == 40.0));
    }

    #[test]
    fn cancel_is_silent_and_clears_everything() {
        let mut s = Session::new();
        let _ = s
            .tap(0.0, 0.0, 0.0)
            .down(0, 0.0, 0.0, 100.0)
            .drag(0, 50.0, 0.0, 116.0);
        let before = s.events.len();

        s.rec.touch_cancel();
        let _ = s.wait(5000.0);
        assert_eq!(s.events.len(), before);
        assert_eq!(s.rec.phase(), GesturePhase::Idle);
        assert_eq!(s.rec.velocity(), Vec2::ZERO);
        assert_eq!(s.rec.active_touches(), 0);
        assert!(s.rec.next_deadline().is_none());
        assert!(s.rec.update().is_none());
    }

    #[test]
    fn cancel_via_event_drops_pending_tap() {
        let mut s = Session::new();
        let _ = s.tap(0.0, 0.0, 0.0);
        assert!(s.rec.handle_event(TouchEvent::Cancel).is_empty());
        let _ = s.wait(1000.0);
        assert!(s.events.is_empty());
    }

    #[test]
    fn empty_arrays_are_ignored() {
        let mut rec = GestureRecognizer::default();
        assert!(rec.touch_start(&[]).is_empty());
        assert!(rec.touch_move(&[], 10.0).is_empty());
        assert!(rec.touch_end(&[]).is_empty());
        assert_eq!(rec.phase(), GesturePhase::Idle);
        assert!(rec.next_deadline().is_none());
    }

    #[test]
    fn reset_is_idempotent() {
        let mut s = Session::new();
        let _ = s.down(0, 0.0, 0.0, 0.0);
        assert!(s.rec.next_deadline().is_some());
        s.rec.reset();
        s.rec.reset();
        assert_eq!(s.rec.phase(), GesturePhase::Idle);
        assert!(s.rec.next_deadline().is_none());
        let _ = s.wait(1000.0);
        assert!(s.events.is_empty());
    }

    #[test]
    fn set_options_applies_new_thresholds() {
        let mut s = Session::new();
        let _ = s.down(0, 0.0, 0.0, 0.0);
        s.rec.set_options(GestureOptions {
            tap_max_distance: 40.0,
            defer_single_tap: false,
            ..GestureOptions::default()
        });
        assert_eq!(s.rec.phase(), GesturePhase::Idle);
        assert_eq!(s.rec.active_touches(), 0);

        // 30 px of movement is now still a tap
        let _ = s.down(0, 0.0, 0.0, 100.0).drag(0, 30.0, 0.0, 150.0);
        let _ = s.up(0, 30.0, 0.0, 200.0);
        assert_eq!(s.names(), vec!["tap"]);
    }

    #[test]
    fn listeners_see_returned_events() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let taps = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&seen);
        let tap_sink = Rc::clone(&taps);

        let mut rec = GestureRecognizer::with_callbacks(
            GestureOptions::default(),
            GestureCallbacks::default().on_tap(move |_, _| {
                *tap_sink.borrow_mut() += 1;
            }),
        );
        let id = rec.subscribe(EventFn(move |e: &GestureEvent| {
            sink.borrow_mut().push(*e);
        }));

        let mut returned = rec.touch_start(&[TouchPoint::new(0, 5.0, 5.0, 0.0)]);
        returned.extend(rec.touch_end(&[TouchPoint::new(0, 5.0, 5.0, 50.0)]));
        returned.extend(rec.advance(400.0));
        assert_eq!(*seen.borrow(), returned);
        assert_eq!(*taps.borrow(), 1);

        assert!(rec.unsubscribe(id));
        let _ = rec.touch_start(&[TouchPoint::new(0, 5.0, 5.0, 1000.0)]);
        let _ = rec.touch_end(&[TouchPoint::new(0, 5.0, 5.0, 1050.0)]);
        let _ = rec.advance(2000.0);
        assert_eq!(seen.borrow().len(), 1);
        assert_eq!(*taps.borrow(), 2);
    }

    #[test]
    fn random_short_touches_yield_exactly_one_tap() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let mut s = Session::new();
            let (x, y) = (rng.random_range(0.0..800.0), rng.random_range(0.0..600.0));
            let duration = rng.random_range(10.0..450.0);
            // Stays inside the slop by both measures
            let jx = rng.random_range(-3.0..3.0);
            let jy = rng.random_range(-3.0..3.0);
            let _ = s
                .down(0, x, y, 0.0)
                .drag(0, x + jx, y + jy, duration / 2.0)
                .up(0, x + jx, y + jy, duration)
                .wait(duration + 1000.0);
            assert_eq!(s.names(), vec!["tap"], "touch at ({x},{y}) for {duration}ms");
        }
    }

    #[test]
    fn random_drags_never_tap_and_respect_cap() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..100 {
            let mut s = Session::new();
            let mut pos = Vec2::new(400.0, 300.0);
            let mut t = 0.0;
            let _ = s.down(0, pos.x, pos.y, t);
            // First step alone leaves the slop
            pos += Vec2::new(15.0, 0.0);
            for _ in 0..20 {
                t += rng.random_range(1.0..32.0);
                let _ = s.drag(0, pos.x, pos.y, t);
                pos += Vec2::new(
                    rng.random_range(-60.0..60.0),
                    rng.random_range(-60.0..60.0),
                );
            }
            let _ = s.up(0, pos.x, pos.y, t + 5.0).wait(t + 2000.0);

            assert_eq!(s.count("tap") + s.count("double_tap"), 0);
            assert_eq!(s.count("drag_start"), 1);
            assert_eq!(s.count("drag_end"), 1);
            for event in &s.events {
                if let GestureEvent::Drag { velocity, .. } = event {
                    assert!(velocity.length() <= 180.0 + 1e-3);
                }
            }
        }
    }
}
