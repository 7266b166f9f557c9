//! Gesture subscription and dispatch.
//!
//! Any number of listeners can observe the same gesture stream. Each one
//! implements only the callbacks it cares about; the rest default to
//! no-ops. [`GestureCallbacks`] covers the common case of plugging in a few
//! closures.

use std::fmt;

use glam::Vec2;

use super::gesture::GestureEvent;

/// Receives gestures from a [`GestureRecognizer`](super::GestureRecognizer).
///
/// Override [`on_event`](Self::on_event) to see every event in one place, or
/// the per-kind methods to handle specific gestures.
pub trait GestureListener {
    /// Route an event to its per-kind method.
    fn on_event(&mut self, event: &GestureEvent) {
        match *event {
            GestureEvent::Tap { x, y } => self.on_tap(x, y),
            GestureEvent::DoubleTap { x, y } => self.on_double_tap(x, y),
            GestureEvent::LongPress { x, y } => self.on_long_press(x, y),
            GestureEvent::DragStart { x, y } => self.on_drag_start(x, y),
            GestureEvent::Drag {
                dx,
                dy,
                x,
                y,
                velocity,
            } => self.on_drag(Vec2::new(dx, dy), Vec2::new(x, y), velocity),
            GestureEvent::DragEnd { velocity } => self.on_drag_end(velocity),
            GestureEvent::PinchStart { center, distance } => {
                self.on_pinch_start(center, distance);
            }
            GestureEvent::Pinch {
                center,
                distance,
                scale,
            } => self.on_pinch(center, distance, scale),
            GestureEvent::PinchEnd => self.on_pinch_end(),
        }
    }

    /// Single tap at lift-off position.
    fn on_tap(&mut self, _x: f32, _y: f32) {}
    /// Double tap at the second tap's position.
    fn on_double_tap(&mut self, _x: f32, _y: f32) {}
    /// Long press at the touch-down position.
    fn on_long_press(&mut self, _x: f32, _y: f32) {}
    /// Drag recognized.
    fn on_drag_start(&mut self, _x: f32, _y: f32) {}
    /// Drag moved by `delta`; now at `position`.
    fn on_drag(&mut self, _delta: Vec2, _position: Vec2, _velocity: Vec2) {}
    /// Drag released with `velocity`.
    fn on_drag_end(&mut self, _velocity: Vec2) {}
    /// Two-finger gesture began.
    fn on_pinch_start(&mut self, _center: Vec2, _distance: f32) {}
    /// Two-finger gesture moved.
    fn on_pinch(&mut self, _center: Vec2, _distance: f32, _scale: f32) {}
    /// Two-finger gesture ended.
    fn on_pinch_end(&mut self) {}
}

type PointFn = Box<dyn FnMut(f32, f32)>;

/// Optional closures for each gesture kind; unset ones do nothing.
///
/// ```ignore
/// let recognizer = GestureRecognizer::with_callbacks(
///     GestureOptions::default(),
///     GestureCallbacks::default()
///         .on_tap(|x, y| log::info!("tap at {x},{y}"))
///         .on_pinch(|_, _, scale| log::info!("zoom x{scale}")),
/// );
/// ```
#[derive(Default)]
pub struct GestureCallbacks {
    tap: Option<PointFn>,
    double_tap: Option<PointFn>,
    long_press: Option<PointFn>,
    drag_start: Option<PointFn>,
    drag: Option<Box<dyn FnMut(Vec2, Vec2, Vec2)>>,
    drag_end: Option<Box<dyn FnMut(Vec2)>>,
    pinch_start: Option<Box<dyn FnMut(Vec2, f32)>>,
    pinch: Option<Box<dyn FnMut(Vec2, f32, f32)>>,
    pinch_end: Option<Box<dyn FnMut()>>,
}

impl GestureCallbacks {
    /// Set the tap callback.
    #[must_use]
    pub fn on_tap(mut self, f: impl FnMut(f32, f32) + 'static) -> Self {
        self.tap = Some(Box::new(f));
        self
    }

    /// Set the double-tap callback.
    #[must_use]
    pub fn on_double_tap(mut self, f: impl FnMut(f32, f32) + 'static) -> Self {
        self.double_tap = Some(Box::new(f));
        self
    }

    /// Set the long-press callback.
    #[must_use]
    pub fn on_long_press(mut self, f: impl FnMut(f32, f32) + 'static) -> Self {
        self.long_press = Some(Box::new(f));
        self
    }

    /// Set the drag-start callback.
    #[must_use]
    pub fn on_drag_start(mut self, f: impl FnMut(f32, f32) + 'static) -> Self {
        self.drag_start = Some(Box::new(f));
        self
    }

    /// Set the drag callback: `(delta, position, velocity)`.
    #[must_use]
    pub fn on_drag(
        mut self,
        f: impl FnMut(Vec2, Vec2, Vec2) + 'static,
    ) -> Self {
        self.drag = Some(Box::new(f));
        self
    }

    /// Set the drag-end callback.
    #[must_use]
    pub fn on_drag_end(mut self, f: impl FnMut(Vec2) + 'static) -> Self {
        self.drag_end = Some(Box::new(f));
        self
    }

    /// Set the pinch-start callback: `(center, distance)`.
    #[must_use]
    pub fn on_pinch_start(mut self, f: impl FnMut(Vec2, f32) + 'static) -> Self {
        self.pinch_start = Some(Box::new(f));
        self
    }

    /// Set the pinch callback: `(center, distance, scale)`.
    #[must_use]
    pub fn on_pinch(mut self, f: impl FnMut(Vec2, f32, f32) + 'static) -> Self {
        self.pinch = Some(Box::new(f));
        self
    }

    /// Set the pinch-end callback.
    #[must_use]
    pub fn on_pinch_end(mut self, f: impl FnMut() + 'static) -> Self {
        self.pinch_end = Some(Box::new(f));
        self
    }
}

impl GestureListener for GestureCallbacks {
    fn on_tap(&mut self, x: f32, y: f32) {
        if let Some(f) = self.tap.as_mut() {
            f(x, y);
        }
    }

    fn on_double_tap(&mut self, x: f32, y: f32) {
        if let Some(f) = self.double_tap.as_mut() {
            f(x, y);
        }
    }

    fn on_long_press(&mut self, x: f32, y: f32) {
        if let Some(f) = self.long_press.as_mut() {
            f(x, y);
        }
    }

    fn on_drag_start(&mut self, x: f32, y: f32) {
        if let Some(f) = self.drag_start.as_mut() {
            f(x, y);
        }
    }

    fn on_drag(&mut self, delta: Vec2, position: Vec2, velocity: Vec2) {
        if let Some(f) = self.drag.as_mut() {
            f(delta, position, velocity);
        }
    }

    fn on_drag_end(&mut self, velocity: Vec2) {
        if let Some(f) = self.drag_end.as_mut() {
            f(velocity);
        }
    }

    fn on_pinch_start(&mut self, center: Vec2, distance: f32) {
        if let Some(f) = self.pinch_start.as_mut() {
            f(center, distance);
        }
    }

    fn on_pinch(&mut self, center: Vec2, distance: f32, scale: f32) {
        if let Some(f) = self.pinch.as_mut() {
            f(center, distance, scale);
        }
    }

    fn on_pinch_end(&mut self) {
        if let Some(f) = self.pinch_end.as_mut() {
            f();
        }
    }
}

impl fmt::Debug for GestureCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GestureCallbacks")
            .field("tap", &self.tap.is_some())
            .field("double_tap", &self.double_tap.is_some())
            .field("long_press", &self.long_press.is_some())
            .field("drag_start", &self.drag_start.is_some())
            .field("drag", &self.drag.is_some())
            .field("drag_end", &self.drag_end.is_some())
            .field("pinch_start", &self.pinch_start.is_some())
            .field("pinch", &self.pinch.is_some())
            .field("pinch_end", &self.pinch_end.is_some())
            .finish()
    }
}

/// Listener that forwards every event to one closure.
pub struct EventFn<F>(pub F);

impl<F: FnMut(&GestureEvent)> GestureListener for EventFn<F> {
    fn on_event(&mut self, event: &GestureEvent) {
        (self.0)(event);
    }
}

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Ordered set of subscribed listeners.
#[derive(Default)]
pub struct Listeners {
    next_id: u64,
    entries: Vec<(ListenerId, Box<dyn GestureListener>)>,
}

impl Listeners {
    /// Add a listener; it receives events after those already subscribed.
    pub fn subscribe(
        &mut self,
        listener: impl GestureListener + 'static,
    ) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns whether it was subscribed.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        self.entries.len() != before
    }

    /// Number of subscribed listeners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nobody is listening.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Deliver events in order to every listener.
    pub fn dispatch(&mut self, events: &[GestureEvent]) {
        for event in events {
            for (_, listener) in &mut self.entries {
                listener.on_event(event);
            }
        }
    }
}

impl fmt::Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.entries.len())
            .finish_non_exhaustive()
    }
}
