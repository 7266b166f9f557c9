use glam::Vec2;

/// Stable per-finger identifier assigned by the platform input layer.
pub type TouchId = u64;

/// One finger's position at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    /// Finger identity, stable from touch-down to lift-off.
    pub id: TouchId,
    /// Horizontal position in logical pixels.
    pub x: f32,
    /// Vertical position in logical pixels.
    pub y: f32,
    /// Sample time in milliseconds on the host's monotonic clock.
    pub timestamp_ms: f64,
}

impl TouchPoint {
    /// Touch sample from its parts.
    #[must_use]
    pub fn new(id: TouchId, x: f32, y: f32, timestamp_ms: f64) -> Self {
        Self {
            id,
            x,
            y,
            timestamp_ms,
        }
    }

    /// Position as a vector.
    #[must_use]
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// Platform-agnostic touch events.
///
/// These are fed into a
/// [`GestureRecognizer`](super::GestureRecognizer) which converts them into
/// [`GestureEvent`](super::GestureEvent) values.
///
/// # Example
///
/// ```ignore
/// let events = recognizer.handle_event(TouchEvent::Start(vec![
///     TouchPoint::new(0, 120.0, 80.0, now_ms),
/// ]));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum TouchEvent {
    /// Fingers that just landed.
    Start(Vec<TouchPoint>),
    /// Fingers that moved, with the event time.
    Move(Vec<TouchPoint>, f64),
    /// Fingers that just lifted.
    End(Vec<TouchPoint>),
    /// Platform interruption; abandons every gesture in progress.
    Cancel,
}
