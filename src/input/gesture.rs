use glam::Vec2;

/// A disambiguated gesture.
///
/// Payloads are plain copies; listeners never see recognizer internals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    /// Short touch with no significant movement.
    Tap {
        /// Lift-off x.
        x: f32,
        /// Lift-off y.
        y: f32,
    },
    /// Second tap close in time and space to the previous one.
    DoubleTap {
        /// Lift-off x of the second tap.
        x: f32,
        /// Lift-off y of the second tap.
        y: f32,
    },
    /// Stationary touch held past the long-press delay.
    LongPress {
        /// Touch-down x.
        x: f32,
        /// Touch-down y.
        y: f32,
    },
    /// Movement passed the tap slop; a drag begins.
    DragStart {
        /// Position when the drag was recognized.
        x: f32,
        /// Position when the drag was recognized.
        y: f32,
    },
    /// Drag movement since the previous sample.
    Drag {
        /// Horizontal delta in pixels.
        dx: f32,
        /// Vertical delta in pixels.
        dy: f32,
        /// Current x.
        x: f32,
        /// Current y.
        y: f32,
        /// Velocity in pixels per frame, magnitude capped.
        velocity: Vec2,
    },
    /// Finger lifted after a drag.
    DragEnd {
        /// Release velocity that seeds momentum.
        velocity: Vec2,
    },
    /// A second finger landed.
    PinchStart {
        /// Midpoint of the two fingers.
        center: Vec2,
        /// Initial finger separation.
        distance: f32,
    },
    /// Two-finger movement.
    Pinch {
        /// Midpoint of the two fingers.
        center: Vec2,
        /// Current finger separation.
        distance: f32,
        /// Separation relative to the start of the pinch.
        scale: f32,
    },
    /// One of the pinching fingers lifted.
    PinchEnd,
}

impl GestureEvent {
    /// Short name for logging.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Tap { .. } => "tap",
            Self::DoubleTap { .. } => "double_tap",
            Self::LongPress { .. } => "long_press",
            Self::DragStart { .. } => "drag_start",
            Self::Drag { .. } => "drag",
            Self::DragEnd { .. } => "drag_end",
            Self::PinchStart { .. } => "pinch_start",
            Self::Pinch { .. } => "pinch",
            Self::PinchEnd => "pinch_end",
        }
    }
}
