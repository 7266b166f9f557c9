//! Touch input: raw samples, the gesture state machine, momentum, and the
//! recognizer that ties them together.

/// Platform-agnostic touch samples.
pub mod event;
/// Recognized gesture events.
pub mod gesture;
/// Listener trait and subscription list.
pub mod listener;
/// Velocity tracking and frictional decay.
pub mod momentum;
/// Touch-to-gesture recognizer.
pub mod recognizer;
/// Gesture states and the transition table.
pub mod state;
/// Deadline-ordered timer queue.
pub mod timer;

pub use event::{TouchEvent, TouchId, TouchPoint};
pub use gesture::GestureEvent;
pub use listener::{
    EventFn, GestureCallbacks, GestureListener, ListenerId, Listeners,
};
pub use momentum::Momentum;
pub use recognizer::GestureRecognizer;
pub use state::{GesturePhase, GestureState};
pub use timer::{ScheduledTimer, TimerHandle, TimerKind};
