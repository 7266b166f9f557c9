//! Gesture state machine.
//!
//! [`transition`] is the whole transition table: it takes the current
//! [`GestureState`] and one [`Signal`], and returns the next state plus the
//! events to emit. Side state that outlives a single touch sequence (timer
//! queue, momentum, tap memory) is passed in through [`StepContext`].

use glam::Vec2;

use super::event::{TouchId, TouchPoint};
use super::gesture::GestureEvent;
use super::momentum::Momentum;
use super::timer::{ScheduledTimer, TimerHandle, TimerKind, TimerQueue};
use crate::options::GestureOptions;

/// Data-free view of [`GestureState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GesturePhase {
    /// No finger down, or leftover fingers after a pinch.
    Idle,
    /// One finger down, not yet classified.
    TapPending,
    /// One finger dragging.
    Dragging,
    /// Two fingers pinching.
    Pinching,
}

/// One finger down that may still become a tap, long press or drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingTouch {
    /// Tracked finger.
    pub id: TouchId,
    /// Touch-down position.
    pub start: Vec2,
    /// Latest position.
    pub current: Vec2,
    /// Latest sample time.
    pub last_ms: f64,
    /// Sum of `|dx| + |dy|` over every move since touch-down.
    pub total_movement: f32,
    /// A long press already fired for this touch.
    pub long_press_triggered: bool,
    /// Pending long-press timer.
    pub long_press_timer: TimerHandle,
}

/// A single-finger drag in progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragTrack {
    /// Tracked finger.
    pub id: TouchId,
    /// Latest position.
    pub last: Vec2,
    /// Latest sample time.
    pub last_ms: f64,
}

/// A two-finger pinch in progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinchTrack {
    /// The two tracked fingers.
    pub ids: [TouchId; 2],
    /// Finger separation at pinch start.
    pub start_distance: f32,
}

/// Recognizer state. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GestureState {
    /// Nothing in progress.
    #[default]
    Idle,
    /// Waiting to classify a single touch.
    TapPending(PendingTouch),
    /// Dragging with one finger.
    Dragging(DragTrack),
    /// Pinching with two fingers.
    Pinching(PinchTrack),
}

impl GestureState {
    /// Discriminant without data.
    #[must_use]
    pub fn phase(&self) -> GesturePhase {
        match self {
            Self::Idle => GesturePhase::Idle,
            Self::TapPending(_) => GesturePhase::TapPending,
            Self::Dragging(_) => GesturePhase::Dragging,
            Self::Pinching(_) => GesturePhase::Pinching,
        }
    }

    /// Finger tracked by a single-finger state.
    #[must_use]
    pub fn single_touch(&self) -> Option<TouchId> {
        match self {
            Self::TapPending(p) => Some(p.id),
            Self::Dragging(d) => Some(d.id),
            Self::Idle | Self::Pinching(_) => None,
        }
    }

    /// Fingers tracked by a pinch.
    #[must_use]
    pub fn pinch_touches(&self) -> Option<[TouchId; 2]> {
        match self {
            Self::Pinching(p) => Some(p.ids),
            _ => None,
        }
    }

    /// Whether `id` is one of the tracked fingers.
    #[must_use]
    pub fn tracks(&self, id: TouchId) -> bool {
        self.single_touch() == Some(id)
            || self.pinch_touches().is_some_and(|ids| ids.contains(&id))
    }
}

/// Input to the state machine, already resolved to tracked fingers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Signal {
    /// First finger landed.
    Down(TouchPoint),
    /// A second finger landed while `first` is down.
    SecondDown {
        /// Finger already down.
        first: TouchPoint,
        /// Finger that just landed.
        second: TouchPoint,
    },
    /// A tracked single finger moved.
    Move(TouchPoint),
    /// A pinching finger moved; both current positions.
    PinchMove {
        /// First tracked finger.
        first: Vec2,
        /// Second tracked finger.
        second: Vec2,
    },
    /// A tracked finger lifted.
    Up(TouchPoint),
    /// A scheduled timer reached its deadline.
    Timer(ScheduledTimer),
    /// Platform interruption.
    Cancel,
}

/// A completed tap kept for double-tap comparison.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TapRecord {
    /// Lift-off position.
    pub position: Vec2,
    /// Lift-off time.
    pub time_ms: f64,
}

/// A single tap waiting for its double-tap window to close.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingTap {
    /// Lift-off position.
    pub position: Vec2,
    /// Confirmation timer.
    pub timer: TimerHandle,
}

/// Tap history that spans touch sequences.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TapMemory {
    /// Last tap eligible to pair into a double tap.
    pub last_tap: Option<TapRecord>,
    /// Single tap not yet reported.
    pub pending_tap: Option<PendingTap>,
}

/// Mutable state the transition table reads and writes besides the
/// [`GestureState`] itself.
pub struct StepContext<'a> {
    /// Thresholds.
    pub options: &'a GestureOptions,
    /// Long-press and tap-confirm timers.
    pub timers: &'a mut TimerQueue,
    /// Drag velocity and decay.
    pub momentum: &'a mut Momentum,
    /// Double-tap history.
    pub memory: &'a mut TapMemory,
}

impl StepContext<'_> {
    /// Report a deferred single tap now, ahead of a gesture that rules out
    /// a double tap.
    fn flush_pending_tap(&mut self, events: &mut Vec<GestureEvent>) {
        if let Some(pending) = self.memory.pending_tap.take() {
            let _ = self.timers.cancel(pending.timer);
            events.push(GestureEvent::Tap {
                x: pending.position.x,
                y: pending.position.y,
            });
        }
    }

    /// Drop every timer, all motion and tap history.
    fn abandon(&mut self) {
        self.timers.cancel_all();
        self.momentum.stop();
        *self.memory = TapMemory::default();
    }
}

/// Apply one signal to `state`.
pub fn transition(
    state: GestureState,
    signal: Signal,
    ctx: &mut StepContext<'_>,
) -> (GestureState, Vec<GestureEvent>) {
    let mut events = Vec::new();

    let next = match (state, signal) {
        (_, Signal::Cancel) => {
            ctx.abandon();
            GestureState::Idle
        }
        (state, Signal::Timer(timer)) => {
            on_timer(state, timer, ctx, &mut events)
        }
        (GestureState::Idle, Signal::Down(touch)) => begin_touch(touch, ctx),
        (GestureState::TapPending(p), Signal::Move(touch))
            if touch.id == p.id =>
        {
            pending_move(p, touch, ctx, &mut events)
        }
        (GestureState::TapPending(p), Signal::Up(touch)) if touch.id == p.id => {
            pending_lift(p, touch, ctx, &mut events);
            GestureState::Idle
        }
        (GestureState::Dragging(d), Signal::Move(touch)) if touch.id == d.id => {
            drag_move(d, touch, ctx, &mut events)
        }
        (GestureState::Dragging(d), Signal::Up(touch)) if touch.id == d.id => {
            events.push(GestureEvent::DragEnd {
                velocity: ctx.momentum.velocity(),
            });
            GestureState::Idle
        }
        (
            GestureState::Idle
            | GestureState::TapPending(_)
            | GestureState::Dragging(_),
            Signal::SecondDown { first, second },
        ) => begin_pinch(first, second, ctx, &mut events),
        (GestureState::Pinching(p), Signal::PinchMove { first, second }) => {
            let distance = first.distance(second);
            let scale = if p.start_distance > f32::EPSILON {
                distance / p.start_distance
            } else {
                1.0
            };
            events.push(GestureEvent::Pinch {
                center: (first + second) * 0.5,
                distance,
                scale,
            });
            GestureState::Pinching(p)
        }
        (GestureState::Pinching(p), Signal::Up(touch))
            if p.ids.contains(&touch.id) =>
        {
            events.push(GestureEvent::PinchEnd);
            GestureState::Idle
        }
        (state, signal) => {
            log::trace!("ignoring {signal:?} while {:?}", state.phase());
            state
        }
    };

    (next, events)
}

fn begin_touch(touch: TouchPoint, ctx: &mut StepContext<'_>) -> GestureState {
    // A new touch catches any drifting camera.
    ctx.momentum.stop();
    let long_press_timer = ctx.timers.schedule(
        TimerKind::LongPress,
        touch.timestamp_ms + ctx.options.long_press_ms,
    );
    GestureState::TapPending(PendingTouch {
        id: touch.id,
        start: touch.position(),
        current: touch.position(),
        last_ms: touch.timestamp_ms,
        total_movement: 0.0,
        long_press_triggered: false,
        long_press_timer,
    })
}

fn pending_move(
    mut p: PendingTouch,
    touch: TouchPoint,
    ctx: &mut StepContext<'_>,
    events: &mut Vec<GestureEvent>,
) -> GestureState {
    let position = touch.position();
    let delta = position - p.current;
    let dt = touch.timestamp_ms - p.last_ms;
    p.total_movement += delta.x.abs() + delta.y.abs();
    p.current = position;
    p.last_ms = touch.timestamp_ms;

    if p.total_movement <= ctx.options.tap_max_distance {
        return GestureState::TapPending(p);
    }

    let _ = ctx.timers.cancel(p.long_press_timer);
    ctx.flush_pending_tap(events);
    events.push(GestureEvent::DragStart {
        x: position.x,
        y: position.y,
    });
    let velocity = ctx.momentum.track(delta, dt);
    events.push(GestureEvent::Drag {
        dx: delta.x,
        dy: delta.y,
        x: position.x,
        y: position.y,
        velocity,
    });
    GestureState::Dragging(DragTrack {
        id: p.id,
        last: position,
        last_ms: touch.timestamp_ms,
    })
}

fn pending_lift(
    p: PendingTouch,
    touch: TouchPoint,
    ctx: &mut StepContext<'_>,
    events: &mut Vec<GestureEvent>,
) {
    let _ = ctx.timers.cancel(p.long_press_timer);
    if p.long_press_triggered {
        return;
    }

    let position = touch.position();
    if position.distance(p.start) > ctx.options.tap_max_distance {
        log::trace!("lift {position} outside tap slop of {}", p.start);
        return;
    }

    let time_ms = touch.timestamp_ms;
    let pairs_with_last = ctx.memory.last_tap.is_some_and(|last| {
        time_ms - last.time_ms < ctx.options.double_tap_ms
            && position.distance(last.position)
                <= ctx.options.double_tap_distance
    });

    if pairs_with_last {
        if let Some(pending) = ctx.memory.pending_tap.take() {
            let _ = ctx.timers.cancel(pending.timer);
        }
        ctx.memory.last_tap = None;
        events.push(GestureEvent::DoubleTap {
            x: position.x,
            y: position.y,
        });
        return;
    }

    ctx.flush_pending_tap(events);
    ctx.memory.last_tap = Some(TapRecord { position, time_ms });
    if ctx.options.defer_single_tap {
        let timer = ctx.timers.schedule(
            TimerKind::TapConfirm,
            time_ms + ctx.options.double_tap_ms,
        );
        ctx.memory.pending_tap = Some(PendingTap { position, timer });
    } else {
        events.push(GestureEvent::Tap {
            x: position.x,
            y: position.y,
        });
    }
}

fn drag_move(
    mut d: DragTrack,
    touch: TouchPoint,
    ctx: &mut StepContext<'_>,
    events: &mut Vec<GestureEvent>,
) -> GestureState {
    let position = touch.position();
    let delta = position - d.last;
    let velocity = ctx.momentum.track(delta, touch.timestamp_ms - d.last_ms);
    events.push(GestureEvent::Drag {
        dx: delta.x,
        dy: delta.y,
        x: position.x,
        y: position.y,
        velocity,
    });
    d.last = position;
    d.last_ms = touch.timestamp_ms;
    GestureState::Dragging(d)
}

fn begin_pinch(
    first: TouchPoint,
    second: TouchPoint,
    ctx: &mut StepContext<'_>,
    events: &mut Vec<GestureEvent>,
) -> GestureState {
    ctx.timers.cancel_kind(TimerKind::LongPress);
    ctx.flush_pending_tap(events);
    ctx.momentum.stop();

    let (a, b) = (first.position(), second.position());
    let distance = a.distance(b);
    events.push(GestureEvent::PinchStart {
        center: (a + b) * 0.5,
        distance,
    });
    GestureState::Pinching(PinchTrack {
        ids: [first.id, second.id],
        start_distance: distance,
    })
}

fn on_timer(
    state: GestureState,
    timer: ScheduledTimer,
    ctx: &mut StepContext<'_>,
    events: &mut Vec<GestureEvent>,
) -> GestureState {
    match (timer.kind, state) {
        (TimerKind::TapConfirm, state) => {
            let matches = ctx
                .memory
                .pending_tap
                .is_some_and(|pending| pending.timer == timer.handle);
            if matches {
                ctx.flush_pending_tap(events);
            }
            state
        }
        (TimerKind::LongPress, GestureState::TapPending(mut p))
            if p.long_press_timer == timer.handle =>
        {
            let slop = ctx.options.tap_max_distance;
            if !p.long_press_triggered
                && p.total_movement <= slop
                && p.current.distance(p.start) <= slop
            {
                p.long_press_triggered = true;
                ctx.flush_pending_tap(events);
                events.push(GestureEvent::LongPress {
                    x: p.start.x,
                    y: p.start.y,
                });
            }
            GestureState::TapPending(p)
        }
        (TimerKind::LongPress, state) => state,
    }
}
