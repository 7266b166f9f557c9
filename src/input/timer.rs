//! Explicit timer handles for deferred gesture decisions.
//!
//! Nothing here runs on its own. Deadlines are compared against timestamps
//! the host supplies, and cancelling a handle that already fired or was
//! already cancelled is a no-op.

/// What a timer decides when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// A stationary touch has been held long enough.
    LongPress,
    /// No second tap arrived; report the pending single tap.
    TapConfirm,
}

/// Handle to a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

/// A timer waiting for its deadline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduledTimer {
    /// Handle used to cancel it.
    pub handle: TimerHandle,
    /// What it decides.
    pub kind: TimerKind,
    /// Host-clock milliseconds at which it fires.
    pub deadline_ms: f64,
}

/// Pending timers, fired in deadline order.
#[derive(Debug, Default)]
pub struct TimerQueue {
    next_id: u64,
    pending: Vec<ScheduledTimer>,
}

impl TimerQueue {
    /// Empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a timer at `deadline_ms`.
    pub fn schedule(&mut self, kind: TimerKind, deadline_ms: f64) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        self.pending.push(ScheduledTimer {
            handle,
            kind,
            deadline_ms,
        });
        handle
    }

    /// Cancel a timer. Returns whether it was still pending.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|t| t.handle != handle);
        self.pending.len() != before
    }

    /// Cancel every pending timer of `kind`.
    pub fn cancel_kind(&mut self, kind: TimerKind) {
        self.pending.retain(|t| t.kind != kind);
    }

    /// Cancel everything.
    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    /// Whether `handle` is still pending.
    #[must_use]
    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.pending.iter().any(|t| t.handle == handle)
    }

    /// Number of pending timers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether no timers are pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Pending timers in scheduling order.
    pub fn iter(&self) -> impl Iterator<Item = &ScheduledTimer> {
        self.pending.iter()
    }

    /// Earliest pending deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<f64> {
        self.pending
            .iter()
            .map(|t| t.deadline_ms)
            .min_by(f64::total_cmp)
    }

    /// Remove and return the earliest timer due at `now_ms`. Ties fire in
    /// scheduling order.
    pub fn pop_due(&mut self, now_ms: f64) -> Option<ScheduledTimer> {
        let (idx, _) = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, t)| t.deadline_ms <= now_ms)
            .min_by(|(_, a), (_, b)| {
                a.deadline_ms
                    .total_cmp(&b.deadline_ms)
                    .then(a.handle.cmp(&b.handle))
            })?;
        Some(self.pending.remove(idx))
    }
}
