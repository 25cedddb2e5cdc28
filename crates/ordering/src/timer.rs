//! Single-shot deferred events.
//!
//! The controller never sleeps. Anything that should happen "later" (showing
//! the order form after registration, hiding the added-to-order notice) is
//! scheduled through a [`Timer`] and comes back as a [`FiredTimer`] that the
//! controller handles like any other input.
//!
//! - [`TokioTimer`] delivers fired events over an unbounded channel.
//! - [`ManualTimer`] only fires when told to advance, for deterministic tests.

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::AbortHandle;
use tracing::debug;

/// Identifies one scheduled event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

impl TimerId {
    #[must_use]
    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

/// Something the controller asked to be told about later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerEvent {
    /// Registration handoff: show the order form and customer details.
    RevealOrderForm,
    /// Hide the "added to order" notice.
    DismissItemNotice,
}

/// A timer that has elapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FiredTimer {
    pub id: TimerId,
    pub event: TimerEvent,
}

/// Schedules single-shot events.
///
/// Each scheduled event fires at most once, and never after a successful
/// [`Timer::cancel`].
pub trait Timer {
    /// Schedule `event` to fire after `delay`.
    fn schedule(&mut self, delay: Duration, event: TimerEvent) -> TimerId;

    /// Cancel a pending event. Returns `false` if it already fired or was
    /// never scheduled.
    fn cancel(&mut self, id: TimerId) -> bool;
}

// =============================================================================
// Tokio
// =============================================================================

/// Timer backed by `tokio::time::sleep` tasks.
///
/// Must be used from within a tokio runtime.
#[derive(Debug)]
pub struct TokioTimer {
    next_id: u64,
    tasks: HashMap<TimerId, AbortHandle>,
    tx: mpsc::UnboundedSender<FiredTimer>,
}

impl TokioTimer {
    /// Create a timer and the receiver its events are delivered on.
    #[must_use]
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<FiredTimer>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let timer = Self {
            next_id: 0,
            tasks: HashMap::new(),
            tx,
        };
        (timer, rx)
    }

    /// Number of events scheduled and not yet fired or cancelled.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.tasks.values().filter(|h| !h.is_finished()).count()
    }
}

impl Timer for TokioTimer {
    fn schedule(&mut self, delay: Duration, event: TimerEvent) -> TimerId {
        self.tasks.retain(|_, handle| !handle.is_finished());

        let id = TimerId(self.next_id);
        self.next_id += 1;

        let tx = self.tx.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Receiver gone means the session was torn down
            let _ = tx.send(FiredTimer { id, event });
        });
        self.tasks.insert(id, handle.abort_handle());

        debug!(timer = id.0, ?event, ?delay, "Scheduled timer");
        id
    }

    fn cancel(&mut self, id: TimerId) -> bool {
        match self.tasks.remove(&id) {
            Some(handle) if !handle.is_finished() => {
                handle.abort();
                debug!(timer = id.0, "Cancelled timer");
                true
            }
            _ => false,
        }
    }
}

impl Drop for TokioTimer {
    fn drop(&mut self) {
        for handle in self.tasks.values() {
            handle.abort();
        }
    }
}

// =============================================================================
// Manual
// =============================================================================

#[derive(Debug, Clone)]
struct Pending {
    deadline: Duration,
    id: TimerId,
    event: TimerEvent,
}

/// Timer driven by an explicit clock.
///
/// Nothing fires until [`ManualTimer::advance`] moves the clock past an
/// event's deadline.
#[derive(Debug, Clone, Default)]
pub struct ManualTimer {
    now: Duration,
    next_id: u64,
    pending: Vec<Pending>,
}

impl ManualTimer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Time elapsed since creation.
    #[must_use]
    pub const fn now(&self) -> Duration {
        self.now
    }

    /// Number of events waiting to fire.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Move the clock forward and return every event now due, earliest first.
    pub fn advance(&mut self, by: Duration) -> Vec<FiredTimer> {
        self.now += by;
        let now = self.now;

        let (mut due, waiting): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|p| p.deadline <= now);
        self.pending = waiting;

        due.sort_by_key(|p| (p.deadline, p.id));
        due.into_iter()
            .map(|p| FiredTimer {
                id: p.id,
                event: p.event,
            })
            .collect()
    }
}

impl Timer for ManualTimer {
    fn schedule(&mut self, delay: Duration, event: TimerEvent) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.pending.push(Pending {
            deadline: self.now + delay,
            id,
            event,
        });
        id
    }

    fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|p| p.id != id);
        self.pending.len() != before
    }
}
