use std::time::Duration;

#[derive(Debug, Clone)]
struct Pending<E> {
    seq: u64,
    due: Duration,
    event: E,
}

/// Virtual-clock timer queue.
///
/// Nothing here reads the wall clock: the host calls `advance_clock` (a window loop with real
/// frame deltas, a test with whatever it likes) and pops due events one at a time, in due
/// order. `cancel_all` bumps the epoch so a whole generation of timers is dropped at once.
#[derive(Debug, Clone)]
pub struct Scheduler<E> {
    now: Duration,
    epoch: u64,
    next_seq: u64,
    pending: Vec<Pending<E>>,
}

impl<E> Default for Scheduler<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Scheduler<E> {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            epoch: 0,
            next_seq: 0,
            pending: Vec::new(),
        }
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn schedule(&mut self, after: Duration, event: E) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(Pending {
            seq,
            due: self.now.saturating_add(after),
            event,
        });
    }

    /// Drops every pending entry and starts a new epoch; returns the new epoch.
    pub fn cancel_all(&mut self) -> u64 {
        self.pending.clear();
        self.epoch += 1;
        self.epoch
    }

    /// Time until the earliest pending entry is due, if any.
    pub fn next_due_in(&self) -> Option<Duration> {
        self.pending
            .iter()
            .map(|p| p.due.saturating_sub(self.now))
            .min()
    }

    /// Pops the single earliest entry that is due at the current time (ties keep scheduling
    /// order). Entries scheduled in reaction to a popped event are visible to the next pop.
    pub fn pop_due(&mut self) -> Option<E> {
        let index = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, p)| p.due <= self.now)
            .min_by_key(|(_, p)| (p.due, p.seq))
            .map(|(i, _)| i)?;
        Some(self.pending.remove(index).event)
    }

    /// Moves the clock forward; due entries wait for `pop_due`.
    pub fn advance_clock(&mut self, dt: Duration) {
        self.now = self.now.saturating_add(dt);
    }
}
