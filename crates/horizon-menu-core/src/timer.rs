//! One-shot timers driven by a virtual clock.
//!
//! Menus never sleep or spawn threads. Instead the host advances the clock
//! with [`TimerManager::advance`] (typically from its own event loop using the
//! duration reported by [`TimerManager::time_until_next`]) and receives the IDs
//! of every timer that came due, in fire order.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::Duration;

use slotmap::{SlotMap, new_key_type};

use crate::error::TimerError;
use crate::logging::targets;

new_key_type! {
    /// A unique identifier for a timer.
    pub struct TimerId;
}

/// Internal timer data.
#[derive(Debug)]
struct TimerData {
    /// Clock reading at which this timer fires.
    fire_at: Duration,
}

/// An entry in the timer queue (min-heap by fire time, then start order).
#[derive(Debug, Clone, Copy)]
struct TimerQueueEntry {
    id: TimerId,
    fire_at: Duration,
    sequence: u64,
}

impl PartialEq for TimerQueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.fire_at == other.fire_at && self.sequence == other.sequence
    }
}

impl Eq for TimerQueueEntry {}

impl PartialOrd for TimerQueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TimerQueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse order for min-heap (BinaryHeap is max-heap by default).
        other
            .fire_at
            .cmp(&self.fire_at)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

/// Manages pending one-shot timers against a virtual clock.
#[derive(Debug, Default)]
pub struct TimerManager {
    /// All pending timers.
    timers: SlotMap<TimerId, TimerData>,
    /// Priority queue of pending timer fires. May hold stale entries for
    /// stopped timers; they are skipped when popped.
    queue: BinaryHeap<TimerQueueEntry>,
    /// Current clock reading.
    now: Duration,
    /// Monotonic start counter used to keep equal deadlines in FIFO order.
    next_sequence: u64,
}

impl TimerManager {
    /// Create a new timer manager with the clock at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current clock reading.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Start a one-shot timer that fires after the specified duration.
    ///
    /// Returns the timer ID that can be used to cancel the timer.
    pub fn start_one_shot(&mut self, duration: Duration) -> TimerId {
        let fire_at = self.now + duration;
        let id = self.timers.insert(TimerData { fire_at });
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.queue.push(TimerQueueEntry {
            id,
            fire_at,
            sequence,
        });

        tracing::trace!(target: targets::TIMER, ?id, ?duration, "timer started");
        id
    }

    /// Stop and remove a pending timer.
    pub fn stop(&mut self, id: TimerId) -> Result<(), TimerError> {
        if self.timers.remove(id).is_some() {
            tracing::trace!(target: targets::TIMER, ?id, "timer stopped");
            Ok(())
        } else {
            Err(TimerError::InvalidTimerId)
        }
    }

    /// Check if a timer is still pending.
    pub fn is_active(&self, id: TimerId) -> bool {
        self.timers.contains_key(id)
    }

    /// Number of pending timers.
    pub fn active_count(&self) -> usize {
        self.timers.len()
    }

    /// Get the duration until the next timer fires, if any.
    pub fn time_until_next(&mut self) -> Option<Duration> {
        self.discard_stale();
        self.queue
            .peek()
            .map(|entry| entry.fire_at.saturating_sub(self.now))
    }

    /// Move the clock forward and collect every timer that came due.
    ///
    /// Expired timers are removed before being returned, in fire order.
    #[tracing::instrument(skip(self), target = "horizon_menu_core::timer", level = "trace")]
    pub fn advance(&mut self, elapsed: Duration) -> Vec<TimerId> {
        self.now += elapsed;
        let mut fired = Vec::new();

        while let Some(entry) = self.queue.peek() {
            if entry.fire_at > self.now {
                break;
            }
            let id = entry.id;
            self.queue.pop();

            // Stopped timers leave their queue entry behind.
            if self.timers.remove(id).is_some() {
                fired.push(id);
            }
        }

        if !fired.is_empty() {
            tracing::trace!(target: targets::TIMER, count = fired.len(), "timers fired");
        }
        fired
    }

    fn discard_stale(&mut self) {
        while let Some(entry) = self.queue.peek() {
            if self.timers.contains_key(entry.id) {
                break;
            }
            self.queue.pop();
        }
    }
}
