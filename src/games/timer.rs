//! Virtual timers owned by a single controller
//!
//! Controllers never touch a real clock. The app loop hands each controller
//! the elapsed frame time and the controller drains [`Timers::poll`] until
//! the budget is spent, handling every fired timer before the next is
//! looked at. Because the table is owned by the controller, dropping the
//! controller drops every pending timer with it.

use std::fmt;
use std::time::Duration;

/// Shortest allowed interval period; a zero period would never let the
/// budget drain
pub const MIN_PERIOD: Duration = Duration::from_millis(1);

#[derive(Debug, Clone)]
struct TimerEntry<K> {
    key: K,
    remaining: Duration,
    period: Option<Duration>,
    /// Scheduling order, used to break ties between timers due together
    seq: u64,
}

/// Table of pending timers keyed by a controller-specific enum
#[derive(Debug, Clone)]
pub struct Timers<K> {
    entries: Vec<TimerEntry<K>>,
    next_seq: u64,
}

impl<K: Copy + Eq + fmt::Debug> Timers<K> {
    /// Create an empty timer table
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_seq: 0,
        }
    }

    /// Schedule a repeating timer; replaces any timer with the same key
    pub fn every(&mut self, key: K, period: Duration) {
        let period = period.max(MIN_PERIOD);
        self.insert(key, period, Some(period));
    }

    /// Schedule a one-shot timer; replaces any timer with the same key
    pub fn after(&mut self, key: K, delay: Duration) {
        self.insert(key, delay, None);
    }

    fn insert(&mut self, key: K, remaining: Duration, period: Option<Duration>) {
        self.cancel(key);
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.push(TimerEntry {
            key,
            remaining,
            period,
            seq,
        });
    }

    /// Cancel a timer, returning whether it was pending
    pub fn cancel(&mut self, key: K) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.key != key);
        self.entries.len() != before
    }

    /// Cancel every pending timer
    pub fn cancel_all(&mut self) {
        self.entries.clear();
    }

    /// Check whether a timer with this key is pending
    pub fn is_active(&self, key: K) -> bool {
        self.entries.iter().any(|e| e.key == key)
    }

    /// Time until the timer next fires
    #[cfg(test)]
    fn remaining(&self, key: K) -> Option<Duration> {
        self.entries
            .iter()
            .find(|e| e.key == key)
            .map(|e| e.remaining)
    }

    /// Number of pending timers
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether no timer is pending
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Fire the earliest timer due within `budget`.
    ///
    /// On a hit, all timers and the budget move forward to that instant,
    /// the fired interval re-arms (one-shots are dropped) and its key is
    /// returned. When nothing is due, the whole budget is consumed and
    /// `None` is returned.
    pub fn poll(&mut self, budget: &mut Duration) -> Option<K> {
        let due = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.remaining <= *budget)
            .min_by_key(|(_, e)| (e.remaining, e.seq))
            .map(|(index, _)| index);

        let Some(index) = due else {
            self.elapse(*budget);
            *budget = Duration::ZERO;
            return None;
        };

        let step = self.entries[index].remaining;
        self.elapse(step);
        *budget -= step;

        let key = self.entries[index].key;
        match self.entries[index].period {
            Some(period) => self.entries[index].remaining = period,
            None => {
                self.entries.remove(index);
            }
        }
        Some(key)
    }

    fn elapse(&mut self, step: Duration) {
        for entry in &mut self.entries {
            entry.remaining = entry.remaining.saturating_sub(step);
        }
    }
}

impl<K: Copy + Eq + fmt::Debug> Default for Timers<K> {
    fn default() -> Self {
        Self::new()
    }
}
