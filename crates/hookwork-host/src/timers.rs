//! Timer APIs
//!
//! setTimeout/clearTimeout on a virtual millisecond clock. The clock only
//! moves when the runtime advances it, so autoplay schedules are
//! reproducible.

use crate::OwnerId;

/// Timer handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(pub u64);

/// Timer entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTimer {
    pub id: TimerId,
    pub owner: OwnerId,
    pub due_at: u64,
    order: u64,
}

/// Timer manager
#[derive(Debug, Default)]
pub struct TimerQueue {
    now_ms: u64,
    next_id: u64,
    next_order: u64,
    timers: Vec<PendingTimer>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time
    pub fn now(&self) -> u64 {
        self.now_ms
    }

    /// Move the clock forward (never backwards)
    pub fn set_now(&mut self, now_ms: u64) {
        self.now_ms = self.now_ms.max(now_ms);
    }

    /// Add a timeout firing `delay_ms` from now
    pub fn set_timeout(&mut self, owner: OwnerId, delay_ms: u64) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        self.timers.push(PendingTimer {
            id,
            owner,
            due_at: self.now_ms.saturating_add(delay_ms),
            order: self.next_order,
        });
        self.next_order += 1;
        id
    }

    /// Clear a timer; returns false if it already fired or never existed
    pub fn clear(&mut self, id: TimerId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.id != id);
        self.timers.len() != before
    }

    /// Clear all timers of one owner
    pub fn clear_owner(&mut self, owner: OwnerId) -> usize {
        let before = self.timers.len();
        self.timers.retain(|t| t.owner != owner);
        before - self.timers.len()
    }

    /// Remove the earliest timer due at or before `limit`, moving the clock
    /// to its due time
    pub fn pop_due(&mut self, limit: u64) -> Option<PendingTimer> {
        let (idx, _) = self.timers.iter()
            .enumerate()
            .filter(|(_, t)| t.due_at <= limit)
            .min_by_key(|(_, t)| (t.due_at, t.order))?;
        let timer = self.timers.remove(idx);
        self.set_now(timer.due_at);
        Some(timer)
    }

    /// Pending timers sorted by firing order
    pub fn pending(&self) -> Vec<PendingTimer> {
        let mut timers = self.timers.clone();
        timers.sort_by_key(|t| (t.due_at, t.order));
        timers
    }

    /// Pending timers of one owner
    pub fn pending_for(&self, owner: OwnerId) -> usize {
        self.timers.iter().filter(|t| t.owner == owner).count()
    }

    /// Check if there are pending timers
    pub fn has_pending(&self) -> bool {
        !self.timers.is_empty()
    }

    /// Milliseconds until the next timer fires
    pub fn time_until_next(&self) -> Option<u64> {
        self.timers.iter()
            .map(|t| t.due_at.saturating_sub(self.now_ms))
            .min()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: OwnerId = OwnerId(1);
    const B: OwnerId = OwnerId(2);

    #[test]
    fn test_timer_manager() {
        let mut tm = TimerQueue::new();

        let id1 = tm.set_timeout(A, 100);
        let id2 = tm.set_timeout(A, 200);

        assert!(tm.has_pending());

        assert!(tm.clear(id1));
        assert!(!tm.clear(id1));
        assert!(tm.has_pending());

        tm.clear(id2);
        assert!(!tm.has_pending());
    }

    #[test]
    fn test_pop_due_order() {
        let mut tm = TimerQueue::new();
        let late = tm.set_timeout(A, 300);
        let first = tm.set_timeout(B, 100);
        let tie = tm.set_timeout(A, 100);

        assert_eq!(tm.pop_due(250).map(|t| t.id), Some(first));
        assert_eq!(tm.now(), 100);
        assert_eq!(tm.pop_due(250).map(|t| t.id), Some(tie));
        assert_eq!(tm.pop_due(250), None);
        assert_eq!(tm.pop_due(300).map(|t| t.id), Some(late));
        assert_eq!(tm.now(), 300);
    }

    #[test]
    fn test_delay_relative_to_clock() {
        let mut tm = TimerQueue::new();
        tm.set_now(1_000);
        tm.set_timeout(A, 500);

        assert_eq!(tm.time_until_next(), Some(500));
        assert_eq!(tm.pending()[0].due_at, 1_500);
    }

    #[test]
    fn test_clear_owner() {
        let mut tm = TimerQueue::new();
        tm.set_timeout(A, 10);
        tm.set_timeout(A, 20);
        tm.set_timeout(B, 30);

        assert_eq!(tm.clear_owner(A), 2);
        assert_eq!(tm.pending_for(A), 0);
        assert_eq!(tm.pending_for(B), 1);
    }

    #[test]
    fn test_clock_never_rewinds() {
        let mut tm = TimerQueue::new();
        tm.set_now(50);
        tm.set_now(10);
        assert_eq!(tm.now(), 50);
    }
}
