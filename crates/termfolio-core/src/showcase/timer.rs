//! Single-threaded timer queue on a virtual clock.
//!
//! Nothing here touches wall time. The owner moves the clock forward with
//! `pop_due()` / `advance_to()`, so a test can fast-forward a whole run in
//! one call and the frame loop can feed it real frame deltas.

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

/// Handle to a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// Pending timers ordered by deadline, then by scheduling order.
#[derive(Debug)]
pub struct TimerQueue<E> {
    now: Duration,
    next_id: u64,
    pending: BTreeMap<(Duration, TimerId), E>,
    deadlines: HashMap<TimerId, Duration>,
}

impl<E> Default for TimerQueue<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> TimerQueue<E> {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 0,
            pending: BTreeMap::new(),
            deadlines: HashMap::new(),
        }
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Schedule `event` to fire `delay` after the current time.
    pub fn schedule(&mut self, delay: Duration, event: E) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let deadline = self.now + delay;
        self.pending.insert((deadline, id), event);
        self.deadlines.insert(id, deadline);
        id
    }

    /// Cancel a pending timer. Returns `false` if it already fired or was
    /// cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        match self.deadlines.remove(&id) {
            Some(deadline) => self.pending.remove(&(deadline, id)).is_some(),
            None => false,
        }
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.deadlines.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Deadline of the earliest pending timer.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending.keys().next().map(|(deadline, _)| *deadline)
    }

    /// Remove the earliest timer due at or before `until` and move the
    /// clock to its deadline.
    ///
    /// Call in a loop: timers scheduled between calls are seen by the next
    /// call, so chains of timers inside one window all fire in order.
    pub fn pop_due(&mut self, until: Duration) -> Option<(TimerId, E)> {
        let (&(deadline, id), _) = self.pending.first_key_value()?;
        if deadline > until {
            return None;
        }
        let event = self.pending.remove(&(deadline, id))?;
        self.deadlines.remove(&id);
        self.now = self.now.max(deadline);
        Some((id, event))
    }

    /// Move the clock forward to `until` without firing anything.
    pub fn advance_to(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn drain(q: &mut TimerQueue<&'static str>, until: Duration) -> Vec<&'static str> {
        let mut fired = Vec::new();
        while let Some((_, e)) = q.pop_due(until) {
            fired.push(e);
        }
        q.advance_to(until);
        fired
    }

    #[test]
    fn fires_in_deadline_order() {
        let mut q = TimerQueue::new();
        q.schedule(ms(30), "c");
        q.schedule(ms(10), "a");
        q.schedule(ms(20), "b");
        assert_eq!(q.next_deadline(), Some(ms(10)));
        assert_eq!(drain(&mut q, ms(25)), vec!["a", "b"]);
        assert_eq!(q.now(), ms(25));
        assert_eq!(drain(&mut q, ms(100)), vec!["c"]);
        assert!(q.is_empty());
    }

    #[test]
    fn equal_deadlines_fire_in_schedule_order() {
        let mut q = TimerQueue::new();
        q.schedule(ms(5), "first");
        q.schedule(ms(5), "second");
        assert_eq!(drain(&mut q, ms(5)), vec!["first", "second"]);
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let mut q = TimerQueue::new();
        let a = q.schedule(ms(10), "a");
        q.schedule(ms(20), "b");
        assert!(q.is_pending(a));
        assert!(q.cancel(a));
        assert!(!q.cancel(a));
        assert!(!q.is_pending(a));
        assert_eq!(drain(&mut q, ms(50)), vec!["b"]);
    }

    #[test]
    fn chained_schedule_fires_within_same_window() {
        let mut q = TimerQueue::new();
        q.schedule(ms(10), 1u32);
        let mut fired = Vec::new();
        while let Some((_, n)) = q.pop_due(ms(100)) {
            fired.push((n, q.now()));
            if n < 4 {
                q.schedule(ms(10), n + 1);
            }
        }
        assert_eq!(
            fired,
            vec![(1, ms(10)), (2, ms(20)), (3, ms(30)), (4, ms(40))]
        );
    }

    #[test]
    fn delay_is_relative_to_current_time() {
        let mut q = TimerQueue::new();
        q.advance_to(ms(1000));
        q.schedule(ms(5), "x");
        assert_eq!(q.next_deadline(), Some(ms(1005)));
        assert!(q.pop_due(ms(1004)).is_none());
        assert!(q.pop_due(ms(1005)).is_some());
    }

    mod prop {
        use super::*;
        use proptest::prelude::*;
        use proptest::prelude::prop;

        proptest! {
            #[test]
            fn pops_follow_deadlines_and_skip_cancelled(
                delays in prop::collection::vec(0u64..10_000, 1..50),
                cancel in prop::collection::vec(any::<bool>(), 50),
            ) {
                let mut q = TimerQueue::new();
                let ids: Vec<TimerId> = delays.iter().map(|&d| q.schedule(ms(d), d)).collect();
                for (id, c) in ids.iter().zip(&cancel) {
                    if *c {
                        q.cancel(*id);
                    }
                }
                let live = q.len();
                let mut last = Duration::ZERO;
                let mut fired = 0;
                while let Some((_, d)) = q.pop_due(ms(10_000)) {
                    prop_assert!(ms(d) >= last);
                    prop_assert_eq!(q.now(), ms(d));
                    last = ms(d);
                    fired += 1;
                }
                prop_assert_eq!(fired, live);
                prop_assert!(q.is_empty());
            }
        }
    }
}
