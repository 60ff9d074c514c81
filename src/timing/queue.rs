use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::collections::HashSet;
use std::time::Duration;

/// Handle to a scheduled timer, usable to cancel it before it fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

/// A timer entry that has come due.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Expired<E> {
    /// The handle the entry was scheduled under.
    pub id: TimerId,
    /// The deadline the entry was scheduled for (not the drain time).
    ///
    /// Rescheduling periodic work relative to this value keeps ticks evenly
    /// spaced even when the clock is advanced in coarse steps.
    pub deadline: Duration,
    /// The scheduled event payload.
    pub event: E,
}

/// Deterministic single-owner timer queue over a caller-supplied clock.
///
/// Time is a monotone `Duration` measured from an epoch the caller picks
/// (session start, test zero). The queue never reads a wall clock; the owner
/// schedules with [`TimerQueue::schedule_after`] and drains due entries with
/// [`TimerQueue::pop_due`].
///
/// Determinism rule: entries drain ordered by deadline, and entries sharing a
/// deadline drain in scheduling order.
#[derive(Debug)]
pub struct TimerQueue<E> {
    heap: BinaryHeap<Entry<E>>,
    cancelled: HashSet<u64>,
    next_seq: u64,
}

#[derive(Debug)]
struct Entry<E> {
    deadline: Duration,
    seq: u64,
    event: E,
}

// Ordered by (deadline, seq) only; the payload never participates. Reversed so
// the std max-heap pops the earliest entry first.
impl<E> PartialEq for Entry<E> {
    fn eq(&self, other: &Self) -> bool {
        self.deadline == other.deadline && self.seq == other.seq
    }
}

impl<E> Eq for Entry<E> {}

impl<E> PartialOrd for Entry<E> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<E> Ord for Entry<E> {
    fn cmp(&self, other: &Self) -> Ordering {
        (other.deadline, other.seq).cmp(&(self.deadline, self.seq))
    }
}

impl<E> Default for TimerQueue<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> TimerQueue<E> {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            cancelled: HashSet::new(),
            next_seq: 0,
        }
    }

    /// Schedule `event` to come due at `now + delay`.
    pub fn schedule_after(&mut self, now: Duration, delay: Duration, event: E) -> TimerId {
        self.schedule_at(now + delay, event)
    }

    /// Schedule `event` to come due at an absolute deadline.
    pub fn schedule_at(&mut self, deadline: Duration, event: E) -> TimerId {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Entry {
            deadline,
            seq,
            event,
        });
        TimerId(seq)
    }

    /// Cancel a scheduled entry. Returns `false` when the entry already fired
    /// or was cancelled before.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        if self.heap.iter().any(|e| e.seq == id.0) {
            self.cancelled.insert(id.0)
        } else {
            false
        }
    }

    /// Remove all pending entries.
    pub fn clear(&mut self) {
        self.heap.clear();
        self.cancelled.clear();
    }

    /// Pop the next entry with `deadline <= now`, if any.
    ///
    /// Cancelled entries are discarded silently. Call in a loop to drain every
    /// due entry for the current time.
    pub fn pop_due(&mut self, now: Duration) -> Option<Expired<E>> {
        loop {
            let head_due = self.heap.peek().is_some_and(|e| e.deadline <= now);
            if !head_due {
                return None;
            }
            let entry = self.heap.pop()?;
            if self.cancelled.remove(&entry.seq) {
                continue;
            }
            return Some(Expired {
                id: TimerId(entry.seq),
                deadline: entry.deadline,
                event: entry.event,
            });
        }
    }

    /// Earliest pending deadline, ignoring cancelled entries.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.heap
            .iter()
            .filter(|e| !self.cancelled.contains(&e.seq))
            .map(|e| e.deadline)
            .min()
    }

    /// `true` when nothing is pending (cancelled entries do not count).
    pub fn is_empty(&self) -> bool {
        self.heap.len() == self.cancelled.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn drains_by_deadline_then_scheduling_order() {
        let mut q = TimerQueue::new();
        q.schedule_after(ms(0), ms(30), "late");
        q.schedule_after(ms(0), ms(10), "tie-a");
        q.schedule_after(ms(0), ms(10), "tie-b");

        let mut out = Vec::new();
        while let Some(e) = q.pop_due(ms(100)) {
            out.push(e.event);
        }
        assert_eq!(out, vec!["tie-a", "tie-b", "late"]);
    }

    #[test]
    fn entries_in_the_future_stay_queued() {
        let mut q = TimerQueue::new();
        q.schedule_after(ms(0), ms(20), ());
        assert!(q.pop_due(ms(19)).is_none());
        assert!(q.pop_due(ms(20)).is_some());
        assert!(q.is_empty());
    }

    #[test]
    fn cancel_suppresses_delivery() {
        let mut q = TimerQueue::new();
        let keep = q.schedule_after(ms(0), ms(5), "keep");
        let drop = q.schedule_after(ms(0), ms(5), "drop");
        assert!(q.cancel(drop));
        assert!(!q.cancel(drop), "double cancel reports false");

        let fired = q.pop_due(ms(10)).unwrap();
        assert_eq!(fired.id, keep);
        assert_eq!(fired.event, "keep");
        assert!(q.pop_due(ms(10)).is_none());
    }

    #[test]
    fn cancel_after_fire_reports_false() {
        let mut q = TimerQueue::new();
        let id = q.schedule_after(ms(0), ms(1), ());
        assert!(q.pop_due(ms(1)).is_some());
        assert!(!q.cancel(id));
    }

    #[test]
    fn expired_reports_scheduled_deadline_not_drain_time() {
        let mut q = TimerQueue::new();
        q.schedule_after(ms(0), ms(20), ());
        let e = q.pop_due(ms(95)).unwrap();
        assert_eq!(e.deadline, ms(20));
    }

    #[test]
    fn next_deadline_skips_cancelled_entries() {
        let mut q = TimerQueue::new();
        let early = q.schedule_after(ms(0), ms(5), ());
        q.schedule_after(ms(0), ms(9), ());
        q.cancel(early);
        assert_eq!(q.next_deadline(), Some(ms(9)));
    }
}
