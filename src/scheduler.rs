//! Timer queue for delayed messages
//!
//! Debounced search, deferred sort and tooltip dismissal all become a
//! message delivered at a deadline. The event loop asks for the next
//! deadline to sleep until, then drains everything that is due.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::time::Instant;

use crate::messages::Msg;

#[derive(Debug)]
struct Timer {
    due: Instant,
    /// Insertion order, so timers with the same deadline fire FIFO
    seq: u64,
    msg: Msg,
}

impl PartialEq for Timer {
    fn eq(&self, other: &Self) -> bool {
        self.due == other.due && self.seq == other.seq
    }
}

impl Eq for Timer {}

impl PartialOrd for Timer {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Timer {
    fn cmp(&self, other: &Self) -> Ordering {
        self.due
            .cmp(&other.due)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

/// Pending delayed messages ordered by deadline
#[derive(Debug, Default)]
pub struct Scheduler {
    timers: BinaryHeap<Reverse<Timer>>,
    next_seq: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver `msg` once `due` has passed
    pub fn schedule(&mut self, due: Instant, msg: impl Into<Msg>) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.timers.push(Reverse(Timer {
            due,
            seq,
            msg: msg.into(),
        }));
    }

    /// Earliest pending deadline
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.peek().map(|Reverse(timer)| timer.due)
    }

    /// Remove and return every message due at `now`, earliest first
    pub fn take_due(&mut self, now: Instant) -> Vec<Msg> {
        let mut due = Vec::new();
        while self
            .timers
            .peek()
            .is_some_and(|Reverse(timer)| timer.due <= now)
        {
            if let Some(Reverse(timer)) = self.timers.pop() {
                due.push(timer.msg);
            }
        }
        due
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::CsvMsg;
    use std::time::Duration;

    fn generation(msg: &Msg) -> u64 {
        match msg {
            Msg::Csv(CsvMsg::ApplySearch { generation }) => *generation,
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_take_due_in_deadline_order() {
        let start = Instant::now();
        let mut scheduler = Scheduler::new();
        scheduler.schedule(start + Duration::from_millis(30), CsvMsg::ApplySearch { generation: 3 });
        scheduler.schedule(start + Duration::from_millis(10), CsvMsg::ApplySearch { generation: 1 });
        scheduler.schedule(start + Duration::from_millis(20), CsvMsg::ApplySearch { generation: 2 });

        assert_eq!(scheduler.next_deadline(), Some(start + Duration::from_millis(10)));
        assert!(scheduler.take_due(start).is_empty());

        let due = scheduler.take_due(start + Duration::from_millis(25));
        assert_eq!(due.iter().map(generation).collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(scheduler.len(), 1);
    }

    #[test]
    fn test_same_deadline_is_fifo() {
        let now = Instant::now();
        let mut scheduler = Scheduler::new();
        for g in 0..5 {
            scheduler.schedule(now, CsvMsg::ApplySearch { generation: g });
        }
        let due = scheduler.take_due(now);
        assert_eq!(due.iter().map(generation).collect::<Vec<_>>(), vec![0, 1, 2, 3, 4]);
        assert!(scheduler.is_empty());
        assert_eq!(scheduler.next_deadline(), None);
    }
}
