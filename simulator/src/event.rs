use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use crate::process::Pid;

/// What happened. Every event carries the pid it concerns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventKind {
    Arrival,
    CpuBurstComplete,
    IoComplete,
    TimerInterrupt,
    ContextSwitchComplete,
}

/// A scheduled occurrence. Immutable once enqueued; an event that no
/// longer applies is discarded by its handler, never cancelled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Event {
    pub kind: EventKind,
    pub time: usize,
    pub pid: Pid,
}

impl Event {
    pub fn new(kind: EventKind, time: usize, pid: Pid) -> Event {
        Event { kind, time, pid }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct QueuedEvent {
    time: usize,
    /// Insertion counter. Among equal timestamps, earlier insertion wins.
    seq: usize,
    event: Event,
}

impl Ord for QueuedEvent {
    fn cmp(&self, other: &Self) -> Ordering {
        self.time
            .cmp(&other.time)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

impl PartialOrd for QueuedEvent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Min-priority queue of events, keyed by time then insertion order.
#[derive(Clone, Debug, Default)]
pub struct EventQueue {
    heap: BinaryHeap<Reverse<QueuedEvent>>,
    next_seq: usize,
}

impl EventQueue {
    pub fn new() -> EventQueue {
        EventQueue::default()
    }

    pub fn push(&mut self, event: Event) {
        let queued = QueuedEvent {
            time: event.time,
            seq: self.next_seq,
            event,
        };
        self.next_seq += 1;
        self.heap.push(Reverse(queued));
    }

    /// Removes and returns the earliest event.
    pub fn pop(&mut self) -> Option<Event> {
        self.heap.pop().map(|Reverse(queued)| queued.event)
    }

    pub fn peek(&self) -> Option<&Event> {
        self.heap.peek().map(|Reverse(queued)| &queued.event)
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn clear(&mut self) {
        self.heap.clear();
        self.next_seq = 0;
    }
}
