use std::collections::VecDeque;
use std::num::NonZeroUsize;

use crate::process::{Pid, ProcessState, ProcessTable};
use crate::schedulers::{age_all, Policy};

/// Round Robin. FIFO selection with a fixed quantum; preemption happens
/// through the kernel's timer interrupt when the slice runs out, never
/// on arrival.
#[derive(Debug)]
pub struct RoundRobin {
    ready: VecDeque<Pid>,
    quantum: NonZeroUsize,
    /// What is left of the current occupant's slice.
    time_slice: usize,
}

impl RoundRobin {
    /// Creates a Round Robin policy
    ///
    /// * `quantum` - the slice each process gets before the timer fires
    pub fn new(quantum: NonZeroUsize) -> RoundRobin {
        RoundRobin {
            ready: VecDeque::new(),
            quantum,
            time_slice: quantum.get(),
        }
    }

    pub fn quantum(&self) -> usize {
        self.quantum.get()
    }
}

impl Policy for RoundRobin {
    fn name(&self) -> String {
        format!("Round Robin (quantum={})", self.quantum)
    }

    fn enqueue(&mut self, pid: Pid, procs: &mut ProcessTable) {
        if let Some(proc) = procs.get_mut(pid) {
            proc.set_state(ProcessState::Ready);
        }
        self.ready.push_back(pid);
    }

    fn select_next(&mut self, _procs: &ProcessTable) -> Option<Pid> {
        let pid = self.ready.pop_front()?;
        self.time_slice = self.quantum.get();
        Some(pid)
    }

    fn is_preemptive(&self) -> bool {
        true
    }

    fn age_ready(&self, procs: &mut ProcessTable, delta: usize) {
        age_all(self.ready.as_slices().0, procs, delta);
        age_all(self.ready.as_slices().1, procs, delta);
    }

    fn time_slice(&self) -> Option<usize> {
        Some(self.time_slice)
    }

    fn decrement_slice(&mut self, delta: usize) {
        self.time_slice = self.time_slice.saturating_sub(delta);
    }

    fn slice_expired(&self) -> bool {
        self.time_slice == 0
    }

    fn is_empty(&self) -> bool {
        self.ready.is_empty()
    }

    fn len(&self) -> usize {
        self.ready.len()
    }

    fn reset(&mut self) {
        self.ready.clear();
        self.time_slice = self.quantum.get();
    }
}
