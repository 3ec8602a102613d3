//! The ready-queue policies.
//!
//! Each policy owns the shape of its ready queue and the selection rule;
//! the kernel drives them through the `Policy` trait and never looks
//! inside. Queues hold pids only, the process records stay in the
//! kernel's table.

mod fcfs;
pub use fcfs::Fcfs;

mod sjf;
pub use sjf::Sjf;

mod srtn;
pub use srtn::Srtn;

mod round_robin;
pub use round_robin::RoundRobin;

use crate::process::{Pid, Process, ProcessTable};

/// The capability set every scheduling policy provides.
///
/// Selection must be deterministic given insertion order. Ties in the
/// ordered policies resolve by earliest arrival time, then lowest pid,
/// then first insertion.
pub trait Policy {
    fn name(&self) -> String;

    /// Adds a process to the ready queue and marks it `Ready`
    ///
    /// * `pid` - the process going ready
    /// * `procs` - the process table the queue refers into
    fn enqueue(&mut self, pid: Pid, procs: &mut ProcessTable);

    /// Removes and returns the process the policy selects next, or None
    /// when the queue is empty.
    fn select_next(&mut self, procs: &ProcessTable) -> Option<Pid>;

    /// May `incoming` displace the process currently on the CPU? Only
    /// meaningful for preemptive policies; the default never preempts.
    fn should_preempt(&self, _incoming: &Process, _running: &Process) -> bool {
        false
    }

    fn is_preemptive(&self) -> bool;

    /// Adds `delta` to the queued time of every process waiting in the
    /// ready queue, in insertion order.
    fn age_ready(&self, procs: &mut ProcessTable, delta: usize);

    /// Remaining time slice granted to the current occupant. None for
    /// policies that run bursts to completion.
    fn time_slice(&self) -> Option<usize> {
        None
    }

    /// Consumes `delta` of the current time slice, where one exists.
    fn decrement_slice(&mut self, _delta: usize) {}

    /// True when the current occupant has used up its slice.
    fn slice_expired(&self) -> bool {
        false
    }

    fn is_empty(&self) -> bool;

    fn len(&self) -> usize;

    /// Empties the queue so the policy can be reused for a fresh run.
    fn reset(&mut self);
}

/// Scans `ready` for the pid minimizing `key`, breaking ties by arrival
/// time, pid and finally queue position, and removes it.
///
/// Shared by the two shortest-first policies.
fn take_min_by_key<F>(ready: &mut Vec<Pid>, procs: &ProcessTable, key: F) -> Option<Pid>
where
    F: Fn(&Process) -> usize,
{
    let mut best: Option<(usize, (usize, usize, Pid))> = None;

    for (slot, &pid) in ready.iter().enumerate() {
        // Queue pids always resolve, only the policy removes entries
        let proc = procs.get(pid).unwrap();
        let candidate = (key(proc), proc.arrival_time(), pid);

        let better = match best {
            Some((_, held)) => candidate < held,
            None => true,
        };
        if better {
            best = Some((slot, candidate));
        }
    }

    best.map(|(slot, _)| ready.remove(slot))
}

fn age_all(ready: &[Pid], procs: &mut ProcessTable, delta: usize) {
    for &pid in ready {
        if let Some(proc) = procs.get_mut(pid) {
            proc.wait_in_queue(delta);
        }
    }
}
