use crate::process::{Pid, Process, ProcessState, ProcessTable};
use crate::schedulers::{age_all, take_min_by_key, Policy};

/// Shortest Remaining Time Next. The preemptive variant of SJF: a newly
/// ready process displaces the occupant when it has less left to run on
/// its current CPU burst.
#[derive(Debug, Default)]
pub struct Srtn {
    /// Unordered, kept in insertion order for deterministic tie-breaks.
    ready: Vec<Pid>,
}

impl Srtn {
    pub fn new() -> Srtn {
        Srtn { ready: Vec::new() }
    }
}

impl Policy for Srtn {
    fn name(&self) -> String {
        String::from("Shortest Remaining Time Next")
    }

    fn enqueue(&mut self, pid: Pid, procs: &mut ProcessTable) {
        if let Some(proc) = procs.get_mut(pid) {
            proc.set_state(ProcessState::Ready);
        }
        self.ready.push(pid);
    }

    fn select_next(&mut self, procs: &ProcessTable) -> Option<Pid> {
        take_min_by_key(&mut self.ready, procs, |proc| proc.remaining())
    }

    fn should_preempt(&self, incoming: &Process, running: &Process) -> bool {
        incoming.remaining() < running.remaining()
    }

    fn is_preemptive(&self) -> bool {
        true
    }

    fn age_ready(&self, procs: &mut ProcessTable, delta: usize) {
        age_all(&self.ready, procs, delta);
    }

    fn is_empty(&self) -> bool {
        self.ready.is_empty()
    }

    fn len(&self) -> usize {
        self.ready.len()
    }

    fn reset(&mut self) {
        self.ready.clear();
    }
}
