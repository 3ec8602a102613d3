use std::collections::VecDeque;

use crate::process::{Pid, ProcessState, ProcessTable};
use crate::schedulers::{age_all, Policy};

/// First Come First Serve. Plain FIFO, never preempts.
#[derive(Debug, Default)]
pub struct Fcfs {
    ready: VecDeque<Pid>,
}

impl Fcfs {
    pub fn new() -> Fcfs {
        Fcfs {
            ready: VecDeque::new(),
        }
    }
}

impl Policy for Fcfs {
    fn name(&self) -> String {
        String::from("First Come First Serve")
    }

    fn enqueue(&mut self, pid: Pid, procs: &mut ProcessTable) {
        if let Some(proc) = procs.get_mut(pid) {
            proc.set_state(ProcessState::Ready);
        }
        self.ready.push_back(pid);
    }

    fn select_next(&mut self, _procs: &ProcessTable) -> Option<Pid> {
        self.ready.pop_front()
    }

    fn is_preemptive(&self) -> bool {
        false
    }

    fn age_ready(&self, procs: &mut ProcessTable, delta: usize) {
        age_all(self.ready.as_slices().0, procs, delta);
        age_all(self.ready.as_slices().1, procs, delta);
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::Process;
    use crate::workload::ProcessSpec;

    fn table(pids: &[usize]) -> ProcessTable {
        let mut table = ProcessTable::new();
        for &pid in pids {
            table.insert(Process::from_spec(&ProcessSpec {
                pid,
                arrival_time: 0,
                cpu_bursts: vec![10],
                io_bursts: vec![],
            }));
        }
        table
    }

    #[test]
    fn selects_in_insertion_order() {
        let mut procs = table(&[3, 1, 2]);
        let mut policy = Fcfs::new();

        for pid in [3, 1, 2] {
            policy.enqueue(Pid::new(pid), &mut procs);
        }

        assert_eq!(policy.select_next(&procs), Some(Pid::new(3)));
        assert_eq!(policy.select_next(&procs), Some(Pid::new(1)));
        assert_eq!(policy.select_next(&procs), Some(Pid::new(2)));
        assert_eq!(policy.select_next(&procs), None);
    }

    #[test]
    fn enqueue_marks_ready() {
        let mut procs = table(&[1]);
        let mut policy = Fcfs::new();

        policy.enqueue(Pid::new(1), &mut procs);
        assert_eq!(procs.get(Pid::new(1)).unwrap().state(), ProcessState::Ready);
    }

    #[test]
    fn ages_every_queued_process() {
        let mut procs = table(&[1, 2]);
        let mut policy = Fcfs::new();
        policy.enqueue(Pid::new(1), &mut procs);
        policy.enqueue(Pid::new(2), &mut procs);

        policy.age_ready(&mut procs, 7);

        assert_eq!(procs.get(Pid::new(1)).unwrap().queued_time(), 7);
        assert_eq!(procs.get(Pid::new(2)).unwrap().queued_time(), 7);
    }

    #[test]
    fn never_preempts() {
        let policy = Fcfs::new();
        assert!(!policy.is_preemptive());

        let procs = table(&[1, 2]);
        let a = procs.get(Pid::new(1)).unwrap();
        let b = procs.get(Pid::new(2)).unwrap();
        assert!(!policy.should_preempt(a, b));
    }
}
