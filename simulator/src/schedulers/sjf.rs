use crate::process::{Pid, ProcessState, ProcessTable};
use crate::schedulers::{age_all, take_min_by_key, Policy};

/// Shortest Job First. Picks the ready process with the smallest next
/// CPU burst; a running process is never disturbed.
#[derive(Debug, Default)]
pub struct Sjf {
    /// Unordered, kept in insertion order for deterministic tie-breaks.
    ready: Vec<Pid>,
}

impl Sjf {
    pub fn new() -> Sjf {
        Sjf { ready: Vec::new() }
    }
}

impl Policy for Sjf {
    fn name(&self) -> String {
        String::from("Shortest Job First")
    }

    fn enqueue(&mut self, pid: Pid, procs: &mut ProcessTable) {
        if let Some(proc) = procs.get_mut(pid) {
            proc.set_state(ProcessState::Ready);
        }
        self.ready.push(pid);
    }

    fn select_next(&mut self, procs: &ProcessTable) -> Option<Pid> {
        take_min_by_key(&mut self.ready, procs, |proc| proc.next_cpu_burst_time())
    }

    fn is_preemptive(&self) -> bool {
        false
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::Process;
    use crate::workload::ProcessSpec;

    fn table(specs: &[(usize, usize, usize)]) -> ProcessTable {
        let mut table = ProcessTable::new();
        for &(pid, arrival, burst) in specs {
            table.insert(Process::from_spec(&ProcessSpec {
                pid,
                arrival_time: arrival,
                cpu_bursts: vec![burst],
                io_bursts: vec![],
            }));
        }
        table
    }

    #[test]
    fn selects_shortest_next_burst() {
        let mut procs = table(&[(1, 0, 8), (2, 0, 3), (3, 0, 5)]);
        let mut policy = Sjf::new();
        for pid in [1, 2, 3] {
            policy.enqueue(Pid::new(pid), &mut procs);
        }

        assert_eq!(policy.select_next(&procs), Some(Pid::new(2)));
        assert_eq!(policy.select_next(&procs), Some(Pid::new(3)));
        assert_eq!(policy.select_next(&procs), Some(Pid::new(1)));
    }

    #[test]
    fn equal_bursts_break_on_arrival_then_pid() {
        let mut procs = table(&[(5, 4, 6), (2, 1, 6), (9, 1, 6)]);
        let mut policy = Sjf::new();
        for pid in [5, 9, 2] {
            policy.enqueue(Pid::new(pid), &mut procs);
        }

        // same burst length: earliest arrival first, lowest pid between those
        assert_eq!(policy.select_next(&procs), Some(Pid::new(2)));
        assert_eq!(policy.select_next(&procs), Some(Pid::new(9)));
        assert_eq!(policy.select_next(&procs), Some(Pid::new(5)));
    }

    #[test]
    fn partially_run_burst_counts_its_remaining() {
        let mut procs = table(&[(1, 0, 10), (2, 0, 6)]);
        // process 1 already executed 7 of its 10 units
        procs.get_mut(Pid::new(1)).unwrap().try_consume(7);

        let mut policy = Sjf::new();
        policy.enqueue(Pid::new(2), &mut procs);
        policy.enqueue(Pid::new(1), &mut procs);

        assert_eq!(policy.select_next(&procs), Some(Pid::new(1)));
    }
}
