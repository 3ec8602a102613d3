use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::workload::ProcessSpec;

/// Process identifier. Always positive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Pid(usize);

impl Pid {
    /// Creates a new Pid
    ///
    /// * `pid` - the process identifier as usize
    pub fn new(pid: usize) -> Pid {
        Pid(pid)
    }

    pub fn get(&self) -> usize {
        self.0
    }
}

impl fmt::Display for Pid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The lifecycle state of a process.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ProcessState {
    New,
    Ready,
    Running,
    Blocked,
    Terminated,
}

impl fmt::Display for ProcessState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProcessState::New => "new",
            ProcessState::Ready => "ready",
            ProcessState::Running => "running",
            ProcessState::Blocked => "blocked",
            ProcessState::Terminated => "terminated",
        };
        write!(f, "{}", name)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BurstKind {
    Cpu,
    Io,
}

/// A single contiguous CPU or I/O interval.
#[derive(Clone, Copy, Debug)]
pub struct Burst {
    pub kind: BurstKind,
    pub duration: usize,
    /// Time the burst still has to run. Never exceeds `duration`.
    pub remaining: usize,
}

impl Burst {
    fn cpu(duration: usize) -> Burst {
        Burst {
            kind: BurstKind::Cpu,
            duration,
            remaining: duration,
        }
    }

    fn io(duration: usize) -> Burst {
        Burst {
            kind: BurstKind::Io,
            duration,
            remaining: duration,
        }
    }
}

/// A workload entity: the immutable burst list plus the mutable execution
/// state and accumulated statistics for one run.
#[derive(Clone, Debug)]
pub struct Process {
    pid: Pid,
    arrival_time: usize,
    /// Alternating CPU and I/O bursts, starting and ending with CPU.
    bursts: Vec<Burst>,
    /// Index of the burst being executed. Only moves forward; equals
    /// `bursts.len()` once the process has terminated.
    current_burst: usize,
    state: ProcessState,
    /// Total CPU demand, fixed at construction.
    service_time: usize,
    /// Total I/O demand, fixed at construction.
    io_time: usize,
    /// Written exactly once, when the process terminates.
    finish_time: Option<usize>,
    /// Time spent sitting in a ready queue, aged by the policy.
    queued_time: usize,
}

impl Process {
    /// Builds a process from its workload description, interleaving the
    /// CPU bursts with the I/O bursts
    ///
    /// * `spec` - validated workload entry for this process
    pub fn from_spec(spec: &ProcessSpec) -> Process {
        let mut bursts = Vec::with_capacity(spec.cpu_bursts.len() + spec.io_bursts.len());
        for (i, &cpu) in spec.cpu_bursts.iter().enumerate() {
            bursts.push(Burst::cpu(cpu));
            if let Some(&io) = spec.io_bursts.get(i) {
                bursts.push(Burst::io(io));
            }
        }

        Process {
            pid: Pid::new(spec.pid),
            arrival_time: spec.arrival_time,
            bursts,
            current_burst: 0,
            state: ProcessState::New,
            service_time: spec.cpu_bursts.iter().sum(),
            io_time: spec.io_bursts.iter().sum(),
            finish_time: None,
            queued_time: 0,
        }
    }

    pub fn pid(&self) -> Pid {
        self.pid
    }

    pub fn arrival_time(&self) -> usize {
        self.arrival_time
    }

    pub fn state(&self) -> ProcessState {
        self.state
    }

    pub fn set_state(&mut self, state: ProcessState) {
        self.state = state;
    }

    pub fn service_time(&self) -> usize {
        self.service_time
    }

    pub fn io_time(&self) -> usize {
        self.io_time
    }

    pub fn finish_time(&self) -> Option<usize> {
        self.finish_time
    }

    pub fn queued_time(&self) -> usize {
        self.queued_time
    }

    /// Records the termination timestamp. Returns false if it was already
    /// written, which the kernel treats as a broken invariant.
    pub fn set_finish_time(&mut self, time: usize) -> bool {
        if self.finish_time.is_some() {
            return false;
        }

        self.finish_time = Some(time);
        true
    }

    /// Add `time` to the total this process has waited in a ready queue
    ///
    /// * `time` - time spent queued behind other processes
    pub fn wait_in_queue(&mut self, time: usize) {
        self.queued_time += time;
    }

    pub fn current_burst_index(&self) -> usize {
        self.current_burst
    }

    pub fn current_burst(&self) -> Option<&Burst> {
        self.bursts.get(self.current_burst)
    }

    /// True while there are bursts left to execute.
    pub fn has_more_bursts(&self) -> bool {
        self.current_burst < self.bursts.len()
    }

    /// Moves to the next burst.
    pub fn advance_burst(&mut self) {
        if self.current_burst < self.bursts.len() {
            self.current_burst += 1;
        }
    }

    /// Time left on the burst being executed, 0 once past the end.
    pub fn remaining(&self) -> usize {
        self.current_burst().map_or(0, |b| b.remaining)
    }

    /// The SJF selection key: the remaining count of the current burst if
    /// it is CPU, otherwise the duration of the next CPU burst.
    pub fn next_cpu_burst_time(&self) -> usize {
        if let Some(burst) = self.current_burst() {
            if burst.kind == BurstKind::Cpu {
                return burst.remaining;
            }
        }

        self.bursts[self.current_burst..]
            .iter()
            .find(|b| b.kind == BurstKind::Cpu)
            .map_or(0, |b| b.duration)
    }

    /// Charges `time` of execution against the current burst. Returns false
    /// when the burst does not have that much time left.
    pub fn try_consume(&mut self, time: usize) -> bool {
        match self.bursts.get_mut(self.current_burst) {
            Some(burst) => match burst.remaining.checked_sub(time) {
                Some(left) => {
                    burst.remaining = left;
                    true
                }
                None => false,
            },
            None => false,
        }
    }

    /// Restores the process to its pre-run condition so the same workload
    /// can be replayed under another policy.
    pub fn reset(&mut self) {
        for burst in self.bursts.iter_mut() {
            burst.remaining = burst.duration;
        }
        self.current_burst = 0;
        self.state = ProcessState::New;
        self.finish_time = None;
        self.queued_time = 0;
    }
}

/// The kernel-owned process store. Events and ready queues carry pids;
/// this table is the only place the records themselves live.
#[derive(Clone, Debug, Default)]
pub struct ProcessTable {
    procs: Vec<Process>,
    index: HashMap<Pid, usize>,
}

impl ProcessTable {
    pub fn new() -> ProcessTable {
        ProcessTable::default()
    }

    pub(crate) fn insert(&mut self, proc: Process) {
        self.index.insert(proc.pid(), self.procs.len());
        self.procs.push(proc);
    }

    pub fn get(&self, pid: Pid) -> Option<&Process> {
        self.index.get(&pid).map(|&slot| &self.procs[slot])
    }

    pub fn get_mut(&mut self, pid: Pid) -> Option<&mut Process> {
        match self.index.get(&pid) {
            Some(&slot) => Some(&mut self.procs[slot]),
            None => None,
        }
    }

    /// Iterates in workload order.
    pub fn iter(&self) -> impl Iterator<Item = &Process> {
        self.procs.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Process> {
        self.procs.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.procs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.procs.is_empty()
    }
}
