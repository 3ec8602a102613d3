use std::error::Error;
use std::fmt;

use crate::event::Event;
use crate::process::{Pid, ProcessState};

/// A workload that was rejected before the kernel ever saw it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkloadError {
    /// The process list was empty.
    Empty,
    /// A process id was zero.
    InvalidPid,
    /// Two processes carried the same id.
    DuplicatePid(Pid),
    /// A process had no CPU bursts at all.
    NoCpuBursts(Pid),
    /// A burst duration was zero.
    ZeroDuration(Pid),
    /// The I/O burst count does not interleave with the CPU bursts.
    BurstMismatch { pid: Pid, cpu: usize, io: usize },
}

impl fmt::Display for WorkloadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkloadError::Empty => write!(f, "workload contains no processes"),
            WorkloadError::InvalidPid => write!(f, "process ids must be positive"),
            WorkloadError::DuplicatePid(pid) => {
                write!(f, "duplicate process id {}", pid)
            }
            WorkloadError::NoCpuBursts(pid) => {
                write!(f, "process {} has no CPU bursts", pid)
            }
            WorkloadError::ZeroDuration(pid) => {
                write!(f, "process {} has a burst of zero duration", pid)
            }
            WorkloadError::BurstMismatch { pid, cpu, io } => write!(
                f,
                "process {} has {} CPU bursts but {} I/O bursts, expected {}",
                pid,
                cpu,
                io,
                cpu - 1
            ),
        }
    }
}

impl Error for WorkloadError {}

/// A broken kernel invariant. These are programmer errors: the run is
/// aborted and partial results are not reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KernelError {
    /// An event was dequeued with a timestamp behind the clock.
    TimeRegression { event: Event, now: usize },
    /// An event referenced a pid that is not in the process table.
    UnknownPid { pid: Pid, time: usize },
    /// The running process was charged more time than its burst had left.
    RemainingUnderflow { pid: Pid, time: usize },
    /// An event found its process in a state its handler cannot accept.
    BadProcessState { event: Event, state: ProcessState },
    /// A finish time was written twice.
    FinishRewrite { pid: Pid, time: usize },
    /// The event queue drained while a process had not terminated.
    Unfinished { pid: Pid, time: usize },
}

impl fmt::Display for KernelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KernelError::TimeRegression { event, now } => write!(
                f,
                "event {:?} for process {} at time {} is behind the clock ({})",
                event.kind, event.pid, event.time, now
            ),
            KernelError::UnknownPid { pid, time } => {
                write!(f, "unknown process {} at time {}", pid, time)
            }
            KernelError::RemainingUnderflow { pid, time } => write!(
                f,
                "process {} ran past its burst remaining at time {}",
                pid, time
            ),
            KernelError::BadProcessState { event, state } => write!(
                f,
                "event {:?} at time {} found process {} in state {}",
                event.kind, event.time, event.pid, state
            ),
            KernelError::FinishRewrite { pid, time } => write!(
                f,
                "finish time of process {} rewritten at time {}",
                pid, time
            ),
            KernelError::Unfinished { pid, time } => write!(
                f,
                "event queue drained at time {} but process {} never terminated",
                time, pid
            ),
        }
    }
}

impl Error for KernelError {}
