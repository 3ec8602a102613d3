use serde::Serialize;

use crate::process::Pid;
use crate::trace::TraceRecord;

/// Final statistics for one process.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProcessReport {
    pub pid: Pid,
    pub arrival_time: usize,
    pub service_time: usize,
    pub io_time: usize,
    pub finish_time: usize,
    /// finish minus arrival.
    pub turnaround_time: usize,
    /// Turnaround minus service minus I/O, clamped at zero. Context
    /// switch overhead sinks into this number.
    pub waiting_time: usize,
}

/// The outcome of one simulation run under one policy.
#[derive(Clone, Debug, Serialize)]
pub struct SimReport {
    pub policy: String,
    pub total_time: usize,
    pub cpu_busy_time: usize,
    /// Percentage of total time the CPU spent executing bursts.
    pub cpu_utilization: f64,
    pub context_switch_count: usize,
    pub processes: Vec<ProcessReport>,
    /// Empty unless the run was traced.
    pub trace: Vec<TraceRecord>,
}
