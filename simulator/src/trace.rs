use std::fmt;

use serde::Serialize;

use crate::process::{Pid, ProcessState};

/// One state transition of one process, as observed by the kernel.
///
/// With tracing enabled the kernel records every transition in event
/// order; the sequence is precise enough to replay a schedule from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct TraceRecord {
    pub time: usize,
    pub pid: Pid,
    pub from: ProcessState,
    pub to: ProcessState,
}

impl TraceRecord {
    pub fn new(time: usize, pid: Pid, from: ProcessState, to: ProcessState) -> TraceRecord {
        TraceRecord {
            time,
            pid,
            from,
            to,
        }
    }
}

impl fmt::Display for TraceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "At time {}: process {} moves from {} to {}",
            self.time, self.pid, self.from, self.to
        )
    }
}
