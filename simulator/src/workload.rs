use std::collections::HashSet;

use crate::error::WorkloadError;
use crate::process::Pid;

/// One process as described by the workload: its id, arrival time and the
/// CPU bursts with the I/O intervals separating them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProcessSpec {
    pub pid: usize,
    pub arrival_time: usize,
    pub cpu_bursts: Vec<usize>,
    /// Exactly one entry between each pair of consecutive CPU bursts.
    pub io_bursts: Vec<usize>,
}

/// A validated set of process descriptions. The kernel only ever sees
/// workloads that passed validation.
#[derive(Clone, Debug)]
pub struct Workload {
    specs: Vec<ProcessSpec>,
}

impl Workload {
    /// Validates the process descriptions and builds the workload
    ///
    /// * `specs` - the parsed process list, in input order
    pub fn new(specs: Vec<ProcessSpec>) -> Result<Workload, WorkloadError> {
        if specs.is_empty() {
            return Err(WorkloadError::Empty);
        }

        let mut seen = HashSet::new();
        for spec in specs.iter() {
            if spec.pid == 0 {
                return Err(WorkloadError::InvalidPid);
            }

            let pid = Pid::new(spec.pid);
            if !seen.insert(spec.pid) {
                return Err(WorkloadError::DuplicatePid(pid));
            }

            if spec.cpu_bursts.is_empty() {
                return Err(WorkloadError::NoCpuBursts(pid));
            }

            if spec.io_bursts.len() + 1 != spec.cpu_bursts.len() {
                return Err(WorkloadError::BurstMismatch {
                    pid,
                    cpu: spec.cpu_bursts.len(),
                    io: spec.io_bursts.len(),
                });
            }

            let zero = spec
                .cpu_bursts
                .iter()
                .chain(spec.io_bursts.iter())
                .any(|&d| d == 0);
            if zero {
                return Err(WorkloadError::ZeroDuration(pid));
            }
        }

        Ok(Workload { specs })
    }

    pub fn processes(&self) -> &[ProcessSpec] {
        &self.specs
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}
