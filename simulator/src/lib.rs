//! A discrete-event simulator for CPU scheduling on a single processor.
//!
//! A validated workload of processes, each described by an arrival time
//! and alternating CPU and I/O bursts, is replayed under a scheduling
//! policy: FCFS, SJF, SRTN or Round Robin with a configurable quantum.
//! The run produces aggregate and per-process statistics and, when
//! enabled, a transition-by-transition trace of the schedule.
//!
//! Parsing workloads from text, command line handling and rendering the
//! results are the runner's business; this crate only deals in values.

mod process;
pub use process::{Burst, BurstKind, Pid, Process, ProcessState, ProcessTable};

mod event;
pub use event::{Event, EventKind, EventQueue};

mod workload;
pub use workload::{ProcessSpec, Workload};

mod config;
pub use config::{ParsePolicyError, PolicyKind, SimConfig};

mod schedulers;
pub use schedulers::{Fcfs, Policy, RoundRobin, Sjf, Srtn};

mod scheduler;
pub use scheduler::SchedulerState;

mod kernel;
pub use kernel::Simulation;

mod report;
pub use report::{ProcessReport, SimReport};

mod trace;
pub use trace::TraceRecord;

mod error;
pub use error::{KernelError, WorkloadError};
