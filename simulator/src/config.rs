use std::error::Error;
use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;

use crate::schedulers::{Fcfs, Policy, RoundRobin, Sjf, Srtn};

/// Which scheduling policy a run uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PolicyKind {
    Fcfs,
    Sjf,
    Srtn,
    RoundRobin(NonZeroUsize),
}

impl PolicyKind {
    /// Builds a fresh policy instance of this kind.
    pub fn build(&self) -> Box<dyn Policy> {
        match *self {
            PolicyKind::Fcfs => Box::new(Fcfs::new()),
            PolicyKind::Sjf => Box::new(Sjf::new()),
            PolicyKind::Srtn => Box::new(Srtn::new()),
            PolicyKind::RoundRobin(quantum) => Box::new(RoundRobin::new(quantum)),
        }
    }

    /// The comparison set a full report covers: every policy, with the
    /// three standard Round Robin quanta.
    pub fn standard_set() -> Vec<PolicyKind> {
        let quanta = [10, 50, 100];
        let mut kinds = vec![PolicyKind::Fcfs, PolicyKind::Sjf, PolicyKind::Srtn];
        for q in quanta {
            // The quanta above are all nonzero
            kinds.push(PolicyKind::RoundRobin(NonZeroUsize::new(q).unwrap()));
        }
        kinds
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolicyKind::Fcfs => write!(f, "FCFS"),
            PolicyKind::Sjf => write!(f, "SJF"),
            PolicyKind::Srtn => write!(f, "SRTN"),
            PolicyKind::RoundRobin(q) => write!(f, "RR{}", q),
        }
    }
}

/// A policy name that could not be understood.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsePolicyError(String);

impl fmt::Display for ParsePolicyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown policy {:?}, expected FCFS, SJF, SRTN or RR<quantum>",
            self.0
        )
    }
}

impl Error for ParsePolicyError {}

impl FromStr for PolicyKind {
    type Err = ParsePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_ascii_uppercase();
        match upper.as_str() {
            "FCFS" => Ok(PolicyKind::Fcfs),
            "SJF" => Ok(PolicyKind::Sjf),
            "SRTN" => Ok(PolicyKind::Srtn),
            _ => {
                let quantum = upper
                    .strip_prefix("RR")
                    .and_then(|q| q.parse::<usize>().ok())
                    .and_then(NonZeroUsize::new)
                    .ok_or_else(|| ParsePolicyError(s.to_owned()))?;
                Ok(PolicyKind::RoundRobin(quantum))
            }
        }
    }
}

/// Everything a single simulation run is parameterized on.
#[derive(Clone, Copy, Debug)]
pub struct SimConfig {
    pub policy: PolicyKind,
    /// Cost of every dispatch, including idle to running. Charged as idle
    /// CPU time.
    pub context_switch_time: usize,
    pub trace_enabled: bool,
}

impl SimConfig {
    pub fn new(policy: PolicyKind) -> SimConfig {
        SimConfig {
            policy,
            context_switch_time: 0,
            trace_enabled: false,
        }
    }

    pub fn with_context_switch_time(mut self, time: usize) -> SimConfig {
        self.context_switch_time = time;
        self
    }

    pub fn with_trace(mut self) -> SimConfig {
        self.trace_enabled = true;
        self
    }
}
