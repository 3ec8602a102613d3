use crate::process::Pid;
use crate::schedulers::Policy;

/// Per-run scheduling state: the policy instance, the CPU occupant and
/// the running counters the final report is built from.
pub struct SchedulerState {
    policy: Box<dyn Policy>,
    /// The process on the CPU, if any.
    current: Option<Pid>,
    /// True while a context switch is in flight and its completion event
    /// sits in the queue.
    switching: bool,
    cpu_busy_time: usize,
    context_switch_count: usize,
    /// Configured cost of every dispatch.
    context_switch_time: usize,
    total_time: usize,
}

impl SchedulerState {
    pub fn new(policy: Box<dyn Policy>, context_switch_time: usize) -> SchedulerState {
        SchedulerState {
            policy,
            current: None,
            switching: false,
            cpu_busy_time: 0,
            context_switch_count: 0,
            context_switch_time,
            total_time: 0,
        }
    }

    pub fn name(&self) -> String {
        self.policy.name()
    }

    pub fn policy(&self) -> &dyn Policy {
        self.policy.as_ref()
    }

    pub fn policy_mut(&mut self) -> &mut dyn Policy {
        self.policy.as_mut()
    }

    pub fn current(&self) -> Option<Pid> {
        self.current
    }

    pub fn set_current(&mut self, pid: Pid) {
        self.current = Some(pid);
    }

    pub fn clear_current(&mut self) {
        self.current = None;
    }

    pub fn is_switching(&self) -> bool {
        self.switching
    }

    pub fn set_switching(&mut self, switching: bool) {
        self.switching = switching;
    }

    /// Add `delta` to the time the CPU has spent executing bursts
    ///
    /// * `delta` - time the occupant just ran
    pub fn cpu_busy(&mut self, delta: usize) {
        self.cpu_busy_time += delta;
    }

    pub fn note_context_switch(&mut self) {
        self.context_switch_count += 1;
    }

    pub fn cpu_busy_time(&self) -> usize {
        self.cpu_busy_time
    }

    pub fn context_switch_count(&self) -> usize {
        self.context_switch_count
    }

    pub fn context_switch_time(&self) -> usize {
        self.context_switch_time
    }

    pub fn total_time(&self) -> usize {
        self.total_time
    }

    pub fn set_total_time(&mut self, time: usize) {
        self.total_time = time;
    }

    /// Busy time over total time, as a percentage. Zero for an empty run.
    pub fn utilization(&self) -> f64 {
        if self.total_time == 0 {
            return 0.0;
        }

        self.cpu_busy_time as f64 / self.total_time as f64 * 100.0
    }

    /// Zeroes the counters and empties the policy queue for a fresh run.
    pub fn reset(&mut self) {
        self.current = None;
        self.switching = false;
        self.cpu_busy_time = 0;
        self.context_switch_count = 0;
        self.total_time = 0;
        self.policy.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedulers::Fcfs;

    #[test]
    fn utilization_guards_empty_runs() {
        let mut state = SchedulerState::new(Box::new(Fcfs::new()), 0);
        assert_eq!(state.utilization(), 0.0);

        state.cpu_busy(10);
        state.set_total_time(15);
        assert!((state.utilization() - 66.666).abs() < 0.01);
    }

    #[test]
    fn reset_clears_counters_and_occupant() {
        let mut state = SchedulerState::new(Box::new(Fcfs::new()), 2);
        state.set_current(Pid::new(1));
        state.set_switching(true);
        state.cpu_busy(5);
        state.note_context_switch();
        state.set_total_time(9);

        state.reset();

        assert_eq!(state.current(), None);
        assert!(!state.is_switching());
        assert_eq!(state.cpu_busy_time(), 0);
        assert_eq!(state.context_switch_count(), 0);
        assert_eq!(state.total_time(), 0);
        // the configured switch cost survives resets
        assert_eq!(state.context_switch_time(), 2);
    }
}
