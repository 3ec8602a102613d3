use log::{debug, trace};

use crate::config::SimConfig;
use crate::error::KernelError;
use crate::event::{Event, EventKind, EventQueue};
use crate::process::{Pid, Process, ProcessState, ProcessTable};
use crate::report::{ProcessReport, SimReport};
use crate::scheduler::SchedulerState;
use crate::trace::TraceRecord;
use crate::workload::Workload;

/// The discrete-event simulation of one workload under one policy.
///
/// The kernel owns the clock, the event queue, the process table and the
/// scheduler state for the whole run. Events and ready queues carry pids;
/// all process records live in the table. `run` resets everything first,
/// so the same simulation can be replayed and yields identical results.
pub struct Simulation {
    /// Simulation clock. Monotonic within a run.
    clock: usize,
    events: EventQueue,
    procs: ProcessTable,
    sched: SchedulerState,
    trace_enabled: bool,
    trace: Vec<TraceRecord>,
}

impl Simulation {
    /// Builds a simulation from a validated workload
    ///
    /// * `workload` - the process descriptions to replay
    /// * `config` - policy, switch cost and trace settings for this run
    pub fn new(workload: &Workload, config: &SimConfig) -> Simulation {
        let mut procs = ProcessTable::new();
        for spec in workload.processes() {
            procs.insert(Process::from_spec(spec));
        }

        Simulation {
            clock: 0,
            events: EventQueue::new(),
            procs,
            sched: SchedulerState::new(config.policy.build(), config.context_switch_time),
            trace_enabled: config.trace_enabled,
            trace: Vec::new(),
        }
    }

    /// Replays the workload and returns the run's report.
    pub fn run(&mut self) -> Result<SimReport, KernelError> {
        self.reset();
        self.seed_arrivals();

        while let Some(event) = self.events.pop() {
            self.advance_clock(event)?;
            self.handle(event)?;
            self.check_time_slice();
        }

        self.finalize()
    }

    fn reset(&mut self) {
        self.clock = 0;
        self.events.clear();
        self.trace.clear();
        self.sched.reset();
        for proc in self.procs.iter_mut() {
            proc.reset();
        }
    }

    fn seed_arrivals(&mut self) {
        let mut order: Vec<(usize, Pid)> = self
            .procs
            .iter()
            .map(|proc| (proc.arrival_time(), proc.pid()))
            .collect();
        // FIFO among equal timestamps then resolves to the lower pid
        order.sort();

        for (time, pid) in order {
            self.events.push(Event::new(EventKind::Arrival, time, pid));
        }
    }

    /// Moves the clock to the event's timestamp, charging the elapsed
    /// interval: ready processes age, the occupant consumes its burst and
    /// its slice, the CPU accumulates busy time.
    fn advance_clock(&mut self, event: Event) -> Result<(), KernelError> {
        if event.time < self.clock {
            return Err(KernelError::TimeRegression {
                event,
                now: self.clock,
            });
        }

        let delta = event.time - self.clock;
        if delta > 0 {
            self.sched.policy().age_ready(&mut self.procs, delta);

            if let Some(pid) = self.sched.current() {
                self.sched.cpu_busy(delta);
                let proc = self.procs.get_mut(pid).ok_or(KernelError::UnknownPid {
                    pid,
                    time: event.time,
                })?;
                if !proc.try_consume(delta) {
                    return Err(KernelError::RemainingUnderflow {
                        pid,
                        time: event.time,
                    });
                }
                self.sched.policy_mut().decrement_slice(delta);
            }
        }

        self.clock = event.time;
        Ok(())
    }

    fn handle(&mut self, event: Event) -> Result<(), KernelError> {
        match event.kind {
            EventKind::Arrival => self.on_arrival(event),
            EventKind::CpuBurstComplete => self.on_cpu_burst_complete(event),
            EventKind::IoComplete => self.on_io_complete(event),
            EventKind::TimerInterrupt => self.on_timer_interrupt(event),
            EventKind::ContextSwitchComplete => self.on_context_switch_complete(event),
        }
    }

    fn on_arrival(&mut self, event: Event) -> Result<(), KernelError> {
        let state = self.proc(event.pid)?.state();
        if state != ProcessState::New {
            return Err(KernelError::BadProcessState { event, state });
        }

        self.make_ready(event.pid)?;
        self.ready_process(event)
    }

    fn on_cpu_burst_complete(&mut self, event: Event) -> Result<(), KernelError> {
        let pid = event.pid;
        let proc = self.proc(pid)?;
        let stale = self.sched.current() != Some(pid)
            || proc.state() != ProcessState::Running
            || proc.remaining() != 0;
        if stale {
            trace!("t={}: stale burst completion for process {}", self.clock, pid);
            return Ok(());
        }

        self.proc_mut(pid)?.advance_burst();

        if self.proc(pid)?.has_more_bursts() {
            // alternation puts an I/O burst here
            let io_time = self.proc(pid)?.current_burst().map_or(0, |b| b.duration);
            self.transition(pid, ProcessState::Blocked)?;
            self.events
                .push(Event::new(EventKind::IoComplete, self.clock + io_time, pid));
        } else {
            self.transition(pid, ProcessState::Terminated)?;
            let clock = self.clock;
            if !self.proc_mut(pid)?.set_finish_time(clock) {
                return Err(KernelError::FinishRewrite {
                    pid,
                    time: self.clock,
                });
            }
            debug!("t={}: process {} terminated", self.clock, pid);
        }

        self.sched.clear_current();
        self.try_begin_switch(pid);
        Ok(())
    }

    fn on_io_complete(&mut self, event: Event) -> Result<(), KernelError> {
        let state = self.proc(event.pid)?.state();
        if state != ProcessState::Blocked {
            return Err(KernelError::BadProcessState { event, state });
        }

        self.proc_mut(event.pid)?.advance_burst();
        self.make_ready(event.pid)?;
        self.ready_process(event)
    }

    fn on_timer_interrupt(&mut self, event: Event) -> Result<(), KernelError> {
        if self.sched.current() != Some(event.pid) {
            trace!(
                "t={}: stale timer interrupt for process {}",
                self.clock,
                event.pid
            );
            return Ok(());
        }

        debug!("t={}: quantum expired for process {}", self.clock, event.pid);
        self.make_ready(event.pid)?;
        self.sched.clear_current();
        self.begin_switch(event.pid);
        Ok(())
    }

    fn on_context_switch_complete(&mut self, _event: Event) -> Result<(), KernelError> {
        self.sched.set_switching(false);
        self.dispatch_next()
    }

    /// A process just went ready: grab the idle CPU, or challenge the
    /// occupant if the policy preempts on arrival.
    fn ready_process(&mut self, event: Event) -> Result<(), KernelError> {
        match self.sched.current() {
            None => {
                self.try_begin_switch(event.pid);
                Ok(())
            }
            Some(running) if self.sched.policy().is_preemptive() => {
                self.check_preemption(event.pid, running)
            }
            Some(_) => Ok(()),
        }
    }

    fn check_preemption(&mut self, incoming: Pid, running: Pid) -> Result<(), KernelError> {
        let incoming_proc = self.proc(incoming)?;
        let running_proc = self.proc(running)?;
        if !self.sched.policy().should_preempt(incoming_proc, running_proc) {
            return Ok(());
        }

        debug!(
            "t={}: process {} preempts process {}",
            self.clock, incoming, running
        );
        self.make_ready(running)?;
        self.sched.clear_current();
        self.begin_switch(incoming);
        Ok(())
    }

    /// Starts a context switch unless one is already in flight or there
    /// is nothing to run. The switch window is idle CPU; the actual
    /// selection happens when the completion event fires.
    fn try_begin_switch(&mut self, pid: Pid) {
        if self.sched.is_switching() || self.sched.policy().is_empty() {
            return;
        }
        self.begin_switch(pid);
    }

    fn begin_switch(&mut self, pid: Pid) {
        self.sched.note_context_switch();
        self.sched.set_switching(true);

        let time = self.clock + self.sched.context_switch_time();
        debug!(
            "t={}: context switch started, completes at {}",
            self.clock, time
        );
        self.events
            .push(Event::new(EventKind::ContextSwitchComplete, time, pid));
    }

    /// The immediate dispatch at the end of a context switch: select,
    /// mark running and schedule the burst completion. Round Robin caps
    /// the scheduled run at its slice.
    fn dispatch_next(&mut self) -> Result<(), KernelError> {
        let selected = self.sched.policy_mut().select_next(&self.procs);
        let Some(pid) = selected else {
            return Ok(());
        };

        self.transition(pid, ProcessState::Running)?;
        self.sched.set_current(pid);

        let remaining = self.proc(pid)?.remaining();
        let run_for = match self.sched.policy().time_slice() {
            Some(slice) => remaining.min(slice),
            None => remaining,
        };

        debug!(
            "t={}: dispatch process {} for {} units",
            self.clock, pid, run_for
        );
        self.events.push(Event::new(
            EventKind::CpuBurstComplete,
            self.clock + run_for,
            pid,
        ));
        Ok(())
    }

    /// Fires the Round Robin timer when the occupant's slice has run out.
    fn check_time_slice(&mut self) {
        let Some(pid) = self.sched.current() else {
            return;
        };
        if self.sched.policy().slice_expired() {
            self.events
                .push(Event::new(EventKind::TimerInterrupt, self.clock, pid));
        }
    }

    fn finalize(&mut self) -> Result<SimReport, KernelError> {
        self.sched.set_total_time(self.clock);

        let mut processes = Vec::with_capacity(self.procs.len());
        for proc in self.procs.iter() {
            let finish = match proc.finish_time() {
                Some(time) if proc.state() == ProcessState::Terminated => time,
                _ => {
                    return Err(KernelError::Unfinished {
                        pid: proc.pid(),
                        time: self.clock,
                    })
                }
            };

            let turnaround = finish - proc.arrival_time();
            let waiting = turnaround.saturating_sub(proc.service_time() + proc.io_time());
            processes.push(ProcessReport {
                pid: proc.pid(),
                arrival_time: proc.arrival_time(),
                service_time: proc.service_time(),
                io_time: proc.io_time(),
                finish_time: finish,
                turnaround_time: turnaround,
                waiting_time: waiting,
            });
        }

        Ok(SimReport {
            policy: self.sched.name(),
            total_time: self.sched.total_time(),
            cpu_busy_time: self.sched.cpu_busy_time(),
            cpu_utilization: self.sched.utilization(),
            context_switch_count: self.sched.context_switch_count(),
            processes,
            trace: std::mem::take(&mut self.trace),
        })
    }

    /// Marks a process ready and hands it to the policy's queue.
    fn make_ready(&mut self, pid: Pid) -> Result<(), KernelError> {
        let from = self.proc(pid)?.state();
        self.record(pid, from, ProcessState::Ready);
        self.sched.policy_mut().enqueue(pid, &mut self.procs);
        Ok(())
    }

    fn transition(&mut self, pid: Pid, to: ProcessState) -> Result<(), KernelError> {
        let proc = self.procs.get_mut(pid).ok_or(KernelError::UnknownPid {
            pid,
            time: self.clock,
        })?;
        let from = proc.state();
        proc.set_state(to);
        self.record(pid, from, to);
        Ok(())
    }

    fn record(&mut self, pid: Pid, from: ProcessState, to: ProcessState) {
        trace!("t={}: process {} {} -> {}", self.clock, pid, from, to);
        if self.trace_enabled {
            self.trace
                .push(TraceRecord::new(self.clock, pid, from, to));
        }
    }

    fn proc(&self, pid: Pid) -> Result<&Process, KernelError> {
        self.procs.get(pid).ok_or(KernelError::UnknownPid {
            pid,
            time: self.clock,
        })
    }

    fn proc_mut(&mut self, pid: Pid) -> Result<&mut Process, KernelError> {
        self.procs.get_mut(pid).ok_or(KernelError::UnknownPid {
            pid,
            time: self.clock,
        })
    }
}
