//! End-to-end schedules with hand-checked numbers.

use std::num::NonZeroUsize;

use simulator::{
    PolicyKind, ProcessSpec, ProcessState, SimConfig, SimReport, Simulation, Workload,
};

fn spec(pid: usize, arrival: usize, cpu: &[usize], io: &[usize]) -> ProcessSpec {
    ProcessSpec {
        pid,
        arrival_time: arrival,
        cpu_bursts: cpu.to_vec(),
        io_bursts: io.to_vec(),
    }
}

fn rr(quantum: usize) -> PolicyKind {
    PolicyKind::RoundRobin(NonZeroUsize::new(quantum).unwrap())
}

fn run(policy: PolicyKind, switch_time: usize, specs: Vec<ProcessSpec>) -> SimReport {
    let workload = Workload::new(specs).unwrap();
    let config = SimConfig::new(policy)
        .with_context_switch_time(switch_time)
        .with_trace();
    Simulation::new(&workload, &config).run().unwrap()
}

#[test]
fn single_burst_single_process() {
    // the quantum covers the whole burst, so RR behaves like the others
    for policy in [PolicyKind::Fcfs, PolicyKind::Sjf, PolicyKind::Srtn, rr(10)] {
        let report = run(policy, 0, vec![spec(1, 0, &[10], &[])]);

        assert_eq!(report.total_time, 10);
        assert_eq!(report.cpu_busy_time, 10);
        assert_eq!(report.cpu_utilization, 100.0);
        assert_eq!(report.context_switch_count, 1);

        let p = &report.processes[0];
        assert_eq!(p.finish_time, 10);
        assert_eq!(p.turnaround_time, 10);
        assert_eq!(p.waiting_time, 0);
    }
}

#[test]
fn fcfs_runs_in_arrival_order() {
    let report = run(
        PolicyKind::Fcfs,
        0,
        vec![spec(1, 0, &[10], &[]), spec(2, 2, &[4], &[])],
    );

    assert_eq!(report.total_time, 14);

    let a = &report.processes[0];
    assert_eq!(a.finish_time, 10);
    assert_eq!(a.turnaround_time, 10);
    assert_eq!(a.waiting_time, 0);

    let b = &report.processes[1];
    assert_eq!(b.finish_time, 14);
    assert_eq!(b.turnaround_time, 12);
    assert_eq!(b.waiting_time, 8);
}

#[test]
fn srtn_preempts_on_shorter_arrival() {
    let report = run(
        PolicyKind::Srtn,
        0,
        vec![spec(1, 0, &[10], &[]), spec(2, 2, &[4], &[])],
    );

    assert_eq!(report.total_time, 14);

    // the arrival at t=2 has 4 units against the occupant's 8
    let a = &report.processes[0];
    assert_eq!(a.finish_time, 14);
    assert_eq!(a.turnaround_time, 14);
    assert_eq!(a.waiting_time, 4);

    let b = &report.processes[1];
    assert_eq!(b.finish_time, 6);
    assert_eq!(b.turnaround_time, 4);
    assert_eq!(b.waiting_time, 0);
}

#[test]
fn srtn_preemption_trace() {
    let report = run(
        PolicyKind::Srtn,
        0,
        vec![spec(1, 0, &[10], &[]), spec(2, 2, &[4], &[])],
    );

    use ProcessState::{New, Ready, Running, Terminated};
    let transitions: Vec<(usize, usize, ProcessState, ProcessState)> = report
        .trace
        .iter()
        .map(|r| (r.time, r.pid.get(), r.from, r.to))
        .collect();

    assert_eq!(
        transitions,
        vec![
            (0, 1, New, Ready),
            (0, 1, Ready, Running),
            (2, 2, New, Ready),
            (2, 1, Running, Ready),
            (2, 2, Ready, Running),
            (6, 2, Running, Terminated),
            (6, 1, Ready, Running),
            (14, 1, Running, Terminated),
        ]
    );
}

#[test]
fn round_robin_interleaves_equal_processes() {
    let report = run(
        rr(4),
        0,
        vec![spec(1, 0, &[10], &[]), spec(2, 0, &[10], &[])],
    );

    // A[0,4) B[4,8) A[8,12) B[12,16) A[16,18) B[18,20)
    assert_eq!(report.total_time, 20);
    assert_eq!(report.cpu_busy_time, 20);
    assert_eq!(report.context_switch_count, 6);

    let a = &report.processes[0];
    assert_eq!(a.finish_time, 18);
    assert_eq!(a.turnaround_time, 18);
    assert_eq!(a.waiting_time, 8);

    let b = &report.processes[1];
    assert_eq!(b.finish_time, 20);
    assert_eq!(b.turnaround_time, 20);
    assert_eq!(b.waiting_time, 10);
}

#[test]
fn round_robin_never_exceeds_quantum() {
    let quantum = 4;
    let report = run(
        rr(quantum),
        0,
        vec![spec(1, 0, &[10], &[]), spec(2, 0, &[10], &[])],
    );

    // every continuous run visible in the trace fits inside the quantum
    for (i, record) in report.trace.iter().enumerate() {
        if record.to != ProcessState::Running {
            continue;
        }
        let end = report.trace[i + 1..]
            .iter()
            .find(|r| r.pid == record.pid)
            .expect("a running process transitions again");
        assert!(end.time - record.time <= quantum);
    }
}

#[test]
fn burst_shorter_than_quantum_completes_without_timer() {
    let report = run(rr(4), 0, vec![spec(1, 0, &[4], &[])]);

    assert_eq!(report.total_time, 4);
    assert_eq!(report.context_switch_count, 1);
    assert_eq!(report.processes[0].finish_time, 4);
}

#[test]
fn io_burst_releases_the_cpu() {
    for policy in [PolicyKind::Fcfs, PolicyKind::Sjf, PolicyKind::Srtn, rr(4)] {
        let report = run(policy, 0, vec![spec(1, 0, &[5, 5], &[5])]);

        assert_eq!(report.total_time, 15);
        assert_eq!(report.cpu_busy_time, 10);
        assert!((report.cpu_utilization - 66.666).abs() < 0.01);

        let p = &report.processes[0];
        assert_eq!(p.service_time, 10);
        assert_eq!(p.io_time, 5);
        assert_eq!(p.finish_time, 15);
        assert_eq!(p.turnaround_time, 15);
        assert_eq!(p.waiting_time, 0);
    }
}

#[test]
fn io_trace_is_exact() {
    let report = run(PolicyKind::Fcfs, 0, vec![spec(1, 0, &[5, 5], &[5])]);

    use ProcessState::{Blocked, New, Ready, Running, Terminated};
    let transitions: Vec<(usize, ProcessState, ProcessState)> = report
        .trace
        .iter()
        .map(|r| (r.time, r.from, r.to))
        .collect();

    assert_eq!(
        transitions,
        vec![
            (0, New, Ready),
            (0, Ready, Running),
            (5, Running, Blocked),
            (10, Blocked, Ready),
            (10, Ready, Running),
            (15, Running, Terminated),
        ]
    );
}

#[test]
fn context_switch_overhead_is_idle_time() {
    let report = run(
        PolicyKind::Fcfs,
        2,
        vec![spec(1, 0, &[5], &[]), spec(2, 0, &[5], &[])],
    );

    // switch[0,2) A[2,7) switch[7,9) B[9,14)
    assert_eq!(report.total_time, 14);
    assert_eq!(report.cpu_busy_time, 10);
    assert!((report.cpu_utilization - 71.428).abs() < 0.01);
    assert_eq!(report.context_switch_count, 2);

    let a = &report.processes[0];
    assert_eq!(a.finish_time, 7);
    assert_eq!(a.waiting_time, 2);

    let b = &report.processes[1];
    assert_eq!(b.finish_time, 14);
    assert_eq!(b.waiting_time, 9);
}

#[test]
fn sjf_picks_shortest_at_each_completion() {
    let report = run(
        PolicyKind::Sjf,
        0,
        vec![
            spec(1, 0, &[8], &[]),
            spec(2, 1, &[4], &[]),
            spec(3, 2, &[2], &[]),
        ],
    );

    // process 1 holds the CPU to completion, then 3 beats 2
    assert_eq!(report.processes[0].finish_time, 8);
    assert_eq!(report.processes[2].finish_time, 10);
    assert_eq!(report.processes[1].finish_time, 14);
    assert_eq!(report.total_time, 14);
}

#[test]
fn rerunning_a_simulation_is_deterministic() {
    let workload = Workload::new(vec![
        spec(1, 0, &[6, 4], &[3]),
        spec(2, 1, &[5], &[]),
        spec(3, 2, &[2, 2], &[8]),
    ])
    .unwrap();

    for policy in [PolicyKind::Fcfs, PolicyKind::Sjf, PolicyKind::Srtn, rr(3)] {
        let config = SimConfig::new(policy)
            .with_context_switch_time(1)
            .with_trace();
        let mut sim = Simulation::new(&workload, &config);

        let first = sim.run().unwrap();
        let second = sim.run().unwrap();

        assert_eq!(first.total_time, second.total_time);
        assert_eq!(first.cpu_busy_time, second.cpu_busy_time);
        assert_eq!(first.context_switch_count, second.context_switch_count);
        assert_eq!(first.processes, second.processes);
        assert_eq!(first.trace, second.trace);
    }
}

#[test]
fn service_time_is_conserved_as_busy_time() {
    let specs = vec![
        spec(1, 0, &[6, 4], &[3]),
        spec(2, 4, &[9], &[]),
        spec(3, 4, &[1, 1, 1], &[2, 2]),
    ];
    let service: usize = 6 + 4 + 9 + 3;

    for policy in [PolicyKind::Fcfs, PolicyKind::Sjf, PolicyKind::Srtn, rr(2)] {
        let report = run(policy, 3, specs.clone());
        assert_eq!(report.cpu_busy_time, service, "policy {}", report.policy);
    }
}
