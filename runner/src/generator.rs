//! Random workload generation, in the same text format the parser reads.

use std::fmt::Write;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const MEAN_ARRIVAL_INTERVAL: f64 = 50.0;
const MAX_CPU_BURSTS: usize = 20;
const CPU_BURST_RANGE: (usize, usize) = (5, 500);
const IO_BURST_RANGE: (usize, usize) = (30, 1000);

/// Draws an inter-arrival gap from an exponential distribution by
/// inverse transform.
fn arrival_gap(rng: &mut StdRng) -> usize {
    let u: f64 = rng.gen_range(f64::EPSILON..1.0);
    (-MEAN_ARRIVAL_INTERVAL * u.ln()) as usize
}

/// Generates `count` random processes and renders them as a workload
/// description
///
/// * `count` - how many processes to emit
/// * `switch_time` - context switch cost written into the header
/// * `seed` - fixed rng seed for reproducible workloads, random if absent
pub fn generate(count: usize, switch_time: usize, seed: Option<u64>) -> String {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut out = String::new();
    writeln!(out, "{} {}", count, switch_time).unwrap();

    let mut arrival = 0;
    for pid in 1..=count {
        // the first process always arrives at time zero
        if pid > 1 {
            arrival += arrival_gap(&mut rng);
        }

        let bursts = rng.gen_range(1..=MAX_CPU_BURSTS);
        writeln!(out, "{} {} {}", pid, arrival, bursts).unwrap();

        for index in 1..=bursts {
            let cpu = rng.gen_range(CPU_BURST_RANGE.0..=CPU_BURST_RANGE.1);
            if index < bursts {
                let io = rng.gen_range(IO_BURST_RANGE.0..=IO_BURST_RANGE.1);
                writeln!(out, "{} {} {}", index, cpu, io).unwrap();
            } else {
                writeln!(out, "{} {}", index, cpu).unwrap();
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_workload;

    #[test]
    fn generated_workloads_parse_back() {
        let text = generate(20, 5, Some(42));
        let (workload, switch_time) = parse_workload(&text).unwrap();

        assert_eq!(workload.len(), 20);
        assert_eq!(switch_time, 5);
        assert_eq!(workload.processes()[0].arrival_time, 0);
    }

    #[test]
    fn same_seed_same_workload() {
        assert_eq!(generate(10, 2, Some(7)), generate(10, 2, Some(7)));
    }
}
