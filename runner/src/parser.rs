//! The workload text format.
//!
//! Whitespace-separated integers: a header `N context_switch_time`, then
//! for each of the N processes a line `pid arrival num_cpu_bursts`
//! followed by `num_cpu_bursts` lines `index cpu_time [io_time]`. The
//! burst indices are 1-based and checked; the I/O column is present on
//! every line but the last, so bursts alternate by construction.

use anyhow::{bail, Context, Result};
use simulator::{ProcessSpec, Workload};

struct Tokens<'a> {
    iter: std::str::SplitWhitespace<'a>,
}

impl<'a> Tokens<'a> {
    fn new(input: &'a str) -> Tokens<'a> {
        Tokens {
            iter: input.split_whitespace(),
        }
    }

    fn next_usize(&mut self, what: &str) -> Result<usize> {
        let token = self
            .iter
            .next()
            .with_context(|| format!("unexpected end of input, expected {}", what))?;
        token
            .parse::<usize>()
            .with_context(|| format!("expected {}, found {:?}", what, token))
    }

    fn finished(&mut self) -> bool {
        self.iter.next().is_none()
    }
}

/// Parses a workload description, returning the validated workload and
/// the configured context switch time.
pub fn parse_workload(input: &str) -> Result<(Workload, usize)> {
    let mut tokens = Tokens::new(input);

    let count = tokens.next_usize("the number of processes")?;
    let switch_time = tokens.next_usize("the context switch time")?;

    let mut specs = Vec::with_capacity(count);
    for _ in 0..count {
        let pid = tokens.next_usize("a process id")?;
        let arrival_time = tokens.next_usize("an arrival time")?;
        let bursts = tokens.next_usize("a burst count")?;
        if bursts == 0 {
            bail!("process {} declares zero CPU bursts", pid);
        }

        let mut cpu_bursts = Vec::with_capacity(bursts);
        let mut io_bursts = Vec::with_capacity(bursts.saturating_sub(1));
        for expected in 1..=bursts {
            let index = tokens.next_usize("a burst index")?;
            if index != expected {
                bail!(
                    "process {}: burst index {} out of order, expected {}",
                    pid,
                    index,
                    expected
                );
            }

            cpu_bursts.push(tokens.next_usize("a CPU burst duration")?);
            if expected < bursts {
                io_bursts.push(tokens.next_usize("an I/O burst duration")?);
            }
        }

        specs.push(ProcessSpec {
            pid,
            arrival_time,
            cpu_bursts,
            io_bursts,
        });
    }

    if !tokens.finished() {
        bail!("trailing input after {} processes", count);
    }

    let workload = Workload::new(specs).context("invalid workload")?;
    Ok((workload, switch_time))
}
