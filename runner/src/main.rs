use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;

use simulator::{PolicyKind, SimConfig, SimReport, Simulation};

mod generator;
mod parser;
mod render;

#[derive(Parser, Debug)]
#[command(name = "sim")]
#[command(about = "Discrete-event simulator for single-CPU process scheduling")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a workload under one policy, or all of them
    Run {
        /// Workload description file; standard input when omitted
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// FCFS, SJF, SRTN, RR<quantum> or ALL
        #[arg(short = 'a', long, default_value = "ALL")]
        algorithm: String,

        /// Print per-process statistics
        #[arg(short, long)]
        detailed: bool,

        /// Print every state transition as it is replayed
        #[arg(short, long)]
        verbose: bool,

        /// Emit the reports as JSON instead of text
        #[arg(long)]
        json: bool,

        /// Also write the state transition trace to this file
        #[arg(long)]
        trace_file: Option<PathBuf>,
    },

    /// Emit a random workload in the input format
    Generate {
        /// Number of processes
        #[arg(short, long, default_value_t = 50)]
        processes: usize,

        /// Context switch time written into the header
        #[arg(short, long, default_value_t = 5)]
        context_switch_time: usize,

        /// Fixed seed for a reproducible workload
        #[arg(short, long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env().init();

    let cli = Cli::parse();
    match cli.command {
        Command::Run {
            input,
            algorithm,
            detailed,
            verbose,
            json,
            trace_file,
        } => run(input, &algorithm, detailed, verbose, json, trace_file),
        Command::Generate {
            processes,
            context_switch_time,
            seed,
        } => {
            print!("{}", generator::generate(processes, context_switch_time, seed));
            Ok(())
        }
    }
}

fn run(
    input: Option<PathBuf>,
    algorithm: &str,
    detailed: bool,
    verbose: bool,
    json: bool,
    trace_file: Option<PathBuf>,
) -> Result<()> {
    let text = match &input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("cannot read workload from {}", path.display()))?,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("cannot read workload from standard input")?;
            buffer
        }
    };

    let (workload, switch_time) = parser::parse_workload(&text)?;
    info!(
        "loaded {} processes, context switch time {}",
        workload.len(),
        switch_time
    );

    let kinds: Vec<PolicyKind> = if algorithm.eq_ignore_ascii_case("ALL") {
        PolicyKind::standard_set()
    } else {
        vec![algorithm.parse()?]
    };

    let trace_enabled = verbose || trace_file.is_some();
    let mut trace_out = match &trace_file {
        Some(path) => Some(
            File::create(path)
                .with_context(|| format!("cannot create trace file {}", path.display()))?,
        ),
        None => None,
    };

    let mut reports = Vec::with_capacity(kinds.len());
    for kind in kinds {
        let mut config = SimConfig::new(kind).with_context_switch_time(switch_time);
        if trace_enabled {
            config = config.with_trace();
        }

        let mut sim = Simulation::new(&workload, &config);
        let report = sim
            .run()
            .with_context(|| format!("simulation failed under {}", kind))?;

        emit_trace(&report, verbose, trace_out.as_mut())?;
        reports.push(report);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for report in &reports {
            render::print_summary(report, detailed);
        }
    }

    Ok(())
}

fn emit_trace(report: &SimReport, verbose: bool, out: Option<&mut File>) -> Result<()> {
    if report.trace.is_empty() {
        return Ok(());
    }

    if verbose {
        for record in &report.trace {
            println!("{}", record);
        }
    }

    if let Some(file) = out {
        writeln!(file, "{}:", report.policy)?;
        for record in &report.trace {
            writeln!(file, "{}", record)?;
        }
    }

    Ok(())
}
