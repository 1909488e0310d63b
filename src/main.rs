use std::num::NonZeroU64;

use anyhow::{Result, ensure};
use average::{Estimate, Mean};
use clap::{Parser, Subcommand, ValueEnum};
use rand::prelude::*;
use os_model::{
    CpuPolicy, DEFAULT_QUANTUM, FrameSpec, PriorityOrder, ProcessSpec, ReplacementPolicy,
    SimConfig,
};

#[derive(Parser)]
#[command(name = "os_model")]
#[command(about = "Play textbook scheduling and page replacement policies over small workloads")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Schedule a seeded random process set and print the timeline.
    Cpu {
        #[arg(short, long, value_enum, default_value_t = CpuPolicyArg::Fcfs)]
        policy: CpuPolicyArg,

        /// How many processes to generate (ids A, B, C, ...).
        #[arg(short = 'n', long, default_value_t = 5)]
        processes: usize,

        /// Time slice for the round robin policies.
        #[arg(short, long, default_value_t = DEFAULT_QUANTUM)]
        quantum: NonZeroU64,

        /// Which end of the priority scale wins.
        #[arg(short, long, value_enum, default_value_t = OrderArg::Higher)]
        order: OrderArg,

        /// Workload seed; the same seed always yields the same workload.
        #[arg(short, long, default_value_t = 0)]
        seed: u64,
    },

    /// Run a seeded random page-request sequence and print the trace.
    Mem {
        #[arg(short, long, value_enum, default_value_t = MemPolicyArg::Fifo)]
        policy: MemPolicyArg,

        #[arg(short, long, default_value_t = 4)]
        frames: usize,

        #[arg(short, long, default_value_t = 12)]
        requests: usize,

        #[arg(short, long, default_value_t = 0)]
        seed: u64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, ValueEnum)]
enum CpuPolicyArg {
    Fcfs,
    FcfsPriority,
    Sjf,
    SjfPriority,
    Srt,
    RoundRobin,
    RoundRobinPriority,
}

#[derive(Debug, Clone, Copy, PartialEq, ValueEnum)]
enum MemPolicyArg {
    Fifo,
    Lru,
    Optimal,
    SecondChance,
    Clock,
}

#[derive(Debug, Clone, Copy, PartialEq, ValueEnum)]
enum OrderArg {
    Higher,
    Lower,
}

impl From<OrderArg> for PriorityOrder {
    fn from(arg: OrderArg) -> Self {
        match arg {
            OrderArg::Higher => PriorityOrder::HigherWins,
            OrderArg::Lower => PriorityOrder::LowerWins,
        }
    }
}

fn main() -> Result<()> {
    match Args::parse().command {
        Command::Cpu {
            policy,
            processes,
            quantum,
            order,
            seed,
        } => run_cpu(policy, processes, quantum, order.into(), seed),
        Command::Mem {
            policy,
            frames,
            requests,
            seed,
        } => run_mem(policy, frames, requests, seed),
    }
}

fn run_cpu(
    arg: CpuPolicyArg,
    processes: usize,
    quantum: NonZeroU64,
    order: PriorityOrder,
    seed: u64,
) -> Result<()> {
    ensure!(processes <= 26, "process ids run A..Z, so at most 26");

    let policy = match arg {
        CpuPolicyArg::Fcfs => CpuPolicy::Fcfs,
        CpuPolicyArg::FcfsPriority => CpuPolicy::FcfsPriority { order },
        CpuPolicyArg::Sjf => CpuPolicy::Sjf,
        CpuPolicyArg::SjfPriority => CpuPolicy::SjfPriority { order },
        CpuPolicyArg::Srt => CpuPolicy::Srt,
        CpuPolicyArg::RoundRobin => CpuPolicy::RoundRobin { quantum },
        CpuPolicyArg::RoundRobinPriority => CpuPolicy::RoundRobinPriority { quantum, order },
    };

    let mut rng = StdRng::seed_from_u64(seed);
    let specs = random_processes(processes, &mut rng);
    for spec in &specs {
        println!("{spec}");
    }

    let result = policy.schedule(&specs, &SimConfig::default())?;

    let cells: Vec<&str> = result
        .timeline
        .slots()
        .iter()
        .map(|slot| slot.as_deref().unwrap_or("-"))
        .collect();
    println!("\n{policy}: {}", cells.join(" "));

    let mut ids: Vec<&String> = result.metrics.keys().collect();
    ids.sort();
    for id in ids {
        let m = &result.metrics[id];
        match (m.start, m.end) {
            (Some(start), Some(end)) => println!(
                "{id}: start={start} end={end} turnaround={} waiting={}",
                m.turnaround, m.waiting
            ),
            (Some(start), None) => println!("{id}: start={start}, cut off by the horizon"),
            _ => println!("{id}: never ran"),
        }
    }

    let waiting: Mean = result.metrics.values().map(|m| m.waiting as f64).collect();
    let turnaround: Mean = result
        .metrics
        .values()
        .map(|m| m.turnaround as f64)
        .collect();
    println!("Average waiting time: {:.2}", waiting.estimate());
    println!("Average turnaround time: {:.2}", turnaround.estimate());

    Ok(())
}

fn run_mem(arg: MemPolicyArg, frames: usize, requests: usize, seed: u64) -> Result<()> {
    ensure!(frames <= 9, "initial pages are drawn from 1..=9, so at most 9 frames");

    let policy = match arg {
        MemPolicyArg::Fifo => ReplacementPolicy::Fifo,
        MemPolicyArg::Lru => ReplacementPolicy::Lru,
        MemPolicyArg::Optimal => ReplacementPolicy::Optimal,
        MemPolicyArg::SecondChance => ReplacementPolicy::SecondChance,
        MemPolicyArg::Clock => ReplacementPolicy::Clock,
    };

    let mut rng = StdRng::seed_from_u64(seed);
    let specs = random_frames(frames, &mut rng);
    let sequence: Vec<String> = (0..requests)
        .map(|_| rng.random_range(1..=9u32).to_string())
        .collect();

    for spec in &specs {
        println!("{spec}");
    }
    println!("requests: {}\n", sequence.join(" "));

    let trace = policy.run(&specs, &sequence)?;

    for access in trace.accesses() {
        let cells: Vec<&str> = access
            .frames
            .iter()
            .map(|page| page.as_deref().unwrap_or("-"))
            .collect();
        println!(
            "t={:2} page {} {} [{}]",
            access.time,
            access.page,
            if access.hit { "hit  " } else { "fault" },
            cells.join(" ")
        );
    }

    println!(
        "\n{policy}: {} hits, {} faults (hit ratio {:.2}, fault ratio {:.2})",
        trace.hits(),
        trace.faults(),
        trace.hit_ratio(),
        trace.fault_ratio()
    );

    Ok(())
}

// Ranges mirror the classroom problems the engine is meant to replay:
// single-letter ids, priorities and bursts in 1..=5, arrivals in the first
// eight units with at least one process present from the start.
fn random_processes(count: usize, rng: &mut StdRng) -> Vec<ProcessSpec> {
    (0..count)
        .map(|i| {
            let id = char::from(b'A' + i as u8).to_string();
            let arrival = if i == 0 { 1 } else { rng.random_range(1..=8) };
            ProcessSpec::new(id, rng.random_range(1..=5), arrival, rng.random_range(1..=5))
        })
        .collect()
}

fn random_frames(count: usize, rng: &mut StdRng) -> Vec<FrameSpec> {
    let mut load_times: Vec<u64> = (1..=count as u64 * 2).collect();
    load_times.shuffle(rng);
    let mut pages: Vec<u32> = (1..=9).collect();
    pages.shuffle(rng);

    (0..count)
        .map(|i| {
            let page = pages[i].to_string();
            FrameSpec::new(i.to_string(), load_times[i], Some(&page))
        })
        .collect()
}
