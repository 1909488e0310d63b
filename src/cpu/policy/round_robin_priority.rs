//! Round robin inside each priority level. A newcomer with a strictly
//! better priority takes the CPU even mid-quantum; the interrupted
//! process starts over with a full quantum on its next turn. Processes of
//! equal priority rotate exactly like plain round robin.

use std::cmp::Reverse;
use std::num::NonZeroU64;

use crate::cpu::driver::SchedSim;
use crate::cpu::metrics::ScheduleResult;
use crate::cpu::state::{
    PriorityOrder, ProcKey, ProcState, ProcessSpec, ReadyQueue, SimConfig, Ticks,
};
use crate::error::SpecError;

#[derive(PartialEq, Eq, PartialOrd, Ord)]
struct Selection {
    rank: i64,
    ready_at: Ticks,
    arrival: Reverse<Ticks>,
    id: String,
}

fn selection(proc: &ProcState, order: PriorityOrder) -> Selection {
    Selection {
        rank: order.rank(proc.priority),
        ready_at: proc.ready_at,
        arrival: Reverse(proc.arrival),
        id: proc.id.clone(),
    }
}

pub(super) fn schedule(
    specs: &[ProcessSpec],
    config: &SimConfig,
    quantum: NonZeroU64,
    order: PriorityOrder,
) -> Result<ScheduleResult, SpecError> {
    let mut sim = SchedSim::new(specs, config)?;
    let mut ready: ReadyQueue<Selection> = ReadyQueue::new();
    let mut running: Option<ProcKey> = None;
    let mut quantum_used: u64 = 0;

    while sim.within_horizon() && (running.is_some() || !ready.is_empty() || !sim.all_admitted()) {
        for key in sim.admit_due() {
            let sel = selection(sim.proc(key), order);
            ready.push(key, sel);
        }

        let preempted = match (running, ready.peek()) {
            (Some(run), Some((_, best))) => best.rank < order.rank(sim.proc(run).priority),
            _ => false,
        };
        if preempted {
            let run = running.take().unwrap();
            sim.reenter_ready(run);
            let sel = selection(sim.proc(run), order);
            ready.push(run, sel);
        }

        if running.is_none() {
            running = ready.pop();
            if let Some(next) = running {
                sim.start_running(next);
                quantum_used = 0;
            }
        }

        match running {
            Some(run) => {
                let completed = sim.execute_unit(run);
                quantum_used += 1;
                if completed {
                    running = None;
                } else if quantum_used == quantum.get() {
                    sim.reenter_ready(run);
                    let sel = selection(sim.proc(run), order);
                    ready.push(run, sel);
                    running = None;
                }
            }
            None => sim.idle(),
        }
    }

    Ok(sim.into_result())
}
