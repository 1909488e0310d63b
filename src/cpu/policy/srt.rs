//! Shortest remaining time. The preemptive flavor of SJF: every unit the
//! running process defends its seat against the shortest ready remaining
//! burst, and loses it only to a strictly smaller one. An equal remaining
//! burst never preempts.

use crate::cpu::driver::SchedSim;
use crate::cpu::metrics::ScheduleResult;
use crate::cpu::state::{ProcKey, ProcState, ProcessSpec, ReadyQueue, SimConfig, Ticks};
use crate::error::SpecError;

// Queued processes do not execute, so the remaining burst captured here
// stays accurate until the process is popped or re-pushed.
#[derive(PartialEq, Eq, PartialOrd, Ord)]
struct Selection {
    remaining: Ticks,
    arrival: Ticks,
    id: String,
}

fn selection(proc: &ProcState) -> Selection {
    Selection {
        remaining: proc.remaining,
        arrival: proc.arrival,
        id: proc.id.clone(),
    }
}

pub(super) fn schedule(
    specs: &[ProcessSpec],
    config: &SimConfig,
) -> Result<ScheduleResult, SpecError> {
    let mut sim = SchedSim::new(specs, config)?;
    let mut ready: ReadyQueue<Selection> = ReadyQueue::new();
    let mut running: Option<ProcKey> = None;

    while sim.within_horizon() && (running.is_some() || !ready.is_empty() || !sim.all_admitted()) {
        for key in sim.admit_due() {
            let sel = selection(sim.proc(key));
            ready.push(key, sel);
        }

        let preempted = match (running, ready.peek()) {
            (Some(run), Some((_, best))) => best.remaining < sim.proc(run).remaining,
            _ => false,
        };
        if preempted {
            let run = running.take().unwrap();
            sim.reenter_ready(run);
            let sel = selection(sim.proc(run));
            ready.push(run, sel);
        }

        if running.is_none() {
            running = ready.pop();
            if let Some(next) = running {
                sim.start_running(next);
            }
        }

        match running {
            Some(run) => {
                if sim.execute_unit(run) {
                    running = None;
                }
            }
            None => sim.idle(),
        }
    }

    Ok(sim.into_result())
}
