//! Priority-driven SJF, preemptive. A newcomer takes the CPU when its
//! priority strictly beats the running process, or when it matches and
//! its *original* burst is strictly smaller. Remaining time plays no part
//! in the comparison; a process that has nearly finished a long burst is
//! still the long job it arrived as.

use crate::cpu::driver::SchedSim;
use crate::cpu::metrics::ScheduleResult;
use crate::cpu::state::{
    PriorityOrder, ProcKey, ProcState, ProcessSpec, ReadyQueue, SimConfig, Ticks,
};
use crate::error::SpecError;

#[derive(PartialEq, Eq, PartialOrd, Ord)]
struct Selection {
    rank: i64,
    burst: Ticks,
    arrival: Ticks,
    id: String,
}

fn selection(proc: &ProcState, order: PriorityOrder) -> Selection {
    Selection {
        rank: order.rank(proc.priority),
        burst: proc.burst,
        arrival: proc.arrival,
        id: proc.id.clone(),
    }
}

pub(super) fn schedule(
    specs: &[ProcessSpec],
    config: &SimConfig,
    order: PriorityOrder,
) -> Result<ScheduleResult, SpecError> {
    let mut sim = SchedSim::new(specs, config)?;
    let mut ready: ReadyQueue<Selection> = ReadyQueue::new();
    let mut running: Option<ProcKey> = None;

    while sim.within_horizon() && (running.is_some() || !ready.is_empty() || !sim.all_admitted()) {
        for key in sim.admit_due() {
            let sel = selection(sim.proc(key), order);
            ready.push(key, sel);
        }

        let preempted = match (running, ready.peek()) {
            (Some(run), Some((_, best))) => {
                let run = sim.proc(run);
                let run_rank = order.rank(run.priority);
                best.rank < run_rank || (best.rank == run_rank && best.burst < run.burst)
            }
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

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::cpu::policy::{CpuPolicy, testutil::compact};
    use crate::cpu::state::{PriorityOrder, ProcessSpec, SimConfig};

    fn run(specs: &[ProcessSpec]) -> crate::cpu::metrics::ScheduleResult {
        CpuPolicy::SjfPriority {
            order: PriorityOrder::HigherWins,
        }
        .schedule(specs, &SimConfig::default())
        .unwrap()
    }

    #[test]
    fn equal_priority_shorter_original_burst_preempts() {
        let specs = vec![
            ProcessSpec::new("A", 2, 1, 5),
            ProcessSpec::new("B", 2, 2, 3),
        ];
        let result = run(&specs);

        assert_eq!(compact(&result), "ABBBAAAA");
        let b = &result.metrics["B"];
        assert_eq!((b.start, b.end), (Some(2), Some(5)));
        let a = &result.metrics["A"];
        assert_eq!((a.start, a.end), (Some(1), Some(9)));
    }

    #[test]
    fn comparison_uses_the_original_burst_not_remaining() {
        // By the time B arrives, A is down to 4 remaining units, fewer
        // than B's 5. A's original burst of 6 is still what counts, so B
        // wins the CPU anyway.
        let specs = vec![
            ProcessSpec::new("A", 1, 1, 6),
            ProcessSpec::new("B", 1, 3, 5),
        ];
        let result = run(&specs);
        assert_eq!(compact(&result), "AABBBBBAAAA");
    }

    #[test]
    fn lower_priority_never_preempts_regardless_of_burst() {
        let specs = vec![
            ProcessSpec::new("A", 5, 1, 4),
            ProcessSpec::new("B", 1, 2, 1),
        ];
        let result = run(&specs);
        assert_eq!(compact(&result), "AAAAB");
    }

    #[test]
    fn ready_set_orders_by_priority_then_burst_then_arrival() {
        let specs = vec![
            ProcessSpec::new("A", 1, 1, 2),
            ProcessSpec::new("B", 3, 2, 2),
            ProcessSpec::new("C", 3, 2, 3),
            ProcessSpec::new("D", 2, 2, 1),
        ];
        let result = run(&specs);
        // B preempts A at 2; C waits behind B (same priority, longer
        // burst), then D (lower priority), then A.
        assert_eq!(compact(&result), "ABBCCCDA");
    }
}
