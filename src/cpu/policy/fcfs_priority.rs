//! FCFS within a priority level, preemptive across levels. A newcomer
//! whose priority strictly beats the running process takes the CPU on the
//! spot; the loser keeps its remaining burst and re-enters the ready set
//! with a fresh readiness time. Equal priority never preempts.

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
    id: String,
}

fn selection(proc: &ProcState, order: PriorityOrder) -> Selection {
    Selection {
        rank: order.rank(proc.priority),
        ready_at: proc.ready_at,
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

    fn run(specs: &[ProcessSpec], order: PriorityOrder) -> crate::cpu::metrics::ScheduleResult {
        CpuPolicy::FcfsPriority { order }
            .schedule(specs, &SimConfig::default())
            .unwrap()
    }

    #[test]
    fn better_priority_preempts_immediately() {
        let specs = vec![
            ProcessSpec::new("A", 1, 1, 4),
            ProcessSpec::new("B", 3, 2, 2),
            ProcessSpec::new("C", 2, 3, 2),
        ];
        let result = run(&specs, PriorityOrder::HigherWins);

        assert_eq!(compact(&result), "ABBCCAAA");
        let a = &result.metrics["A"];
        assert_eq!((a.start, a.end), (Some(1), Some(9)));
        assert_eq!(a.waiting, 4);
        let b = &result.metrics["B"];
        assert_eq!((b.start, b.end), (Some(2), Some(4)));
        assert_eq!(b.waiting, 0);
        let c = &result.metrics["C"];
        assert_eq!((c.start, c.end), (Some(4), Some(6)));
        assert_eq!(c.waiting, 1);
    }

    #[test]
    fn equal_priority_never_preempts() {
        let specs = vec![
            ProcessSpec::new("A", 2, 1, 3),
            ProcessSpec::new("B", 2, 2, 1),
        ];
        let result = run(&specs, PriorityOrder::HigherWins);
        assert_eq!(compact(&result), "AAAB");
    }

    #[test]
    fn lower_wins_flips_the_scale() {
        let specs = vec![
            ProcessSpec::new("A", 5, 1, 3),
            ProcessSpec::new("B", 1, 2, 2),
        ];
        let result = run(&specs, PriorityOrder::LowerWins);
        assert_eq!(compact(&result), "ABBAA");
    }

    #[test]
    fn preempted_process_waits_behind_equal_priority() {
        // B preempts A; C arrives later with A's priority. A went back to
        // the ready set at time 2, C became ready at time 3, so A resumes
        // first.
        let specs = vec![
            ProcessSpec::new("A", 1, 1, 2),
            ProcessSpec::new("B", 9, 2, 1),
            ProcessSpec::new("C", 1, 3, 1),
        ];
        let result = run(&specs, PriorityOrder::HigherWins);
        assert_eq!(compact(&result), "ABAC");
    }
}
