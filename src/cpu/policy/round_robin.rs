//! Round robin. The ready set is ordered by readiness time, and a tie
//! goes to the most recently arrived process. A selected process keeps
//! the CPU for up to one quantum; leftover work re-enters the ready set
//! stamped with the time the quantum ended.

use std::cmp::Reverse;
use std::num::NonZeroU64;

use crate::cpu::driver::SchedSim;
use crate::cpu::metrics::ScheduleResult;
use crate::cpu::state::{ProcKey, ProcState, ProcessSpec, ReadyQueue, SimConfig, Ticks};
use crate::error::SpecError;

#[derive(PartialEq, Eq, PartialOrd, Ord)]
struct Selection {
    ready_at: Ticks,
    arrival: Reverse<Ticks>,
    id: String,
}

fn selection(proc: &ProcState) -> Selection {
    Selection {
        ready_at: proc.ready_at,
        arrival: Reverse(proc.arrival),
        id: proc.id.clone(),
    }
}

pub(super) fn schedule(
    specs: &[ProcessSpec],
    config: &SimConfig,
    quantum: NonZeroU64,
) -> Result<ScheduleResult, SpecError> {
    let mut sim = SchedSim::new(specs, config)?;
    let mut ready: ReadyQueue<Selection> = ReadyQueue::new();
    let mut running: Option<ProcKey> = None;
    let mut quantum_used: u64 = 0;

    while sim.within_horizon() && (running.is_some() || !ready.is_empty() || !sim.all_admitted()) {
        for key in sim.admit_due() {
            let sel = selection(sim.proc(key));
            ready.push(key, sel);
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
                    let sel = selection(sim.proc(run));
                    ready.push(run, sel);
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
    use crate::cpu::state::{ProcessSpec, SimConfig};

    fn run(specs: &[ProcessSpec], quantum: u64) -> crate::cpu::metrics::ScheduleResult {
        CpuPolicy::RoundRobin {
            quantum: quantum.try_into().unwrap(),
        }
        .schedule(specs, &SimConfig::default())
        .unwrap()
    }

    #[test]
    fn readiness_ties_go_to_the_later_arrival() {
        let specs = vec![
            ProcessSpec::new("A", 1, 1, 3),
            ProcessSpec::new("B", 1, 2, 2),
            ProcessSpec::new("C", 1, 3, 2),
        ];
        let result = run(&specs, 2);

        // A's quantum ends at time 3, exactly when C becomes ready. C
        // arrived later, so it runs before A's leftover unit.
        assert_eq!(compact(&result), "AABBCCA");
        let a = &result.metrics["A"];
        assert_eq!((a.start, a.end), (Some(1), Some(8)));
        assert_eq!(a.waiting, 4);
        let b = &result.metrics["B"];
        assert_eq!((b.start, b.end), (Some(3), Some(5)));
        let c = &result.metrics["C"];
        assert_eq!((c.start, c.end), (Some(5), Some(7)));
    }

    #[test]
    fn finishing_on_the_quantum_boundary_is_not_a_requeue() {
        let specs = vec![
            ProcessSpec::new("A", 1, 1, 2),
            ProcessSpec::new("B", 1, 1, 2),
        ];
        let result = run(&specs, 2);
        assert_eq!(compact(&result), "AABB");
        assert_eq!(result.metrics["A"].end, Some(3));
        assert_eq!(result.metrics["B"].end, Some(5));
    }

    #[test]
    fn single_process_runs_through_consecutive_quanta() {
        let specs = vec![ProcessSpec::new("A", 1, 1, 5)];
        let result = run(&specs, 2);
        assert_eq!(compact(&result), "AAAAA");
        assert_eq!(result.metrics["A"].waiting, 0);
    }

    #[test]
    fn rotation_with_a_unit_quantum() {
        let specs = vec![
            ProcessSpec::new("A", 1, 1, 2),
            ProcessSpec::new("B", 1, 1, 2),
        ];
        let result = run(&specs, 1);
        // Both become ready again one unit apart, so they alternate.
        assert_eq!(compact(&result), "ABAB");
    }
}
