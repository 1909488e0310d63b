//! Shortest job first, non-preemptive. Whenever the CPU frees up, the
//! arrived process with the smallest burst wins; ties go to the earlier
//! arrival, then the smaller id.

use crate::cpu::driver::SchedSim;
use crate::cpu::metrics::ScheduleResult;
use crate::cpu::state::{ProcKey, ProcState, ProcessSpec, ReadyQueue, SimConfig, Ticks};
use crate::error::SpecError;

#[derive(PartialEq, Eq, PartialOrd, Ord)]
struct Selection {
    burst: Ticks,
    arrival: Ticks,
    id: String,
}

fn selection(proc: &ProcState) -> Selection {
    Selection {
        burst: proc.burst,
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
    use crate::cpu::state::{ProcessSpec, SimConfig};

    #[test]
    fn picks_the_shortest_arrived_burst() {
        let specs = vec![
            ProcessSpec::new("A", 1, 1, 7),
            ProcessSpec::new("B", 1, 3, 2),
            ProcessSpec::new("C", 1, 4, 1),
            ProcessSpec::new("D", 1, 6, 4),
        ];
        let result = CpuPolicy::Sjf
            .schedule(&specs, &SimConfig::default())
            .unwrap();

        assert_eq!(compact(&result), "AAAAAAACBBDDDD");
        let c = &result.metrics["C"];
        assert_eq!((c.start, c.end), (Some(8), Some(9)));
        let b = &result.metrics["B"];
        assert_eq!((b.start, b.end), (Some(9), Some(11)));
        let d = &result.metrics["D"];
        assert_eq!((d.start, d.end), (Some(11), Some(15)));
    }

    #[test]
    fn never_preempts_a_longer_job_already_running() {
        let specs = vec![
            ProcessSpec::new("A", 1, 1, 5),
            ProcessSpec::new("B", 1, 2, 1),
        ];
        let result = CpuPolicy::Sjf
            .schedule(&specs, &SimConfig::default())
            .unwrap();
        assert_eq!(compact(&result), "AAAAAB");
    }

    #[test]
    fn burst_ties_break_by_arrival_then_id() {
        let specs = vec![
            ProcessSpec::new("C", 1, 2, 3),
            ProcessSpec::new("B", 1, 2, 3),
            ProcessSpec::new("A", 1, 3, 3),
            ProcessSpec::new("Z", 1, 1, 1),
        ];
        let result = CpuPolicy::Sjf
            .schedule(&specs, &SimConfig::default())
            .unwrap();
        // Z finishes first; then B and C (arrival 2, id order), then A.
        assert_eq!(compact(&result), "ZBBBCCCAAA");
    }
}
