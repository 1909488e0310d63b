use rustc_hash::FxHashMap;

use super::state::{ProcState, Ticks, Timeline};

/// Derived timing facts for one process.
///
/// `start` is the first unit the process ever ran; `end` is one past the
/// last. A process the horizon cut off keeps whatever it earned: a start
/// time if it ran, zeros for the derived values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProcessMetrics {
    pub start: Option<Ticks>,
    pub end: Option<Ticks>,
    pub turnaround: Ticks,
    pub waiting: Ticks,
}

/// What a scheduling run produces: the execution timeline plus per-process
/// timing, keyed by process id. Every input process has an entry.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleResult {
    pub timeline: Timeline,
    pub metrics: FxHashMap<String, ProcessMetrics>,
}

impl ScheduleResult {
    pub(crate) fn empty() -> Self {
        Self {
            timeline: Timeline::empty(),
            metrics: FxHashMap::default(),
        }
    }

    pub fn average_waiting_time(&self) -> f64 {
        average_of(self.metrics.values().map(|m| m.waiting))
    }

    pub fn average_turnaround_time(&self) -> f64 {
        average_of(self.metrics.values().map(|m| m.turnaround))
    }
}

fn average_of(values: impl ExactSizeIterator<Item = Ticks>) -> f64 {
    if values.len() == 0 {
        return 0.0;
    }
    let count = values.len() as f64;
    values.map(|v| v as f64).sum::<f64>() / count
}

/// Turnaround counts from arrival to completion; waiting is whatever part
/// of that the process spent off the CPU, floored at zero. Both use the
/// original burst, untouched by preemption bookkeeping.
pub(crate) fn collect<'a>(
    procs: impl Iterator<Item = &'a ProcState>,
) -> FxHashMap<String, ProcessMetrics> {
    procs
        .map(|proc| {
            let mut metrics = ProcessMetrics {
                start: proc.first_run,
                ..ProcessMetrics::default()
            };
            if let Some(end) = proc.finished_at {
                metrics.end = Some(end);
                metrics.turnaround = end - proc.arrival;
                metrics.waiting = metrics.turnaround.saturating_sub(proc.burst);
            }
            (proc.id.clone(), metrics)
        })
        .collect()
}
