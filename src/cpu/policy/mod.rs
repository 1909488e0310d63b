mod fcfs;
mod fcfs_priority;
mod round_robin;
mod round_robin_priority;
mod sjf;
mod sjf_priority;
mod srt;

use std::fmt::{self, Display};
use std::num::NonZeroU64;

use super::metrics::ScheduleResult;
use super::state::{PriorityOrder, ProcessSpec, SimConfig, validate_processes};
use crate::error::SpecError;

/// Time slice the round-robin policies use unless told otherwise.
pub const DEFAULT_QUANTUM: NonZeroU64 = NonZeroU64::new(2).unwrap();

/// The closed set of CPU scheduling policies. Dispatch is an exhaustive
/// match, so adding a variant without wiring it up will not compile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CpuPolicy {
    /// Arrival order, run to completion.
    Fcfs,
    /// Arrival order within a priority level; better priority preempts.
    FcfsPriority { order: PriorityOrder },
    /// Shortest burst first, non-preemptive.
    Sjf,
    /// Priority first, then shortest original burst; both can preempt.
    SjfPriority { order: PriorityOrder },
    /// Shortest remaining time, preemptive.
    Srt,
    RoundRobin { quantum: NonZeroU64 },
    RoundRobinPriority {
        quantum: NonZeroU64,
        order: PriorityOrder,
    },
}

impl CpuPolicy {
    /// Runs the policy over `specs` and returns the timeline plus
    /// per-process metrics. The input is only read; every run works on a
    /// private copy, so identical calls return identical results.
    pub fn schedule(
        &self,
        specs: &[ProcessSpec],
        config: &SimConfig,
    ) -> Result<ScheduleResult, SpecError> {
        validate_processes(specs)?;
        if specs.is_empty() {
            return Ok(ScheduleResult::empty());
        }

        match *self {
            CpuPolicy::Fcfs => fcfs::schedule(specs, config),
            CpuPolicy::FcfsPriority { order } => fcfs_priority::schedule(specs, config, order),
            CpuPolicy::Sjf => sjf::schedule(specs, config),
            CpuPolicy::SjfPriority { order } => sjf_priority::schedule(specs, config, order),
            CpuPolicy::Srt => srt::schedule(specs, config),
            CpuPolicy::RoundRobin { quantum } => round_robin::schedule(specs, config, quantum),
            CpuPolicy::RoundRobinPriority { quantum, order } => {
                round_robin_priority::schedule(specs, config, quantum, order)
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            CpuPolicy::Fcfs => "FCFS",
            CpuPolicy::FcfsPriority { .. } => "FCFS with Priority",
            CpuPolicy::Sjf => "SJF",
            CpuPolicy::SjfPriority { .. } => "SJF with Priority",
            CpuPolicy::Srt => "SRT",
            CpuPolicy::RoundRobin { .. } => "Round Robin",
            CpuPolicy::RoundRobinPriority { .. } => "Round Robin with Priority",
        }
    }
}

impl Display for CpuPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CpuPolicy::RoundRobin { quantum } => write!(f, "Round Robin (Q={quantum})"),
            CpuPolicy::RoundRobinPriority { quantum, .. } => {
                write!(f, "Round Robin with Priority (Q={quantum})")
            }
            other => f.write_str(other.name()),
        }
    }
}
