use slotmap::SlotMap;

use super::metrics::{self, ScheduleResult};
use super::observer;
use super::state::{
    ProcKey, ProcPhase, ProcState, ProcessSpec, SimConfig, Ticks, Timeline, validate_processes,
};
use crate::error::SpecError;

/// Shared clockwork for every scheduling policy: the run-state arena, the
/// arrival stream, the timeline and the simulated clock. Policies decide
/// *who* runs; this decides what running means.
pub(crate) struct SchedSim {
    procs: SlotMap<ProcKey, ProcState>,
    /// All processes, ordered by (arrival, id). `admitted` marks how many
    /// of them have already entered the ready set.
    admission: Vec<ProcKey>,
    admitted: usize,
    timeline: Timeline,
    now: Ticks,
    horizon: Ticks,
}

impl SchedSim {
    pub(crate) fn new(specs: &[ProcessSpec], config: &SimConfig) -> Result<Self, SpecError> {
        validate_processes(specs)?;

        let mut procs = SlotMap::with_key();
        let mut admission: Vec<ProcKey> = specs
            .iter()
            .map(|spec| procs.insert(ProcState::from_spec(spec)))
            .collect();
        admission.sort_by(|&a, &b| {
            let (a, b) = (&procs[a], &procs[b]);
            a.arrival.cmp(&b.arrival).then_with(|| a.id.cmp(&b.id))
        });

        Ok(Self {
            procs,
            admission,
            admitted: 0,
            timeline: Timeline::new(config.horizon),
            now: 1,
            horizon: config.horizon,
        })
    }

    pub(crate) fn now(&self) -> Ticks {
        self.now
    }

    pub(crate) fn within_horizon(&self) -> bool {
        self.now <= self.horizon
    }

    pub(crate) fn proc(&self, key: ProcKey) -> &ProcState {
        &self.procs[key]
    }

    pub(crate) fn procs(&self) -> impl Iterator<Item = &ProcState> {
        self.procs.values()
    }

    pub(crate) fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Every process in (arrival, id) order, regardless of admission.
    pub(crate) fn admission_order(&self) -> Vec<ProcKey> {
        self.admission.clone()
    }

    pub(crate) fn all_admitted(&self) -> bool {
        self.admitted == self.admission.len()
    }

    /// Moves every process with `arrival <= now` into the ready set and
    /// returns the newcomers. Called at the top of each tick so arrivals
    /// land before the tick's scheduling decision.
    pub(crate) fn admit_due(&mut self) -> Vec<ProcKey> {
        let mut admitted = Vec::new();
        while let Some(&key) = self.admission.get(self.admitted) {
            if self.procs[key].arrival > self.now {
                break;
            }
            self.procs[key].phase = ProcPhase::Ready;
            admitted.push(key);
            self.admitted += 1;
        }
        admitted
    }

    pub(crate) fn start_running(&mut self, key: ProcKey) {
        let proc = &mut self.procs[key];
        debug_assert_eq!(
            proc.phase,
            ProcPhase::Ready,
            "process {} picked while not ready",
            proc.id
        );
        proc.phase = ProcPhase::Running;
    }

    /// Puts a preempted or quantum-expired process back into the ready set;
    /// its readiness time becomes the current clock value.
    pub(crate) fn reenter_ready(&mut self, key: ProcKey) {
        let now = self.now;
        let proc = &mut self.procs[key];
        debug_assert_eq!(
            proc.phase,
            ProcPhase::Running,
            "process {} requeued while not running",
            proc.id
        );
        proc.phase = ProcPhase::Ready;
        proc.ready_at = now;
    }

    /// Runs `key` for one time unit and advances the clock. Returns true
    /// when the process just finished; its end time is one past the unit
    /// it last occupied.
    pub(crate) fn execute_unit(&mut self, key: ProcKey) -> bool {
        let now = self.now;

        // Timeline write in its own block to keep the arena borrow short.
        let recorded = {
            let proc = &self.procs[key];
            debug_assert_eq!(
                proc.phase,
                ProcPhase::Running,
                "process {} executed while not running",
                proc.id
            );
            debug_assert!(proc.remaining > 0, "process {} has no work left", proc.id);
            self.timeline.record(now, &proc.id)
        };

        let proc = &mut self.procs[key];
        proc.first_run.get_or_insert(now);
        if recorded {
            proc.slots_taken += 1;
        }
        proc.remaining -= 1;
        let completed = proc.remaining == 0;
        if completed {
            proc.phase = ProcPhase::Done;
            proc.finished_at = Some(now + 1);
        }
        self.now = now + 1;

        observer::check(self);
        completed
    }

    /// Lets a time unit pass with the CPU idle.
    pub(crate) fn idle(&mut self) {
        self.now += 1;
        observer::check(self);
    }

    /// Jumps the clock forward to `time` without running anything; the
    /// skipped slots stay idle. No-op when `time` is in the past.
    pub(crate) fn advance_to(&mut self, time: Ticks) {
        if time > self.now {
            self.now = time;
            observer::check(self);
        }
    }

    pub(crate) fn into_result(self) -> ScheduleResult {
        observer::check(&self);
        ScheduleResult {
            metrics: metrics::collect(self.procs.values()),
            timeline: self.timeline,
        }
    }
}
