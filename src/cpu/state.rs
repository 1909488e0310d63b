use std::cmp::Reverse;
use std::fmt::{self, Display};

use keyed_priority_queue::KeyedPriorityQueue;
use slotmap::new_key_type;

use crate::error::SpecError;

pub type Ticks = u64;

/// Timeline length the simulation runs against when nothing else is asked
/// for. Matches the 32-column grid the result is meant to fill.
pub const DEFAULT_HORIZON: Ticks = 32;

new_key_type! {
    pub(crate) struct ProcKey;
}

/// Engine-level knobs shared by every scheduling policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimConfig {
    /// Last simulated time unit; the clock runs 1..=horizon.
    pub horizon: Ticks,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            horizon: DEFAULT_HORIZON,
        }
    }
}

/// Which end of the priority scale wins when two processes compete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PriorityOrder {
    #[default]
    HigherWins,
    LowerWins,
}

impl PriorityOrder {
    /// Collapses a priority onto a single scale where a smaller rank is
    /// always the better one, so selection keys can sort ascending.
    pub(crate) fn rank(self, priority: i32) -> i64 {
        match self {
            PriorityOrder::HigherWins => -i64::from(priority),
            PriorityOrder::LowerWins => i64::from(priority),
        }
    }
}

/// Immutable description of one process, as entered by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessSpec {
    pub id: String,
    pub priority: i32,
    pub arrival: Ticks,
    pub burst: Ticks,
}

impl ProcessSpec {
    pub fn new(id: impl Into<String>, priority: i32, arrival: Ticks, burst: Ticks) -> Self {
        Self {
            id: id.into(),
            priority,
            arrival,
            burst,
        }
    }
}

impl Display for ProcessSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "process {}: priority={} arrival={} burst={}",
            self.id, self.priority, self.arrival, self.burst
        )
    }
}

/// Rejects process sets the engine cannot schedule meaningfully.
/// An empty set is fine; it short-circuits to an empty result upstream.
pub(crate) fn validate_processes(specs: &[ProcessSpec]) -> Result<(), SpecError> {
    let mut seen: Vec<&str> = Vec::with_capacity(specs.len());
    for spec in specs {
        if spec.arrival == 0 {
            return Err(SpecError::MalformedProcess {
                id: spec.id.clone(),
                field: "arrival",
                value: spec.arrival,
            });
        }
        if spec.burst == 0 {
            return Err(SpecError::MalformedProcess {
                id: spec.id.clone(),
                field: "burst",
                value: spec.burst,
            });
        }
        if seen.contains(&spec.id.as_str()) {
            return Err(SpecError::DuplicateProcessId {
                id: spec.id.clone(),
            });
        }
        seen.push(&spec.id);
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ProcPhase {
    /// Not yet arrived.
    Pending,
    /// Arrived, waiting to be picked.
    Ready,
    Running,
    Done,
}

/// Per-run shadow of a [`ProcessSpec`]. Lives in the simulation's arena and
/// is discarded with it; the caller's specs are never touched.
#[derive(Debug, Clone)]
pub(crate) struct ProcState {
    pub id: String,
    pub priority: i32,
    pub arrival: Ticks,
    /// Original burst; metrics are computed against this, not `remaining`.
    pub burst: Ticks,
    pub remaining: Ticks,
    /// When the process last became eligible to run. Starts at `arrival`,
    /// reset to the current time on preemption or quantum expiry.
    pub ready_at: Ticks,
    pub phase: ProcPhase,
    pub first_run: Option<Ticks>,
    pub finished_at: Option<Ticks>,
    /// Timeline cells actually written for this process.
    pub slots_taken: u64,
}

impl ProcState {
    pub(crate) fn from_spec(spec: &ProcessSpec) -> Self {
        Self {
            id: spec.id.clone(),
            priority: spec.priority,
            arrival: spec.arrival,
            burst: spec.burst,
            remaining: spec.burst,
            ready_at: spec.arrival,
            phase: ProcPhase::Pending,
            first_run: None,
            finished_at: None,
            slots_taken: 0,
        }
    }
}

/// Execution record: slot `t` (1-indexed) holds the id of the process that
/// ran during time unit `t`, or `None` while the CPU idled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timeline {
    slots: Vec<Option<String>>,
}

impl Timeline {
    pub(crate) fn new(horizon: Ticks) -> Self {
        Self {
            slots: vec![None; horizon as usize],
        }
    }

    /// The zero-length timeline produced for an empty process set.
    pub(crate) fn empty() -> Self {
        Self { slots: Vec::new() }
    }

    pub fn horizon(&self) -> Ticks {
        self.slots.len() as Ticks
    }

    /// Id running during unit `time` (1-indexed), if any.
    pub fn slot(&self, time: Ticks) -> Option<&str> {
        self.slots
            .get(time.checked_sub(1)? as usize)
            .and_then(|s| s.as_deref())
    }

    pub fn slots(&self) -> &[Option<String>] {
        &self.slots
    }

    pub fn idle_slots(&self) -> usize {
        self.slots.iter().filter(|s| s.is_none()).count()
    }

    pub fn assigned_slots(&self, id: &str) -> usize {
        self.slots
            .iter()
            .filter(|s| s.as_deref() == Some(id))
            .count()
    }

    /// Writes beyond the horizon are dropped; the clock may keep running
    /// past the grid but nothing is recorded there.
    pub(crate) fn record(&mut self, time: Ticks, id: &str) -> bool {
        let Some(slot) = time
            .checked_sub(1)
            .and_then(|i| self.slots.get_mut(i as usize))
        else {
            return false;
        };
        debug_assert!(
            slot.is_none(),
            "timeline slot {time} already taken by {:?}",
            slot
        );
        *slot = Some(id.to_owned());
        true
    }
}

/// Ready set keyed by a per-policy selection key. `KeyedPriorityQueue` pops
/// its greatest priority, and selection keys sort ascending (best first),
/// so keys go in wrapped in `Reverse`.
pub(crate) struct ReadyQueue<K: Ord> {
    heap: KeyedPriorityQueue<ProcKey, Reverse<K>>,
}

impl<K: Ord> ReadyQueue<K> {
    pub(crate) fn new() -> Self {
        Self {
            heap: KeyedPriorityQueue::new(),
        }
    }

    pub(crate) fn push(&mut self, key: ProcKey, selection: K) {
        self.heap.push(key, Reverse(selection));
    }

    pub(crate) fn pop(&mut self) -> Option<ProcKey> {
        self.heap.pop().map(|(key, _)| key)
    }

    pub(crate) fn peek(&self) -> Option<(ProcKey, &K)> {
        self.heap.peek().map(|(key, rev)| (*key, &rev.0))
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_rejects_zero_fields() {
        let err = validate_processes(&[ProcessSpec::new("A", 1, 0, 4)]).unwrap_err();
        assert_eq!(
            err,
            SpecError::MalformedProcess {
                id: "A".into(),
                field: "arrival",
                value: 0,
            }
        );

        let err = validate_processes(&[ProcessSpec::new("A", 1, 2, 0)]).unwrap_err();
        assert_eq!(
            err,
            SpecError::MalformedProcess {
                id: "A".into(),
                field: "burst",
                value: 0,
            }
        );
    }

    #[test]
    fn validate_rejects_duplicate_ids() {
        let specs = [
            ProcessSpec::new("A", 1, 1, 2),
            ProcessSpec::new("A", 2, 3, 4),
        ];
        assert_eq!(
            validate_processes(&specs).unwrap_err(),
            SpecError::DuplicateProcessId { id: "A".into() }
        );
    }

    #[test]
    fn rank_flips_with_order() {
        assert!(PriorityOrder::HigherWins.rank(5) < PriorityOrder::HigherWins.rank(3));
        assert!(PriorityOrder::LowerWins.rank(3) < PriorityOrder::LowerWins.rank(5));
    }

    #[test]
    fn timeline_drops_out_of_range_writes() {
        let mut timeline = Timeline::new(4);
        assert!(timeline.record(1, "A"));
        assert!(timeline.record(4, "B"));
        assert!(!timeline.record(5, "B"));
        assert_eq!(timeline.slot(1), Some("A"));
        assert_eq!(timeline.slot(4), Some("B"));
        assert_eq!(timeline.slot(5), None);
        assert_eq!(timeline.idle_slots(), 2);
    }

    #[test]
    fn ready_queue_pops_smallest_key() {
        let mut procs = slotmap::SlotMap::<ProcKey, ()>::with_key();
        let a = procs.insert(());
        let b = procs.insert(());
        let mut ready = ReadyQueue::new();
        ready.push(a, (2u64, "A".to_owned()));
        ready.push(b, (1u64, "B".to_owned()));
        assert_eq!(ready.peek().map(|(k, _)| k), Some(b));
        assert_eq!(ready.pop(), Some(b));
        assert_eq!(ready.pop(), Some(a));
        assert!(ready.is_empty());
    }
}
