//! Deterministic simulation engines for two classic operating-system
//! resource-allocation problems: single-CPU process scheduling and page
//! replacement.
//!
//! Each engine is a pure function of its inputs. Feed it a workload (a
//! set of [`ProcessSpec`]s, or [`FrameSpec`]s plus a page-request
//! sequence) and a policy, and it plays out every allocation decision the
//! textbook version of that policy would make, one time unit or one page
//! request at a time. The CPU side answers with a [`Timeline`] and
//! per-process metrics; the memory side with a per-access hit/fault
//! [`ReplacementTrace`]. Nothing is shared between runs and caller inputs
//! are never mutated, so concurrent calls are safe and identical inputs
//! produce identical outputs.

pub mod cpu;
pub mod error;
pub mod mem;

pub use cpu::{
    CpuPolicy, DEFAULT_HORIZON, DEFAULT_QUANTUM, PriorityOrder, ProcessMetrics, ProcessSpec,
    ScheduleResult, SimConfig, Ticks, Timeline,
};
pub use error::SpecError;
pub use mem::{FrameSpec, PageAccessRecord, ReplacementPolicy, ReplacementTrace};
