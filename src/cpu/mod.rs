pub(crate) mod driver;
pub mod metrics;
pub(crate) mod observer;
pub mod policy;
pub mod state;

pub use metrics::{ProcessMetrics, ScheduleResult};
pub use policy::{CpuPolicy, DEFAULT_QUANTUM};
pub use state::{DEFAULT_HORIZON, PriorityOrder, ProcessSpec, SimConfig, Ticks, Timeline};
