//! First come, first served. Processes run to completion in (arrival, id)
//! order; the clock jumps over the gap when the next one is still on its
//! way. The whole batch is always played out, so end times can land past
//! the grid even though the grid itself stays clamped.

use crate::cpu::driver::SchedSim;
use crate::cpu::metrics::ScheduleResult;
use crate::cpu::state::{ProcessSpec, SimConfig};
use crate::error::SpecError;

pub(super) fn schedule(
    specs: &[ProcessSpec],
    config: &SimConfig,
) -> Result<ScheduleResult, SpecError> {
    let mut sim = SchedSim::new(specs, config)?;

    for key in sim.admission_order() {
        sim.advance_to(sim.proc(key).arrival);
        sim.admit_due();
        sim.start_running(key);
        let burst = sim.proc(key).burst;
        for _ in 0..burst {
            sim.execute_unit(key);
        }
    }

    Ok(sim.into_result())
}
