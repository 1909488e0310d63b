use super::driver::SchedSim;
use super::state::ProcPhase;

/// Consistency sweep over the whole simulation state. Runs after every
/// clock advance; all findings are debug assertions, so release builds
/// only pay for the scan.
pub(crate) fn check(sim: &SchedSim) {
    let mut running = 0usize;
    for proc in sim.procs() {
        if proc.phase == ProcPhase::Running {
            running += 1;
        }

        debug_assert!(
            proc.remaining <= proc.burst,
            "process {} remaining {} exceeds burst {}",
            proc.id,
            proc.remaining,
            proc.burst
        );
        debug_assert!(
            proc.phase != ProcPhase::Done || proc.remaining == 0,
            "process {} marked done with {} units left",
            proc.id,
            proc.remaining
        );
        debug_assert!(
            proc.phase != ProcPhase::Done || proc.finished_at.is_some(),
            "process {} marked done without an end time",
            proc.id
        );

        let executed = proc.burst - proc.remaining;
        debug_assert!(
            proc.slots_taken <= executed,
            "process {} holds {} slots but only executed {} units",
            proc.id,
            proc.slots_taken,
            executed
        );
        debug_assert_eq!(
            sim.timeline().assigned_slots(&proc.id) as u64,
            proc.slots_taken,
            "process {} timeline cells drifted from its execution count",
            proc.id
        );
    }

    debug_assert!(running <= 1, "{running} processes running at once");
}
