use super::state::FrameTable;
use super::trace::ReplacementTrace;

/// Consistency sweep after every processed access. Debug assertions only;
/// a violation is a defect in a policy, not a reportable error.
pub(crate) fn check(table: &FrameTable, trace: &ReplacementTrace) {
    debug_assert_eq!(
        trace.hits() + trace.faults(),
        trace.accesses().len(),
        "hit/fault counters drifted from the access log"
    );

    let mut resident_count = 0usize;
    for (key, frame) in table.iter() {
        if let Some(page) = &frame.page {
            resident_count += 1;
            debug_assert_eq!(
                table.lookup(page),
                Some(key),
                "page {page} resident in frame {} but indexed elsewhere",
                frame.id
            );
        }
    }
    debug_assert_eq!(
        resident_count,
        table.resident_pages().len(),
        "residency index out of step with frame contents"
    );

    if let Some(last) = trace.accesses().last() {
        debug_assert_eq!(
            last.frames.len(),
            table.len(),
            "snapshot width differs from the frame count"
        );
    }
}
